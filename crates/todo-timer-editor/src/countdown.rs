/*
[INPUT]:  Store handle, duration in seconds, CancellationToken
[OUTPUT]: timer_started / timer_tick dispatches, timer_stopped on cancellation only
[POS]:    Timer layer - per-second countdown owned by the coordinator
[UPDATE]: When changing tick cadence or cancellation cleanup
*/

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::action::Action;
use crate::store::Store;

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownOutcome {
    /// All ticks were emitted.
    Completed,
    /// Cancelled with `remaining` ticks still pending; cleanup already dispatched.
    Cancelled { remaining: u32 },
}

/// Cancellable countdown.
///
/// `start` dispatches `TimerStarted` right away; `run` emits one `TimerTick` per
/// second. Cancellation through the token is checked before every tick, so once the
/// token is cancelled no further tick is emitted and `TimerStopped` is dispatched
/// exactly once. Natural completion dispatches nothing extra.
#[derive(Debug)]
pub struct Countdown {
    store: Store,
    seconds: u32,
    cancel: CancellationToken,
}

impl Countdown {
    pub fn start(store: Store, seconds: u32, cancel: CancellationToken) -> Self {
        debug!(seconds, "countdown started");
        store.dispatch(Action::TimerStarted(seconds));
        Self {
            store,
            seconds,
            cancel,
        }
    }

    pub async fn run(self) -> CountdownOutcome {
        let mut remaining = self.seconds;
        while remaining > 0 {
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    self.store.dispatch(Action::TimerStopped);
                    debug!(remaining, "countdown cancelled");
                    return CountdownOutcome::Cancelled { remaining };
                }
                _ = tokio::time::sleep(TICK_INTERVAL) => {
                    remaining -= 1;
                    self.store.dispatch(Action::TimerTick);
                    trace!(remaining, "countdown tick");
                }
            }
        }
        debug!("countdown completed");
        CountdownOutcome::Completed
    }
}
