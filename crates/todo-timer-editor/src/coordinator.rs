/*
[INPUT]:  Action stream + store snapshots, TimerConfig, ConfirmPrompt, shutdown token
[OUTPUT]: Countdown lifecycle dispatches (timer_*, draft_reset_requested)
[POS]:    Timer layer - supervisory loop racing the countdown against stop signals and a timeout
[UPDATE]: When changing wake conditions, stop signals, or timeout resolution
[UPDATE]: 2026-10-08 Drive the countdown inside the race so cancellation cleanup is awaited
[UPDATE]: 2026-10-09 Publish Idle/Counting phase over a watch channel
*/

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::action::Action;
use crate::config::TimerConfig;
use crate::countdown::{Countdown, CountdownOutcome};
use crate::prompt::ConfirmPrompt;
use crate::store::{ActionStream, Store};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinatorPhase {
    Idle,
    Counting,
    /// Timed out; waiting on the confirmation prompt.
    Confirming,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum RaceOutcome {
    Stopped(Action),
    TimedOut,
    Shutdown,
}

/// Long-lived supervisor for timer mode.
///
/// Subscribes to the store on construction so no action dispatched before `spawn`
/// is missed.
pub struct TimerCoordinator {
    store: Store,
    actions: ActionStream,
    prompt: Arc<dyn ConfirmPrompt>,
    config: TimerConfig,
    shutdown: CancellationToken,
    phase: watch::Sender<CoordinatorPhase>,
}

impl TimerCoordinator {
    pub fn new(
        store: Store,
        prompt: Arc<dyn ConfirmPrompt>,
        config: TimerConfig,
        shutdown: CancellationToken,
    ) -> Self {
        let actions = store.subscribe();
        let (phase, _rx) = watch::channel(CoordinatorPhase::Idle);
        Self {
            store,
            actions,
            prompt,
            config,
            shutdown,
            phase,
        }
    }

    pub fn phase(&self) -> watch::Receiver<CoordinatorPhase> {
        self.phase.subscribe()
    }

    pub fn spawn(self) -> JoinHandle<Result<()>> {
        tokio::spawn(async move {
            self.run().await;
            Ok(())
        })
    }

    /// Runs until the shutdown token fires or the action stream closes.
    ///
    /// Nothing in here is fatal: prompt failures resolve as "keep" and a failed
    /// re-check is a spurious wake.
    pub async fn run(mut self) {
        info!(
            duration_secs = self.config.duration_secs,
            "timer coordinator running"
        );

        loop {
            let next = tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => None,
                action = self.actions.recv() => action,
            };
            let Some(action) = next else {
                break;
            };
            if !action.wakes_timer() {
                continue;
            }

            // The triggering action alone is not enough: a toggle may just have turned
            // the mode off, and typing may have stopped since.
            let (mode, is_typing) = self
                .store
                .read(|state| (state.timer.mode, state.timer.is_typing));
            if !(mode && is_typing) {
                debug!(
                    trigger = action.name(),
                    mode, is_typing, "spurious timer wake ignored"
                );
                continue;
            }

            if !self.count().await {
                break;
            }
        }

        self.phase.send_replace(CoordinatorPhase::Idle);
        info!("timer coordinator stopped");
    }

    /// One Counting episode. Returns `false` when the coordinator should exit.
    async fn count(&mut self) -> bool {
        self.phase.send_replace(CoordinatorPhase::Counting);

        let cancel = self.shutdown.child_token();
        let countdown = Countdown::start(
            self.store.clone(),
            self.config.countdown_ticks(),
            cancel.clone(),
        )
        .run();
        tokio::pin!(countdown);
        let timeout = tokio::time::sleep(self.config.timeout());
        tokio::pin!(timeout);
        let mut countdown_done = false;

        let outcome = loop {
            tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => break RaceOutcome::Shutdown,
                stop = next_stop_signal(&mut self.actions) => {
                    break match stop {
                        Some(action) => RaceOutcome::Stopped(action),
                        None => RaceOutcome::Shutdown,
                    };
                }
                _ = &mut timeout => break RaceOutcome::TimedOut,
                finished = &mut countdown, if !countdown_done => {
                    countdown_done = true;
                    debug!(?finished, "countdown ran out before the race timeout");
                }
            }
        };

        // Cancel and wait so the countdown's cleanup lands before anything else.
        cancel.cancel();
        if !countdown_done {
            let finished = countdown.await;
            debug_assert!(matches!(finished, CountdownOutcome::Cancelled { .. }));
        }

        let keep_running = match outcome {
            RaceOutcome::Stopped(action) => {
                debug!(signal = action.name(), "countdown stopped");
                true
            }
            RaceOutcome::TimedOut => self.resolve_timeout().await,
            RaceOutcome::Shutdown => false,
        };

        self.phase.send_replace(CoordinatorPhase::Idle);
        keep_running
    }

    async fn resolve_timeout(&mut self) -> bool {
        self.phase.send_replace(CoordinatorPhase::Confirming);
        info!("timer expired; asking for confirmation");

        let answer = tokio::select! {
            biased;
            _ = self.shutdown.cancelled() => return false,
            answer = self.prompt.confirm(&self.config.prompt_message) => answer,
        };

        match answer {
            Ok(true) => {
                self.store.dispatch(Action::DraftResetRequested);
                info!(
                    epoch = self.store.read(|state| state.timer.draft_reset_epoch),
                    "draft discarded"
                );
            }
            Ok(false) => {
                self.store.dispatch(Action::TimerStopped);
                info!("draft kept");
            }
            Err(err) => {
                warn!(error = %err, "confirmation prompt failed; keeping draft");
                self.store.dispatch(Action::TimerStopped);
            }
        }
        true
    }
}

/// First stop signal on the stream, or `None` once the stream closes.
async fn next_stop_signal(actions: &mut ActionStream) -> Option<Action> {
    loop {
        let action = actions.recv().await?;
        if action.stops_timer() {
            return Some(action);
        }
    }
}
