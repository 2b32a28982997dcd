/*
[INPUT]:  Actions from front ends, the timer coordinator and the fetch worker
[OUTPUT]: Atomically updated AppState snapshots + ordered action fan-out
[POS]:    State layer - single shared mutable resource
[UPDATE]: When adding actions or state fields
[UPDATE]: 2026-10-06 Apply transitions before fan-out so observers re-check post-action state
[UPDATE]: 2026-10-07 Add conditional dispatch for take-latest fetch results
*/

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::{mpsc, watch};
use tracing::{debug, trace};

use crate::action::Action;
use crate::model::{FetchState, FetchStatus, Filter, TimerState, TodoItem};

/// Ordered stream of every action dispatched after subscription.
pub type ActionStream = mpsc::UnboundedReceiver<Action>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    /// Newest first.
    pub items: Vec<TodoItem>,
    pub filter: Filter,
    pub fetch: FetchState,
    pub timer: TimerState,
}

impl AppState {
    /// Pure transition function. Total over every action; never fails.
    pub fn apply(&mut self, action: &Action) {
        match action {
            Action::Add { id, title } => {
                let title = title.trim();
                if title.is_empty() {
                    return;
                }
                self.items.insert(0, TodoItem::new(id.clone(), title));
            }
            Action::Toggle(id) => {
                if let Some(item) = self.items.iter_mut().find(|item| &item.id == id) {
                    item.completed = !item.completed;
                }
            }
            Action::Remove(id) => self.items.retain(|item| &item.id != id),
            Action::ClearCompleted => self.items.retain(|item| !item.completed),
            Action::SetFilter(filter) => self.filter = *filter,
            Action::FetchRequested => {
                self.fetch.status = FetchStatus::Loading;
                self.fetch.error = None;
                self.fetch.request_seq += 1;
            }
            Action::FetchSucceeded(items) => {
                self.fetch.status = FetchStatus::Succeeded;
                self.fetch.error = None;
                self.items = items.clone();
            }
            Action::FetchFailed(message) => {
                self.fetch.status = FetchStatus::Failed;
                self.fetch.error = Some(message.clone());
            }
            Action::ToggleTimerMode => {
                self.timer.mode = !self.timer.mode;
                if !self.timer.mode {
                    self.timer.is_typing = false;
                    self.timer.remaining_seconds = 0;
                }
            }
            Action::TypingStarted => self.timer.is_typing = true,
            Action::TypingStopped => {
                self.timer.is_typing = false;
                self.timer.remaining_seconds = 0;
            }
            Action::TimerStarted(seconds) => self.timer.remaining_seconds = *seconds,
            Action::TimerTick => {
                self.timer.remaining_seconds = self.timer.remaining_seconds.saturating_sub(1);
            }
            Action::TimerStopped => self.timer.remaining_seconds = 0,
            Action::DraftResetRequested => {
                self.timer.draft_reset_epoch += 1;
                self.timer.is_typing = false;
                self.timer.remaining_seconds = 0;
            }
        }
    }

    /// Items passing the active filter, list order preserved.
    pub fn visible_items(&self) -> impl Iterator<Item = &TodoItem> + '_ {
        let filter = self.filter;
        self.items.iter().filter(move |item| filter.matches(item))
    }

    pub fn active_count(&self) -> usize {
        self.items.iter().filter(|item| !item.completed).count()
    }

    pub fn completed_count(&self) -> usize {
        self.items.len() - self.active_count()
    }
}

struct StoreInner {
    state: watch::Sender<AppState>,
    subscribers: Mutex<Vec<mpsc::UnboundedSender<Action>>>,
}

/// Cloneable handle to one store instance.
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &*self.inner.state.borrow())
            .finish_non_exhaustive()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    pub fn new() -> Self {
        Self::with_state(AppState::default())
    }

    pub fn with_state(state: AppState) -> Self {
        let (state, _rx) = watch::channel(state);
        Self {
            inner: Arc::new(StoreInner {
                state,
                subscribers: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Apply `action` and then hand it to every subscriber.
    ///
    /// Holding the subscriber lock across both steps keeps the fan-out order identical to
    /// the order transitions were applied in.
    pub fn dispatch(&self, action: Action) {
        let mut subscribers = self.lock_subscribers();
        self.apply_locked(&action);
        Self::fan_out(&mut subscribers, action);
    }

    /// Dispatch only if `guard` holds against the current state. Returns whether it did.
    pub fn dispatch_if<F>(&self, guard: F, action: Action) -> bool
    where
        F: FnOnce(&AppState) -> bool,
    {
        let mut subscribers = self.lock_subscribers();
        if !guard(&self.inner.state.borrow()) {
            debug!(action = action.name(), "conditional dispatch skipped");
            return false;
        }
        self.apply_locked(&action);
        Self::fan_out(&mut subscribers, action);
        true
    }

    /// Clone of the current state. Never suspends.
    pub fn snapshot(&self) -> AppState {
        self.inner.state.borrow().clone()
    }

    /// Read a projection of the current state without cloning it.
    pub fn read<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&self.inner.state.borrow())
    }

    /// Change-notifying view for renderers.
    pub fn watch(&self) -> watch::Receiver<AppState> {
        self.inner.state.subscribe()
    }

    pub fn subscribe(&self) -> ActionStream {
        self.subscribe_with(|_| ()).0
    }

    /// Subscribe and project the state in one step.
    ///
    /// No dispatch lands between the projection and the first action on the stream:
    /// everything already applied is in `R`, everything after it arrives on the stream.
    pub fn subscribe_with<R>(&self, project: impl FnOnce(&AppState) -> R) -> (ActionStream, R) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut subscribers = self.lock_subscribers();
        let projected = project(&self.inner.state.borrow());
        subscribers.push(tx);
        (rx, projected)
    }

    fn apply_locked(&self, action: &Action) {
        match action {
            Action::TimerTick => trace!("dispatch timer_tick"),
            _ => debug!(action = action.name(), "dispatch"),
        }
        self.inner.state.send_modify(|state| state.apply(action));
    }

    fn fan_out(subscribers: &mut Vec<mpsc::UnboundedSender<Action>>, action: Action) {
        subscribers.retain(|tx| tx.send(action.clone()).is_ok());
    }

    fn lock_subscribers(&self) -> MutexGuard<'_, Vec<mpsc::UnboundedSender<Action>>> {
        self.inner
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
