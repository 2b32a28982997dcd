/*
[INPUT]:  UI intents, countdown events, fetch results
[OUTPUT]: Action vocabulary - the only way to change store state
[POS]:    Domain layer - actions consumed by the store and observed by workers
[UPDATE]: When adding a new state transition
*/

use crate::model::{Filter, TodoId, TodoItem};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Prepend a new item; ignored when the title is blank.
    Add { id: TodoId, title: String },
    Toggle(TodoId),
    Remove(TodoId),
    ClearCompleted,
    SetFilter(Filter),
    FetchRequested,
    FetchSucceeded(Vec<TodoItem>),
    FetchFailed(String),
    ToggleTimerMode,
    TypingStarted,
    TypingStopped,
    TimerStarted(u32),
    TimerTick,
    /// Countdown abandoned; typing flag left as is.
    TimerStopped,
    /// Time ran out and the user chose to discard the draft.
    DraftResetRequested,
}

impl Action {
    /// Build an `Add` with a freshly generated id.
    pub fn add(title: impl Into<String>) -> Self {
        Action::Add {
            id: TodoId::generate(),
            title: title.into(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Action::Add { .. } => "add",
            Action::Toggle(_) => "toggle",
            Action::Remove(_) => "remove",
            Action::ClearCompleted => "clear_completed",
            Action::SetFilter(_) => "set_filter",
            Action::FetchRequested => "fetch_requested",
            Action::FetchSucceeded(_) => "fetch_succeeded",
            Action::FetchFailed(_) => "fetch_failed",
            Action::ToggleTimerMode => "toggle_timer_mode",
            Action::TypingStarted => "typing_started",
            Action::TypingStopped => "typing_stopped",
            Action::TimerStarted(_) => "timer_started",
            Action::TimerTick => "timer_tick",
            Action::TimerStopped => "timer_stopped",
            Action::DraftResetRequested => "draft_reset_requested",
        }
    }

    /// Actions that wake an idle coordinator.
    pub fn wakes_timer(&self) -> bool {
        matches!(self, Action::TypingStarted | Action::ToggleTimerMode)
    }

    /// Actions that end a running countdown.
    pub fn stops_timer(&self) -> bool {
        matches!(
            self,
            Action::TypingStopped
                | Action::ToggleTimerMode
                | Action::FetchRequested
                | Action::Add { .. }
        )
    }
}
