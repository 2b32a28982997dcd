/*
[INPUT]:  Entry-field text owned by a front end + current AppState
[OUTPUT]: Typing / add actions to dispatch, draft-reset detection
[POS]:    Boundary layer - shared draft rules for the TUI and CLI front ends
[UPDATE]: When changing when typing starts/stops or when submission is refused
*/

use std::fmt;

use crate::action::Action;
use crate::store::AppState;

/// Typing transition implied by the current draft text, if any.
pub fn typing_transition(draft: &str, state: &AppState) -> Option<Action> {
    let timer = &state.timer;
    if !timer.mode {
        return None;
    }
    let has_text = !draft.trim().is_empty();
    match (has_text, timer.is_typing) {
        (true, false) => Some(Action::TypingStarted),
        (false, true) => Some(Action::TypingStopped),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRefusal {
    Empty,
    TimeIsUp,
}

impl fmt::Display for SubmitRefusal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitRefusal::Empty => f.write_str("nothing to add"),
            SubmitRefusal::TimeIsUp => f.write_str("time is up; answer the prompt first"),
        }
    }
}

/// Actions for submitting `draft`, in dispatch order.
///
/// The caller clears its draft once these are dispatched.
pub fn submit_actions(draft: &str, state: &AppState) -> Result<Vec<Action>, SubmitRefusal> {
    let title = draft.trim();
    if title.is_empty() {
        return Err(SubmitRefusal::Empty);
    }
    if state.timer.time_is_up() {
        return Err(SubmitRefusal::TimeIsUp);
    }

    let mut actions = vec![Action::add(title)];
    if state.timer.mode {
        actions.push(Action::TypingStopped);
    }
    Ok(actions)
}

/// Tracks `draft_reset_epoch` so a front end knows when to drop its local draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpochWatch {
    seen: u64,
}

impl EpochWatch {
    pub fn new(state: &AppState) -> Self {
        Self {
            seen: state.timer.draft_reset_epoch,
        }
    }

    /// True once per epoch change.
    pub fn reset_requested(&mut self, state: &AppState) -> bool {
        let epoch = state.timer.draft_reset_epoch;
        if epoch == self.seen {
            return false;
        }
        self.seen = epoch;
        true
    }
}
