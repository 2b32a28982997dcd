/*
[INPUT]:  Store handle, log buffer, key-driven intents, prompt requests
[OUTPUT]: TuiApp state for rendering and store dispatch
[POS]:    TUI app state and intent handling
[UPDATE]: When adding key-driven intents or local UI state
[UPDATE]: 2026-10-10 Keep the entry draft local; only typing transitions reach the store
*/

use ratatui::widgets::ListState;
use tracing::{debug, warn};
use tui_input::{Input, InputRequest};

use todo_timer_editor::action::Action;
use todo_timer_editor::draft::{EpochWatch, SubmitRefusal, submit_actions, typing_transition};
use todo_timer_editor::model::{FetchStatus, Filter, TodoId};
use todo_timer_editor::prompt::PromptRequest;
use todo_timer_editor::store::Store;

use crate::tui::LogBufferHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Tab {
    List,
    Logs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Focus {
    Entry,
    List,
}

pub(super) struct TuiApp {
    pub(super) store: Store,
    pub(super) log_buffer: LogBufferHandle,
    pub(super) input: Input,
    pub(super) focus: Focus,
    pub(super) current_tab: Tab,
    pub(super) list_state: ListState,
    pub(super) status_message: String,
    pub(super) pending_prompt: Option<PromptRequest>,
    epoch: EpochWatch,
}

impl TuiApp {
    pub(super) fn new(store: Store, log_buffer: LogBufferHandle) -> Self {
        let epoch = store.read(EpochWatch::new);
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            store,
            log_buffer,
            input: Input::default(),
            focus: Focus::Entry,
            current_tab: Tab::List,
            list_state,
            status_message: "Ready".to_string(),
            pending_prompt: None,
            epoch,
        }
    }

    /// Apply an edit to the draft, then emit whatever typing transition it implies.
    pub(super) fn edit(&mut self, request: InputRequest) {
        let changed = self
            .input
            .handle(request)
            .is_some_and(|state| state.value);
        if changed {
            self.sync_typing();
        }
    }

    fn sync_typing(&mut self) {
        let draft = self.input.value();
        if let Some(action) = self.store.read(|state| typing_transition(draft, state)) {
            self.store.dispatch(action);
        }
    }

    pub(super) fn submit(&mut self) {
        match self.store.read(|state| submit_actions(self.input.value(), state)) {
            Ok(actions) => {
                for action in actions {
                    self.store.dispatch(action);
                }
                self.input.reset();
                self.status_message = "Added".to_string();
            }
            Err(SubmitRefusal::Empty) => {}
            Err(refusal @ SubmitRefusal::TimeIsUp) => {
                self.status_message = refusal.to_string();
            }
        }
    }

    /// Called whenever the store publishes a new state.
    pub(super) fn on_state_change(&mut self) {
        if self.store.read(|state| self.epoch.reset_requested(state)) {
            self.input.reset();
            self.status_message = "Draft discarded".to_string();
        }
        self.clamp_selection();
    }

    pub(super) fn offer_prompt(&mut self, request: PromptRequest) {
        if let Some(previous) = self.pending_prompt.replace(request) {
            debug!("replacing unanswered prompt");
            drop(previous);
        }
    }

    pub(super) fn answer_prompt(&mut self, discard: bool) {
        let Some(request) = self.pending_prompt.take() else {
            return;
        };
        if let Err(err) = request.answer(discard) {
            warn!(error = %err, "prompt answer not delivered");
        }
        self.status_message = if discard {
            "Discarding draft".to_string()
        } else {
            "Keep editing".to_string()
        };
    }

    /// Drop any open prompt; the coordinator treats it as "keep".
    pub(super) fn dismiss_prompt(&mut self) {
        self.pending_prompt = None;
    }

    pub(super) fn focus_entry(&mut self) {
        self.focus = Focus::Entry;
        self.current_tab = Tab::List;
    }

    pub(super) fn focus_list(&mut self) {
        self.focus = Focus::List;
    }

    pub(super) fn next_tab(&mut self) {
        self.current_tab = match self.current_tab {
            Tab::List => Tab::Logs,
            Tab::Logs => Tab::List,
        };
    }

    fn visible_len(&self) -> usize {
        self.store.read(|state| state.visible_items().count())
    }

    fn selected_id(&self) -> Option<TodoId> {
        let index = self.list_state.selected()?;
        self.store
            .read(|state| state.visible_items().nth(index).map(|item| item.id.clone()))
    }

    pub(super) fn move_selection(&mut self, delta: isize) {
        let len = self.visible_len();
        if len == 0 {
            self.list_state.select(None);
            return;
        }
        let current = self.list_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, (len - 1) as isize) as usize;
        self.list_state.select(Some(next));
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_len();
        match self.list_state.selected() {
            _ if len == 0 => self.list_state.select(None),
            None => self.list_state.select(Some(0)),
            Some(selected) if selected >= len => self.list_state.select(Some(len - 1)),
            Some(_) => {}
        }
    }

    pub(super) fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            self.store.dispatch(Action::Toggle(id));
        }
    }

    pub(super) fn remove_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            self.store.dispatch(Action::Remove(id));
        }
    }

    pub(super) fn clear_completed(&mut self) {
        if self.store.read(|state| state.completed_count()) == 0 {
            self.status_message = "Nothing to clear".to_string();
            return;
        }
        self.store.dispatch(Action::ClearCompleted);
    }

    pub(super) fn set_filter(&mut self, filter: Filter) {
        self.store.dispatch(Action::SetFilter(filter));
        self.status_message = format!("Showing {filter}");
    }

    pub(super) fn toggle_timer_mode(&mut self) {
        if self.store.read(|state| state.timer.is_typing) {
            self.status_message = "Finish or clear the draft first".to_string();
            return;
        }
        self.store.dispatch(Action::ToggleTimerMode);
        let mode = self.store.read(|state| state.timer.mode);
        self.status_message = format!("Timer mode {}", if mode { "on" } else { "off" });
    }

    pub(super) fn load_sample(&mut self) {
        if self.store.read(|state| state.fetch.status) == FetchStatus::Loading {
            self.status_message = "Already loading".to_string();
            return;
        }
        self.store.dispatch(Action::FetchRequested);
        self.status_message = "Loading sample".to_string();
    }
}
