/*
[INPUT]:  Crossterm key events
[OUTPUT]: TuiApp intents (draft edits, list intents, prompt answers)
[POS]:    TUI key routing
[UPDATE]: When changing keybindings
*/

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tui_input::InputRequest;

use todo_timer_editor::model::Filter;

use super::app::{Focus, TuiApp};

/// Handles key events for the TUI.
///
/// Returns `true` if quit is requested, `false` otherwise.
pub(super) fn handle_key_event(app: &mut TuiApp, key: KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }
    if app.pending_prompt.is_some() {
        handle_prompt_key(app, key.code);
        return false;
    }

    match app.focus {
        Focus::Entry => {
            handle_entry_key(app, key);
            false
        }
        Focus::List => handle_list_key(app, key.code),
    }
}

fn handle_prompt_key(app: &mut TuiApp, key: KeyCode) {
    match key {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.answer_prompt(true),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.answer_prompt(false),
        _ => {}
    }
}

fn handle_entry_key(app: &mut TuiApp, key: KeyEvent) {
    let request = match key.code {
        KeyCode::Enter => {
            app.submit();
            return;
        }
        KeyCode::Esc => {
            app.focus_list();
            return;
        }
        KeyCode::Tab => {
            app.next_tab();
            return;
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            InputRequest::DeletePrevWord
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            InputRequest::DeleteLine
        }
        KeyCode::Char(ch) => InputRequest::InsertChar(ch),
        KeyCode::Backspace => InputRequest::DeletePrevChar,
        KeyCode::Delete => InputRequest::DeleteNextChar,
        KeyCode::Left => InputRequest::GoToPrevChar,
        KeyCode::Right => InputRequest::GoToNextChar,
        KeyCode::Home => InputRequest::GoToStart,
        KeyCode::End => InputRequest::GoToEnd,
        _ => return,
    };
    app.edit(request);
}

fn handle_list_key(app: &mut TuiApp, key: KeyCode) -> bool {
    match key {
        KeyCode::Char('q') => return true,
        KeyCode::Char('i') | KeyCode::Char('a') => app.focus_entry(),
        KeyCode::Char(' ') => app.toggle_selected(),
        KeyCode::Char('d') | KeyCode::Delete => app.remove_selected(),
        KeyCode::Char('c') => app.clear_completed(),
        KeyCode::Char('1') => app.set_filter(Filter::All),
        KeyCode::Char('2') => app.set_filter(Filter::Active),
        KeyCode::Char('3') => app.set_filter(Filter::Completed),
        KeyCode::Char('t') => app.toggle_timer_mode(),
        KeyCode::Char('r') => app.load_sample(),
        KeyCode::Tab | KeyCode::Char('l') => app.next_tab(),
        KeyCode::Up | KeyCode::Char('k') => app.move_selection(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection(1),
        _ => {}
    }
    false
}
