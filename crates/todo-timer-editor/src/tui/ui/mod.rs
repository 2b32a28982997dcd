/*
[INPUT]:  TuiApp state and store snapshots for UI components
[OUTPUT]: UI component render functions and module exports
[POS]:    TUI UI module root
[UPDATE]: 2026-10-10 Replace dashboard panels with entry, toolbar, list and confirm views
*/

mod confirm;
mod entry;
mod layout;
mod logs;
mod todo_list;
mod toolbar;

pub(in crate::tui) use confirm::draw_confirm;
pub(in crate::tui) use entry::draw_entry;
pub(in crate::tui) use layout::{centered_rect, draw_tabs};
pub(in crate::tui) use logs::draw_logs;
pub(in crate::tui) use todo_list::draw_todo_list;
pub(in crate::tui) use toolbar::draw_toolbar;
