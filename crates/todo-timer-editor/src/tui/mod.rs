/*
[INPUT]:  Editor store, prompt requests, and log buffer
[OUTPUT]: Ratatui-based TUI for editing todos under timer mode
[POS]:    TUI module for todo-timer binary
[UPDATE]: When changing TUI layout, keybindings, or runtime controls
*/

mod app;
mod events;
mod runtime;
mod terminal;
mod ui;

pub use runtime::{LogBuffer, LogBufferHandle, LogWriterFactory, run_tui};
pub(crate) use runtime::LOG_BUFFER_CAPACITY;
