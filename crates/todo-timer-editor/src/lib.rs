/*
[INPUT]:  Public API exports for todo-timer-editor crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod action;
pub mod config;
pub mod coordinator;
pub mod countdown;
pub mod draft;
pub mod fetch;
pub mod model;
pub mod prompt;
pub mod session;
pub mod store;

// Re-export main types for convenience
pub use action::Action;
pub use config::EditorConfig;
pub use coordinator::{CoordinatorPhase, TimerCoordinator};
pub use session::EditorSession;
pub use store::{AppState, Store};
