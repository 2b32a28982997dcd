/*
[INPUT]:  Terminal prompts via dialoguer
[OUTPUT]: Config wizard and menu-driven editor
[POS]:    CLI module for todo-timer binary
[UPDATE]: When adding CLI flows
*/

pub mod init;
pub mod interactive;
