/*
[INPUT]:  HTTP client configuration and sample-data endpoint
[OUTPUT]: HTTP responses and typed raw todo records
[POS]:    HTTP layer - REST communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod client;
pub mod error;
pub mod todos;

pub use error::{Result, TodoError};

pub use client::{ClientConfig, TodoClient};
pub use todos::DEFAULT_SAMPLE_PATH;
