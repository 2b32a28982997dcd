/*
[INPUT]:  Remote payload definitions and serde requirements
[OUTPUT]: Typed Rust structs with serialization support
[POS]:    Data layer - type definitions for remote communication
[UPDATE]: When the payload schema changes or new types added
*/

pub mod models;

pub use models::*;
