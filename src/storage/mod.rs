//! Storage layer for sealed-keys
//!
//! Atomic file output for generated lookup modules and settings.

pub mod file_io;

pub use file_io::{read_json_required, write_json_atomic, write_text_atomic};
