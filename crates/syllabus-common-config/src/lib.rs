//! Configuration types for syllabus.
//!
//! This crate provides the configuration read from `.syllabus/config.yaml`:
//! preamble strings, per-role templates, the title-casing word list and
//! watcher tuning.

pub mod env;
pub mod loader;
pub mod types;

pub use env::*;
pub use loader::*;
pub use types::*;
