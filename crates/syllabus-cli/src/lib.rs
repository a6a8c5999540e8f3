//! Syllabus CLI library
//!
//! Argument parsing, commands, output formatting and terminal prompts for the
//! `syllabus` binary.

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;
pub mod prompts;

pub use error::CliError;
