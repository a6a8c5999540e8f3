//! Error types for tree operations.

use std::path::PathBuf;
use thiserror::Error;

use crate::guard::Scope;

/// Errors raised by the workspace file system.
#[derive(Debug, Error)]
pub enum FsError {
    /// The entry does not exist. Kept apart from other IO failures because an
    /// absent content file and an empty one drive different repairs.
    #[error("not found: {path}")]
    NotFound { path: PathBuf },

    #[error("already exists: {path}")]
    AlreadyExists { path: PathBuf },

    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FsError {
    /// Classify an IO error raised while touching `path`.
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound { path },
            std::io::ErrorKind::AlreadyExists => FsError::AlreadyExists { path },
            _ => FsError::Io { path, source },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FsError::NotFound { .. })
    }
}

/// Result alias for file system operations.
pub type FsResult<T> = Result<T, FsError>;

/// Errors for module/topic operations.
#[derive(Debug, Error)]
pub enum TreeError {
    /// A module with the same canonical name is already indexed.
    #[error("module already exists: {module}")]
    AlreadyExists { module: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("operation cancelled")]
    Cancelled,

    #[error("module is not indexed: {module}")]
    ModuleNotIndexed { module: String },

    #[error("{0} renumbering is already in progress")]
    ScopeBusy(Scope),

    #[error("prompt failed: {0}")]
    Prompt(String),

    #[error(transparent)]
    Fs(#[from] FsError),

    #[error("watcher error: {0}")]
    Watch(#[from] notify::Error),

    #[error("template error: {0}")]
    Template(#[from] regex::Error),
}

impl TreeError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

/// Result alias for tree operations.
pub type TreeResult<T> = Result<T, TreeError>;
