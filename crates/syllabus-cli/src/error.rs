//! CLI error handling.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use thiserror::Error;

use syllabus_common_config::{ConfigError, EnvError};
use syllabus_tree::{FsError, TreeError};

/// CLI error type with exit codes and hints
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        hint: Option<String>,
    },

    #[error("{message}")]
    Io {
        message: String,
        #[source]
        source: io::Error,
        path: Option<PathBuf>,
    },

    #[error("{message}")]
    Validation { message: String },

    #[error("{message}")]
    NotFound {
        message: String,
        resource_type: String,
        resource_name: String,
        suggestions: Vec<String>,
    },

    #[error("{message}")]
    User {
        message: String,
        hint: Option<String>,
    },

    #[error("cancelled")]
    Cancelled,

    #[error("{0:#}")]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Get the error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config { .. } => "E001",
            Self::Io { .. } => "E002",
            Self::Validation { .. } => "E004",
            Self::NotFound { .. } => "E005",
            Self::User { .. } => "E010",
            Self::Cancelled => "E130",
            Self::Other(_) => "E999",
        }
    }

    /// Process exit status for this error
    pub fn exit_status(&self) -> u8 {
        match self {
            Self::Config { .. } => 2,
            Self::Io { .. } => 3,
            Self::Validation { .. } => 5,
            Self::NotFound { .. } => 6,
            Self::User { .. } => 1,
            Self::Cancelled => 130,
            Self::Other(_) => 1,
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }

    /// Get hint for this error if available
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::Config { hint, .. } => hint.as_deref(),
            Self::User { hint, .. } => hint.as_deref(),
            Self::NotFound { suggestions, .. } if !suggestions.is_empty() => {
                Some("existing modules:")
            }
            _ => None,
        }
    }

    /// Get suggestions for this error
    pub fn suggestions(&self) -> &[String] {
        match self {
            Self::NotFound { suggestions, .. } => suggestions,
            _ => &[],
        }
    }

    /// Create an IO error
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
            path: None,
        }
    }

    /// Create an IO error with path
    pub fn io_with_path(
        message: impl Into<String>,
        source: io::Error,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source,
            path: Some(path.into()),
        }
    }

    /// Create a not found error with suggestions
    pub fn not_found_with_suggestions(
        resource_type: impl Into<String>,
        resource_name: impl Into<String>,
        suggestions: Vec<String>,
    ) -> Self {
        let resource_type = resource_type.into();
        let resource_name = resource_name.into();
        Self::NotFound {
            message: format!("{resource_type} not found: {resource_name}"),
            resource_type,
            resource_name,
            suggestions,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a user error with hint
    pub fn user_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            source: err,
            path: None,
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Other(anyhow::Error::new(err).context("JSON serialization failed"))
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config {
            message: format!("configuration error: {err}"),
            source: Some(Box::new(err)),
            hint: Some("check .syllabus/config.yaml or the file given with --config".to_string()),
        }
    }
}

impl From<EnvError> for CliError {
    fn from(err: EnvError) -> Self {
        Self::Config {
            message: err.to_string(),
            source: Some(Box::new(err)),
            hint: None,
        }
    }
}

impl From<TreeError> for CliError {
    fn from(err: TreeError) -> Self {
        match err {
            TreeError::Cancelled => Self::Cancelled,
            TreeError::AlreadyExists { module } => Self::user_with_hint(
                format!("module already exists: {module}"),
                "use `syllabus add` to put topics into an existing module",
            ),
            TreeError::InvalidInput(message) => Self::validation(message),
            TreeError::ModuleNotIndexed { module } => {
                Self::not_found_with_suggestions("module", module, vec![])
            }
            TreeError::ScopeBusy(scope) => Self::user_with_hint(
                format!("a {scope} renumbering pass is already running"),
                "try again once it finishes",
            ),
            TreeError::Fs(FsError::NotFound { path }) => {
                Self::not_found_with_suggestions("path", path.display().to_string(), vec![])
            }
            TreeError::Fs(FsError::Io { path, source }) => Self::io_with_path(
                format!("{}: {source}", path.display()),
                source,
                path,
            ),
            other => Self::Other(anyhow::Error::new(other)),
        }
    }
}
