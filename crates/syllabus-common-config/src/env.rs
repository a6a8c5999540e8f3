//! Environment variable handling.

use std::env;
use thiserror::Error;

/// Environment variable errors.
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },
}

/// Environment variable names.
pub mod vars {
    /// Explicit configuration file.
    pub const SYLLABUS_CONFIG: &str = "SYLLABUS_CONFIG";
    /// Workspace root holding the `modules` directory.
    pub const SYLLABUS_ROOT: &str = "SYLLABUS_ROOT";
    /// Override for `style.preserve_headings`.
    pub const SYLLABUS_PRESERVE_HEADINGS: &str = "SYLLABUS_PRESERVE_HEADINGS";
}

/// Environment configuration.
pub struct Environment {
    _guard: (),
}

impl Environment {
    /// Load `.env` then `.env.local` from the current directory, if present.
    pub fn init() -> Self {
        let _ = dotenvy::from_filename(".env");
        let _ = dotenvy::from_filename(".env.local");
        Self { _guard: () }
    }

    /// Get an optional string variable.
    pub fn get(var: &str) -> Option<String> {
        env::var(var).ok().filter(|v| !v.is_empty())
    }

    /// Get a boolean variable.
    pub fn get_bool(var: &str) -> Result<Option<bool>, EnvError> {
        match Self::get(var) {
            None => Ok(None),
            Some(v) => match v.to_lowercase().as_str() {
                "true" | "1" | "yes" => Ok(Some(true)),
                "false" | "0" | "no" => Ok(Some(false)),
                _ => Err(EnvError::InvalidValue {
                    var: var.to_string(),
                    message: format!("expected a boolean, got {v:?}"),
                }),
            },
        }
    }

    /// Apply environment overrides on top of a loaded configuration.
    pub fn apply_overrides(config: &mut crate::SyllabusConfig) -> Result<(), EnvError> {
        if let Some(preserve) = Self::get_bool(vars::SYLLABUS_PRESERVE_HEADINGS)? {
            config.style.preserve_headings = preserve;
        }
        Ok(())
    }
}
