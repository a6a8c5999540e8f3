//! Logging infrastructure for syllabus.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Minimum log level.
    pub level: LogLevel,
    /// Output format.
    pub format: LogFormat,
    /// Log file path (if file logging enabled).
    pub file_path: Option<PathBuf>,
    /// Include source location.
    pub source_location: bool,
    /// Include span events.
    pub span_events: bool,
}

/// Log level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for tracing_subscriber::filter::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing_subscriber::filter::LevelFilter::TRACE,
            LogLevel::Debug => tracing_subscriber::filter::LevelFilter::DEBUG,
            LogLevel::Info => tracing_subscriber::filter::LevelFilter::INFO,
            LogLevel::Warn => tracing_subscriber::filter::LevelFilter::WARN,
            LogLevel::Error => tracing_subscriber::filter::LevelFilter::ERROR,
        }
    }
}

impl LogLevel {
    /// Parse from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Some(Self::Trace),
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    /// Directive string understood by `EnvFilter`.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    /// Level selected by the CLI's `-v`/`-q` flags.
    pub fn from_verbosity(verbose: u8, quiet: bool) -> Self {
        match verbose {
            0 if quiet => LogLevel::Error,
            0 => LogLevel::Warn,
            1 => LogLevel::Info,
            2 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable pretty format.
    #[default]
    Pretty,
    /// Compact single-line format.
    Compact,
    /// JSON structured format.
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            format: LogFormat::default(),
            file_path: None,
            source_location: false,
            span_events: false,
        }
    }
}

/// Environment variables read by [`LogConfig::from_env`].
pub mod vars {
    pub const LOG_LEVEL: &str = "SYLLABUS_LOG_LEVEL";
    pub const LOG_FORMAT: &str = "SYLLABUS_LOG_FORMAT";
    pub const LOG_FILE: &str = "SYLLABUS_LOG_FILE";
    pub const LOG_SOURCE: &str = "SYLLABUS_LOG_SOURCE";
    pub const LOG_SPANS: &str = "SYLLABUS_LOG_SPANS";
    pub const RUST_LOG: &str = "RUST_LOG";
}

impl LogConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Create config from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        let level = lookup(vars::LOG_LEVEL).or_else(|| lookup(vars::RUST_LOG));
        if let Some(l) = level.as_deref().and_then(LogLevel::parse) {
            config.level = l;
        }

        if let Some(format) = lookup(vars::LOG_FORMAT) {
            config.format = match format.to_lowercase().as_str() {
                "json" => LogFormat::Json,
                "compact" => LogFormat::Compact,
                _ => LogFormat::Pretty,
            };
        }

        if let Some(file_path) = lookup(vars::LOG_FILE) {
            config.file_path = Some(PathBuf::from(file_path));
        }

        if let Some(source_location) = lookup(vars::LOG_SOURCE) {
            config.source_location = is_truthy(&source_location);
        }

        if let Some(span_events) = lookup(vars::LOG_SPANS) {
            config.span_events = is_truthy(&span_events);
        }

        config
    }

    /// Override the level, keeping everything else.
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }
}

fn is_truthy(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value == "1"
}

fn open_log_file(path: &Path) -> Result<Mutex<std::fs::File>, LogError> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    Ok(Mutex::new(file))
}

/// Initialize logging with the given configuration.
///
/// `RUST_LOG` style directives in the environment take precedence over
/// `config.level`. Output always goes to stderr; when `file_path` is set the
/// same events are appended to that file without ANSI colors.
pub fn init(config: LogConfig) -> Result<(), LogError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));

    let span_events = || {
        if config.span_events {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    };

    let file = match &config.file_path {
        Some(path) => Some(open_log_file(path)?),
        None => None,
    };

    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.format {
        LogFormat::Pretty => {
            let stderr_layer = fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(true)
                .with_target(true)
                .with_file(config.source_location)
                .with_line_number(config.source_location)
                .with_span_events(span_events());

            let file_layer = file.map(|file| {
                fmt::layer()
                    .with_writer(file)
                    .with_ansi(false)
                    .with_target(true)
                    .with_file(config.source_location)
                    .with_line_number(config.source_location)
                    .with_span_events(span_events())
            });

            registry.with(stderr_layer).with(file_layer).try_init()
        }
        LogFormat::Compact => {
            let stderr_layer = fmt::layer()
                .compact()
                .with_writer(io::stderr)
                .with_ansi(true)
                .with_span_events(span_events());

            let file_layer = file.map(|file| {
                fmt::layer()
                    .compact()
                    .with_writer(file)
                    .with_ansi(false)
                    .with_span_events(span_events())
            });

            registry.with(stderr_layer).with(file_layer).try_init()
        }
        LogFormat::Json => {
            let stderr_layer = fmt::layer()
                .json()
                .with_writer(io::stderr)
                .with_span_events(span_events());

            let file_layer = file.map(|file| {
                fmt::layer()
                    .json()
                    .with_writer(file)
                    .with_span_events(span_events())
            });

            registry.with(stderr_layer).with(file_layer).try_init()
        }
    };

    result.map_err(|e| LogError::InitError(e.to_string()))
}

/// Logging errors.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("failed to initialize logging: {0}")]
    InitError(String),

    #[error("failed to open log file: {0}")]
    FileError(#[from] io::Error),
}

/// Convenience macros re-exported from tracing.
pub use tracing::{debug, error, info, trace, warn};

/// Span helpers for tree operations.
pub mod spans;
