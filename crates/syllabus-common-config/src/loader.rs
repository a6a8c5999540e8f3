//! Configuration file loading and parsing.

use crate::types::SyllabusConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directory holding the project configuration, relative to the workspace root.
pub const CONFIG_DIR: &str = ".syllabus";
/// Configuration file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.yaml";

/// Config loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read config: {source}")]
    ReadError {
        #[from]
        source: std::io::Error,
    },

    #[error("invalid YAML at line {}: {message}", line.map(|l| l.to_string()).unwrap_or_else(|| "unknown".to_string()))]
    ParseError { line: Option<usize>, message: String },

    #[error("validation error: {message}")]
    ValidationError { message: String },

    #[error("environment variable not found: {var}")]
    EnvVarNotFound { var: String },
}

/// Configuration loader.
pub struct ConfigLoader {
    base_path: PathBuf,
}

impl ConfigLoader {
    /// Create a loader for the given workspace root.
    pub fn new(workspace_root: impl AsRef<Path>) -> Self {
        Self {
            base_path: workspace_root.as_ref().to_path_buf(),
        }
    }

    /// Path of the project configuration file.
    pub fn config_path(&self) -> PathBuf {
        self.base_path.join(CONFIG_DIR).join(CONFIG_FILE)
    }

    /// Load configuration from `.syllabus/config.yaml`, falling back to defaults.
    pub fn load(&self) -> Result<SyllabusConfig, ConfigError> {
        let config_path = self.config_path();

        if !config_path.exists() {
            return Ok(SyllabusConfig::default());
        }

        self.load_file(&config_path)
    }

    /// Load configuration from an explicit file, which must exist.
    pub fn load_file(&self, path: &Path) -> Result<SyllabusConfig, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let contents = std::fs::read_to_string(path)?;
        self.parse(&contents)
    }

    /// Parse configuration text, expanding environment variables first.
    pub fn parse(&self, contents: &str) -> Result<SyllabusConfig, ConfigError> {
        let expanded = self.expand_env_vars(contents)?;

        let config: SyllabusConfig =
            serde_yaml::from_str(&expanded).map_err(|e| ConfigError::ParseError {
                line: e.location().map(|l| l.line()),
                message: e.to_string(),
            })?;

        self.validate(&config)?;
        Ok(config)
    }

    /// Expand environment variables in the form `${VAR}` or `${VAR:-default}`.
    fn expand_env_vars(&self, content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();
        let re = regex::Regex::new(r"\$\{([^}:]+)(?::-([^}]*))?\}").map_err(|e| {
            ConfigError::ValidationError {
                message: e.to_string(),
            }
        })?;

        for cap in re.captures_iter(content) {
            let Some(full_match) = cap.get(0).map(|m| m.as_str()) else {
                continue;
            };
            let var_name = &cap[1];
            let default = cap.get(2).map(|m| m.as_str());

            let value = match std::env::var(var_name) {
                Ok(v) => v,
                Err(_) => match default {
                    Some(d) => d.to_string(),
                    None => {
                        return Err(ConfigError::EnvVarNotFound {
                            var: var_name.to_string(),
                        })
                    }
                },
            };

            result = result.replace(full_match, &value);
        }

        Ok(result)
    }

    /// Validate configuration values.
    fn validate(&self, config: &SyllabusConfig) -> Result<(), ConfigError> {
        if let Some(word) = config
            .style
            .lowercase_words
            .iter()
            .find(|w| w.is_empty() || w.chars().any(char::is_whitespace))
        {
            return Err(ConfigError::ValidationError {
                message: format!("style.lowercase_words must hold single words, got {word:?}"),
            });
        }

        if config.watch.channel_capacity == 0 {
            return Err(ConfigError::ValidationError {
                message: "watch.channel_capacity must be greater than 0".to_string(),
            });
        }

        if config.watch.settle_ms > 10_000 {
            return Err(ConfigError::ValidationError {
                message: "watch.settle_ms must be at most 10000".to_string(),
            });
        }

        Ok(())
    }

    /// Save configuration to `.syllabus/config.yaml`.
    pub fn save(&self, config: &SyllabusConfig) -> Result<PathBuf, ConfigError> {
        let config_dir = self.base_path.join(CONFIG_DIR);
        std::fs::create_dir_all(&config_dir)?;

        let config_path = config_dir.join(CONFIG_FILE);
        let yaml = serde_yaml::to_string(config).map_err(|e| ConfigError::ParseError {
            line: None,
            message: e.to_string(),
        })?;

        std::fs::write(&config_path, yaml)?;
        Ok(config_path)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new(std::env::current_dir().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_config(root: &Path, contents: &str) {
        let dir = root.join(CONFIG_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(CONFIG_FILE), contents).unwrap();
    }

    #[test]
    fn test_load_defaults_when_no_file() {
        let dir = tempdir().unwrap();
        let config = ConfigLoader::new(dir.path()).load().unwrap();
        assert_eq!(config, SyllabusConfig::default());
    }

    #[test]
    fn test_load_config_from_yaml_file() {
        let dir = tempdir().unwrap();
        write_config(
            dir.path(),
            r##"
preambles:
  prerequisites: "You need:"
templates:
  "002": "# {!topicName}\n"
  quiz: "::Q1:: {!topicName}"
style:
  lowercase_words: [of, the]
  preserve_headings: true
"##,
        );

        let config = ConfigLoader::new(dir.path()).load().unwrap();

        assert_eq!(config.preambles.prerequisites, "You need:");
        assert_eq!(config.templates.description, "# {!topicName}\n");
        assert_eq!(config.templates.quiz, "::Q1:: {!topicName}");
        assert_eq!(config.style.lowercase_words, vec!["of", "the"]);
        assert!(config.style.preserve_headings);

        // Unspecified values keep their defaults
        let defaults = SyllabusConfig::default();
        assert_eq!(config.preambles.objectives, defaults.preambles.objectives);
        assert_eq!(config.templates.summary, defaults.templates.summary);
        assert_eq!(config.watch, defaults.watch);
    }

    #[test]
    fn test_env_var_expansion() {
        std::env::set_var("SYLLABUS_TEST_PREAMBLE", "from env");
        let loader = ConfigLoader::new(".");
        let result = loader
            .expand_env_vars("prerequisites: ${SYLLABUS_TEST_PREAMBLE}")
            .unwrap();
        assert_eq!(result, "prerequisites: from env");
        std::env::remove_var("SYLLABUS_TEST_PREAMBLE");
    }

    #[test]
    fn test_env_var_default() {
        let loader = ConfigLoader::new(".");
        let result = loader
            .expand_env_vars("settle_ms: ${SYLLABUS_TEST_UNSET_SETTLE:-25}")
            .unwrap();
        assert_eq!(result, "settle_ms: 25");
    }

    #[test]
    fn test_env_var_missing_error() {
        let loader = ConfigLoader::new(".");
        match loader.expand_env_vars("key: ${SYLLABUS_TEST_MISSING_VAR}") {
            Err(ConfigError::EnvVarNotFound { var }) => {
                assert_eq!(var, "SYLLABUS_TEST_MISSING_VAR")
            }
            other => panic!("Expected EnvVarNotFound error, got {other:?}"),
        }
    }

    #[test]
    fn test_validation_rejects_multi_word_entries() {
        let loader = ConfigLoader::new(".");
        let mut config = SyllabusConfig::default();
        config.style.lowercase_words.push("of the".to_string());

        match loader.validate(&config) {
            Err(ConfigError::ValidationError { message }) => {
                assert!(message.contains("lowercase_words"))
            }
            other => panic!("Expected ValidationError, got {other:?}"),
        }
    }

    #[test]
    fn test_validation_rejects_bad_watch_values() {
        let loader = ConfigLoader::new(".");

        let mut config = SyllabusConfig::default();
        config.watch.channel_capacity = 0;
        assert!(matches!(
            loader.validate(&config),
            Err(ConfigError::ValidationError { .. })
        ));

        let mut config = SyllabusConfig::default();
        config.watch.settle_ms = 60_000;
        assert!(matches!(
            loader.validate(&config),
            Err(ConfigError::ValidationError { .. })
        ));
    }

    #[test]
    fn test_parse_error_with_line_number() {
        let dir = tempdir().unwrap();
        write_config(
            dir.path(),
            r#"
style:
  lowercase_words: [unclosed
"#,
        );

        match ConfigLoader::new(dir.path()).load() {
            Err(ConfigError::ParseError { line, .. }) => assert!(line.is_some()),
            other => panic!("Expected ParseError with line number, got {other:?}"),
        }
    }

    #[test]
    fn test_explicit_file_must_exist() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.yaml");
        assert!(matches!(
            ConfigLoader::new(dir.path()).load_file(&missing),
            Err(ConfigError::NotFound { .. })
        ));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let loader = ConfigLoader::new(dir.path());

        let mut config = SyllabusConfig::default();
        config.preambles.objectives = "You will:".to_string();
        config.style.preserve_headings = true;

        let path = loader.save(&config).unwrap();
        assert_eq!(path, dir.path().join(".syllabus/config.yaml"));

        assert_eq!(loader.load().unwrap(), config);
    }
}
