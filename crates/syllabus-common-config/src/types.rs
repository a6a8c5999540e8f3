//! Configuration types.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyllabusConfig {
    /// Preamble strings substituted into templates.
    pub preambles: PreambleConfig,
    /// Per-role template text.
    pub templates: TemplateSet,
    /// Naming and aggregation style.
    pub style: StyleConfig,
    /// Watcher tuning.
    pub watch: WatchConfig,
}

/// Preambles for the prerequisites file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreambleConfig {
    /// Replaces `{!prerequisitesPreamble}`.
    pub prerequisites: String,
    /// Replaces `{!objectivesPreamble}`.
    pub objectives: String,
}

impl Default for PreambleConfig {
    fn default() -> Self {
        Self {
            prerequisites: "Before starting this topic you should be comfortable with:".to_string(),
            objectives: "After completing this topic you will be able to:".to_string(),
        }
    }
}

/// Template text for every generated file, keyed by role id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateSet {
    #[serde(rename = "001")]
    pub prerequisites: String,
    #[serde(rename = "002")]
    pub description: String,
    #[serde(rename = "003")]
    pub real_world_application: String,
    #[serde(rename = "004")]
    pub implementation: String,
    #[serde(rename = "005")]
    pub summary: String,
    pub quiz: String,
    pub cumulative: String,
}

impl Default for TemplateSet {
    fn default() -> Self {
        Self {
            prerequisites: "# {!topicName}: Prerequisites and Learning Objectives\n\n\
                ## Prerequisites\n\n{!prerequisitesPreamble}\n\n\
                ## Learning Objectives\n\n{!objectivesPreamble}\n"
                .to_string(),
            description: "# {!topicName}: Description\n\n".to_string(),
            real_world_application: "# {!topicName}: Real World Application\n\n".to_string(),
            implementation: "# {!topicName}: Implementation\n\n".to_string(),
            summary: "# {!topicName}: Summary\n\n".to_string(),
            quiz: "// {!moduleName}: {!topicName}\n\n".to_string(),
            cumulative: "# {!topicName}\n\n\
                ## Prerequisites and Learning Objectives\n\n{!001Content}\n\n\
                ## Description\n\n{!002Content}\n\n\
                ## Real World Application\n\n{!003Content}\n\n\
                ## Implementation\n\n{!004Content}\n\n\
                ## Summary\n\n{!005Content}\n"
                .to_string(),
        }
    }
}

/// Words kept lowercase by title-casing unless first, last or after a colon.
pub const DEFAULT_LOWERCASE_WORDS: &[&str] = &[
    "a", "an", "and", "as", "at", "but", "by", "for", "from", "if", "in", "of", "on", "or", "so",
    "to",
];

/// Naming and aggregation style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Words title-casing keeps lowercase.
    pub lowercase_words: Vec<String>,
    /// Keep each file's heading line when building the cumulative file.
    pub preserve_headings: bool,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            lowercase_words: DEFAULT_LOWERCASE_WORDS
                .iter()
                .map(|w| w.to_string())
                .collect(),
            preserve_headings: false,
        }
    }
}

/// Watcher tuning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Pause after a renumber pass before draining self-caused events (ms).
    pub settle_ms: u64,
    /// Capacity of the event channel between watcher and reactor.
    pub channel_capacity: usize,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            settle_ms: 50,
            channel_capacity: 256,
        }
    }
}
