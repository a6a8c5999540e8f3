//! Rendering of topic files from configured templates.

use regex::{Captures, Regex};
use std::path::{Path, PathBuf};

use syllabus_common_config::types::{PreambleConfig, SyllabusConfig, TemplateSet};

use crate::error::TreeResult;
use crate::fs::WorkspaceFs;
use crate::layout::{Role, TopicFile};

/// Text substituted for a content file that does not exist.
pub const MISSING_CONTENT: &str = "None.";

/// Names and sibling content for one scaffold or repair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateContext {
    pub module_name: String,
    pub topic_name: String,
    /// Current content of the five content files, `None` when absent.
    pub contents: [Option<String>; 5],
}

impl TemplateContext {
    pub fn new(module_name: impl Into<String>, topic_name: impl Into<String>) -> Self {
        Self {
            module_name: module_name.into(),
            topic_name: topic_name.into(),
            contents: Default::default(),
        }
    }

    pub fn with_contents(mut self, contents: [Option<String>; 5]) -> Self {
        self.contents = contents;
        self
    }

    pub fn content(&self, role: Role) -> Option<&str> {
        self.contents[role.index()].as_deref()
    }
}

/// Content of one file as it appears inside the cumulative file.
///
/// Without `preserve_heading` the first line is treated as the file's heading
/// and dropped; a file with no newline is all heading.
pub fn aggregate_content(content: Option<&str>, preserve_heading: bool) -> String {
    let Some(content) = content else {
        return MISSING_CONTENT.to_string();
    };
    if preserve_heading {
        return content.trim().to_string();
    }
    match content.split_once('\n') {
        Some((_, body)) => body.trim().to_string(),
        None => String::new(),
    }
}

/// Renders `{!token}` placeholders.
#[derive(Debug, Clone)]
pub struct Templater {
    placeholder: Regex,
    templates: TemplateSet,
    preambles: PreambleConfig,
    preserve_headings: bool,
}

impl Templater {
    pub fn new(config: &SyllabusConfig) -> TreeResult<Self> {
        Ok(Self {
            placeholder: Regex::new(r"\{!(\w+)\}")?,
            templates: config.templates.clone(),
            preambles: config.preambles.clone(),
            preserve_headings: config.style.preserve_headings,
        })
    }

    /// Render the template for `file`.
    ///
    /// Placeholders are substituted in a single pass, so inserted text is never
    /// expanded again. Unknown placeholders are left as written, and content
    /// placeholders are only filled in the cumulative file.
    pub fn render(&self, file: TopicFile, context: &TemplateContext) -> String {
        let template = file.template(&self.templates);
        self.placeholder
            .replace_all(template, |caps: &Captures<'_>| {
                match self.value(file, &caps[1], context) {
                    Some(value) => value,
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }

    fn value(&self, file: TopicFile, token: &str, context: &TemplateContext) -> Option<String> {
        match token {
            "prerequisitesPreamble" => Some(self.preambles.prerequisites.clone()),
            "objectivesPreamble" => Some(self.preambles.objectives.clone()),
            "topicName" => Some(context.topic_name.clone()),
            "moduleName" => Some(context.module_name.clone()),
            _ if file == TopicFile::Cumulative => Role::ALL
                .into_iter()
                .find(|role| role.content_token() == token)
                .map(|role| aggregate_content(context.content(role), self.preserve_headings)),
            _ => None,
        }
    }

    /// Render `file` and write it into `topic_dir`, replacing any existing file.
    pub async fn write(
        &self,
        fs: &dyn WorkspaceFs,
        topic_dir: &Path,
        file: TopicFile,
        context: &TemplateContext,
    ) -> TreeResult<PathBuf> {
        let path = topic_dir.join(file.file_name());
        let rendered = self.render(file, context);
        fs.write_file(&path, rendered.as_bytes()).await?;
        Ok(path)
    }
}
