//! Module and topic creation.

use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn, Instrument};

use syllabus_common_log::spans::topic_span;

use crate::error::{TreeError, TreeResult};
use crate::fs;
use crate::guard::Scope;
use crate::layout::TopicFile;
use crate::naming;
use crate::templater::TemplateContext;
use crate::workspace::Workspace;

/// A module that was just created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedModule {
    pub key: String,
    pub dir_name: String,
    pub ordinal: usize,
}

/// A topic that was just created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedTopic {
    pub module_dir: PathBuf,
    pub topic_dir: PathBuf,
    pub ordinal: usize,
    pub files: Vec<PathBuf>,
}

/// Result of a single topic creation.
///
/// Failure carries the reason. Directories created before the failure stay
/// on disk; an adherence pass completes them.
#[derive(Debug)]
pub enum TopicOutcome {
    Created(CreatedTopic),
    Failed { topic: String, error: TreeError },
}

impl TopicOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, TopicOutcome::Created(_))
    }
}

impl fmt::Display for TopicOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TopicOutcome::Created(topic) => write!(f, "created {}", topic.topic_dir.display()),
            TopicOutcome::Failed { topic, error } => write!(f, "failed to create {topic}: {error}"),
        }
    }
}

fn require_name(kind: &str, name: &str) -> TreeResult<()> {
    if name.trim().is_empty() {
        return Err(TreeError::invalid_input(format!("{kind} name is empty")));
    }
    Ok(())
}

impl Workspace {
    /// Create a module after the last existing one.
    ///
    /// Fails with [`TreeError::AlreadyExists`] if a module with the same
    /// canonical name is indexed; nothing is changed in that case.
    pub async fn create_module(&mut self, name: &str) -> TreeResult<CreatedModule> {
        require_name("module", name)?;
        let key = self.naming().canonical_key(name);
        if self.index.contains(&key) {
            return Err(TreeError::AlreadyExists { module: key });
        }

        let ordinal = self.index.module_count() + 1;
        let dir_name = naming::numbered_name(ordinal, &key);
        let modules_dir = self.modules_dir();
        self.fs().create_directory(&modules_dir.join(&dir_name)).await?;

        let inserted = self
            .index
            .insert(self.fs.as_ref(), &modules_dir, &dir_name, &self.naming)
            .await?;
        debug!(key = %key, inserted, "module indexed");

        info!(module = %dir_name, "module created");
        Ok(CreatedModule {
            key,
            dir_name,
            ordinal,
        })
    }

    /// Create a topic at the end of a module, creating the module if needed,
    /// and write its content files and quiz.
    ///
    /// Never fails as a whole: errors become [`TopicOutcome::Failed`] and
    /// nothing created so far is removed.
    pub async fn create_topic(&mut self, module: &str, topic: &str) -> TopicOutcome {
        let span = topic_span(module, topic);
        match self.try_create_topic(module, topic).instrument(span).await {
            Ok(created) => TopicOutcome::Created(created),
            Err(error) => {
                warn!(module, topic, error = %error, "topic creation failed");
                TopicOutcome::Failed {
                    topic: topic.to_string(),
                    error,
                }
            }
        }
    }

    async fn try_create_topic(&mut self, module: &str, topic: &str) -> TreeResult<CreatedTopic> {
        require_name("module", module)?;
        require_name("topic", topic)?;
        let module_name = self.naming().human_title(&naming::strip_number_prefix(module));
        let topic_name = self.naming().human_title(&naming::strip_number_prefix(topic));

        match self.create_module(&module_name).await {
            Ok(_) | Err(TreeError::AlreadyExists { .. }) => {}
            Err(e) => return Err(e),
        }

        let key = self.naming().canonical_key(&module_name);
        let ordinal = self
            .index
            .lookup_ordinal(&key)
            .ok_or_else(|| TreeError::ModuleNotIndexed {
                module: key.clone(),
            })?;
        let module_dir = self.place_module(&key, ordinal).await?;

        let topics = fs::numbered_dirs(self.fs(), &module_dir).await?;
        let topic_ordinal = topics.len() + 1;
        let topic_dir_name =
            naming::numbered_name(topic_ordinal, &self.naming().canonical_key(&topic_name));
        if topics.contains(&topic_dir_name) {
            return Err(TreeError::invalid_input(format!(
                "topic directory {topic_dir_name} already exists"
            )));
        }
        self.index.set_topic_count(&key, topic_ordinal);

        let topic_dir = module_dir.join(&topic_dir_name);
        self.fs().create_directory(&topic_dir).await?;

        let context = TemplateContext::new(module_name, topic_name);
        let files = self.populate_topic(&topic_dir, &context).await?;

        info!(topic = %topic_dir.display(), "topic created");
        Ok(CreatedTopic {
            module_dir,
            topic_dir,
            ordinal: topic_ordinal,
            files,
        })
    }

    /// Give the module its canonical numbered name, creating the directory if
    /// it has disappeared. Returns the module path.
    async fn place_module(&mut self, key: &str, ordinal: usize) -> TreeResult<PathBuf> {
        let wanted = naming::numbered_name(ordinal, key);
        let wanted_path = self.module_path(&wanted);

        match self.find_module_dir(key).await? {
            Some(current) if current == wanted => {}
            Some(current) => {
                let _lease = self.acquire(Scope::Module)?;
                debug!(from = %current, to = %wanted, "renaming module to its canonical name");
                self.fs()
                    .rename(&self.module_path(&current), &wanted_path)
                    .await?;
            }
            None => {
                warn!(module = %wanted, "indexed module missing on disk, recreating");
                self.fs().create_directory(&wanted_path).await?;
            }
        }
        Ok(wanted_path)
    }

    /// Write the five content files and the quiz into `topic_dir`.
    pub async fn populate_topic(
        &self,
        topic_dir: &Path,
        context: &TemplateContext,
    ) -> TreeResult<Vec<PathBuf>> {
        let mut written = Vec::new();
        for file in TopicFile::scaffolded() {
            let path = self
                .templater()
                .write(self.fs(), topic_dir, file, context)
                .await?;
            written.push(path);
        }
        Ok(written)
    }
}
