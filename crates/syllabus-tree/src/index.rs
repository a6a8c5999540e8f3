//! In-memory index of modules.

use indexmap::IndexMap;
use std::path::Path;
use tracing::debug;

use crate::error::TreeResult;
use crate::fs::{self, WorkspaceFs};
use crate::naming::NameNormalizer;

/// Maps each module's canonical key to its topic count.
///
/// Iteration order is ordinal order: the first key is module `001`. The module
/// count is the number of keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleIndex {
    modules: IndexMap<String, usize>,
}

impl ModuleIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the index with the numbered directories under `modules_dir`.
    pub async fn rebuild(
        &mut self,
        fs: &dyn WorkspaceFs,
        modules_dir: &Path,
        naming: &NameNormalizer,
    ) -> TreeResult<()> {
        let mut modules = IndexMap::new();
        for dir_name in fs::numbered_dirs(fs, modules_dir).await? {
            let topics = fs::count_numbered_dirs(fs, &modules_dir.join(&dir_name)).await?;
            modules.insert(naming.canonical_key(&dir_name), topics);
        }

        debug!(modules = modules.len(), "module index rebuilt");
        self.modules = modules;
        Ok(())
    }

    /// Add the module stored in `dir_name`, counting its topics.
    ///
    /// Returns `false` without touching the index when the key is present.
    pub async fn insert(
        &mut self,
        fs: &dyn WorkspaceFs,
        modules_dir: &Path,
        dir_name: &str,
        naming: &NameNormalizer,
    ) -> TreeResult<bool> {
        let key = naming.canonical_key(dir_name);
        if self.modules.contains_key(&key) {
            return Ok(false);
        }

        let topics = fs::count_numbered_dirs(fs, &modules_dir.join(dir_name)).await?;
        self.modules.insert(key, topics);
        Ok(true)
    }

    /// Remove a module by key, keeping the order of the others.
    pub fn remove(&mut self, key: &str) -> Option<usize> {
        self.modules.shift_remove(key)
    }

    /// One-based position of the module.
    pub fn lookup_ordinal(&self, key: &str) -> Option<usize> {
        self.modules.get_index_of(key).map(|i| i + 1)
    }

    pub fn topic_count(&self, key: &str) -> Option<usize> {
        self.modules.get(key).copied()
    }

    /// Record a new topic count. Unknown keys are ignored.
    pub fn set_topic_count(&mut self, key: &str, topics: usize) {
        if let Some(count) = self.modules.get_mut(key) {
            *count = topics;
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.modules.contains_key(key)
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Keys and topic counts in ordinal order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.modules.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
