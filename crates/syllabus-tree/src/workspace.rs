//! Workspace session state.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use syllabus_common_config::SyllabusConfig;

use crate::error::{TreeError, TreeResult};
use crate::fs::{self, LocalFs, WorkspaceFs};
use crate::guard::{Scope, ScopeGuards, ScopeLease};
use crate::index::ModuleIndex;
use crate::layout::MODULES_DIR;
use crate::naming::NameNormalizer;
use crate::renumber::{RenumberEngine, RenumberReport};
use crate::templater::Templater;

/// One open content tree.
///
/// Owns the module index and the busy guards for the lifetime of the session.
/// Scaffolding, repair and the change reactor all operate on a workspace.
pub struct Workspace {
    root: PathBuf,
    pub(crate) fs: Arc<dyn WorkspaceFs>,
    config: SyllabusConfig,
    pub(crate) naming: NameNormalizer,
    templater: Templater,
    pub(crate) index: ModuleIndex,
    guards: ScopeGuards,
}

impl std::fmt::Debug for Workspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workspace")
            .field("root", &self.root)
            .field("index", &self.index)
            .field("guards", &self.guards)
            .finish_non_exhaustive()
    }
}

impl Workspace {
    /// Open a workspace, creating `modules/` if needed and building the index.
    pub async fn open(
        root: impl Into<PathBuf>,
        fs: Arc<dyn WorkspaceFs>,
        config: SyllabusConfig,
    ) -> TreeResult<Self> {
        let root = root.into();
        let naming = NameNormalizer::new(&config.style.lowercase_words);
        let templater = Templater::new(&config)?;

        let mut workspace = Self {
            root,
            fs,
            config,
            naming,
            templater,
            index: ModuleIndex::new(),
            guards: ScopeGuards::new(),
        };

        workspace
            .fs
            .create_directory(&workspace.modules_dir())
            .await?;
        workspace.rebuild_index().await?;

        info!(
            root = %workspace.root.display(),
            modules = workspace.index.module_count(),
            "workspace opened"
        );
        Ok(workspace)
    }

    /// Open a workspace on the local disk.
    pub async fn open_local(root: impl Into<PathBuf>, config: SyllabusConfig) -> TreeResult<Self> {
        Self::open(root, Arc::new(LocalFs::new()), config).await
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn modules_dir(&self) -> PathBuf {
        self.root.join(MODULES_DIR)
    }

    pub fn module_path(&self, dir_name: &str) -> PathBuf {
        self.modules_dir().join(dir_name)
    }

    pub fn fs(&self) -> &dyn WorkspaceFs {
        self.fs.as_ref()
    }

    pub fn config(&self) -> &SyllabusConfig {
        &self.config
    }

    pub fn naming(&self) -> &NameNormalizer {
        &self.naming
    }

    pub fn templater(&self) -> &Templater {
        &self.templater
    }

    pub fn index(&self) -> &ModuleIndex {
        &self.index
    }

    pub fn guards(&self) -> &ScopeGuards {
        &self.guards
    }

    /// Take the busy guard for `scope`.
    pub fn acquire(&self, scope: Scope) -> TreeResult<ScopeLease> {
        self.guards
            .acquire(scope)
            .ok_or(TreeError::ScopeBusy(scope))
    }

    /// Rebuild the module index from disk.
    pub async fn rebuild_index(&mut self) -> TreeResult<()> {
        let modules_dir = self.modules_dir();
        self.index
            .rebuild(self.fs.as_ref(), &modules_dir, &self.naming)
            .await
    }

    /// Human-readable module names in ordinal order.
    pub fn module_names(&self) -> Vec<String> {
        self.index
            .iter()
            .map(|(key, _)| self.naming.display_name(key))
            .collect()
    }

    /// Current directory name of the module with canonical key `key`.
    pub async fn find_module_dir(&self, key: &str) -> TreeResult<Option<String>> {
        let names = fs::numbered_dirs(self.fs.as_ref(), &self.modules_dir()).await?;
        Ok(names
            .into_iter()
            .find(|name| self.naming.canonical_key(name) == key))
    }

    /// Numbered module directory names in ordinal order.
    pub async fn module_dirs(&self) -> TreeResult<Vec<String>> {
        Ok(fs::numbered_dirs(self.fs.as_ref(), &self.modules_dir()).await?)
    }

    /// Numbered topic directory names of a module, in ordinal order.
    pub async fn topic_dirs(&self, module_dir: &str) -> TreeResult<Vec<String>> {
        Ok(fs::numbered_dirs(self.fs.as_ref(), &self.module_path(module_dir)).await?)
    }

    /// Renumber all modules and rebuild the index.
    pub async fn renumber_modules(&mut self) -> TreeResult<RenumberReport> {
        let _lease = self.acquire(Scope::Module)?;
        self.renumber_modules_held().await
    }

    /// Renumber the topics of one module.
    pub async fn renumber_topics(&mut self, module_path: &Path) -> TreeResult<RenumberReport> {
        let _lease = self.acquire(Scope::Topic)?;
        self.renumber_topics_held(module_path).await
    }

    /// Module pass for callers already holding the module lease.
    pub(crate) async fn renumber_modules_held(&mut self) -> TreeResult<RenumberReport> {
        let modules_dir = self.modules_dir();
        let report = RenumberEngine::new(self.fs.as_ref(), &self.naming)
            .renumber(Scope::Module, &modules_dir)
            .await?;
        self.rebuild_index().await?;
        debug!(modules = self.index.module_count(), "index rebuilt after module pass");
        Ok(report)
    }

    /// Topic pass for callers already holding the topic lease.
    pub(crate) async fn renumber_topics_held(
        &mut self,
        module_path: &Path,
    ) -> TreeResult<RenumberReport> {
        RenumberEngine::new(self.fs.as_ref(), &self.naming)
            .renumber(Scope::Topic, module_path)
            .await
    }
}
