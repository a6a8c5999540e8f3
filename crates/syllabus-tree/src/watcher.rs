//! File system watcher feeding the change reactor.

use notify::event::{ModifyKind, RenameMode};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::error::TreeResult;
use crate::event::{scope_of, TreeEvent};

/// Watches `modules/` recursively and forwards module and topic level
/// changes into a channel. Watching stops when this value is dropped.
pub struct TreeWatcher {
    _watcher: notify::RecommendedWatcher,
    modules_dir: PathBuf,
}

impl TreeWatcher {
    /// Start watching `modules_dir`, sending events into `sender`.
    pub fn new(modules_dir: impl Into<PathBuf>, sender: mpsc::Sender<TreeEvent>) -> TreeResult<Self> {
        let modules_dir = modules_dir.into();
        let root = modules_dir.clone();

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let event = match res {
                Ok(event) => event,
                Err(e) => {
                    warn!(error = %e, "watch error");
                    return;
                }
            };
            for tree_event in Self::classify_event(&event) {
                if scope_of(&root, tree_event.path()).is_none() {
                    continue;
                }
                debug!(kind = tree_event.kind(), path = %tree_event.path().display(), "tree event");
                if sender.blocking_send(tree_event).is_err() {
                    return;
                }
            }
        })?;

        watcher.watch(&modules_dir, RecursiveMode::Recursive)?;
        debug!(path = %modules_dir.display(), "watching");

        Ok(Self {
            _watcher: watcher,
            modules_dir,
        })
    }

    /// Watcher plus the receiving end of a fresh channel.
    pub fn channel(
        modules_dir: impl Into<PathBuf>,
        capacity: usize,
    ) -> TreeResult<(Self, mpsc::Receiver<TreeEvent>)> {
        let (tx, rx) = mpsc::channel(capacity);
        Ok((Self::new(modules_dir, tx)?, rx))
    }

    pub fn modules_dir(&self) -> &Path {
        &self.modules_dir
    }

    /// Translate a notify event. Renames become a deletion of the old name and
    /// a creation of the new one; access and metadata events are dropped.
    pub fn classify_event(event: &Event) -> Vec<TreeEvent> {
        let paths = event.paths.iter().cloned();
        match &event.kind {
            EventKind::Create(_) => paths.map(TreeEvent::Created).collect(),
            EventKind::Remove(_) => paths.map(TreeEvent::Deleted).collect(),
            EventKind::Modify(ModifyKind::Name(RenameMode::From)) => {
                paths.map(TreeEvent::Deleted).collect()
            }
            EventKind::Modify(ModifyKind::Name(RenameMode::To)) => {
                paths.map(TreeEvent::Created).collect()
            }
            EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => match event.paths.as_slice() {
                [from, to] => vec![
                    TreeEvent::Deleted(from.clone()),
                    TreeEvent::Created(to.clone()),
                ],
                _ => paths.map(TreeEvent::Changed).collect(),
            },
            EventKind::Modify(ModifyKind::Name(_)) => paths
                .map(|path| {
                    if path.exists() {
                        TreeEvent::Created(path)
                    } else {
                        TreeEvent::Deleted(path)
                    }
                })
                .collect(),
            EventKind::Modify(ModifyKind::Metadata(_)) => Vec::new(),
            EventKind::Modify(_) => paths.map(TreeEvent::Changed).collect(),
            _ => Vec::new(),
        }
    }
}
