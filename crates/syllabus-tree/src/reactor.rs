//! Change reactor: keeps the tree contiguous as it changes.
//!
//! The reactor consumes [`TreeEvent`]s from a channel. Module-level events
//! update the index and renumber all modules only when the change broke
//! contiguity. Topic-level events always renumber the owning module's topics.
//!
//! Renames made by a pass come back as events. The reactor holds the scope's
//! lease for the whole pass, waits for the watcher to settle, then drains the
//! channel and drops the queued events of that scope. Events of the other
//! scope are kept for later.

use std::collections::VecDeque;
use std::future::Future;
use std::path::Path;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::error::{FsError, TreeError, TreeResult};
use crate::event::{scope_of, TreeEvent};
use crate::guard::{Scope, ScopeState};
use crate::naming;
use crate::workspace::Workspace;

/// What the reactor did with one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reaction {
    /// Not a module or topic path, or not numbered.
    Ignored,
    /// The scope was busy renumbering.
    Dropped(Scope),
    /// The index was brought up to date and no renumbering was needed.
    Indexed,
    Renumbered {
        scope: Scope,
        renamed: usize,
        /// Queued events of the same scope discarded after the pass.
        drained: usize,
    },
}

pub struct ChangeReactor {
    workspace: Workspace,
    events: mpsc::Receiver<TreeEvent>,
    deferred: VecDeque<TreeEvent>,
    settle: Duration,
}

impl ChangeReactor {
    pub fn new(workspace: Workspace, events: mpsc::Receiver<TreeEvent>) -> Self {
        let settle = Duration::from_millis(workspace.config().watch.settle_ms);
        Self {
            workspace,
            events,
            deferred: VecDeque::new(),
            settle,
        }
    }

    /// Override how long to wait for echo events after a pass.
    pub fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// Handle events until every sender is gone.
    pub async fn run(mut self) -> Workspace {
        while let Some(event) = self.next_event().await {
            self.dispatch(event).await;
        }
        self.workspace
    }

    /// Handle events until `shutdown` completes or every sender is gone.
    pub async fn run_until<F>(mut self, shutdown: F) -> Workspace
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        loop {
            let event = tokio::select! {
                _ = &mut shutdown => break,
                event = self.next_event() => match event {
                    Some(event) => event,
                    None => break,
                },
            };
            self.dispatch(event).await;
        }
        self.workspace
    }

    async fn next_event(&mut self) -> Option<TreeEvent> {
        if let Some(event) = self.deferred.pop_front() {
            return Some(event);
        }
        self.events.recv().await
    }

    async fn dispatch(&mut self, event: TreeEvent) {
        let kind = event.kind();
        let path = event.path().display().to_string();
        match self.handle(event).await {
            Ok(Reaction::Renumbered {
                scope,
                renamed,
                drained,
            }) => info!(kind, path = %path, %scope, renamed, drained, "renumbered"),
            Ok(reaction) => debug!(kind, path = %path, ?reaction, "event handled"),
            Err(e) => warn!(kind, path = %path, error = %e, "event handling failed"),
        }
    }

    /// React to one event.
    pub async fn handle(&mut self, event: TreeEvent) -> TreeResult<Reaction> {
        let Some(scope) = scope_of(&self.workspace.modules_dir(), event.path()) else {
            return Ok(Reaction::Ignored);
        };
        if self.workspace.guards().state(scope) == ScopeState::Renumbering {
            debug!(%scope, "scope busy, event dropped");
            return Ok(Reaction::Dropped(scope));
        }

        match scope {
            Scope::Module => self.on_module_event(event).await,
            Scope::Topic => self.on_topic_event(event).await,
        }
    }

    async fn on_module_event(&mut self, event: TreeEvent) -> TreeResult<Reaction> {
        let Some(name) = event.path().file_name().and_then(|n| n.to_str()) else {
            return Ok(Reaction::Ignored);
        };
        let Some(prefix) = naming::number_prefix(name) else {
            return Ok(Reaction::Ignored);
        };
        let key = self.workspace.naming().canonical_key(name);

        // The ordinal the entry must have held for the tree to stay contiguous.
        let expected = match &event {
            TreeEvent::Changed(_) => self.workspace.index().module_count(),
            TreeEvent::Created(_) => {
                if !self.workspace.index().contains(&key) {
                    let modules_dir = self.workspace.modules_dir();
                    self.workspace
                        .index
                        .insert(
                            self.workspace.fs.as_ref(),
                            &modules_dir,
                            name,
                            &self.workspace.naming,
                        )
                        .await?;
                }
                self.workspace.index().module_count()
            }
            TreeEvent::Deleted(_) => {
                let before = self.workspace.index().module_count();
                // A rename may report the new name before the old one is gone.
                if self.workspace.find_module_dir(&key).await?.is_none() {
                    self.workspace.index.remove(&key);
                }
                before
            }
        };

        if prefix == expected as u64 {
            return Ok(Reaction::Indexed);
        }
        debug!(prefix, expected, "module order disrupted");
        self.module_pass().await
    }

    async fn on_topic_event(&mut self, event: TreeEvent) -> TreeResult<Reaction> {
        let Some(module_path) = event.path().parent() else {
            return Ok(Reaction::Ignored);
        };
        match self.topic_pass(module_path).await {
            // The whole module went away; its own event handles that.
            Err(TreeError::Fs(FsError::NotFound { .. })) if matches!(event, TreeEvent::Deleted(_)) => {
                Ok(Reaction::Ignored)
            }
            other => other,
        }
    }

    async fn module_pass(&mut self) -> TreeResult<Reaction> {
        let _lease = self.workspace.acquire(Scope::Module)?;
        let report = self.workspace.renumber_modules_held().await?;
        let drained = if report.changed() {
            self.settle_and_drain(Scope::Module).await
        } else {
            0
        };
        Ok(Reaction::Renumbered {
            scope: Scope::Module,
            renamed: report.renamed.len(),
            drained,
        })
    }

    async fn topic_pass(&mut self, module_path: &Path) -> TreeResult<Reaction> {
        let _lease = self.workspace.acquire(Scope::Topic)?;
        let report = self.workspace.renumber_topics_held(module_path).await?;
        let drained = if report.changed() {
            self.settle_and_drain(Scope::Topic).await
        } else {
            0
        };
        Ok(Reaction::Renumbered {
            scope: Scope::Topic,
            renamed: report.renamed.len(),
            drained,
        })
    }

    /// Wait for the pass's own events to arrive, then discard those of `scope`.
    async fn settle_and_drain(&mut self, scope: Scope) -> usize {
        if !self.settle.is_zero() {
            tokio::time::sleep(self.settle).await;
        }

        let modules_dir = self.workspace.modules_dir();
        let mut drained = 0;
        while let Ok(event) = self.events.try_recv() {
            if scope_of(&modules_dir, event.path()) == Some(scope) {
                debug!(kind = event.kind(), path = %event.path().display(), "dropped event from own pass");
                drained += 1;
            } else {
                self.deferred.push_back(event);
            }
        }
        drained
    }
}
