//! Renumbering of numbered sibling directories.

use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

use syllabus_common_log::spans::{instrument_future, pass_span};

use crate::error::TreeResult;
use crate::fs::{self, WorkspaceFs};
use crate::guard::Scope;
use crate::naming::{self, NameNormalizer};

/// Prefix for names used while renames are staged. Never a digit, so staged
/// entries are not numbered and the watcher pipeline ignores them.
const STAGING_PREFIX: &str = "~renumber-";

/// Result of one renumber pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenumberReport {
    /// Numbered entries found.
    pub entries: usize,
    /// `(old, new)` names of every entry that moved.
    pub renamed: Vec<(String, String)>,
}

impl RenumberReport {
    pub fn changed(&self) -> bool {
        !self.renamed.is_empty()
    }
}

/// Rewrites numbered children to `001-Key`, `002-Key`, ...
pub struct RenumberEngine<'a> {
    fs: &'a dyn WorkspaceFs,
    naming: &'a NameNormalizer,
}

impl<'a> RenumberEngine<'a> {
    pub fn new(fs: &'a dyn WorkspaceFs, naming: &'a NameNormalizer) -> Self {
        Self { fs, naming }
    }

    /// Target names for the numbered children of `path`, in ordinal order.
    pub async fn plan(&self, path: &Path) -> TreeResult<Vec<(String, String)>> {
        let names = fs::numbered_dirs(self.fs, path).await?;
        Ok(names
            .into_iter()
            .enumerate()
            .map(|(i, name)| {
                let target = naming::numbered_name(i + 1, &self.naming.canonical_key(&name));
                (name, target)
            })
            .collect())
    }

    /// Renumber the numbered children of `path` so prefixes run 1..N in the
    /// existing order with canonical names.
    ///
    /// When a target name is still held by a sibling that has yet to move,
    /// every rename goes through a temporary name first. Failures stop the
    /// pass and are not rolled back.
    pub async fn renumber(&self, scope: Scope, path: &Path) -> TreeResult<RenumberReport> {
        let span = pass_span(&scope.to_string(), &path.display().to_string());
        instrument_future(self.renumber_inner(path), span).await
    }

    async fn renumber_inner(&self, path: &Path) -> TreeResult<RenumberReport> {
        let plan = self.plan(path).await?;
        let entries = plan.len();

        let moves: Vec<(String, String)> =
            plan.into_iter().filter(|(old, new)| old != new).collect();
        if moves.is_empty() {
            debug!(entries, "already contiguous");
            return Ok(RenumberReport {
                entries,
                renamed: Vec::new(),
            });
        }

        let sources: HashSet<&str> = moves.iter().map(|(old, _)| old.as_str()).collect();
        let staged = moves
            .iter()
            .any(|(_, new)| sources.contains(new.as_str()));

        if staged {
            debug!(moves = moves.len(), "target names overlap, staging renames");
            let mut staging = Vec::with_capacity(moves.len());
            for (i, (old, new)) in moves.iter().enumerate() {
                let temp = format!("{STAGING_PREFIX}{i}-{old}");
                self.fs.rename(&path.join(old), &path.join(&temp)).await?;
                staging.push((temp, new));
            }
            for (temp, new) in staging {
                self.fs.rename(&path.join(&temp), &path.join(new)).await?;
            }
        } else {
            for (old, new) in &moves {
                self.fs.rename(&path.join(old), &path.join(new)).await?;
            }
        }

        info!(entries, renamed = moves.len(), "renumbered");
        Ok(RenumberReport {
            entries,
            renamed: moves,
        })
    }
}
