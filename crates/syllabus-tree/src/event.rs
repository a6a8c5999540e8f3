//! Tree change events.

use std::path::{Path, PathBuf};

use crate::guard::Scope;

/// A change below `modules/`, as delivered to the reactor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeEvent {
    Changed(PathBuf),
    Created(PathBuf),
    Deleted(PathBuf),
}

impl TreeEvent {
    pub fn path(&self) -> &Path {
        match self {
            TreeEvent::Changed(path) | TreeEvent::Created(path) | TreeEvent::Deleted(path) => path,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            TreeEvent::Changed(_) => "changed",
            TreeEvent::Created(_) => "created",
            TreeEvent::Deleted(_) => "deleted",
        }
    }
}

/// Scope of a path below `modules_dir`.
///
/// Direct children are modules and grandchildren are topics. Anything else,
/// including `modules_dir` itself and files inside topics, has no scope.
pub fn scope_of(modules_dir: &Path, path: &Path) -> Option<Scope> {
    let relative = path.strip_prefix(modules_dir).ok()?;
    match relative.components().count() {
        1 => Some(Scope::Module),
        2 => Some(Scope::Topic),
        _ => None,
    }
}
