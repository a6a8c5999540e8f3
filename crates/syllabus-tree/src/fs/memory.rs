//! In-memory file system for tests and dry runs.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{DirEntry, WorkspaceFs};
use crate::error::{FsError, FsResult};

#[derive(Debug, Clone)]
enum Node {
    Dir,
    File(Vec<u8>),
}

/// Recorded mutating operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FsOperation {
    CreateDir(PathBuf),
    Write(PathBuf, usize),
    Rename(PathBuf, PathBuf),
}

#[derive(Debug, Default)]
struct State {
    nodes: BTreeMap<PathBuf, Node>,
    operations: Vec<FsOperation>,
    denied: HashSet<PathBuf>,
}

/// [`WorkspaceFs`] holding the whole tree in memory.
///
/// Clones share the same tree. Paths are used verbatim, so callers should
/// stick to absolute paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    state: Arc<RwLock<State>>,
}

fn denied(path: &Path) -> FsError {
    FsError::Io {
        path: path.to_path_buf(),
        source: io::Error::new(io::ErrorKind::PermissionDenied, "write denied"),
    }
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    fn read_state(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Add a directory and its parents.
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let mut state = self.write_state();
        insert_dir_all(&mut state.nodes, path.as_ref());
    }

    /// Add a file, creating parent directories.
    pub fn add_file(&self, path: impl AsRef<Path>, contents: impl AsRef<[u8]>) {
        let path = path.as_ref();
        let mut state = self.write_state();
        if let Some(parent) = path.parent() {
            insert_dir_all(&mut state.nodes, parent);
        }
        state
            .nodes
            .insert(path.to_path_buf(), Node::File(contents.as_ref().to_vec()));
    }

    /// Make writes to `path` fail, as a read-only file would.
    pub fn deny_writes(&self, path: impl AsRef<Path>) {
        self.write_state().denied.insert(path.as_ref().to_path_buf());
    }

    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        self.read_state().nodes.contains_key(path.as_ref())
    }

    pub fn is_dir(&self, path: impl AsRef<Path>) -> bool {
        matches!(self.read_state().nodes.get(path.as_ref()), Some(Node::Dir))
    }

    /// File contents as text, if the file exists.
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        match self.read_state().nodes.get(path.as_ref()) {
            Some(Node::File(bytes)) => Some(String::from_utf8_lossy(bytes).into_owned()),
            _ => None,
        }
    }

    /// Names of the direct children of `path`, sorted.
    pub fn children(&self, path: impl AsRef<Path>) -> Vec<String> {
        let path = path.as_ref();
        self.read_state()
            .nodes
            .keys()
            .filter(|p| p.parent() == Some(path))
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect()
    }

    /// Mutating operations performed so far.
    pub fn operations(&self) -> Vec<FsOperation> {
        self.read_state().operations.clone()
    }

    /// Number of renames performed so far.
    pub fn rename_count(&self) -> usize {
        self.read_state()
            .operations
            .iter()
            .filter(|op| matches!(op, FsOperation::Rename(..)))
            .count()
    }

    pub fn clear_operations(&self) {
        self.write_state().operations.clear();
    }
}

fn insert_dir_all(nodes: &mut BTreeMap<PathBuf, Node>, path: &Path) {
    for ancestor in path.ancestors() {
        if ancestor.as_os_str().is_empty() {
            break;
        }
        nodes.entry(ancestor.to_path_buf()).or_insert(Node::Dir);
    }
}

#[async_trait]
impl WorkspaceFs for MemoryFs {
    async fn list_directory(&self, path: &Path) -> FsResult<Vec<DirEntry>> {
        let state = self.read_state();
        match state.nodes.get(path) {
            Some(Node::Dir) => {}
            Some(Node::File(_)) => {
                return Err(FsError::Io {
                    path: path.to_path_buf(),
                    source: io::Error::new(io::ErrorKind::Other, "not a directory"),
                })
            }
            None => {
                return Err(FsError::NotFound {
                    path: path.to_path_buf(),
                })
            }
        }

        Ok(state
            .nodes
            .iter()
            .filter(|(p, _)| p.parent() == Some(path))
            .filter_map(|(p, node)| {
                let name = p.file_name()?.to_string_lossy().into_owned();
                Some(DirEntry {
                    name,
                    is_dir: matches!(node, Node::Dir),
                })
            })
            .collect())
    }

    async fn create_directory(&self, path: &Path) -> FsResult<()> {
        let mut state = self.write_state();
        if state.denied.contains(path) {
            return Err(denied(path));
        }
        if let Some(Node::File(_)) = state.nodes.get(path) {
            return Err(FsError::AlreadyExists {
                path: path.to_path_buf(),
            });
        }
        insert_dir_all(&mut state.nodes, path);
        state.operations.push(FsOperation::CreateDir(path.to_path_buf()));
        Ok(())
    }

    async fn write_file(&self, path: &Path, contents: &[u8]) -> FsResult<()> {
        let mut state = self.write_state();
        if state.denied.contains(path) {
            return Err(denied(path));
        }
        match path.parent().map(|p| state.nodes.get(p)) {
            Some(Some(Node::Dir)) => {}
            _ => {
                return Err(FsError::NotFound {
                    path: path.to_path_buf(),
                })
            }
        }
        if let Some(Node::Dir) = state.nodes.get(path) {
            return Err(FsError::AlreadyExists {
                path: path.to_path_buf(),
            });
        }

        state
            .nodes
            .insert(path.to_path_buf(), Node::File(contents.to_vec()));
        state
            .operations
            .push(FsOperation::Write(path.to_path_buf(), contents.len()));
        Ok(())
    }

    async fn rename(&self, from: &Path, to: &Path) -> FsResult<()> {
        let mut state = self.write_state();
        if !state.nodes.contains_key(from) {
            return Err(FsError::NotFound {
                path: from.to_path_buf(),
            });
        }
        if state.nodes.contains_key(to) {
            return Err(FsError::AlreadyExists {
                path: to.to_path_buf(),
            });
        }
        if state.denied.contains(from) {
            return Err(denied(from));
        }

        let moved: Vec<PathBuf> = state
            .nodes
            .keys()
            .filter(|p| p.starts_with(from))
            .cloned()
            .collect();
        for old in moved {
            if let Some(node) = state.nodes.remove(&old) {
                let new = match old.strip_prefix(from) {
                    Ok(rest) if !rest.as_os_str().is_empty() => to.join(rest),
                    _ => to.to_path_buf(),
                };
                state.nodes.insert(new, node);
            }
        }

        state
            .operations
            .push(FsOperation::Rename(from.to_path_buf(), to.to_path_buf()));
        Ok(())
    }

    async fn read_file(&self, path: &Path) -> FsResult<Vec<u8>> {
        match self.read_state().nodes.get(path) {
            Some(Node::File(bytes)) => Ok(bytes.clone()),
            Some(Node::Dir) => Err(FsError::Io {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::Other, "is a directory"),
            }),
            None => Err(FsError::NotFound {
                path: path.to_path_buf(),
            }),
        }
    }
}
