//! File system seam.
//!
//! Every tree operation reaches the disk through [`WorkspaceFs`], so the same
//! logic runs against the real file system ([`LocalFs`]) and an in-memory
//! tree ([`MemoryFs`]).

mod local;
mod memory;

pub use local::LocalFs;
pub use memory::{FsOperation, MemoryFs};

use async_trait::async_trait;
use std::path::Path;

use crate::error::{FsError, FsResult};
use crate::naming;

/// One child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
}

impl DirEntry {
    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
        }
    }

    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
        }
    }
}

/// Operations the tree needs from a file system.
#[async_trait]
pub trait WorkspaceFs: Send + Sync {
    /// Children of `path`, sorted by name.
    async fn list_directory(&self, path: &Path) -> FsResult<Vec<DirEntry>>;

    /// Create `path` and any missing parents. Succeeds if it already exists.
    async fn create_directory(&self, path: &Path) -> FsResult<()>;

    /// Create or overwrite a file. The parent directory must exist.
    async fn write_file(&self, path: &Path, contents: &[u8]) -> FsResult<()>;

    /// Rename an entry. Fails with [`FsError::AlreadyExists`] if `to` is taken.
    async fn rename(&self, from: &Path, to: &Path) -> FsResult<()>;

    /// Read a whole file. A missing file is [`FsError::NotFound`].
    async fn read_file(&self, path: &Path) -> FsResult<Vec<u8>>;

    /// Read a file as text, or `None` if it does not exist.
    async fn read_text(&self, path: &Path) -> FsResult<Option<String>> {
        match self.read_file(path).await {
            Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
            Err(FsError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Numbered child directories of `path`, in ordinal order.
///
/// Entries sort by the numeric value of their prefix and then by full name,
/// so `002-B` precedes `010-A` and a duplicated prefix keeps a stable order.
pub async fn numbered_dirs(fs: &dyn WorkspaceFs, path: &Path) -> FsResult<Vec<String>> {
    let mut names: Vec<String> = fs
        .list_directory(path)
        .await?
        .into_iter()
        .filter(|entry| entry.is_dir && naming::is_numbered(&entry.name))
        .map(|entry| entry.name)
        .collect();

    names.sort_by(|a, b| {
        naming::number_prefix(a)
            .cmp(&naming::number_prefix(b))
            .then_with(|| a.cmp(b))
    });
    Ok(names)
}

/// Number of numbered child directories of `path`.
pub async fn count_numbered_dirs(fs: &dyn WorkspaceFs, path: &Path) -> FsResult<usize> {
    Ok(numbered_dirs(fs, path).await?.len())
}
