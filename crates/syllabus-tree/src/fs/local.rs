//! Real file system backed by `tokio::fs`.

use async_trait::async_trait;
use std::path::Path;
use tokio::fs;

use super::{DirEntry, WorkspaceFs};
use crate::error::{FsError, FsResult};

/// [`WorkspaceFs`] over the local disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }
}

/// Renames that only change letter case hit the same entry on
/// case-insensitive file systems, so the target "exists" without conflict.
fn same_entry_ignoring_case(from: &Path, to: &Path) -> bool {
    match (from.to_str(), to.to_str()) {
        (Some(a), Some(b)) => a != b && a.eq_ignore_ascii_case(b),
        _ => false,
    }
}

#[async_trait]
impl WorkspaceFs for LocalFs {
    async fn list_directory(&self, path: &Path) -> FsResult<Vec<DirEntry>> {
        let mut reader = fs::read_dir(path)
            .await
            .map_err(|e| FsError::from_io(path, e))?;

        let mut entries = Vec::new();
        while let Some(entry) = reader
            .next_entry()
            .await
            .map_err(|e| FsError::from_io(path, e))?
        {
            let file_type = entry
                .file_type()
                .await
                .map_err(|e| FsError::from_io(entry.path(), e))?;
            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_dir: file_type.is_dir(),
            });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    async fn create_directory(&self, path: &Path) -> FsResult<()> {
        fs::create_dir_all(path)
            .await
            .map_err(|e| FsError::from_io(path, e))
    }

    async fn write_file(&self, path: &Path, contents: &[u8]) -> FsResult<()> {
        fs::write(path, contents)
            .await
            .map_err(|e| FsError::from_io(path, e))
    }

    async fn rename(&self, from: &Path, to: &Path) -> FsResult<()> {
        let taken = fs::try_exists(to)
            .await
            .map_err(|e| FsError::from_io(to, e))?;
        if taken && !same_entry_ignoring_case(from, to) {
            return Err(FsError::AlreadyExists {
                path: to.to_path_buf(),
            });
        }

        fs::rename(from, to)
            .await
            .map_err(|e| FsError::from_io(from, e))
    }

    async fn read_file(&self, path: &Path) -> FsResult<Vec<u8>> {
        fs::read(path).await.map_err(|e| FsError::from_io(path, e))
    }
}
