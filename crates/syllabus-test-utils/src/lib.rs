//! Test utilities for syllabus crates.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Creates a temporary directory that is cleaned up on drop.
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Creates a temporary workspace root with an empty `modules` directory.
///
/// The root path is canonicalized so watcher events, which report resolved
/// paths on some platforms, match it.
pub fn temp_workspace() -> (TempDir, PathBuf) {
    let dir = temp_dir();
    let root = dir.path().canonicalize().expect("Failed to resolve temp dir");
    std::fs::create_dir_all(root.join("modules")).expect("Failed to create modules dir");
    (dir, root)
}

/// Sorted names of the entries directly inside `path`.
pub fn child_names(path: impl AsRef<Path>) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(path.as_ref())
        .expect("Failed to read dir")
        .map(|entry| {
            entry
                .expect("Failed to read dir entry")
                .file_name()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    names.sort();
    names
}

/// Builder for on-disk content trees.
pub struct TreeFixture {
    _dir: TempDir,
    root: PathBuf,
}

impl TreeFixture {
    /// An empty workspace with a `modules` directory.
    pub fn new() -> Self {
        let (dir, root) = temp_workspace();
        Self { _dir: dir, root }
    }

    /// Workspace holding the given directories, relative to `modules`.
    ///
    /// `"001-Arrays/002-Traversal"` creates the module and the topic.
    pub fn with_dirs(dirs: &[&str]) -> Self {
        let fixture = Self::new();
        for dir in dirs {
            fixture.dir(Path::new("modules").join(dir));
        }
        fixture
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn modules_dir(&self) -> PathBuf {
        self.root.join("modules")
    }

    /// Absolute path of `relative` inside the workspace.
    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }

    /// Create a directory (and parents) inside the workspace.
    pub fn dir(&self, relative: impl AsRef<Path>) -> PathBuf {
        let path = self.path(relative);
        std::fs::create_dir_all(&path).expect("Failed to create fixture dir");
        path
    }

    /// Write a file (creating parents) inside the workspace.
    pub fn file(&self, relative: impl AsRef<Path>, contents: &str) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create fixture dir");
        }
        std::fs::write(&path, contents).expect("Failed to write fixture file");
        path
    }

    /// Contents of a file inside the workspace, if it exists.
    pub fn read(&self, relative: impl AsRef<Path>) -> Option<String> {
        std::fs::read_to_string(self.path(relative)).ok()
    }

    /// Sorted entry names of a directory inside the workspace.
    pub fn children(&self, relative: impl AsRef<Path>) -> Vec<String> {
        child_names(self.path(relative))
    }
}

impl Default for TreeFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Assert that a Result is Ok and return the value.
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_temp_workspace_has_modules_dir() {
        let (_dir, root) = temp_workspace();
        assert!(root.join("modules").is_dir());
    }

    #[test]
    fn test_fixture_builds_tree() {
        let fixture =
            TreeFixture::with_dirs(&["001-Arrays/001-Intro", "001-Arrays/002-Traversal", "002-Graphs"]);

        assert_eq!(fixture.children("modules"), vec!["001-Arrays", "002-Graphs"]);
        assert_eq!(
            fixture.children("modules/001-Arrays"),
            vec!["001-Intro", "002-Traversal"]
        );
    }

    #[test]
    fn test_fixture_files() {
        let fixture = TreeFixture::new();
        fixture.file("modules/001-A/001-T/Quiz.gift", "// quiz");

        assert_eq!(
            fixture.read("modules/001-A/001-T/Quiz.gift").as_deref(),
            Some("// quiz")
        );
        assert_eq!(fixture.read("modules/missing.md"), None);
    }

    proptest! {
        #[test]
        fn test_file_content_roundtrip(content in "\\PC*") {
            let fixture = TreeFixture::new();
            fixture.file("note.md", &content);
            prop_assert_eq!(fixture.read("note.md"), Some(content));
        }
    }
}
