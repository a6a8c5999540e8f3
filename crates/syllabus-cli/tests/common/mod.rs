//! Common test utilities for CLI testing.

use assert_cmd::Command;
use syllabus_test_utils::TreeFixture;

/// Tree fixture plus a command bound to it.
pub struct TestContext {
    pub tree: TreeFixture,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            tree: TreeFixture::new(),
        }
    }

    pub fn with_dirs(dirs: &[&str]) -> Self {
        Self {
            tree: TreeFixture::with_dirs(dirs),
        }
    }

    /// `syllabus` running in the fixture root with a clean environment.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("syllabus").expect("Binary not found");
        cmd.current_dir(self.tree.root())
            .env_remove("SYLLABUS_ROOT")
            .env_remove("SYLLABUS_CONFIG")
            .env_remove("SYLLABUS_PRESERVE_HEADINGS")
            .env_remove("RUST_LOG")
            .env("SYLLABUS_LOG_LEVEL", "error");
        cmd
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
