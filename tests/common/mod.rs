//! Shared test utilities for the E2E tests.
//!
//! Provides a temporary git repository fixture and helpers to drive the
//! `git-anchor` binary against it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     if !git_available() {
//!         return;
//!     }
//!     let fixture = TestFixture::git_repo().with_manifest(manifests::PINNED);
//!     fixture.command().arg("generate").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::Path;
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
#[allow(unused_imports)]
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    pub use super::git_available;
    pub use super::manifests;
    pub use super::TestFixture;
}

/// Manifest JSON snippets for testing.
#[allow(dead_code)]
pub mod manifests {
    /// Every dependency carries an explicit revision; nothing is cloned.
    pub const PINNED: &str = r#"{
  "Dir": "vendor",
  "Deps": [
    { "Repo": "github.com/gogo/protobuf", "Dir": "vendor/protobuf", "Rev": "0123abcd" },
    { "Repo": "github.com/golang/crypto", "Dir": "vendor/crypto", "Rev": "4567ef01" }
  ]
}"#;

    /// A squashed subtree resolved from the local log.
    pub const SQUASHED: &str = r#"{
  "Dir": "libs",
  "Deps": [
    { "Repo": "https://example.com/foo.git", "Dir": "libs/foo", "SquashedSubtree": true }
  ]
}"#;

    /// A squashed subtree the history knows nothing about.
    pub const UNKNOWN_SUBTREE: &str = r#"{
  "Dir": "libs",
  "Deps": [
    { "Repo": "https://example.com/bar.git", "Dir": "libs/bar", "SquashedSubtree": true }
  ]
}"#;

    /// Not JSON at all.
    pub const INVALID: &str = "{ Dir: ";
}

/// Whether a usable `git` binary is on PATH.
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Runs git in `dir` with a fixed identity, panicking on failure.
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(["-c", "user.name=Test", "-c", "user.email=test@example.com"])
        .args(["-c", "commit.gpgsign=false", "-c", "init.defaultBranch=main"])
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// A temporary directory, optionally initialized as a git repository.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Create a fixture holding a fresh git repository with one commit.
    pub fn git_repo() -> Self {
        Self::git_repo_with("initial commit")
    }

    /// Like [`TestFixture::git_repo`], with the root commit message given.
    ///
    /// Empty root commits made in the same second by the same identity hash
    /// identically, so histories that must not overlap need distinct messages.
    pub fn git_repo_with(root_message: &str) -> Self {
        let fixture = Self::new();
        git(fixture.path(), &["init", "--quiet"]);
        fixture.commit(root_message);
        fixture
    }

    /// Create a fixture holding a clone of `upstream`.
    #[allow(dead_code)]
    pub fn clone_of(upstream: &TestFixture) -> Self {
        let fixture = Self::new();
        git(
            fixture.path(),
            &[
                "clone",
                "--quiet",
                upstream.path().to_str().expect("utf-8 temp path"),
                ".",
            ],
        );
        fixture
    }

    /// Record an empty commit and return its id.
    pub fn commit(&self, message: &str) -> String {
        git(
            self.path(),
            &["commit", "--quiet", "--allow-empty", "-m", message],
        );
        self.head()
    }

    /// The id of `HEAD`.
    pub fn head(&self) -> String {
        git(self.path(), &["rev-parse", "HEAD"])
    }

    /// Add a `deps.json` manifest with the given content.
    #[allow(dead_code)]
    pub fn with_manifest(self, content: &str) -> Self {
        self.with_file("deps.json", content)
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a child path in the temp directory.
    #[allow(dead_code)]
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Create a command running in this fixture's directory.
    ///
    /// Git is stopped from searching above the fixture, so a plain fixture
    /// is never mistaken for part of an enclosing checkout.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("git-anchor");
        cmd.current_dir(self.path());
        if let Some(parent) = self.path().parent() {
            cmd.env("GIT_CEILING_DIRECTORIES", parent);
        }
        cmd.env_remove("GIT_ANCHOR_MANIFEST")
            .env_remove("GIT_ANCHOR_REPO")
            .env_remove("GIT_ANCHOR_BRANCH")
            .env("NO_COLOR", "1");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
