//! # Repository Access
//!
//! This module provides the explicit repository handle and the trait seam
//! through which the resolver talks to git.
//!
//! ## Design
//!
//! - **`Repository`**: A handle on the root of the local work tree. Every
//!   operation that needs "the current repository" receives one explicitly,
//!   so nothing in the library depends on the process working directory.
//!
//! - **`GitOperations`**: The interface for the three git interactions the
//!   resolver needs: cloning a remote, streaming commit identifiers and
//!   streaming the full log text. `DefaultGitOperations` shells out to the
//!   system `git`; tests substitute a mock that serves canned histories.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::history::{CommitLog, LogLines};

/// Trait for git operations - allows mocking in tests
pub trait GitOperations: Send + Sync {
    /// Clones `url` into the existing, empty `target_dir`.
    ///
    /// Only one branch is fetched: `branch` when given, otherwise the
    /// remote's default branch.
    fn clone_repository(&self, url: &str, branch: Option<&str>, target_dir: &Path) -> Result<()>;

    /// Streams the commit identifiers of the repository at `repo_dir`,
    /// newest first.
    fn commit_ids(&self, repo_dir: &Path) -> Result<CommitLog>;

    /// Streams the full log text (messages included) of the repository at
    /// `repo_dir`, newest first.
    fn log_lines(&self, repo_dir: &Path) -> Result<LogLines>;
}

/// The default implementation of `GitOperations`, which uses the system's
/// `git` command to perform real Git operations.
pub struct DefaultGitOperations;

impl GitOperations for DefaultGitOperations {
    fn clone_repository(&self, url: &str, branch: Option<&str>, target_dir: &Path) -> Result<()> {
        crate::git::clone_single_branch(url, branch, target_dir)
    }

    fn commit_ids(&self, repo_dir: &Path) -> Result<CommitLog> {
        let child = crate::git::spawn_log(repo_dir, &["--pretty=%H"])?;
        Ok(CommitLog::new(LogLines::from_child(repo_dir, child)?))
    }

    fn log_lines(&self, repo_dir: &Path) -> Result<LogLines> {
        let child = crate::git::spawn_log(repo_dir, &[])?;
        LogLines::from_child(repo_dir, child)
    }
}

/// Handle on a local git work tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    root: PathBuf,
}

impl Repository {
    /// Opens the work tree containing `dir`, failing with `NotAWorkTree` if
    /// `dir` is not inside one.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let root = dir.into();
        if !root.is_dir() {
            return Err(Error::SourceUnavailable {
                location: root,
                message: "directory does not exist".to_string(),
            });
        }
        if !crate::git::is_inside_work_tree(&root)? {
            return Err(Error::NotAWorkTree { dir: root });
        }
        Ok(Self { root })
    }

    /// Wraps `dir` without checking it. Useful when the caller already knows
    /// the directory is a repository, or when git access is mocked.
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { root: dir.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}
