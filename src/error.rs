//! # Error Handling
//!
//! This module defines the centralized error type for `git-anchor`. It uses
//! the `thiserror` library to build an `Error` enum covering every failure a
//! resolution run can hit, each with enough context to tell the user which
//! repository, directory or command was involved.
//!
//! ## Key Components
//!
//! - **`Error`**: All failure modes of the library. Resolution errors are
//!   terminal for a run; there is no partial-success mode.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! The variants fall into three groups:
//!
//! - Resolution engine errors (`SourceUnavailable`, `LogUnreadable`,
//!   `RemoteHistoryUnbounded`, `NoCommonAncestor`, `NotASubtree`).
//! - Boundary errors (`ManifestInvalid`, `NotAWorkTree`,
//!   `UnsupportedLanguage`).
//! - Git subprocess errors and wrapped library errors.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for git-anchor operations
#[derive(Error, Debug)]
pub enum Error {
    /// A location could not be read as a git repository.
    #[error("Repository unavailable at {}: {message}", location.display())]
    SourceUnavailable { location: PathBuf, message: String },

    /// A log stream broke before it was fully consumed.
    #[error("Commit log of {} could not be read: {message}", location.display())]
    LogUnreadable { location: PathBuf, message: String },

    /// The remote history produced more commits than the configured limit.
    #[error("Remote history of {url} exceeded {limit} commits")]
    RemoteHistoryUnbounded { url: String, limit: usize },

    /// The local and remote histories share no commit.
    #[error("No common commit between the local history and {url}")]
    NoCommonAncestor { url: String },

    /// The manifest claims a squashed subtree the local history does not know.
    #[error("{directory} is not a git subtree")]
    NotASubtree { directory: String },

    /// The dependency manifest is malformed.
    ///
    /// Carries an optional hint describing how to fix the declaration.
    #[error("Invalid manifest: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ManifestInvalid {
        message: String,
        /// Optional hint for how to fix the manifest
        hint: Option<String>,
    },

    /// An error occurred while cloning a Git repository.
    #[error("Git clone error for {url}: {message}")]
    GitClone { url: String, message: String },

    /// An error occurred while executing a Git command.
    #[error("Git command failed in {}: {command} - {stderr}", dir.display())]
    GitCommand {
        command: String,
        dir: PathBuf,
        stderr: String,
    },

    /// The given directory is not inside a git work tree.
    #[error("{} is not inside a git work tree", dir.display())]
    NotAWorkTree { dir: PathBuf },

    /// No script renderer exists for the requested language.
    #[error("Script generation for language {language} is not implemented")]
    UnsupportedLanguage { language: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON error, wrapped from `serde_json::Error`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
