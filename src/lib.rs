//! # git-anchor
//!
//! This library pins the external git dependencies of a repository to exact
//! revisions and renders a script that verifies them. It backs the
//! `git-anchor` command-line tool.
//!
//! ## Quick Example
//!
//! ```
//! use git_anchor::ancestor::{newest_common, AncestorLimits};
//! use git_anchor::history::CommitId;
//! use git_anchor::subtree::SubtreeIndex;
//!
//! // Newest commit of the local history that the remote also has
//! let local = ["C3", "C2", "C1"].map(|id| Ok(CommitId::new(id)));
//! let remote = ["C9", "C2", "C1"].map(|id| Ok(CommitId::new(id)));
//! let pinned = newest_common(local, remote, "remote", &AncestorLimits::default()).unwrap();
//! assert_eq!(pinned.as_str(), "C2");
//!
//! // Subtrees recorded in a commit log
//! let index = SubtreeIndex::parse(
//!     "    git-subtree-dir: libs/foo\n    git-subtree-mainline: abcd\n    git-subtree-split: deadbeef\n",
//! );
//! assert!(index.has("libs/foo"));
//! assert_eq!(index.revision_of("libs/foo").unwrap().as_str(), "deadbeef");
//! ```
//!
//! ## Core Concepts
//!
//! - **Commit streams (`history`)**: lazy, newest-first readers over
//!   `git log` output.
//! - **Subtree index (`subtree`)**: the directories merged in with
//!   `git subtree` and the upstream revision each was last synchronized to.
//! - **Newest common commit (`ancestor`)**: the newest local commit that a
//!   freshly cloned remote also contains.
//! - **Resolution (`resolve`)**: picks a revision for every manifest entry,
//!   from an explicit pin, the subtree index or a temporary clone.
//! - **Manifest and script (`manifest`, `script`)**: the JSON input and the
//!   bash verification script output.
//! - **Repository access (`repository`, `git`)**: an explicit handle on the
//!   local work tree and the `GitOperations` seam over the `git` binary.
//!
//! ## Execution Flow
//!
//! 1.  **Load**: Parse and validate the manifest.
//! 2.  **Resolve**: Pin each dependency, cloning remotes into temporary
//!     directories that are removed afterwards.
//! 3.  **Render**: Produce the verification script from the resolved
//!     manifest.

pub mod ancestor;
pub mod defaults;
pub mod error;
pub mod git;
pub mod history;
pub mod manifest;
pub mod output;
pub mod repository;
pub mod resolve;
pub mod script;
pub mod subtree;
pub mod suggestions;
