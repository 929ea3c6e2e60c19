//! # Newest Common Commit
//!
//! A lightweight merge-base substitute that needs no parent graph, only
//! identifier equality:
//!
//! 1. Drain the remote history into a [`CommitSet`].
//! 2. Walk the local history newest first and return the first identifier
//!    the remote also contains.
//!
//! Because the local stream is newest first, the returned commit is the
//! newest local commit the remote knows about. The order of the remote
//! stream never changes the answer.

use std::collections::HashSet;

use log::debug;

use crate::defaults::DEFAULT_MAX_REMOTE_COMMITS;
use crate::error::{Error, Result};
use crate::history::CommitId;

/// Membership-only set of commit identifiers.
pub type CommitSet = HashSet<CommitId>;

/// Bounds applied while draining a remote history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AncestorLimits {
    /// Largest number of identifiers accepted from the remote stream.
    pub max_remote_commits: usize,
}

impl Default for AncestorLimits {
    fn default() -> Self {
        Self {
            max_remote_commits: DEFAULT_MAX_REMOTE_COMMITS,
        }
    }
}

/// Drains `remote` into a set, failing once more than
/// `limits.max_remote_commits` identifiers have been read.
pub fn collect_commits<I>(remote: I, remote_name: &str, limits: &AncestorLimits) -> Result<CommitSet>
where
    I: IntoIterator<Item = Result<CommitId>>,
{
    let mut commits = CommitSet::new();
    for (read, commit) in remote.into_iter().enumerate() {
        if read >= limits.max_remote_commits {
            return Err(Error::RemoteHistoryUnbounded {
                url: remote_name.to_string(),
                limit: limits.max_remote_commits,
            });
        }
        commits.insert(commit?);
    }
    Ok(commits)
}

/// Returns the newest commit of `local` that also appears in `remote`.
///
/// `remote_name` is only used in error messages.
pub fn newest_common<L, R>(
    local: L,
    remote: R,
    remote_name: &str,
    limits: &AncestorLimits,
) -> Result<CommitId>
where
    L: IntoIterator<Item = Result<CommitId>>,
    R: IntoIterator<Item = Result<CommitId>>,
{
    let remote = collect_commits(remote, remote_name, limits)?;
    debug!("{} has {} distinct commits", remote_name, remote.len());

    for (scanned, commit) in local.into_iter().enumerate() {
        let commit = commit?;
        if remote.contains(&commit) {
            debug!(
                "newest common commit with {} is {} ({} local commits scanned)",
                remote_name,
                commit,
                scanned + 1
            );
            return Ok(commit);
        }
    }

    Err(Error::NoCommonAncestor {
        url: remote_name.to_string(),
    })
}
