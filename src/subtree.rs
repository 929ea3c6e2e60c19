//! # Subtree Index
//!
//! Reconstructs which directories were merged in with `git subtree` and the
//! upstream revision each one was last synchronized to, using only the text
//! of the repository's log.
//!
//! A subtree merge leaves trailer lines in its commit message:
//!
//! ```text
//!     git-subtree-dir: libs/foo
//!     git-subtree-mainline: 4f1c...
//!     git-subtree-split: deadbeef...
//! ```
//!
//! The mainline line is only present on non-squashed merges. The log is read
//! newest first, so the first split revision seen for a directory is the
//! latest synchronization and is never overwritten by older ones.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;

use crate::error::Result;
use crate::history::CommitId;
use crate::repository::{GitOperations, Repository};

const DIR_MARKER: &str = "git-subtree-dir";
const MAINLINE_MARKER: &str = "git-subtree-mainline";
const SPLIT_MARKER: &str = "git-subtree-split";

/// Scanner position within a trailer block.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ScanState {
    /// Looking for a directory marker.
    Idle,
    /// Saw a directory marker; the split marker must come next, optionally
    /// after a mainline marker.
    AwaitingSplit { directory: String },
}

/// Directories merged in as subtrees, each with its latest split revision.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubtreeIndex {
    revisions: HashMap<String, CommitId>,
    /// Sorted once the scan completes.
    directories: Vec<String>,
}

impl SubtreeIndex {
    /// Builds the index from the full log of `repo`.
    pub fn load(git: &dyn GitOperations, repo: &Repository) -> Result<Self> {
        Self::from_lines(git.log_lines(repo.root())?)
    }

    /// Builds the index from newest-first log lines.
    ///
    /// The first error in the stream aborts the scan.
    pub fn from_lines<I>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = Result<String>>,
    {
        let mut scan = Scan::default();
        for line in lines {
            scan.feed(&line?);
        }
        Ok(scan.finish())
    }

    /// Builds the index from log text already held in memory.
    pub fn parse(text: &str) -> Self {
        let mut scan = Scan::default();
        text.lines().for_each(|line| scan.feed(line));
        scan.finish()
    }

    fn advance(&mut self, state: ScanState, line: &str) -> ScanState {
        // A new directory marker always starts a fresh candidate.
        if let Some(directory) = marker_value(line, DIR_MARKER) {
            return ScanState::AwaitingSplit {
                directory: directory.to_string(),
            };
        }

        match state {
            ScanState::Idle => ScanState::Idle,
            ScanState::AwaitingSplit { directory } => {
                if line.contains(MAINLINE_MARKER) {
                    ScanState::AwaitingSplit { directory }
                } else if line.contains(SPLIT_MARKER) {
                    if let Some(revision) = marker_value(line, SPLIT_MARKER) {
                        self.record(directory, CommitId::new(revision));
                    }
                    ScanState::Idle
                } else {
                    ScanState::Idle
                }
            }
        }
    }

    fn record(&mut self, directory: String, revision: CommitId) {
        if let Entry::Vacant(entry) = self.revisions.entry(directory) {
            self.directories.push(entry.key().clone());
            entry.insert(revision);
        }
    }

    pub fn has(&self, directory: &str) -> bool {
        self.revisions.contains_key(directory)
    }

    pub fn revision_of(&self, directory: &str) -> Option<&CommitId> {
        self.revisions.get(directory)
    }

    /// Known subtree directories, sorted.
    pub fn directories(&self) -> &[String] {
        &self.directories
    }

    /// `(directory, revision)` pairs in directory order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &CommitId)> + '_ {
        self.directories
            .iter()
            .map(|dir| (dir.as_str(), &self.revisions[dir]))
    }

    pub fn len(&self) -> usize {
        self.directories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directories.is_empty()
    }
}

/// An index under construction together with the scanner position.
struct Scan {
    index: SubtreeIndex,
    state: ScanState,
}

impl Default for Scan {
    fn default() -> Self {
        Self {
            index: SubtreeIndex::default(),
            state: ScanState::Idle,
        }
    }
}

impl Scan {
    fn feed(&mut self, line: &str) {
        let state = std::mem::replace(&mut self.state, ScanState::Idle);
        self.state = self.index.advance(state, line);
    }

    fn finish(mut self) -> SubtreeIndex {
        self.index.directories.sort();
        self.index
    }
}

impl fmt::Display for SubtreeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (directory, revision)) in self.entries().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}:{}", directory, revision)?;
        }
        Ok(())
    }
}

/// Extracts the value of a `marker: value` trailer.
///
/// The marker may appear anywhere in the line (git indents message bodies).
/// The line must contain exactly one colon and a non-empty value.
fn marker_value<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    if !line.contains(marker) {
        return None;
    }
    let mut parts = line.split(':');
    let _key = parts.next()?;
    let value = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}
