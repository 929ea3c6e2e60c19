//! # Revision Resolution
//!
//! Turns a [`Manifest`] into a [`ResolvedManifest`] by deciding a revision
//! for every dependency, in manifest order:
//!
//! 1. A dependency with an explicit `Rev` is passed through untouched.
//! 2. A squashed subtree takes the split revision recorded in the local log
//!    (see [`SubtreeIndex`]). A directory the log does not know about is an
//!    error, and no clone is attempted.
//! 3. Anything else is cloned into a temporary directory and pinned to the
//!    newest commit shared by the local history and the clone (see
//!    [`newest_common`]).
//!
//! Resolution is fail-fast: the first error ends the run.

use std::path::Path;

use log::{debug, info, warn};
use tempfile::TempDir;

use crate::ancestor::{newest_common, AncestorLimits};
use crate::defaults::CLONE_DIR_PREFIX;
use crate::error::{Error, Result};
use crate::history::CommitId;
use crate::manifest::{Dependency, Manifest, ResolvedDependency, ResolvedManifest};
use crate::repository::{GitOperations, Repository};
use crate::subtree::SubtreeIndex;

/// Knobs for a resolution run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Branch to clone instead of the remote's default branch.
    pub branch: Option<String>,
    pub limits: AncestorLimits,
}

/// A uniquely named scratch directory holding one remote clone.
///
/// The directory is removed when the value is dropped, on every exit path.
/// [`TempClone::remove`] does the same but logs removal failures.
pub struct TempClone {
    dir: TempDir,
}

impl TempClone {
    pub fn create() -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(CLONE_DIR_PREFIX)
            .tempdir()?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn remove(self) {
        let path = self.dir.path().to_path_buf();
        if let Err(e) = self.dir.close() {
            warn!(
                "failed to remove temporary clone {}: {}",
                path.display(),
                e
            );
        }
    }
}

/// Resolves the revisions of a manifest against one local repository.
pub struct Resolver<'a> {
    git: &'a dyn GitOperations,
    repo: &'a Repository,
    options: ResolveOptions,
    subtrees: Option<SubtreeIndex>,
}

impl<'a> Resolver<'a> {
    pub fn new(git: &'a dyn GitOperations, repo: &'a Repository) -> Self {
        Self {
            git,
            repo,
            options: ResolveOptions::default(),
            subtrees: None,
        }
    }

    pub fn with_options(mut self, options: ResolveOptions) -> Self {
        self.options = options;
        self
    }

    /// Uses an already built index instead of reading the local log.
    pub fn with_subtree_index(mut self, index: SubtreeIndex) -> Self {
        self.subtrees = Some(index);
        self
    }

    /// Resolves every dependency of `manifest`, stopping at the first error.
    pub fn resolve(&mut self, manifest: Manifest) -> Result<ResolvedManifest> {
        let mut deps = Vec::with_capacity(manifest.deps.len());
        for dep in manifest.deps {
            deps.push(self.resolve_dependency(dep)?);
        }
        Ok(ResolvedManifest {
            dir: manifest.dir,
            deps,
        })
    }

    pub fn resolve_dependency(&mut self, dep: Dependency) -> Result<ResolvedDependency> {
        if let Some(revision) = dep.pinned_revision.clone() {
            debug!("{} is pinned to {}", dep.directory, revision);
            return Ok(ResolvedDependency::from_dependency(dep, revision));
        }

        let revision = if dep.squashed_subtree {
            self.subtree_revision(&dep.directory)?
        } else {
            self.remote_revision(&dep.repository)?
        };
        info!("{} resolved to {}", dep.directory, revision);
        Ok(ResolvedDependency::from_dependency(dep, revision))
    }

    fn subtree_revision(&mut self, directory: &str) -> Result<CommitId> {
        self.subtree_index()?
            .revision_of(directory)
            .cloned()
            .ok_or_else(|| Error::NotASubtree {
                directory: directory.to_string(),
            })
    }

    /// Builds the index on first use, reading the local log once per run.
    fn subtree_index(&mut self) -> Result<&SubtreeIndex> {
        let index = match self.subtrees.take() {
            Some(index) => index,
            None => {
                let index = SubtreeIndex::load(self.git, self.repo)?;
                debug!("found {} subtrees in the local history", index.len());
                index
            }
        };
        let index: &SubtreeIndex = self.subtrees.insert(index);
        Ok(index)
    }

    fn remote_revision(&self, url: &str) -> Result<CommitId> {
        let clone = TempClone::create()?;
        debug!("cloning {} into {}", url, clone.path().display());
        let result = self.pin_against_clone(url, clone.path());
        clone.remove();
        result
    }

    fn pin_against_clone(&self, url: &str, clone_dir: &Path) -> Result<CommitId> {
        self.git
            .clone_repository(url, self.options.branch.as_deref(), clone_dir)?;
        let local = self.git.commit_ids(self.repo.root())?;
        let remote = self.git.commit_ids(clone_dir)?;
        newest_common(local, remote, url, &self.options.limits)
    }
}
