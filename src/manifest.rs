//! # Dependency Manifest
//!
//! Defines the JSON manifest that declares a repository's external
//! dependencies, and the resolved form produced once every dependency has a
//! pinned revision.
//!
//! The field names match the `deps.json` files the tool has always read:
//!
//! ```json
//! {
//!   "Dir": "src/vt/lib",
//!   "Deps": [
//!     { "Repo": "github.com/gogo/protobuf", "Dir": "src/github.com/gogo/protobuf" },
//!     { "Repo": "github.com/golang/crypto", "Dir": "src/golang.org/x/crypto",
//!       "Rev": "5bcd134fee4dd1475da17714aac19c0aa0142e2f", "SquashedSubtree": true }
//!   ]
//! }
//! ```
//!
//! `Rev` and `SquashedSubtree` are optional and left out of serialized output
//! when unset.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::history::CommitId;

const EXAMPLE_HINT: &str = "Run 'git-anchor example' to print a valid manifest";

/// A single declared dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Where the dependency is cloned from.
    #[serde(rename = "Repo")]
    pub repository: String,
    /// Where the dependency lives inside the local repository.
    #[serde(rename = "Dir")]
    pub directory: String,
    /// Explicitly pinned revision; resolved automatically when absent.
    #[serde(rename = "Rev", default, skip_serializing_if = "Option::is_none")]
    pub pinned_revision: Option<CommitId>,
    /// The dependency was vendored with `git subtree --squash`, so its
    /// revision is read from the local log.
    #[serde(rename = "SquashedSubtree", default, skip_serializing_if = "is_false")]
    pub squashed_subtree: bool,
}

impl Dependency {
    pub fn new(repository: impl Into<String>, directory: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            directory: directory.into(),
            pinned_revision: None,
            squashed_subtree: false,
        }
    }

    pub fn pinned(mut self, revision: impl Into<CommitId>) -> Self {
        self.pinned_revision = Some(revision.into());
        self
    }

    pub fn squashed(mut self) -> Self {
        self.squashed_subtree = true;
        self
    }
}

/// The full dependency declaration of a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Directory that must exist where the verification script is run.
    #[serde(rename = "Dir")]
    pub dir: String,
    #[serde(rename = "Deps", default)]
    pub deps: Vec<Dependency>,
}

impl Manifest {
    /// Reads and validates a manifest file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parses and validates manifest JSON.
    ///
    /// An empty `Rev` string is treated as unpinned.
    pub fn parse(json: &str) -> Result<Self> {
        let mut manifest: Manifest =
            serde_json::from_str(json).map_err(|e| Error::ManifestInvalid {
                message: e.to_string(),
                hint: Some(EXAMPLE_HINT.to_string()),
            })?;

        for dep in &mut manifest.deps {
            if dep
                .pinned_revision
                .as_ref()
                .is_some_and(|rev| rev.as_str().trim().is_empty())
            {
                dep.pinned_revision = None;
            }
        }

        manifest.validate()?;
        Ok(manifest)
    }

    /// Checks the structural rules a manifest must satisfy.
    pub fn validate(&self) -> Result<()> {
        if self.dir.trim().is_empty() {
            return Err(invalid("the top-level Dir is empty"));
        }

        let mut seen = HashSet::new();
        for (i, dep) in self.deps.iter().enumerate() {
            if dep.repository.trim().is_empty() {
                return Err(invalid(format!("dependency #{} has an empty Repo", i + 1)));
            }
            if dep.directory.trim().is_empty() {
                return Err(invalid(format!(
                    "dependency #{} ({}) has an empty Dir",
                    i + 1,
                    dep.repository
                )));
            }
            if !seen.insert(dep.directory.as_str()) {
                return Err(invalid(format!(
                    "directory {} is declared more than once",
                    dep.directory
                )));
            }
        }
        Ok(())
    }

    /// The manifest printed by `git-anchor example`.
    pub fn example() -> Self {
        Self {
            dir: "src/vt/lib".to_string(),
            deps: vec![
                Dependency::new("github.com/gogo/protobuf", "src/github.com/gogo/protobuf"),
                Dependency::new("github.com/golang/crypto", "src/golang.org/x/crypto"),
            ],
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// A dependency with its revision decided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedDependency {
    #[serde(rename = "Repo")]
    pub repository: String,
    #[serde(rename = "Dir")]
    pub directory: String,
    #[serde(rename = "Rev")]
    pub revision: CommitId,
    #[serde(rename = "SquashedSubtree", default, skip_serializing_if = "is_false")]
    pub squashed_subtree: bool,
}

impl ResolvedDependency {
    pub fn from_dependency(dep: Dependency, revision: CommitId) -> Self {
        Self {
            repository: dep.repository,
            directory: dep.directory,
            revision,
            squashed_subtree: dep.squashed_subtree,
        }
    }
}

/// A manifest whose dependencies are all pinned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedManifest {
    #[serde(rename = "Dir")]
    pub dir: String,
    #[serde(rename = "Deps")]
    pub deps: Vec<ResolvedDependency>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn invalid(message: impl Into<String>) -> Error {
    Error::ManifestInvalid {
        message: message.into(),
        hint: Some(EXAMPLE_HINT.to_string()),
    }
}
