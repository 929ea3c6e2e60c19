//! Default values for git-anchor.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

/// Manifest read by `generate` when no path is given.
///
/// Can be overridden positionally or with the `GIT_ANCHOR_MANIFEST`
/// environment variable.
pub const DEFAULT_MANIFEST_FILENAME: &str = "deps.json";

/// Prefix of the temporary directories remote dependencies are cloned into.
pub const CLONE_DIR_PREFIX: &str = "dep_";

/// Upper bound on the number of commits read from a cloned remote.
pub const DEFAULT_MAX_REMOTE_COMMITS: usize = 10_000_000;

/// Language of the generated verification script.
pub const DEFAULT_SCRIPT_LANGUAGE: &str = "bash";
