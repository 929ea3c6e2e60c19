//! # List Command Implementation
//!
//! This module implements the `list` subcommand, which prints every directory
//! recorded as a `git subtree` in the repository history together with the
//! upstream revision it was last synchronized to, one `dir:rev` pair per
//! line, sorted by directory.
//!
//! This command is a read-only operation.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use git_anchor::repository::{DefaultGitOperations, Repository};
use git_anchor::subtree::SubtreeIndex;
use git_anchor::suggestions;

/// List the git subtrees recorded in the repository history
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Root of the repository whose history is searched.
    ///
    /// Defaults to the current working directory.
    #[arg(long, value_name = "DIR", env = "GIT_ANCHOR_REPO")]
    pub repo: Option<PathBuf>,
}

/// Execute the `list` command.
pub fn execute(args: ListArgs) -> Result<()> {
    let repo_dir = match args.repo {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };
    let repo = Repository::open(&repo_dir).map_err(suggestions::explain)?;

    let index = SubtreeIndex::load(&DefaultGitOperations, &repo)?;

    println!("list of subtrees in current git repo");
    if !index.is_empty() {
        println!("{}", index);
    }
    Ok(())
}
