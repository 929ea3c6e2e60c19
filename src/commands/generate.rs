//! # Generate Command Implementation
//!
//! This module implements the `generate` subcommand, the main entry point of
//! the tool:
//!
//! 1. Load and validate the dependency manifest.
//! 2. Resolve a revision for every dependency (explicit pin, subtree split
//!    revision, or newest commit shared with a fresh clone).
//! 3. Render the verification script to stdout or to `--output`.
//!
//! Progress is reported on stderr so the script can be redirected:
//!
//! ```bash
//! git-anchor generate deps.json > deps.sh
//! ```

use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;

use git_anchor::ancestor::AncestorLimits;
use git_anchor::defaults::{
    DEFAULT_MANIFEST_FILENAME, DEFAULT_MAX_REMOTE_COMMITS, DEFAULT_SCRIPT_LANGUAGE,
};
use git_anchor::manifest::Manifest;
use git_anchor::output::{status, OutputConfig};
use git_anchor::repository::{DefaultGitOperations, Repository};
use git_anchor::resolve::{ResolveOptions, Resolver};
use git_anchor::script::{self, ScriptLanguage};
use git_anchor::suggestions;

/// Resolve a dependency manifest and print the verification script
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Path to the JSON manifest describing the dependencies.
    #[arg(
        value_name = "MANIFEST",
        env = "GIT_ANCHOR_MANIFEST",
        default_value = DEFAULT_MANIFEST_FILENAME
    )]
    pub manifest: PathBuf,

    /// Language of the generated script.
    #[arg(short, long, value_name = "LANG", default_value = DEFAULT_SCRIPT_LANGUAGE)]
    pub lang: String,

    /// Root of the repository whose history is searched.
    ///
    /// Defaults to the current working directory.
    #[arg(long, value_name = "DIR", env = "GIT_ANCHOR_REPO")]
    pub repo: Option<PathBuf>,

    /// Branch to clone for remote dependencies instead of their default branch.
    #[arg(long, value_name = "NAME", env = "GIT_ANCHOR_BRANCH")]
    pub branch: Option<String>,

    /// Give up on a remote whose history has more commits than this.
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_REMOTE_COMMITS)]
    pub max_remote_commits: usize,

    /// Write the script to this file instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Execute the `generate` command.
pub fn execute(args: GenerateArgs, output: &OutputConfig) -> Result<()> {
    let language: ScriptLanguage = args.lang.parse()?;

    let repo_dir = match args.repo {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };
    let repo = Repository::open(&repo_dir).map_err(suggestions::explain)?;

    if !args.manifest.exists() {
        return Err(suggestions::manifest_not_found(&args.manifest));
    }
    let manifest = Manifest::from_file(&args.manifest).map_err(|e| {
        anyhow::anyhow!(
            "Failed to load manifest from {}: {}",
            args.manifest.display(),
            e
        )
    })?;

    eprintln!(
        "{}",
        status(
            output,
            "🔍",
            "[RESOLVE]",
            &format!(
                "Resolving {} dependencies from {}",
                manifest.deps.len(),
                args.manifest.display()
            ),
        )
    );

    let options = ResolveOptions {
        branch: args.branch,
        limits: AncestorLimits {
            max_remote_commits: args.max_remote_commits,
        },
    };
    let git = DefaultGitOperations;
    let resolved = Resolver::new(&git, &repo)
        .with_options(options)
        .resolve(manifest)
        .map_err(suggestions::explain)?;

    let rendered = script::render(language, &resolved);
    match &args.output {
        Some(path) => {
            fs::write(path, &rendered)
                .with_context(|| format!("Failed to write script to {}", path.display()))?;
            eprintln!(
                "{}",
                status(
                    output,
                    "✅",
                    "[OK]",
                    &format!(
                        "Pinned {} dependencies, {} script written to {}",
                        resolved.deps.len(),
                        language,
                        path.display()
                    ),
                )
            );
        }
        None => {
            print!("{}", rendered);
            eprintln!(
                "{}",
                status(
                    output,
                    "✅",
                    "[OK]",
                    &format!("Pinned {} dependencies", resolved.deps.len()),
                )
            );
        }
    }

    Ok(())
}
