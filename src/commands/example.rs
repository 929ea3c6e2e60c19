//! # Example Command Implementation
//!
//! Prints an example dependency manifest, ready to be edited:
//!
//! ```bash
//! git-anchor example > deps.json
//! ```

use anyhow::Result;
use clap::Args;

use git_anchor::manifest::Manifest;

/// Print an example dependency manifest
#[derive(Args, Debug)]
pub struct ExampleArgs {}

/// Execute the `example` command.
pub fn execute(_args: ExampleArgs) -> Result<()> {
    println!("{}", Manifest::example().to_json_pretty()?);
    Ok(())
}
