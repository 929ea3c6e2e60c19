//! # git-anchor CLI
//!
//! This is the binary entry point for the `git-anchor` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Installing the logger.
//! - Executing the appropriate command and reporting errors.
//!
//! The resolution logic lives in the library crate (`lib.rs`); the binary
//! is a thin wrapper around it.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
