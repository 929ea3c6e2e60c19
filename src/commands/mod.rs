//! # CLI Command Implementations
//!
//! Each subcommand of the `git-anchor` tool lives in its own file and
//! provides:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and calls into the
//!   `git_anchor` library.

pub mod completions;
pub mod example;
pub mod generate;
pub mod list;
