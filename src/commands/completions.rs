//! # Completions Command Implementation
//!
//! Writes a shell completion script for `git-anchor` to stdout, generated by
//! `clap_complete` from the CLI definition.
//!
//! ```bash
//! git-anchor completions bash > ~/.local/share/bash-completion/completions/git-anchor
//! git-anchor completions zsh > ~/.zfunc/_git-anchor
//! ```

use anyhow::Result;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use std::io;

use crate::cli::Cli;

/// Generate shell completion scripts
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// The shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Execute the `completions` command.
pub fn execute(args: CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(args.shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
