//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use git_anchor::output::OutputConfig;

use crate::commands;

/// git-anchor - Pin git dependencies and generate a script that verifies them
#[derive(Parser, Debug)]
#[command(name = "git-anchor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve a dependency manifest and print the verification script
    Generate(commands::generate::GenerateArgs),

    /// List the git subtrees recorded in the repository history
    List(commands::list::ListArgs),

    /// Print an example dependency manifest
    Example(commands::example::ExampleArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);
        let output = OutputConfig::from_env_and_flag(&self.color);

        match self.command {
            Commands::Generate(args) => commands::generate::execute(args, &output),
            Commands::List(args) => commands::list::execute(args),
            Commands::Example(args) => commands::example::execute(args),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

/// Logs go to stderr; stdout is reserved for command output.
fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}
