//! CLI commands

mod completion;
mod run;

pub use completion::CompletionCommand;
pub use run::RunCommand;

use clap::{Parser, Subcommand};

/// Calconnect - Composio-backed Google Calendar connections
#[derive(Parser, Debug)]
#[command(name = "calconnect")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Dotenv file to load before reading the environment (defaults to `.env`)
    ///
    /// Global, so it can follow the subcommand: `calconnect run --env-file prod.env`.
    #[arg(long = "env-file", global = true)]
    pub env_file: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long = "json-logs", global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the Calconnect server
    Run(RunCommand),

    /// Generate shell completions
    #[command(hide = true)]
    Completion(CompletionCommand),
}
