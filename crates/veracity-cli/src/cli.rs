//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Veracity CLI - Score content credibility and inspect the fact store.
#[derive(Debug, Parser)]
#[command(name = "veracity")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "VERACITY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Fact store path (overrides the configured one)
    #[arg(short, long, global = true, env = "VERACITY_STORE")]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (minimal)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Evaluate the credibility of a JSON input
    Evaluate(EvaluateArgs),

    /// List stored facts
    Facts(FactsArgs),

    /// Check the fact store for lines readers skip
    Verify(VerifyArgs),

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Arguments for the evaluate command.
#[derive(Debug, Parser)]
pub struct EvaluateArgs {
    /// JSON file with the evaluation input ('-' for stdin)
    #[arg(default_value = "-")]
    pub input: String,
}

/// Arguments for the facts command.
#[derive(Debug, Default, Parser)]
pub struct FactsArgs {
    /// Filter by predicate name
    #[arg(short, long)]
    pub predicate: Option<String>,

    /// Argument equals value (INDEX=VALUE, repeatable)
    #[arg(long = "eq", value_name = "INDEX=VALUE")]
    pub equals: Vec<String>,

    /// Argument contains text (INDEX=TEXT, repeatable)
    #[arg(long, value_name = "INDEX=TEXT")]
    pub contains: Vec<String>,

    /// Numeric argument at least (INDEX=NUMBER, repeatable)
    #[arg(long, value_name = "INDEX=NUMBER")]
    pub min: Vec<String>,

    /// Numeric argument at most (INDEX=NUMBER, repeatable)
    #[arg(long, value_name = "INDEX=NUMBER")]
    pub max: Vec<String>,

    /// Maximum number of results
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for the verify command.
#[derive(Debug, Parser)]
pub struct VerifyArgs {
    /// Exit with an error when any line is skipped
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Show the configuration file path
    Path,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
