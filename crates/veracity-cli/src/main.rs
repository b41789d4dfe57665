//! Veracity CLI - Command-line interface for the Veracity credibility evaluator.

use anyhow::Context;
use clap::Parser;
use veracity_cli::commands;
use veracity_cli::{logging, Cli, Command, Config, Formatter};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    let config_path = Config::resolve_path(cli.config.as_deref())?;
    let config = Config::load_from(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    logging::init(&config.log_level);

    let store_path = cli.store.clone().unwrap_or_else(|| config.store_path.clone());

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Evaluate(args) => {
            commands::execute_evaluate(args, &config, &store_path, &formatter)?;
        }
        Command::Facts(args) => {
            commands::execute_facts(args, &store_path, &formatter)?;
        }
        Command::Verify(args) => {
            commands::execute_verify(args, &store_path, &formatter)?;
        }
        Command::Config(args) => {
            commands::execute_config(args, &config, &config_path, &formatter)?;
        }
    }

    Ok(())
}
