//! Evaluate command implementation.

use crate::cli::EvaluateArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::fs;
use std::io::Read;
use std::path::Path;
use veracity_domain::EvaluationInput;
use veracity_evaluator::{Evaluation, Evaluator};
use veracity_gatekeeper::Gatekeeper;
use veracity_store::FileFactStore;

/// Execute the evaluate command.
pub fn execute_evaluate(
    args: EvaluateArgs,
    config: &Config,
    store_path: &Path,
    formatter: &Formatter,
) -> Result<()> {
    let input = read_input(&args.input)?;
    let evaluation = evaluate(&input, config, store_path)?;

    println!("{}", formatter.format_evaluation(&evaluation)?);
    if !evaluation.cached && !evaluation.persisted {
        eprintln!(
            "{}",
            formatter.warning("The evaluation could not be saved to the fact store.")
        );
    }

    Ok(())
}

/// Validate the input, then evaluate it against the store at `store_path`.
pub fn evaluate(input: &EvaluationInput, config: &Config, store_path: &Path) -> Result<Evaluation> {
    Gatekeeper::new(config.gatekeeper.clone()).check(input)?;

    let store = FileFactStore::open(store_path)?;
    let evaluator = Evaluator::new(store, config.scoring.scorer(), config.evaluator.clone());
    Ok(evaluator.evaluate_detailed(input))
}

/// Read an evaluation input from a file, or stdin for `-`.
pub fn read_input(source: &str) -> Result<EvaluationInput> {
    let text = if source == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(source)?
    };
    parse_input(&text)
}

/// Parse an evaluation input from JSON text.
pub fn parse_input(text: &str) -> Result<EvaluationInput> {
    if text.trim().is_empty() {
        return Err(CliError::InvalidInput("no evaluation input given".to_string()));
    }
    Ok(serde_json::from_str(text)?)
}
