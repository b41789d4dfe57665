//! Facts command implementation.

use crate::cli::FactsArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::collections::BTreeMap;
use std::path::Path;
use veracity_domain::{Condition, FactQuery, FactStore, Value};
use veracity_store::FileFactStore;

/// Execute the facts command.
pub fn execute_facts(args: FactsArgs, store_path: &Path, formatter: &Formatter) -> Result<()> {
    let query = build_query(&args)?;
    let store = FileFactStore::open(store_path)?;
    let facts = store.list(&query)?;

    println!("{}", formatter.format_facts(&facts)?);
    Ok(())
}

/// Turn command-line filters into a query.
///
/// `--min` and `--max` on the same index combine into one range.
pub fn build_query(args: &FactsArgs) -> Result<FactQuery> {
    let mut query = match &args.predicate {
        Some(predicate) => FactQuery::predicate(predicate.as_str()),
        None => FactQuery::all(),
    };

    for raw in &args.equals {
        let (index, value) = split_filter(raw)?;
        query = query.with_condition(index, Condition::Equals(Value::text(value)));
    }
    for raw in &args.contains {
        let (index, text) = split_filter(raw)?;
        query = query.with_condition(index, Condition::Contains(text.to_string()));
    }

    let mut ranges: BTreeMap<usize, (Option<f64>, Option<f64>)> = BTreeMap::new();
    for raw in &args.min {
        let (index, bound) = split_filter(raw)?;
        ranges.entry(index).or_default().0 = Some(parse_bound(raw, bound)?);
    }
    for raw in &args.max {
        let (index, bound) = split_filter(raw)?;
        ranges.entry(index).or_default().1 = Some(parse_bound(raw, bound)?);
    }
    for (index, (min, max)) in ranges {
        query = query.with_condition(index, Condition::Range { min, max });
    }

    if let Some(limit) = args.limit {
        query = query.with_limit(limit);
    }
    Ok(query)
}

/// Split `INDEX=VALUE`
fn split_filter(raw: &str) -> Result<(usize, &str)> {
    let (index, value) = raw
        .split_once('=')
        .ok_or_else(|| CliError::InvalidInput(format!("expected INDEX=VALUE, got '{}'", raw)))?;
    let index = index
        .trim()
        .parse()
        .map_err(|_| CliError::InvalidInput(format!("invalid argument index in '{}'", raw)))?;
    Ok((index, value))
}

fn parse_bound(raw: &str, bound: &str) -> Result<f64> {
    bound
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| CliError::InvalidInput(format!("'{}' is not a number bound", raw)))
}
