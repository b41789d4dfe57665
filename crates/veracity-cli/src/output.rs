//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use std::path::Path;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};
use veracity_domain::{CredibilityLevel, Fact};
use veracity_evaluator::Evaluation;
use veracity_store::term::encode_fact;
use veracity_store::ScanReport;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format an evaluation outcome.
    pub fn format_evaluation(&self, evaluation: &Evaluation) -> Result<String> {
        let result = &evaluation.result;
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
            OutputFormat::Quiet => Ok(format!("{} {}", result.score, result.level)),
            OutputFormat::Table => {
                let breakdown = &result.breakdown;
                let mut builder = Builder::default();
                builder.push_record(["Field", "Value"]);
                builder.push_record(["Score".to_string(), format!("{:.2}", result.score)]);
                builder.push_record(["Level".to_string(), self.level(result.level)]);
                builder.push_record(["Confidence".to_string(), format!("{:.2}", result.confidence)]);
                builder.push_record(["Source".to_string(), format!("{:.2}", breakdown.source_score)]);
                builder.push_record(["Citations".to_string(), format!("{:.2}", breakdown.citation_score)]);
                builder.push_record(["Language".to_string(), format!("{:.2}", breakdown.language_score)]);
                builder.push_record([
                    "Contradiction".to_string(),
                    format!("{:.2}", breakdown.contradiction_score),
                ]);
                builder.push_record(["Evaluated".to_string(), result.timestamp.to_rfc3339()]);
                builder.push_record([
                    "Cached".to_string(),
                    if evaluation.cached { "yes" } else { "no" }.to_string(),
                ]);

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));

                let mut out = table.to_string();
                for sentence in &result.reasoning {
                    out.push_str("\n  ");
                    out.push_str(sentence);
                }
                Ok(out)
            }
        }
    }

    /// Format facts output.
    pub fn format_facts(&self, facts: &[Fact]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(facts)?),
            // Quiet prints the store's own line format
            OutputFormat::Quiet => Ok(facts
                .iter()
                .map(encode_fact)
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if facts.is_empty() {
                    return Ok(self.colorize("No facts found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Predicate", "Arguments", "Comment"]);
                for fact in facts {
                    let arguments = fact
                        .arguments
                        .iter()
                        .map(|a| truncate(&a.to_string(), 60))
                        .collect::<Vec<_>>()
                        .join(" | ");
                    builder.push_record([
                        fact.predicate.clone(),
                        arguments,
                        fact.comment.clone().unwrap_or_default(),
                    ]);
                }

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                Ok(table.to_string())
            }
        }
    }

    /// Format a store health report.
    pub fn format_scan(&self, path: &Path, report: &ScanReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let skipped: Vec<serde_json::Value> = report
                    .skipped
                    .iter()
                    .map(|s| {
                        serde_json::json!({
                            "line": s.line_number,
                            "text": s.text,
                            "reason": s.reason.to_string(),
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&serde_json::json!({
                    "path": path.display().to_string(),
                    "facts": report.facts.len(),
                    "commentLines": report.comment_lines,
                    "skipped": skipped,
                }))?)
            }
            OutputFormat::Quiet => Ok(report
                .skipped
                .iter()
                .map(|s| s.line_number.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                let summary = format!(
                    "{}: {} fact(s), {} comment line(s), {} skipped",
                    path.display(),
                    report.facts.len(),
                    report.comment_lines,
                    report.skipped.len()
                );
                if report.is_clean() {
                    return Ok(self.success(&summary));
                }

                let mut builder = Builder::default();
                builder.push_record(["Line", "Reason", "Text"]);
                for line in &report.skipped {
                    builder.push_record([
                        line.line_number.to_string(),
                        line.reason.to_string(),
                        truncate(&line.text, 60),
                    ]);
                }
                let mut table = builder.build();
                table.with(Style::rounded());

                Ok(format!("{}\n{}", self.warning(&summary), table))
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn level(&self, level: CredibilityLevel) -> String {
        let color = match level {
            CredibilityLevel::Credible => "green",
            CredibilityLevel::Doubtful => "yellow",
            CredibilityLevel::Suspect => "red",
        };
        self.colorize(level.as_str(), color)
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Shorten long cell text, marking the cut with an ellipsis.
fn truncate(text: &str, max_chars: usize) -> String {
    let flat = text.replace(['\n', '\r'], " ");
    if flat.chars().count() <= max_chars {
        return flat;
    }
    let mut cut: String = flat.chars().take(max_chars.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
