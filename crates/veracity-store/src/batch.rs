//! Store-independent text operations: append planning, filtering, scanning

use crate::term::{decode_document, decode_line, encode_fact, DecodeError, COMMENT_MARKER};
use crate::validate::validate_fact;
use crate::StoreError;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use veracity_domain::{AppendReport, Fact, FactQuery, Provenance};

/// What an append will write
#[derive(Debug)]
pub(crate) struct AppendPlan {
    /// Text to append; empty when every fact was a duplicate
    pub text: String,
    pub report: AppendReport,
}

/// Validate, deduplicate and render a batch against the current log text
///
/// Validation covers the whole batch before anything else, so one bad fact
/// rejects all of them.
pub(crate) fn plan_append(
    existing: &str,
    facts: &[Fact],
    provenance: &Provenance,
    now: DateTime<Utc>,
) -> Result<AppendPlan, StoreError> {
    for fact in facts {
        validate_fact(fact)?;
    }

    let mut seen: HashSet<(String, Vec<String>)> = decode_document(existing)
        .map(|fact| fact.normalized_key())
        .collect();

    let mut lines = Vec::new();
    let mut skipped = 0;
    for fact in facts {
        if seen.insert(fact.normalized_key()) {
            lines.push(encode_fact(fact));
        } else {
            skipped += 1;
        }
    }

    let report = AppendReport {
        appended: lines.len(),
        skipped,
    };
    if lines.is_empty() {
        return Ok(AppendPlan {
            text: String::new(),
            report,
        });
    }

    let mut text = render_header(provenance, now);
    for line in &lines {
        text.push_str(line);
        text.push('\n');
    }

    Ok(AppendPlan { text, report })
}

/// Header comment block preceding every written batch
fn render_header(provenance: &Provenance, now: DateTime<Utc>) -> String {
    let mut header = format!("\n{} Added at {}\n", COMMENT_MARKER, now.to_rfc3339());
    if let Some(source) = &provenance.source {
        header.push_str(&format!(
            "{} Source: {}\n",
            COMMENT_MARKER,
            single_line(source)
        ));
    }
    if let Some(expires_at) = provenance.expires_at {
        header.push_str(&format!(
            "{} Expires: {}\n",
            COMMENT_MARKER,
            expires_at.format("%Y-%m-%d")
        ));
    }
    header
}

/// Keep a header value on its comment line
fn single_line(s: &str) -> String {
    s.replace(['\n', '\r'], " ")
}

/// Facts in `text` matching `query`, in log order
pub(crate) fn select(text: &str, query: &FactQuery) -> Vec<Fact> {
    let matching = decode_document(text).filter(|fact| query.matches(fact));
    match query.limit {
        Some(limit) => matching.take(limit).collect(),
        None => matching.collect(),
    }
}

/// A line that looked like content but did not decode
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedLine {
    /// One-based line number
    pub line_number: usize,

    /// Raw line text
    pub text: String,

    /// Why it was skipped
    pub reason: DecodeError,
}

/// Line-by-line health report of a log
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanReport {
    /// Every fact that decoded
    pub facts: Vec<Fact>,

    /// Comment-only lines (batch headers, notes)
    pub comment_lines: usize,

    /// Lines readers ignore
    pub skipped: Vec<SkippedLine>,
}

impl ScanReport {
    /// True when no line was skipped
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

pub(crate) fn scan(text: &str) -> ScanReport {
    let mut report = ScanReport::default();
    for (index, line) in text.lines().enumerate() {
        match decode_line(line) {
            Ok(Some(fact)) => report.facts.push(fact),
            Ok(None) => {
                if line.trim_start().starts_with(COMMENT_MARKER) {
                    report.comment_lines += 1;
                }
            }
            Err(reason) => report.skipped.push(SkippedLine {
                line_number: index + 1,
                text: line.to_string(),
                reason,
            }),
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use veracity_domain::Value;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn fact(pred: &str, args: &[&str]) -> Fact {
        Fact::new(pred, args.iter().map(|a| Value::text(*a)).collect())
    }

    #[test]
    fn test_plan_writes_header_and_lines() {
        let provenance = Provenance::new("auto-evaluation")
            .with_expiry(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        let plan = plan_append("", &[fact("source_type", &["x", "news"])], &provenance, fixed_now())
            .unwrap();

        assert_eq!(
            plan.text,
            "\n% Added at 2024-03-01T12:00:00+00:00\n\
             % Source: auto-evaluation\n\
             % Expires: 2025-03-01\n\
             source_type(x, news).\n"
        );
        assert_eq!(plan.report, AppendReport { appended: 1, skipped: 0 });
    }

    #[test]
    fn test_header_without_provenance() {
        let plan = plan_append("", &[fact("note", &["a"])], &Provenance::default(), fixed_now())
            .unwrap();
        assert_eq!(plan.text, "\n% Added at 2024-03-01T12:00:00+00:00\nnote(a).\n");
    }

    #[test]
    fn test_dedup_against_existing_and_within_batch() {
        let existing = "source_score('Some Claim', 70).\n";
        let batch = [
            Fact::new("source_score", vec!["some claim".into(), Value::Number(70.0)]),
            fact("citation_score", &["some claim", "0"]),
            Fact::new("citation_score", vec!["SOME CLAIM".into(), Value::Number(0.0)]),
        ];
        let plan = plan_append(existing, &batch, &Provenance::default(), fixed_now()).unwrap();

        assert_eq!(plan.report, AppendReport { appended: 1, skipped: 2 });
        assert!(plan.text.contains("citation_score('some claim', '0')."));
        assert!(!plan.text.contains("source_score"));
    }

    #[test]
    fn test_all_duplicates_write_nothing() {
        let plan = plan_append(
            "note(a).\n",
            &[fact("note", &["A"])],
            &Provenance::new("x"),
            fixed_now(),
        )
        .unwrap();
        assert!(plan.text.is_empty(), "No header for an empty batch");
        assert_eq!(plan.report.skipped, 1);
    }

    #[test]
    fn test_invalid_fact_rejects_batch() {
        let batch = [fact("note", &["fine"]), fact("Bad", &["x"])];
        let result = plan_append("", &batch, &Provenance::default(), fixed_now());
        assert!(matches!(result, Err(StoreError::InvalidFact { .. })));
    }

    #[test]
    fn test_source_newlines_stay_in_header() {
        let plan = plan_append(
            "",
            &[fact("note", &["a"])],
            &Provenance::new("multi\nline"),
            fixed_now(),
        )
        .unwrap();
        assert!(plan.text.contains("% Source: multi line\n"));
    }

    #[test]
    fn test_select_honors_limit_and_order() {
        let text = "note(a).\nnote(b).\nother(c).\nnote(d).\n";
        let found = select(text, &FactQuery::predicate("note").with_limit(2));
        let firsts: Vec<String> = found.iter().map(|f| f.arguments[0].to_string()).collect();
        assert_eq!(firsts, vec!["a", "b"]);
    }

    #[test]
    fn test_scan_classifies_lines() {
        let text = "% header\n\nnote(a).\nbroken(\nrule(X) :- note(X).\nnote(b).\n";
        let report = scan(text);

        assert_eq!(report.facts.len(), 2);
        assert_eq!(report.comment_lines, 1);
        assert_eq!(report.skipped.len(), 2);
        assert_eq!(report.skipped[0].line_number, 4);
        assert_eq!(report.skipped[1].reason, DecodeError::RuleClause);
        assert!(!report.is_clean());
    }
}
