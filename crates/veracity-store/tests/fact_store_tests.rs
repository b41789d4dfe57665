//! Integration tests for veracity-store
//!
//! These tests drive the file-backed store through the FactStore trait.

use std::fs;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;
use veracity_domain::{Condition, Fact, FactQuery, FactStore, Provenance, Value};
use veracity_store::{FileFactStore, StoreError};

fn open_store(dir: &TempDir) -> FileFactStore {
    FileFactStore::open(dir.path().join("facts.pl")).expect("store should open")
}

fn evaluation(content: &str, level: &str, score: f64, explanation: &str) -> Fact {
    Fact::new(
        "evaluation",
        vec![
            content.into(),
            level.into(),
            Value::Number(score),
            explanation.into(),
        ],
    )
}

#[test]
fn test_append_then_list_round_trip() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);
    let fact = evaluation("it's a claim", "doubtful", 42.5, "Needs checking.")
        .with_comment("confidence 15");

    let report = store.append(&[fact.clone()], &Provenance::new("test")).unwrap();
    assert_eq!(report.appended, 1);

    let found = store.list(&FactQuery::predicate("evaluation")).unwrap();
    assert_eq!(found, vec![fact], "Stored fact should decode unchanged");
}

#[test]
fn test_idempotent_insert() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);
    let fact = evaluation("Vaccines work", "credible", 98.0, "Sourced.");

    store.append(&[fact.clone()], &Provenance::default()).unwrap();
    let second = store.append(&[fact], &Provenance::default()).unwrap();

    assert_eq!(second.appended, 0);
    assert_eq!(second.skipped, 1);
    assert_eq!(store.list(&FactQuery::all()).unwrap().len(), 1);
}

#[test]
fn test_idempotent_against_hand_written_triple_quotes() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("facts.pl");
    fs::write(
        &path,
        "% imported by hand\nevaluation('''Vaccines Work''', credible, 98.00, '''Sourced.''').\n",
    )
    .unwrap();
    let store = FileFactStore::open(&path).unwrap();

    let report = store
        .append(
            &[evaluation("vaccines work", "credible", 98.0, "sourced.")],
            &Provenance::default(),
        )
        .unwrap();

    assert_eq!(report.appended, 0, "Normalized duplicate must be skipped");
    assert_eq!(store.list(&FactQuery::all()).unwrap().len(), 1);
}

#[test]
fn test_malformed_line_does_not_hide_other_facts() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("facts.pl");
    fs::write(
        &path,
        "note(first).\n\
         note('unterminated).\n\
         rule(X) :- note(X).\n\
         note(Variable).\n\
         note(second).\n",
    )
    .unwrap();
    let store = FileFactStore::open(&path).unwrap();

    let found = store.list(&FactQuery::predicate("note")).unwrap();
    let names: Vec<String> = found.iter().map(|f| f.arguments[0].to_string()).collect();
    assert_eq!(names, vec!["first", "second"]);

    let scan = store.scan().unwrap();
    let skipped: Vec<usize> = scan.skipped.iter().map(|s| s.line_number).collect();
    assert_eq!(skipped, vec![2, 3, 4]);
}

#[test]
fn test_invalid_fact_rejects_whole_batch() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);

    let result = store.append(
        &[
            Fact::new("note", vec!["fine".into()]),
            Fact::new("note", vec!["head :- body".into()]),
        ],
        &Provenance::default(),
    );

    match result {
        Err(StoreError::InvalidFact { predicate, .. }) => assert_eq!(predicate, "note"),
        other => panic!("Expected InvalidFact, got {:?}", other),
    }
    assert!(!store.path().exists(), "Nothing may be written");
}

#[test]
fn test_batch_header_format() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);
    let expires = chrono::NaiveDate::from_ymd_opt(2030, 1, 31).unwrap();

    store
        .append(
            &[Fact::new("note", vec!["a".into()])],
            &Provenance::new("auto-evaluation").with_expiry(expires),
        )
        .unwrap();

    let text = fs::read_to_string(store.path()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "");
    assert!(lines[1].starts_with("% Added at "), "got {:?}", lines[1]);
    assert!(
        chrono::DateTime::parse_from_rfc3339(&lines[1]["% Added at ".len()..]).is_ok(),
        "Timestamp should be RFC 3339"
    );
    assert_eq!(lines[2], "% Source: auto-evaluation");
    assert_eq!(lines[3], "% Expires: 2030-01-31");
    assert_eq!(lines[4], "note(a).");
}

#[test]
fn test_concurrent_appends_of_equal_facts() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(open_store(&dir));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                // Same fact, differently spelled per thread
                let content = if i % 2 == 0 { "Shared Claim" } else { "shared claim " };
                store
                    .append(
                        &[Fact::new("source_type", vec![content.into(), "news".into()])],
                        &Provenance::default(),
                    )
                    .unwrap()
                    .appended
            })
        })
        .collect();

    let appended: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(appended, 1, "Exactly one writer should win");
    assert_eq!(store.list(&FactQuery::all()).unwrap().len(), 1);
}

#[test]
fn test_filters() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);
    store
        .append(
            &[
                evaluation("claim one", "suspect", 14.0, "x"),
                evaluation("claim two", "doubtful", 45.0, "y"),
                evaluation("another thing", "credible", 98.0, "z"),
            ],
            &Provenance::default(),
        )
        .unwrap();

    let by_level = store
        .list(&FactQuery::predicate("evaluation").with_arg(1, "CREDIBLE"))
        .unwrap();
    assert_eq!(by_level.len(), 1);

    let by_range = store
        .list(&FactQuery::predicate("evaluation").with_condition(
            2,
            Condition::Range {
                min: Some(10.0),
                max: Some(50.0),
            },
        ))
        .unwrap();
    assert_eq!(by_range.len(), 2);

    let by_text = store
        .list(
            &FactQuery::all()
                .with_condition(0, Condition::Contains("claim".into()))
                .with_limit(1),
        )
        .unwrap();
    assert_eq!(by_text.len(), 1);
    assert_eq!(by_text[0].arguments[0], Value::text("claim one"));
}
