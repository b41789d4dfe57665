//! Integration tests for the Evaluator over the file-backed store
//!
//! These tests verify that verdicts survive the text log and a restart.

use std::fs;
use std::sync::Arc;
use tempfile::TempDir;
use veracity_domain::{
    AuthorInfo, ContentMetadata, CredibilityLevel, CredibilityScorer, EvaluationInput,
    FactQuery, FactStore, SourceInfo, SourceType,
};
use veracity_evaluator::{Evaluator, EvaluatorConfig};
use veracity_store::FileFactStore;

fn blog_input(content: &str) -> EvaluationInput {
    EvaluationInput {
        content: content.to_string(),
        source: SourceInfo {
            source_type: SourceType::Blog,
            reputation: 0.55,
            url: Some("https://blog.example/post?id=7".to_string()),
            domain: Some("blog.example".to_string()),
        },
        author: AuthorInfo {
            is_anonymous: false,
            known_expert: false,
            name: Some("Sam".to_string()),
        },
        metadata: ContentMetadata {
            has_emotional_language: false,
            has_citations: true,
            citation_count: 2,
            has_references: false,
            publication_date: None,
        },
    }
}

#[test]
fn test_verdict_survives_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("facts.pl");
    let input = blog_input("Why 'local-first' software matters\n(part 2)");

    let first = {
        let store = FileFactStore::open(&path).unwrap();
        let evaluator = Evaluator::new(store, CredibilityScorer::new(), EvaluatorConfig::default());
        evaluator.evaluate_detailed(&input)
    };
    assert!(first.persisted);

    let store = FileFactStore::open(&path).unwrap();
    let evaluator = Evaluator::new(store, CredibilityScorer::new(), EvaluatorConfig::default());
    let second = evaluator.evaluate_detailed(&input);

    assert!(second.cached, "A new handle should find the stored verdict");
    assert_eq!(first.result, second.result);

    // Source 55, citations 40, language 100 - 20 (undated) = 80, contradiction 80
    // 22 + 12 + 16 + 8 = 58
    assert_eq!(second.result.score, 58.0);
    assert_eq!(second.result.level, CredibilityLevel::Doubtful);
}

#[test]
fn test_shared_handle_across_evaluators() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(FileFactStore::open(dir.path().join("facts.pl")).unwrap());

    let a = Evaluator::new(Arc::clone(&store), CredibilityScorer::new(), EvaluatorConfig::default());
    let b = Evaluator::new(Arc::clone(&store), CredibilityScorer::new(), EvaluatorConfig::default());

    assert!(!a.evaluate_detailed(&blog_input("Shared topic")).cached);
    assert!(b.evaluate_detailed(&blog_input("shared topic")).cached);

    let evaluations = store.list(&FactQuery::predicate("evaluation")).unwrap();
    assert_eq!(evaluations.len(), 1);
}

#[test]
fn test_hand_edited_garbage_does_not_break_evaluation() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("facts.pl");
    fs::write(&path, "this is not a fact\nevaluation(broken\n").unwrap();

    let store = FileFactStore::open(&path).unwrap();
    let evaluator = Evaluator::new(store, CredibilityScorer::new(), EvaluatorConfig::default());
    let outcome = evaluator.evaluate_detailed(&blog_input("Anything at all"));

    assert!(outcome.persisted);
    let report = evaluator.store().scan().unwrap();
    assert_eq!(report.skipped.len(), 2);
    assert!(report.facts.iter().any(|f| f.predicate == "evaluation"));
}
