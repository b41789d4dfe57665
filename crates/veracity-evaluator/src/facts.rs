//! Decomposing evaluations into facts and rebuilding them

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use veracity_domain::scoring::confidence;
use veracity_domain::{
    CredibilityLevel, EvaluationInput, EvaluationResult, Fact, ScoreBreakdown, Value,
};

/// Predicate names written by the evaluator
pub mod predicates {
    /// `evaluation(Content, Level, Score, Explanation)`
    pub const EVALUATION: &str = "evaluation";
    /// `evaluated_at(Content, Timestamp)`
    pub const EVALUATED_AT: &str = "evaluated_at";
    /// `reasoning(Content, Index, Sentence)`
    pub const REASONING: &str = "reasoning";

    /// `source_score(Content, Score)`
    pub const SOURCE_SCORE: &str = "source_score";
    /// `citation_score(Content, Score)`
    pub const CITATION_SCORE: &str = "citation_score";
    /// `language_score(Content, Score)`
    pub const LANGUAGE_SCORE: &str = "language_score";
    /// `contradiction_score(Content, Score)`
    pub const CONTRADICTION_SCORE: &str = "contradiction_score";

    /// `source_type(Content, Type)`
    pub const SOURCE_TYPE: &str = "source_type";
    /// `source_reputation(Content, Reputation)`
    pub const SOURCE_REPUTATION: &str = "source_reputation";
    /// `source_url(Content, Url)`
    pub const SOURCE_URL: &str = "source_url";
    /// `source_domain(Content, Domain)`
    pub const SOURCE_DOMAIN: &str = "source_domain";

    /// `author_anonymous(Content, Bool)`
    pub const AUTHOR_ANONYMOUS: &str = "author_anonymous";
    /// `author_expert(Content, Bool)`
    pub const AUTHOR_EXPERT: &str = "author_expert";
    /// `author_name(Content, Name)`
    pub const AUTHOR_NAME: &str = "author_name";

    /// `has_emotional_language(Content, Bool)`
    pub const HAS_EMOTIONAL_LANGUAGE: &str = "has_emotional_language";
    /// `has_citations(Content, Bool)`
    pub const HAS_CITATIONS: &str = "has_citations";
    /// `citation_count(Content, Count)`
    pub const CITATION_COUNT: &str = "citation_count";
    /// `has_references(Content, Bool)`
    pub const HAS_REFERENCES: &str = "has_references";
    /// `publication_date(Content, Date)`
    pub const PUBLICATION_DATE: &str = "publication_date";
}

use predicates::*;

/// Every fact recorded for one evaluation, `evaluation` last
pub fn evaluation_facts(id: &str, input: &EvaluationInput, result: &EvaluationResult) -> Vec<Fact> {
    let about = |predicate: &str, value: Value| Fact::new(predicate, vec![Value::text(id), value]);
    let mut facts = Vec::new();

    // Source
    facts.push(about(SOURCE_TYPE, input.source.source_type.as_str().into()));
    facts.push(about(SOURCE_REPUTATION, input.source.reputation.into()));
    if let Some(url) = &input.source.url {
        facts.push(about(SOURCE_URL, url.as_str().into()));
    }
    if let Some(domain) = &input.source.domain {
        facts.push(about(SOURCE_DOMAIN, domain.as_str().into()));
    }

    // Author
    facts.push(about(AUTHOR_ANONYMOUS, input.author.is_anonymous.into()));
    facts.push(about(AUTHOR_EXPERT, input.author.known_expert.into()));
    if let Some(name) = &input.author.name {
        facts.push(about(AUTHOR_NAME, name.as_str().into()));
    }

    // Metadata
    let metadata = &input.metadata;
    facts.push(about(HAS_EMOTIONAL_LANGUAGE, metadata.has_emotional_language.into()));
    facts.push(about(HAS_CITATIONS, metadata.has_citations.into()));
    facts.push(about(CITATION_COUNT, metadata.citation_count.into()));
    facts.push(about(HAS_REFERENCES, metadata.has_references.into()));
    if let Some(date) = &metadata.publication_date {
        facts.push(about(PUBLICATION_DATE, date.as_str().into()));
    }

    // Scores
    let breakdown = &result.breakdown;
    facts.push(about(SOURCE_SCORE, breakdown.source_score.into()));
    facts.push(about(CITATION_SCORE, breakdown.citation_score.into()));
    facts.push(about(LANGUAGE_SCORE, breakdown.language_score.into()));
    facts.push(about(CONTRADICTION_SCORE, breakdown.contradiction_score.into()));

    for (index, sentence) in result.reasoning.iter().enumerate() {
        facts.push(Fact::new(
            REASONING,
            vec![
                Value::text(id),
                Value::Number(index as f64),
                Value::text(sentence.as_str()),
            ],
        ));
    }

    facts.push(about(EVALUATED_AT, result.timestamp.to_rfc3339().into()));

    facts.push(
        Fact::new(
            EVALUATION,
            vec![
                Value::text(id),
                Value::text(result.level.as_str()),
                Value::Number(result.score),
                Value::text(result.explanation()),
            ],
        )
        .with_comment(format!("confidence {}", Value::Number(result.confidence))),
    );

    facts
}

/// Rebuild a result from the facts recorded for one content identifier
///
/// The latest `evaluation` fact wins, as does the latest fact of each
/// sibling predicate. Returns `None` when the evaluation or any of the four
/// score facts is missing.
pub fn rebuild_result(facts: &[Fact]) -> Option<EvaluationResult> {
    let evaluation = latest(facts, EVALUATION, 4)?;
    let score = evaluation.arg(2)?.as_number()?;
    let level = evaluation
        .arg(1)
        .and_then(|v| CredibilityLevel::parse(&v.to_string()))
        .unwrap_or_else(|| CredibilityLevel::from_score(score));
    let explanation = evaluation.arg(3).map(|v| v.to_string()).unwrap_or_default();

    let number = |predicate: &str| latest(facts, predicate, 2)?.arg(1)?.as_number();
    let breakdown = ScoreBreakdown {
        source_score: number(SOURCE_SCORE)?,
        citation_score: number(CITATION_SCORE)?,
        language_score: number(LANGUAGE_SCORE)?,
        contradiction_score: number(CONTRADICTION_SCORE)?,
    };

    let timestamp = latest(facts, EVALUATED_AT, 2)
        .and_then(|f| f.arg(1)?.as_text().map(str::to_string))
        .and_then(|s| DateTime::parse_from_rfc3339(s.trim()).ok())
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_else(Utc::now);

    Some(EvaluationResult {
        score,
        level,
        breakdown,
        reasoning: rebuild_reasoning(facts, &explanation),
        confidence: confidence(&breakdown),
        timestamp,
    })
}

fn latest<'a>(facts: &'a [Fact], predicate: &str, arity: usize) -> Option<&'a Fact> {
    facts
        .iter()
        .rev()
        .find(|f| f.predicate == predicate && f.arity() == arity)
}

/// Ordered reasoning sentences, latest per index
///
/// Sentences left over from an older, longer evaluation would not join into
/// the current explanation; in that case the explanation itself is used.
fn rebuild_reasoning(facts: &[Fact], explanation: &str) -> Vec<String> {
    let mut by_index = BTreeMap::new();
    for fact in facts.iter().filter(|f| f.predicate == REASONING && f.arity() == 3) {
        let index = fact.arguments[1].as_number();
        if let Some(index) = index.filter(|n| *n >= 0.0 && n.fract() == 0.0) {
            by_index.insert(index as usize, fact.arguments[2].to_string());
        }
    }

    let mut sentences = Vec::new();
    for (expected, (index, sentence)) in by_index.into_iter().enumerate() {
        if index != expected {
            break;
        }
        sentences.push(sentence);
    }

    if sentences.join(" ") == explanation {
        sentences
    } else if explanation.is_empty() {
        Vec::new()
    } else {
        vec![explanation.to_string()]
    }
}
