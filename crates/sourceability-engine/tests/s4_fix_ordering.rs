//! Fix plans must order critical, multi-question problems ahead of
//! narrower ones, and the Tier C impact estimate must keep its
//! min <= expected <= max invariant.

use sourceability_fixes::{FixGenerator, FixGeneratorConfig, ReasonCode, TierCEstimator};
use sourceability_simulation::{RetrievedContext, QuestionResult, SignalMatch, SimulationResult};
use sourceability_types::model::{Answerability, Category, ConfidenceLevel, Difficulty};
use std::collections::HashMap;

/// Relevance at or above the 0.4 floor, so the diagnosis falls through
/// the "low average relevance" precedence step and reaches the
/// signal-coverage step below it.
fn adequate_relevance_context(preview: &str) -> RetrievedContext {
    RetrievedContext {
        chunks: Vec::new(),
        total_chunks: 2,
        avg_relevance_score: 0.5,
        max_relevance_score: 0.5,
        source_pages: Vec::new(),
        content_preview: preview.to_string(),
    }
}

/// Relevance below the 0.4 floor, which the precedence order diagnoses
/// as `BuriedAnswer` directly, ahead of any signal-coverage check.
fn low_relevance_context(preview: &str) -> RetrievedContext {
    RetrievedContext {
        chunks: Vec::new(),
        total_chunks: 2,
        avg_relevance_score: 0.3,
        max_relevance_score: 0.3,
        source_pages: Vec::new(),
        content_preview: preview.to_string(),
    }
}

/// Two questions with adequate relevance but near-zero signal coverage
/// and pricing wording, which the signal-coverage step's keyword check
/// diagnoses as `MissingPricing`.
fn pricing_gap(id: &str) -> QuestionResult {
    QuestionResult {
        question_id: id.to_string(),
        question_text: "What is Acme's pricing or how much do their services cost?".to_string(),
        category: Category::Offerings,
        difficulty: Difficulty::Medium,
        weight: 1.0,
        answerability: Answerability::Not,
        confidence: ConfidenceLevel::High,
        score: 0.0,
        context: adequate_relevance_context("Acme has a sales team you can contact for details."),
        signal_matches: vec![
            SignalMatch { signal: "pricing tiers".to_string(), found: false, confidence: 0.0, evidence: None },
            SignalMatch { signal: "specific prices".to_string(), found: false, confidence: 0.0, evidence: None },
        ],
        signals_found: 0,
        signals_total: 2,
    }
}

/// A third question whose answer is buried: average relevance falls
/// below the 0.4 floor, which the precedence order diagnoses directly
/// as `BuriedAnswer` regardless of signal coverage.
fn buried_answer_question() -> QuestionResult {
    QuestionResult {
        question_id: "UQ-12".to_string(),
        question_text: "What is Acme's track record or history of success?".to_string(),
        category: Category::Trust,
        difficulty: Difficulty::Hard,
        weight: 1.0,
        answerability: Answerability::Partially,
        confidence: ConfidenceLevel::Medium,
        score: 0.35,
        context: low_relevance_context("Acme has been around for a while and has grown steadily."),
        signal_matches: vec![
            SignalMatch { signal: "years in business".to_string(), found: false, confidence: 0.0, evidence: None },
            SignalMatch { signal: "growth metrics".to_string(), found: false, confidence: 0.0, evidence: None },
            SignalMatch { signal: "success stories".to_string(), found: false, confidence: 0.0, evidence: None },
            SignalMatch { signal: "customer count".to_string(), found: false, confidence: 0.0, evidence: None },
        ],
        signals_found: 0,
        signals_total: 4,
    }
}

fn simulation() -> SimulationResult {
    let question_results = vec![pricing_gap("UQ-05a"), pricing_gap("UQ-05b"), buried_answer_question()];
    SimulationResult {
        company_name: "Acme".to_string(),
        total_questions: question_results.len(),
        questions_answered: 0,
        questions_partial: 1,
        questions_unanswered: 2,
        category_scores: HashMap::new(),
        difficulty_scores: HashMap::new(),
        overall_score: 15.0,
        coverage_score: 33.0,
        confidence_score: 40.0,
        question_results,
    }
}

#[test]
fn critical_multi_question_fix_is_ordered_before_buried_answer() {
    let simulation = simulation();
    let plan = FixGenerator::new(FixGeneratorConfig::default()).generate(&simulation);

    assert_eq!(plan.fixes.len(), 2, "expected exactly two distinct reason codes, got {plan:#?}");

    assert_eq!(plan.fixes[0].reason_code, ReasonCode::MissingPricing);
    assert_eq!(plan.fixes[0].affected_question_ids.len(), 2);
    assert_eq!(plan.fixes[0].priority, 1);

    assert_eq!(plan.fixes[1].reason_code, ReasonCode::BuriedAnswer);
    assert_eq!(plan.fixes[1].affected_question_ids.len(), 1);
    assert_eq!(plan.fixes[1].priority, 2);

    let impact = TierCEstimator::new(30.0).estimate_plan(&plan);
    assert_eq!(impact.per_fix.len(), 2);
    for estimate in &impact.per_fix {
        assert!(estimate.range.min <= estimate.range.expected);
        assert!(estimate.range.expected <= estimate.range.max);
    }
    assert!(impact.total_range.min <= impact.total_range.expected);
    assert!(impact.total_range.expected <= impact.total_range.max);
}
