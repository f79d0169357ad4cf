//! A simulation where one category is only partially covered: its four
//! questions score 0.2, 0.6, 0.7, and 0.5, averaging exactly 50%. The
//! scorer should reflect that as a mid-range category raw score, and the
//! fix generator should surface the underlying gaps.

use sourceability_fixes::{FixGenerator, FixGeneratorConfig};
use sourceability_scoring::{ScoreCalculator, ScoringRubric};
use sourceability_simulation::{RetrievedContext, QuestionResult, SignalMatch, SimulationResult};
use sourceability_types::model::{Answerability, Category, ConfidenceLevel, Difficulty};
use std::collections::HashMap;

fn context(total_chunks: usize, preview: &str) -> RetrievedContext {
    RetrievedContext {
        chunks: Vec::new(),
        total_chunks,
        avg_relevance_score: if total_chunks > 0 { 0.5 } else { 0.0 },
        max_relevance_score: if total_chunks > 0 { 0.5 } else { 0.0 },
        source_pages: Vec::new(),
        content_preview: preview.to_string(),
    }
}

fn signal(name: &str, found: bool) -> SignalMatch {
    SignalMatch {
        signal: name.to_string(),
        found,
        confidence: if found { 1.0 } else { 0.0 },
        evidence: None,
    }
}

fn offerings_question(id: &str, text: &str, score: f64, preview: &str, signals_found: usize, signals_total: usize) -> QuestionResult {
    let answerability = if score >= 0.7 {
        Answerability::Fully
    } else if score >= 0.3 {
        Answerability::Partially
    } else {
        Answerability::Not
    };
    let total_chunks = if preview.is_empty() { 0 } else { 3 };
    QuestionResult {
        question_id: id.to_string(),
        question_text: text.to_string(),
        category: Category::Offerings,
        difficulty: Difficulty::Medium,
        weight: 1.0,
        answerability,
        confidence: ConfidenceLevel::Medium,
        score,
        context: context(total_chunks, preview),
        signal_matches: (0..signals_total)
            .map(|i| signal(&format!("signal-{i}"), i < signals_found))
            .collect(),
        signals_found,
        signals_total,
    }
}

fn partial_offerings_simulation() -> SimulationResult {
    let question_results = vec![
        offerings_question(
            "UQ-05",
            "What is Acme's pricing or how much do their services cost?",
            0.2,
            "Acme has several plans available, contact sales for a quote.",
            1,
            4,
        ),
        offerings_question(
            "UQ-06",
            "Who are the typical customers or target audience for Acme?",
            0.6,
            "Acme serves mid-size manufacturers across several industry verticals.",
            2,
            3,
        ),
        offerings_question(
            "UQ-04",
            "What products or services does Acme offer?",
            0.7,
            "Acme offers WidgetTrack, a product with clear descriptions and key features.",
            3,
            3,
        ),
        offerings_question(
            "UQ-07",
            "What problems does Acme solve for their customers?",
            0.5,
            "Acme reduces manual stock counts, addressing common pain points addressed by warehouses.",
            1,
            3,
        ),
    ];

    let mut category_scores = HashMap::new();
    category_scores.insert(Category::Offerings, 0.5);

    SimulationResult {
        company_name: "Acme".to_string(),
        total_questions: question_results.len(),
        questions_answered: 1,
        questions_partial: 3,
        questions_unanswered: 0,
        category_scores,
        difficulty_scores: HashMap::new(),
        overall_score: 50.0,
        coverage_score: 100.0,
        confidence_score: 60.0,
        question_results,
    }
}

#[test]
fn offerings_category_scores_around_fifty_percent() {
    let simulation = partial_offerings_simulation();
    let score = ScoreCalculator::new(ScoringRubric::default()).calculate(&simulation);

    let offerings = score
        .category_breakdowns
        .get(&Category::Offerings)
        .expect("Offerings breakdown should be present");

    assert_eq!(offerings.question_count, 4);
    assert!(
        (offerings.raw_score - 50.0).abs() < 5.0,
        "expected Offerings raw_score near 50, got {}",
        offerings.raw_score
    );
}

#[test]
fn partial_coverage_surfaces_pricing_and_fragmentation_fixes() {
    let simulation = partial_offerings_simulation();
    let plan = FixGenerator::new(FixGeneratorConfig::default()).generate(&simulation);

    assert!(!plan.fixes.is_empty());

    let codes: Vec<&str> = plan.fixes.iter().map(|f| f.reason_code.as_str()).collect();
    assert!(
        codes.contains(&"missing_pricing"),
        "expected a missing_pricing fix, got {codes:?}"
    );

    // UQ-05 (score 0.2, partially-answerable, under the 0.7 threshold)
    // and UQ-07 (score 0.5) are both below-threshold problem questions;
    // at least one of their diagnoses should show up in the plan.
    let diagnosed_ids: Vec<&String> = plan
        .fixes
        .iter()
        .flat_map(|f| f.affected_question_ids.iter())
        .collect();
    assert!(diagnosed_ids.iter().any(|id| *id == "UQ-05" || *id == "UQ-07"));
}
