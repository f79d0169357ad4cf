//! Fifteen questions where the simulation is far more optimistic than
//! what the AI system actually surfaces: 12 of 15 are predicted
//! answerable but only 4 are ever mentioned, and just 7 predictions land
//! correctly. That combination should flag high divergence and a
//! mandatory refresh.

use sourceability_benchmark::{compare, DivergenceLevel, DivergenceThresholds};
use sourceability_observation::ParsedObservation;
use sourceability_simulation::{RetrievedContext, QuestionResult};
use sourceability_types::model::{Answerability, Category, ConfidenceLevel, Difficulty};
use std::collections::HashMap;

fn sim_result(id: &str, answerability: Answerability) -> QuestionResult {
    QuestionResult {
        question_id: id.to_string(),
        question_text: format!("Question {id}"),
        category: Category::Identity,
        difficulty: Difficulty::Easy,
        weight: 1.0,
        answerability,
        confidence: ConfidenceLevel::Medium,
        score: 0.5,
        context: RetrievedContext {
            chunks: Vec::new(),
            total_chunks: 1,
            avg_relevance_score: 0.5,
            max_relevance_score: 0.5,
            source_pages: Vec::new(),
            content_preview: String::new(),
        },
        signal_matches: Vec::new(),
        signals_found: 0,
        signals_total: 0,
    }
}

fn observation(mentioned: bool) -> ParsedObservation {
    ParsedObservation {
        has_company_mention: mentioned,
        has_url_citation: false,
        ..Default::default()
    }
}

/// 12 questions predicted answerable, 3 predicted unanswerable. Of the
/// 12 positive predictions, only 4 are actually mentioned (correct) and
/// 8 are omitted (optimistic). All 3 negative predictions are correctly
/// omitted too, for 7 correct predictions out of 15 overall.
fn fixtures() -> (Vec<QuestionResult>, HashMap<String, ParsedObservation>) {
    let mut sims = Vec::new();
    let mut obs = HashMap::new();

    for i in 0..4 {
        let id = format!("UQ-{i:02}-correct-positive");
        sims.push(sim_result(&id, Answerability::Fully));
        obs.insert(id, observation(true));
    }
    for i in 0..8 {
        let id = format!("UQ-{i:02}-optimistic");
        sims.push(sim_result(&id, Answerability::Partially));
        obs.insert(id, observation(false));
    }
    for i in 0..3 {
        let id = format!("UQ-{i:02}-correct-negative");
        sims.push(sim_result(&id, Answerability::Not));
        obs.insert(id, observation(false));
    }

    (sims, obs)
}

#[test]
fn wide_optimism_gap_triggers_high_divergence_and_refresh() {
    let (sims, obs) = fixtures();
    assert_eq!(sims.len(), 15);

    let summary = compare(&sims, &obs, &DivergenceThresholds::default());

    assert_eq!(summary.total_questions, 15);
    assert_eq!(summary.correct_predictions, 7);
    assert_eq!(summary.optimistic_predictions, 8);
    assert_eq!(summary.pessimistic_predictions, 0);

    assert!((summary.mention_rate_sim - 0.8).abs() < 1e-9);
    assert!((summary.mention_rate_obs - 4.0 / 15.0).abs() < 1e-9);
    assert!(summary.prediction_accuracy < 0.5);

    assert_eq!(summary.divergence.level, DivergenceLevel::High);
    assert!(summary.divergence.should_refresh);
}
