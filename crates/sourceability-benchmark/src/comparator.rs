//! Compares simulation predictions against observed AI behavior and
//! synthesizes a divergence verdict. Grounded on
//! `original_source/worker/observation/comparison.py`, adapted to the
//! threshold-based divergence model.

use serde::{Deserialize, Serialize};
use sourceability_observation::ParsedObservation;
use sourceability_simulation::QuestionResult;
use sourceability_types::model::Answerability;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeMatch {
    Correct,
    Optimistic,
    Pessimistic,
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionComparison {
    pub question_id: String,
    pub sim_answerability: Answerability,
    pub sim_score: f64,
    pub obs_mentioned: bool,
    pub obs_cited: bool,
    pub outcome_match: OutcomeMatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DivergenceLevel {
    None,
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DivergenceSection {
    pub level: DivergenceLevel,
    pub mention_rate_delta: f64,
    pub prediction_accuracy: f64,
    pub should_refresh: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub total_questions: usize,
    pub correct_predictions: usize,
    pub optimistic_predictions: usize,
    pub pessimistic_predictions: usize,
    pub unknown_predictions: usize,
    pub prediction_accuracy: f64,
    pub mention_rate_sim: f64,
    pub mention_rate_obs: f64,
    pub citation_rate_obs: f64,
    pub comparisons: Vec<QuestionComparison>,
    pub divergence: DivergenceSection,
}

#[derive(Debug, Clone)]
pub struct DivergenceThresholds {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

impl Default for DivergenceThresholds {
    fn default() -> Self {
        Self { low: 0.1, medium: 0.2, high: 0.35 }
    }
}

fn sim_positive(answerability: Answerability) -> bool {
    matches!(answerability, Answerability::Fully | Answerability::Partially)
}

/// Compares a simulation's question results with parsed observations for
/// the same questions. Questions missing an observation, or whose
/// observation was a refusal, are classified `Unknown` rather than
/// silently skipped.
pub fn compare(
    simulation_results: &[QuestionResult],
    observations: &HashMap<String, ParsedObservation>,
    thresholds: &DivergenceThresholds,
) -> ComparisonSummary {
    let mut comparisons = Vec::with_capacity(simulation_results.len());
    let mut correct = 0;
    let mut optimistic = 0;
    let mut pessimistic = 0;
    let mut unknown = 0;
    let mut obs_mentioned = 0;
    let mut obs_cited = 0;
    let mut obs_considered = 0;

    for sim in simulation_results {
        let parsed = observations.get(&sim.question_id);
        let (outcome, mentioned, cited) = match parsed {
            None => (OutcomeMatch::Unknown, false, false),
            Some(p) if p.is_refusal => (OutcomeMatch::Unknown, false, false),
            Some(p) => {
                let positive = sim_positive(sim.answerability);
                let obs_pos = p.has_company_mention || p.has_url_citation;
                let outcome = if positive == obs_pos {
                    OutcomeMatch::Correct
                } else if positive && !obs_pos {
                    OutcomeMatch::Optimistic
                } else {
                    OutcomeMatch::Pessimistic
                };
                (outcome, p.has_company_mention, p.has_url_citation)
            }
        };

        if parsed.is_some() && !parsed.unwrap().is_refusal {
            obs_considered += 1;
            if mentioned {
                obs_mentioned += 1;
            }
            if cited {
                obs_cited += 1;
            }
        }

        match outcome {
            OutcomeMatch::Correct => correct += 1,
            OutcomeMatch::Optimistic => optimistic += 1,
            OutcomeMatch::Pessimistic => pessimistic += 1,
            OutcomeMatch::Unknown => unknown += 1,
        }

        comparisons.push(QuestionComparison {
            question_id: sim.question_id.clone(),
            sim_answerability: sim.answerability,
            sim_score: sim.score,
            obs_mentioned: mentioned,
            obs_cited: cited,
            outcome_match: outcome,
        });
    }

    let total = simulation_results.len();
    let prediction_accuracy = if total > 0 { correct as f64 / total as f64 } else { 0.0 };
    let mention_rate_sim = if total > 0 {
        simulation_results.iter().filter(|r| sim_positive(r.answerability)).count() as f64 / total as f64
    } else {
        0.0
    };
    let mention_rate_obs = if obs_considered > 0 { obs_mentioned as f64 / obs_considered as f64 } else { 0.0 };
    let citation_rate_obs = if obs_considered > 0 { obs_cited as f64 / obs_considered as f64 } else { 0.0 };

    let mention_rate_delta = mention_rate_obs - mention_rate_sim;
    let abs_delta = mention_rate_delta.abs();
    let level = if abs_delta >= thresholds.high {
        DivergenceLevel::High
    } else if abs_delta >= thresholds.medium {
        DivergenceLevel::Medium
    } else if abs_delta >= thresholds.low {
        DivergenceLevel::Low
    } else {
        DivergenceLevel::None
    };
    let should_refresh = level == DivergenceLevel::High || prediction_accuracy < 0.5;

    ComparisonSummary {
        total_questions: total,
        correct_predictions: correct,
        optimistic_predictions: optimistic,
        pessimistic_predictions: pessimistic,
        unknown_predictions: unknown,
        prediction_accuracy,
        mention_rate_sim,
        mention_rate_obs,
        citation_rate_obs,
        comparisons,
        divergence: DivergenceSection {
            level,
            mention_rate_delta,
            prediction_accuracy,
            should_refresh,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sourceability_simulation::RetrievedContext;
    use sourceability_types::model::{Category, ConfidenceLevel, Difficulty};

    fn sim_result(id: &str, answerability: Answerability) -> QuestionResult {
        QuestionResult {
            question_id: id.to_string(),
            question_text: "Q".to_string(),
            category: Category::Identity,
            difficulty: Difficulty::Easy,
            weight: 1.0,
            answerability,
            confidence: ConfidenceLevel::Medium,
            score: 0.5,
            context: RetrievedContext {
                chunks: Vec::new(),
                total_chunks: 0,
                avg_relevance_score: 0.0,
                max_relevance_score: 0.0,
                source_pages: Vec::new(),
                content_preview: String::new(),
            },
            signal_matches: Vec::new(),
            signals_found: 0,
            signals_total: 0,
        }
    }

    fn parsed(mentioned: bool, cited: bool) -> ParsedObservation {
        ParsedObservation {
            has_company_mention: mentioned,
            has_url_citation: cited,
            ..Default::default()
        }
    }

    #[test]
    fn matching_positive_prediction_is_correct() {
        let sims = vec![sim_result("q1", Answerability::Fully)];
        let mut obs = HashMap::new();
        obs.insert("q1".to_string(), parsed(true, true));
        let summary = compare(&sims, &obs, &DivergenceThresholds::default());
        assert_eq!(summary.correct_predictions, 1);
        assert_eq!(summary.prediction_accuracy, 1.0);
    }

    #[test]
    fn positive_prediction_with_omission_is_optimistic() {
        let sims = vec![sim_result("q1", Answerability::Fully)];
        let mut obs = HashMap::new();
        obs.insert("q1".to_string(), parsed(false, false));
        let summary = compare(&sims, &obs, &DivergenceThresholds::default());
        assert_eq!(summary.optimistic_predictions, 1);
    }

    #[test]
    fn missing_observation_is_unknown() {
        let sims = vec![sim_result("q1", Answerability::Fully)];
        let obs = HashMap::new();
        let summary = compare(&sims, &obs, &DivergenceThresholds::default());
        assert_eq!(summary.unknown_predictions, 1);
    }
}
