//! Tier B impact estimation: patches a fix's scaffold in as a synthetic
//! content chunk and re-runs the scoring formula for only the affected
//! questions, without mutating the original simulation result. Grounded
//! on `original_source/worker/fixes/synthetic.py`.

use crate::generator::Fix;
use serde::{Deserialize, Serialize};
use sourceability_simulation::{QuestionResult, SignalMatch};
use sourceability_types::model::{Answerability, ConfidenceLevel};

const RELEVANCE_BOOST: f64 = 0.3;
const MAX_RELEVANCE: f64 = 0.95;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyntheticChunk {
    pub content: String,
    pub source_fix_id: String,
    pub relevance_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatchedQuestionResult {
    pub question_id: String,
    pub original_answerability: Answerability,
    pub original_score: f64,
    pub patched_answerability: Answerability,
    pub patched_score: f64,
    pub patched_confidence: ConfidenceLevel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierBEstimate {
    pub fix_id: String,
    pub patched_questions: Vec<PatchedQuestionResult>,
    pub score_delta: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierBConfig {
    pub relevance_weight: f64,
    pub signal_weight: f64,
    pub confidence_weight: f64,
    pub fully_answerable_threshold: f64,
    pub partially_answerable_threshold: f64,
}

impl Default for TierBConfig {
    fn default() -> Self {
        Self {
            relevance_weight: 0.4,
            signal_weight: 0.4,
            confidence_weight: 0.2,
            fully_answerable_threshold: 0.7,
            partially_answerable_threshold: 0.3,
        }
    }
}

pub struct TierBEstimator {
    config: TierBConfig,
}

impl Default for TierBEstimator {
    fn default() -> Self {
        Self::new(TierBConfig::default())
    }
}

impl TierBEstimator {
    pub fn new(config: TierBConfig) -> Self {
        Self { config }
    }

    fn synthetic_chunk(&self, fix: &Fix) -> SyntheticChunk {
        let relevance = (fix_base_relevance(fix) + RELEVANCE_BOOST).min(MAX_RELEVANCE);
        SyntheticChunk {
            content: fix.scaffold.clone(),
            source_fix_id: fix.id.clone(),
            relevance_score: relevance,
        }
    }

    /// Re-scores every question the fix claims to affect, by patching the
    /// fix's scaffold in as an extra signal source. The passed-in
    /// `question_results` are read only; nothing about the live simulation
    /// changes.
    pub fn estimate_fix(&self, fix: &Fix, question_results: &[QuestionResult]) -> TierBEstimate {
        let chunk = self.synthetic_chunk(fix);

        let patched_questions: Vec<PatchedQuestionResult> = question_results
            .iter()
            .filter(|q| fix.affected_question_ids.contains(&q.question_id))
            .map(|q| self.patch_question(q, &chunk))
            .collect();

        let score_delta = if patched_questions.is_empty() {
            0.0
        } else {
            let total: f64 = patched_questions
                .iter()
                .map(|p| p.patched_score - p.original_score)
                .sum();
            total / patched_questions.len() as f64
        };

        TierBEstimate {
            fix_id: fix.id.clone(),
            patched_questions,
            score_delta,
        }
    }

    pub fn estimate_plan(&self, fixes: &[Fix], question_results: &[QuestionResult]) -> Vec<TierBEstimate> {
        fixes
            .iter()
            .map(|f| self.estimate_fix(f, question_results))
            .collect()
    }

    fn patch_question(&self, question: &QuestionResult, chunk: &SyntheticChunk) -> PatchedQuestionResult {
        let scaffold_lower = chunk.content.to_lowercase();

        let patched_matches: Vec<SignalMatch> = question
            .signal_matches
            .iter()
            .map(|m| {
                if m.found {
                    m.clone()
                } else {
                    let signal_lower = m.signal.to_lowercase();
                    let words: Vec<&str> = signal_lower.split_whitespace().collect();
                    let matched = words.iter().filter(|w| scaffold_lower.contains(*w)).count();
                    let confidence = if words.is_empty() {
                        0.0
                    } else {
                        matched as f64 / words.len() as f64
                    };
                    if confidence >= 0.5 {
                        SignalMatch {
                            signal: m.signal.clone(),
                            found: true,
                            confidence,
                            evidence: Some(chunk.content.chars().take(100).collect()),
                        }
                    } else {
                        m.clone()
                    }
                }
            })
            .collect();

        let signals_found = patched_matches.iter().filter(|m| m.found).count();
        let signals_total = patched_matches.len().max(question.signals_total);

        let relevance_score = question.context.avg_relevance_score.max(chunk.relevance_score);
        let signal_score = if signals_total > 0 {
            signals_found as f64 / signals_total as f64
        } else {
            0.5
        };

        let matched_confidences: Vec<f64> = patched_matches
            .iter()
            .filter(|m| m.found)
            .map(|m| m.confidence)
            .collect();
        let avg_confidence = if matched_confidences.is_empty() {
            0.0
        } else {
            matched_confidences.iter().sum::<f64>() / matched_confidences.len() as f64
        };

        let patched_score = self.config.relevance_weight * relevance_score
            + self.config.signal_weight * signal_score
            + self.config.confidence_weight * avg_confidence;

        let patched_answerability = if patched_score >= self.config.fully_answerable_threshold {
            Answerability::Fully
        } else if patched_score >= self.config.partially_answerable_threshold {
            Answerability::Partially
        } else {
            Answerability::Not
        };

        let relevance_improved = relevance_score > question.context.avg_relevance_score;
        let signal_improved = signals_found > question.signals_found;
        let confidence_bonus = if relevance_improved && signal_improved {
            0.3
        } else if relevance_improved || signal_improved {
            0.15
        } else {
            0.0
        };
        let base_confidence = question.confidence.as_numeric();
        let patched_confidence_numeric = (base_confidence + confidence_bonus).min(1.0);
        let patched_confidence = if patched_confidence_numeric >= 0.85 {
            ConfidenceLevel::High
        } else if patched_confidence_numeric >= 0.5 {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        };

        PatchedQuestionResult {
            question_id: question.question_id.clone(),
            original_answerability: question.answerability,
            original_score: question.score,
            patched_answerability,
            patched_score,
            patched_confidence,
        }
    }
}

fn fix_base_relevance(fix: &Fix) -> f64 {
    fix.extracted_content
        .iter()
        .map(|e| e.relevance)
        .fold(0.0_f64, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::EffortLevel;
    use crate::reason_codes::ReasonCode;
    use sourceability_simulation::RetrievedContext;
    use sourceability_types::model::{Category, Difficulty};

    fn unanswered_question(id: &str, signals: &[&str]) -> QuestionResult {
        QuestionResult {
            question_id: id.to_string(),
            question_text: "What does Acme do?".to_string(),
            category: Category::Identity,
            difficulty: Difficulty::Easy,
            weight: 1.0,
            answerability: Answerability::Not,
            confidence: ConfidenceLevel::Low,
            score: 0.0,
            context: RetrievedContext {
                chunks: Vec::new(),
                total_chunks: 0,
                avg_relevance_score: 0.0,
                max_relevance_score: 0.0,
                source_pages: Vec::new(),
                content_preview: String::new(),
            },
            signal_matches: signals
                .iter()
                .map(|s| SignalMatch {
                    signal: s.to_string(),
                    found: false,
                    confidence: 0.0,
                    evidence: None,
                })
                .collect(),
            signals_found: 0,
            signals_total: signals.len(),
        }
    }

    fn fix_for(id: &str, question_ids: &[&str], scaffold: &str) -> Fix {
        Fix {
            id: id.to_string(),
            reason_code: ReasonCode::MissingDefinition,
            title: String::new(),
            description: String::new(),
            affected_question_ids: question_ids.iter().map(|s| s.to_string()).collect(),
            affected_categories: vec![Category::Identity],
            scaffold: scaffold.to_string(),
            examples: Vec::new(),
            extracted_content: Vec::new(),
            target_url: None,
            target_location: String::new(),
            priority: 1,
            effort: EffortLevel::Medium,
            estimated_impact: 0.0,
        }
    }

    #[test]
    fn patching_scaffold_with_matching_signal_improves_score() {
        let q = unanswered_question("UQ-01", &["cloud storage"]);
        let fix = fix_for("f1", &["UQ-01"], "Acme provides cloud storage for enterprises.");
        let estimator = TierBEstimator::default();
        let estimate = estimator.estimate_fix(&fix, &[q]);
        assert_eq!(estimate.patched_questions.len(), 1);
        assert!(estimate.patched_questions[0].patched_score > estimate.patched_questions[0].original_score);
        assert!(estimate.score_delta > 0.0);
    }

    #[test]
    fn unaffected_questions_are_not_included() {
        let q = unanswered_question("UQ-02", &["pricing"]);
        let fix = fix_for("f1", &["UQ-01"], "Some unrelated scaffold.");
        let estimator = TierBEstimator::default();
        let estimate = estimator.estimate_fix(&fix, &[q]);
        assert!(estimate.patched_questions.is_empty());
        assert_eq!(estimate.score_delta, 0.0);
    }
}
