//! Simulation Runner: evaluates how well retrieved content answers
//! each catalog question. Grounded on
//! `original_source/worker/simulation/runner.py`.

use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};
use sourceability_questions::Question;
use sourceability_retriever::{RetrievalResult, Retriever};
use sourceability_types::model::{Answerability, Category, ConfidenceLevel, Difficulty};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub chunks_per_question: usize,
    pub min_relevance_score: f64,
    pub fully_answerable_threshold: f64,
    pub partially_answerable_threshold: f64,
    pub signal_match_threshold: f64,
    pub use_fuzzy_matching: bool,
    pub relevance_weight: f64,
    pub signal_weight: f64,
    pub confidence_weight: f64,
    pub max_content_length: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            chunks_per_question: 5,
            min_relevance_score: 0.3,
            fully_answerable_threshold: 0.7,
            partially_answerable_threshold: 0.3,
            signal_match_threshold: 0.5,
            use_fuzzy_matching: true,
            relevance_weight: 0.4,
            signal_weight: 0.4,
            confidence_weight: 0.2,
            max_content_length: 2000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedContext {
    pub chunks: Vec<RetrievalResult>,
    pub total_chunks: usize,
    pub avg_relevance_score: f64,
    pub max_relevance_score: f64,
    pub source_pages: Vec<String>,
    pub content_preview: String,
}

impl RetrievedContext {
    fn empty() -> Self {
        Self {
            chunks: Vec::new(),
            total_chunks: 0,
            avg_relevance_score: 0.0,
            max_relevance_score: 0.0,
            source_pages: Vec::new(),
            content_preview: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalMatch {
    pub signal: String,
    pub found: bool,
    pub confidence: f64,
    pub evidence: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionResult {
    pub question_id: String,
    pub question_text: String,
    pub category: Category,
    pub difficulty: Difficulty,
    pub weight: f64,
    pub answerability: Answerability,
    pub confidence: ConfidenceLevel,
    pub score: f64,
    pub context: RetrievedContext,
    pub signal_matches: Vec<SignalMatch>,
    pub signals_found: usize,
    pub signals_total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    pub company_name: String,
    pub question_results: Vec<QuestionResult>,
    pub total_questions: usize,
    pub questions_answered: usize,
    pub questions_partial: usize,
    pub questions_unanswered: usize,
    pub category_scores: HashMap<Category, f64>,
    pub difficulty_scores: HashMap<Difficulty, f64>,
    pub overall_score: f64,
    pub coverage_score: f64,
    pub confidence_score: f64,
}

pub struct SimulationRunner<'a> {
    retriever: &'a Retriever,
    config: SimulationConfig,
}

impl<'a> SimulationRunner<'a> {
    pub fn new(retriever: &'a Retriever, config: SimulationConfig) -> Self {
        Self { retriever, config }
    }

    pub fn run(&self, company_name: &str, questions: &[Question]) -> SimulationResult {
        let question_results: Vec<QuestionResult> = questions
            .iter()
            .map(|q| self.evaluate_question(company_name, q))
            .collect();

        let category_scores = category_scores(&question_results);
        let difficulty_scores = difficulty_scores(&question_results);
        let overall_score = overall_score(&question_results);
        let coverage_score = coverage_score(&question_results);
        let confidence_score = confidence_score(&question_results);

        let questions_answered = question_results
            .iter()
            .filter(|r| r.answerability == Answerability::Fully)
            .count();
        let questions_partial = question_results
            .iter()
            .filter(|r| r.answerability == Answerability::Partially)
            .count();
        let questions_unanswered = question_results
            .iter()
            .filter(|r| r.answerability == Answerability::Not)
            .count();

        SimulationResult {
            company_name: company_name.to_string(),
            total_questions: question_results.len(),
            questions_answered,
            questions_partial,
            questions_unanswered,
            category_scores,
            difficulty_scores,
            overall_score,
            coverage_score,
            confidence_score,
            question_results,
        }
    }

    fn evaluate_question(&self, company_name: &str, question: &Question) -> QuestionResult {
        let rendered = question.render(company_name);

        let results = self.retriever.search(
            &rendered,
            None,
            self.config.chunks_per_question,
            self.config.min_relevance_score,
        );

        let context = self.build_context(results);
        let signal_matches = self.evaluate_signals(&question.expected_signals, &context);
        let signals_found = signal_matches.iter().filter(|s| s.found).count();
        let signals_total = signal_matches.len();

        let (answerability, confidence, score) =
            self.calculate_answerability(&context, &signal_matches, signals_found, signals_total);

        QuestionResult {
            question_id: question_id(question),
            question_text: rendered,
            category: question.category,
            difficulty: question.difficulty,
            weight: question.weight,
            answerability,
            confidence,
            score,
            context,
            signal_matches,
            signals_found,
            signals_total,
        }
    }

    fn build_context(&self, results: Vec<RetrievalResult>) -> RetrievedContext {
        if results.is_empty() {
            return RetrievedContext::empty();
        }

        let scores: Vec<f64> = results.iter().map(|r| r.combined_score).collect();
        let avg_score = scores.iter().sum::<f64>() / scores.len() as f64;
        let max_score = scores.iter().cloned().fold(f64::MIN, f64::max);

        let source_pages: Vec<String> = results
            .iter()
            .map(|r| r.url.clone())
            .filter(|u| !u.is_empty())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let mut preview = String::new();
        let mut total_len = 0usize;
        for r in &results {
            if total_len >= self.config.max_content_length {
                break;
            }
            if !preview.is_empty() {
                preview.push_str("\n\n");
            }
            preview.push_str(&r.content);
            total_len += r.content.len();
        }
        preview.truncate(self.config.max_content_length);

        RetrievedContext {
            total_chunks: results.len(),
            avg_relevance_score: avg_score,
            max_relevance_score: max_score,
            source_pages,
            content_preview: preview,
            chunks: results,
        }
    }

    fn evaluate_signals(
        &self,
        expected_signals: &[String],
        context: &RetrievedContext,
    ) -> Vec<SignalMatch> {
        if expected_signals.is_empty() {
            return Vec::new();
        }

        let content_lower = context.content_preview.to_lowercase();

        expected_signals
            .iter()
            .map(|signal| {
                let signal_lower = signal.to_lowercase();
                let mut found = false;
                let mut confidence = 0.0;
                let mut evidence = None;

                if let Some(idx) = content_lower.find(&signal_lower) {
                    found = true;
                    confidence = 1.0;
                    let start = idx.saturating_sub(50);
                    let end = (idx + signal.len() + 50).min(context.content_preview.len());
                    evidence = Some(substring_safe(&context.content_preview, start, end));
                } else if self.config.use_fuzzy_matching {
                    let signal_words: Vec<&str> = signal_lower.split_whitespace().collect();
                    if !signal_words.is_empty() {
                        let matched = signal_words
                            .iter()
                            .filter(|w| content_lower.contains(*w))
                            .count();
                        confidence = matched as f64 / signal_words.len() as f64;
                        if confidence >= self.config.signal_match_threshold {
                            found = true;
                        }
                    }
                }

                SignalMatch {
                    signal: signal.clone(),
                    found,
                    confidence,
                    evidence,
                }
            })
            .collect()
    }

    fn calculate_answerability(
        &self,
        context: &RetrievedContext,
        signal_matches: &[SignalMatch],
        signals_found: usize,
        signals_total: usize,
    ) -> (Answerability, ConfidenceLevel, f64) {
        if context.total_chunks == 0 {
            return (Answerability::Not, ConfidenceLevel::High, 0.0);
        }

        let relevance_score = context.avg_relevance_score;
        let signal_score = if signals_total > 0 {
            signals_found as f64 / signals_total as f64
        } else {
            0.5
        };
        let matched_confidences: Vec<f64> = signal_matches
            .iter()
            .filter(|m| m.found)
            .map(|m| m.confidence)
            .collect();
        let avg_confidence = if matched_confidences.is_empty() {
            0.0
        } else {
            matched_confidences.iter().sum::<f64>() / matched_confidences.len() as f64
        };

        let score = self.config.relevance_weight * relevance_score
            + self.config.signal_weight * signal_score
            + self.config.confidence_weight * avg_confidence;

        let answerability = if score >= self.config.fully_answerable_threshold {
            Answerability::Fully
        } else if score >= self.config.partially_answerable_threshold {
            Answerability::Partially
        } else {
            Answerability::Not
        };

        let confidence = if context.max_relevance_score >= 0.7 && signal_score >= 0.7 {
            ConfidenceLevel::High
        } else if context.max_relevance_score >= 0.4 || signal_score >= 0.4 {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        };

        (answerability, confidence, score)
    }
}

fn substring_safe(s: &str, start: usize, end: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    let start = start.min(chars.len());
    let end = end.min(chars.len());
    chars[start..end].iter().collect()
}

fn question_id(question: &Question) -> String {
    if question.id.is_empty() {
        generate_id(&question.template)
    } else {
        question.id.clone()
    }
}

fn generate_id(text: &str) -> String {
    let digest = Md5::digest(text.as_bytes());
    digest.iter().take(4).map(|b| format!("{:02x}", b)).collect()
}

fn category_scores(results: &[QuestionResult]) -> HashMap<Category, f64> {
    let mut buckets: HashMap<Category, Vec<f64>> = HashMap::new();
    for r in results {
        buckets.entry(r.category).or_default().push(r.score);
    }
    buckets
        .into_iter()
        .map(|(cat, scores)| (cat, scores.iter().sum::<f64>() / scores.len() as f64 * 100.0))
        .collect()
}

fn difficulty_scores(results: &[QuestionResult]) -> HashMap<Difficulty, f64> {
    let mut buckets: HashMap<Difficulty, Vec<f64>> = HashMap::new();
    for r in results {
        buckets.entry(r.difficulty).or_default().push(r.score);
    }
    buckets
        .into_iter()
        .map(|(diff, scores)| (diff, scores.iter().sum::<f64>() / scores.len() as f64 * 100.0))
        .collect()
}

fn overall_score(results: &[QuestionResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    let total_weight: f64 = results.iter().map(|r| r.weight).sum();
    if total_weight <= 0.0 {
        return 0.0;
    }
    let weighted_sum: f64 = results.iter().map(|r| r.score * r.weight).sum();
    (weighted_sum / total_weight) * 100.0
}

fn coverage_score(results: &[QuestionResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    let answerable = results
        .iter()
        .filter(|r| matches!(r.answerability, Answerability::Fully | Answerability::Partially))
        .count();
    (answerable as f64 / results.len() as f64) * 100.0
}

fn confidence_score(results: &[QuestionResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    let total: f64 = results.iter().map(|r| r.confidence.as_numeric()).sum();
    (total / results.len() as f64) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use sourceability_types::model::QuestionSource;

    fn question(id: &str, template: &str, signals: &[&str]) -> Question {
        Question {
            id: id.to_string(),
            template: template.to_string(),
            category: Category::Identity,
            difficulty: Difficulty::Easy,
            source: QuestionSource::Universal,
            weight: 1.0,
            description: String::new(),
            expected_signals: signals.iter().map(|s| s.to_string()).collect(),
            metadata: HashMap::new(),
        }
    }

    #[test]
    fn empty_retriever_yields_not_answerable() {
        let retriever = Retriever::new();
        let runner = SimulationRunner::new(&retriever, SimulationConfig::default());
        let result = runner.run("Acme", &[question("UQ-01", "What does {company} do?", &[])]);
        assert_eq!(result.question_results[0].answerability, Answerability::Not);
        assert_eq!(result.coverage_score, 0.0);
    }

    #[test]
    fn matching_content_raises_answerability() {
        let mut retriever = Retriever::new();
        retriever.add(
            "d1",
            "Acme provides cloud storage and backup solutions for enterprises",
            vec![],
            "https://acme.com",
            "About",
            vec![],
        );
        let runner = SimulationRunner::new(&retriever, SimulationConfig::default());
        let q = question(
            "UQ-01",
            "What does {company} do?",
            &["cloud storage", "backup solutions"],
        );
        let result = runner.run("Acme", &[q]);
        let r = &result.question_results[0];
        assert!(r.signals_found >= 1);
        assert!(r.score > 0.0);
    }

    #[test]
    fn generated_ids_are_eight_hex_chars() {
        let id = generate_id("What does Acme do?");
        assert_eq!(id.len(), 8);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn overall_score_weights_by_question_weight() {
        let retriever = Retriever::new();
        let runner = SimulationRunner::new(&retriever, SimulationConfig::default());
        let mut heavy = question("UQ-01", "A", &[]);
        heavy.weight = 10.0;
        let light = question("UQ-02", "B", &[]);
        let result = runner.run("Acme", &[heavy, light]);
        assert_eq!(result.overall_score, 0.0);
    }
}
