//! Score calculator with "show the math" transparency. Grounded on
//! `original_source/worker/scoring/calculator.py`.

use crate::rubric::{ScoreLevel, ScoringRubric};
use serde::{Deserialize, Serialize};
use sourceability_retriever::normalize_rrf;
use sourceability_simulation::{QuestionResult, SimulationResult};
use sourceability_types::model::{Answerability, Category, ConfidenceLevel, Difficulty};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Serialize)]
pub struct CriterionScore {
    pub criterion_id: &'static str,
    pub criterion_name: &'static str,
    pub weight: f64,
    pub raw_score: f64,
    pub weighted_score: f64,
    pub points_earned: f64,
    pub max_points: f64,
    pub level: ScoreLevel,
    pub explanation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionScore {
    pub question_id: String,
    pub question_text: String,
    pub category: Category,
    pub difficulty: Difficulty,
    pub relevance_score: f64,
    pub signal_score: f64,
    pub confidence_score: f64,
    pub base_score: f64,
    pub difficulty_multiplier: f64,
    pub category_weight: f64,
    pub final_score: f64,
    pub calculation_steps: Vec<String>,
    pub signals_matched: Vec<String>,
    pub signals_missing: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub category: Category,
    pub weight: f64,
    pub question_count: usize,
    pub questions_answered: usize,
    pub questions_partial: usize,
    pub questions_unanswered: usize,
    pub raw_score: f64,
    pub weighted_score: f64,
    pub contribution: f64,
    pub question_scores: Vec<QuestionScore>,
    pub explanation: String,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreBreakdown {
    pub total_score: f64,
    pub grade: String,
    pub grade_description: String,
    pub criterion_scores: Vec<CriterionScore>,
    pub category_breakdowns: HashMap<Category, CategoryBreakdown>,
    pub question_scores: Vec<QuestionScore>,
    pub total_questions: usize,
    pub questions_answered: usize,
    pub questions_partial: usize,
    pub questions_unanswered: usize,
    pub coverage_percentage: f64,
    pub calculation_summary: Vec<String>,
    pub formula_used: String,
    pub rubric_version: String,
}

impl ScoreBreakdown {
    /// Human-readable calculation breakdown, mirroring the Python
    /// reference's `show_the_math()`.
    pub fn show_the_math(&self) -> String {
        let bar = "=".repeat(60);
        let dash = "-".repeat(60);
        let mut lines = vec![
            bar.clone(),
            "FINDABLE SCORE CALCULATION BREAKDOWN".to_string(),
            bar.clone(),
            String::new(),
            format!(
                "Final Score: {:.1}/100 (Grade: {})",
                self.total_score, self.grade
            ),
            format!("Grade Description: {}", self.grade_description),
            String::new(),
            dash.clone(),
            "FORMULA".to_string(),
            dash.clone(),
            self.formula_used.clone(),
            String::new(),
            dash.clone(),
            "CALCULATION STEPS".to_string(),
            dash.clone(),
        ];

        for (i, step) in self.calculation_summary.iter().enumerate() {
            lines.push(format!("{}. {}", i + 1, step));
        }

        lines.push(String::new());
        lines.push(dash.clone());
        lines.push("CRITERION BREAKDOWN".to_string());
        lines.push(dash.clone());

        for cs in &self.criterion_scores {
            lines.push(format!(
                "  {}: {:.1}/{} ({:?})",
                cs.criterion_name, cs.points_earned, cs.max_points, cs.level
            ));
            lines.push(format!("    -> {}", cs.explanation));
        }

        lines.push(String::new());
        lines.push(dash.clone());
        lines.push("CATEGORY BREAKDOWN".to_string());
        lines.push(dash.clone());

        for cat in self.category_breakdowns.values() {
            lines.push(format!(
                "  {}: {:.1}% (weight: {:.0}%, contribution: {:.1}pts)",
                cat.category.as_str().to_uppercase(),
                cat.raw_score,
                cat.weight * 100.0,
                cat.contribution
            ));
            lines.push(format!(
                "    -> {} answered, {} partial, {} unanswered",
                cat.questions_answered, cat.questions_partial, cat.questions_unanswered
            ));
        }

        lines.push(String::new());
        lines.push(dash.clone());
        lines.push("COVERAGE".to_string());
        lines.push(dash);
        lines.push(format!(
            "  Questions Answered: {}/{}",
            self.questions_answered, self.total_questions
        ));
        lines.push(format!("  Coverage: {:.1}%", self.coverage_percentage));
        lines.push(String::new());
        lines.push(bar);

        lines.join("\n")
    }
}

pub struct ScoreCalculator {
    rubric: ScoringRubric,
}

fn formula() -> String {
    "Score = (Criterion Points x 0.7) + (Category Weighted Average x 0.3)\n\
     Where:\n  \
     Criterion Points = sum(raw_score x weight x max_points)\n  \
     Category Average = sum(category_score x category_weight)\n  \
     Question Score = (0.4*relevance + 0.4*signals + 0.2*confidence) x difficulty_mult"
        .to_string()
}

impl ScoreCalculator {
    pub fn new(rubric: ScoringRubric) -> Self {
        Self { rubric }
    }

    pub fn calculate(&self, simulation: &SimulationResult) -> ScoreBreakdown {
        if simulation.question_results.is_empty() {
            let grade = self.rubric.grade(0.0).to_string();
            let grade_description = self.rubric.grade_description(&grade).to_string();
            return ScoreBreakdown {
                total_score: 0.0,
                grade,
                grade_description,
                criterion_scores: Vec::new(),
                category_breakdowns: HashMap::new(),
                question_scores: Vec::new(),
                total_questions: 0,
                questions_answered: 0,
                questions_partial: 0,
                questions_unanswered: 0,
                coverage_percentage: 0.0,
                calculation_summary: vec!["No questions to score.".to_string()],
                formula_used: formula(),
                rubric_version: self.rubric.version.clone(),
            };
        }

        let question_scores = self.question_scores(&simulation.question_results);
        let category_breakdowns =
            self.category_breakdowns(&simulation.question_results, &question_scores);
        let criterion_scores = self.criterion_scores(simulation);
        let total_score = self.total_score(&criterion_scores, &category_breakdowns);
        let grade = self.rubric.grade(total_score).to_string();
        let grade_description = self.rubric.grade_description(&grade).to_string();
        let calculation_summary =
            self.calculation_summary(&criterion_scores, &category_breakdowns, total_score);

        let answered = simulation
            .question_results
            .iter()
            .filter(|r| r.answerability == Answerability::Fully)
            .count();
        let partial = simulation
            .question_results
            .iter()
            .filter(|r| r.answerability == Answerability::Partially)
            .count();
        let unanswered = simulation
            .question_results
            .iter()
            .filter(|r| r.answerability == Answerability::Not)
            .count();
        let coverage = (answered as f64 + partial as f64 * 0.5)
            / simulation.question_results.len() as f64
            * 100.0;

        ScoreBreakdown {
            total_score,
            grade,
            grade_description,
            criterion_scores,
            category_breakdowns,
            question_scores,
            total_questions: simulation.question_results.len(),
            questions_answered: answered,
            questions_partial: partial,
            questions_unanswered: unanswered,
            coverage_percentage: coverage,
            calculation_summary,
            formula_used: formula(),
            rubric_version: self.rubric.version.clone(),
        }
    }

    fn question_scores(&self, results: &[QuestionResult]) -> Vec<QuestionScore> {
        results
            .iter()
            .map(|result| {
                let raw_relevance = result.context.avg_relevance_score;
                let relevance = normalize_rrf(raw_relevance);
                let signal = if result.signals_total > 0 {
                    result.signals_found as f64 / result.signals_total as f64
                } else {
                    0.5
                };
                let confidence = confidence_to_score(result.confidence);

                let base = 0.4 * relevance + 0.4 * signal + 0.2 * confidence;
                let diff_mult = self.rubric.difficulty_multiplier(result.difficulty);
                let cat_weight = self.rubric.category_weight(result.category);
                let final_score = (base * diff_mult).min(1.0) * cat_weight;

                let steps = vec![
                    format!("Relevance: {:.2} x 0.4 = {:.3}", relevance, relevance * 0.4),
                    format!("Signal: {:.2} x 0.4 = {:.3}", signal, signal * 0.4),
                    format!(
                        "Confidence: {:.2} x 0.2 = {:.3}",
                        confidence,
                        confidence * 0.2
                    ),
                    format!("Base Score: {:.3}", base),
                    format!(
                        "Difficulty Multiplier ({}): x {}",
                        result.difficulty.as_str(),
                        diff_mult
                    ),
                    format!(
                        "Category Weight ({}): x {:.2}",
                        result.category.as_str(),
                        cat_weight
                    ),
                    format!("Final: {:.3}", final_score),
                ];

                let matched = result
                    .signal_matches
                    .iter()
                    .filter(|m| m.found)
                    .map(|m| m.signal.clone())
                    .collect();
                let missing = result
                    .signal_matches
                    .iter()
                    .filter(|m| !m.found)
                    .map(|m| m.signal.clone())
                    .collect();

                QuestionScore {
                    question_id: result.question_id.clone(),
                    question_text: result.question_text.clone(),
                    category: result.category,
                    difficulty: result.difficulty,
                    relevance_score: relevance,
                    signal_score: signal,
                    confidence_score: confidence,
                    base_score: base,
                    difficulty_multiplier: diff_mult,
                    category_weight: cat_weight,
                    final_score,
                    calculation_steps: steps,
                    signals_matched: matched,
                    signals_missing: missing,
                }
            })
            .collect()
    }

    fn category_breakdowns(
        &self,
        results: &[QuestionResult],
        question_scores: &[QuestionScore],
    ) -> HashMap<Category, CategoryBreakdown> {
        let mut by_category: HashMap<Category, Vec<(&QuestionResult, &QuestionScore)>> =
            HashMap::new();
        for (result, qs) in results.iter().zip(question_scores.iter()) {
            by_category.entry(result.category).or_default().push((result, qs));
        }

        by_category
            .into_iter()
            .map(|(category, items)| {
                let cat_results: Vec<&QuestionResult> = items.iter().map(|(r, _)| *r).collect();
                let cat_scores: Vec<QuestionScore> =
                    items.iter().map(|(_, qs)| (*qs).clone()).collect();

                let answered = cat_results
                    .iter()
                    .filter(|r| r.answerability == Answerability::Fully)
                    .count();
                let partial = cat_results
                    .iter()
                    .filter(|r| r.answerability == Answerability::Partially)
                    .count();
                let unanswered = cat_results
                    .iter()
                    .filter(|r| r.answerability == Answerability::Not)
                    .count();

                let raw = cat_results.iter().map(|r| r.score).sum::<f64>()
                    / cat_results.len() as f64
                    * 100.0;
                let weight = self.rubric.category_weight(category);
                let weighted = raw * weight;

                let explanation = category_explanation(
                    category,
                    answered,
                    partial,
                    unanswered,
                    cat_results.len(),
                    raw,
                );
                let recommendations = category_recommendations(category, &cat_results);

                (
                    category,
                    CategoryBreakdown {
                        category,
                        weight,
                        question_count: items.len(),
                        questions_answered: answered,
                        questions_partial: partial,
                        questions_unanswered: unanswered,
                        raw_score: raw,
                        weighted_score: weighted,
                        contribution: weighted,
                        question_scores: cat_scores,
                        explanation,
                        recommendations,
                    },
                )
            })
            .collect()
    }

    fn criterion_scores(&self, simulation: &SimulationResult) -> Vec<CriterionScore> {
        self.rubric
            .criteria
            .iter()
            .map(|criterion| {
                let (raw, explanation): (f64, String) = match criterion.id {
                    "content_relevance" => (
                        relevance_score(simulation),
                        format!(
                            "Average content relevance across {} questions",
                            simulation.question_results.len()
                        ),
                    ),
                    "signal_coverage" => (
                        signal_score(simulation),
                        "Expected signals found in retrieved content".to_string(),
                    ),
                    "answer_confidence" => (
                        confidence_score(simulation),
                        "Confidence in answer completeness and accuracy".to_string(),
                    ),
                    "source_quality" => (
                        source_quality_score(simulation),
                        "Quality and diversity of source pages".to_string(),
                    ),
                    _ => (0.5, "Unknown criterion".to_string()),
                };

                let weighted = raw * criterion.weight;
                let points = raw * criterion.max_points;
                let level = criterion.level(raw);

                CriterionScore {
                    criterion_id: criterion.id,
                    criterion_name: criterion.name,
                    weight: criterion.weight,
                    raw_score: raw,
                    weighted_score: weighted,
                    points_earned: points,
                    max_points: criterion.max_points,
                    level,
                    explanation,
                }
            })
            .collect()
    }

    fn total_score(
        &self,
        criterion_scores: &[CriterionScore],
        category_breakdowns: &HashMap<Category, CategoryBreakdown>,
    ) -> f64 {
        let criterion_total: f64 = criterion_scores.iter().map(|c| c.points_earned).sum();
        let category_total: f64 = category_breakdowns.values().map(|c| c.weighted_score).sum();
        criterion_total * 0.7 + category_total * 0.3
    }

    fn calculation_summary(
        &self,
        criterion_scores: &[CriterionScore],
        category_breakdowns: &HashMap<Category, CategoryBreakdown>,
        total_score: f64,
    ) -> Vec<String> {
        let mut steps = vec!["Calculate criterion scores:".to_string()];
        for cs in criterion_scores {
            steps.push(format!(
                "  {}: {:.2} x {:.2} = {:.3} ({:.1} pts)",
                cs.criterion_name, cs.raw_score, cs.weight, cs.weighted_score, cs.points_earned
            ));
        }
        let criterion_total: f64 = criterion_scores.iter().map(|c| c.points_earned).sum();
        steps.push(format!("Criterion subtotal: {:.1} points", criterion_total));

        steps.push(String::new());
        steps.push("Calculate category contributions:".to_string());
        for cb in category_breakdowns.values() {
            steps.push(format!(
                "  {}: {:.1}% x {:.2} = {:.1} pts",
                cb.category.as_str(),
                cb.raw_score,
                cb.weight,
                cb.contribution
            ));
        }
        let category_total: f64 = category_breakdowns.values().map(|c| c.weighted_score).sum();
        steps.push(format!("Category subtotal: {:.1} points", category_total));

        steps.push(String::new());
        steps.push("Final calculation:".to_string());
        steps.push(format!(
            "  ({:.1} x 0.7) + ({:.1} x 0.3) = {:.1}",
            criterion_total, category_total, total_score
        ));

        steps
    }
}

fn confidence_to_score(confidence: ConfidenceLevel) -> f64 {
    confidence.as_numeric()
}

fn relevance_score(simulation: &SimulationResult) -> f64 {
    if simulation.question_results.is_empty() {
        return 0.0;
    }
    let normalized: Vec<f64> = simulation
        .question_results
        .iter()
        .map(|r| normalize_rrf(r.context.avg_relevance_score))
        .collect();
    normalized.iter().sum::<f64>() / normalized.len() as f64
}

fn signal_score(simulation: &SimulationResult) -> f64 {
    let with_signals: Vec<&QuestionResult> = simulation
        .question_results
        .iter()
        .filter(|r| r.signals_total > 0)
        .collect();
    if with_signals.is_empty() {
        return 0.0;
    }
    let total: usize = with_signals.iter().map(|r| r.signals_total).sum();
    let found: usize = with_signals.iter().map(|r| r.signals_found).sum();
    if total == 0 {
        0.0
    } else {
        found as f64 / total as f64
    }
}

fn confidence_score(simulation: &SimulationResult) -> f64 {
    if simulation.question_results.is_empty() {
        return 0.0;
    }
    simulation
        .question_results
        .iter()
        .map(|r| confidence_to_score(r.confidence))
        .sum::<f64>()
        / simulation.question_results.len() as f64
}

fn source_quality_score(simulation: &SimulationResult) -> f64 {
    if simulation.question_results.is_empty() {
        return 0.0;
    }
    let mut all_sources = HashSet::new();
    let mut max_scores = Vec::new();
    for r in &simulation.question_results {
        for s in &r.context.source_pages {
            all_sources.insert(s.clone());
        }
        max_scores.push(r.context.max_relevance_score);
    }
    let diversity = (all_sources.len() as f64 / 10.0).min(1.0);
    let quality = if max_scores.is_empty() {
        0.0
    } else {
        max_scores.iter().sum::<f64>() / max_scores.len() as f64
    };
    diversity * 0.3 + quality * 0.7
}

fn category_explanation(
    category: Category,
    answered: usize,
    partial: usize,
    unanswered: usize,
    total: usize,
    raw_score: f64,
) -> String {
    let status = if raw_score >= 80.0 {
        "Strong performance"
    } else if raw_score >= 60.0 {
        "Adequate coverage"
    } else {
        "Needs improvement"
    };
    format!(
        "{} in {}: {}/{} fully answered, {} partial, {} unanswered",
        status,
        category.as_str(),
        answered,
        total,
        partial,
        unanswered
    )
}

fn category_recommendations(category: Category, results: &[&QuestionResult]) -> Vec<String> {
    let has_unanswered = results
        .iter()
        .any(|r| r.answerability == Answerability::Not);
    if !has_unanswered {
        return Vec::new();
    }
    let recommendation = match category {
        Category::Identity => "Add or enhance your 'About Us' page with company history and mission",
        Category::Offerings => "Create detailed product/service pages with features and benefits",
        Category::Contact => "Make contact information more prominent and accessible",
        Category::Trust => "Add customer testimonials, case studies, and certifications",
        Category::Differentiation => {
            "Highlight unique value propositions and competitive advantages"
        }
    };
    vec![recommendation.to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_simulation_scores_zero() {
        let simulation = SimulationResult {
            company_name: "Acme".to_string(),
            question_results: Vec::new(),
            total_questions: 0,
            questions_answered: 0,
            questions_partial: 0,
            questions_unanswered: 0,
            category_scores: HashMap::new(),
            difficulty_scores: HashMap::new(),
            overall_score: 0.0,
            coverage_score: 0.0,
            confidence_score: 0.0,
        };
        let calc = ScoreCalculator::new(ScoringRubric::default());
        let breakdown = calc.calculate(&simulation);
        assert_eq!(breakdown.total_score, 0.0);
        assert_eq!(breakdown.grade, "F");
    }
}
