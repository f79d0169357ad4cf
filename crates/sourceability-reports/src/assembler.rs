//! Assembles the outputs of every pipeline stage into a single
//! [`FullReport`]. A pure function over its inputs — no I/O, no clock
//! reads beyond what the caller supplies. Grounded on
//! `original_source/worker/reports/assembler.py`.

use crate::contract::*;
use chrono::{DateTime, Utc};
use sourceability_benchmark::{BenchmarkResult, ComparisonSummary, DivergenceLevel};
use sourceability_fixes::{EffortLevel, FixPlan, FixPlanImpact};
use sourceability_observation::ParsedObservation;
use sourceability_scoring::ScoreBreakdown;
use std::collections::HashMap;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

pub struct ReportMetadataInputs {
    pub report_id: String,
    pub site_id: String,
    pub run_id: String,
    pub company_name: String,
    pub domain: String,
    pub created_at: DateTime<Utc>,
    pub run_started_at: Option<DateTime<Utc>>,
    pub run_completed_at: Option<DateTime<Utc>>,
    pub limitations: Vec<String>,
    pub notes: Vec<String>,
}

pub struct ObservationInputs<'a> {
    pub provider: String,
    pub model: String,
    pub observations: &'a HashMap<String, ParsedObservation>,
    pub comparison: &'a ComparisonSummary,
}

pub struct ReportInputs<'a> {
    pub metadata: ReportMetadataInputs,
    pub score: &'a ScoreBreakdown,
    pub fix_plan: &'a FixPlan,
    pub fix_plan_impact: Option<&'a FixPlanImpact>,
    pub observation: Option<ObservationInputs<'a>>,
    pub benchmark: Option<&'a BenchmarkResult>,
}

/// Builds the versioned report envelope from the stage outputs already
/// computed elsewhere. Never reaches back into a provider, the retriever,
/// or the clock itself — everything it needs arrives through `inputs`.
pub fn assemble(inputs: ReportInputs<'_>) -> FullReport {
    let run_duration_seconds = match (inputs.metadata.run_started_at, inputs.metadata.run_completed_at) {
        (Some(start), Some(end)) => Some((end - start).num_milliseconds() as f64 / 1000.0),
        _ => None,
    };

    let metadata = ReportMetadata {
        report_id: inputs.metadata.report_id,
        site_id: inputs.metadata.site_id,
        run_id: inputs.metadata.run_id,
        version: CURRENT_VERSION,
        company_name: inputs.metadata.company_name,
        domain: inputs.metadata.domain,
        created_at: inputs.metadata.created_at,
        run_started_at: inputs.metadata.run_started_at,
        run_completed_at: inputs.metadata.run_completed_at,
        run_duration_seconds,
        include_observation: inputs.observation.is_some(),
        include_benchmark: inputs.benchmark.is_some(),
        limitations: inputs.metadata.limitations,
        notes: inputs.metadata.notes,
    };

    let score = build_score_section(inputs.score);
    let fixes = build_fix_section(inputs.fix_plan, inputs.fix_plan_impact);
    let observation = inputs.observation.as_ref().map(build_observation_section);
    let benchmark = inputs.benchmark.map(build_benchmark_section);
    let divergence = inputs
        .observation
        .as_ref()
        .map(|obs| build_divergence_section(obs.comparison));

    let total = score.total_score;
    let score_conservative = (total * 0.85).floor() as u32;
    let score_typical = total.floor() as u32;
    let score_generous = total.mul_add(1.1, 0.0).min(100.0).floor() as u32;

    FullReport {
        metadata,
        score,
        fixes,
        observation,
        benchmark,
        divergence,
        score_conservative,
        score_typical,
        score_generous,
    }
}

fn build_score_section(score: &ScoreBreakdown) -> ScoreSection {
    let category_scores = score
        .category_breakdowns
        .iter()
        .map(|(cat, breakdown)| (*cat, round2(breakdown.raw_score)))
        .collect();

    let criterion_scores = score
        .criterion_scores
        .iter()
        .map(|cs| CriterionScoreItem {
            id: cs.criterion_id.to_string(),
            name: cs.criterion_name.to_string(),
            weight: cs.weight,
            raw_score: round2(cs.raw_score),
            weighted_points: round2(cs.points_earned),
        })
        .collect();

    ScoreSection {
        total_score: round2(score.total_score),
        grade: score.grade.clone(),
        grade_description: score.grade_description.clone(),
        category_scores,
        criterion_scores,
        total_questions: score.total_questions,
        questions_answered: score.questions_answered,
        questions_partial: score.questions_partial,
        questions_unanswered: score.questions_unanswered,
        coverage_percentage: round2(score.coverage_percentage),
        calculation_summary: score.calculation_summary.clone(),
        formula_used: score.formula_used.clone(),
        rubric_version: score.rubric_version.clone(),
    }
}

fn effort_label(effort: &EffortLevel) -> &'static str {
    match effort {
        EffortLevel::Low => "low",
        EffortLevel::Medium => "medium",
        EffortLevel::High => "high",
    }
}

fn build_fix_section(plan: &FixPlan, impact: Option<&FixPlanImpact>) -> FixSection {
    let impact_by_fix: HashMap<&str, &sourceability_fixes::FixImpactEstimate> = impact
        .map(|i| i.per_fix.iter().map(|e| (e.fix_id.as_str(), e)).collect())
        .unwrap_or_default();

    let fixes: Vec<FixItem> = plan
        .fixes
        .iter()
        .map(|fix| {
            let estimated_impact = match impact_by_fix.get(fix.id.as_str()) {
                Some(est) => ImpactRangeItem {
                    min: round2(est.range.min),
                    expected: round2(est.range.expected),
                    max: round2(est.range.max),
                },
                None => ImpactRangeItem {
                    min: round2(fix.estimated_impact * 0.5),
                    expected: round2(fix.estimated_impact),
                    max: round2(fix.estimated_impact * 1.5),
                },
            };

            FixItem {
                id: fix.id.clone(),
                reason_code: fix.reason_code.as_str().to_string(),
                title: fix.title.clone(),
                description: fix.description.clone(),
                scaffold: fix.scaffold.clone(),
                priority: fix.priority,
                estimated_impact,
                effort_level: effort_label(&fix.effort).to_string(),
                target_url: fix.target_url.clone(),
                affected_questions: fix.affected_question_ids.clone(),
                affected_categories: fix.affected_categories.clone(),
            }
        })
        .collect();

    let critical_fixes = plan
        .fixes
        .iter()
        .filter(|f| f.reason_code.info().severity == sourceability_fixes::Severity::Critical)
        .count();
    let high_priority_fixes = plan.fixes.iter().filter(|f| f.priority <= 2).count();

    let mut categories_addressed: Vec<_> = plan
        .fixes
        .iter()
        .flat_map(|f| f.affected_categories.iter().copied())
        .collect();
    categories_addressed.sort_by_key(|c| c.as_str());
    categories_addressed.dedup();

    let questions_addressed: usize = plan
        .fixes
        .iter()
        .flat_map(|f| f.affected_question_ids.iter())
        .collect::<std::collections::HashSet<_>>()
        .len();

    FixSection {
        total_fixes: plan.fixes.len(),
        critical_fixes,
        high_priority_fixes,
        estimated_total_impact: round2(
            impact.map(|i| i.total_expected_impact).unwrap_or(plan.total_estimated_impact),
        ),
        fixes,
        categories_addressed,
        questions_addressed,
    }
}

fn build_observation_section(obs: &ObservationInputs<'_>) -> ObservationSection {
    let total = obs.observations.len();
    let with_domain = obs.observations.values().filter(|p| p.has_domain_mention).count();

    let mut question_results: Vec<ObservationQuestionResult> = obs
        .observations
        .iter()
        .map(|(qid, parsed)| ObservationQuestionResult {
            question_id: qid.clone(),
            mentioned: parsed.has_company_mention,
            cited: parsed.has_url_citation,
        })
        .collect();
    question_results.sort_by(|a, b| a.question_id.cmp(&b.question_id));

    ObservationSection {
        company_mention_rate: round3(obs.comparison.mention_rate_obs),
        domain_mention_rate: round3(if total > 0 { with_domain as f64 / total as f64 } else { 0.0 }),
        citation_rate: round3(obs.comparison.citation_rate_obs),
        total_questions: total,
        questions_with_mention: obs.observations.values().filter(|p| p.has_company_mention).count(),
        questions_with_citation: obs.observations.values().filter(|p| p.has_url_citation).count(),
        provider: obs.provider.clone(),
        model: obs.model.clone(),
        question_results,
        prediction_accuracy: round3(obs.comparison.prediction_accuracy),
        optimistic_predictions: obs.comparison.optimistic_predictions,
        pessimistic_predictions: obs.comparison.pessimistic_predictions,
        correct_predictions: obs.comparison.correct_predictions,
        insights: observation_insights(obs.comparison),
        recommendations: observation_recommendations(obs.comparison),
    }
}

fn observation_insights(summary: &ComparisonSummary) -> Vec<String> {
    let mut insights = Vec::new();
    if summary.prediction_accuracy < 0.5 {
        insights.push(format!(
            "Simulated answerability predicted observed AI behavior in only {:.0}% of questions.",
            summary.prediction_accuracy * 100.0
        ));
    }
    if summary.divergence.level == DivergenceLevel::High {
        insights.push(
            "Observed mention rate diverges sharply from the simulation; treat the current score as stale.".to_string(),
        );
    }
    if summary.mention_rate_obs < 0.3 {
        insights.push("The company is rarely surfaced by the AI system across the tested questions.".to_string());
    }
    insights
}

fn observation_recommendations(summary: &ComparisonSummary) -> Vec<String> {
    let mut recs = Vec::new();
    if summary.optimistic_predictions > summary.pessimistic_predictions {
        recs.push(
            "Prioritize fixes for questions the simulation rated answerable but the AI system never surfaced.".to_string(),
        );
    }
    if summary.pessimistic_predictions > 0 {
        recs.push(
            "Some questions scored unanswerable were still surfaced by the AI system; treat those scores as conservative.".to_string(),
        );
    }
    recs
}

fn build_benchmark_section(result: &BenchmarkResult) -> BenchmarkSection {
    let competitors: Vec<String> = result
        .head_to_heads
        .iter()
        .map(|h| h.competitor_name.clone())
        .collect();

    BenchmarkSection {
        total_competitors: result.total_competitors,
        total_questions: result.total_questions,
        your_mention_rate: round3(result.your_mention_rate),
        your_citation_rate: round3(result.your_citation_rate),
        avg_competitor_mention_rate: round3(result.avg_competitor_mention_rate),
        avg_competitor_citation_rate: round3(result.avg_competitor_citation_rate),
        overall_wins: result.overall_wins,
        overall_losses: result.overall_losses,
        overall_ties: result.overall_ties,
        overall_win_rate: round3(result.overall_win_rate),
        unique_wins: result.unique_wins.clone(),
        unique_losses: result.unique_losses.clone(),
        competitors,
        insights: benchmark_insights(result),
        recommendations: benchmark_recommendations(result),
    }
}

fn benchmark_insights(result: &BenchmarkResult) -> Vec<String> {
    let mut insights = Vec::new();
    if result.your_mention_rate < result.avg_competitor_mention_rate {
        insights.push(format!(
            "Competitors are mentioned {:.0} percentage points more often on average.",
            (result.avg_competitor_mention_rate - result.your_mention_rate) * 100.0
        ));
    }
    if !result.unique_losses.is_empty() {
        insights.push(format!(
            "{} question(s) surfaced every competitor but not this company.",
            result.unique_losses.len()
        ));
    }
    insights
}

fn benchmark_recommendations(result: &BenchmarkResult) -> Vec<String> {
    let mut recs = Vec::new();
    if result.overall_win_rate < 0.5 {
        recs.push(
            "Close the sourceability gap on the categories driving the most losses before the next refresh.".to_string(),
        );
    }
    recs
}

fn build_divergence_section(summary: &ComparisonSummary) -> DivergenceSection {
    let div = &summary.divergence;
    let mut refresh_reasons = Vec::new();
    if div.level == DivergenceLevel::High {
        refresh_reasons.push("Mention-rate delta exceeds the high-divergence threshold.".to_string());
    }
    if div.prediction_accuracy < 0.5 {
        refresh_reasons.push("Prediction accuracy has fallen below 50%.".to_string());
    }

    let optimism_bias = summary.optimistic_predictions > summary.pessimistic_predictions;
    let pessimism_bias = summary.pessimistic_predictions > summary.optimistic_predictions;

    let mut calibration_notes = Vec::new();
    if optimism_bias {
        calibration_notes.push(
            "The simulation tends to rate questions answerable more often than the AI system confirms.".to_string(),
        );
    } else if pessimism_bias {
        calibration_notes.push(
            "The simulation tends to rate questions unanswerable more often than the AI system confirms.".to_string(),
        );
    }

    DivergenceSection {
        level: format!("{:?}", div.level).to_lowercase(),
        mention_rate_delta: round3(div.mention_rate_delta),
        prediction_accuracy: round3(div.prediction_accuracy),
        should_refresh: div.should_refresh,
        refresh_reasons,
        optimism_bias,
        pessimism_bias,
        calibration_notes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sourceability_fixes::FixGenerator;
    use sourceability_scoring::ScoreCalculator;
    use sourceability_scoring::ScoringRubric;
    use sourceability_simulation::SimulationResult;
    use std::collections::HashMap as Map;

    fn empty_simulation() -> SimulationResult {
        SimulationResult {
            company_name: "Acme".to_string(),
            question_results: Vec::new(),
            total_questions: 0,
            questions_answered: 0,
            questions_partial: 0,
            questions_unanswered: 0,
            category_scores: Map::new(),
            difficulty_scores: Map::new(),
            overall_score: 0.0,
            coverage_score: 0.0,
            confidence_score: 0.0,
        }
    }

    #[test]
    fn assembles_a_report_without_optional_sections() {
        let simulation = empty_simulation();
        let score = ScoreCalculator::new(ScoringRubric::default()).calculate(&simulation);
        let fix_plan = FixGenerator::default().generate(&simulation);

        let report = assemble(ReportInputs {
            metadata: ReportMetadataInputs {
                report_id: "r1".to_string(),
                site_id: "s1".to_string(),
                run_id: "run1".to_string(),
                company_name: "Acme".to_string(),
                domain: "acme.com".to_string(),
                created_at: DateTime::parse_from_rfc3339("2026-01-01T00:00:00Z").unwrap().with_timezone(&Utc),
                run_started_at: None,
                run_completed_at: None,
                limitations: Vec::new(),
                notes: Vec::new(),
            },
            score: &score,
            fix_plan: &fix_plan,
            fix_plan_impact: None,
            observation: None,
            benchmark: None,
        });

        assert_eq!(report.metadata.version, ReportVersion::V1_1);
        assert!(!report.metadata.include_observation);
        assert!(report.observation.is_none());
        assert!(report.divergence.is_none());
        assert_eq!(report.score_typical, 0);
    }
}
