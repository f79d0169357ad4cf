//! Tier C impact estimation: a fast, lookup-table based projection of how
//! much a fix (or a whole plan) would move the Findable Score, with no
//! re-simulation. Grounded on `original_source/worker/fixes/impact.py`.

use crate::generator::{Fix, FixPlan};
use crate::reason_codes::{ReasonCode, Severity};
use serde::{Deserialize, Serialize};
use sourceability_types::model::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EstimateConfidence {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpactRange {
    pub min: f64,
    pub expected: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixImpactEstimate {
    pub fix_id: String,
    pub reason_code: ReasonCode,
    pub range: ImpactRange,
    pub confidence: EstimateConfidence,
    pub affected_question_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixPlanImpact {
    pub per_fix: Vec<FixImpactEstimate>,
    pub total_expected_impact: f64,
    pub total_range: ImpactRange,
}

/// (min, expected, max) point-score impact for a single affected question,
/// before question-count and category weighting are applied.
fn base_impact(code: ReasonCode) -> (f64, f64, f64) {
    match code {
        ReasonCode::MissingDefinition => (4.0, 7.0, 10.0),
        ReasonCode::MissingPricing => (3.5, 6.0, 9.0),
        ReasonCode::MissingContact => (2.5, 4.5, 7.0),
        ReasonCode::MissingLocation => (1.5, 3.0, 5.0),
        ReasonCode::MissingFeatures => (3.0, 5.5, 8.0),
        ReasonCode::MissingSocialProof => (1.5, 3.0, 5.0),
        ReasonCode::BuriedAnswer => (1.5, 3.0, 5.0),
        ReasonCode::FragmentedInfo => (1.0, 2.0, 3.5),
        ReasonCode::NoDedicatedPage => (1.5, 3.0, 5.0),
        ReasonCode::PoorHeadings => (0.5, 1.5, 3.0),
        ReasonCode::NotCitable => (1.0, 2.0, 3.5),
        ReasonCode::VagueLanguage => (1.0, 2.0, 3.5),
        ReasonCode::OutdatedInfo => (2.0, 4.0, 6.5),
        ReasonCode::Inconsistent => (3.0, 5.5, 8.5),
        ReasonCode::TrustGap => (1.5, 3.0, 5.0),
        ReasonCode::NoAuthority => (1.0, 2.0, 3.5),
        ReasonCode::UnverifiedClaims => (1.0, 2.0, 3.5),
        ReasonCode::RenderRequired => (2.0, 4.0, 6.5),
        ReasonCode::BlockedByRobots => (4.0, 7.0, 10.0),
    }
}

fn question_count_multiplier(n: usize) -> f64 {
    match n {
        0 => 0.0,
        1 => 1.0,
        2 => 1.5,
        3 => 1.8,
        4 => 2.0,
        5 => 2.2,
        _ => (2.2 + 0.05 * (n as f64 - 5.0)).min(2.5),
    }
}

fn category_weight_factor(categories: &[Category]) -> f64 {
    categories
        .iter()
        .map(|c| match c {
            Category::Identity => 0.25,
            Category::Offerings => 0.30,
            Category::Contact => 0.15,
            Category::Trust => 0.15,
            Category::Differentiation => 0.15,
        })
        .fold(0.0_f64, f64::max)
        .max(0.1)
}

fn estimate_confidence(severity: Severity, affected_count: usize) -> EstimateConfidence {
    match severity {
        Severity::Critical | Severity::High if affected_count >= 2 => EstimateConfidence::High,
        Severity::Critical | Severity::High => EstimateConfidence::Medium,
        Severity::Medium if affected_count >= 3 => EstimateConfidence::Medium,
        Severity::Medium => EstimateConfidence::Low,
        Severity::Low => EstimateConfidence::Low,
    }
}

pub struct TierCEstimator {
    pub max_total_impact: f64,
}

impl Default for TierCEstimator {
    fn default() -> Self {
        Self { max_total_impact: 30.0 }
    }
}

impl TierCEstimator {
    pub fn new(max_total_impact: f64) -> Self {
        Self { max_total_impact }
    }

    pub fn estimate_fix(&self, fix: &Fix) -> FixImpactEstimate {
        let (min, expected, max) = base_impact(fix.reason_code);
        let count = fix.affected_question_ids.len().max(1);
        let count_mult = question_count_multiplier(count);
        let cat_factor = category_weight_factor(&fix.affected_categories);
        let scale = count_mult * cat_factor * 3.0;

        let info = crate::reason_codes::reason_info(fix.reason_code);
        let confidence = estimate_confidence(info.severity, count);

        FixImpactEstimate {
            fix_id: fix.id.clone(),
            reason_code: fix.reason_code,
            range: ImpactRange {
                min: min * scale,
                expected: expected * scale,
                max: max * scale,
            },
            confidence,
            affected_question_count: count,
        }
    }

    pub fn estimate_plan(&self, plan: &FixPlan) -> FixPlanImpact {
        let estimates: Vec<FixImpactEstimate> =
            plan.fixes.iter().map(|f| self.estimate_fix(f)).collect();

        let mut total_min = 0.0;
        let mut total_expected = 0.0;
        let mut total_max = 0.0;
        for (i, est) in estimates.iter().enumerate() {
            let decay = 0.8_f64.powi(i as i32);
            total_min += est.range.min * decay;
            total_expected += est.range.expected * decay;
            total_max += est.range.max * decay;
        }

        let total_range = ImpactRange {
            min: total_min.min(self.max_total_impact),
            expected: total_expected.min(self.max_total_impact),
            max: total_max.min(self.max_total_impact),
        };

        FixPlanImpact {
            total_expected_impact: total_range.expected,
            per_fix: estimates,
            total_range,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fix(code: ReasonCode, n_questions: usize) -> Fix {
        Fix {
            id: "f1".to_string(),
            reason_code: code,
            title: String::new(),
            description: String::new(),
            affected_question_ids: (0..n_questions).map(|i| i.to_string()).collect(),
            affected_categories: vec![Category::Offerings],
            scaffold: String::new(),
            examples: Vec::new(),
            extracted_content: Vec::new(),
            target_url: None,
            target_location: String::new(),
            priority: 1,
            effort: crate::generator::EffortLevel::Low,
            estimated_impact: 0.0,
        }
    }

    #[test]
    fn more_affected_questions_increase_expected_impact() {
        let estimator = TierCEstimator::default();
        let small = estimator.estimate_fix(&fix(ReasonCode::MissingPricing, 1));
        let large = estimator.estimate_fix(&fix(ReasonCode::MissingPricing, 4));
        assert!(large.range.expected > small.range.expected);
    }

    #[test]
    fn plan_total_is_capped() {
        let estimator = TierCEstimator::new(5.0);
        let plan = FixPlan {
            company_name: "Acme".to_string(),
            fixes: vec![
                fix(ReasonCode::BlockedByRobots, 5),
                fix(ReasonCode::MissingDefinition, 5),
                fix(ReasonCode::Inconsistent, 5),
            ],
            total_problem_questions: 15,
            total_estimated_impact: 0.0,
        };
        let impact = estimator.estimate_plan(&plan);
        assert!(impact.total_range.expected <= 5.0);
    }
}
