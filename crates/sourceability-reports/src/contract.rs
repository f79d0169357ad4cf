//! The versioned `FullReport` wire contract. Grounded on
//! `original_source/worker/reports/contract.py` and the teacher's
//! `riptide-schemas` versioned-envelope pattern (explicit `Version` enum,
//! `CURRENT_VERSION` constant).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sourceability_types::model::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportVersion {
    V1_0,
    V1_1,
}

impl ReportVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportVersion::V1_0 => "1.0",
            ReportVersion::V1_1 => "1.1",
        }
    }
}

pub const CURRENT_VERSION: ReportVersion = ReportVersion::V1_1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub report_id: String,
    pub site_id: String,
    pub run_id: String,
    pub version: ReportVersion,
    pub company_name: String,
    pub domain: String,
    pub created_at: DateTime<Utc>,
    pub run_started_at: Option<DateTime<Utc>>,
    pub run_completed_at: Option<DateTime<Utc>>,
    pub run_duration_seconds: Option<f64>,
    pub include_observation: bool,
    pub include_benchmark: bool,
    pub limitations: Vec<String>,
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriterionScoreItem {
    pub id: String,
    pub name: String,
    pub weight: f64,
    pub raw_score: f64,
    pub weighted_points: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreSection {
    pub total_score: f64,
    pub grade: String,
    pub grade_description: String,
    pub category_scores: std::collections::HashMap<Category, f64>,
    pub criterion_scores: Vec<CriterionScoreItem>,
    pub total_questions: usize,
    pub questions_answered: usize,
    pub questions_partial: usize,
    pub questions_unanswered: usize,
    pub coverage_percentage: f64,
    pub calculation_summary: Vec<String>,
    pub formula_used: String,
    pub rubric_version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpactRangeItem {
    pub min: f64,
    pub expected: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixItem {
    pub id: String,
    pub reason_code: String,
    pub title: String,
    pub description: String,
    pub scaffold: String,
    pub priority: u8,
    pub estimated_impact: ImpactRangeItem,
    pub effort_level: String,
    pub target_url: Option<String>,
    pub affected_questions: Vec<String>,
    pub affected_categories: Vec<Category>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixSection {
    pub total_fixes: usize,
    pub critical_fixes: usize,
    pub high_priority_fixes: usize,
    pub estimated_total_impact: f64,
    pub fixes: Vec<FixItem>,
    pub categories_addressed: Vec<Category>,
    pub questions_addressed: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationQuestionResult {
    pub question_id: String,
    pub mentioned: bool,
    pub cited: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationSection {
    pub company_mention_rate: f64,
    pub domain_mention_rate: f64,
    pub citation_rate: f64,
    pub total_questions: usize,
    pub questions_with_mention: usize,
    pub questions_with_citation: usize,
    pub provider: String,
    pub model: String,
    pub question_results: Vec<ObservationQuestionResult>,
    pub prediction_accuracy: f64,
    pub optimistic_predictions: usize,
    pub pessimistic_predictions: usize,
    pub correct_predictions: usize,
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkSection {
    pub total_competitors: usize,
    pub total_questions: usize,
    pub your_mention_rate: f64,
    pub your_citation_rate: f64,
    pub avg_competitor_mention_rate: f64,
    pub avg_competitor_citation_rate: f64,
    pub overall_wins: usize,
    pub overall_losses: usize,
    pub overall_ties: usize,
    pub overall_win_rate: f64,
    pub unique_wins: Vec<String>,
    pub unique_losses: Vec<String>,
    pub competitors: Vec<String>,
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DivergenceSection {
    pub level: String,
    pub mention_rate_delta: f64,
    pub prediction_accuracy: f64,
    pub should_refresh: bool,
    pub refresh_reasons: Vec<String>,
    pub optimism_bias: bool,
    pub pessimism_bias: bool,
    pub calibration_notes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullReport {
    pub metadata: ReportMetadata,
    pub score: ScoreSection,
    pub fixes: FixSection,
    pub observation: Option<ObservationSection>,
    pub benchmark: Option<BenchmarkSection>,
    pub divergence: Option<DivergenceSection>,
    pub score_conservative: u32,
    pub score_typical: u32,
    pub score_generous: u32,
}
