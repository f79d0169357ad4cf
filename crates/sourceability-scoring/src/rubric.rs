//! Scoring rubric: criteria, category weights, difficulty multipliers
//! and letter-grade thresholds. Grounded on
//! `original_source/worker/scoring/rubric.py`.

use serde::{Deserialize, Serialize};
use sourceability_types::model::{Category, Difficulty};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreLevel {
    Excellent,
    Good,
    Fair,
    NeedsWork,
    Poor,
}

#[derive(Debug, Clone, Serialize)]
pub struct RubricCriterion {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub weight: f64,
    pub max_points: f64,
    pub excellent_threshold: f64,
    pub good_threshold: f64,
    pub fair_threshold: f64,
    pub needs_work_threshold: f64,
}

impl RubricCriterion {
    pub fn level(&self, score: f64) -> ScoreLevel {
        if score >= self.excellent_threshold {
            ScoreLevel::Excellent
        } else if score >= self.good_threshold {
            ScoreLevel::Good
        } else if score >= self.fair_threshold {
            ScoreLevel::Fair
        } else if score >= self.needs_work_threshold {
            ScoreLevel::NeedsWork
        } else {
            ScoreLevel::Poor
        }
    }
}

fn criterion(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    weight: f64,
    max_points: f64,
) -> RubricCriterion {
    RubricCriterion {
        id,
        name,
        description,
        weight,
        max_points,
        excellent_threshold: 0.9,
        good_threshold: 0.8,
        fair_threshold: 0.7,
        needs_work_threshold: 0.6,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryWeight {
    pub weight: f64,
    pub description: &'static str,
    pub importance: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct DifficultyMultiplier {
    pub multiplier: f64,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoringRubric {
    pub name: String,
    pub version: String,
    pub description: String,
    pub criteria: Vec<RubricCriterion>,
    pub category_weights: HashMap<Category, CategoryWeight>,
    pub difficulty_multipliers: HashMap<Difficulty, DifficultyMultiplier>,
    pub grade_thresholds: Vec<(&'static str, f64)>,
}

impl Default for ScoringRubric {
    fn default() -> Self {
        let criteria = vec![
            criterion(
                "content_relevance",
                "Content Relevance",
                "How well retrieved content matches the question",
                0.35,
                35.0,
            ),
            criterion(
                "signal_coverage",
                "Signal Coverage",
                "Presence of expected information signals",
                0.35,
                35.0,
            ),
            criterion(
                "answer_confidence",
                "Answer Confidence",
                "Confidence that the answer is correct and complete",
                0.20,
                20.0,
            ),
            criterion(
                "source_quality",
                "Source Quality",
                "Quality and authority of source pages",
                0.10,
                10.0,
            ),
        ];

        let mut category_weights = HashMap::new();
        category_weights.insert(
            Category::Identity,
            CategoryWeight {
                weight: 0.25,
                description: "Who you are and what you do",
                importance: "Foundation for AI to accurately describe your business",
            },
        );
        category_weights.insert(
            Category::Offerings,
            CategoryWeight {
                weight: 0.30,
                description: "Products, services, and capabilities",
                importance: "Critical for AI recommendations and purchase decisions",
            },
        );
        category_weights.insert(
            Category::Contact,
            CategoryWeight {
                weight: 0.15,
                description: "How to reach and engage with you",
                importance: "Enables conversions from AI-driven traffic",
            },
        );
        category_weights.insert(
            Category::Trust,
            CategoryWeight {
                weight: 0.15,
                description: "Credibility and social proof",
                importance: "Builds confidence in AI recommendations",
            },
        );
        category_weights.insert(
            Category::Differentiation,
            CategoryWeight {
                weight: 0.15,
                description: "What makes you unique",
                importance: "Helps AI recommend you over competitors",
            },
        );

        let mut difficulty_multipliers = HashMap::new();
        difficulty_multipliers.insert(
            Difficulty::Easy,
            DifficultyMultiplier {
                multiplier: 1.0,
                description: "Basic information that should be clearly stated",
            },
        );
        difficulty_multipliers.insert(
            Difficulty::Medium,
            DifficultyMultiplier {
                multiplier: 1.2,
                description: "Information that may require some inference",
            },
        );
        difficulty_multipliers.insert(
            Difficulty::Hard,
            DifficultyMultiplier {
                multiplier: 1.5,
                description: "Complex information that may span multiple pages",
            },
        );

        let grade_thresholds = vec![
            ("A+", 97.0),
            ("A", 93.0),
            ("A-", 90.0),
            ("B+", 87.0),
            ("B", 83.0),
            ("B-", 80.0),
            ("C+", 77.0),
            ("C", 73.0),
            ("C-", 70.0),
            ("D+", 67.0),
            ("D", 63.0),
            ("D-", 60.0),
            ("F", 0.0),
        ];

        Self {
            name: "Findable Score Rubric v1".to_string(),
            version: "1.0".to_string(),
            description:
                "Evaluates how well AI systems can find and cite information about your business"
                    .to_string(),
            criteria,
            category_weights,
            difficulty_multipliers,
            grade_thresholds,
        }
    }
}

impl ScoringRubric {
    pub fn grade(&self, score: f64) -> &'static str {
        let mut sorted = self.grade_thresholds.clone();
        sorted.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap());
        for (grade, threshold) in sorted {
            if score >= threshold {
                return grade;
            }
        }
        "F"
    }

    pub fn grade_description(&self, grade: &str) -> &'static str {
        match grade {
            "A+" => "Exceptional - Your site is highly optimized for AI discovery",
            "A" => "Excellent - AI systems can easily find and cite your information",
            "A-" => "Very Good - Strong AI sourceability with minor gaps",
            "B+" => "Good - Solid foundation with room for improvement",
            "B" => "Above Average - Most key information is discoverable",
            "B-" => "Satisfactory - Some important information may be missed",
            "C+" => "Fair - Noticeable gaps in AI discoverability",
            "C" => "Average - Significant improvements needed",
            "C-" => "Below Average - Many questions cannot be answered",
            "D+" => "Poor - Major content gaps affecting AI discovery",
            "D" => "Very Poor - Critical information is missing",
            "D-" => "Failing - AI systems struggle to find your information",
            "F" => "Critical - Immediate action required",
            _ => "Unknown grade",
        }
    }

    pub fn category_weight(&self, category: Category) -> f64 {
        self.category_weights
            .get(&category)
            .map(|c| c.weight)
            .unwrap_or(0.2)
    }

    pub fn difficulty_multiplier(&self, difficulty: Difficulty) -> f64 {
        self.difficulty_multipliers
            .get(&difficulty)
            .map(|d| d.multiplier)
            .unwrap_or(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_weights_sum_to_one() {
        let rubric = ScoringRubric::default();
        let total: f64 = Category::ALL.iter().map(|c| rubric.category_weight(*c)).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn grade_boundaries_are_inclusive() {
        let rubric = ScoringRubric::default();
        assert_eq!(rubric.grade(97.0), "A+");
        assert_eq!(rubric.grade(96.9), "A");
        assert_eq!(rubric.grade(0.0), "F");
    }
}
