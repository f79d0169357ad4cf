//! Findable Score calculation: turns a simulation result into a
//! transparent, fully explained 0-100 score. Grounded on
//! `original_source/worker/scoring/{rubric,calculator}.py`.

mod calculator;
mod rubric;

pub use calculator::{
    CategoryBreakdown, CriterionScore, QuestionScore, ScoreBreakdown, ScoreCalculator,
};
pub use rubric::{CategoryWeight, DifficultyMultiplier, RubricCriterion, ScoreLevel, ScoringRubric};
