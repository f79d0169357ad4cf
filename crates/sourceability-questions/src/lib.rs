//! Question Catalog: the 15 fixed universal questions plus per-site
//! derivation. Grounded on
//! `original_source/worker/questions/{universal,derived}.py`.

mod derived;
mod universal;

pub use derived::{derive_questions, DerivedConfig};
pub use universal::{
    by_category, by_difficulty, by_id, category_weights, total_weight, universal_questions,
    QuestionStats,
};

use serde::{Deserialize, Serialize};
use sourceability_types::model::{Category, Difficulty, QuestionSource};
use std::collections::HashMap;

/// A single evaluation question, either one of the 15 fixed universal
/// questions or one derived from site content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub template: String,
    pub category: Category,
    pub difficulty: Difficulty,
    pub source: QuestionSource,
    pub weight: f64,
    pub description: String,
    pub expected_signals: Vec<String>,
    pub metadata: HashMap<String, String>,
}

impl Question {
    /// Substitutes the literal company name for `{company}` in the
    /// template, per the catalog's single rendering rule.
    pub fn render(&self, company_name: &str) -> String {
        self.template.replace("{company}", company_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionSet {
    pub universal: Vec<Question>,
    pub derived: Vec<Question>,
}

impl QuestionSet {
    pub fn all(&self) -> impl Iterator<Item = &Question> {
        self.universal.iter().chain(self.derived.iter())
    }
}

/// `generateForSite`: the universal 15 plus up to `max_questions`
/// (default 5) derived questions. Missing texts yield an empty derived
/// list, never an error.
pub fn generate_for_site(ctx: &sourceability_types::model::SiteContext) -> QuestionSet {
    QuestionSet {
        universal: universal_questions(),
        derived: derive_questions(ctx, DerivedConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn universal_set_has_exactly_fifteen_questions() {
        assert_eq!(universal_questions().len(), 15);
    }

    #[test]
    fn weights_are_strictly_positive() {
        for q in universal_questions() {
            assert!(q.weight > 0.0);
        }
    }

    #[test]
    fn by_id_round_trips_every_universal_question() {
        for q in universal_questions() {
            let found = by_id(&q.id).expect("question should be findable by id");
            assert_eq!(found.id, q.id);
        }
    }

    #[test]
    fn missing_texts_yield_empty_derived_list() {
        let ctx = sourceability_types::model::SiteContext {
            company_name: "Acme".to_string(),
            domain: "acme.com".to_string(),
            ..Default::default()
        };
        let set = generate_for_site(&ctx);
        assert_eq!(set.universal.len(), 15);
        assert!(set.derived.is_empty());
    }
}
