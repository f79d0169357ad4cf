//! Question Service façade: the thin library surface a caller uses to
//! pull the question catalog without reaching into
//! `sourceability-questions`' owned-value internals directly. Grounded
//! on the teacher's constant-registry re-export pattern
//! (`riptide_intelligence`'s provider registry), backed here by a
//! `once_cell::Lazy` static so the catalog can be handed out as true
//! `&'static` references.

use once_cell::sync::Lazy;
use sourceability_questions::{generate_for_site, Question, QuestionSet};
use sourceability_types::model::{Category, Difficulty, SiteContext};
use std::collections::HashMap;

static UNIVERSAL: Lazy<Vec<Question>> = Lazy::new(sourceability_questions::universal_questions);

#[derive(Debug, Clone)]
pub struct QuestionStats {
    pub total_questions: usize,
    pub total_weight: f64,
    pub by_category: HashMap<Category, usize>,
    pub by_difficulty: HashMap<Difficulty, usize>,
}

pub struct QuestionService;

impl QuestionService {
    pub fn universal() -> &'static [Question] {
        &UNIVERSAL
    }

    pub fn by_category(category: Category) -> Vec<&'static Question> {
        UNIVERSAL.iter().filter(|q| q.category == category).collect()
    }

    pub fn by_difficulty(difficulty: Difficulty) -> Vec<&'static Question> {
        UNIVERSAL.iter().filter(|q| q.difficulty == difficulty).collect()
    }

    pub fn by_id(id: &str) -> Option<&'static Question> {
        UNIVERSAL.iter().find(|q| q.id == id)
    }

    pub fn stats() -> QuestionStats {
        let mut by_category = HashMap::new();
        let mut by_difficulty = HashMap::new();
        let mut total_weight = 0.0;
        for q in UNIVERSAL.iter() {
            *by_category.entry(q.category).or_insert(0) += 1;
            *by_difficulty.entry(q.difficulty).or_insert(0) += 1;
            total_weight += q.weight;
        }
        QuestionStats {
            total_questions: UNIVERSAL.len(),
            total_weight,
            by_category,
            by_difficulty,
        }
    }

    pub fn generate_for_site(ctx: &SiteContext) -> QuestionSet {
        generate_for_site(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn universal_returns_fifteen_static_questions() {
        assert_eq!(QuestionService::universal().len(), 15);
    }

    #[test]
    fn by_id_round_trips_every_universal_question() {
        for q in QuestionService::universal() {
            let found = QuestionService::by_id(&q.id).expect("question should be findable by id");
            assert_eq!(found.id, q.id);
        }
    }

    #[test]
    fn stats_total_weight_matches_sum_of_individual_weights() {
        let stats = QuestionService::stats();
        let expected: f64 = QuestionService::universal().iter().map(|q| q.weight).sum();
        assert!((stats.total_weight - expected).abs() < 1e-9);
    }
}
