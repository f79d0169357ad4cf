//! Turns a simulation's problem questions into a prioritized fix plan.
//! Grounded on `original_source/worker/fixes/generator.py`.

use crate::reason_codes::{reason_info, ReasonCode};
use crate::templates::{template_for, FixTemplate};
use serde::{Deserialize, Serialize};
use sourceability_simulation::{QuestionResult, SimulationResult};
use sourceability_types::model::{Answerability, Category, ConfidenceLevel};
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixGeneratorConfig {
    pub low_score_threshold: f64,
    pub partial_threshold: f64,
    pub max_fixes: usize,
    pub max_fixes_per_category: usize,
    pub include_examples: bool,
    pub extract_site_content: bool,
    pub max_extracted_snippets: usize,
}

impl Default for FixGeneratorConfig {
    fn default() -> Self {
        Self {
            low_score_threshold: 0.5,
            partial_threshold: 0.7,
            max_fixes: 10,
            max_fixes_per_category: 3,
            include_examples: true,
            extract_site_content: true,
            max_extracted_snippets: 3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EffortLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedContent {
    pub snippet: String,
    pub source_url: String,
    pub relevance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fix {
    pub id: String,
    pub reason_code: ReasonCode,
    pub title: String,
    pub description: String,
    pub affected_question_ids: Vec<String>,
    pub affected_categories: Vec<Category>,
    pub scaffold: String,
    pub examples: Vec<String>,
    pub extracted_content: Vec<ExtractedContent>,
    pub target_url: Option<String>,
    pub target_location: String,
    pub priority: u8,
    pub effort: EffortLevel,
    pub estimated_impact: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixPlan {
    pub company_name: String,
    pub fixes: Vec<Fix>,
    pub total_problem_questions: usize,
    pub total_estimated_impact: f64,
}

impl FixPlan {
    pub fn get_top_fixes(&self, n: usize) -> Vec<&Fix> {
        let mut sorted: Vec<&Fix> = self.fixes.iter().collect();
        sorted.sort_by(|a, b| {
            a.priority
                .cmp(&b.priority)
                .then(b.estimated_impact.partial_cmp(&a.estimated_impact).unwrap())
        });
        sorted.into_iter().take(n).collect()
    }
}

pub struct FixGenerator {
    config: FixGeneratorConfig,
}

impl Default for FixGenerator {
    fn default() -> Self {
        Self::new(FixGeneratorConfig::default())
    }
}

impl FixGenerator {
    pub fn new(config: FixGeneratorConfig) -> Self {
        Self { config }
    }

    pub fn generate(&self, simulation: &SimulationResult) -> FixPlan {
        let problems = self.identify_problems(simulation);
        let mut diagnoses: HashMap<ReasonCode, Vec<&QuestionResult>> = HashMap::new();
        for q in &problems {
            for code in self.diagnose_reasons(q) {
                diagnoses.entry(code).or_default().push(q);
            }
        }

        let mut fixes: Vec<Fix> = diagnoses
            .into_iter()
            .map(|(code, questions)| self.build_fix(code, &questions))
            .collect();

        fixes.sort_by(|a, b| {
            a.priority
                .cmp(&b.priority)
                .then(b.estimated_impact.partial_cmp(&a.estimated_impact).unwrap())
        });

        let mut per_category: HashMap<Category, usize> = HashMap::new();
        let mut capped = Vec::new();
        for fix in fixes {
            let mut allowed = true;
            for cat in &fix.affected_categories {
                let count = per_category.entry(*cat).or_insert(0);
                if *count >= self.config.max_fixes_per_category {
                    allowed = false;
                }
            }
            if allowed {
                for cat in &fix.affected_categories {
                    *per_category.entry(*cat).or_insert(0) += 1;
                }
                capped.push(fix);
            }
            if capped.len() >= self.config.max_fixes {
                break;
            }
        }

        let total_estimated_impact: f64 = capped.iter().map(|f| f.estimated_impact).sum();

        FixPlan {
            company_name: simulation.company_name.clone(),
            total_problem_questions: problems.len(),
            total_estimated_impact,
            fixes: capped,
        }
    }

    fn identify_problems<'a>(&self, simulation: &'a SimulationResult) -> Vec<&'a QuestionResult> {
        simulation
            .question_results
            .iter()
            .filter(|q| match q.answerability {
                Answerability::Not | Answerability::Contradictory => true,
                Answerability::Partially => q.score < self.config.partial_threshold,
                Answerability::Fully => q.score < self.config.low_score_threshold,
            })
            .collect()
    }

    /// Walks the fixed precedence order: contradictory, zero chunks, low
    /// average relevance, low signal coverage (category/keyword
    /// sensitive), fragmented coverage, low confidence, then a final
    /// fallback. Each step is exclusive of the ones before it.
    fn diagnose_reasons(&self, question: &QuestionResult) -> Vec<ReasonCode> {
        let mut codes = Vec::new();

        if question.answerability == Answerability::Contradictory {
            codes.push(ReasonCode::Inconsistent);
        } else if question.context.total_chunks == 0 {
            codes.push(match question.category {
                Category::Offerings => ReasonCode::MissingFeatures,
                Category::Contact => ReasonCode::MissingContact,
                Category::Trust => ReasonCode::MissingSocialProof,
                Category::Identity => ReasonCode::MissingDefinition,
                Category::Differentiation => ReasonCode::NoDedicatedPage,
            });
        } else if question.context.avg_relevance_score < 0.4 {
            codes.push(ReasonCode::BuriedAnswer);
        } else {
            let signal_ratio = if question.signals_total > 0 {
                question.signals_found as f64 / question.signals_total as f64
            } else {
                1.0
            };

            if signal_ratio < 0.3 {
                let q_text = question.question_text.to_lowercase();
                if q_text.contains("price") || q_text.contains("cost") || q_text.contains("pricing") {
                    codes.push(ReasonCode::MissingPricing);
                } else if q_text.contains("contact")
                    || q_text.contains("reach")
                    || q_text.contains("email")
                    || q_text.contains("phone")
                {
                    codes.push(ReasonCode::MissingContact);
                } else if q_text.contains("location") || q_text.contains("located") || q_text.contains("where") {
                    codes.push(ReasonCode::MissingLocation);
                } else if question.category == Category::Trust {
                    codes.push(ReasonCode::TrustGap);
                } else {
                    codes.push(ReasonCode::MissingDefinition);
                }
            } else if signal_ratio < 0.6 {
                codes.push(ReasonCode::FragmentedInfo);
            } else if question.confidence == ConfidenceLevel::Low {
                codes.push(ReasonCode::VagueLanguage);
            }
        }

        if codes.is_empty() {
            codes.push(ReasonCode::BuriedAnswer);
        }

        codes.truncate(2);
        codes
    }

    fn build_fix(&self, code: ReasonCode, questions: &[&QuestionResult]) -> Fix {
        let template = template_for(code);
        let info = reason_info(code);

        let affected_question_ids: Vec<String> =
            questions.iter().map(|q| q.question_id.clone()).collect();
        let mut affected_categories: Vec<Category> = questions.iter().map(|q| q.category).collect();
        affected_categories.sort_by_key(|c| c.as_str());
        affected_categories.dedup();

        let extracted_content = if self.config.extract_site_content {
            self.extract_content(questions)
        } else {
            Vec::new()
        };

        let scaffold = self.build_scaffold(&template, &extracted_content);
        let effort = self.determine_effort(code, questions.len());
        let estimated_impact = self.estimate_impact(&info, questions);
        let target_url = self.suggest_target_url(code, questions);

        Fix {
            id: Uuid::new_v4().to_string(),
            reason_code: code,
            title: template.title.to_string(),
            description: template.description.to_string(),
            affected_question_ids,
            affected_categories,
            scaffold,
            examples: if self.config.include_examples {
                template.examples.iter().map(|s| s.to_string()).collect()
            } else {
                Vec::new()
            },
            extracted_content,
            target_url,
            target_location: template.target_location.to_string(),
            priority: template.priority,
            effort,
            estimated_impact,
        }
    }

    fn extract_content(&self, questions: &[&QuestionResult]) -> Vec<ExtractedContent> {
        let mut out = Vec::new();
        for q in questions {
            for chunk in q.context.chunks.iter().take(self.config.max_extracted_snippets) {
                out.push(ExtractedContent {
                    snippet: chunk.content.chars().take(280).collect(),
                    source_url: chunk.url.clone(),
                    relevance: chunk.combined_score,
                });
            }
            if out.len() >= self.config.max_extracted_snippets {
                break;
            }
        }
        out.truncate(self.config.max_extracted_snippets);
        out
    }

    fn build_scaffold(&self, template: &FixTemplate, extracted: &[ExtractedContent]) -> String {
        let mut scaffold = template.scaffold_template.to_string();
        if !extracted.is_empty() {
            scaffold.push_str("\n\n---\nExisting related content found on the site:\n");
            for e in extracted {
                scaffold.push_str(&format!("- {} ({})\n", e.snippet, e.source_url));
            }
        }
        scaffold
    }

    fn determine_effort(&self, code: ReasonCode, affected_count: usize) -> EffortLevel {
        if matches!(code, ReasonCode::RenderRequired | ReasonCode::BlockedByRobots) {
            return EffortLevel::High;
        }
        let content_creation = matches!(
            code,
            ReasonCode::MissingDefinition
                | ReasonCode::MissingPricing
                | ReasonCode::MissingFeatures
                | ReasonCode::MissingSocialProof
                | ReasonCode::NoDedicatedPage
        );
        if content_creation {
            return EffortLevel::Medium;
        }
        if affected_count > 3 {
            return EffortLevel::Medium;
        }
        EffortLevel::Low
    }

    fn estimate_impact(&self, info: &crate::reason_codes::ReasonCodeInfo, questions: &[&QuestionResult]) -> f64 {
        let question_weight: f64 = questions.iter().map(|q| q.weight).sum();
        info.typical_impact * (1.0 + (question_weight - 1.0).max(0.0) * 0.1)
    }

    fn suggest_target_url(&self, code: ReasonCode, questions: &[&QuestionResult]) -> Option<String> {
        let category_url = match code {
            ReasonCode::MissingPricing => Some("/pricing"),
            ReasonCode::MissingContact => Some("/contact"),
            ReasonCode::MissingFeatures => Some("/features"),
            ReasonCode::MissingSocialProof => Some("/case-studies"),
            ReasonCode::MissingDefinition | ReasonCode::MissingLocation => Some("/about"),
            ReasonCode::BlockedByRobots => Some("/robots.txt"),
            _ => None,
        };
        if let Some(path) = category_url {
            return Some(path.to_string());
        }
        questions
            .iter()
            .flat_map(|q| q.context.source_pages.iter())
            .next()
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sourceability_simulation::RetrievedContext;
    use sourceability_types::model::{ConfidenceLevel, Difficulty};

    fn problem_question(category: Category, answerability: Answerability, score: f64) -> QuestionResult {
        QuestionResult {
            question_id: "UQ-01".to_string(),
            question_text: "What does Acme do?".to_string(),
            category,
            difficulty: Difficulty::Easy,
            weight: 1.0,
            answerability,
            confidence: ConfidenceLevel::Low,
            score,
            context: RetrievedContext {
                chunks: Vec::new(),
                total_chunks: 0,
                avg_relevance_score: 0.0,
                max_relevance_score: 0.0,
                source_pages: Vec::new(),
                content_preview: String::new(),
            },
            signal_matches: Vec::new(),
            signals_found: 0,
            signals_total: 0,
        }
    }

    fn simulation(results: Vec<QuestionResult>) -> SimulationResult {
        SimulationResult {
            company_name: "Acme".to_string(),
            total_questions: results.len(),
            questions_answered: 0,
            questions_partial: 0,
            questions_unanswered: results.len(),
            category_scores: HashMap::new(),
            difficulty_scores: HashMap::new(),
            overall_score: 0.0,
            coverage_score: 0.0,
            confidence_score: 0.0,
            question_results: results,
        }
    }

    #[test]
    fn not_answerable_question_produces_a_fix() {
        let sim = simulation(vec![problem_question(Category::Identity, Answerability::Not, 0.0)]);
        let plan = FixGenerator::default().generate(&sim);
        assert_eq!(plan.total_problem_questions, 1);
        assert!(!plan.fixes.is_empty());
        assert_eq!(plan.fixes[0].reason_code, ReasonCode::MissingDefinition);
    }

    #[test]
    fn fully_answered_high_score_produces_no_fix() {
        let sim = simulation(vec![problem_question(Category::Identity, Answerability::Fully, 0.95)]);
        let plan = FixGenerator::default().generate(&sim);
        assert_eq!(plan.total_problem_questions, 0);
        assert!(plan.fixes.is_empty());
    }

    #[test]
    fn fix_plan_respects_max_fixes_per_category() {
        let results: Vec<QuestionResult> = (0..5)
            .map(|_| problem_question(Category::Contact, Answerability::Not, 0.0))
            .collect();
        let sim = simulation(results);
        let plan = FixGenerator::default().generate(&sim);
        let contact_fixes = plan
            .fixes
            .iter()
            .filter(|f| f.affected_categories.contains(&Category::Contact))
            .count();
        assert!(contact_fixes <= 3);
    }
}
