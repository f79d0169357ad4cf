//! Per-site derived questions: up to `max_questions` questions mined
//! from crawled content, mirroring
//! `original_source/worker/questions/derived.py`'s content analysis and
//! generation pipeline. Missing or empty site content yields an empty
//! list rather than an error.

use crate::Question;
use once_cell::sync::Lazy;
use regex::Regex;
use sourceability_types::model::{Category, Difficulty, QuestionSource, SiteContext};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone)]
pub struct DerivedConfig {
    pub max_questions: usize,
    pub min_keyword_frequency: usize,
    pub max_keywords: usize,
}

impl Default for DerivedConfig {
    fn default() -> Self {
        Self {
            max_questions: 5,
            min_keyword_frequency: 3,
            max_keywords: 10,
        }
    }
}

static CONTENT_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    vec![
        ("pricing", Regex::new(r"(?i)\b(pricing|price|cost|plans?|subscription)\b").unwrap()),
        ("blog", Regex::new(r"(?i)\b(blog|articles?|news|insights)\b").unwrap()),
        ("careers", Regex::new(r"(?i)\b(careers?|jobs?|hiring|join\s+(us|our\s+team))\b").unwrap()),
        ("api", Regex::new(r"(?i)\b(api|developer|sdk|documentation|docs)\b").unwrap()),
        ("integrations", Regex::new(r"(?i)\b(integrations?|connects?\s+with|works?\s+with)\b").unwrap()),
    ]
});

static PRODUCT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)\bour\s+([A-Z][a-zA-Z0-9]+(?:\s+[A-Z][a-zA-Z0-9]+){0,2})\b").unwrap(),
        Regex::new(r"(?i)\bintroducing\s+([A-Z][a-zA-Z0-9]+(?:\s+[A-Z][a-zA-Z0-9]+){0,2})\b").unwrap(),
        Regex::new(r"\b([A-Z][a-zA-Z0-9]*(?:\s[A-Z][a-zA-Z0-9]*){0,1})(?:\u{2122}|\u{00ae})\b").unwrap(),
    ]
});

static FEATURE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)\bfeatures?\s*(?:include|:)\s*([^.]+)\.").unwrap(),
        Regex::new(r"(?i)\bkey\s+features?\b[^.]*:\s*([^.]+)\.").unwrap(),
    ]
});

static LOCATION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)\bheadquartered\s+in\s+([A-Za-z\s,]+?)(?:\.|,\s*with|\s+and)").unwrap(),
        Regex::new(r"(?i)\boffices?\s+in\s+([A-Za-z\s,]+?)(?:\.|\s+and)").unwrap(),
    ]
});

static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with",
        "by", "from", "up", "about", "into", "through", "during", "is", "are", "was", "were",
        "be", "been", "being", "have", "has", "had", "do", "does", "did", "will", "would",
        "could", "should", "may", "might", "must", "can", "this", "that", "these", "those",
        "i", "you", "he", "she", "it", "we", "they", "what", "which", "who", "whom", "whose",
        "as", "if", "then", "than", "so", "such", "not", "no", "nor", "too", "very", "just",
        "all", "each", "every", "some", "any", "few", "more", "most", "other", "own", "same",
        "our", "their", "your", "its", "his", "her", "them", "us", "him", "my", "me", "out",
        "over", "under", "again", "further", "once", "here", "there", "when", "where", "why",
        "how", "get", "got", "also",
    ]
    .into_iter()
    .collect()
});

#[derive(Debug, Clone, Default)]
pub struct ContentAnalysis {
    pub products: Vec<String>,
    pub features: Vec<String>,
    pub locations: Vec<String>,
    pub keywords: Vec<String>,
    pub content_types: HashSet<&'static str>,
    pub has_enterprise: bool,
    pub has_ai: bool,
}

pub struct ContentAnalyzer<'a> {
    ctx: &'a SiteContext,
    config: &'a DerivedConfig,
}

impl<'a> ContentAnalyzer<'a> {
    pub fn new(ctx: &'a SiteContext, config: &'a DerivedConfig) -> Self {
        Self { ctx, config }
    }

    pub fn analyze(&self) -> ContentAnalysis {
        let text = self.ctx.all_text();
        if text.trim().is_empty() {
            return ContentAnalysis::default();
        }

        let mut analysis = ContentAnalysis {
            products: self.extract_with(&PRODUCT_PATTERNS, &text, 3),
            features: self.extract_with(&FEATURE_PATTERNS, &text, 2),
            locations: self.extract_with(&LOCATION_PATTERNS, &text, 2),
            keywords: self.extract_keywords(&text),
            content_types: HashSet::new(),
            has_enterprise: text.to_lowercase().contains("enterprise"),
            has_ai: {
                let lower = text.to_lowercase();
                lower.contains("artificial intelligence")
                    || lower.contains(" ai ")
                    || lower.starts_with("ai ")
                    || lower.contains("machine learning")
            },
        };

        for (name, pattern) in CONTENT_PATTERNS.iter() {
            if pattern.is_match(&text) {
                analysis.content_types.insert(name);
            }
        }

        analysis
    }

    fn extract_with(&self, patterns: &[Regex], text: &str, limit: usize) -> Vec<String> {
        let mut found = Vec::new();
        let mut seen = HashSet::new();
        for pattern in patterns {
            for cap in pattern.captures_iter(text) {
                if let Some(m) = cap.get(1) {
                    let value = m.as_str().trim().to_string();
                    if !value.is_empty() && seen.insert(value.to_lowercase()) {
                        found.push(value);
                        if found.len() >= limit {
                            return found;
                        }
                    }
                }
            }
        }
        found
    }

    fn extract_keywords(&self, text: &str) -> Vec<String> {
        let mut freq: HashMap<String, usize> = HashMap::new();
        for word in text.split(|c: char| !c.is_alphanumeric()) {
            let word = word.to_lowercase();
            if word.len() < 3 || STOP_WORDS.contains(word.as_str()) {
                continue;
            }
            *freq.entry(word).or_insert(0) += 1;
        }
        let mut ranked: Vec<(String, usize)> = freq
            .into_iter()
            .filter(|(_, count)| *count >= self.config.min_keyword_frequency)
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked
            .into_iter()
            .take(self.config.max_keywords)
            .map(|(word, _)| word)
            .collect()
    }
}

fn make_question(
    id: String,
    template: String,
    category: Category,
    difficulty: Difficulty,
    description: &str,
    expected_signals: &[&str],
    weight: f64,
) -> Question {
    Question {
        id,
        template,
        category,
        difficulty,
        source: QuestionSource::Content,
        weight,
        description: description.to_string(),
        expected_signals: expected_signals.iter().map(|s| s.to_string()).collect(),
        metadata: HashMap::new(),
    }
}

fn from_products(analysis: &ContentAnalysis) -> Vec<Question> {
    analysis
        .products
        .iter()
        .take(2)
        .enumerate()
        .map(|(i, product)| {
            make_question(
                format!("DQ-PRODUCT-{}", i + 1),
                format!("What is {{company}}'s {} and how does it work?", product),
                Category::Offerings,
                Difficulty::Medium,
                "Derived from a named product or service mentioned on the site",
                &["product description", "how it works", "key benefits"],
                1.0,
            )
        })
        .collect()
}

fn from_features(analysis: &ContentAnalysis) -> Vec<Question> {
    analysis
        .features
        .iter()
        .take(1)
        .enumerate()
        .map(|(i, _)| {
            make_question(
                format!("DQ-FEATURE-{}", i + 1),
                "What are the key features of {company}'s product or platform?".to_string(),
                Category::Offerings,
                Difficulty::Medium,
                "Derived from a features list found on the site",
                &["feature list", "feature descriptions"],
                1.0,
            )
        })
        .collect()
}

fn from_content_types(analysis: &ContentAnalysis) -> Vec<Question> {
    let mut out = Vec::new();
    if analysis.content_types.contains("api") {
        out.push(make_question(
            "DQ-API-1".to_string(),
            "Does {company} offer an API or developer tools, and how can developers get started?"
                .to_string(),
            Category::Offerings,
            Difficulty::Hard,
            "Derived from API/developer content found on the site",
            &["API availability", "documentation", "getting started for developers"],
            0.8,
        ));
    }
    if analysis.content_types.contains("integrations") {
        out.push(make_question(
            "DQ-INTEGRATIONS-1".to_string(),
            "What other tools or platforms does {company} integrate with?".to_string(),
            Category::Offerings,
            Difficulty::Medium,
            "Derived from integrations content found on the site",
            &["integration partners", "supported platforms"],
            0.8,
        ));
    }
    if analysis.content_types.contains("careers") {
        out.push(make_question(
            "DQ-CAREERS-1".to_string(),
            "Is {company} hiring, and what is it like to work there?".to_string(),
            Category::Trust,
            Difficulty::Easy,
            "Derived from careers/jobs content found on the site",
            &["open roles", "culture description", "benefits"],
            0.6,
        ));
    }
    if analysis.content_types.contains("blog") {
        out.push(make_question(
            "DQ-BLOG-1".to_string(),
            "What topics does {company} write about or publish content on?".to_string(),
            Category::Differentiation,
            Difficulty::Easy,
            "Derived from blog/news content found on the site",
            &["content themes", "publication cadence"],
            0.6,
        ));
    }
    out
}

fn from_metadata(analysis: &ContentAnalysis) -> Vec<Question> {
    let mut out = Vec::new();
    if analysis.has_enterprise {
        out.push(make_question(
            "DQ-ENTERPRISE-1".to_string(),
            "Does {company} offer enterprise plans or solutions, and what do they include?"
                .to_string(),
            Category::Offerings,
            Difficulty::Medium,
            "Derived from enterprise-oriented content found on the site",
            &["enterprise features", "enterprise pricing", "enterprise support"],
            0.8,
        ));
    }
    if analysis.has_ai {
        out.push(make_question(
            "DQ-AI-1".to_string(),
            "How does {company} use AI or machine learning in its products?".to_string(),
            Category::Differentiation,
            Difficulty::Medium,
            "Derived from AI/ML-related content found on the site",
            &["AI capabilities", "ML use cases"],
            0.8,
        ));
    }
    out
}

const KEYWORD_TEMPLATES: &[(&str, &str, Category, Difficulty)] = &[
    ("security", "How does {company} approach security and data protection?", Category::Trust, Difficulty::Medium),
    ("compliance", "What compliance standards or regulations does {company} adhere to?", Category::Trust, Difficulty::Hard),
    ("support", "What kind of customer support does {company} provide?", Category::Contact, Difficulty::Easy),
    ("community", "Does {company} have a community or user group, and how can I join it?", Category::Contact, Difficulty::Easy),
    ("sustainability", "What is {company}'s approach to sustainability?", Category::Differentiation, Difficulty::Medium),
];

fn from_keywords(analysis: &ContentAnalysis) -> Vec<Question> {
    for (keyword, template, category, difficulty) in KEYWORD_TEMPLATES {
        if analysis.keywords.iter().any(|k| k == keyword) {
            return vec![make_question(
                format!("DQ-KEYWORD-{}", keyword.to_uppercase()),
                template.to_string(),
                *category,
                *difficulty,
                "Derived from a recurring keyword found on the site",
                &["direct answer to the keyword topic"],
                0.6,
            )];
        }
    }
    Vec::new()
}

fn normalize_for_dedup(template: &str) -> String {
    template
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn dedupe(questions: Vec<Question>) -> Vec<Question> {
    let mut seen = HashSet::new();
    questions
        .into_iter()
        .filter(|q| seen.insert(normalize_for_dedup(&q.template)))
        .collect()
}

/// Runs the full derivation pipeline: products, features, content
/// types, metadata signals, then a single keyword-triggered question,
/// deduplicated and truncated to `config.max_questions`.
pub fn derive_questions(ctx: &SiteContext, config: DerivedConfig) -> Vec<Question> {
    let analysis = ContentAnalyzer::new(ctx, &config).analyze();

    let mut questions = Vec::new();
    questions.extend(from_products(&analysis));
    questions.extend(from_features(&analysis));
    questions.extend(from_content_types(&analysis));
    questions.extend(from_metadata(&analysis));
    questions.extend(from_keywords(&analysis));

    let mut questions = dedupe(questions);
    questions.truncate(config.max_questions);
    questions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx_with_text(text: &str) -> SiteContext {
        SiteContext {
            company_name: "Acme".to_string(),
            domain: "acme.com".to_string(),
            page_texts: vec![text.to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn empty_content_yields_no_questions() {
        let ctx = ctx_with_text("");
        assert!(derive_questions(&ctx, DerivedConfig::default()).is_empty());
    }

    #[test]
    fn api_content_triggers_api_question() {
        let ctx = ctx_with_text("Check out our API and developer documentation for the SDK.");
        let qs = derive_questions(&ctx, DerivedConfig::default());
        assert!(qs.iter().any(|q| q.id == "DQ-API-1"));
    }

    #[test]
    fn result_never_exceeds_max_questions() {
        let ctx = ctx_with_text(
            "Our Widgetly helps teams. Introducing Gadgetry for enterprise. \
             Check our API docs and SDK. We integrate with many tools. \
             We are hiring across the company. Read our blog for updates. \
             This is an enterprise-ready AI platform with machine learning built in.",
        );
        let qs = derive_questions(&ctx, DerivedConfig::default());
        assert!(qs.len() <= 5);
    }

    #[test]
    fn deduplicates_identical_templates() {
        let analysis = ContentAnalysis {
            content_types: ["api", "integrations"].into_iter().collect(),
            ..Default::default()
        };
        let qs = dedupe(
            [from_content_types(&analysis), from_content_types(&analysis)]
                .concat(),
        );
        assert_eq!(qs.len(), 2);
    }
}
