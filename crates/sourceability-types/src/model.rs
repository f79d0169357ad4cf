//! Vocabulary and input types shared across every pipeline stage.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One of the five question categories. Order matters for deterministic
/// iteration in the score calculator's category breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Identity,
    Offerings,
    Contact,
    Trust,
    Differentiation,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Identity,
        Category::Offerings,
        Category::Contact,
        Category::Trust,
        Category::Differentiation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Identity => "identity",
            Category::Offerings => "offerings",
            Category::Contact => "contact",
            Category::Trust => "trust",
            Category::Differentiation => "differentiation",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Multiplier applied to a question's blended score before weighting
    /// by category (default rubric values).
    pub fn default_multiplier(&self) -> f64 {
        match self {
            Difficulty::Easy => 1.0,
            Difficulty::Medium => 1.2,
            Difficulty::Hard => 1.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionSource {
    Universal,
    Schema,
    Heading,
    Content,
    Metadata,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Answerability {
    Fully,
    Partially,
    Not,
    Contradictory,
}

impl Answerability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Answerability::Fully => "fully_answerable",
            Answerability::Partially => "partially_answerable",
            Answerability::Not => "not_answerable",
            Answerability::Contradictory => "contradictory",
        }
    }

    pub fn is_positive(&self) -> bool {
        matches!(self, Answerability::Fully | Answerability::Partially)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    /// Numeric weight used throughout the blended scoring formulas.
    pub fn as_numeric(&self) -> f64 {
        match self {
            ConfidenceLevel::High => 1.0,
            ConfidenceLevel::Medium => 0.6,
            ConfidenceLevel::Low => 0.3,
        }
    }
}

/// Context describing the site under evaluation, supplied by the caller
/// once the (out-of-scope) crawl and extraction have already happened.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteContext {
    pub company_name: String,
    pub domain: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Vec<String>,
    pub schema_types: Vec<String>,
    /// Headings grouped by level, e.g. "h1" -> ["Welcome", ...].
    pub headings: HashMap<String, Vec<String>>,
    /// Representative page text samples used for question derivation.
    pub page_texts: Vec<String>,
}

impl SiteContext {
    pub fn all_text(&self) -> String {
        let mut buf = String::new();
        if let Some(t) = &self.title {
            buf.push_str(t);
            buf.push(' ');
        }
        if let Some(d) = &self.description {
            buf.push_str(d);
            buf.push(' ');
        }
        for headings in self.headings.values() {
            for h in headings {
                buf.push_str(h);
                buf.push(' ');
            }
        }
        for p in &self.page_texts {
            buf.push_str(p);
            buf.push(' ');
        }
        buf
    }
}

/// A bounded, indexable segment of extracted page text. Immutable once
/// added to a retriever index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    pub id: String,
    pub content: String,
    pub url: String,
    pub title: String,
    pub heading_path: Vec<String>,
    pub embedding: Vec<f32>,
}

/// A vector embedding returned by the (out-of-scope) embedder collaborator.
pub type EmbeddingVector = Vec<f32>;

/// Lightweight, cloneable cancellation signal checked at question/fix
/// boundaries. Not a full async cancellation primitive: stages are
/// synchronous and simply poll `is_cancelled()` between units of work.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    inner: std::sync::Arc<std::sync::atomic::AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.inner.store(true, std::sync::atomic::Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.load(std::sync::atomic::Ordering::SeqCst)
    }
}
