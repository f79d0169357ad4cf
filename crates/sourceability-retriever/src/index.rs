//! Public retriever contract: `add` then `search`. Single-writer during
//! population, read-only once `search` is called, per the concurrency
//! model's index discipline. Neither method suspends.

use crate::bm25::{tokenize, Bm25Index};
use crate::fusion::{fuse, normalize_rrf, Candidate, RrfConfig};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalResult {
    pub doc_id: String,
    pub content: String,
    pub combined_score: f64,
    pub lexical_score: f64,
    pub semantic_score: f64,
    pub url: String,
    pub title: String,
    pub heading_path: Vec<String>,
}

struct StoredDoc {
    doc_id: String,
    content: String,
    embedding: Vec<f32>,
    url: String,
    title: String,
    heading_path: Vec<String>,
}

/// In-memory hybrid retriever. `add` builds the lexical index
/// incrementally; `search` fuses a fresh BM25 ranking with a cosine
/// ranking over stored embeddings via reciprocal rank fusion.
#[derive(Default)]
pub struct Retriever {
    docs: Vec<StoredDoc>,
    bm25: Bm25Index,
    rrf: RrfConfig,
}

impl Retriever {
    pub fn new() -> Self {
        Self {
            docs: Vec::new(),
            bm25: Bm25Index::new(),
            rrf: RrfConfig::default(),
        }
    }

    pub fn add(
        &mut self,
        doc_id: impl Into<String>,
        content: impl Into<String>,
        embedding: Vec<f32>,
        url: impl Into<String>,
        title: impl Into<String>,
        heading_path: Vec<String>,
    ) {
        let content = content.into();
        self.bm25.add_document(&content);
        self.docs.push(StoredDoc {
            doc_id: doc_id.into(),
            content,
            embedding,
            url: url.into(),
            title: title.into(),
            heading_path,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// Searches the index. `query_embedding` is `None` when the (external)
    /// embedder failed to embed the query; in that case ranking degrades
    /// to lexical-only, per the retriever's documented edge case.
    pub fn search(
        &self,
        query: &str,
        query_embedding: Option<&[f32]>,
        limit: usize,
        min_score: f64,
    ) -> Vec<RetrievalResult> {
        if query.trim().is_empty() || self.docs.is_empty() {
            return Vec::new();
        }

        let query_terms = tokenize(query);

        let mut lexical_scores: Vec<(usize, f64)> = (0..self.docs.len())
            .map(|i| (i, self.bm25.score(i, &query_terms)))
            .collect();
        lexical_scores.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        let lexical_rank: Vec<Option<usize>> = rank_lookup(&lexical_scores, self.docs.len());
        let lexical_score_lookup: Vec<f64> = score_lookup(&lexical_scores, self.docs.len());

        let (semantic_rank, semantic_score_lookup) = if let Some(qvec) = query_embedding {
            let mut semantic_scores: Vec<(usize, f64)> = self
                .docs
                .iter()
                .enumerate()
                .map(|(i, d)| (i, cosine_similarity(qvec, &d.embedding)))
                .collect();
            semantic_scores
                .sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
            (
                rank_lookup(&semantic_scores, self.docs.len()),
                score_lookup(&semantic_scores, self.docs.len()),
            )
        } else {
            (vec![None; self.docs.len()], vec![0.0; self.docs.len()])
        };

        let candidates: Vec<Candidate> = (0..self.docs.len())
            .map(|i| Candidate {
                doc_id: self.docs[i].doc_id.clone(),
                lexical_rank: lexical_rank[i],
                lexical_score: Some(lexical_score_lookup[i]),
                semantic_rank: semantic_rank[i],
                semantic_score: Some(semantic_score_lookup[i]),
            })
            .collect();

        let fused = fuse(candidates, self.rrf);

        fused
            .into_iter()
            .filter(|f| normalize_rrf(f.fused_score) >= min_score)
            .take(limit)
            .map(|f| {
                let doc = self.docs.iter().find(|d| d.doc_id == f.doc_id).unwrap();
                RetrievalResult {
                    doc_id: doc.doc_id.clone(),
                    content: doc.content.clone(),
                    combined_score: normalize_rrf(f.fused_score),
                    lexical_score: f.lexical_score,
                    semantic_score: f.semantic_score,
                    url: doc.url.clone(),
                    title: doc.title.clone(),
                    heading_path: doc.heading_path.clone(),
                }
            })
            .collect()
    }
}

fn rank_lookup(sorted: &[(usize, f64)], len: usize) -> Vec<Option<usize>> {
    let mut ranks = vec![None; len];
    for (rank, (doc_index, score)) in sorted.iter().enumerate() {
        if *score > 0.0 {
            ranks[*doc_index] = Some(rank + 1);
        }
    }
    ranks
}

fn score_lookup(sorted: &[(usize, f64)], len: usize) -> Vec<f64> {
    let mut scores = vec![0.0; len];
    for (doc_index, score) in sorted {
        scores[*doc_index] = *score;
    }
    scores
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f64 = a.iter().zip(b).map(|(x, y)| *x as f64 * *y as f64).sum();
    let norm_a: f64 = a.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_returns_empty() {
        let mut r = Retriever::new();
        r.add("d1", "hello world", vec![1.0, 0.0], "u", "t", vec![]);
        assert!(r.search("", None, 10, 0.0).is_empty());
    }

    #[test]
    fn empty_index_returns_empty() {
        let r = Retriever::new();
        assert!(r.search("hello", None, 10, 0.0).is_empty());
    }

    #[test]
    fn lexical_only_when_embedding_missing() {
        let mut r = Retriever::new();
        r.add("d1", "pricing plans available", vec![1.0, 0.0], "u1", "t1", vec![]);
        r.add("d2", "company history and team", vec![0.0, 1.0], "u2", "t2", vec![]);
        let results = r.search("pricing", None, 10, 0.0);
        assert_eq!(results[0].doc_id, "d1");
    }

    #[test]
    fn determinism_identical_query_yields_identical_ranking() {
        let mut r = Retriever::new();
        r.add("a", "pricing information here", vec![1.0, 0.0], "u", "t", vec![]);
        r.add("b", "pricing information here too", vec![1.0, 0.0], "u", "t", vec![]);
        let first = r.search("pricing", Some(&[1.0, 0.0]), 10, 0.0);
        let second = r.search("pricing", Some(&[1.0, 0.0]), 10, 0.0);
        let first_ids: Vec<_> = first.iter().map(|x| x.doc_id.clone()).collect();
        let second_ids: Vec<_> = second.iter().map(|x| x.doc_id.clone()).collect();
        assert_eq!(first_ids, second_ids);
    }

    #[test]
    fn min_score_filters_after_fusion() {
        let mut r = Retriever::new();
        r.add("d1", "totally unrelated text", vec![1.0, 0.0], "u", "t", vec![]);
        let results = r.search("nonexistent_term_xyz", None, 10, 0.01);
        assert!(results.is_empty());
    }
}
