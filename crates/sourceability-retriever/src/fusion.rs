//! Reciprocal rank fusion of a lexical and a semantic ranking.
//!
//! Deterministic tie-breaking chain: `fused_score` desc -> `lexical_score`
//! desc -> `doc_id` asc, matching the retriever's determinism invariant.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

pub const DEFAULT_RRF_K: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RrfConfig {
    pub k: f64,
}

impl Default for RrfConfig {
    fn default() -> Self {
        Self { k: DEFAULT_RRF_K }
    }
}

/// `1 / (k + rank)` for a 1-based rank, 0 if the document is absent from
/// that ranking.
#[inline]
pub fn rrf_contribution(k: f64, rank: Option<usize>) -> f64 {
    rank.map_or(0.0, |r| 1.0 / (k + r as f64))
}

/// Normalization contract assumed by the Simulation Runner: RRF
/// magnitudes are typically `1e-3..3e-2`; below `0.1` scale linearly
/// against `0.02`, otherwise pass through unchanged.
pub fn normalize_rrf(raw: f64) -> f64 {
    if raw < 0.1 {
        (raw / 0.02).min(1.0)
    } else {
        raw
    }
}

pub(crate) struct Candidate {
    pub doc_id: String,
    pub lexical_rank: Option<usize>,
    pub lexical_score: Option<f64>,
    pub semantic_rank: Option<usize>,
    pub semantic_score: Option<f64>,
}

pub(crate) struct FusedCandidate {
    pub doc_id: String,
    pub fused_score: f64,
    pub lexical_score: f64,
    pub semantic_score: f64,
}

pub(crate) fn fuse(candidates: Vec<Candidate>, config: RrfConfig) -> Vec<FusedCandidate> {
    let mut fused: Vec<FusedCandidate> = candidates
        .into_iter()
        .map(|c| {
            let lexical_contrib = rrf_contribution(config.k, c.lexical_rank);
            let semantic_contrib = rrf_contribution(config.k, c.semantic_rank);
            FusedCandidate {
                doc_id: c.doc_id,
                fused_score: lexical_contrib + semantic_contrib,
                lexical_score: c.lexical_score.unwrap_or(0.0),
                semantic_score: c.semantic_score.unwrap_or(0.0),
            }
        })
        .collect();

    fused.sort_by(|a, b| {
        b.fused_score
            .partial_cmp(&a.fused_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| {
                b.lexical_score
                    .partial_cmp(&a.lexical_score)
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| a.doc_id.cmp(&b.doc_id))
    });
    fused
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contribution_is_zero_when_absent() {
        assert_eq!(rrf_contribution(60.0, None), 0.0);
    }

    #[test]
    fn contribution_decreases_with_rank() {
        let r1 = rrf_contribution(60.0, Some(1));
        let r2 = rrf_contribution(60.0, Some(2));
        assert!(r1 > r2);
    }

    #[test]
    fn normalize_scales_small_values() {
        assert!((normalize_rrf(0.01) - 0.5).abs() < 1e-9);
        assert_eq!(normalize_rrf(0.02), 1.0);
        assert_eq!(normalize_rrf(0.5), 0.5);
    }

    #[test]
    fn ties_break_by_lexical_then_doc_id() {
        let candidates = vec![
            Candidate {
                doc_id: "b".to_string(),
                lexical_rank: Some(1),
                lexical_score: Some(0.5),
                semantic_rank: None,
                semantic_score: None,
            },
            Candidate {
                doc_id: "a".to_string(),
                lexical_rank: Some(1),
                lexical_score: Some(0.5),
                semantic_rank: None,
                semantic_score: None,
            },
        ];
        let fused = fuse(candidates, RrfConfig::default());
        assert_eq!(fused[0].doc_id, "a");
    }
}
