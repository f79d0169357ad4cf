//! In-memory hybrid retriever: lexical (BM25-style) + semantic (cosine)
//! ranking fused by reciprocal rank fusion. Single-writer during `add`,
//! read-only during `search`, per the concurrency model's index
//! discipline.

mod bm25;
mod fusion;
mod index;

pub use fusion::{normalize_rrf, rrf_contribution, RrfConfig, DEFAULT_RRF_K};
pub use index::{Retriever, RetrievalResult};
