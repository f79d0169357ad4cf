//! Trait boundaries toward collaborators this workspace never implements:
//! the crawler, HTML extractor, chunker, embedder, job queue and
//! scheduler. Grounded on the teacher's "one port trait per external
//! dependency" convention (`riptide_types::ports`). Implementing a real
//! crawler, a persistent queue or a cron scheduler is out of scope;
//! these traits exist purely so the engine can accept one without
//! depending on a concrete implementation.

use crate::model::{Chunk, EmbeddingVector};
use async_trait::async_trait;

/// Computes embeddings for retriever queries and chunk content. The
/// engine only ever calls this collaborator from test doubles; a real
/// deployment injects an implementation backed by whatever embedding
/// service it runs.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> crate::error::Result<EmbeddingVector>;

    async fn embed_many(&self, chunks: &[Chunk]) -> crate::error::Result<Vec<EmbeddingResult>>;
}

#[derive(Debug, Clone)]
pub struct EmbeddingResult {
    pub chunk_index: usize,
    pub content_hash: String,
    pub embedding: EmbeddingVector,
}

/// Status of a job tracked by an external job queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Queued,
    Started,
    Finished,
    Failed,
    Canceled,
}

/// Marker boundary for an external job queue. No implementation ships
/// here: a production deployment supplies its own queue and only needs
/// to satisfy this shape to enqueue audit runs.
#[async_trait]
pub trait JobQueue: Send + Sync {
    async fn enqueue(&self, run_id: &str, site_id: &str, priority: u8) -> crate::error::Result<String>;
    async fn status(&self, job_id: &str) -> crate::error::Result<JobStatus>;
    async fn cancel(&self, job_id: &str) -> crate::error::Result<bool>;
}

/// Marker boundary for an external cron-like scheduler.
#[async_trait]
pub trait Scheduler: Send + Sync {
    async fn schedule(&self, at_unix_secs: i64, run_id: &str, site_id: &str) -> crate::error::Result<String>;
    async fn cancel(&self, job_id: &str) -> crate::error::Result<bool>;
    async fn list_jobs(&self) -> crate::error::Result<Vec<String>>;
}
