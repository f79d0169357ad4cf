//! Shared error vocabulary.
//!
//! Mirrors the classification in the error-handling design: input
//! errors are contract violations by a caller, collaborator errors
//! wrap a failure surfaced by an injected dependency, and `Invariant`
//! is reserved for bugs that must abort a run rather than degrade it.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("collaborator {collaborator} failed: {message}")]
    Collaborator {
        collaborator: &'static str,
        message: String,
    },

    #[error("operation was cancelled after {completed} of {total} items")]
    Cancelled { completed: usize, total: usize },

    #[error("internal invariant violated: {0}")]
    Invariant(String),

    #[error("unknown report version: {0}")]
    UnknownVersion(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
