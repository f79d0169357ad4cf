//! Error vocabulary for a pipeline run.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("run was cancelled after stage '{stage}'")]
    Cancelled { stage: &'static str },

    #[error("provider call failed: {0}")]
    Provider(#[from] sourceability_intelligence::ProviderCallError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
