//! Provider error vocabulary. A `retryable` flag, not the variant
//! itself, drives the Observation Runner's retry decision so that a 429
//! and a 503 share the same retry path without needing their own match
//! arms at every call site.

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ProviderCallError {
    #[error("request to {provider} timed out after {timeout_seconds}s")]
    Timeout {
        provider: String,
        timeout_seconds: u64,
    },

    #[error("{provider} rate limited the request (HTTP 429)")]
    RateLimited { provider: String },

    #[error("{provider} returned a transient error: {message}")]
    Transient { provider: String, message: String },

    #[error("{provider} rejected the request: {message}")]
    Permanent { provider: String, message: String },

    #[error("{provider} transport error: {message}")]
    Transport { provider: String, message: String },
}

impl ProviderCallError {
    /// Whether the Observation Runner should retry this call. Rate
    /// limits and transient/transport failures are retryable; anything
    /// the provider flatly rejected is not (Open Question #4: 429 is
    /// treated as retryable with exponential backoff, the same bucket
    /// as other 5xx-class failures).
    pub fn retryable(&self) -> bool {
        matches!(
            self,
            ProviderCallError::Timeout { .. }
                | ProviderCallError::RateLimited { .. }
                | ProviderCallError::Transient { .. }
                | ProviderCallError::Transport { .. }
        )
    }
}
