//! Core provider trait and the request/response shapes every
//! implementation shares.

use crate::error::ProviderCallError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationRequest {
    pub question_id: String,
    pub question_text: String,
    pub company_name: String,
    pub domain: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationResponse {
    pub content: String,
    pub usage: Option<Usage>,
}

/// Common capability shared by every provider variant: observe one
/// question, observe a batch (default: sequential dispatch over
/// `observe`, rate-limited by the caller), and report health.
#[async_trait]
pub trait Provider: Send + Sync {
    fn name(&self) -> &str;

    async fn observe(
        &self,
        request: &ObservationRequest,
    ) -> Result<ObservationResponse, ProviderCallError>;

    async fn observe_batch(
        &self,
        requests: &[ObservationRequest],
    ) -> Vec<Result<ObservationResponse, ProviderCallError>> {
        let mut out = Vec::with_capacity(requests.len());
        for request in requests {
            out.push(self.observe(request).await);
        }
        out
    }

    async fn health_check(&self) -> Result<(), ProviderCallError> {
        Ok(())
    }
}
