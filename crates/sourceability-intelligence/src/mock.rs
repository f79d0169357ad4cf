//! Deterministic test double, feature-gated behind `mock` (default for
//! this workspace since no real provider credentials exist in CI).
//! Grounded on `riptide_intelligence`'s mock provider: a canned response
//! keyed by question id with an optional forced failure.

use crate::error::ProviderCallError;
use crate::provider::{ObservationRequest, ObservationResponse, Provider, Usage};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
pub struct MockProvider {
    responses: HashMap<String, String>,
    default_response: String,
    failures: Mutex<HashMap<String, ProviderCallError>>,
}

impl MockProvider {
    pub fn new(default_response: impl Into<String>) -> Self {
        Self {
            responses: HashMap::new(),
            default_response: default_response.into(),
            failures: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_response(mut self, question_id: impl Into<String>, content: impl Into<String>) -> Self {
        self.responses.insert(question_id.into(), content.into());
        self
    }

    pub fn with_failure(self, question_id: impl Into<String>, error: ProviderCallError) -> Self {
        self.failures
            .lock()
            .unwrap()
            .insert(question_id.into(), error);
        self
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn observe(
        &self,
        request: &ObservationRequest,
    ) -> Result<ObservationResponse, ProviderCallError> {
        if let Some(err) = self.failures.lock().unwrap().get(&request.question_id) {
            return Err(err.clone());
        }
        let content = self
            .responses
            .get(&request.question_id)
            .cloned()
            .unwrap_or_else(|| self.default_response.clone());
        Ok(ObservationResponse {
            content,
            usage: Some(Usage {
                prompt_tokens: 32,
                completion_tokens: 64,
                total_tokens: 96,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(id: &str) -> ObservationRequest {
        ObservationRequest {
            question_id: id.to_string(),
            question_text: "What does Acme do?".to_string(),
            company_name: "Acme".to_string(),
            domain: "acme.com".to_string(),
            model: "mock-model".to_string(),
            temperature: 0.0,
            max_tokens: 256,
        }
    }

    #[tokio::test]
    async fn returns_configured_response() {
        let provider = MockProvider::new("default").with_response("q1", "Acme makes widgets.");
        let resp = provider.observe(&req("q1")).await.unwrap();
        assert_eq!(resp.content, "Acme makes widgets.");
    }

    #[tokio::test]
    async fn falls_back_to_default() {
        let provider = MockProvider::new("default answer");
        let resp = provider.observe(&req("unknown")).await.unwrap();
        assert_eq!(resp.content, "default answer");
    }

    #[tokio::test]
    async fn returns_configured_failure() {
        let provider = MockProvider::new("default").with_failure(
            "q1",
            ProviderCallError::RateLimited {
                provider: "mock".to_string(),
            },
        );
        let err = provider.observe(&req("q1")).await.unwrap_err();
        assert!(err.retryable());
    }
}
