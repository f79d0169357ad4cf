//! Runs a batch of observation requests against a primary provider with
//! an optional fallback, honoring a per-minute rate limit and retrying
//! retryable failures with exponential backoff. Grounded on
//! `original_source/worker/observation/providers.py`'s batch dispatch and
//! retry contract (`retry_delay_seconds * 2^attempt`), using
//! `sourceability-reliability::retry_with_backoff` for the backoff loop.

use serde::{Deserialize, Serialize};
use sourceability_intelligence::{ObservationRequest, ObservationResponse, Provider, ProviderCallError};
use sourceability_reliability::{retry_with_backoff, RetryOutcome};
use sourceability_types::model::CancellationToken;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    pub requests_per_minute: u32,
    pub max_retries: u32,
    pub retry_delay_seconds: u64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            requests_per_minute: 60,
            max_retries: 3,
            retry_delay_seconds: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationOutcome {
    pub question_id: String,
    pub provider_used: String,
    pub response: Option<ObservationResponse>,
    pub error: Option<String>,
    pub cancelled: bool,
}

pub struct ObservationRunner<'a> {
    primary: &'a dyn Provider,
    fallback: Option<&'a dyn Provider>,
    config: RunnerConfig,
}

impl<'a> ObservationRunner<'a> {
    pub fn new(primary: &'a dyn Provider, fallback: Option<&'a dyn Provider>, config: RunnerConfig) -> Self {
        Self { primary, fallback, config }
    }

    /// Runs every request in order, checking `cancel` at each question
    /// boundary. Once cancelled, remaining requests are returned as
    /// cancelled outcomes rather than skipped silently.
    pub async fn run_batch(
        &self,
        requests: &[ObservationRequest],
        cancel: &CancellationToken,
    ) -> Vec<ObservationOutcome> {
        let mut outcomes = Vec::with_capacity(requests.len());
        let pause = Duration::from_secs_f64(60.0 / self.config.requests_per_minute.max(1) as f64);

        for (i, request) in requests.iter().enumerate() {
            if cancel.is_cancelled() {
                outcomes.push(ObservationOutcome {
                    question_id: request.question_id.clone(),
                    provider_used: String::new(),
                    response: None,
                    error: None,
                    cancelled: true,
                });
                continue;
            }

            outcomes.push(self.run_one(request).await);

            if i + 1 < requests.len() {
                tokio::time::sleep(pause).await;
            }
        }

        outcomes
    }

    async fn run_one(&self, request: &ObservationRequest) -> ObservationOutcome {
        match self.call_with_retry(self.primary, request).await {
            Ok(response) => ObservationOutcome {
                question_id: request.question_id.clone(),
                provider_used: self.primary.name().to_string(),
                response: Some(response),
                error: None,
                cancelled: false,
            },
            Err(primary_err) => {
                if let Some(fallback) = self.fallback {
                    match self.call_with_retry(fallback, request).await {
                        Ok(response) => ObservationOutcome {
                            question_id: request.question_id.clone(),
                            provider_used: fallback.name().to_string(),
                            response: Some(response),
                            error: None,
                            cancelled: false,
                        },
                        Err(fallback_err) => ObservationOutcome {
                            question_id: request.question_id.clone(),
                            provider_used: fallback.name().to_string(),
                            response: None,
                            error: Some(format!(
                                "primary ({}) and fallback ({}) both failed",
                                primary_err, fallback_err
                            )),
                            cancelled: false,
                        },
                    }
                } else {
                    ObservationOutcome {
                        question_id: request.question_id.clone(),
                        provider_used: self.primary.name().to_string(),
                        response: None,
                        error: Some(primary_err.to_string()),
                        cancelled: false,
                    }
                }
            }
        }
    }

    async fn call_with_retry(
        &self,
        provider: &dyn Provider,
        request: &ObservationRequest,
    ) -> Result<ObservationResponse, ProviderCallError> {
        let outcome = retry_with_backoff(
            self.config.max_retries,
            Duration::from_secs(self.config.retry_delay_seconds),
            || provider.observe(request),
            |e: &ProviderCallError| e.retryable(),
        )
        .await;

        match outcome {
            RetryOutcome::Succeeded(response) => Ok(response),
            RetryOutcome::ExhaustedRetries(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sourceability_intelligence::MockProvider;

    fn request(id: &str) -> ObservationRequest {
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
    async fn runs_batch_against_primary() {
        let primary = MockProvider::new("default").with_response("q1", "Acme makes widgets.");
        let runner = ObservationRunner::new(&primary, None, RunnerConfig::default());
        let cancel = CancellationToken::new();
        let outcomes = runner.run_batch(&[request("q1")], &cancel).await;
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].provider_used, "mock");
        assert!(outcomes[0].response.is_some());
    }

    #[tokio::test]
    async fn falls_back_when_primary_fails_permanently() {
        let primary = MockProvider::new("default").with_failure(
            "q1",
            ProviderCallError::Permanent {
                provider: "mock".to_string(),
                message: "rejected".to_string(),
            },
        );
        let fallback = MockProvider::new("fallback answer");
        let runner = ObservationRunner::new(&primary, Some(&fallback), RunnerConfig::default());
        let cancel = CancellationToken::new();
        let outcomes = runner.run_batch(&[request("q1")], &cancel).await;
        assert_eq!(outcomes[0].response.as_ref().unwrap().content, "fallback answer");
    }

    #[tokio::test]
    async fn cancellation_marks_remaining_requests_cancelled() {
        let primary = MockProvider::new("default");
        let runner = ObservationRunner::new(&primary, None, RunnerConfig::default());
        let cancel = CancellationToken::new();
        cancel.cancel();
        let outcomes = runner.run_batch(&[request("q1"), request("q2")], &cancel).await;
        assert!(outcomes.iter().all(|o| o.cancelled));
    }
}
