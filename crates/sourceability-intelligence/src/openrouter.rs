//! OpenRouter-backed provider. Grounded on
//! `original_source/worker/observation/providers.py`'s `OpenRouterProvider`
//! and on the teacher's `SerperProvider` idiom: a `reqwest::Client` held
//! behind a circuit breaker, a custom `Debug` that redacts the API key,
//! and errors wrapped with enough context to classify retryability.

use crate::error::ProviderCallError;
use crate::provider::{ObservationRequest, ObservationResponse, Provider, Usage};
use async_trait::async_trait;
use sourceability_config::ProviderConfig;
use sourceability_reliability::CircuitBreaker;
use std::time::Duration;

pub struct OpenRouterProvider {
    api_key: String,
    client: reqwest::Client,
    config: ProviderConfig,
    breaker: CircuitBreaker,
}

impl std::fmt::Debug for OpenRouterProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenRouterProvider")
            .field("api_key", &"***")
            .field("config", &self.config)
            .finish()
    }
}

impl OpenRouterProvider {
    pub fn new(api_key: impl Into<String>, config: ProviderConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            api_key: api_key.into(),
            client,
            config,
            breaker: CircuitBreaker::new(5, Duration::from_secs(60)),
        })
    }

    fn wrap_reqwest_error(&self, err: reqwest::Error) -> ProviderCallError {
        if err.is_timeout() {
            ProviderCallError::Timeout {
                provider: self.name().to_string(),
                timeout_seconds: self.config.timeout_seconds,
            }
        } else if let Some(status) = err.status() {
            if status.as_u16() == 429 {
                ProviderCallError::RateLimited {
                    provider: self.name().to_string(),
                }
            } else if status.is_server_error() {
                ProviderCallError::Transient {
                    provider: self.name().to_string(),
                    message: err.to_string(),
                }
            } else {
                ProviderCallError::Permanent {
                    provider: self.name().to_string(),
                    message: err.to_string(),
                }
            }
        } else {
            ProviderCallError::Transport {
                provider: self.name().to_string(),
                message: err.to_string(),
            }
        }
    }
}

#[async_trait]
impl Provider for OpenRouterProvider {
    fn name(&self) -> &str {
        "openrouter"
    }

    async fn observe(
        &self,
        request: &ObservationRequest,
    ) -> Result<ObservationResponse, ProviderCallError> {
        if !self.breaker.allow() {
            return Err(ProviderCallError::Transient {
                provider: self.name().to_string(),
                message: "circuit breaker open".to_string(),
            });
        }

        let prompt = format!(
            "{}\n\nQuestion: {}",
            request.company_name, request.question_text
        );
        let body = serde_json::json!({
            "model": request.model,
            "temperature": request.temperature,
            "max_tokens": request.max_tokens,
            "messages": [{"role": "user", "content": prompt}],
        });

        let result = self
            .client
            .post("https://openrouter.ai/api/v1/chat/completions")
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await;

        let response = match result {
            Ok(r) => r,
            Err(e) => {
                self.breaker.record_failure();
                return Err(self.wrap_reqwest_error(e));
            }
        };

        if !response.status().is_success() {
            self.breaker.record_failure();
            let status = response.status();
            let message = response.text().await.unwrap_or_default();
            return Err(if status.as_u16() == 429 {
                ProviderCallError::RateLimited {
                    provider: self.name().to_string(),
                }
            } else if status.is_server_error() {
                ProviderCallError::Transient {
                    provider: self.name().to_string(),
                    message,
                }
            } else {
                ProviderCallError::Permanent {
                    provider: self.name().to_string(),
                    message,
                }
            });
        }

        let parsed: serde_json::Value = response.json().await.map_err(|e| {
            self.breaker.record_failure();
            ProviderCallError::Transport {
                provider: self.name().to_string(),
                message: e.to_string(),
            }
        })?;

        self.breaker.record_success();

        let content = parsed["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or_default()
            .to_string();
        let usage = parsed.get("usage").map(|u| Usage {
            prompt_tokens: u["prompt_tokens"].as_u64().unwrap_or(0) as u32,
            completion_tokens: u["completion_tokens"].as_u64().unwrap_or(0) as u32,
            total_tokens: u["total_tokens"].as_u64().unwrap_or(0) as u32,
        });

        Ok(ObservationResponse { content, usage })
    }

    async fn health_check(&self) -> Result<(), ProviderCallError> {
        if self.api_key.is_empty() {
            return Err(ProviderCallError::Permanent {
                provider: self.name().to_string(),
                message: "missing API key".to_string(),
            });
        }
        Ok(())
    }
}
