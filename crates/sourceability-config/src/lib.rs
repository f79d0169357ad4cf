//! Configuration shared between the provider-facing stages
//! (`sourceability-intelligence`, `sourceability-observation`).
//!
//! Per-stage tunables that belong to a single pipeline stage (simulation
//! thresholds, fix generator limits, impact caps, divergence bands) are
//! defined as `Default`-implementing structs in their owning crate, per
//! the "explicit option records" design note; this crate only holds the
//! provider configuration that two different stages must agree on.

use sourceability_types::envutil::env_or;

/// Timeout, retry and rate-limit policy for any provider call, whether
/// issued directly (health checks) or through the Observation Runner.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ProviderConfig {
    pub timeout_seconds: u64,
    pub max_retries: u32,
    pub retry_delay_seconds: u64,
    pub requests_per_minute: u32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            max_retries: 3,
            retry_delay_seconds: 1,
            requests_per_minute: 60,
        }
    }
}

impl ProviderConfig {
    /// Builds from environment, falling back to the documented defaults
    /// on any missing or unparsable variable.
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            timeout_seconds: env_or("SOURCEABILITY_PROVIDER_TIMEOUT_SECONDS", d.timeout_seconds),
            max_retries: env_or("SOURCEABILITY_PROVIDER_MAX_RETRIES", d.max_retries),
            retry_delay_seconds: env_or(
                "SOURCEABILITY_PROVIDER_RETRY_DELAY_SECONDS",
                d.retry_delay_seconds,
            ),
            requests_per_minute: env_or(
                "SOURCEABILITY_PROVIDER_REQUESTS_PER_MINUTE",
                d.requests_per_minute,
            ),
        }
    }

    /// Exponential backoff delay before retry attempt `attempt` (0-indexed).
    pub fn backoff_delay(&self, attempt: u32) -> std::time::Duration {
        let secs = self.retry_delay_seconds * 2u64.saturating_pow(attempt);
        std::time::Duration::from_secs(secs)
    }

    /// Sleep interval enforcing the per-minute rate limit between calls.
    pub fn rate_limit_interval(&self) -> std::time::Duration {
        let per_minute = self.requests_per_minute.max(1) as f64;
        std::time::Duration::from_secs_f64(60.0 / per_minute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let c = ProviderConfig::default();
        assert_eq!(c.timeout_seconds, 30);
        assert_eq!(c.max_retries, 3);
        assert_eq!(c.retry_delay_seconds, 1);
        assert_eq!(c.requests_per_minute, 60);
    }

    #[test]
    fn backoff_doubles_each_attempt() {
        let c = ProviderConfig::default();
        assert_eq!(c.backoff_delay(0).as_secs(), 1);
        assert_eq!(c.backoff_delay(1).as_secs(), 2);
        assert_eq!(c.backoff_delay(2).as_secs(), 4);
    }
}
