//! Retry helper implementing `retry_delay_seconds * 2^attempt` backoff,
//! matching the Observation Runner's retry contract.

use std::future::Future;
use std::time::Duration;

#[derive(Debug)]
pub enum RetryOutcome<T, E> {
    Succeeded(T),
    ExhaustedRetries(E),
}

/// Retries `op` up to `max_retries` additional times after the first
/// attempt, sleeping `base_delay * 2^attempt` between tries. `is_retryable`
/// decides whether a given error should be retried at all; a permanent
/// error short-circuits immediately.
pub async fn retry_with_backoff<T, E, Fut, F, R>(
    max_retries: u32,
    base_delay: Duration,
    mut op: F,
    is_retryable: R,
) -> RetryOutcome<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    R: Fn(&E) -> bool,
{
    let mut attempt = 0;
    loop {
        match op().await {
            Ok(v) => return RetryOutcome::Succeeded(v),
            Err(e) => {
                if attempt >= max_retries || !is_retryable(&e) {
                    return RetryOutcome::ExhaustedRetries(e);
                }
                let delay = base_delay * 2u32.saturating_pow(attempt);
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn retries_until_success() {
        let calls = AtomicU32::new(0);
        let outcome = retry_with_backoff(
            3,
            Duration::from_millis(1),
            || {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n < 2 {
                        Err("transient")
                    } else {
                        Ok(42)
                    }
                }
            },
            |_| true,
        )
        .await;
        match outcome {
            RetryOutcome::Succeeded(v) => assert_eq!(v, 42),
            RetryOutcome::ExhaustedRetries(_) => panic!("expected success"),
        }
    }

    #[tokio::test]
    async fn permanent_error_short_circuits() {
        let calls = AtomicU32::new(0);
        let outcome: RetryOutcome<i32, &str> = retry_with_backoff(
            5,
            Duration::from_millis(1),
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err("permanent") }
            },
            |_| false,
        )
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(outcome, RetryOutcome::ExhaustedRetries(_)));
    }
}
