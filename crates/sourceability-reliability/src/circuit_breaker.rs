//! Three-state circuit breaker (closed/open/half-open) guarding a single
//! provider. Trips after a configurable number of consecutive failures,
//! stays open for a cooldown period, then allows one probe call through
//! before deciding whether to close again.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    Closed,
    Open,
    HalfOpen,
}

struct Inner {
    failure_threshold: u32,
    cooldown: Duration,
    consecutive_failures: AtomicU32,
    opened_at_epoch_ms: AtomicU64,
    state: std::sync::Mutex<CircuitState>,
}

/// Cloneable handle around a shared circuit breaker; safe to hold one
/// per provider and share across concurrent observation tasks.
#[derive(Clone)]
pub struct CircuitBreaker {
    inner: Arc<Inner>,
}

impl CircuitBreaker {
    pub fn new(failure_threshold: u32, cooldown: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                failure_threshold,
                cooldown,
                consecutive_failures: AtomicU32::new(0),
                opened_at_epoch_ms: AtomicU64::new(0),
                state: std::sync::Mutex::new(CircuitState::Closed),
            }),
        }
    }

    /// Whether a call is currently allowed through. Transitions Open ->
    /// HalfOpen once the cooldown has elapsed.
    pub fn allow(&self) -> bool {
        let mut state = self.inner.state.lock().unwrap();
        match *state {
            CircuitState::Closed => true,
            CircuitState::HalfOpen => true,
            CircuitState::Open => {
                let opened_ms = self.inner.opened_at_epoch_ms.load(Ordering::SeqCst);
                let opened = epoch_ms_to_instant(opened_ms);
                if opened.elapsed() >= self.inner.cooldown {
                    *state = CircuitState::HalfOpen;
                    true
                } else {
                    false
                }
            }
        }
    }

    pub fn record_success(&self) {
        self.inner.consecutive_failures.store(0, Ordering::SeqCst);
        *self.inner.state.lock().unwrap() = CircuitState::Closed;
    }

    pub fn record_failure(&self) {
        let failures = self.inner.consecutive_failures.fetch_add(1, Ordering::SeqCst) + 1;
        let mut state = self.inner.state.lock().unwrap();
        if *state == CircuitState::HalfOpen || failures >= self.inner.failure_threshold {
            *state = CircuitState::Open;
            self.inner
                .opened_at_epoch_ms
                .store(now_epoch_ms(), Ordering::SeqCst);
        }
    }

    pub fn state(&self) -> CircuitState {
        *self.inner.state.lock().unwrap()
    }
}

fn now_epoch_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

fn epoch_ms_to_instant(epoch_ms: u64) -> Instant {
    let now_ms = now_epoch_ms();
    let elapsed_ms = now_ms.saturating_sub(epoch_ms);
    Instant::now() - Duration::from_millis(elapsed_ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opens_after_threshold_failures() {
        let cb = CircuitBreaker::new(3, Duration::from_secs(60));
        assert!(cb.allow());
        cb.record_failure();
        cb.record_failure();
        assert_eq!(cb.state(), CircuitState::Closed);
        cb.record_failure();
        assert_eq!(cb.state(), CircuitState::Open);
        assert!(!cb.allow());
    }

    #[test]
    fn success_resets_failure_count() {
        let cb = CircuitBreaker::new(3, Duration::from_secs(60));
        cb.record_failure();
        cb.record_failure();
        cb.record_success();
        cb.record_failure();
        assert_eq!(cb.state(), CircuitState::Closed);
    }
}
