//! Tracing setup, mirroring the teacher's `tracing` + `tracing-subscriber`
//! pairing: an env-filter that defaults to `info` when unset.

use tracing_subscriber::{fmt, EnvFilter};

/// Installs a global tracing subscriber. Safe to call more than once;
/// later calls are a no-op, matching `tracing_subscriber`'s own guard.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}
