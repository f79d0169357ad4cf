//! Small env-override helper shared by every stage's `*Config::from_env`.
//! Grounded on `riptide_config::env`'s "parse, fall back to default on any
//! failure" convention.

use std::str::FromStr;

pub fn env_or<T: FromStr>(var: &str, default: T) -> T {
    std::env::var(var)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

pub fn env_flag(var: &str, default: bool) -> bool {
    match std::env::var(var) {
        Ok(v) => matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        Err(_) => default,
    }
}
