//! Runtime configuration read from environment variables.

use std::num::NonZeroUsize;
use std::thread;

use pgnan_replay::ErrorPolicy;

/// Replay settings for the command-line driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// `PGNAN_ON_ERROR`: `abort` or `skip`.
    pub on_error: ErrorPolicy,
    /// `PGNAN_THREADS`: worker threads used to replay games.
    pub threads: usize,
}

impl AppConfig {
    /// Load configuration from environment variables with defaults.
    pub fn from_env() -> Self {
        AppConfig::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unparseable values fall back to defaults.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = AppConfig::default();
        AppConfig {
            on_error: lookup("PGNAN_ON_ERROR")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.on_error),
            threads: lookup("PGNAN_THREADS")
                .and_then(|v| v.trim().parse().ok())
                .filter(|&n: &usize| n > 0)
                .unwrap_or(defaults.threads),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            on_error: ErrorPolicy::Abort,
            threads: thread::available_parallelism().map_or(1, NonZeroUsize::get),
        }
    }
}
