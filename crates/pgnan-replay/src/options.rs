//! Replay knobs.

use std::fmt;
use std::str::FromStr;

use crate::error::ParsePolicyError;

/// What the replay does when a ply cannot be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Stop and return the error.
    #[default]
    Abort,
    /// Log it, record it, and continue with the next token.
    Skip,
}

impl FromStr for ErrorPolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<ErrorPolicy, ParsePolicyError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abort" => Ok(ErrorPolicy::Abort),
            "skip" => Ok(ErrorPolicy::Skip),
            _ => Err(ParsePolicyError {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorPolicy::Abort => write!(f, "abort"),
            ErrorPolicy::Skip => write!(f, "skip"),
        }
    }
}

/// Options for [`Game::play`](crate::Game::play) and [`Game::run`](crate::Game::run).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplayOptions {
    pub on_error: ErrorPolicy,
}

impl ReplayOptions {
    pub fn with_policy(on_error: ErrorPolicy) -> ReplayOptions {
        ReplayOptions { on_error }
    }
}
