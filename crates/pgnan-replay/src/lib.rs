//! Replays PGN move lists onto a [`pgnan_core::Board`].
//!
//! A [`Game`] holds its tag pairs and move text, publishes a short header
//! block, then classifies each token and applies it for the side to move.

mod error;
mod game;
mod headers;
mod options;
mod token;

pub use error::{MoveError, ParsePolicyError, ReplayError};
pub use game::{Game, ReplaySummary};
pub use headers::{HeaderSummary, Headers};
pub use options::{ErrorPolicy, ReplayOptions};
pub use token::{MoveToken, SanMove, strip_annotations};
