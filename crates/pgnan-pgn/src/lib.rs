//! Reading PGN text into records that [`pgnan_replay::Game`] can replay.

mod error;
mod reader;

pub use error::PgnError;
pub use reader::{PgnRecord, read_games};
