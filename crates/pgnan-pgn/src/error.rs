//! PGN reading errors.

use std::io;

/// Why PGN text could not be split into games.
#[derive(Debug, thiserror::Error)]
pub enum PgnError {
    /// The underlying reader failed.
    #[error("failed to read pgn: {source}")]
    Read {
        /// The I/O error reported by the reader.
        #[from]
        source: io::Error,
    },
}
