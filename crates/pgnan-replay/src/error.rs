//! Replay errors.

use pgnan_core::{BoardError, CastleSide, Color};

/// Why a single move could not be applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    /// The board rejected the move.
    #[error(transparent)]
    Board(#[from] BoardError),

    /// A square between king and rook is occupied.
    #[error("{color} cannot castle {side}: squares between king and rook are not vacant")]
    CastlePathBlocked {
        /// The castling color.
        color: Color,
        /// The requested side.
        side: CastleSide,
    },

    /// The token is not a move this replayer understands.
    #[error("unreadable move token \"{token}\"")]
    MalformedMove {
        /// The offending token.
        token: String,
    },
}

/// A move failure located within the game.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("ply {ply} ({color} {token}): {source}")]
pub struct ReplayError {
    /// Zero-based index of the token in the move list.
    pub ply: usize,
    /// Side to move at that ply.
    pub color: Color,
    /// The token as it appeared in the move list.
    pub token: String,
    /// What went wrong.
    #[source]
    pub source: MoveError,
}

/// An error policy name other than `abort` or `skip`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown error policy \"{value}\", expected abort or skip")]
pub struct ParsePolicyError {
    /// The rejected input.
    pub value: String,
}
