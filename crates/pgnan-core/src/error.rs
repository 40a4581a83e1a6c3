//! Error types for board mutation, placement parsing, and square notation.

use crate::castling::CastleSide;
use crate::color::Color;
use crate::piece::Piece;
use crate::square::Square;

/// Conditions that stop a single board operation. The board is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// No piece of the requested kind can reach the square.
    #[error("no {piece} found for square {square}")]
    NoPieceFound {
        /// The piece kind searched for.
        piece: Piece,
        /// The target square of the search (or the expected origin for promotions).
        square: Square,
    },
    /// The king or a rook of that color has already moved.
    #[error("{color} cannot castle {side}: king or rook has already moved")]
    InvalidCastling {
        /// The castling color.
        color: Color,
        /// The requested castling side.
        side: CastleSide,
    },
    /// The promotion square is not on the mover's last rank.
    #[error("invalid promotion to {square}")]
    InvalidPromotion {
        /// The promotion destination.
        square: Square,
    },
    /// The promotion token does not have the `<square>?<letter>` shape.
    #[error("malformed promotion token \"{token}\"")]
    MalformedPromotion {
        /// The offending token.
        token: String,
    },
}

/// Structural problems found by [`Board::validate`](crate::board::Board::validate).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantError {
    /// A side does not have exactly one king.
    #[error("expected 1 king for {color}, found {count}")]
    InvalidKingCount {
        /// Which side has the wrong king count.
        color: Color,
        /// Number of kings found.
        count: u32,
    },
    /// Two piece sets claim the same square.
    #[error("more than one piece on {square}")]
    OverlappingPieces {
        /// The lowest-index square claimed twice.
        square: Square,
    },
}

/// Errors from parsing the piece-placement field of a FEN string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    /// The placement does not have exactly 8 ranks.
    #[error("expected 8 ranks in piece placement, found {found}")]
    WrongRankCount {
        /// Number of ranks found.
        found: usize,
    },
    /// A rank describes more or fewer than 8 squares.
    #[error("rank {rank_index} describes {length} squares, expected 8")]
    BadRankLength {
        /// Zero-based rank index as written (0 = rank 8).
        rank_index: usize,
        /// Number of squares described.
        length: usize,
    },
    /// An unrecognized character appeared in the placement.
    #[error("invalid piece character: '{character}'")]
    InvalidPieceChar {
        /// The invalid character.
        character: char,
    },
}

/// A string that is not two-character square notation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid square notation \"{notation}\"")]
pub struct ParseSquareError {
    /// The rejected text.
    pub notation: String,
}
