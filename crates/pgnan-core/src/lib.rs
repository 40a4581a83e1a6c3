//! Core board types for replaying PGN move lists: squares, pieces, piece
//! geometry, and a board that validates and applies moves.

mod bitboard;
mod board;
mod castling;
mod color;
mod error;
mod piece;
mod placement;
mod square;

pub use bitboard::Bitboard;
pub use board::{Board, PrettyBoard};
pub use castling::{CastleSide, CastlingSquares, MovedFlags};
pub use color::Color;
pub use error::{BoardError, InvariantError, ParseSquareError, PlacementError};
pub use piece::Piece;
pub use placement::STARTING_PLACEMENT;
pub use square::Square;
