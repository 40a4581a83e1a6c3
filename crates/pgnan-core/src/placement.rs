//! The piece-placement field of FEN, read into and written from [`Board`].
//!
//! Only placement is covered. Boards parsed this way start with no moved
//! flags, so castling is available to both colors.

use std::str::FromStr;

use crate::board::Board;
use crate::color::Color;
use crate::error::PlacementError;
use crate::piece::Piece;
use crate::square::Square;

/// Placement of the standard starting position.
pub const STARTING_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

impl Board {
    /// Parse a placement string such as `"r3k2r/8/8/8/8/8/8/R3K2R"`.
    pub fn from_placement(placement: &str) -> Result<Board, PlacementError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(PlacementError::WrongRankCount { found: ranks.len() });
        }

        let mut board = Board::empty();
        for (rank_index, rank_str) in ranks.iter().enumerate() {
            // Written from rank 8 down to rank 1.
            let rank = 7 - rank_index as u8;
            let mut file: u8 = 0;

            for c in rank_str.chars() {
                if let Some(digit) = c.to_digit(10) {
                    if !(1..=8).contains(&digit) {
                        return Err(PlacementError::InvalidPieceChar { character: c });
                    }
                    let length = usize::from(file) + digit as usize;
                    if length > 8 {
                        return Err(PlacementError::BadRankLength { rank_index, length });
                    }
                    file = length as u8;
                    continue;
                }

                let piece = Piece::from_placement_char(c)
                    .ok_or(PlacementError::InvalidPieceChar { character: c })?;
                let color = if c.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                let sq = Square::new(file, rank).ok_or(PlacementError::BadRankLength {
                    rank_index,
                    length: file as usize + 1,
                })?;
                board.put(color, piece, sq);
                file += 1;
            }

            if file != 8 {
                return Err(PlacementError::BadRankLength {
                    rank_index,
                    length: file as usize,
                });
            }
        }

        Ok(board)
    }

    /// Render the placement field, rank 8 first.
    pub fn placement(&self) -> String {
        let mut out = String::with_capacity(64);
        for rank in (0u8..8).rev() {
            let mut empty_count = 0u8;
            for file in 0u8..8 {
                match self.placement_char_at(Square::at(file, rank)) {
                    Some(c) => {
                        if empty_count > 0 {
                            out.push((b'0' + empty_count) as char);
                            empty_count = 0;
                        }
                        out.push(c);
                    }
                    None => empty_count += 1,
                }
            }
            if empty_count > 0 {
                out.push((b'0' + empty_count) as char);
            }
            if rank > 0 {
                out.push('/');
            }
        }
        out
    }
}

impl FromStr for Board {
    type Err = PlacementError;

    fn from_str(s: &str) -> Result<Board, PlacementError> {
        Board::from_placement(s)
    }
}
