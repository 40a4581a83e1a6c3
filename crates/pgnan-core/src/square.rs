//! Board squares, algebraic notation, and per-piece move geometry.

use std::fmt;
use std::str::FromStr;

use crate::bitboard::Bitboard;
use crate::color::Color;
use crate::error::ParseSquareError;

/// A square on the chess board, encoded as a `u8` in LERF format.
///
/// Index = rank * 8 + file, so a1 = 0, b1 = 1, ..., h8 = 63. File and rank
/// are both zero-based here; notation displays the rank one-based.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square(u8);

impl Square {
    /// Total number of squares.
    pub const COUNT: usize = 64;

    /// Create a square from zero-based file and rank, `None` if either is off the board.
    #[inline]
    pub const fn new(file: u8, rank: u8) -> Option<Square> {
        if file < 8 && rank < 8 {
            Some(Square(rank * 8 + file))
        } else {
            None
        }
    }

    /// Create a square from zero-based file and rank without bounds checking.
    ///
    /// # Panics
    ///
    /// Debug-asserts that both coordinates are below 8.
    #[inline]
    pub(crate) const fn at(file: u8, rank: u8) -> Square {
        debug_assert!(file < 8 && rank < 8);
        Square(rank * 8 + file)
    }

    /// Create a square from a zero-based index, returning `None` if out of range.
    #[inline]
    pub const fn from_index(index: u8) -> Option<Square> {
        if index < 64 { Some(Square(index)) } else { None }
    }

    #[inline]
    pub(crate) const fn from_index_unchecked(index: u8) -> Square {
        debug_assert!(index < 64);
        Square(index)
    }

    /// Parse two-character notation (e.g. "e4").
    pub fn from_notation(s: &str) -> Option<Square> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }

        let (file_byte, rank_byte) = (bytes[0], bytes[1]);
        if !(b'a'..=b'h').contains(&file_byte) || !(b'1'..=b'8').contains(&rank_byte) {
            return None;
        }

        Some(Square::at(file_byte - b'a', rank_byte - b'1'))
    }

    /// Render as two-character notation.
    pub fn to_notation(self) -> String {
        self.to_string()
    }

    /// Return the zero-based index (0..63).
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Zero-based file (0 = a).
    #[inline]
    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    /// Zero-based rank (0 = rank 1).
    #[inline]
    pub const fn rank(self) -> u8 {
        self.0 / 8
    }

    /// File letter, `'a'..='h'`.
    #[inline]
    pub const fn file_char(self) -> char {
        (b'a' + self.file()) as char
    }

    /// Rank digit, `'1'..='8'`.
    #[inline]
    pub const fn rank_char(self) -> char {
        (b'1' + self.rank()) as char
    }

    /// Return a bitboard with only this square set.
    #[inline]
    pub const fn bitboard(self) -> Bitboard {
        Bitboard::new(1u64 << self.0)
    }

    /// Iterate over all 64 squares in index order (a1, b1, ..., h8).
    pub fn all() -> impl Iterator<Item = Square> {
        (0u8..64).map(Square)
    }

    #[inline]
    const fn deltas(self, target: Square) -> (i8, i8) {
        (
            target.file() as i8 - self.file() as i8,
            target.rank() as i8 - self.rank() as i8,
        )
    }

    /// One step in any direction.
    pub const fn is_king_move_to(self, target: Square) -> bool {
        let (df, dr) = self.deltas(target);
        df.abs() <= 1 && dr.abs() <= 1 && (df != 0 || dr != 0)
    }

    /// Any non-zero displacement along a file, a rank, or a diagonal.
    pub const fn is_queen_move_to(self, target: Square) -> bool {
        let (df, dr) = self.deltas(target);
        (df != 0 || dr != 0) && (df == 0 || dr == 0 || df.abs() == dr.abs())
    }

    pub const fn is_bishop_move_to(self, target: Square) -> bool {
        let (df, dr) = self.deltas(target);
        df != 0 && df.abs() == dr.abs()
    }

    /// Same file or same rank, but not both. Blocking pieces are the board's concern.
    pub const fn is_rook_move_to(self, target: Square) -> bool {
        let (df, dr) = self.deltas(target);
        (df == 0) != (dr == 0)
    }

    pub const fn is_knight_move_to(self, target: Square) -> bool {
        let (df, dr) = self.deltas(target);
        let (df, dr) = (df.abs(), dr.abs());
        (df == 1 && dr == 2) || (df == 2 && dr == 1)
    }

    /// Straight advance on the same file: one step, or two from the home rank.
    pub const fn is_pawn_move_to(self, target: Square, color: Color) -> bool {
        let (df, dr) = self.deltas(target);
        if df != 0 {
            return false;
        }
        let steps = dr * color.forward();
        steps == 1 || (steps == 2 && self.rank() == color.pawn_home_rank())
    }

    /// One step forward and one file sideways.
    pub const fn is_pawn_capture_to(self, target: Square, color: Color) -> bool {
        let (df, dr) = self.deltas(target);
        df.abs() == 1 && dr == color.forward()
    }

    /// Squares strictly between `self` and `target` when they share a file or rank.
    ///
    /// Empty for adjacent squares, for identical squares, and for any pair
    /// that is not on a common file or rank.
    pub fn squares_between(self, target: Square) -> Bitboard {
        let mut between = Bitboard::EMPTY;
        if self.file() == target.file() {
            let (lo, hi) = min_max(self.rank(), target.rank());
            for rank in lo + 1..hi {
                between = between.with(Square::at(self.file(), rank));
            }
        } else if self.rank() == target.rank() {
            let (lo, hi) = min_max(self.file(), target.file());
            for file in lo + 1..hi {
                between = between.with(Square::at(file, self.rank()));
            }
        }
        between
    }
}

#[inline]
fn min_max(a: u8, b: u8) -> (u8, u8) {
    if a <= b { (a, b) } else { (b, a) }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self)
    }
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Square, ParseSquareError> {
        Square::from_notation(s).ok_or_else(|| ParseSquareError {
            notation: s.to_string(),
        })
    }
}
