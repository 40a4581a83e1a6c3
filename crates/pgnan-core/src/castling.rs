//! Castling geometry and the sticky king/rook moved flags that gate it.

use std::fmt;

use crate::bitboard::Bitboard;
use crate::color::Color;
use crate::square::Square;

/// Which side of the board to castle toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

impl fmt::Display for CastleSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CastleSide::KingSide => write!(f, "king side"),
            CastleSide::QueenSide => write!(f, "queen side"),
        }
    }
}

/// Where king and rook stand before and after castling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingSquares {
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
}

impl CastlingSquares {
    /// The fixed relocation table for a color and side.
    pub const fn for_side(color: Color, side: CastleSide) -> CastlingSquares {
        let rank = color.back_rank();
        let (king_to, rook_from, rook_to) = match side {
            CastleSide::KingSide => (6, 7, 5),
            CastleSide::QueenSide => (2, 0, 3),
        };
        CastlingSquares {
            king_from: Square::at(4, rank),
            king_to: Square::at(king_to, rank),
            rook_from: Square::at(rook_from, rank),
            rook_to: Square::at(rook_to, rank),
        }
    }

    /// Squares between king and rook that must be empty for the replay driver to castle.
    pub fn must_be_vacant(color: Color, side: CastleSide) -> Bitboard {
        let squares = CastlingSquares::for_side(color, side);
        squares.king_from.squares_between(squares.rook_from)
    }
}

/// Sticky "has moved" flags as a 4-bit field: bit 0 = WK, 1 = WR, 2 = BK, 3 = BR.
///
/// A single rook flag per color covers both rooks. Flags are only ever set.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MovedFlags(u8);

impl MovedFlags {
    /// Nothing has moved.
    pub const NONE: MovedFlags = MovedFlags(0);

    pub const WHITE_KING: MovedFlags = MovedFlags(0b0001);
    pub const WHITE_ROOK: MovedFlags = MovedFlags(0b0010);
    pub const BLACK_KING: MovedFlags = MovedFlags(0b0100);
    pub const BLACK_ROOK: MovedFlags = MovedFlags(0b1000);

    #[inline]
    pub const fn contains(self, other: MovedFlags) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Return flags with all bits from `other` added.
    #[inline]
    pub const fn insert(self, other: MovedFlags) -> MovedFlags {
        MovedFlags(self.0 | other.0)
    }

    /// The king flag for a color.
    #[inline]
    pub const fn king(color: Color) -> MovedFlags {
        match color {
            Color::White => Self::WHITE_KING,
            Color::Black => Self::BLACK_KING,
        }
    }

    /// The rook flag for a color.
    #[inline]
    pub const fn rook(color: Color) -> MovedFlags {
        match color {
            Color::White => Self::WHITE_ROOK,
            Color::Black => Self::BLACK_ROOK,
        }
    }

    /// `true` while neither the king nor a rook of `color` has moved.
    #[inline]
    pub const fn may_castle(self, color: Color) -> bool {
        (self.0 & (Self::king(color).0 | Self::rook(color).0)) == 0
    }
}

impl fmt::Debug for MovedFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (Self::WHITE_KING, "WK"),
            (Self::WHITE_ROOK, "WR"),
            (Self::BLACK_KING, "BK"),
            (Self::BLACK_ROOK, "BR"),
        ];
        let set: Vec<&str> = names
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        write!(f, "MovedFlags({})", set.join("|"))
    }
}

#[cfg(test)]
mod tests {
    use super::{CastleSide, CastlingSquares, MovedFlags};
    use crate::color::Color;

    fn notation(squares: CastlingSquares) -> [String; 4] {
        [
            squares.king_from.to_notation(),
            squares.king_to.to_notation(),
            squares.rook_from.to_notation(),
            squares.rook_to.to_notation(),
        ]
    }

    #[test]
    fn relocation_table() {
        assert_eq!(
            notation(CastlingSquares::for_side(Color::White, CastleSide::KingSide)),
            ["e1", "g1", "h1", "f1"]
        );
        assert_eq!(
            notation(CastlingSquares::for_side(Color::White, CastleSide::QueenSide)),
            ["e1", "c1", "a1", "d1"]
        );
        assert_eq!(
            notation(CastlingSquares::for_side(Color::Black, CastleSide::KingSide)),
            ["e8", "g8", "h8", "f8"]
        );
        assert_eq!(
            notation(CastlingSquares::for_side(Color::Black, CastleSide::QueenSide)),
            ["e8", "c8", "a8", "d8"]
        );
    }

    #[test]
    fn vacancy_requirements() {
        let names = |color, side| -> Vec<String> {
            CastlingSquares::must_be_vacant(color, side)
                .map(|s| s.to_notation())
                .collect()
        };
        assert_eq!(names(Color::White, CastleSide::KingSide), ["f1", "g1"]);
        assert_eq!(names(Color::White, CastleSide::QueenSide), ["b1", "c1", "d1"]);
        assert_eq!(names(Color::Black, CastleSide::KingSide), ["f8", "g8"]);
        assert_eq!(names(Color::Black, CastleSide::QueenSide), ["b8", "c8", "d8"]);
    }

    #[test]
    fn flags_are_per_color() {
        let flags = MovedFlags::NONE.insert(MovedFlags::king(Color::White));
        assert!(!flags.may_castle(Color::White));
        assert!(flags.may_castle(Color::Black));

        let flags = flags.insert(MovedFlags::rook(Color::Black));
        assert!(!flags.may_castle(Color::Black));
        assert!(flags.contains(MovedFlags::WHITE_KING));
        assert!(!flags.contains(MovedFlags::WHITE_ROOK));
        assert!(flags.contains(MovedFlags::BLACK_ROOK));
        assert!(!flags.contains(MovedFlags::BLACK_KING));
    }

    #[test]
    fn debug_lists_set_flags() {
        let flags = MovedFlags::WHITE_ROOK.insert(MovedFlags::BLACK_KING);
        assert_eq!(format!("{flags:?}"), "MovedFlags(WR|BK)");
        assert_eq!(format!("{:?}", MovedFlags::NONE), "MovedFlags()");
    }

    #[test]
    fn side_display() {
        assert_eq!(format!("{}", CastleSide::KingSide), "king side");
        assert_eq!(CastleSide::QueenSide.to_string(), "queen side");
    }
}
