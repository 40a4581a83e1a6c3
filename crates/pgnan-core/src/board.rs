//! The replay board: per-color piece sets, sticky moved flags, and the
//! move primitives the replay driver builds on.
//!
//! Legality here is deliberately shallow. Every piece is checked for shape;
//! only rooks are checked for blocking pieces. Queens and bishops slide
//! through anything, and nothing looks at check.

use std::fmt;

use tracing::{debug, trace};

use crate::bitboard::Bitboard;
use crate::castling::{CastleSide, CastlingSquares, MovedFlags};
use crate::color::Color;
use crate::error::{BoardError, InvariantError};
use crate::piece::Piece;
use crate::square::Square;

/// Piece placement for both colors plus the castling gate flags.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Board {
    /// One square set per piece kind, per color: `pieces[color][piece]`.
    pieces: [[Bitboard; Piece::COUNT]; Color::COUNT],
    moved: MovedFlags,
}

impl Board {
    /// A board with no pieces and no moved flags.
    pub const fn empty() -> Board {
        Board {
            pieces: [[Bitboard::EMPTY; Piece::COUNT]; Color::COUNT],
            moved: MovedFlags::NONE,
        }
    }

    /// Return the standard starting position.
    pub fn starting_position() -> Board {
        const BACK_RANK: [Piece; 8] = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];

        let mut board = Board::empty();
        for color in Color::ALL {
            for (file, piece) in BACK_RANK.into_iter().enumerate() {
                board.put(color, piece, Square::at(file as u8, color.back_rank()));
            }
            board.pieces[color.index()][Piece::Pawn.index()] =
                Bitboard::rank_mask(color.pawn_home_rank());
        }
        board
    }

    /// Add a piece to its set. Does not clear anything already on the square.
    #[inline]
    pub fn put(&mut self, color: Color, piece: Piece, sq: Square) {
        let set = &mut self.pieces[color.index()][piece.index()];
        *set = set.with(sq);
    }

    #[inline]
    fn take(&mut self, color: Color, piece: Piece, sq: Square) {
        let set = &mut self.pieces[color.index()][piece.index()];
        *set = set.without(sq);
    }

    /// Squares holding `piece` of `color`.
    #[inline]
    pub fn pieces(&self, color: Color, piece: Piece) -> Bitboard {
        self.pieces[color.index()][piece.index()]
    }

    /// All squares holding a piece of `color`.
    pub fn side(&self, color: Color) -> Bitboard {
        self.pieces[color.index()]
            .iter()
            .fold(Bitboard::EMPTY, |acc, &set| acc | set)
    }

    /// All squares holding any piece.
    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.side(Color::White) | self.side(Color::Black)
    }

    /// The first (color, piece) set containing `sq`, White before Black.
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        Color::ALL.into_iter().find_map(|color| {
            Piece::ALL
                .into_iter()
                .find(|&piece| self.pieces(color, piece).contains(sq))
                .map(|piece| (color, piece))
        })
    }

    /// Current sticky flags.
    #[inline]
    pub fn moved_flags(&self) -> MovedFlags {
        self.moved
    }

    /// Whether the king, or either rook, of `color` has moved. `false` for other kinds.
    pub fn has_moved(&self, color: Color, piece: Piece) -> bool {
        match piece {
            Piece::King => self.moved.contains(MovedFlags::king(color)),
            Piece::Rook => self.moved.contains(MovedFlags::rook(color)),
            _ => false,
        }
    }

    /// Whether `piece` of `color` standing on `start` may go to `target`.
    ///
    /// Pure query over the current placement. Rooks additionally need every
    /// square strictly between `start` and `target` to be empty.
    pub fn is_valid_move(
        &self,
        start: Square,
        target: Square,
        piece: Piece,
        color: Color,
        is_capture: bool,
    ) -> bool {
        match piece {
            Piece::King => start.is_king_move_to(target),
            Piece::Queen => start.is_queen_move_to(target),
            Piece::Bishop => start.is_bishop_move_to(target),
            Piece::Rook => self.is_path_clear(start, target) && start.is_rook_move_to(target),
            Piece::Knight => start.is_knight_move_to(target),
            Piece::Pawn if is_capture => start.is_pawn_capture_to(target, color),
            Piece::Pawn => start.is_pawn_move_to(target, color),
        }
    }

    /// `true` if `start` and `target` share a file or rank and nothing stands between them.
    fn is_path_clear(&self, start: Square, target: Square) -> bool {
        if start.file() != target.file() && start.rank() != target.rank() {
            return false;
        }
        (start.squares_between(target) & self.occupied()).is_empty()
    }

    /// Locate the piece of `color` and kind `piece` that moves to `target`.
    ///
    /// Candidates are scanned in ascending square index (a1, b1, ..., h8) and
    /// the first one that both passes [`Board::is_valid_move`] and contains
    /// `disambiguation` in its notation wins. Ties without a narrowing hint are
    /// therefore settled by that order.
    pub fn find_piece(
        &self,
        piece: Piece,
        target: Square,
        disambiguation: Option<&str>,
        color: Color,
        is_capture: bool,
    ) -> Result<Square, BoardError> {
        self.pieces(color, piece)
            .filter(|&start| self.is_valid_move(start, target, piece, color, is_capture))
            .find(|start| {
                let matches = disambiguation.is_none_or(|hint| start.to_notation().contains(hint));
                trace!(%start, %target, %piece, matches, "find_piece candidate");
                matches
            })
            .ok_or(BoardError::NoPieceFound {
                piece,
                square: target,
            })
    }

    /// Relocate a piece without any legality check.
    ///
    /// Moving a king or rook sets that color's sticky flag.
    pub fn move_piece(&mut self, color: Color, piece: Piece, start: Square, target: Square) {
        self.take(color, piece, start);
        self.put(color, piece, target);

        match piece {
            Piece::King => self.moved = self.moved.insert(MovedFlags::king(color)),
            Piece::Rook => self.moved = self.moved.insert(MovedFlags::rook(color)),
            _ => {}
        }
        debug!(%color, %piece, from = %start, to = %target, "moved");
    }

    /// Clear whatever `color` has on `sq`, returning the kind removed.
    pub fn remove_piece_at(&mut self, color: Color, sq: Square) -> Option<Piece> {
        let piece = Piece::ALL
            .into_iter()
            .find(|&piece| self.pieces(color, piece).contains(sq))?;
        self.take(color, piece, sq);
        Some(piece)
    }

    /// Castle `color` toward `side`.
    ///
    /// Only the moved flags gate this: the squares in between and check are
    /// not examined. On success both flags for the color are set.
    pub fn try_castle(&mut self, color: Color, side: CastleSide) -> Result<(), BoardError> {
        if !self.moved.may_castle(color) {
            return Err(BoardError::InvalidCastling { color, side });
        }

        let squares = CastlingSquares::for_side(color, side);
        self.take(color, Piece::King, squares.king_from);
        self.put(color, Piece::King, squares.king_to);
        self.take(color, Piece::Rook, squares.rook_from);
        self.put(color, Piece::Rook, squares.rook_to);

        self.moved = self
            .moved
            .insert(MovedFlags::king(color))
            .insert(MovedFlags::rook(color));
        debug!(%color, %side, "castled");
        Ok(())
    }

    /// `true` if every square the replay driver requires empty for this castle is empty.
    pub fn castle_path_clear(&self, color: Color, side: CastleSide) -> bool {
        (CastlingSquares::must_be_vacant(color, side) & self.occupied()).is_empty()
    }

    /// Promote the pawn of `color` that reaches the square named by `token`.
    ///
    /// The token is read positionally: characters 0..2 are the destination,
    /// character 3 is the promotion letter, and character 2 is ignored
    /// (`"e8=Q"`). The pawn must stand on the same file, one rank short.
    /// Nothing on the destination square is removed.
    pub fn try_promotion(&mut self, color: Color, token: &str) -> Result<(), BoardError> {
        let malformed = || BoardError::MalformedPromotion {
            token: token.to_string(),
        };
        let square = token
            .get(0..2)
            .and_then(Square::from_notation)
            .ok_or_else(malformed)?;
        let promoted = token
            .chars()
            .nth(3)
            .and_then(Piece::from_promotion_char)
            .ok_or_else(malformed)?;

        if square.rank() != color.promotion_rank() {
            return Err(BoardError::InvalidPromotion { square });
        }
        let origin = Square::at(square.file(), color.pre_promotion_rank());
        if !self.pieces(color, Piece::Pawn).contains(origin) {
            return Err(BoardError::NoPieceFound {
                piece: Piece::Pawn,
                square: origin,
            });
        }

        self.put(color, promoted, square);
        self.take(color, Piece::Pawn, origin);
        debug!(%color, from = %origin, to = %square, piece = %promoted, "promoted");
        Ok(())
    }

    /// Check that no square is claimed twice and each side has one king.
    pub fn validate(&self) -> Result<(), InvariantError> {
        for color in Color::ALL {
            let count = self.pieces(color, Piece::King).count();
            if count != 1 {
                return Err(InvariantError::InvalidKingCount { color, count });
            }
        }

        let mut seen = Bitboard::EMPTY;
        for color in Color::ALL {
            for piece in Piece::ALL {
                let set = self.pieces(color, piece);
                if let Some(square) = (seen & set).lsb() {
                    return Err(InvariantError::OverlappingPieces { square });
                }
                seen |= set;
            }
        }
        Ok(())
    }

    /// Return a pretty-printable wrapper for this board.
    pub fn pretty(&self) -> PrettyBoard<'_> {
        PrettyBoard(self)
    }

    /// Placement character for a square, uppercase for White, `None` if empty.
    pub(crate) fn placement_char_at(&self, sq: Square) -> Option<char> {
        self.piece_at(sq).map(|(color, piece)| match color {
            Color::White => piece.placement_char().to_ascii_uppercase(),
            Color::Black => piece.placement_char(),
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::starting_position()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board(\"{}\", {:?})", self.placement(), self.moved)
    }
}

/// Wrapper for pretty-printing a board as an 8x8 grid.
pub struct PrettyBoard<'a>(&'a Board);

impl fmt::Display for PrettyBoard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0u8..8).rev() {
            write!(f, "{}  ", rank + 1)?;
            for file in 0u8..8 {
                let c = self.0.placement_char_at(Square::at(file, rank)).unwrap_or('.');
                if file < 7 {
                    write!(f, "{c} ")?;
                } else {
                    write!(f, "{c}")?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

#[cfg(test)]
mod tests {
    use super::Board;
    use crate::castling::{CastleSide, MovedFlags};
    use crate::color::Color;
    use crate::error::{BoardError, InvariantError};
    use crate::piece::Piece;
    use crate::square::Square;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn names(board: &Board, color: Color, piece: Piece) -> Vec<String> {
        board.pieces(color, piece).map(|s| s.to_notation()).collect()
    }

    #[test]
    fn starting_position_layout() {
        let board = Board::starting_position();
        assert_eq!(board.side(Color::White).count(), 16);
        assert_eq!(board.side(Color::Black).count(), 16);
        assert_eq!(board.occupied().count(), 32);
        board.validate().unwrap();

        assert_eq!(names(&board, Color::White, Piece::King), ["e1"]);
        assert_eq!(names(&board, Color::White, Piece::Queen), ["d1"]);
        assert_eq!(names(&board, Color::White, Piece::Rook), ["a1", "h1"]);
        assert_eq!(names(&board, Color::White, Piece::Bishop), ["c1", "f1"]);
        assert_eq!(names(&board, Color::White, Piece::Knight), ["b1", "g1"]);
        assert_eq!(
            names(&board, Color::White, Piece::Pawn),
            ["a2", "b2", "c2", "d2", "e2", "f2", "g2", "h2"]
        );
        assert_eq!(names(&board, Color::Black, Piece::King), ["e8"]);
        assert_eq!(names(&board, Color::Black, Piece::Queen), ["d8"]);
        assert_eq!(names(&board, Color::Black, Piece::Rook), ["a8", "h8"]);
        assert_eq!(
            names(&board, Color::Black, Piece::Pawn),
            ["a7", "b7", "c7", "d7", "e7", "f7", "g7", "h7"]
        );
        assert_eq!(board.moved_flags(), MovedFlags::NONE);
    }

    #[test]
    fn piece_at_reports_color_and_kind() {
        let board = Board::starting_position();
        assert_eq!(board.piece_at(sq("e1")), Some((Color::White, Piece::King)));
        assert_eq!(board.piece_at(sq("g8")), Some((Color::Black, Piece::Knight)));
        assert_eq!(board.piece_at(sq("e4")), None);
    }

    #[test]
    fn valid_move_shapes_on_starting_board() {
        let board = Board::starting_position();
        // Shape plus rook path only: e1 to e2 is an adjacent file step, so it passes.
        assert!(board.is_valid_move(sq("e1"), sq("e2"), Piece::Rook, Color::White, false));
        assert!(!board.is_valid_move(sq("e1"), sq("f2"), Piece::Rook, Color::White, false));
        assert!(!board.is_valid_move(sq("a1"), sq("b3"), Piece::Rook, Color::White, false));
        assert!(board.is_valid_move(sq("g1"), sq("f3"), Piece::Knight, Color::White, false));
        assert!(board.is_valid_move(sq("e2"), sq("e4"), Piece::Pawn, Color::White, false));
        assert!(!board.is_valid_move(sq("e2"), sq("d3"), Piece::Pawn, Color::White, false));
        assert!(board.is_valid_move(sq("e2"), sq("d3"), Piece::Pawn, Color::White, true));
    }

    #[test]
    fn rook_is_blocked_by_any_piece() {
        let board = Board::starting_position();
        // a2 pawn stands between a1 and a4.
        assert!(!board.is_valid_move(sq("a1"), sq("a4"), Piece::Rook, Color::White, false));
        // adjacent square: nothing strictly between.
        assert!(board.is_valid_move(sq("a1"), sq("a2"), Piece::Rook, Color::White, false));

        let board: Board = "8/8/8/8/8/8/8/R3k2K".parse().unwrap();
        assert!(!board.is_valid_move(sq("a1"), sq("h1"), Piece::Rook, Color::White, false));
        assert!(board.is_valid_move(sq("a1"), sq("d1"), Piece::Rook, Color::White, false));
        assert!(board.is_valid_move(sq("a1"), sq("e1"), Piece::Rook, Color::White, true));
    }

    #[test]
    fn queen_and_bishop_slide_through_pieces() {
        // Neither slider is checked for obstruction: both pass through the
        // starting pawns. Rooks in the same spot would be blocked.
        let board = Board::starting_position();
        assert!(board.is_valid_move(sq("d1"), sq("d5"), Piece::Queen, Color::White, false));
        assert!(board.is_valid_move(sq("d1"), sq("h5"), Piece::Queen, Color::White, false));
        assert!(board.is_valid_move(sq("c1"), sq("g5"), Piece::Bishop, Color::White, false));
        assert!(!board.is_valid_move(sq("a1"), sq("a5"), Piece::Rook, Color::White, false));
    }

    #[test]
    fn is_valid_move_is_a_pure_query() {
        let board = Board::starting_position();
        let before = board;
        for _ in 0..3 {
            assert!(board.is_valid_move(sq("b1"), sq("c3"), Piece::Knight, Color::White, false));
            assert!(!board.is_valid_move(sq("h1"), sq("h4"), Piece::Rook, Color::White, false));
        }
        assert_eq!(board, before);
    }

    #[test]
    fn find_piece_pawn_double_step() {
        let board = Board::starting_position();
        let found = board
            .find_piece(Piece::Pawn, sq("e4"), None, Color::White, false)
            .unwrap();
        assert_eq!(found, sq("e2"));

        let found = board
            .find_piece(Piece::Pawn, sq("d5"), None, Color::Black, false)
            .unwrap();
        assert_eq!(found, sq("d7"));
    }

    #[test]
    fn find_piece_no_candidate() {
        let board = Board::starting_position();
        let err = board
            .find_piece(Piece::Knight, sq("e4"), None, Color::White, false)
            .unwrap_err();
        assert_eq!(
            err,
            BoardError::NoPieceFound {
                piece: Piece::Knight,
                square: sq("e4"),
            }
        );
    }

    #[test]
    fn find_piece_disambiguation() {
        // Knights on b1 and f3 both reach d2.
        let board: Board = "4k3/8/8/8/8/5N2/8/1N2K3".parse().unwrap();
        let first = board
            .find_piece(Piece::Knight, sq("d2"), None, Color::White, false)
            .unwrap();
        assert_eq!(first, sq("b1"), "lowest index wins without a hint");

        let by_file = board
            .find_piece(Piece::Knight, sq("d2"), Some("f"), Color::White, false)
            .unwrap();
        assert_eq!(by_file, sq("f3"));

        let by_rank = board
            .find_piece(Piece::Knight, sq("d2"), Some("3"), Color::White, false)
            .unwrap();
        assert_eq!(by_rank, sq("f3"));

        assert!(
            board
                .find_piece(Piece::Knight, sq("d2"), Some("c"), Color::White, false)
                .is_err()
        );
    }

    #[test]
    fn move_piece_sets_sticky_flags() {
        let mut board = Board::starting_position();
        board.move_piece(Color::White, Piece::Knight, sq("g1"), sq("f3"));
        assert_eq!(board.moved_flags(), MovedFlags::NONE);
        assert_eq!(names(&board, Color::White, Piece::Knight), ["b1", "f3"]);

        board.move_piece(Color::White, Piece::Rook, sq("h1"), sq("g1"));
        assert!(board.has_moved(Color::White, Piece::Rook));
        assert!(!board.has_moved(Color::White, Piece::King));

        board.move_piece(Color::White, Piece::Rook, sq("g1"), sq("h1"));
        assert!(board.has_moved(Color::White, Piece::Rook), "flag stays set");

        board.move_piece(Color::Black, Piece::King, sq("e8"), sq("e7"));
        assert!(board.has_moved(Color::Black, Piece::King));
        assert!(!board.has_moved(Color::Black, Piece::Rook));
        assert!(!board.has_moved(Color::Black, Piece::Queen));
    }

    #[test]
    fn remove_piece_at_only_touches_that_color() {
        let mut board = Board::starting_position();
        assert_eq!(board.remove_piece_at(Color::White, sq("e7")), None);
        assert_eq!(board.remove_piece_at(Color::Black, sq("e7")), Some(Piece::Pawn));
        assert_eq!(board.side(Color::Black).count(), 15);
        assert_eq!(board.remove_piece_at(Color::Black, sq("e7")), None);
    }

    #[test]
    fn castle_once_then_rejected() {
        let mut board: Board = "r3k2r/8/8/8/8/8/8/R3K2R".parse().unwrap();
        board.try_castle(Color::White, CastleSide::KingSide).unwrap();
        assert_eq!(names(&board, Color::White, Piece::King), ["g1"]);
        assert_eq!(names(&board, Color::White, Piece::Rook), ["a1", "f1"]);
        assert!(board.has_moved(Color::White, Piece::King));
        assert!(board.has_moved(Color::White, Piece::Rook));

        let snapshot = board;
        let err = board.try_castle(Color::White, CastleSide::KingSide).unwrap_err();
        assert_eq!(
            err,
            BoardError::InvalidCastling {
                color: Color::White,
                side: CastleSide::KingSide,
            }
        );
        assert_eq!(board, snapshot, "failed castle leaves the board untouched");

        // The other color is unaffected.
        board.try_castle(Color::Black, CastleSide::QueenSide).unwrap();
        assert_eq!(names(&board, Color::Black, Piece::King), ["c8"]);
        assert_eq!(names(&board, Color::Black, Piece::Rook), ["d8", "h8"]);
    }

    #[test]
    fn castle_ignores_blockers_at_board_level() {
        let mut board = Board::starting_position();
        assert!(!board.castle_path_clear(Color::White, CastleSide::KingSide));
        board.try_castle(Color::White, CastleSide::KingSide).unwrap();
        assert_eq!(names(&board, Color::White, Piece::King), ["g1"]);
    }

    #[test]
    fn castle_rejected_after_any_rook_move() {
        let mut board: Board = "4k3/8/8/8/8/8/8/R3K2R".parse().unwrap();
        board.move_piece(Color::White, Piece::Rook, sq("a1"), sq("a2"));
        assert!(board.try_castle(Color::White, CastleSide::KingSide).is_err());
    }

    #[test]
    fn castle_path_clear_uses_both_colors() {
        let board: Board = "4k3/8/8/8/8/8/8/R3K1nR".parse().unwrap();
        assert!(!board.castle_path_clear(Color::White, CastleSide::KingSide));
        assert!(board.castle_path_clear(Color::White, CastleSide::QueenSide));
    }

    #[test]
    fn promotion_moves_pawn_to_new_set() {
        let mut board: Board = "k7/4P3/8/8/8/8/8/K7".parse().unwrap();
        board.try_promotion(Color::White, "e8=Q").unwrap();
        assert!(board.pieces(Color::White, Piece::Pawn).is_empty());
        assert_eq!(names(&board, Color::White, Piece::Queen), ["e8"]);
    }

    #[test]
    fn promotion_black_underpromotes() {
        let mut board: Board = "k7/8/8/8/8/8/3p4/K7".parse().unwrap();
        board.try_promotion(Color::Black, "d1=N").unwrap();
        assert_eq!(names(&board, Color::Black, Piece::Knight), ["d1"]);
        assert!(board.pieces(Color::Black, Piece::Pawn).is_empty());
    }

    #[test]
    fn promotion_without_pawn() {
        let mut board: Board = "k7/8/8/8/8/8/8/K7".parse().unwrap();
        let err = board.try_promotion(Color::White, "e8=Q").unwrap_err();
        assert_eq!(
            err,
            BoardError::NoPieceFound {
                piece: Piece::Pawn,
                square: sq("e7"),
            }
        );
    }

    #[test]
    fn promotion_wrong_rank() {
        let mut board: Board = "k7/4P3/8/8/8/8/8/K7".parse().unwrap();
        let before = board;
        let err = board.try_promotion(Color::White, "e1=Q").unwrap_err();
        assert_eq!(err, BoardError::InvalidPromotion { square: sq("e1") });
        let err = board.try_promotion(Color::Black, "e8=Q").unwrap_err();
        assert_eq!(err, BoardError::InvalidPromotion { square: sq("e8") });
        assert_eq!(board, before);
    }

    #[test]
    fn promotion_reads_fourth_character() {
        let mut board: Board = "k7/4P3/8/8/8/8/8/K7".parse().unwrap();
        // Character 2 is never inspected.
        board.try_promotion(Color::White, "e8xR").unwrap();
        assert_eq!(names(&board, Color::White, Piece::Rook), ["e8"]);
    }

    #[test]
    fn promotion_malformed_tokens() {
        let mut board: Board = "k7/4P3/8/8/8/8/8/K7".parse().unwrap();
        for token in ["e8=", "e8", "z8=Q", "e8=K", "e8=q"] {
            assert!(
                matches!(
                    board.try_promotion(Color::White, token),
                    Err(BoardError::MalformedPromotion { .. })
                ),
                "token {token}"
            );
        }
    }

    #[test]
    fn validate_detects_overlap() {
        let mut board = Board::starting_position();
        board.move_piece(Color::White, Piece::Knight, sq("g1"), sq("e2"));
        assert_eq!(
            board.validate(),
            Err(InvariantError::OverlappingPieces { square: sq("e2") })
        );
    }

    #[test]
    fn validate_detects_missing_king() {
        assert_eq!(
            Board::empty().validate(),
            Err(InvariantError::InvalidKingCount {
                color: Color::White,
                count: 0,
            })
        );
    }

    #[test]
    fn pretty_print() {
        let board = Board::starting_position();
        let output = format!("{}", board.pretty());
        assert!(output.contains("r n b q k b n r"));
        assert!(output.contains("R N B Q K B N R"));
        assert!(output.contains("a b c d e f g h"));
    }
}
