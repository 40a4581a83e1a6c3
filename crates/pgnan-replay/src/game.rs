//! Replaying one game's move list over its own board.
//!
//! Each token is applied in order, White on even plies and Black on odd
//! ones. The board owns all castling state; the game only adds the
//! requirement that the squares between king and rook are empty.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, warn};

use pgnan_core::{Board, BoardError, CastleSide, Color, Square};

use crate::error::{MoveError, ReplayError};
use crate::headers::{HeaderSummary, Headers};
use crate::options::{ErrorPolicy, ReplayOptions};
use crate::token::{MoveToken, SanMove};

static NEXT_GAME_ID: AtomicU64 = AtomicU64::new(1);

/// Outcome of a replay that did not abort.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Plies applied to the board.
    pub applied: usize,
    /// Plies rejected under [`ErrorPolicy::Skip`], in order.
    pub skipped: Vec<ReplayError>,
}

/// One game: its tags, its move text, and the board the moves are replayed on.
#[derive(Debug, Clone)]
pub struct Game {
    id: u64,
    headers: Headers,
    moves: String,
    board: Board,
}

impl Game {
    /// Create a game starting from the standard position.
    pub fn new(headers: Headers, moves: impl Into<String>) -> Game {
        Game::with_board(headers, moves, Board::starting_position())
    }

    /// Create a game replaying from an arbitrary board.
    pub fn with_board(headers: Headers, moves: impl Into<String>, board: Board) -> Game {
        Game {
            id: NEXT_GAME_ID.fetch_add(1, Ordering::Relaxed),
            headers,
            moves: moves.into(),
            board,
        }
    }

    /// Process-unique id, increasing in creation order.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn moves(&self) -> &str {
        &self.moves
    }

    /// The move tokens in order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.moves.split_whitespace()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn into_board(self) -> Board {
        self.board
    }

    pub fn header_summary(&self) -> HeaderSummary<'_> {
        self.headers.summary()
    }

    /// Publish the header block, then replay every move.
    pub fn run<F>(
        &mut self,
        options: ReplayOptions,
        mut publish: F,
    ) -> Result<ReplaySummary, ReplayError>
    where
        F: FnMut(&str),
    {
        publish(&self.header_summary().to_string());
        self.play(options)
    }

    /// Replay every move token against the board.
    pub fn play(&mut self, options: ReplayOptions) -> Result<ReplaySummary, ReplayError> {
        let mut summary = ReplaySummary::default();

        for (ply, token) in self.moves.split_whitespace().enumerate() {
            let color = Color::from_ply(ply);
            debug!(game = self.id, ply, %color, token, "applying");

            match apply_token(&mut self.board, color, token) {
                Ok(()) => summary.applied += 1,
                Err(source) => {
                    let err = ReplayError {
                        ply,
                        color,
                        token: token.to_string(),
                        source,
                    };
                    match options.on_error {
                        ErrorPolicy::Abort => return Err(err),
                        ErrorPolicy::Skip => {
                            warn!(game = self.id, error = %err, "skipping ply");
                            summary.skipped.push(err);
                        }
                    }
                }
            }
        }

        debug!(
            game = self.id,
            applied = summary.applied,
            skipped = summary.skipped.len(),
            "replay finished"
        );
        Ok(summary)
    }

    /// Apply the token found at `ply`, with the side to move taken from its parity.
    pub fn apply(&mut self, ply: usize, token: &str) -> Result<(), ReplayError> {
        let color = Color::from_ply(ply);
        apply_token(&mut self.board, color, token).map_err(|source| ReplayError {
            ply,
            color,
            token: token.to_string(),
            source,
        })
    }

    /// Castle `color` toward `side` if the path is empty and the board allows it.
    pub fn try_castle(&mut self, color: Color, side: CastleSide) -> Result<(), MoveError> {
        castle(&mut self.board, color, side)
    }
}

fn apply_token(board: &mut Board, color: Color, token: &str) -> Result<(), MoveError> {
    match MoveToken::classify(token) {
        MoveToken::Castle(side) => castle(board, color, side),
        MoveToken::Capture(token) => capture(board, color, token),
        MoveToken::Promotion(token) => Ok(board.try_promotion(color, token)?),
        MoveToken::Plain(token) => plain_move(board, color, token),
    }
}

fn castle(board: &mut Board, color: Color, side: CastleSide) -> Result<(), MoveError> {
    if !board.castle_path_clear(color, side) {
        return Err(MoveError::CastlePathBlocked { color, side });
    }
    board.try_castle(color, side)?;
    Ok(())
}

fn parse(token: &str) -> Result<SanMove<'_>, MoveError> {
    SanMove::parse(token).ok_or_else(|| MoveError::MalformedMove {
        token: token.to_string(),
    })
}

fn check_promotion_rank(color: Color, target: Square) -> Result<(), BoardError> {
    if target.rank() == color.promotion_rank() {
        Ok(())
    } else {
        Err(BoardError::InvalidPromotion { square: target })
    }
}

fn plain_move(board: &mut Board, color: Color, token: &str) -> Result<(), MoveError> {
    let san = parse(token)?;
    let from = board.find_piece(san.piece, san.target, san.disambiguation, color, false)?;

    match san.promotion {
        Some(promoted) => {
            check_promotion_rank(color, san.target)?;
            board.remove_piece_at(color, from);
            board.put(color, promoted, san.target);
        }
        None => board.move_piece(color, san.piece, from, san.target),
    }
    Ok(())
}

fn capture(board: &mut Board, color: Color, token: &str) -> Result<(), MoveError> {
    let san = parse(token)?;
    let from = board.find_piece(san.piece, san.target, san.disambiguation, color, true)?;
    if san.promotion.is_some() {
        check_promotion_rank(color, san.target)?;
    }

    match board.remove_piece_at(!color, san.target) {
        Some(captured) => debug!(%color, %captured, square = %san.target, "captured"),
        // En passant lands on an empty square and is not modelled.
        None => debug!(%color, square = %san.target, "capture onto empty square"),
    }

    match san.promotion {
        Some(promoted) => {
            board.remove_piece_at(color, from);
            board.put(color, promoted, san.target);
        }
        None => board.move_piece(color, san.piece, from, san.target),
    }
    Ok(())
}
