//! Move-token classification and SAN parsing.

use pgnan_core::{CastleSide, Piece, Square};

/// What a token asks for, decided purely from its spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveToken<'a> {
    /// `0-0` / `0-0-0`, or the PGN spelling `O-O` / `O-O-O`.
    Castle(CastleSide),
    /// Any token containing the `x` capture marker.
    Capture(&'a str),
    /// A four-character `<square>=<letter>` pawn promotion.
    Promotion(&'a str),
    /// Everything else.
    Plain(&'a str),
}

impl<'a> MoveToken<'a> {
    /// Classify a raw token. Check and annotation suffixes are stripped first.
    pub fn classify(token: &'a str) -> MoveToken<'a> {
        match strip_annotations(token) {
            "0-0" | "O-O" => MoveToken::Castle(CastleSide::KingSide),
            "0-0-0" | "O-O-O" => MoveToken::Castle(CastleSide::QueenSide),
            t if t.contains('x') => MoveToken::Capture(t),
            t if is_promotion_token(t) => MoveToken::Promotion(t),
            t => MoveToken::Plain(t),
        }
    }
}

/// Drop trailing `+`, `#`, `!` and `?`.
pub fn strip_annotations(token: &str) -> &str {
    token.trim_end_matches(['+', '#', '!', '?'])
}

fn is_promotion_token(token: &str) -> bool {
    token.len() == 4 && token.as_bytes()[2] == b'='
}

/// A SAN move broken into the pieces the board needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SanMove<'a> {
    pub piece: Piece,
    /// File, rank, or both of the moving piece, when the token names them.
    pub disambiguation: Option<&'a str>,
    pub is_capture: bool,
    pub target: Square,
    pub promotion: Option<Piece>,
}

impl<'a> SanMove<'a> {
    /// Parse `Nf3`, `Rad1`, `exd5`, `Qh4xe1`, `e8=Q`, `bxa1=N` and friends.
    ///
    /// Castling is not SAN for this parser; classify it with [`MoveToken`].
    pub fn parse(token: &'a str) -> Option<SanMove<'a>> {
        let token = strip_annotations(token);

        let (body, promotion) = match token.split_once('=') {
            Some((body, letter)) => {
                let mut chars = letter.chars();
                let promoted = chars.next().and_then(Piece::from_promotion_char)?;
                if chars.next().is_some() {
                    return None;
                }
                (body, Some(promoted))
            }
            None => (token, None),
        };

        let (piece, rest) = match body.chars().next().and_then(Piece::from_san_char) {
            Some(piece) => (piece, &body[1..]),
            None => (Piece::Pawn, body),
        };

        let is_capture = rest.contains('x');
        let (hint, target) = if is_capture {
            let (hint, target) = rest.split_once('x')?;
            (hint, target)
        } else {
            rest.split_at_checked(rest.len().checked_sub(2)?)?
        };

        let target = Square::from_notation(target)?;
        if hint.len() > 2 || !hint.chars().all(|c| matches!(c, 'a'..='h' | '1'..='8')) {
            return None;
        }
        if promotion.is_some() && piece != Piece::Pawn {
            return None;
        }

        Some(SanMove {
            piece,
            disambiguation: (!hint.is_empty()).then_some(hint),
            is_capture,
            target,
            promotion,
        })
    }
}
