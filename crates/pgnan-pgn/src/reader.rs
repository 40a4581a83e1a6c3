//! Splitting PGN text into tag pairs and bare SAN move lists.

use std::io::Cursor;
use std::ops::ControlFlow;

use pgn_reader::{RawTag, Reader, SanPlus, Skip, Visitor};
use tracing::debug;

use pgnan_replay::{Game, Headers};

use crate::error::PgnError;

/// One game as read from PGN: its tags and its SAN tokens joined by single spaces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PgnRecord {
    pub headers: Headers,
    pub moves: String,
}

impl PgnRecord {
    /// Number of SAN tokens in the move list.
    pub fn ply_count(&self) -> usize {
        self.moves.split_whitespace().count()
    }

    /// A replayable game starting from the standard position.
    pub fn into_game(self) -> Game {
        Game::new(self.headers, self.moves)
    }
}

/// Mainline SAN collected while the movetext is read.
struct Mainline {
    headers: Headers,
    moves: Vec<String>,
}

/// Keeps every tag, the mainline SAN, and nothing else.
///
/// Comments, NAGs, move numbers and results never reach the visitor as
/// moves; variations are skipped whole.
struct RecordCollector;

impl Visitor for RecordCollector {
    type Tags = Headers;
    type Movetext = Mainline;
    type Output = PgnRecord;

    fn begin_tags(&mut self) -> ControlFlow<Self::Output, Self::Tags> {
        ControlFlow::Continue(Headers::new())
    }

    fn tag(
        &mut self,
        tags: &mut Self::Tags,
        name: &[u8],
        value: RawTag<'_>,
    ) -> ControlFlow<Self::Output> {
        tags.insert(
            String::from_utf8_lossy(name),
            value.decode_utf8_lossy().into_owned(),
        );
        ControlFlow::Continue(())
    }

    fn begin_movetext(&mut self, tags: Self::Tags) -> ControlFlow<Self::Output, Self::Movetext> {
        ControlFlow::Continue(Mainline {
            headers: tags,
            moves: Vec::new(),
        })
    }

    fn san(&mut self, movetext: &mut Self::Movetext, san: SanPlus) -> ControlFlow<Self::Output> {
        movetext.moves.push(san.to_string());
        ControlFlow::Continue(())
    }

    fn begin_variation(
        &mut self,
        _movetext: &mut Self::Movetext,
    ) -> ControlFlow<Self::Output, Skip> {
        ControlFlow::Continue(Skip(true))
    }

    fn end_game(&mut self, movetext: Self::Movetext) -> Self::Output {
        let record = PgnRecord {
            headers: movetext.headers,
            moves: movetext.moves.join(" "),
        };
        debug!(
            tags = record.headers.len(),
            plies = record.ply_count(),
            "read game"
        );
        record
    }
}

/// Read every game in `text`, in order.
pub fn read_games(text: &str) -> Result<Vec<PgnRecord>, PgnError> {
    let mut collector = RecordCollector;
    let mut reader = Reader::new(Cursor::new(text.as_bytes()));
    let mut records = Vec::new();

    while let Some(record) = reader.read_game(&mut collector)? {
        records.push(record);
    }

    debug!(games = records.len(), "read pgn");
    Ok(records)
}
