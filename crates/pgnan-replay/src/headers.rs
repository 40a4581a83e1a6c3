//! PGN tag pairs and the header block a game publishes before replaying.

use std::fmt;

/// Ordered tag pairs. Lookups return the first pair with a matching key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    pairs: Vec<(String, String)>,
}

impl Headers {
    pub fn new() -> Headers {
        Headers::default()
    }

    /// Append a tag pair, keeping insertion order.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// The five tags shown in the header block.
    pub fn summary(&self) -> HeaderSummary<'_> {
        HeaderSummary {
            event: self.get("Event"),
            white: self.get("White"),
            black: self.get("Black"),
            round: self.get("Round"),
            result: self.get("Result"),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Headers {
        Headers {
            pairs: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Event, White, Black, Round and Result of one game. Missing tags render as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderSummary<'a> {
    pub event: Option<&'a str>,
    pub white: Option<&'a str>,
    pub black: Option<&'a str>,
    pub round: Option<&'a str>,
    pub result: Option<&'a str>,
}

impl fmt::Display for HeaderSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |value: Option<&str>| value.unwrap_or("null").to_string();
        writeln!(f, "{{")?;
        writeln!(f, "Event: \"{}\",", show(self.event))?;
        writeln!(f, "White: \"{}\",", show(self.white))?;
        writeln!(f, "Black: \"{}\",", show(self.black))?;
        writeln!(f, "Round: \"{}\",", show(self.round))?;
        writeln!(f, "Result: \"{}\"", show(self.result))?;
        writeln!(f, "}},")
    }
}
