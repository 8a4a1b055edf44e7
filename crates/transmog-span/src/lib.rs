//! Line/column positions and the source intervals covered by syntax nodes.

use std::fmt;

/// A 1-based line/column pair.
///
/// Ordering is lexicographic by `(line, column)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// An inclusive interval of source text, from `start` to `end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Span {
    start: Position,
    end: Position,
}

impl Span {
    pub const fn new(start_line: u32, start_column: u32, end_line: u32, end_column: u32) -> Self {
        Self {
            start: Position::new(start_line, start_column),
            end: Position::new(end_line, end_column),
        }
    }

    /// The one-line extent of a token of `len` characters at `line:column`.
    ///
    /// An empty token covers its starting column only.
    pub const fn token(line: u32, column: u32, len: u32) -> Self {
        Self::new(line, column, line, column + len.saturating_sub(1))
    }

    pub const fn start(&self) -> Position {
        self.start
    }

    pub const fn end(&self) -> Position {
        self.end
    }

    /// Widens `self` so it also covers `other`.
    pub fn compose(&mut self, other: &Self) {
        if other.start < self.start {
            self.start = other.start;
        }
        if other.end > self.end {
            self.end = other.end;
        }
    }

    pub fn contains(&self, line: u32, column: u32) -> bool {
        let position = Position::new(line, column);
        self.start <= position && position <= self.end
    }

    pub fn contains_span(&self, other: &Self) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} - {}]", self.start, self.end)
    }
}

/// Folds `other` into an optional accumulator, as the finishing pass does
/// for child spans.
pub fn compose_into(acc: &mut Option<Span>, other: Option<Span>) {
    match (acc.as_mut(), other) {
        (Some(acc), Some(other)) => acc.compose(&other),
        (None, Some(other)) => *acc = Some(other),
        (_, None) => {}
    }
}
