//! Line/character coordinates in a text document.
//!
//! Both [`Position`] and [`Range`] use zero-based values, matching the
//! coordinate system of editor protocols.

use std::fmt;

/// A zero-based line/character position in a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Line number (0-indexed).
    pub line: u32,
    /// Character offset within the line (0-indexed, in Unicode scalar values).
    pub character: u32,
}

impl Position {
    /// Create a new position.
    pub const fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.character)
    }
}

/// A range between two positions in a document.
///
/// The end position is exclusive. A range whose start equals its end is
/// collapsed and marks a single point in the document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Range {
    /// Start position (inclusive).
    pub start: Position,
    /// End position (exclusive).
    pub end: Position,
}

impl Range {
    /// Create a new range.
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Create a zero-length range anchored at `position`.
    pub const fn collapsed(position: Position) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    /// Returns `true` if the range covers no characters.
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}
