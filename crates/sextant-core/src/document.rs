//! Text documents with an offset ↔ position index.
//!
//! [`TextDocument`] owns the document text and a table of line start offsets,
//! so that converting a character offset into a [`Position`] is a binary
//! search rather than a scan. Offsets are counted in Unicode scalar values
//! (`char`s). `\n`, `\r\n` and a lone `\r` all terminate a line.

use log::trace;
use thiserror::Error;

use crate::position::Position;

/// Error returned when an offset or position does not exist in a document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BadLocation {
    #[error("offset {offset} is outside the document (length {len})")]
    OffsetOutOfRange { offset: usize, len: usize },

    #[error("line {line} is outside the document ({line_count} lines)")]
    LineOutOfRange { line: u32, line_count: usize },
}

/// A document text together with its line index.
#[derive(Debug, Clone)]
pub struct TextDocument {
    text: String,
    /// Character offset of the first character of every line.
    line_starts: Vec<usize>,
    len_chars: usize,
}

impl TextDocument {
    /// Create a document and index its lines.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let (line_starts, len_chars) = index_lines(&text);
        trace!(lines = line_starts.len(), chars = len_chars; "Indexed document");

        Self {
            text,
            line_starts,
            len_chars,
        }
    }

    /// Get the document text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the document length in characters.
    pub fn len_chars(&self) -> usize {
        self.len_chars
    }

    /// Get the number of lines. An empty document has one line.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Convert a zero-based character offset into a [`Position`].
    ///
    /// The offset one past the last character is valid and maps to the end of
    /// the last line.
    ///
    /// # Errors
    ///
    /// Returns [`BadLocation::OffsetOutOfRange`] if `offset` exceeds the
    /// document length.
    pub fn position_at(&self, offset: usize) -> Result<Position, BadLocation> {
        let out_of_range = || BadLocation::OffsetOutOfRange {
            offset,
            len: self.len_chars,
        };

        if offset > self.len_chars {
            return Err(out_of_range());
        }

        // `line_starts[0]` is always 0, so at least one start is <= offset.
        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let character = offset - self.line_starts[line];

        Ok(Position::new(
            u32::try_from(line).map_err(|_| out_of_range())?,
            u32::try_from(character).map_err(|_| out_of_range())?,
        ))
    }

    /// Convert a [`Position`] back into a zero-based character offset.
    ///
    /// A character past the end of its line is clamped to the start of the
    /// next line (or to the document end on the last line).
    ///
    /// # Errors
    ///
    /// Returns [`BadLocation::LineOutOfRange`] if the line does not exist.
    pub fn offset_at(&self, position: Position) -> Result<usize, BadLocation> {
        let line = position.line as usize;
        let Some(&start) = self.line_starts.get(line) else {
            return Err(BadLocation::LineOutOfRange {
                line: position.line,
                line_count: self.line_starts.len(),
            });
        };

        let next_start = self
            .line_starts
            .get(line + 1)
            .copied()
            .unwrap_or(self.len_chars);

        Ok((start + position.character as usize).min(next_start))
    }

    /// Convert a character offset into a byte offset into [`Self::text`].
    ///
    /// Returns `None` if the offset exceeds the document length.
    pub fn byte_offset(&self, char_offset: usize) -> Option<usize> {
        if char_offset == self.len_chars {
            return Some(self.text.len());
        }
        self.text
            .char_indices()
            .nth(char_offset)
            .map(|(byte_offset, _)| byte_offset)
    }
}

/// Collect line start offsets and the total character count.
fn index_lines(text: &str) -> (Vec<usize>, usize) {
    let mut line_starts = vec![0];
    let mut offset = 0;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        offset += 1;
        match ch {
            '\r' => {
                if chars.next_if_eq(&'\n').is_some() {
                    offset += 1;
                }
                line_starts.push(offset);
            }
            '\n' => line_starts.push(offset),
            _ => {}
        }
    }

    (line_starts, offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document() {
        let doc = TextDocument::new("");

        assert_eq!(doc.line_count(), 1);
        assert_eq!(doc.position_at(0), Ok(Position::new(0, 0)));
        assert!(doc.position_at(1).is_err());
    }

    #[test]
    fn test_position_at_multiline() {
        let doc = TextDocument::new("<a>\n  <b/>\n</a>");

        assert_eq!(doc.position_at(0), Ok(Position::new(0, 0)));
        assert_eq!(doc.position_at(3), Ok(Position::new(0, 3)));
        assert_eq!(doc.position_at(4), Ok(Position::new(1, 0)));
        assert_eq!(doc.position_at(6), Ok(Position::new(1, 2)));
        assert_eq!(doc.position_at(11), Ok(Position::new(2, 0)));
        assert_eq!(doc.position_at(15), Ok(Position::new(2, 4)));
    }

    #[test]
    fn test_position_at_out_of_range() {
        let doc = TextDocument::new("<a/>");

        assert_eq!(
            doc.position_at(5),
            Err(BadLocation::OffsetOutOfRange { offset: 5, len: 4 })
        );
    }

    #[test]
    fn test_crlf_and_lone_cr() {
        let doc = TextDocument::new("a\r\nb\rc");

        assert_eq!(doc.line_count(), 3);
        assert_eq!(doc.position_at(3), Ok(Position::new(1, 0)));
        assert_eq!(doc.position_at(5), Ok(Position::new(2, 0)));
    }

    #[test]
    fn test_counts_chars_not_bytes() {
        let doc = TextDocument::new("<é>\n<ü/>");

        assert_eq!(doc.len_chars(), 8);
        assert_eq!(doc.position_at(5), Ok(Position::new(1, 1)));
        assert_eq!(doc.byte_offset(5), Some(6));
        assert_eq!(doc.byte_offset(8), Some(doc.text().len()));
        assert_eq!(doc.byte_offset(9), None);
    }

    #[test]
    fn test_offset_at() {
        let doc = TextDocument::new("<a>\n  <b/>\n</a>");

        assert_eq!(doc.offset_at(Position::new(1, 2)), Ok(6));
        assert_eq!(doc.offset_at(Position::new(0, 99)), Ok(4));
        assert_eq!(doc.offset_at(Position::new(2, 99)), Ok(15));
        assert_eq!(
            doc.offset_at(Position::new(3, 0)),
            Err(BadLocation::LineOutOfRange {
                line: 3,
                line_count: 3
            })
        );
    }
}
