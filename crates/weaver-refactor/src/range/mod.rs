//! Source ranges and line/column positions.
//!
//! [`SourceRange`] is the value produced by selection requirements. It uses
//! half-open UTF-8 byte offsets. [`LineCol`] is the one-based position form
//! that editors and command lines use to describe a selection; it converts to
//! a byte offset against a concrete source text.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while converting positions into byte ranges.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    /// The position does not exist in the source text.
    #[error("position {position} lies outside the source")]
    PositionOutOfBounds {
        /// The offending position.
        position: LineCol,
    },

    /// The end position precedes the start position.
    #[error("selection end {end} precedes its start {start}")]
    Reversed {
        /// Start position.
        start: LineCol,
        /// End position.
        end: LineCol,
    },
}

/// A half-open byte range within a UTF-8 source.
///
/// `start` is inclusive and `end` is exclusive. The type itself does not
/// validate the range; the [`RuleContext`](crate::RuleContext) decides
/// whether a range is a valid selection for its source.
///
/// # Example
///
/// ```
/// use weaver_refactor::SourceRange;
///
/// let range = SourceRange::new(10, 20);
/// assert_eq!(range.len(), 10);
/// assert_eq!(range.to_string(), "[10, 20)");
/// assert!(SourceRange::point(4).is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SourceRange {
    start: usize,
    end: usize,
}

impl SourceRange {
    /// Creates a range from byte offsets.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Creates a zero-length range at `offset`, such as a cursor position.
    #[must_use]
    pub const fn point(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Builds a byte range from two one-based line/column positions.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError::PositionOutOfBounds`] when either position does
    /// not exist in `source`, or [`RangeError::Reversed`] when `end` precedes
    /// `start`.
    pub fn from_line_cols(source: &str, start: LineCol, end: LineCol) -> Result<Self, RangeError> {
        let start_offset = start.to_offset(source)?;
        let end_offset = end.to_offset(source)?;
        if end_offset < start_offset {
            return Err(RangeError::Reversed { start, end });
        }
        Ok(Self::new(start_offset, end_offset))
    }

    /// Returns the inclusive start offset.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Returns the exclusive end offset.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.end
    }

    /// Returns the number of bytes covered by the range.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns `true` for zero-length ranges.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` when `other` lies entirely within this range.
    #[must_use]
    pub const fn contains(&self, other: &Self) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Returns the text covered by the range, if it is a valid slice of
    /// `source`.
    #[must_use]
    pub fn slice<'a>(&self, source: &'a str) -> Option<&'a str> {
        source.get(self.start..self.end)
    }
}

impl fmt::Display for SourceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// A one-based line and column position.
///
/// Columns count UTF-8 bytes within the line. Column `n + 1` on a line of
/// `n` bytes addresses the end of that line.
///
/// # Example
///
/// ```
/// use weaver_refactor::LineCol;
///
/// let source = "fn main() {\n    run();\n}\n";
/// assert_eq!(LineCol::new(2, 5).to_offset(source), Ok(16));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineCol {
    line: u32,
    column: u32,
}

impl LineCol {
    /// Creates a new one-based position.
    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Returns the one-based line number.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// Returns the one-based column number.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Converts the position into a byte offset within `source`.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError::PositionOutOfBounds`] when the line does not
    /// exist, the column runs past the end of the line, or the offset would
    /// split a multi-byte character.
    pub fn to_offset(self, source: &str) -> Result<usize, RangeError> {
        let out_of_bounds = RangeError::PositionOutOfBounds { position: self };
        let (Some(line_index), Some(column_index)) = (
            zero_based(self.line),
            zero_based(self.column),
        ) else {
            return Err(out_of_bounds);
        };

        let mut line_start = 0_usize;
        let mut line_count = 0_usize;
        for (index, text) in source.split_inclusive('\n').enumerate() {
            if index == line_index {
                return column_offset(line_start, text, column_index).ok_or(out_of_bounds);
            }
            line_start += text.len();
            line_count = index + 1;
        }

        // The empty line after a trailing newline (or an empty source) only
        // has a single addressable column.
        let has_trailing_line = source.is_empty() || source.ends_with('\n');
        if has_trailing_line && line_index == line_count && column_index == 0 {
            return Ok(source.len());
        }
        Err(out_of_bounds)
    }
}

impl fmt::Display for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

fn zero_based(value: u32) -> Option<usize> {
    value
        .checked_sub(1)
        .and_then(|index| usize::try_from(index).ok())
}

fn column_offset(line_start: usize, text: &str, column_index: usize) -> Option<usize> {
    let without_newline = text.strip_suffix('\n').unwrap_or(text);
    let content = without_newline
        .strip_suffix('\r')
        .unwrap_or(without_newline);
    (column_index <= content.len() && content.is_char_boundary(column_index))
        .then_some(line_start + column_index)
}
