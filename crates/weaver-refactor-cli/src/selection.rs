//! Parsing of the `--selection` argument.
//!
//! Selections are written as `line:column-line:column` or as a single
//! `line:column` cursor position. Lines and columns are one-based; columns
//! count bytes within the line.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use weaver_refactor::{LineCol, RangeError, SourceRange};

/// Errors raised when the selection text is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum SelectionParseError {
    #[error("expected 'line:column' but found '{0}'")]
    MissingColumn(String),
    #[error("'{0}' is not a positive number")]
    InvalidNumber(String),
}

/// A selection as written on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SelectionSpec {
    start: LineCol,
    end: LineCol,
}

impl SelectionSpec {
    /// Resolves the selection to byte offsets within `source`.
    pub(crate) fn resolve(self, source: &str) -> Result<SourceRange, RangeError> {
        SourceRange::from_line_cols(source, self.start, self.end)
    }
}

impl fmt::Display for SelectionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

impl FromStr for SelectionSpec {
    type Err = SelectionParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let trimmed = text.trim();
        let (start, end) = trimmed.split_once('-').unwrap_or((trimmed, trimmed));
        Ok(Self {
            start: parse_position(start)?,
            end: parse_position(end)?,
        })
    }
}

fn parse_position(text: &str) -> Result<LineCol, SelectionParseError> {
    let (line, column) = text
        .trim()
        .split_once(':')
        .ok_or_else(|| SelectionParseError::MissingColumn(text.to_owned()))?;
    Ok(LineCol::new(parse_number(line)?, parse_number(column)?))
}

fn parse_number(text: &str) -> Result<u32, SelectionParseError> {
    text.trim()
        .parse::<u32>()
        .ok()
        .filter(|value| *value > 0)
        .ok_or_else(|| SelectionParseError::InvalidNumber(text.to_owned()))
}
