//! Text edits produced by refactoring rules.

use serde::{Deserialize, Serialize};

use crate::error::RuleError;
use crate::range::SourceRange;

/// A single replacement of a byte range in the source.
///
/// # Example
///
/// ```
/// use weaver_refactor::{SourceEdit, SourceRange, apply_edits};
///
/// let edits = [SourceEdit::new(SourceRange::new(4, 9), "total")];
/// assert_eq!(apply_edits("let price = 1;", &edits).expect("apply"), "let total = 1;");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceEdit {
    range: SourceRange,
    replacement: String,
}

impl SourceEdit {
    /// Creates an edit replacing `range` with `replacement`.
    #[must_use]
    pub fn new(range: SourceRange, replacement: impl Into<String>) -> Self {
        Self {
            range,
            replacement: replacement.into(),
        }
    }

    /// Creates an insertion at `offset`.
    #[must_use]
    pub fn insert(offset: usize, text: impl Into<String>) -> Self {
        Self::new(SourceRange::point(offset), text)
    }

    /// Creates a deletion of `range`.
    #[must_use]
    pub fn delete(range: SourceRange) -> Self {
        Self::new(range, String::new())
    }

    /// Returns the replaced range.
    #[must_use]
    pub const fn range(&self) -> SourceRange {
        self.range
    }

    /// Returns the replacement text.
    #[must_use]
    pub fn replacement(&self) -> &str {
        &self.replacement
    }
}

/// Applies edits to `source`, returning the rewritten text.
///
/// Edits may arrive in any order. Two insertions at the same offset are
/// applied in the order given.
///
/// # Errors
///
/// Returns [`RuleError::EditOutOfBounds`] when an edit does not address
/// whole characters of `source`, or [`RuleError::OverlappingEdits`] when
/// two edits replace the same bytes.
pub fn apply_edits(source: &str, edits: &[SourceEdit]) -> Result<String, RuleError> {
    let mut ordered: Vec<&SourceEdit> = edits.iter().collect();
    ordered.sort_by_key(|edit| (edit.range.start(), edit.range.end()));

    let mut output = String::with_capacity(source.len());
    let mut cursor = 0_usize;
    let mut previous: Option<SourceRange> = None;

    for edit in ordered {
        let range = edit.range;
        let out_of_bounds = || RuleError::EditOutOfBounds {
            range,
            len: source.len(),
        };
        if let Some(prior) = previous.filter(|prior| prior.end() > range.start()) {
            return Err(RuleError::OverlappingEdits {
                first: prior,
                second: range,
            });
        }
        let unchanged = source.get(cursor..range.start()).ok_or_else(out_of_bounds)?;
        if range.end() < range.start() || source.get(range.start()..range.end()).is_none() {
            return Err(out_of_bounds());
        }
        output.push_str(unchanged);
        output.push_str(&edit.replacement);
        cursor = range.end();
        previous = Some(range);
    }

    let tail = source
        .get(cursor..)
        .ok_or(RuleError::EditOutOfBounds {
            range: SourceRange::point(cursor),
            len: source.len(),
        })?;
    output.push_str(tail);
    Ok(output)
}
