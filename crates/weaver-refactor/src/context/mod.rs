//! Per-invocation evaluation context for refactoring rules.
//!
//! A [`RuleContext`] is built by the driver for a single refactoring
//! invocation. Requirements borrow it immutably; the context alone decides
//! whether the selection it carries is valid.

use std::path::{Path, PathBuf};

use crate::range::SourceRange;

/// Ambient state read by requirements and rules.
///
/// # Example
///
/// ```
/// use weaver_refactor::{RuleContext, SourceRange};
///
/// let context = RuleContext::new("let answer = 42;\n")
///     .with_selection(SourceRange::new(4, 10));
/// assert_eq!(context.selection_range(), Some(SourceRange::new(4, 10)));
///
/// let outside = RuleContext::new("x").with_selection(SourceRange::new(0, 5));
/// assert_eq!(outside.selection_range(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleContext {
    source: String,
    path: Option<PathBuf>,
    selection: Option<SourceRange>,
}

impl RuleContext {
    /// Creates a context over `source` with no selection.
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            path: None,
            selection: None,
        }
    }

    /// Records the path the source was read from.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Records the editor or command-line selection.
    #[must_use]
    pub const fn with_selection(mut self, selection: SourceRange) -> Self {
        self.selection = Some(selection);
        self
    }

    /// Returns the source text under refactoring.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the source path, when known.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Returns the current selection if it is valid for this source.
    ///
    /// A selection is valid when it is ordered, lies within the source, and
    /// both ends fall on character boundaries. Zero-length selections
    /// (cursor positions) are valid.
    #[must_use]
    pub fn selection_range(&self) -> Option<SourceRange> {
        self.selection.filter(|range| self.is_valid_range(range))
    }

    /// Returns `true` when `range` addresses whole characters of the source.
    #[must_use]
    pub fn is_valid_range(&self, range: &SourceRange) -> bool {
        range.start() <= range.end()
            && range.end() <= self.source.len()
            && self.source.is_char_boundary(range.start())
            && self.source.is_char_boundary(range.end())
    }
}
