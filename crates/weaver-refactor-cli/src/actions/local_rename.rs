//! The `local-rename` action: renames an identifier within one file.
//!
//! Two candidate rules are registered, in priority order:
//!
//! 1. `rename-selected-symbol` renames the identifier under the selection
//!    (or under a zero-length cursor) to `--new-name`.
//! 2. `rename-named-symbol` renames `--old-name` to `--new-name`, stopping
//!    after `--max-occurrences` edits when that option is given.
//!
//! Both rules share the same `new-name` option, so one flag feeds either rule.

use std::sync::Arc;

use weaver_refactor::{
    OptionRequirement, OptionalOption, RefactoringAction, RefactoringRule, RequiredOption,
    RuleContext, RuleDescriptor, RuleError, SourceEdit, SourceRange,
    SourceRangeSelectionRequirement,
};

/// Name under which the action is registered.
pub(crate) const LOCAL_RENAME: &str = "local-rename";

/// Builds the action with fresh, unsupplied options.
pub(crate) fn local_rename() -> RefactoringAction {
    let new_name = RequiredOption::<String>::shared("new-name", "The replacement identifier");
    let old_name = RequiredOption::<String>::shared(
        "old-name",
        "The identifier to rename when no selection is given",
    );
    let max_occurrences = OptionalOption::<u64>::shared(
        "max-occurrences",
        "Rename at most this many occurrences, in source order",
    );

    RefactoringAction::new(LOCAL_RENAME, "Rename every occurrence of an identifier in one file")
        .with_rule(RuleDescriptor::new(
            "rename-selected-symbol",
            (
                SourceRangeSelectionRequirement,
                OptionRequirement::new(Arc::clone(&new_name)),
            ),
            RenameSelectedSymbol::new,
        ))
        .with_rule(RuleDescriptor::new(
            "rename-named-symbol",
            (
                OptionRequirement::new(old_name),
                OptionRequirement::new(new_name),
                OptionRequirement::new(max_occurrences),
            ),
            RenameNamedSymbol::new,
        ))
}

/// Renames the identifier covered by the selection.
#[derive(Debug)]
struct RenameSelectedSymbol {
    selection: SourceRange,
    new_name: String,
}

impl RenameSelectedSymbol {
    const fn new(selection: SourceRange, new_name: String) -> Self {
        Self {
            selection,
            new_name,
        }
    }
}

impl RefactoringRule for RenameSelectedSymbol {
    fn apply(&self, context: &RuleContext) -> Result<Vec<SourceEdit>, RuleError> {
        ensure_identifier(&self.new_name)?;
        let symbol = identifier_at(context.source(), self.selection).ok_or_else(|| {
            RuleError::failed(format!(
                "selection {} does not cover an identifier",
                self.selection
            ))
        })?;
        Ok(rename_edits(context.source(), symbol, &self.new_name, None))
    }
}

/// Renames occurrences of an explicitly named identifier.
#[derive(Debug)]
struct RenameNamedSymbol {
    old_name: String,
    new_name: String,
    limit: Option<u64>,
}

impl RenameNamedSymbol {
    const fn new(old_name: String, new_name: String, limit: Option<u64>) -> Self {
        Self {
            old_name,
            new_name,
            limit,
        }
    }
}

impl RefactoringRule for RenameNamedSymbol {
    fn apply(&self, context: &RuleContext) -> Result<Vec<SourceEdit>, RuleError> {
        ensure_identifier(&self.old_name)?;
        ensure_identifier(&self.new_name)?;
        let edits = rename_edits(context.source(), &self.old_name, &self.new_name, self.limit);
        if edits.is_empty() {
            return Err(RuleError::failed(format!(
                "no occurrences of '{}' found",
                self.old_name
            )));
        }
        Ok(edits)
    }
}

fn is_identifier_char(character: char) -> bool {
    character.is_alphanumeric() || character == '_'
}

fn is_identifier(text: &str) -> bool {
    let mut characters = text.chars();
    characters
        .next()
        .is_some_and(|first| first.is_alphabetic() || first == '_')
        && characters.all(is_identifier_char)
}

fn ensure_identifier(text: &str) -> Result<(), RuleError> {
    if is_identifier(text) {
        Ok(())
    } else {
        Err(RuleError::failed(format!("'{text}' is not a valid identifier")))
    }
}

/// Returns the identifier covered by `selection`.
///
/// A zero-length selection is treated as a cursor and expands to the
/// identifier touching it.
fn identifier_at(source: &str, selection: SourceRange) -> Option<&str> {
    if !selection.is_empty() {
        return selection.slice(source).filter(|text| is_identifier(text));
    }
    let offset = selection.start();
    let before = source.get(..offset)?;
    let after = source.get(offset..)?;
    let start = before
        .char_indices()
        .rev()
        .take_while(|(_, character)| is_identifier_char(*character))
        .last()
        .map_or(offset, |(index, _)| index);
    let end = after
        .char_indices()
        .find(|(_, character)| !is_identifier_char(*character))
        .map_or(source.len(), |(index, _)| offset.saturating_add(index));
    source.get(start..end).filter(|text| is_identifier(text))
}

/// Returns whole-word occurrences of `symbol` in source order.
fn occurrences(source: &str, symbol: &str) -> Vec<SourceRange> {
    source
        .match_indices(symbol)
        .map(|(start, matched)| SourceRange::new(start, start.saturating_add(matched.len())))
        .filter(|range| is_whole_word(source, *range))
        .collect()
}

fn is_whole_word(source: &str, range: SourceRange) -> bool {
    let before = source
        .get(..range.start())
        .and_then(|text| text.chars().next_back());
    let after = source
        .get(range.end()..)
        .and_then(|text| text.chars().next());
    !before.is_some_and(is_identifier_char) && !after.is_some_and(is_identifier_char)
}

fn rename_edits(
    source: &str,
    symbol: &str,
    new_name: &str,
    limit: Option<u64>,
) -> Vec<SourceEdit> {
    let max_edits = limit.map_or(usize::MAX, |value| {
        usize::try_from(value).unwrap_or(usize::MAX)
    });
    occurrences(source, symbol)
        .into_iter()
        .take(max_edits)
        .map(|range| SourceEdit::new(range, new_name))
        .collect()
}
