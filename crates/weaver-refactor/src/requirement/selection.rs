//! Requirement satisfied by any valid source selection.

use tracing::debug;

use super::{REQUIREMENT_TARGET, RequirementKind, RuleRequirement};
use crate::context::RuleContext;
use crate::error::RequirementError;
use crate::range::SourceRange;

/// Evaluates to the context's selection range.
///
/// Validity is delegated entirely to [`RuleContext::selection_range`], so a
/// zero-length cursor position is accepted when the context reports it.
///
/// # Example
///
/// ```
/// use weaver_refactor::{
///     RuleContext, RuleRequirement, SourceRange, SourceRangeSelectionRequirement,
/// };
///
/// let context = RuleContext::new("let x = 1;").with_selection(SourceRange::new(4, 5));
/// let range = SourceRangeSelectionRequirement.evaluate(&context).expect("selection");
/// assert_eq!(range, SourceRange::new(4, 5));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceRangeSelectionRequirement;

impl RuleRequirement for SourceRangeSelectionRequirement {
    type Output = SourceRange;

    fn kind(&self) -> RequirementKind {
        RequirementKind::Selection
    }

    fn describe(&self) -> String {
        String::from("selection")
    }

    fn evaluate(&self, context: &RuleContext) -> Result<SourceRange, RequirementError> {
        let range = context.selection_range().ok_or(RequirementError::NoSelection);
        debug!(
            target: REQUIREMENT_TARGET,
            satisfied = range.is_ok(),
            "evaluated selection requirement"
        );
        range
    }
}
