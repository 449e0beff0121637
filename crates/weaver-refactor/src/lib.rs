//! Requirement-gated refactoring rules for Weaver.
//!
//! The `weaver-refactor` crate decides whether a refactoring rule may be
//! invoked and extracts the typed inputs it needs. A refactoring *action*
//! (such as `local-rename`) owns one or more candidate *rules*; each rule
//! declares an ordered list of *requirements* over a shared
//! [`RuleContext`]. A rule runs only when every requirement succeeds, and it
//! receives one value per requirement, in declaration order.
//!
//! Requirements come in two kinds:
//!
//! - [`SourceRangeSelectionRequirement`] yields the user's selection.
//! - [`OptionRequirement`] yields the value of a shared option such as
//!   `new-name`. Options are supplied out of band (for example from
//!   command-line flags) and shared between every rule that references them.
//!
//! Failures use a small closed taxonomy ([`FailureKind`]): no selection, a
//! missing option, or an invalid option value. Evaluation stops at the first
//! failing requirement; when no candidate rule of an action applies, the
//! most specific failure is reported.
//!
//! # Example
//!
//! ```
//! use weaver_refactor::{
//!     OptionRequirement, RefactoringAction, RefactoringOption, RefactoringRule, RequiredOption,
//!     RuleContext, RuleDescriptor, RuleError, SourceEdit, SourceRange,
//!     SourceRangeSelectionRequirement, apply_edits,
//! };
//!
//! struct RenameSelection {
//!     range: SourceRange,
//!     new_name: String,
//! }
//!
//! impl RenameSelection {
//!     fn new(range: SourceRange, new_name: String) -> Self {
//!         Self { range, new_name }
//!     }
//! }
//!
//! impl RefactoringRule for RenameSelection {
//!     fn apply(&self, _context: &RuleContext) -> Result<Vec<SourceEdit>, RuleError> {
//!         Ok(vec![SourceEdit::new(self.range, self.new_name.clone())])
//!     }
//! }
//!
//! let new_name = RequiredOption::<String>::shared("new-name", "The new name");
//! let action = RefactoringAction::new("rename", "Rename the selection").with_rule(
//!     RuleDescriptor::new(
//!         "rename-selection",
//!         (SourceRangeSelectionRequirement, OptionRequirement::new(new_name.clone())),
//!         RenameSelection::new,
//!     ),
//! );
//!
//! // Drivers enumerate the options an action needs and supply them once.
//! for option in &action.refactoring_options() {
//!     assert_eq!(option.name(), "new-name");
//! }
//! new_name.supply("total").expect("supply");
//!
//! let context = RuleContext::new("let sum = a + b;").with_selection(SourceRange::new(4, 7));
//! let edits = action.perform(&context).expect("rule applies");
//! assert_eq!(apply_edits(context.source(), &edits).expect("apply"), "let total = a + b;");
//! ```

pub mod action;
pub mod context;
pub mod error;
pub mod option;
pub mod range;
pub mod requirement;
pub mod rule;

#[cfg(test)]
mod tests;

pub use self::action::{RefactoringAction, RefactoringActionRegistry, SelectedRule};
pub use self::context::RuleContext;
pub use self::error::{
    ActionError, FailureKind, OptionSupplyError, RequirementError, RuleError, RuleFailure,
};
pub use self::option::{
    OptionSet, OptionValue, OptionalOption, RefactoringOption, RequiredOption, TypedOption,
    ValueKind,
};
pub use self::range::{LineCol, RangeError, SourceRange};
pub use self::requirement::{
    OptionRequirement, RequirementKind, RuleRequirement, SourceRangeSelectionRequirement,
};
pub use self::rule::{
    ActionRule, RefactoringRule, RequirementList, RuleDescriptor, RuleFactory, SourceEdit,
    apply_edits,
};
