//! Requirements gating refactoring rules.
//!
//! A requirement decides whether a rule may be invoked and, when it can,
//! extracts the typed value the rule needs. Each requirement declares its
//! produced type through [`RuleRequirement::Output`]; the rule composition
//! layer passes those values positionally to the rule factory, so the types
//! are checked at compile time.
//!
//! Two requirement kinds are provided:
//!
//! - [`SourceRangeSelectionRequirement`] produces the context's selection.
//! - [`OptionRequirement`] produces the value of one shared option and
//!   exposes that option for enumeration.

mod options;
mod selection;

#[cfg(test)]
mod tests;

use std::fmt;
use std::sync::Arc;

use crate::context::RuleContext;
use crate::error::RequirementError;
use crate::option::RefactoringOption;

pub use self::options::OptionRequirement;
pub use self::selection::SourceRangeSelectionRequirement;

pub(crate) const REQUIREMENT_TARGET: &str = "weaver_refactor::requirement";

/// The closed set of requirement kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementKind {
    /// Needs a source selection.
    Selection,
    /// Needs a refactoring option value.
    Option,
}

impl RequirementKind {
    /// Returns the canonical string for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Selection => "selection",
            Self::Option => "option",
        }
    }
}

impl fmt::Display for RequirementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A precondition that also extracts a typed value for a rule.
///
/// Evaluation is a pure read of the context and of any options the
/// requirement holds.
pub trait RuleRequirement {
    /// Value passed to the rule factory when evaluation succeeds.
    type Output;

    /// Returns the kind of this requirement.
    fn kind(&self) -> RequirementKind;

    /// Returns a short description used in failure diagnostics.
    fn describe(&self) -> String;

    /// Evaluates the requirement against `context`.
    ///
    /// # Errors
    ///
    /// Returns a [`RequirementError`] describing why the rule cannot be
    /// invoked.
    fn evaluate(&self, context: &RuleContext) -> Result<Self::Output, RequirementError>;

    /// Returns the options consulted during evaluation.
    fn refactoring_options(&self) -> Vec<Arc<dyn RefactoringOption>> {
        Vec::new()
    }
}
