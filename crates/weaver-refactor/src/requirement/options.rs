//! Requirement that evaluates to the value of one refactoring option.

use std::sync::Arc;

use tracing::debug;

use super::{REQUIREMENT_TARGET, RequirementKind, RuleRequirement};
use crate::context::RuleContext;
use crate::error::RequirementError;
use crate::option::{RefactoringOption, TypedOption};

/// Evaluates to the current value of a shared option.
///
/// The context is ignored: option values are supplied out of band before
/// evaluation. The option's own failure is propagated unchanged. The option
/// is partially owned; every requirement (and every rule) that references
/// the same logical option holds a handle to one slot.
///
/// # Example
///
/// ```
/// use weaver_refactor::{
///     OptionRequirement, RefactoringOption, RequiredOption, RuleContext, RuleRequirement,
/// };
///
/// let new_name = RequiredOption::<String>::shared("new-name", "The new name");
/// let requirement = OptionRequirement::new(new_name.clone());
/// assert_eq!(requirement.refactoring_options().len(), 1);
///
/// new_name.supply("renamed").expect("supply");
/// let value = requirement.evaluate(&RuleContext::default()).expect("value");
/// assert_eq!(value, "renamed");
/// ```
#[derive(Debug)]
pub struct OptionRequirement<O> {
    option: Arc<O>,
}

impl<O> OptionRequirement<O> {
    /// Creates a requirement over a shared option.
    #[must_use]
    pub const fn new(option: Arc<O>) -> Self {
        Self { option }
    }

    /// Returns the wrapped option.
    #[must_use]
    pub const fn option(&self) -> &Arc<O> {
        &self.option
    }
}

impl<O> Clone for OptionRequirement<O> {
    fn clone(&self) -> Self {
        Self {
            option: Arc::clone(&self.option),
        }
    }
}

impl<O: TypedOption + 'static> RuleRequirement for OptionRequirement<O> {
    type Output = O::Value;

    fn kind(&self) -> RequirementKind {
        RequirementKind::Option
    }

    fn describe(&self) -> String {
        format!("option '{}'", self.option.name())
    }

    fn evaluate(&self, _context: &RuleContext) -> Result<O::Value, RequirementError> {
        let value = self.option.value();
        debug!(
            target: REQUIREMENT_TARGET,
            option = self.option.name(),
            satisfied = value.is_ok(),
            "evaluated option requirement"
        );
        value
    }

    fn refactoring_options(&self) -> Vec<Arc<dyn RefactoringOption>> {
        let option: Arc<dyn RefactoringOption> = self.option.clone();
        vec![option]
    }
}
