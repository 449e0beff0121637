//! Refactoring actions and candidate rule selection.
//!
//! A [`RefactoringAction`] groups one or more candidate rules under a single
//! user-facing name. Performing the action evaluates the candidates in
//! registration order and runs the first one whose requirements are all
//! satisfied. When no candidate applies, the failure reported to the user is
//! the most specific one observed; see [`RefactoringAction::select_rule`].
//!
//! Options are shared across candidates: [`RefactoringAction::refactoring_options`]
//! returns each distinct option once, so a driver supplies every value before
//! selection begins.

mod registry;


use std::fmt;

use tracing::{debug, info};

use crate::context::RuleContext;
use crate::error::{ActionError, RuleError, RuleFailure};
use crate::option::OptionSet;
use crate::requirement::RequirementKind;
use crate::rule::{ActionRule, RefactoringRule, SourceEdit};

pub use self::registry::RefactoringActionRegistry;

const ACTION_TARGET: &str = "weaver_refactor::action";

/// A named refactoring with one or more candidate rules.
///
/// # Example
///
/// ```
/// use weaver_refactor::{
///     OptionRequirement, RefactoringAction, RefactoringOption, RefactoringRule, RequiredOption,
///     RuleContext, RuleDescriptor, RuleError, SourceEdit, SourceRange,
///     SourceRangeSelectionRequirement, apply_edits,
/// };
///
/// struct ReplaceSelection {
///     range: SourceRange,
///     text: String,
/// }
///
/// impl ReplaceSelection {
///     fn new(range: SourceRange, text: String) -> Self {
///         Self { range, text }
///     }
/// }
///
/// impl RefactoringRule for ReplaceSelection {
///     fn apply(&self, _context: &RuleContext) -> Result<Vec<SourceEdit>, RuleError> {
///         Ok(vec![SourceEdit::new(self.range, self.text.clone())])
///     }
/// }
///
/// let text = RequiredOption::<String>::shared("text", "Replacement text");
/// let action = RefactoringAction::new("replace", "Replace the selection").with_rule(
///     RuleDescriptor::new(
///         "replace-selection",
///         (SourceRangeSelectionRequirement, OptionRequirement::new(text.clone())),
///         ReplaceSelection::new,
///     ),
/// );
///
/// text.supply("2").expect("supply");
/// let context = RuleContext::new("x = 1").with_selection(SourceRange::new(4, 5));
/// let edits = action.perform(&context).expect("performed");
/// assert_eq!(apply_edits(context.source(), &edits).expect("apply"), "x = 2");
/// ```
pub struct RefactoringAction {
    name: String,
    description: String,
    rules: Vec<Box<dyn ActionRule>>,
}

impl RefactoringAction {
    /// Creates an action without any rules.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            rules: Vec::new(),
        }
    }

    /// Appends a candidate rule. Candidates are tried in the order added.
    #[must_use]
    pub fn with_rule(mut self, rule: impl ActionRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Appends an already boxed candidate rule.
    #[must_use]
    pub fn with_boxed_rule(mut self, rule: Box<dyn ActionRule>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Returns the action name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the candidate rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[Box<dyn ActionRule>] {
        &self.rules
    }

    /// Returns every distinct option consulted by any candidate rule.
    ///
    /// Options shared between rules appear once, in first-seen order.
    #[must_use]
    pub fn refactoring_options(&self) -> OptionSet {
        let mut options = OptionSet::new();
        for rule in &self.rules {
            options.extend(rule.refactoring_options());
        }
        options
    }

    /// Returns `true` when at least one candidate rule needs a selection.
    #[must_use]
    pub fn accepts_selection(&self) -> bool {
        self.rules.iter().any(|rule| {
            rule.requirement_kinds()
                .contains(&RequirementKind::Selection)
        })
    }

    /// Checks that the action can be registered and driven.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::InvalidAction`] when the name is blank, there
    /// are no candidate rules, or two distinct options share a name.
    pub fn validate(&self) -> Result<(), ActionError> {
        if self.name.trim().is_empty() {
            return Err(ActionError::InvalidAction {
                message: String::from("action name must not be empty"),
            });
        }
        if self.rules.is_empty() {
            return Err(ActionError::InvalidAction {
                message: format!("action '{}' declares no rules", self.name),
            });
        }
        let options = self.refactoring_options();
        let duplicates = options.duplicate_names();
        if !duplicates.is_empty() {
            return Err(ActionError::InvalidAction {
                message: format!(
                    "action '{}' declares distinct options sharing the name(s): {}",
                    self.name,
                    duplicates.join(", ")
                ),
            });
        }
        Ok(())
    }

    /// Selects the first candidate rule whose requirements are satisfied.
    ///
    /// When every candidate fails, the reported failure is the most specific
    /// one: an invalid option value outranks a missing option, which
    /// outranks a missing selection. Ties go to the later candidate.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::NoApplicableRule`] when no candidate applies,
    /// or [`ActionError::InvalidAction`] when the action has no rules.
    pub fn select_rule(&self, context: &RuleContext) -> Result<SelectedRule, ActionError> {
        let mut failures: Vec<RuleFailure> = Vec::with_capacity(self.rules.len());
        for candidate in &self.rules {
            match candidate.try_construct(context) {
                Ok(rule) => {
                    info!(
                        target: ACTION_TARGET,
                        action = self.name.as_str(),
                        rule = candidate.name(),
                        skipped = failures.len(),
                        "selected refactoring rule"
                    );
                    return Ok(SelectedRule {
                        name: candidate.name().to_owned(),
                        rule,
                    });
                }
                Err(failure) => {
                    debug!(
                        target: ACTION_TARGET,
                        action = self.name.as_str(),
                        rule = candidate.name(),
                        kind = failure.kind().as_str(),
                        "candidate rule not applicable"
                    );
                    failures.push(failure);
                }
            }
        }

        let reported = most_specific(&failures).cloned().ok_or_else(|| {
            ActionError::InvalidAction {
                message: format!("action '{}' declares no rules", self.name),
            }
        })?;
        Err(ActionError::NoApplicableRule {
            action: self.name.clone(),
            reported: Box::new(reported),
            failures,
        })
    }

    /// Selects a rule and computes its edits.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Self::select_rule`], or
    /// [`ActionError::RuleExecution`] when the selected rule fails.
    pub fn perform(&self, context: &RuleContext) -> Result<Vec<SourceEdit>, ActionError> {
        let selected = self.select_rule(context)?;
        let edits = selected
            .apply(context)
            .map_err(|source| ActionError::RuleExecution {
                action: self.name.clone(),
                rule: selected.name.clone(),
                source,
            })?;
        debug!(
            target: ACTION_TARGET,
            action = self.name.as_str(),
            rule = selected.name(),
            edits = edits.len(),
            "refactoring rule produced edits"
        );
        Ok(edits)
    }
}

impl fmt::Debug for RefactoringAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefactoringAction")
            .field("name", &self.name)
            .field("description", &self.description)
            .field(
                "rules",
                &self.rules.iter().map(|rule| rule.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// The rule chosen by [`RefactoringAction::select_rule`].
pub struct SelectedRule {
    name: String,
    rule: Box<dyn RefactoringRule>,
}

impl SelectedRule {
    /// Returns the name of the selected candidate.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Computes the rule's edits.
    ///
    /// # Errors
    ///
    /// Propagates the rule's own failure.
    pub fn apply(&self, context: &RuleContext) -> Result<Vec<SourceEdit>, RuleError> {
        self.rule.apply(context)
    }
}

impl fmt::Debug for SelectedRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedRule")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Picks the failure with the highest specificity, preferring later entries.
fn most_specific(failures: &[RuleFailure]) -> Option<&RuleFailure> {
    failures
        .iter()
        .max_by_key(|failure| failure.kind().specificity())
}
