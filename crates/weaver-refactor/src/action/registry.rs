//! Registry of refactoring actions keyed by name.

use std::collections::HashMap;

use tracing::debug;

use super::{ACTION_TARGET, RefactoringAction};
use crate::error::ActionError;

/// Registry of available refactoring actions.
///
/// Actions are validated on registration; duplicate names are rejected.
///
/// # Example
///
/// ```
/// use weaver_refactor::{RefactoringActionRegistry, RefactoringAction};
///
/// let mut registry = RefactoringActionRegistry::new();
/// let error = registry
///     .register(RefactoringAction::new("extract", "Extract code"))
///     .expect_err("an action without rules is rejected");
/// assert!(error.to_string().contains("declares no rules"));
/// assert!(registry.get("extract").is_err());
/// ```
#[derive(Debug, Default)]
pub struct RefactoringActionRegistry {
    actions: HashMap<String, RefactoringAction>,
}

impl RefactoringActionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an action after validation.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::InvalidAction`] if validation fails, or
    /// [`ActionError::AlreadyRegistered`] if an action with the same name is
    /// already present.
    pub fn register(&mut self, action: RefactoringAction) -> Result<(), ActionError> {
        action.validate()?;
        let name = action.name().to_owned();
        if self.actions.contains_key(&name) {
            return Err(ActionError::AlreadyRegistered { name });
        }
        debug!(
            target: ACTION_TARGET,
            action = name.as_str(),
            rules = action.rules().len(),
            "registered refactoring action"
        );
        self.actions.insert(name, action);
        Ok(())
    }

    /// Looks up an action by name.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::NotFound`] when no action has that name.
    pub fn get(&self, name: &str) -> Result<&RefactoringAction, ActionError> {
        self.actions.get(name).ok_or_else(|| ActionError::NotFound {
            name: name.to_owned(),
        })
    }

    /// Returns the registered action names in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.actions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the registered actions sorted by name.
    #[must_use]
    pub fn actions(&self) -> Vec<&RefactoringAction> {
        let mut actions: Vec<&RefactoringAction> = self.actions.values().collect();
        actions.sort_unstable_by(|left, right| left.name().cmp(right.name()));
        actions
    }

    /// Returns actions with at least one rule that consumes a selection,
    /// sorted by name.
    #[must_use]
    pub fn find_requiring_selection(&self) -> Vec<&RefactoringAction> {
        self.actions()
            .into_iter()
            .filter(|action| action.accepts_selection())
            .collect()
    }

    /// Returns the number of registered actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Returns `true` when no actions are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
