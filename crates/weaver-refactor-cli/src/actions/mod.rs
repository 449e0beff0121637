//! Built-in refactoring actions exposed by the CLI.

mod local_rename;

use weaver_refactor::{ActionError, RefactoringActionRegistry};

/// Builds a registry holding every built-in action.
///
/// Each call creates fresh option slots, so one registry serves exactly one
/// invocation.
pub(crate) fn builtin_registry() -> Result<RefactoringActionRegistry, ActionError> {
    let mut registry = RefactoringActionRegistry::default();
    registry.register(local_rename::local_rename())?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_registry_lists_local_rename() {
        let registry = builtin_registry().expect("registry builds");
        assert_eq!(registry.names(), vec![local_rename::LOCAL_RENAME]);
    }

    #[test]
    fn local_rename_accepts_a_selection() {
        let registry = builtin_registry().expect("registry builds");
        let selectable: Vec<&str> = registry
            .find_requiring_selection()
            .into_iter()
            .map(|action| action.name())
            .collect();
        assert_eq!(selectable, vec![local_rename::LOCAL_RENAME]);
    }
}
