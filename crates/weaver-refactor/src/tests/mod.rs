//! Crate-level integration and BDD tests.

use std::sync::Arc;

use crate::{
    FailureKind, OptionRequirement, RefactoringAction, RefactoringActionRegistry,
    RefactoringOption, RefactoringRule, RequiredOption, RuleContext, RuleDescriptor, RuleError,
    SourceEdit, SourceRange, SourceRangeSelectionRequirement, apply_edits,
};


struct ReplaceSelection {
    range: SourceRange,
    replacement: String,
}

impl ReplaceSelection {
    fn new(range: SourceRange, replacement: String) -> Self {
        Self { range, replacement }
    }
}

impl RefactoringRule for ReplaceSelection {
    fn apply(&self, _context: &RuleContext) -> Result<Vec<SourceEdit>, RuleError> {
        Ok(vec![SourceEdit::new(self.range, self.replacement.clone())])
    }
}

fn replace_action(replacement: &Arc<RequiredOption<String>>) -> RefactoringAction {
    RefactoringAction::new("replace", "Replace the selection").with_rule(RuleDescriptor::new(
        "replace-selection",
        (
            SourceRangeSelectionRequirement,
            OptionRequirement::new(Arc::clone(replacement)),
        ),
        ReplaceSelection::new,
    ))
}

#[test]
fn end_to_end_through_registry() {
    let replacement = RequiredOption::<String>::shared("replacement", "Replacement text");
    let mut registry = RefactoringActionRegistry::new();
    registry
        .register(replace_action(&replacement))
        .expect("register");

    let action = registry.get("replace").expect("lookup");
    let options = action.refactoring_options();
    assert_eq!(options.missing_required().len(), 1);
    options
        .get("replacement")
        .expect("option listed")
        .supply("total")
        .expect("supply");
    assert!(options.missing_required().is_empty());

    let context = RuleContext::new("let sum = 1;").with_selection(SourceRange::new(4, 7));
    let edits = action.perform(&context).expect("perform");
    assert_eq!(
        apply_edits(context.source(), &edits).expect("apply"),
        "let total = 1;"
    );
}

#[test]
fn independent_contexts_share_supplied_options() {
    let replacement = RequiredOption::<String>::shared("replacement", "Replacement text");
    replacement.supply("z").expect("supply");
    let action = replace_action(&replacement);

    for (source, range) in [("abc", SourceRange::new(0, 1)), ("xyz", SourceRange::new(2, 3))] {
        let context = RuleContext::new(source).with_selection(range);
        let edits = action.perform(&context).expect("perform");
        assert_eq!(edits, vec![SourceEdit::new(range, "z")]);
    }
}

#[test]
fn no_applicable_rule_reports_kind() {
    let replacement = RequiredOption::<String>::shared("replacement", "Replacement text");
    let action = replace_action(&replacement);
    let context = RuleContext::new("abc").with_selection(SourceRange::new(0, 1));
    let error = action.perform(&context).expect_err("option missing");
    assert_eq!(error.failure_kind(), Some(FailureKind::MissingOption));
}
