//! Unit tests for selection and option requirements.

use rstest::{fixture, rstest};

use super::*;
use crate::error::FailureKind;
use crate::option::{OptionalOption, RequiredOption, TypedOption};
use crate::range::SourceRange;

const SOURCE: &str = "fn area(width: u32, height: u32) -> u32 {\n    width * height\n}\n";

#[fixture]
fn new_name() -> Arc<RequiredOption<String>> {
    RequiredOption::shared("new-name", "The new name")
}

// ---------------------------------------------------------------------------
// Selection requirement
// ---------------------------------------------------------------------------

#[rstest]
#[case::word(SourceRange::new(3, 7))]
#[case::multi_line(SourceRange::new(0, SOURCE.len()))]
#[case::cursor(SourceRange::point(10))]
fn selection_requirement_returns_exact_range(#[case] selection: SourceRange) {
    let context = RuleContext::new(SOURCE).with_selection(selection);
    let range = SourceRangeSelectionRequirement
        .evaluate(&context)
        .expect("selection present");
    assert_eq!(range, selection);
}

#[test]
fn selection_requirement_fails_without_selection() {
    let context = RuleContext::new(SOURCE);
    let error = SourceRangeSelectionRequirement
        .evaluate(&context)
        .expect_err("no selection");
    assert_eq!(error, RequirementError::NoSelection);
    assert_eq!(error.to_string(), "a selection is required");
}

#[test]
fn selection_requirement_fails_for_invalid_selection() {
    let context = RuleContext::new(SOURCE).with_selection(SourceRange::new(5, 500));
    let error = SourceRangeSelectionRequirement
        .evaluate(&context)
        .expect_err("selection outside the source");
    assert_eq!(error.kind(), FailureKind::NoSelection);
}

#[test]
fn selection_requirement_metadata() {
    let requirement = SourceRangeSelectionRequirement;
    assert_eq!(requirement.kind(), RequirementKind::Selection);
    assert_eq!(requirement.describe(), "selection");
    assert!(requirement.refactoring_options().is_empty());
}

// ---------------------------------------------------------------------------
// Option requirement
// ---------------------------------------------------------------------------

#[rstest]
#[case::empty_context(RuleContext::default())]
#[case::with_selection(RuleContext::new(SOURCE).with_selection(SourceRange::new(3, 7)))]
fn missing_required_option_fails_regardless_of_context(
    new_name: Arc<RequiredOption<String>>,
    #[case] context: RuleContext,
) {
    let requirement = OptionRequirement::new(new_name);
    let error = requirement.evaluate(&context).expect_err("missing option");
    assert_eq!(error, RequirementError::missing_option("new-name"));
}

#[rstest]
fn supplied_option_round_trips(new_name: Arc<RequiredOption<String>>) {
    let requirement = OptionRequirement::new(Arc::clone(&new_name));
    new_name.supply("surface_area").expect("supply");
    let value = requirement
        .evaluate(&RuleContext::new(SOURCE))
        .expect("supplied option");
    assert_eq!(value, "surface_area");
}

#[test]
fn optional_option_requirement_yields_absent_marker() {
    let limit = OptionalOption::<u64>::shared("max-occurrences", "Edit limit");
    let requirement = OptionRequirement::new(limit);
    assert_eq!(requirement.evaluate(&RuleContext::default()), Ok(None));
}

#[test]
fn invalid_option_value_is_propagated_unchanged() {
    let limit = OptionalOption::<u64>::shared("max-occurrences", "Edit limit");
    let _ = limit.supply("lots");
    let requirement = OptionRequirement::new(Arc::clone(&limit));
    let error = requirement
        .evaluate(&RuleContext::default())
        .expect_err("invalid value");
    assert_eq!(Err(error), limit.value());
}

#[rstest]
fn option_requirement_exposes_singleton_option(new_name: Arc<RequiredOption<String>>) {
    let requirement = OptionRequirement::new(Arc::clone(&new_name));
    let options = requirement.refactoring_options();
    assert_eq!(options.len(), 1);
    let exposed = options.first().expect("one option");
    assert_eq!(exposed.name(), "new-name");

    // The exposed handle is the same instance the requirement evaluates.
    exposed.supply("via-handle").expect("supply through exposed handle");
    assert_eq!(new_name.value().expect("value"), "via-handle");
}

#[rstest]
fn option_requirement_metadata(new_name: Arc<RequiredOption<String>>) {
    let requirement = OptionRequirement::new(new_name);
    assert_eq!(requirement.kind(), RequirementKind::Option);
    assert_eq!(requirement.describe(), "option 'new-name'");
    assert_eq!(requirement.clone().option().name(), "new-name");
}

#[test]
fn evaluation_does_not_mutate_context() {
    let context = RuleContext::new(SOURCE).with_selection(SourceRange::new(3, 7));
    let before = context.clone();
    let _ = SourceRangeSelectionRequirement.evaluate(&context);
    let option = RequiredOption::<String>::shared("new-name", "The new name");
    let _ = OptionRequirement::new(option).evaluate(&context);
    assert_eq!(context, before);
}

#[rstest]
#[case::selection(RequirementKind::Selection, "selection")]
#[case::option(RequirementKind::Option, "option")]
fn requirement_kind_display(#[case] kind: RequirementKind, #[case] expected: &str) {
    assert_eq!(kind.to_string(), expected);
}
