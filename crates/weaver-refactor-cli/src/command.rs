//! Command-line grammar derived from the action registry.
//!
//! Every registered action becomes a subcommand taking the source file as a
//! positional argument. Actions with a selection-consuming rule also accept
//! `--selection`, and each distinct refactoring option becomes one long flag
//! named after the option. Required options are not enforced by the parser:
//! a missing value is reported by rule selection so the user sees which rule
//! needed it.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use weaver_refactor::{RefactoringAction, RefactoringActionRegistry, RefactoringOption, ValueKind};

use crate::errors::AppError;
use crate::selection::SelectionSpec;

const FILE_ARG: &str = "file";
const SELECTION_ARG: &str = "selection";
const RESERVED_NAMES: &[&str] = &[FILE_ARG, SELECTION_ARG, "help", "version"];

/// A parsed request to perform one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Invocation {
    pub(crate) action: String,
    pub(crate) file: PathBuf,
    pub(crate) selection: Option<SelectionSpec>,
    /// Raw option values as `(option name, text)` pairs.
    pub(crate) options: Vec<(String, String)>,
}

/// Builds the top-level command with one subcommand per registered action.
pub(crate) fn build_command(registry: &RefactoringActionRegistry) -> Result<Command, AppError> {
    let mut command = Command::new("weaver-refactor")
        .about("Apply refactoring actions to a source file")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true);
    for action in registry.actions() {
        command = command.subcommand(action_command(action)?);
    }
    Ok(command)
}

fn action_command(action: &RefactoringAction) -> Result<Command, AppError> {
    let mut command = Command::new(action.name().to_owned())
        .about(action.description().to_owned())
        .arg(
            Arg::new(FILE_ARG)
                .help("Source file to refactor")
                .required(true)
                .value_parser(value_parser!(PathBuf)),
        );

    if action.accepts_selection() {
        command = command.arg(
            Arg::new(SELECTION_ARG)
                .long(SELECTION_ARG)
                .value_name("LINE:COL[-LINE:COL]")
                .help("Range of source text to act on; a single position acts as a cursor")
                .value_parser(SelectionSpec::from_str),
        );
    }

    for option in action.refactoring_options().iter() {
        if RESERVED_NAMES.contains(&option.name()) {
            return Err(AppError::ReservedOptionName {
                action: action.name().to_owned(),
                name: option.name().to_owned(),
            });
        }
        command = command.arg(option_arg(option.as_ref()));
    }
    Ok(command)
}

fn option_arg(option: &dyn RefactoringOption) -> Arg {
    let help = if option.is_required() {
        format!("{} (required)", option.description())
    } else {
        option.description().to_owned()
    };
    let arg = Arg::new(option.name().to_owned())
        .long(option.name().to_owned())
        .help(help)
        .action(ArgAction::Set);
    match option.value_kind() {
        // `--flag` means true; `--flag=false` must be explicit so a bare flag
        // never swallows the positional file argument.
        ValueKind::Boolean => arg
            .value_name("BOOL")
            .num_args(0..=1)
            .require_equals(true)
            .default_missing_value("true"),
        // Negative numbers are values; unsigned options reject them when parsed.
        kind @ (ValueKind::Integer | ValueKind::Unsigned) => arg
            .value_name(kind.as_str().to_uppercase())
            .allow_negative_numbers(true),
        kind => arg.value_name(kind.as_str().to_uppercase()),
    }
}

/// Extracts the action invocation from parsed matches.
pub(crate) fn parse_invocation(
    registry: &RefactoringActionRegistry,
    matches: &ArgMatches,
) -> Result<Invocation, AppError> {
    let (name, action_matches) = matches.subcommand().ok_or(AppError::MissingAction)?;
    let action = registry.get(name).map_err(AppError::Refactor)?;
    let file = action_matches
        .try_get_one::<PathBuf>(FILE_ARG)
        .ok()
        .flatten()
        .cloned()
        .ok_or(AppError::MissingFile)?;
    let selection = action_matches
        .try_get_one::<SelectionSpec>(SELECTION_ARG)
        .ok()
        .flatten()
        .copied();
    let options = action
        .refactoring_options()
        .iter()
        .filter_map(|option| {
            action_matches
                .try_get_one::<String>(option.name())
                .ok()
                .flatten()
                .map(|value| (option.name().to_owned(), value.clone()))
        })
        .collect();

    Ok(Invocation {
        action: name.to_owned(),
        file,
        selection,
        options,
    })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use weaver_refactor::{
        OptionRequirement, OptionalOption, RefactoringRule, RequiredOption, RuleContext,
        RuleDescriptor, RuleError, SourceEdit,
    };

    use super::*;
    use crate::actions::builtin_registry;

    struct NoEdits;

    impl RefactoringRule for NoEdits {
        fn apply(&self, _context: &RuleContext) -> Result<Vec<SourceEdit>, RuleError> {
            Ok(Vec::new())
        }
    }

    fn registry_with(action: RefactoringAction) -> RefactoringActionRegistry {
        let mut registry = RefactoringActionRegistry::new();
        registry.register(action).expect("action registers");
        registry
    }

    fn parse(
        registry: &RefactoringActionRegistry,
        args: &[&str],
    ) -> Result<Invocation, AppError> {
        let matches = build_command(registry)?
            .try_get_matches_from(args)
            .map_err(AppError::CliUsage)?;
        parse_invocation(registry, &matches)
    }

    #[test]
    fn local_rename_arguments_are_collected() {
        let registry = builtin_registry().expect("registry builds");
        let invocation = parse(
            &registry,
            &[
                "weaver-refactor",
                "local-rename",
                "--selection",
                "1:5-1:10",
                "--new-name",
                "cost",
                "main.rs",
            ],
        )
        .expect("parses");
        assert_eq!(invocation.action, "local-rename");
        assert_eq!(invocation.file, PathBuf::from("main.rs"));
        assert_eq!(
            invocation.selection.map(|selection| selection.to_string()),
            Some(String::from("1:5-1:10"))
        );
        assert_eq!(
            invocation.options,
            vec![(String::from("new-name"), String::from("cost"))]
        );
    }

    #[test]
    fn missing_required_option_is_left_to_rule_selection() {
        let registry = builtin_registry().expect("registry builds");
        let invocation =
            parse(&registry, &["weaver-refactor", "local-rename", "main.rs"]).expect("parses");
        assert!(invocation.options.is_empty());
        assert!(invocation.selection.is_none());
    }

    #[rstest]
    #[case::no_action(&["weaver-refactor"])]
    #[case::unknown_action(&["weaver-refactor", "inline", "main.rs"])]
    #[case::missing_file(&["weaver-refactor", "local-rename"])]
    #[case::bad_selection(&["weaver-refactor", "local-rename", "--selection", "x", "main.rs"])]
    fn malformed_command_lines_are_usage_errors(#[case] args: &[&str]) {
        let registry = builtin_registry().expect("registry builds");
        assert!(matches!(parse(&registry, args), Err(AppError::CliUsage(_))));
    }

    #[test]
    fn boolean_options_default_to_true_when_bare() {
        let dry_run = OptionalOption::<bool>::shared("dry-run", "Only report edits");
        let registry = registry_with(RefactoringAction::new("noop", "Does nothing").with_rule(
            RuleDescriptor::new("noop", (OptionRequirement::new(dry_run),), |_: Option<bool>| {
                NoEdits
            }),
        ));
        let invocation =
            parse(&registry, &["weaver-refactor", "noop", "--dry-run", "main.rs"]).expect("parses");
        assert_eq!(
            invocation.options,
            vec![(String::from("dry-run"), String::from("true"))]
        );
        assert!(invocation.selection.is_none());
    }

    #[rstest]
    #[case::signed("offset", "-3")]
    #[case::unsigned("count", "-1")]
    fn negative_numbers_are_option_values(#[case] flag: &str, #[case] value: &str) {
        let offset = OptionalOption::<i64>::shared("offset", "Signed shift");
        let count = OptionalOption::<u64>::shared("count", "Repetitions");
        let registry = registry_with(RefactoringAction::new("shift", "Shifts text").with_rule(
            RuleDescriptor::new(
                "shift",
                (OptionRequirement::new(offset), OptionRequirement::new(count)),
                |_: Option<i64>, _: Option<u64>| NoEdits,
            ),
        ));
        let long = format!("--{flag}");
        let invocation = parse(&registry, &["weaver-refactor", "shift", &long, value, "main.rs"])
            .expect("negative value parses");
        assert_eq!(
            invocation.options,
            vec![(String::from(flag), String::from(value))]
        );
        assert_eq!(invocation.file, PathBuf::from("main.rs"));
    }

    #[test]
    fn actions_without_selection_rules_reject_selection_flag() {
        let label = RequiredOption::<String>::shared("label", "Label text");
        let registry = registry_with(RefactoringAction::new("noop", "Does nothing").with_rule(
            RuleDescriptor::new("noop", (OptionRequirement::new(label),), |_: String| NoEdits),
        ));
        let result = parse(
            &registry,
            &["weaver-refactor", "noop", "--selection", "1:1", "main.rs"],
        );
        assert!(matches!(result, Err(AppError::CliUsage(_))));
    }

    #[test]
    fn reserved_option_names_are_rejected() {
        let file = RequiredOption::<String>::shared("file", "Clashes with the positional");
        let registry = registry_with(RefactoringAction::new("clash", "Bad option").with_rule(
            RuleDescriptor::new("clash", (OptionRequirement::new(file),), |_: String| NoEdits),
        ));
        let error = build_command(&registry).expect_err("reserved name");
        assert!(matches!(
            error,
            AppError::ReservedOptionName { ref name, .. } if name == "file"
        ));
    }
}
