//! Command-line driver for Weaver refactoring actions.
//!
//! The runtime loads configuration, derives a command line from the
//! built-in action registry, supplies each option value exactly once, and
//! asks the chosen action to select and run a candidate rule. The result is
//! printed either as the rewritten source or as a JSON edit list. IO streams
//! and the configuration loader are parameters so tests can substitute them.

mod actions;
mod command;
mod config;
mod errors;
mod output;
mod selection;
mod telemetry;

#[cfg(test)]
mod tests;

use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::process::ExitCode;

use tracing::{debug, info, warn};
use weaver_refactor::{OptionSupplyError, RefactoringAction, RuleContext};

use crate::actions::builtin_registry;
use crate::command::{Invocation, build_command, parse_invocation};
use crate::config::{ConfigLoader, OrthoConfigLoader, split_config_arguments};
use crate::errors::AppError;

const CLI_TARGET: &str = "weaver_refactor_cli";

/// Runs the CLI using the provided arguments and IO handles.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    run_with_loader(args, stdout, stderr, &OrthoConfigLoader)
}

pub(crate) fn run_with_loader<I, W, E, L>(
    args: I,
    stdout: &mut W,
    stderr: &mut E,
    loader: &L,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    let arguments: Vec<OsString> = args.into_iter().collect();
    match execute(&arguments, stdout, loader) {
        Ok(()) => ExitCode::SUCCESS,
        // Help and version requests are successful output.
        Err(AppError::CliUsage(error)) if !error.use_stderr() => {
            let _ = write!(stdout, "{error}");
            ExitCode::SUCCESS
        }
        Err(AppError::CliUsage(error)) => {
            let _ = write!(stderr, "{error}");
            ExitCode::FAILURE
        }
        Err(error) => {
            let _ = writeln!(stderr, "{error}");
            ExitCode::FAILURE
        }
    }
}

fn execute<W, L>(args: &[OsString], stdout: &mut W, loader: &L) -> Result<(), AppError>
where
    W: Write,
    L: ConfigLoader,
{
    let split = split_config_arguments(args);
    let config = loader.load(&split.config_arguments)?;
    telemetry::initialise(&config)?;

    let registry = builtin_registry().map_err(AppError::Registry)?;
    let matches = build_command(&registry)?
        .try_get_matches_from(&split.command_arguments)
        .map_err(AppError::CliUsage)?;
    let invocation = parse_invocation(&registry, &matches)?;
    let action = registry.get(&invocation.action).map_err(AppError::Refactor)?;

    let context = load_context(&invocation)?;
    supply_options(action, &invocation.options)?;

    let edits = action.perform(&context).map_err(AppError::Refactor)?;
    info!(
        target: CLI_TARGET,
        action = action.name(),
        file = %invocation.file.display(),
        edits = edits.len(),
        "refactoring completed"
    );
    output::render(config.output(), context.source(), &edits, stdout)
}

fn load_context(invocation: &Invocation) -> Result<RuleContext, AppError> {
    let text = fs::read_to_string(&invocation.file).map_err(|error| AppError::ReadSource {
        path: invocation.file.clone(),
        source: error,
    })?;
    let context = RuleContext::new(text).with_path(&invocation.file);
    let Some(selection) = invocation.selection else {
        return Ok(context);
    };
    let range = selection
        .resolve(context.source())
        .map_err(|error| AppError::Selection {
            selection: selection.to_string(),
            path: invocation.file.clone(),
            source: error,
        })?;
    debug!(target: CLI_TARGET, %selection, %range, "selection resolved");
    Ok(context.with_selection(range))
}

/// Supplies every option value before any rule is evaluated.
///
/// A value that fails to parse is recorded by the option itself, so the
/// rule that needs it reports an invalid-option-value failure.
fn supply_options(action: &RefactoringAction, values: &[(String, String)]) -> Result<(), AppError> {
    let options = action.refactoring_options();
    for (name, raw) in values {
        let Some(option) = options.get(name) else {
            continue;
        };
        match option.supply(raw) {
            Ok(()) => debug!(target: CLI_TARGET, option = %name, "option supplied"),
            Err(OptionSupplyError::InvalidValue { reason, .. }) => {
                warn!(
                    target: CLI_TARGET,
                    option = %name,
                    value = %raw,
                    %reason,
                    "option value rejected"
                );
            }
            Err(error) => return Err(AppError::SupplyOption(error)),
        }
    }
    Ok(())
}
