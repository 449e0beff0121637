//! Rendering of refactoring results.

use std::io::Write;

use weaver_refactor::{SourceEdit, apply_edits};
use weaver_refactor_config::OutputMode;

use crate::errors::AppError;

/// Writes the result of a refactoring in the configured mode.
///
/// `Source` prints the rewritten file; `Edits` prints the edit list as
/// pretty JSON so other tools can apply it.
pub(crate) fn render<W: Write>(
    mode: OutputMode,
    source: &str,
    edits: &[SourceEdit],
    stdout: &mut W,
) -> Result<(), AppError> {
    match mode {
        OutputMode::Source => {
            let rewritten = apply_edits(source, edits).map_err(AppError::ApplyEdits)?;
            stdout
                .write_all(rewritten.as_bytes())
                .map_err(AppError::WriteOutput)?;
        }
        OutputMode::Edits => {
            serde_json::to_writer_pretty(&mut *stdout, edits).map_err(AppError::SerialiseEdits)?;
            writeln!(stdout).map_err(AppError::WriteOutput)?;
        }
    }
    stdout.flush().map_err(AppError::WriteOutput)
}
