//! CLI entrypoint for the Weaver refactoring driver.
//!
//! The binary delegates to [`weaver_refactor_cli::run`], which loads
//! configuration, builds the command line from the registered actions,
//! supplies option values, and prints the refactored source or its edits.

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    weaver_refactor_cli::run(std::env::args_os(), &mut stdout, &mut stderr)
}
