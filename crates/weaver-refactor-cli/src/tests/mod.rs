//! Test support and unit tests for the CLI runtime.
//!
//! `TestWorld` runs the CLI in-process against a temporary source file with
//! a fixed configuration, capturing both output streams.


use std::cell::RefCell;
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use rstest::fixture;
use tempfile::TempDir;
use weaver_refactor_config::{Config, OutputMode};

use crate::config::ConfigLoader;
use crate::errors::AppError;
use crate::run_with_loader;

/// Token replaced by the temporary source path in command lines.
const FILE_TOKEN: &str = "FILE";

struct StaticConfigLoader {
    config: Config,
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self, _args: &[OsString]) -> Result<Config, AppError> {
        Ok(self.config.clone())
    }
}

struct FailingLoader;

impl ConfigLoader for FailingLoader {
    fn load(&self, _args: &[OsString]) -> Result<Config, AppError> {
        Err(AppError::MissingAction)
    }
}

pub(super) struct TestWorld {
    directory: TempDir,
    config: Config,
    stdout: Vec<u8>,
    stderr: Vec<u8>,
    exit_code: Option<ExitCode>,
}

impl TestWorld {
    fn new() -> Self {
        Self {
            directory: TempDir::new().expect("temporary directory"),
            config: Config::default(),
            stdout: Vec::new(),
            stderr: Vec::new(),
            exit_code: None,
        }
    }

    fn source_path(&self) -> PathBuf {
        self.directory.path().join("main.rs")
    }

    pub(super) fn write_source(&self, contents: &str) {
        fs::write(self.source_path(), contents).expect("write source file");
    }

    pub(super) fn set_output(&mut self, output: OutputMode) {
        self.config.output = output;
    }

    pub(super) fn run(&mut self, command: &str) {
        let path = self.source_path();
        let args = std::iter::once(OsString::from("weaver-refactor")).chain(
            command.split_whitespace().map(|token| {
                if token == FILE_TOKEN {
                    path.clone().into_os_string()
                } else {
                    OsString::from(token)
                }
            }),
        );
        self.stdout.clear();
        self.stderr.clear();
        let loader = StaticConfigLoader {
            config: self.config.clone(),
        };
        self.exit_code = Some(run_with_loader(
            args,
            &mut self.stdout,
            &mut self.stderr,
            &loader,
        ));
    }

    pub(super) const fn exit_code(&self) -> Option<ExitCode> {
        self.exit_code
    }

    pub(super) fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    pub(super) fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

#[fixture]
pub(super) fn world() -> RefCell<TestWorld> {
    RefCell::new(TestWorld::new())
}

#[test]
fn run_with_loader_reports_configuration_failures() {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let exit = run_with_loader(
        vec![OsString::from("weaver-refactor")],
        &mut stdout,
        &mut stderr,
        &FailingLoader,
    );
    assert_eq!(exit, ExitCode::FAILURE);
    assert!(
        String::from_utf8(stderr)
            .expect("stderr utf8")
            .contains("a refactoring action must be provided")
    );
}

#[test]
fn help_is_written_to_stdout() {
    let mut test_world = TestWorld::new();
    test_world.run("--help");
    assert_eq!(test_world.exit_code(), Some(ExitCode::SUCCESS));
    assert!(test_world.stdout_text().contains("local-rename"));
    assert!(test_world.stderr_text().is_empty());
}

#[test]
fn action_help_lists_option_flags() {
    let mut test_world = TestWorld::new();
    test_world.run("local-rename --help");
    let help = test_world.stdout_text();
    for flag in ["--selection", "--new-name", "--old-name", "--max-occurrences"] {
        assert!(help.contains(flag), "help is missing {flag}: {help}");
    }
}

#[test]
fn bare_invocation_prints_usage_and_fails() {
    let mut test_world = TestWorld::new();
    test_world.run("");
    assert_eq!(test_world.exit_code(), Some(ExitCode::FAILURE));
    assert!(test_world.stderr_text().contains("Usage"));
}

#[test]
fn selection_outside_the_file_is_reported() {
    let mut test_world = TestWorld::new();
    test_world.write_source("let x = 1;\n");
    test_world.run("local-rename --selection 9:1 --new-name y FILE");
    assert_eq!(test_world.exit_code(), Some(ExitCode::FAILURE));
    assert!(test_world.stderr_text().contains("selection 9:1 is not valid"));
}

#[test]
fn edits_output_writes_json() {
    let mut test_world = TestWorld::new();
    test_world.write_source("let x = 1;\nx\n");
    test_world.set_output(OutputMode::Edits);
    test_world.run("local-rename --old-name x --new-name y FILE");
    assert_eq!(test_world.exit_code(), Some(ExitCode::SUCCESS));
    let edits: serde_json::Value =
        serde_json::from_str(&test_world.stdout_text()).expect("json output");
    assert_eq!(edits.as_array().map(Vec::len), Some(2));
}
