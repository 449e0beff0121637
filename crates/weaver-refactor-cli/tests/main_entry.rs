//! Integration tests for the `weaver-refactor` binary entry point.
//!
//! Runs the compiled binary against temporary files to check exit codes and
//! the text written to each stream.

use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::str::contains;
use tempfile::TempDir;

#[test]
fn renames_selected_identifier() {
    let directory = TempDir::new().expect("temporary directory");
    let path = directory.path().join("lib.rs");
    fs::write(&path, "fn area(width: u32) -> u32 {\n    width * width\n}\n").expect("write source");

    let mut command = cargo_bin_cmd!("weaver-refactor");
    command
        .args(["local-rename", "--selection", "1:9-1:14", "--new-name", "side"])
        .arg(&path);
    command
        .assert()
        .success()
        .stdout("fn area(side: u32) -> u32 {\n    side * side\n}\n");
}

#[test]
fn configuration_flags_precede_the_action() {
    let directory = TempDir::new().expect("temporary directory");
    let path = directory.path().join("lib.rs");
    fs::write(&path, "let a = 1;\n").expect("write source");

    let mut command = cargo_bin_cmd!("weaver-refactor");
    command
        .args(["--output", "edits", "local-rename", "--old-name", "a", "--new-name", "b"])
        .arg(&path);
    command.assert().success().stdout(contains("\"replacement\": \"b\""));
}

#[test]
fn environment_selects_the_output_mode() {
    let directory = TempDir::new().expect("temporary directory");
    let path = directory.path().join("lib.rs");
    fs::write(&path, "let a = 1;\n").expect("write source");

    let mut command = cargo_bin_cmd!("weaver-refactor");
    command
        .env("WEAVER_REFACTOR_OUTPUT", "edits")
        .args(["local-rename", "--old-name", "a", "--new-name", "b"])
        .arg(&path);
    command.assert().success().stdout(contains("\"replacement\": \"b\""));
}

#[test]
fn configuration_file_selects_the_output_mode() {
    let directory = TempDir::new().expect("temporary directory");
    let path = directory.path().join("lib.rs");
    let config = directory.path().join("refactor.toml");
    fs::write(&path, "let a = 1;\n").expect("write source");
    fs::write(&config, "output = \"edits\"\n").expect("write configuration");

    let mut command = cargo_bin_cmd!("weaver-refactor");
    command
        .arg("--config-path")
        .arg(&config)
        .args(["local-rename", "--old-name", "a", "--new-name", "b"])
        .arg(&path);
    command.assert().success().stdout(contains("\"replacement\": \"b\""));
}

#[test]
fn missing_selection_and_old_name_exits_with_failure() {
    let directory = TempDir::new().expect("temporary directory");
    let path = directory.path().join("lib.rs");
    fs::write(&path, "let a = 1;\n").expect("write source");

    let mut command = cargo_bin_cmd!("weaver-refactor");
    command.args(["local-rename", "--new-name", "b"]).arg(&path);
    command
        .assert()
        .failure()
        .stderr(contains("required option 'old-name' was not supplied"));
}

#[test]
fn unknown_action_exits_with_failure() {
    let mut command = cargo_bin_cmd!("weaver-refactor");
    command.args(["extract-function", "lib.rs"]);
    command.assert().failure().stderr(contains("extract-function"));
}
