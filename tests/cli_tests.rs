//! CLI interface tests
//!
//! Runs the `size-snapshot` binary against temporary projects and checks
//! output, snapshot files and exit codes.

use assert_cmd::Command;
use predicates::prelude::*;
use size_snapshot::fmt::format_size;
use std::fs;

mod common;
use common::fixtures;

/// Helper to get the size-snapshot binary command
fn get_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_size-snapshot"));
    cmd.env("NO_COLOR", "1").env("CLICOLOR", "0");
    cmd
}

#[test]
fn test_cli_help_flag_displays_usage_information() {
    get_bin()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("JavaScript bundle size tracker"));
}

#[test]
fn test_cli_version_flag_displays_version_number() {
    get_bin()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("size-snapshot"));
}

#[test]
fn test_cli_without_command_lists_commands() {
    get_bin()
        .assert()
        .success()
        .stdout(predicate::str::contains("measure"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_measure_writes_snapshot_and_prints_report() {
    let project = fixtures::create_redux_project().unwrap();
    let bundled = format_size(fixtures::read_fixture("redux.js").len() as u64);

    get_bin()
        .args(["measure", "dist/redux.js"])
        .current_dir(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Computed sizes of \"dist/redux.js\" with \"es\" format",
        ))
        .stdout(predicate::str::contains(format!(
            "  bundler parsing size: {bundled}"
        )))
        .stdout(predicate::str::contains(
            "  treeshaked as ES module with production NODE_ENV and minified: 0 B\n    import statements size of it: 0 B",
        ))
        .stdout(predicate::str::contains(
            "  treeshaked with module runtime in production mode: 0 B",
        ));

    let snapshot =
        fixtures::read_snapshot(&project.path().join(".size-snapshot.json")).unwrap();
    assert!(snapshot["dist/redux.js"]["gzipped"].as_u64().unwrap() > 0);
}

#[test]
fn test_measure_no_print_info_is_quiet_but_still_writes() {
    let project = fixtures::create_redux_project().unwrap();

    get_bin()
        .args(["measure", "dist/redux.js", "--no-print-info"])
        .current_dir(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Computed sizes").not());

    assert!(project.path().join(".size-snapshot.json").exists());
}

#[test]
fn test_match_snapshot_passes_after_write() {
    let project = fixtures::create_redux_project().unwrap();

    get_bin()
        .args(["measure", "dist/redux.js", "--no-print-info"])
        .current_dir(project.path())
        .assert()
        .success();
    let written = fs::read_to_string(project.path().join(".size-snapshot.json")).unwrap();

    get_bin()
        .args(["measure", "dist/redux.js", "--match-snapshot"])
        .current_dir(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("matches snapshot"));

    // verify mode never rewrites the file
    let after = fs::read_to_string(project.path().join(".size-snapshot.json")).unwrap();
    assert_eq!(written, after);
}

#[test]
fn test_match_snapshot_mismatch_prints_diff_and_fails() {
    let project = fixtures::create_redux_project().unwrap();
    fs::write(
        project.path().join(".size-snapshot.json"),
        "{\n  \"dist/redux.js\": {\n    \"bundled\": 1,\n    \"gzipped\": 1,\n    \"minified\": 1\n  }\n}\n",
    )
    .unwrap();

    get_bin()
        .args(["measure", "dist/redux.js", "--match-snapshot"])
        .current_dir(project.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Size snapshot is not matched. Run size-snapshot to rebuild one.",
        ))
        .stderr(predicate::str::contains("- Snapshot"))
        .stderr(predicate::str::contains("-   \"bundled\": 1,"));
}

#[test]
fn test_match_snapshot_threshold_flag() {
    let project = fixtures::create_project(&[("out.js", "var a = 1;\n")]).unwrap();
    fs::write(
        project.path().join(".size-snapshot.json"),
        "{\"out.js\": {\"bundled\": 20, \"minified\": 20, \"gzipped\": 40}}",
    )
    .unwrap();

    get_bin()
        .args(["measure", "out.js", "--format", "cjs", "--match-snapshot", "--threshold", "1000"])
        .current_dir(project.path())
        .assert()
        .success();

    get_bin()
        .args(["measure", "out.js", "--format", "cjs", "--match-snapshot"])
        .current_dir(project.path())
        .assert()
        .code(1);
}

#[test]
fn test_match_missing_snapshot_fails() {
    let project = fixtures::create_redux_project().unwrap();

    get_bin()
        .args(["measure", "dist/redux.js", "--match-snapshot"])
        .current_dir(project.path())
        .assert()
        .code(66)
        .stderr(predicate::str::contains(
            "Size snapshot is missing. Please run size-snapshot to create one.",
        ));
}

#[test]
fn test_config_file_with_invalid_keys_fails() {
    let project = fixtures::create_redux_project().unwrap();
    fs::write(
        project.path().join(".size-snapshot.toml"),
        "minify = true\nsnapshot = \"\"\nmatchSnapshot = false\n",
    )
    .unwrap();

    get_bin()
        .args(["measure", "dist/redux.js"])
        .current_dir(project.path())
        .assert()
        .code(64)
        .stderr(predicate::str::contains(
            "Options \"minify\", \"snapshot\" are invalid",
        ));
}

#[test]
fn test_config_file_snapshot_path_is_used() {
    let project = fixtures::create_redux_project().unwrap();
    fs::write(
        project.path().join(".size-snapshot.toml"),
        "snapshotPath = \"sizes/custom.json\"\nprintInfo = false\n",
    )
    .unwrap();
    fs::create_dir(project.path().join("sizes")).unwrap();

    get_bin()
        .args(["measure", "dist/redux.js"])
        .current_dir(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Computed sizes").not());

    assert!(project.path().join("sizes/custom.json").exists());
    assert!(!project.path().join(".size-snapshot.json").exists());
}

#[test]
fn test_negative_threshold_is_usage_error() {
    let project = fixtures::create_redux_project().unwrap();

    get_bin()
        .args(["measure", "dist/redux.js", "--threshold=-1"])
        .current_dir(project.path())
        .assert()
        .code(64);
}

#[test]
fn test_missing_input_file_fails() {
    let project = fixtures::create_project(&[]).unwrap();

    get_bin()
        .args(["measure", "nope.js"])
        .current_dir(project.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read nope.js"));
}

#[test]
fn test_completions_bash() {
    get_bin()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("size-snapshot"));
}
