//! End-to-end runs of the runner self-check scenario against a scripted runner
//!
//! The runner is a small POSIX shell script, so these tests only run on unix.

#![cfg(unix)]

mod common;

use cmdharness::scenario::{RUNTEST_USAGE, RunnerCommand, artifact_path, run_self_check};
use cmdharness::{ArtifactKind, HarnessError, Outcome, Platform, Stream, TestHarness, adjust_for_platform};

use common::{Sandbox, write_runner, write_standard_runner};

fn harness(sandbox: &Sandbox, platform: Platform) -> TestHarness {
    TestHarness::configure("sh", &sandbox.work).with_platform(platform)
}

#[test]
fn test_self_check_passes_against_conforming_runner() {
    let sandbox = Sandbox::new();
    let runner = RunnerCommand::new("", write_standard_runner(&sandbox.bin));
    let harness = harness(&sandbox, Platform::Linux);

    run_self_check(&harness, &runner).unwrap();

    for kind in ArtifactKind::ALL {
        let path = sandbox.work.join(artifact_path(kind));
        assert!(path.is_file(), "{} was not created", path.display());
    }
    assert_eq!(harness.pass_test(), Outcome::Passed);
}

#[test]
fn test_help_output_is_compared_exactly() {
    let sandbox = Sandbox::new();
    // One trailing space on the first line is enough to fail.
    let almost = RUNTEST_USAGE.replacen("[options]", "[options] ", 1);
    let runner = RunnerCommand::new("", write_runner(&sandbox.bin, &almost));
    let harness = harness(&sandbox, Platform::Linux);

    let err = run_self_check(&harness, &runner).unwrap_err();
    match &err {
        HarnessError::AssertionMismatch { stream, mismatch, .. } => {
            assert_eq!(*stream, Stream::Stdout);
            assert_eq!(mismatch.expected, RUNTEST_USAGE);
            assert_eq!(mismatch.actual, almost);
            assert_eq!(mismatch.first_differing_line, 1);
        }
        other => panic!("expected AssertionMismatch, got {other:?}"),
    }

    // The scenario stops at the first failure: no artifacts yet.
    assert!(!sandbox.work.join(artifact_path(ArtifactKind::Certificate)).exists());
    assert_eq!(harness.conclude(Err(err)), Outcome::Failed);
}

#[test]
fn test_darwin_expects_capitalized_headings() {
    let sandbox = Sandbox::new();
    let darwin_help = adjust_for_platform(RUNTEST_USAGE, Platform::Darwin);
    let runner = RunnerCommand::new("", write_runner(&sandbox.bin, &darwin_help));

    assert!(run_self_check(&harness(&sandbox, Platform::Darwin), &runner).is_ok());
    assert!(matches!(
        run_self_check(&harness(&sandbox, Platform::Linux), &runner),
        Err(HarnessError::AssertionMismatch { .. })
    ));
}

#[test]
fn test_no_exec_run_must_succeed() {
    let sandbox = Sandbox::new();
    let runner_path = sandbox.bin.join("runtest.sh");
    let script = format!(
        "if [ \"$1\" = \"--help\" ]; then\ncat <<'USAGE'\n{RUNTEST_USAGE}USAGE\nexit 0\nfi\nexit 1\n"
    );
    std::fs::write(&runner_path, script).unwrap();
    let runner = RunnerCommand::new("", runner_path);

    let err = run_self_check(&harness(&sandbox, Platform::Linux), &runner).unwrap_err();
    assert!(matches!(
        err,
        HarnessError::StatusMismatch {
            expected: 0,
            actual: Some(1),
            ..
        }
    ));
    assert!(err.to_string().contains("-n -a"));
}

#[test]
fn test_coverage_hook_is_prepended() {
    let sandbox = Sandbox::new();
    let runner = write_standard_runner(&sandbox.bin);
    // `sh -e <runner>` is a harmless prefix that still runs the runner.
    let hooked = RunnerCommand::new("-e", runner);
    let harness = harness(&sandbox, Platform::Linux);

    assert_eq!(hooked.invocation(&harness, "--help").arguments()[0], "-e");
    run_self_check(&harness, &hooked).unwrap();
}

#[test]
fn test_runner_under_directory_with_space() {
    let sandbox = Sandbox::new();
    let tools = sandbox.root.path().join("my tools");
    std::fs::create_dir_all(&tools).unwrap();
    let runner = RunnerCommand::new("", write_standard_runner(&tools));
    let harness = harness(&sandbox, Platform::Linux);

    run_self_check(&harness, &runner).unwrap();
    assert!(sandbox.work.join(artifact_path(ArtifactKind::Certificate)).is_file());
    assert_eq!(harness.pass_test(), Outcome::Passed);
}

#[test]
fn test_missing_interpreter_has_no_result() {
    let sandbox = Sandbox::new();
    let runner = RunnerCommand::new("", write_standard_runner(&sandbox.bin));
    let harness = TestHarness::configure("cmdharness-missing-interpreter", &sandbox.work);

    let err = run_self_check(&harness, &runner).unwrap_err();
    assert!(matches!(err, HarnessError::Launch { .. }));
    assert_eq!(harness.conclude(Err(err)), Outcome::NoResult);
}

#[test]
fn test_blocked_scenario_directory_has_no_result() {
    let sandbox = Sandbox::new();
    std::fs::write(sandbox.work.join("runtest"), "not a directory").unwrap();
    let runner = RunnerCommand::new("", write_standard_runner(&sandbox.bin));
    let harness = harness(&sandbox, Platform::Linux);

    let err = run_self_check(&harness, &runner).unwrap_err();
    assert!(matches!(err, HarnessError::NotADirectory { .. }));
    assert_eq!(err.outcome(), Outcome::NoResult);
}
