//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::path::Path;

use cmdharness_core::ArtifactKind;

use crate::config::HarnessConfig;
use crate::error::HarnessResult;
use crate::executor::Executor;
use crate::harness::{RunExpectation, TestHarness, write_placeholder};
use crate::scenario;

use super::{CliError, CliResult, ExitCode};

/// Run the runner self-check scenario and exit with its outcome.
pub fn self_check(interpreter: &Path, runner: &Path, workdir: &Path, coverage_hook: &str) -> CliResult<ExitCode> {
    let config = HarnessConfig::new()
        .with_interpreter(interpreter)
        .with_runner(runner)
        .with_workdir(workdir)
        .with_coverage_hook(coverage_hook);

    let harness = config.harness();
    let result = config
        .runner_command()
        .and_then(|runner| scenario::run_self_check(&harness, &runner));
    finish(harness, result)
}

/// Write a single placeholder artifact.
pub fn fake_artifact(kind: ArtifactKind, path: &Path) -> CliResult<ExitCode> {
    write_placeholder(kind, path).map_err(|e| CliError::new(e.to_string(), e.outcome().into()))?;
    Ok(ExitCode::SUCCESS)
}

/// Run one program and check its status and, optionally, its stdout.
pub fn run_program(
    program: &Path,
    args: &[String],
    workdir: &Path,
    expect_stdout: Option<&Path>,
    status: i32,
) -> CliResult<ExitCode> {
    let harness = TestHarness::configure(program, workdir);

    let mut expectation = RunExpectation::success().status(status);
    if let Some(file) = expect_stdout {
        let literal = fs::read_to_string(file)
            .map_err(|e| CliError::no_result(format!("Error reading '{}': {}", file.display(), e)))?;
        expectation = expectation.stdout(harness.expected(literal));
    }

    let invocation = harness.invocation("").args(args);
    let result = harness.run_invocation(&invocation, &expectation).map(|_| ());
    finish(harness, result)
}

/// Turn a finished test body into the process exit code, printing the verdict to stderr.
fn finish<E: Executor>(harness: TestHarness<E>, result: HarnessResult<()>) -> CliResult<ExitCode> {
    let message = result.as_ref().err().map(ToString::to_string);
    let outcome = harness.conclude(result);
    match message {
        None => {
            eprintln!("{}", outcome);
            Ok(outcome.into())
        }
        Some(message) => Err(CliError::new(format!("{}: {}", outcome, message), outcome.into())),
    }
}
