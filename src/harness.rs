//! Test harness for driving a program under test
//!
//! ## Lifecycle
//!
//! A [`TestHarness`] is created by [`TestHarness::configure`], which only records the program and the working
//! root. Each operation then either succeeds or returns a [`HarnessError`]; callers chain them with `?`. The
//! harness ends by being consumed by [`TestHarness::pass_test`], [`TestHarness::fail_test`],
//! [`TestHarness::no_result`] or [`TestHarness::conclude`], each of which yields the test's [`Outcome`]. Once
//! consumed no further assertion can run.
//!
//! ## Paths
//!
//! Relative paths given to harness operations are resolved against the working root. Absolute paths are used
//! as-is (`Path::join` semantics).
//!
//! Nothing here calls `process::exit`. The driver (the CLI, or a test function) decides what to do with the
//! outcome.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use cmdharness_core::{ArtifactKind, ExpectedOutput, Outcome, Platform};

use crate::error::{HarnessError, HarnessResult, Stream};
use crate::executor::{ExecutionResult, Executor, ProcessExecutor};
use crate::invocation::{Invocation, split_arguments};

// ============================================================================
// Run expectations
// ============================================================================

/// What a single `run` must observe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunExpectation {
    pub stdout: Option<ExpectedOutput>,
    pub stderr: Option<ExpectedOutput>,
    pub status: i32,
}

impl Default for RunExpectation {
    fn default() -> Self {
        Self::success()
    }
}

impl RunExpectation {
    /// Exit status 0, output unchecked.
    pub fn success() -> Self {
        Self {
            stdout: None,
            stderr: None,
            status: 0,
        }
    }

    pub fn stdout(mut self, expected: ExpectedOutput) -> Self {
        self.stdout = Some(expected);
        self
    }

    pub fn stderr(mut self, expected: ExpectedOutput) -> Self {
        self.stderr = Some(expected);
        self
    }

    pub fn status(mut self, status: i32) -> Self {
        self.status = status;
        self
    }
}

// ============================================================================
// Harness
// ============================================================================

/// Drives one external program through a sequence of checked invocations.
#[derive(Debug)]
pub struct TestHarness<E = ProcessExecutor> {
    program: PathBuf,
    workdir: PathBuf,
    platform: Platform,
    executor: E,
}

impl TestHarness<ProcessExecutor> {
    /// Record the program to invoke and the working root. Performs no I/O.
    pub fn configure(program: impl Into<PathBuf>, workdir: impl Into<PathBuf>) -> Self {
        Self::with_executor(program, workdir, ProcessExecutor)
    }
}

impl<E: Executor> TestHarness<E> {
    /// Like [`TestHarness::configure`], with a custom execution strategy.
    pub fn with_executor(program: impl Into<PathBuf>, workdir: impl Into<PathBuf>, executor: E) -> Self {
        Self {
            program: program.into(),
            workdir: workdir.into(),
            platform: Platform::current(),
            executor,
        }
    }

    /// Override the platform used for expected-text adjustment.
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Resolve `path` against the working root.
    pub fn path(&self, path: impl AsRef<Path>) -> PathBuf {
        self.workdir.join(path)
    }

    /// Expected text adjusted once for this harness's platform.
    pub fn expected(&self, literal: impl Into<String>) -> ExpectedOutput {
        ExpectedOutput::literal(literal).for_platform(self.platform)
    }

    /// Build the invocation for an argument string without running it.
    pub fn invocation(&self, arguments: &str) -> Invocation {
        Invocation::new(&self.program, &self.workdir).args(split_arguments(arguments))
    }

    // ------------------------------------------------------------------------
    // Filesystem setup
    // ------------------------------------------------------------------------

    /// Ensure a directory exists under the working root.
    ///
    /// ## Errors
    ///
    /// - [`HarnessError::NotADirectory`] if a file already occupies the path.
    /// - [`HarnessError::Filesystem`] if the directory cannot be created.
    pub fn subdir(&self, path: impl AsRef<Path>) -> HarnessResult<PathBuf> {
        // Rebuilding from components drops a trailing separator, so a file at `runtest` is seen for `runtest/`.
        let dir: PathBuf = self.path(path).components().collect();
        if dir.exists() {
            if dir.is_dir() {
                return Ok(dir);
            }
            return Err(HarnessError::NotADirectory { path: dir });
        }
        fs::create_dir_all(&dir).map_err(|e| HarnessError::filesystem(&dir, "create directory", e))?;
        tracing::debug!(path = %dir.display(), "created subdirectory");
        Ok(dir)
    }

    /// Write a fixture file under the working root. Parent directories must already exist.
    pub fn write(&self, path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> HarnessResult<PathBuf> {
        let file = self.path(path);
        fs::write(&file, contents).map_err(|e| HarnessError::filesystem(&file, "write", e))?;
        Ok(file)
    }

    pub fn read(&self, path: impl AsRef<Path>) -> HarnessResult<String> {
        let file = self.path(path);
        fs::read_to_string(&file).map_err(|e| HarnessError::filesystem(&file, "read", e))
    }

    /// Write a placeholder artifact of `kind` at `path`.
    ///
    /// The contents are fixed and meaningless; only the file's existence is meant to be checked.
    pub fn fake_artifact(&self, kind: ArtifactKind, path: impl AsRef<Path>) -> HarnessResult<PathBuf> {
        let file = self.path(path);
        write_placeholder(kind, &file)?;
        Ok(file)
    }

    pub fn fake_certificate(&self, path: impl AsRef<Path>) -> HarnessResult<PathBuf> {
        self.fake_artifact(ArtifactKind::Certificate, path)
    }

    pub fn fake_private_key(&self, path: impl AsRef<Path>) -> HarnessResult<PathBuf> {
        self.fake_artifact(ArtifactKind::PrivateKey, path)
    }

    pub fn fake_package(&self, path: impl AsRef<Path>) -> HarnessResult<PathBuf> {
        self.fake_artifact(ArtifactKind::PackageExchange, path)
    }

    // ------------------------------------------------------------------------
    // Assertions
    // ------------------------------------------------------------------------

    pub fn must_exist(&self, path: impl AsRef<Path>) -> HarnessResult<()> {
        let path = self.path(path);
        if path.exists() {
            Ok(())
        } else {
            Err(HarnessError::MissingPath { path })
        }
    }

    pub fn must_not_exist(&self, path: impl AsRef<Path>) -> HarnessResult<()> {
        let path = self.path(path);
        if path.exists() {
            Err(HarnessError::UnexpectedPath { path })
        } else {
            Ok(())
        }
    }

    /// Check that the file at `path` contains `needle`. Invalid UTF-8 is compared lossily, so it fails the
    /// check rather than the read.
    pub fn must_contain(&self, path: impl AsRef<Path>, needle: &str) -> HarnessResult<()> {
        let file = self.path(path);
        let bytes = fs::read(&file).map_err(|e| HarnessError::filesystem(&file, "read", e))?;
        if String::from_utf8_lossy(&bytes).contains(needle) {
            Ok(())
        } else {
            Err(HarnessError::ContentMismatch {
                path: file,
                needle: needle.to_string(),
            })
        }
    }

    // ------------------------------------------------------------------------
    // Invocations
    // ------------------------------------------------------------------------

    /// Run the program with `arguments`.
    ///
    /// With `expected_stdout`, captured stdout must equal it exactly. The exit status must be 0 in both cases.
    pub fn run(&self, arguments: &str, expected_stdout: Option<ExpectedOutput>) -> HarnessResult<ExecutionResult> {
        let expectation = match expected_stdout {
            Some(stdout) => RunExpectation::success().stdout(stdout),
            None => RunExpectation::success(),
        };
        self.run_with(arguments, &expectation)
    }

    /// Run the program with `arguments` and check every part of `expect`.
    pub fn run_with(&self, arguments: &str, expect: &RunExpectation) -> HarnessResult<ExecutionResult> {
        self.run_invocation(&self.invocation(arguments), expect)
    }

    /// Run a prepared invocation and check every part of `expect`.
    ///
    /// ## Errors
    ///
    /// - [`HarnessError::Launch`] if the program cannot be started.
    /// - [`HarnessError::StatusMismatch`] if the exit status differs (checked first).
    /// - [`HarnessError::AssertionMismatch`] if stdout, then stderr, differ.
    #[tracing::instrument(skip_all, fields(command = %invocation))]
    pub fn run_invocation(&self, invocation: &Invocation, expect: &RunExpectation) -> HarnessResult<ExecutionResult> {
        tracing::info!("running");

        let result = self.executor.execute(invocation)?;
        tracing::debug!(
            status = ?result.status,
            stdout_bytes = result.stdout.len(),
            stderr_bytes = result.stderr.len(),
            "finished"
        );

        if result.status != Some(expect.status) {
            return Err(HarnessError::StatusMismatch {
                command: invocation.command_line(),
                expected: expect.status,
                actual: result.status,
            });
        }
        check_stream(invocation, Stream::Stdout, expect.stdout.as_ref(), &result.stdout)?;
        check_stream(invocation, Stream::Stderr, expect.stderr.as_ref(), &result.stderr)?;

        Ok(result)
    }

    // ------------------------------------------------------------------------
    // Terminal states
    // ------------------------------------------------------------------------

    pub fn pass_test(self) -> Outcome {
        tracing::info!(program = %self.program.display(), "test passed");
        Outcome::Passed
    }

    pub fn fail_test(self, reason: impl fmt::Display) -> Outcome {
        tracing::error!(program = %self.program.display(), "test failed: {}", reason);
        Outcome::Failed
    }

    pub fn no_result(self, reason: impl fmt::Display) -> Outcome {
        tracing::warn!(program = %self.program.display(), "no result: {}", reason);
        Outcome::NoResult
    }

    /// Map the result of a test body to its outcome.
    pub fn conclude(self, result: HarnessResult<()>) -> Outcome {
        match result {
            Ok(()) => self.pass_test(),
            Err(err) => match err.outcome() {
                Outcome::NoResult => self.no_result(&err),
                _ => self.fail_test(&err),
            },
        }
    }
}

/// Write the fixed contents of `kind` to `path`, relative to the current directory.
pub fn write_placeholder(kind: ArtifactKind, path: &Path) -> HarnessResult<()> {
    fs::write(path, kind.contents()).map_err(|e| HarnessError::filesystem(path, "write placeholder", e))?;
    tracing::info!(kind = kind.description(), path = %path.display(), "wrote placeholder artifact");
    Ok(())
}

fn check_stream(
    invocation: &Invocation,
    stream: Stream,
    expected: Option<&ExpectedOutput>,
    actual: &str,
) -> HarnessResult<()> {
    let Some(expected) = expected else {
        return Ok(());
    };
    expected.matches(actual).map_err(|mismatch| HarnessError::AssertionMismatch {
        command: invocation.command_line(),
        stream,
        mismatch,
    })
}

// ============================================================================
// Tests
// ============================================================================
