//! Harness configuration
//!
//! Defaults match a runner checked out as `bin/runtest.py` and driven by `python` from the current directory.
//! Environment values are read once by [`HarnessConfig::from_env`]; command-line flags override them.

use std::env;
use std::path::{Path, PathBuf};

use cmdharness_core::Platform;

use crate::error::{HarnessError, HarnessResult};
use crate::harness::TestHarness;
use crate::scenario::RunnerCommand;

/// Environment variable naming a coverage-instrumentation prefix for the runner command line.
pub const COVERAGE_HOOK_ENV: &str = "COVERAGE_HOOK";

/// Settings for one harness session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Interpreter (or any program) the harness spawns
    pub interpreter: PathBuf,
    /// Runner script handed to the interpreter
    pub runner: PathBuf,
    /// Working root for subdirectories and placeholder files
    pub workdir: PathBuf,
    /// Prefix placed before the runner path; empty when unused
    pub coverage_hook: String,
    pub platform: Platform,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            interpreter: PathBuf::from("python"),
            runner: PathBuf::from("bin/runtest.py"),
            workdir: PathBuf::from("."),
            coverage_hook: String::new(),
            platform: Platform::current(),
        }
    }
}

impl HarnessConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults plus values taken from the environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Defaults plus values returned by `lookup` for each recognized variable name.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self::default().with_coverage_hook(lookup(COVERAGE_HOOK_ENV).unwrap_or_default())
    }

    pub fn with_interpreter(mut self, interpreter: impl Into<PathBuf>) -> Self {
        self.interpreter = interpreter.into();
        self
    }

    pub fn with_runner(mut self, runner: impl Into<PathBuf>) -> Self {
        self.runner = runner.into();
        self
    }

    pub fn with_workdir(mut self, workdir: impl Into<PathBuf>) -> Self {
        self.workdir = workdir.into();
        self
    }

    pub fn with_coverage_hook(mut self, hook: impl Into<String>) -> Self {
        self.coverage_hook = hook.into();
        self
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Harness that spawns the configured interpreter in the configured working root.
    pub fn harness(&self) -> TestHarness {
        TestHarness::configure(&self.interpreter, &self.workdir).with_platform(self.platform)
    }

    /// Runner command line prefix with the runner path made absolute.
    ///
    /// The runner is resolved against the current directory, not the working root, so it still points at the
    /// same script when the subprocess runs inside the working root.
    pub fn runner_command(&self) -> HarnessResult<RunnerCommand> {
        let runner = absolute(&self.runner)?;
        Ok(RunnerCommand::new(self.coverage_hook.clone(), runner))
    }
}

fn absolute(path: &Path) -> HarnessResult<PathBuf> {
    std::path::absolute(path).map_err(|e| HarnessError::filesystem(path, "resolve", e))
}
