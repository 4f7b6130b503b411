//! Subprocess execution boundary
//!
//! The harness never spawns processes directly. It hands an [`Invocation`] to an [`Executor`] and receives an
//! [`ExecutionResult`]. The default [`ProcessExecutor`] uses `std::process::Command`; tests substitute scripted
//! executors to exercise the comparison logic without spawning anything.

use std::process::{Command, Stdio};

use crate::error::{HarnessError, HarnessResult};
use crate::invocation::Invocation;

/// Captured result of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub stdout: String,
    pub stderr: String,
    /// Exit code, or `None` if the process was terminated by a signal.
    pub status: Option<i32>,
}

impl ExecutionResult {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Run an invocation to completion and capture its output.
pub trait Executor {
    /// Run `invocation`, blocking until it exits.
    ///
    /// ## Errors
    ///
    /// Returns [`HarnessError::Launch`] if the program could not be started. A program that starts and then
    /// fails is not an error here; its status is reported in the [`ExecutionResult`].
    fn execute(&self, invocation: &Invocation) -> HarnessResult<ExecutionResult>;
}

impl<E: Executor + ?Sized> Executor for &E {
    fn execute(&self, invocation: &Invocation) -> HarnessResult<ExecutionResult> {
        (**self).execute(invocation)
    }
}

/// Spawns a real child process.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessExecutor;

impl Executor for ProcessExecutor {
    fn execute(&self, invocation: &Invocation) -> HarnessResult<ExecutionResult> {
        let output = Command::new(invocation.program())
            .args(invocation.arguments())
            .current_dir(invocation.workdir())
            .stdin(Stdio::null())
            .output()
            .map_err(|e| HarnessError::Launch {
                command: invocation.command_line(),
                source: e,
            })?;

        Ok(ExecutionResult {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            status: output.status.code(),
        })
    }
}
