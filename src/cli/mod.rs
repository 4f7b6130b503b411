//! CLI module for cmdharness
//!
//! ## Commands
//!
//! - `self-check` - Run the runner self-check scenario
//! - `fake <cer|pvk|pfx> <path>` - Write one placeholder artifact
//! - `run <program> [args]...` - Run one program and check its status and output
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use cmdharness_core::{ArtifactKind, Outcome};

use crate::config::COVERAGE_HOOK_ENV;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
    pub const NO_RESULT: ExitCode = ExitCode(2);
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        ExitCode(outcome.exit_code())
    }
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }

    /// Create a no-result error (exit code 2).
    pub fn no_result(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::NO_RESULT)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Fail-fast harness for regression-testing command-line programs
#[derive(Parser, Debug)]
#[command(name = "cmdharness")]
#[command(version = VERSION)]
#[command(about = "Fail-fast harness for regression-testing command-line programs", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check a runtest.py-style runner: help text, no-op run, placeholder artifacts
    SelfCheck {
        /// Interpreter used to launch the runner
        #[arg(long, value_name = "PROGRAM", default_value = "python")]
        interpreter: PathBuf,
        /// Runner script, resolved against the current directory
        #[arg(long, value_name = "PATH", default_value = "bin/runtest.py")]
        runner: PathBuf,
        /// Working root for the scenario's files
        #[arg(long, value_name = "DIR", default_value = ".")]
        workdir: PathBuf,
        /// Prefix placed before the runner path
        #[arg(long, value_name = "PREFIX", env = COVERAGE_HOOK_ENV, default_value = "")]
        coverage_hook: String,
    },

    /// Write a placeholder certificate, private key or package file
    Fake {
        /// Artifact kind: cer, pvk or pfx
        #[arg(value_name = "KIND")]
        kind: ArtifactKind,
        /// Destination file
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },

    /// Run a program once and check its exit status and stdout
    Run {
        /// Working directory for the program
        #[arg(long, value_name = "DIR", default_value = ".")]
        workdir: PathBuf,
        /// File holding the exact expected stdout
        #[arg(long = "expect-stdout", value_name = "FILE")]
        expect_stdout: Option<PathBuf>,
        /// Expected exit status
        #[arg(long, value_name = "N", default_value_t = 0, allow_negative_numbers = true)]
        status: i32,
        /// Program to run
        #[arg(value_name = "PROGRAM")]
        program: PathBuf,
        /// Arguments passed to the program
        #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::SelfCheck {
            interpreter,
            runner,
            workdir,
            coverage_hook,
        } => commands::self_check(&interpreter, &runner, &workdir, &coverage_hook),
        Command::Fake { kind, path } => commands::fake_artifact(kind, &path),
        Command::Run {
            workdir,
            expect_stdout,
            status,
            program,
            args,
        } => commands::run_program(&program, &args, &workdir, expect_stdout.as_deref(), status),
    }
}

// ============================================================================
// Tests
// ============================================================================
