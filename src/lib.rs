#![forbid(unsafe_code)]
//! cmdharness: a fail-fast harness for regression-testing command-line programs
//!
//! The harness runs a program under test as a subprocess, captures its output and exit status, compares them
//! with exact expectations, and prepares working files (subdirectories, placeholder certificates and keys).
//! Pure pieces (platform text adjustment, comparison, artifact contents, outcomes) live in `cmdharness_core`.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` with `?` / `map_err`. Harness operations return [`HarnessResult`]; only
//!   the CLI's `run()` exits the process. The `cli` module enforces `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod cli;
pub mod config;
pub mod error;
pub mod executor;
pub mod harness;
pub mod invocation;
pub mod scenario;

pub use cmdharness_core::{ArtifactKind, ExpectedOutput, Outcome, OutputMismatch, Platform, adjust_for_platform};

pub use config::HarnessConfig;
pub use error::{HarnessError, HarnessResult, Stream};
pub use executor::{ExecutionResult, Executor, ProcessExecutor};
pub use harness::{RunExpectation, TestHarness};
pub use invocation::Invocation;
