//! Harness error taxonomy
//!
//! Every harness operation returns [`HarnessResult`]. Nothing here exits the process; the driver decides what
//! an error means via [`HarnessError::outcome`].

use std::fmt;
use std::io;
use std::path::PathBuf;

use cmdharness_core::{Outcome, OutputMismatch};
use thiserror::Error;

/// Captured output stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stream::Stdout => f.write_str("stdout"),
            Stream::Stderr => f.write_str("stderr"),
        }
    }
}

/// Errors raised while driving a program under test
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("{stream} of `{command}` did not match\n{mismatch}")]
    AssertionMismatch {
        command: String,
        stream: Stream,
        mismatch: OutputMismatch,
    },

    #[error("`{command}` exited with {}, expected {expected}", display_status(.actual))]
    StatusMismatch {
        command: String,
        expected: i32,
        actual: Option<i32>,
    },

    #[error("failed to launch `{command}`: {source}")]
    Launch {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to {action} {}: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        action: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("{} exists and is not a directory", .path.display())]
    NotADirectory { path: PathBuf },

    #[error("{} does not exist", .path.display())]
    MissingPath { path: PathBuf },

    #[error("{} exists but should not", .path.display())]
    UnexpectedPath { path: PathBuf },

    #[error("{} does not contain {needle:?}", .path.display())]
    ContentMismatch { path: PathBuf, needle: String },
}

impl HarnessError {
    pub(crate) fn filesystem(path: impl Into<PathBuf>, action: &'static str, source: io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            action,
            source,
        }
    }

    /// Outcome a test case ends with when this error escapes it.
    ///
    /// Assertion failures are [`Outcome::Failed`]. Errors that stop the test from reaching a verdict (setup
    /// failures, a program that cannot be launched) are [`Outcome::NoResult`].
    pub fn outcome(&self) -> Outcome {
        match self {
            HarnessError::AssertionMismatch { .. }
            | HarnessError::StatusMismatch { .. }
            | HarnessError::MissingPath { .. }
            | HarnessError::UnexpectedPath { .. }
            | HarnessError::ContentMismatch { .. } => Outcome::Failed,
            HarnessError::Launch { .. } | HarnessError::Filesystem { .. } | HarnessError::NotADirectory { .. } => {
                Outcome::NoResult
            }
        }
    }
}

fn display_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("status {}", code),
        None => "no status (terminated by signal)".to_string(),
    }
}

/// Result type for harness operations.
pub type HarnessResult<T> = Result<T, HarnessError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assertion_errors_fail() {
        let err = HarnessError::MissingPath {
            path: PathBuf::from("runtest/fake1.cer"),
        };
        assert_eq!(err.outcome(), Outcome::Failed);
        assert_eq!(err.to_string(), "runtest/fake1.cer does not exist");
    }

    #[test]
    fn test_launch_errors_have_no_result() {
        let err = HarnessError::Launch {
            command: "missing-interpreter runner.py --help".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.outcome(), Outcome::NoResult);
        assert!(err.to_string().contains("missing-interpreter runner.py --help"));
    }

    #[test]
    fn test_status_message_handles_signals() {
        let err = HarnessError::StatusMismatch {
            command: "prog".to_string(),
            expected: 0,
            actual: None,
        };
        assert_eq!(
            err.to_string(),
            "`prog` exited with no status (terminated by signal), expected 0"
        );
    }
}
