//! Test outcome vocabulary.
//!
//! The exit codes follow the long-standing convention of command-line test drivers: `0` passed, `1` failed,
//! `2` no result. A runner may be told to ignore no-result outcomes, which is why it has its own code.

use std::fmt;

/// Final verdict of one test case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Passed,
    Failed,
    /// The test could not determine an outcome (setup failed, program could not be launched).
    NoResult,
}

impl Outcome {
    pub const fn exit_code(self) -> i32 {
        match self {
            Outcome::Passed => 0,
            Outcome::Failed => 1,
            Outcome::NoResult => 2,
        }
    }

    /// Inverse of [`Outcome::exit_code`].
    pub const fn from_exit_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Outcome::Passed),
            1 => Some(Outcome::Failed),
            2 => Some(Outcome::NoResult),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Outcome::Passed => "PASSED",
            Outcome::Failed => "FAILED",
            Outcome::NoResult => "NO RESULT",
        }
    }

    pub const fn is_success(self) -> bool {
        matches!(self, Outcome::Passed)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(Outcome::Passed.exit_code(), 0);
        assert_eq!(Outcome::Failed.exit_code(), 1);
        assert_eq!(Outcome::NoResult.exit_code(), 2);
    }

    #[test]
    fn test_exit_code_round_trip_and_unknown() {
        for outcome in [Outcome::Passed, Outcome::Failed, Outcome::NoResult] {
            assert_eq!(Outcome::from_exit_code(outcome.exit_code()), Some(outcome));
        }
        assert_eq!(Outcome::from_exit_code(3), None);
    }

    #[test]
    fn test_only_passed_is_success() {
        assert!(Outcome::Passed.is_success());
        assert!(!Outcome::NoResult.is_success());
    }
}
