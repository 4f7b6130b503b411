//! Expected output and exact comparison.
//!
//! An [`ExpectedOutput`] is written as a literal, optionally adjusted once for the host platform, and then only
//! read. Comparison is byte-exact: there are no partial matches and no normalization beyond the platform step.

use std::fmt;

use crate::platform::{Platform, adjust_for_platform};

/// Expected text for one captured stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedOutput(String);

impl ExpectedOutput {
    /// Expected text taken verbatim.
    pub fn literal(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Consume the literal and return it rewritten for `platform`.
    pub fn for_platform(self, platform: Platform) -> Self {
        Self(adjust_for_platform(&self.0, platform))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compare against captured text.
    ///
    /// ## Errors
    ///
    /// Returns an [`OutputMismatch`] carrying both texts when they differ in any byte.
    pub fn matches(&self, actual: &str) -> Result<(), OutputMismatch> {
        if self.0 == actual {
            Ok(())
        } else {
            Err(OutputMismatch::new(&self.0, actual))
        }
    }
}

impl From<&str> for ExpectedOutput {
    fn from(text: &str) -> Self {
        Self::literal(text)
    }
}

impl From<String> for ExpectedOutput {
    fn from(text: String) -> Self {
        Self::literal(text)
    }
}

/// Difference between expected and captured text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputMismatch {
    pub expected: String,
    pub actual: String,
    /// 1-based line of the first difference (lines split on `\n`, so a missing trailing newline counts).
    pub first_differing_line: usize,
}

impl OutputMismatch {
    fn new(expected: &str, actual: &str) -> Self {
        Self {
            expected: expected.to_string(),
            actual: actual.to_string(),
            first_differing_line: first_differing_line(expected, actual),
        }
    }
}

fn first_differing_line(expected: &str, actual: &str) -> usize {
    let mut expected_lines = expected.split('\n');
    let mut actual_lines = actual.split('\n');
    let mut line = 1;
    loop {
        match (expected_lines.next(), actual_lines.next()) {
            (Some(e), Some(a)) if e == a => line += 1,
            _ => return line,
        }
    }
}

impl fmt::Display for OutputMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "output differs starting at line {}", self.first_differing_line)?;
        writeln!(f, "--- expected")?;
        writeln!(f, "{}", self.expected)?;
        writeln!(f, "--- actual")?;
        write!(f, "{}", self.actual)
    }
}

impl std::error::Error for OutputMismatch {}
