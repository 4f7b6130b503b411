//! One execution of a program under test.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

/// Program, argument tokens and working directory for one subprocess.
///
/// Built once per invocation and never changed afterwards; the builder methods consume `self`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: PathBuf,
    args: Vec<OsString>,
    workdir: PathBuf,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>, workdir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            workdir: workdir.into(),
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn arguments(&self) -> &[OsString] {
        &self.args
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Space-joined command line, for logs and error messages only.
    pub fn command_line(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in &self.args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

/// Split an argument string into tokens on whitespace.
///
/// No quoting is recognized. Leading, trailing and repeated whitespace produce no empty tokens, so an unset
/// prefix such as an empty coverage hook simply disappears.
pub fn split_arguments(arguments: &str) -> Vec<String> {
    arguments.split_whitespace().map(str::to_string).collect()
}
