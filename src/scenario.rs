//! Self-check scenario for a `runtest.py`-style test runner
//!
//! The runner under test is a black box. This scenario only checks its observable contract:
//! - `--help` prints [`RUNTEST_USAGE`] (headings capitalized on Darwin) and exits 0,
//! - `-n -a` walks every test without executing any and exits 0,
//! - the harness's own placeholder-artifact helpers produce files that exist.

use std::fmt;
use std::path::{Path, PathBuf};

use cmdharness_core::{ArtifactKind, ExpectedOutput, Platform};

use crate::error::HarnessResult;
use crate::executor::Executor;
use crate::harness::{RunExpectation, TestHarness};
use crate::invocation::{Invocation, split_arguments};

/// Working subdirectory used by the scenario.
pub const SCENARIO_DIR: &str = "runtest/";

/// Stem of the placeholder artifacts the scenario creates.
pub const ARTIFACT_STEM: &str = "fake1";

/// Help text the runner prints for `--help`, in its lowercase-heading form.
pub const RUNTEST_USAGE: &str = "\
usage: runtest.py [options]

options:
  -a, --all             Run all tests; does a virtual 'find' for all tests
                        under the current directory.
  -d, --debug           Runs the script under the Python debugger (pdb.py) so
                        you don't have to muck with PYTHONPATH yourself.
  -f FILE, --file=FILE  Only execute the tests listed in the specified FILE.
  --ignore-no-result    Don't return 2 on tests with no result.
  -q, --quiet           By default, runtest.py prints the command line it will
                        execute before executing it.  This suppresses that
                        print.
  -t, --time            Print the execution time of each test.
  -l, --list            List available tests and exit.
  -n, --no-exec         No execute, just print command lines.
  -P PYTHON             Use the specified PYTHON interpreter.
  --verbose=LEVEL       Set verbose level: 1 = print executed commands. 2 =
                        print commands and non-zero output. 3 = print commands
                        and all output.
  --passed              In the final summary, also report which tests passed.
                        The default is to only report tests which failed or
                        returned NO RESULT.
  -h, --help            show this help message and exit
";

/// Expected `--help` output on `platform`.
pub fn expected_help(platform: Platform) -> ExpectedOutput {
    ExpectedOutput::literal(RUNTEST_USAGE).for_platform(platform)
}

/// How to reach the runner: an optional coverage prefix followed by the runner script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerCommand {
    coverage_hook: String,
    runner: PathBuf,
}

impl RunnerCommand {
    pub fn new(coverage_hook: impl Into<String>, runner: impl Into<PathBuf>) -> Self {
        Self {
            coverage_hook: coverage_hook.into(),
            runner: runner.into(),
        }
    }

    pub fn runner(&self) -> &Path {
        &self.runner
    }

    /// Invocation `<program> <hook...> <runner> <flags...>` on `harness`.
    ///
    /// The hook and the flags are split on whitespace; the runner path is always passed as one argument, so
    /// it may contain spaces. An empty hook adds nothing.
    pub fn invocation<E: Executor>(&self, harness: &TestHarness<E>, flags: &str) -> Invocation {
        harness
            .invocation("")
            .args(split_arguments(&self.coverage_hook))
            .arg(&self.runner)
            .args(split_arguments(flags))
    }
}

impl fmt::Display for RunnerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in split_arguments(&self.coverage_hook) {
            write!(f, "{} ", token)?;
        }
        write!(f, "{}", self.runner.display())
    }
}

/// Relative path of the placeholder artifact of `kind`, e.g. `runtest/fake1.cer`.
pub fn artifact_path(kind: ArtifactKind) -> String {
    format!("{}{}.{}", SCENARIO_DIR, ARTIFACT_STEM, kind.extension())
}

/// Run the whole self-check against `runner`, stopping at the first failure.
pub fn run_self_check<E: Executor>(harness: &TestHarness<E>, runner: &RunnerCommand) -> HarnessResult<()> {
    tracing::info!(runner = %runner, platform = %harness.platform(), "starting runner self-check");

    harness.subdir(SCENARIO_DIR)?;

    let help = RunExpectation::success().stdout(harness.expected(RUNTEST_USAGE));
    harness.run_invocation(&runner.invocation(harness, "--help"), &help)?;

    harness.run_invocation(&runner.invocation(harness, "-n -a"), &RunExpectation::success())?;

    for kind in ArtifactKind::ALL {
        let path = artifact_path(kind);
        harness.fake_artifact(kind, &path)?;
        harness.must_exist(&path)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_lists_every_flag() {
        for flag in [
            "-a, --all",
            "-d, --debug",
            "-f FILE, --file=FILE",
            "--ignore-no-result",
            "-q, --quiet",
            "-t, --time",
            "-l, --list",
            "-n, --no-exec",
            "-P PYTHON",
            "--verbose=LEVEL",
            "--passed",
            "-h, --help",
        ] {
            assert!(RUNTEST_USAGE.contains(flag), "usage is missing {flag}");
        }
    }

    #[test]
    fn test_expected_help_per_platform() {
        assert!(expected_help(Platform::Darwin).as_str().starts_with("Usage: runtest.py [options]\n\nOptions:\n"));
        assert_eq!(expected_help(Platform::Linux).as_str(), RUNTEST_USAGE);
    }

    #[test]
    fn test_invocation_with_and_without_hook() {
        let harness = TestHarness::configure("python", "/work");

        let plain = RunnerCommand::new("", "/src/bin/runtest.py");
        assert_eq!(plain.invocation(&harness, "--help").command_line(), "python /src/bin/runtest.py --help");
        assert_eq!(plain.to_string(), "/src/bin/runtest.py");

        let hooked = RunnerCommand::new("coverage run", "/src/bin/runtest.py");
        assert_eq!(
            hooked.invocation(&harness, "-n -a").command_line(),
            "python coverage run /src/bin/runtest.py -n -a"
        );
        assert_eq!(hooked.to_string(), "coverage run /src/bin/runtest.py");
    }

    #[test]
    fn test_runner_path_with_space_stays_one_argument() {
        let harness = TestHarness::configure("python", "/work");
        let runner = RunnerCommand::new("-e", "/home/me/my tools/runtest.py");

        let invocation = runner.invocation(&harness, "-n -a");
        let args: Vec<_> = invocation.arguments().iter().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(args, vec!["-e", "/home/me/my tools/runtest.py", "-n", "-a"]);
        assert_eq!(invocation.workdir(), Path::new("/work"));
    }

    #[test]
    fn test_artifact_paths() {
        assert_eq!(artifact_path(ArtifactKind::Certificate), "runtest/fake1.cer");
        assert_eq!(artifact_path(ArtifactKind::PrivateKey), "runtest/fake1.pvk");
        assert_eq!(artifact_path(ArtifactKind::PackageExchange), "runtest/fake1.pfx");
    }
}
