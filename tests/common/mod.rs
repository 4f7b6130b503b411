//! Shared fixtures for integration tests: a scriptable stand-in for a `runtest.py`-style runner.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use cmdharness::scenario::RUNTEST_USAGE;

/// Write a POSIX shell runner into `dir` that prints `help` for `--help`, succeeds on `-n -a`, and fails on
/// anything else. Returns the script path.
pub fn write_runner(dir: &Path, help: &str) -> PathBuf {
    let script = format!(
        "case \"$1\" in\n  \
         --help)\n    cat <<'USAGE'\n{help}USAGE\n    ;;\n  \
         -n)\n    [ \"$2\" = \"-a\" ] || exit 1\n    exit 0\n    ;;\n  \
         *)\n    echo \"unexpected arguments: $*\" >&2\n    exit 1\n    ;;\nesac\n"
    );
    let path = dir.join("runtest.sh");
    fs::write(&path, script).unwrap();
    path
}

/// Runner whose help text is the lowercase usage block.
pub fn write_standard_runner(dir: &Path) -> PathBuf {
    write_runner(dir, RUNTEST_USAGE)
}

/// Scratch layout: `<root>/bin` for the runner, `<root>/work` as the harness working root.
pub struct Sandbox {
    pub root: tempfile::TempDir,
    pub bin: PathBuf,
    pub work: PathBuf,
}

impl Sandbox {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        let bin = root.path().join("bin");
        let work = root.path().join("work");
        fs::create_dir_all(&bin).unwrap();
        fs::create_dir_all(&work).unwrap();
        Self { root, bin, work }
    }
}
