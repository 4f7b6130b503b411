//! Host platform vocabulary and platform-conditional text adjustment.
//!
//! Some runners print their help banner through an option parser whose headings are capitalized on macOS
//! (`Usage:` / `Options:`) and lowercase elsewhere. Expected text is written once in the lowercase form and
//! rewritten here, exactly once, before it is compared.

use std::fmt;

/// Platform family the harness is running on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// macOS and other Darwin-derived systems.
    Darwin,
    Linux,
    Windows,
    Other,
}

/// Heading substitutions applied on [`Platform::Darwin`], in order.
const DARWIN_HEADINGS: &[(&str, &str)] = &[("usage:", "Usage:"), ("options:", "Options:")];

impl Platform {
    /// Platform the current binary was compiled for.
    pub const fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::Darwin
        } else if cfg!(target_os = "linux") {
            Platform::Linux
        } else if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Other
        }
    }

    /// Short lowercase name, matching the conventional `sys.platform`-style spelling.
    pub const fn as_str(self) -> &'static str {
        match self {
            Platform::Darwin => "darwin",
            Platform::Linux => "linux",
            Platform::Windows => "win32",
            Platform::Other => "other",
        }
    }

    /// Whether help headings are capitalized on this platform.
    pub const fn capitalizes_help_headings(self) -> bool {
        matches!(self, Platform::Darwin)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rewrite `text` for `platform`.
///
/// On Darwin every `usage:` becomes `Usage:` and every `options:` becomes `Options:`. On every other platform the
/// text is returned unchanged.
pub fn adjust_for_platform(text: &str, platform: Platform) -> String {
    if !platform.capitalizes_help_headings() {
        return text.to_string();
    }
    DARWIN_HEADINGS
        .iter()
        .fold(text.to_string(), |acc, (from, to)| acc.replace(from, to))
}
