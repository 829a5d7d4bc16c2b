//! The external statistics tool: capability probing and invocation.
//!
//! `deepin-translation-utils` grew a `-l` argument in 0.4.0 that restricts
//! statistics to the requested languages, saving tool-side work on large
//! trees. The probe asks the installed tool for its version once per run and
//! the answer travels as a plain value from there; a probe that fails in any
//! way just means the tool runs unrestricted and the local line filter does
//! all the narrowing.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use regex::Regex;

use crate::error::TranstatError;
use crate::filter::LanguageSet;
use crate::Result;

/// Minimum tool version whose `-l` restriction argument is usable.
pub const MIN_LANG_FILTER_VERSION: (u64, u64, u64) = (0, 4, 0);

/// Runs the statistics tool: a version query plus per-tree stats runs.
pub trait StatsTool {
    /// Ask the tool for its version string.
    fn query_version(&self) -> io::Result<Output>;

    /// Run statistics over `source`, optionally restricted to `languages`.
    fn run_stats(&self, source: &Path, restrict: Option<&LanguageSet>) -> io::Result<Output>;
}

/// The production statistics tool, `deepin-translation-utils`.
#[derive(Debug, Clone)]
pub struct TranslationUtils {
    program: PathBuf,
}

impl TranslationUtils {
    /// The standard tool, found via `PATH`.
    pub fn new() -> Self {
        Self {
            program: PathBuf::from("deepin-translation-utils"),
        }
    }

    /// Use a different program (a wrapper, or a stub in tests).
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for TranslationUtils {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsTool for TranslationUtils {
    fn query_version(&self) -> io::Result<Output> {
        Command::new(&self.program).arg("-V").output()
    }

    fn run_stats(&self, source: &Path, restrict: Option<&LanguageSet>) -> io::Result<Output> {
        let mut cmd = Command::new(&self.program);
        cmd.arg("stats").arg(source);
        if let Some(languages) = restrict {
            cmd.arg("-l").arg(languages.to_arg());
        }
        cmd.output()
    }
}

/// What the installed statistics tool can do, decided once per run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToolCapability {
    /// Whether `-l <codes>` may be passed to restrict tool-side work
    pub lang_filter: bool,
}

/// Extract the first `major.minor.patch` triple from a version string.
///
/// The tool reports itself as e.g. `deepin-translation-utils 0.4.0-0-g08b7ee6`;
/// only the numeric triple matters for the capability gate, so the packaging
/// revision and git suffix are ignored.
pub fn parse_version(text: &str) -> Option<(u64, u64, u64)> {
    let re = Regex::new(r"(\d+)\.(\d+)\.(\d+)").ok()?;
    let caps = re.captures(text)?;

    let major = caps[1].parse().ok()?;
    let minor = caps[2].parse().ok()?;
    let patch = caps[3].parse().ok()?;
    Some((major, minor, patch))
}

/// Determine [`ToolCapability`] by asking the tool for its version.
///
/// Never fails: a tool that cannot be launched, exits unsuccessfully, or
/// reports something unparseable yields the degraded capability.
pub fn probe_capability(tool: &dyn StatsTool) -> ToolCapability {
    let lang_filter = match tool.query_version() {
        Ok(output) if output.status.success() => {
            let stdout = String::from_utf8_lossy(&output.stdout);
            parse_version(&stdout).is_some_and(|version| version >= MIN_LANG_FILTER_VERSION)
        }
        _ => false,
    };

    ToolCapability { lang_filter }
}

/// Collect raw statistics output for one source tree.
///
/// With the restriction capability the language set travels to the tool via
/// `-l`; without it the tool runs unrestricted and the caller's line filter
/// does all the narrowing. Stdout is returned as-is on success.
pub fn collect_stats(
    tool: &dyn StatsTool,
    source: &Path,
    languages: &LanguageSet,
    capability: ToolCapability,
) -> Result<String> {
    let restrict = capability.lang_filter.then_some(languages);

    let output = tool
        .run_stats(source, restrict)
        .map_err(|e| TranstatError::Stats {
            path: source.to_path_buf(),
            message: format!("failed to launch statistics tool: {e}"),
        })?;

    if !output.status.success() {
        let detail = diagnostic(&output);
        let message = match output.status.code() {
            Some(code) => format!("exited with status {code}: {detail}"),
            None => format!("terminated by signal: {detail}"),
        };
        return Err(TranstatError::Stats {
            path: source.to_path_buf(),
            message,
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Best human-readable failure text from a finished command: stderr when
/// present, stdout otherwise.
pub(crate) fn diagnostic(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let text = stderr.trim();
    if !text.is_empty() {
        return text.to_string();
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let text = stdout.trim();
    if !text.is_empty() {
        return text.to_string();
    }

    "(no diagnostic output)".to_string()
}
