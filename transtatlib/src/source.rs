//! Source tree acquisition and the on-disk cache.
//!
//! A package's unpacked source lives in a directory under the survey's
//! source root. Presence of a matching directory *is* the cache: resolution
//! returns it without touching the network. On a miss the fetch command runs
//! once (from inside the root, so the archive tool unpacks in place) and the
//! root is scanned again.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use crate::error::TranstatError;
use crate::tool::diagnostic;
use crate::Result;

/// Downloads a package's source tree into a target directory.
///
/// `fetch` returns the finished process output. An `Err` means the command
/// could not be launched at all, which callers report differently from an
/// unsuccessful exit.
pub trait SourceFetcher {
    fn fetch(&self, package: &str, root: &Path) -> io::Result<Output>;
}

/// Fetches sources with `<program> source <package>`, apt style.
#[derive(Debug, Clone)]
pub struct AptSource {
    program: PathBuf,
}

impl AptSource {
    /// The standard fetcher, invoking `apt`.
    pub fn new() -> Self {
        Self {
            program: PathBuf::from("apt"),
        }
    }

    /// Use a different fetch program (an apt wrapper, or a stub in tests).
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for AptSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceFetcher for AptSource {
    fn fetch(&self, package: &str, root: &Path) -> io::Result<Output> {
        Command::new(&self.program)
            .arg("source")
            .arg(package)
            .current_dir(root)
            .output()
    }
}

/// Check if a directory name plausibly holds `package`'s unpacked tree.
///
/// Matches the exact package name, or the package name followed by a
/// version-style separator (`apt source` unpacks into `<name>-<version>/`).
fn matches_package(name: &str, package: &str) -> bool {
    match name.strip_prefix(package) {
        Some("") => true,
        Some(rest) => matches!(rest.chars().next(), Some('-' | '_' | '.')),
        None => false,
    }
}

/// Find the cached source directory for `package` under `root`, if any.
///
/// Only directories count; the `.dsc` and tarball artifacts the fetch leaves
/// beside the tree are ignored. When several versions sit side by side the
/// lexicographically first name wins, keeping resolution deterministic.
pub fn find_source_dir(root: &Path, package: &str) -> io::Result<Option<PathBuf>> {
    let mut candidates = Vec::new();

    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }

        let file_name = entry.file_name();
        let name = match file_name.to_str() {
            Some(name) => name,
            None => continue,
        };

        if matches_package(name, package) {
            candidates.push(entry.path());
        }
    }

    candidates.sort();
    Ok(candidates.into_iter().next())
}

/// Resolve the source tree for `package`, fetching on a cache miss.
///
/// A pre-existing matching directory short-circuits the fetch entirely.
/// Otherwise the fetcher runs once; a launch failure, an unsuccessful exit,
/// or a still-missing tree afterwards all surface as
/// [`TranstatError::Fetch`]. The root directory must already exist.
pub fn resolve_source(package: &str, root: &Path, fetcher: &dyn SourceFetcher) -> Result<PathBuf> {
    let scan_error = |e: io::Error| TranstatError::Fetch {
        package: package.to_string(),
        message: format!("failed to scan '{}': {e}", root.display()),
    };

    if let Some(existing) = find_source_dir(root, package).map_err(scan_error)? {
        return Ok(existing);
    }

    let output = fetcher
        .fetch(package, root)
        .map_err(|e| TranstatError::Fetch {
            package: package.to_string(),
            message: format!("failed to launch fetch command: {e}"),
        })?;

    if !output.status.success() {
        return Err(TranstatError::Fetch {
            package: package.to_string(),
            message: format!("fetch command failed: {}", diagnostic(&output)),
        });
    }

    match find_source_dir(root, package).map_err(scan_error)? {
        Some(path) => Ok(path),
        None => Err(TranstatError::Fetch {
            package: package.to_string(),
            message: "fetch succeeded but no source directory appeared".to_string(),
        }),
    }
}
