//! Batch orchestration: one survey pass over a package list.
//!
//! The pipeline per package is resolve source, collect statistics, filter
//! lines. Packages are processed sequentially in list order and a failure is
//! recorded in that package's entry without stopping the batch; one broken
//! package must not hide the results of twenty good ones.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::TranstatError;
use crate::filter::{filter_lines, LanguageSet};
use crate::report::{PackageOutcome, PackageReport, SurveyReport};
use crate::source::{resolve_source, SourceFetcher};
use crate::tool::{collect_stats, probe_capability, StatsTool, ToolCapability};
use crate::Result;

/// Default source cache root, relative to the working directory.
pub const DEFAULT_SOURCE_DIR: &str = "pkg-sources";

/// Options for a survey run.
#[derive(Debug, Clone)]
pub struct SurveyOptions {
    /// Root directory under which source trees are cached
    pub source_dir: PathBuf,
    /// Languages whose statistics lines are kept
    pub languages: LanguageSet,
}

impl SurveyOptions {
    /// Options with the default source root and language pair.
    pub fn new() -> Self {
        Self {
            source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
            languages: LanguageSet::default(),
        }
    }

    /// Set the source cache root.
    pub fn source_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source_dir = dir.into();
        self
    }

    /// Set the surveyed languages.
    pub fn languages(mut self, languages: LanguageSet) -> Self {
        self.languages = languages;
        self
    }
}

impl Default for SurveyOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Read a package list file: one name per line.
///
/// Lines are trimmed; blank lines and `#` comment lines are skipped. The
/// remaining names are returned in file order, duplicates included.
pub fn load_package_list(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| TranstatError::PackageList {
        path: path.to_path_buf(),
        source: e,
    })?;

    let packages = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect();

    Ok(packages)
}

/// Run a survey, probing the tool's capability first.
///
/// Equivalent to [`probe_capability`] followed by
/// [`run_survey_with_capability`]; the probe runs exactly once no matter how
/// many packages are listed.
pub fn run_survey(
    packages: &[String],
    options: &SurveyOptions,
    fetcher: &dyn SourceFetcher,
    tool: &dyn StatsTool,
) -> Result<SurveyReport> {
    run_survey_with_capability(packages, options, fetcher, tool, probe_capability(tool))
}

/// Run a survey with an already-probed capability.
///
/// The source root is created up front; failure to do so aborts the run,
/// since no package could be processed without it. Everything after that is
/// isolated per package: an error becomes that entry's failure outcome and
/// the loop moves on.
pub fn run_survey_with_capability(
    packages: &[String],
    options: &SurveyOptions,
    fetcher: &dyn SourceFetcher,
    tool: &dyn StatsTool,
    capability: ToolCapability,
) -> Result<SurveyReport> {
    fs::create_dir_all(&options.source_dir).map_err(|e| TranstatError::SourceRoot {
        path: options.source_dir.clone(),
        source: e,
    })?;

    let mut report = SurveyReport::new();

    for package in packages {
        let outcome = match process_package(package, options, fetcher, tool, capability) {
            Ok(lines) => PackageOutcome::Lines(lines),
            Err(e) => PackageOutcome::Failed(e.to_string()),
        };

        report.push(PackageReport {
            package: package.clone(),
            outcome,
        });
    }

    Ok(report)
}

/// One package's pipeline: source resolution, stats collection, line filter.
fn process_package(
    package: &str,
    options: &SurveyOptions,
    fetcher: &dyn SourceFetcher,
    tool: &dyn StatsTool,
    capability: ToolCapability,
) -> Result<Vec<String>> {
    let source = resolve_source(package, &options.source_dir, fetcher)?;
    let raw = collect_stats(tool, &source, &options.languages, capability)?;
    Ok(filter_lines(&raw, &options.languages))
}
