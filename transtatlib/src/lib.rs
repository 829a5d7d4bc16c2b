//! # transtatlib
//!
//! A library for surveying translation completeness across distribution
//! packages, driving `apt` and `deepin-translation-utils` as external
//! commands.
//!
//! ## Overview
//!
//! Given a list of package names, a survey runs the same pipeline for each
//! one and collects the results into a single report:
//!
//! - **Resolve**: Reuse the package's source tree under the cache root, or
//!   download it with `apt source` on a miss
//! - **Measure**: Run the statistics tool over the tree, restricted to the
//!   surveyed languages when the installed tool is new enough
//! - **Filter**: Keep only the output lines mentioning a surveyed language
//!
//! A failing package is recorded in its own report entry and never stops
//! the batch.
//!
//! ## Features
//!
//! - **Directory-as-cache**: A present source tree is never re-downloaded
//! - **Capability probing**: The tool's version is queried once per run;
//!   older tools run unrestricted and only the local filter narrows output
//! - **Pluggable commands**: The fetcher and the tool are traits, so tests
//!   (and wrappers) can substitute their own programs
//!
//! ## Example
//!
//! ```rust
//! use transtatlib::{filter_lines, LanguageSet};
//!
//! let languages = LanguageSet::parse("zh_HK,zh_TW").unwrap();
//! let raw = "\
//! Translation status for dde-clipboard:
//! | po/zh_HK.po | zh_HK | 82% |
//! | po/ja.po    | ja    | 12% |
//! ";
//!
//! let kept = filter_lines(raw, &languages);
//! assert_eq!(kept, ["| po/zh_HK.po | zh_HK | 82% |"]);
//! ```

pub mod error;
pub mod filter;
pub mod report;
pub mod source;
pub mod survey;
pub mod tool;

pub use error::TranstatError;
pub use filter::{filter_lines, LanguageSet, DEFAULT_LANGUAGES};
pub use report::{PackageOutcome, PackageReport, SurveyReport};
pub use source::{find_source_dir, resolve_source, AptSource, SourceFetcher};
pub use survey::{
    load_package_list, run_survey, run_survey_with_capability, SurveyOptions, DEFAULT_SOURCE_DIR,
};
pub use tool::{
    collect_stats, parse_version, probe_capability, StatsTool, ToolCapability, TranslationUtils,
    MIN_LANG_FILTER_VERSION,
};

/// Result type for transtatlib operations
pub type Result<T> = std::result::Result<T, TranstatError>;
