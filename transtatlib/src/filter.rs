//! Language selection and line-level filtering of statistics output.
//!
//! The statistics tool prints one table row per translation catalog. Rows
//! that mention any of the surveyed language codes are kept verbatim;
//! everything else (headers, separators, other languages) is dropped.

use std::fmt;
use std::str::FromStr;

use crate::error::TranstatError;
use crate::Result;

/// Default language codes surveyed when none are given.
pub const DEFAULT_LANGUAGES: &str = "zh_HK,zh_TW";

/// An ordered, non-empty set of language codes used as filter criteria.
///
/// Construction validates that at least one code survives trimming, so the
/// line filter never runs with nothing to match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageSet {
    codes: Vec<String>,
}

impl LanguageSet {
    /// Build a set from pre-split codes.
    ///
    /// Each code is trimmed and empty entries are dropped; fails with
    /// [`TranstatError::EmptyLanguages`] if nothing remains.
    pub fn new(codes: Vec<String>) -> Result<Self> {
        let codes: Vec<String> = codes
            .into_iter()
            .map(|code| code.trim().to_string())
            .filter(|code| !code.is_empty())
            .collect();

        if codes.is_empty() {
            return Err(TranstatError::EmptyLanguages);
        }

        Ok(Self { codes })
    }

    /// Parse a comma-separated code list, e.g. `"zh_HK,zh_TW"`.
    pub fn parse(input: &str) -> Result<Self> {
        Self::new(input.split(',').map(str::to_string).collect())
    }

    /// The codes in their original order.
    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    /// Comma-joined form, as passed to the tool's restriction argument.
    pub fn to_arg(&self) -> String {
        self.codes.join(",")
    }
}

impl Default for LanguageSet {
    fn default() -> Self {
        Self {
            codes: vec!["zh_HK".to_string(), "zh_TW".to_string()],
        }
    }
}

impl FromStr for LanguageSet {
    type Err = TranstatError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for LanguageSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_arg())
    }
}

/// Keep only the lines of `text` that mention at least one surveyed code.
///
/// Matching is plain substring search, and kept lines are returned verbatim
/// in their original order. An empty result is a valid outcome (the package
/// simply has no catalogs for the surveyed languages), not an error.
pub fn filter_lines(text: &str, languages: &LanguageSet) -> Vec<String> {
    text.lines()
        .filter(|line| {
            languages
                .codes()
                .iter()
                .any(|code| line.contains(code.as_str()))
        })
        .map(str::to_string)
        .collect()
}
