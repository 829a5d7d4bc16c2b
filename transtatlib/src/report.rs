//! Survey results and their rendered form.
//!
//! A [`SurveyReport`] holds one entry per input package, in input order.
//! The text rendering is a sequence of blocks: the package name as a header,
//! a blank line, then either the filtered statistics lines verbatim or a
//! single `error:` line, then a trailing blank line.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What processing one package produced: the filtered statistics lines, or
/// the text of the failure that stopped the pipeline for that package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageOutcome {
    /// Filtered statistics lines, possibly empty
    Lines(Vec<String>),
    /// Human-readable failure description
    Failed(String),
}

impl PackageOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, PackageOutcome::Failed(_))
    }
}

/// Outcome for a single package entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageReport {
    /// Package name exactly as listed in the input
    pub package: String,
    pub outcome: PackageOutcome,
}

/// The whole survey: one entry per surveyed package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyReport {
    pub entries: Vec<PackageReport>,
}

impl SurveyReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: PackageReport) {
        self.entries.push(entry);
    }

    /// Number of packages whose processing failed.
    pub fn failure_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.outcome.is_failure())
            .count()
    }
}

impl fmt::Display for SurveyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{}:", entry.package)?;
            writeln!(f)?;

            match &entry.outcome {
                PackageOutcome::Lines(lines) => {
                    for line in lines {
                        writeln!(f, "{line}")?;
                    }
                }
                PackageOutcome::Failed(message) => {
                    writeln!(f, "error: {message}")?;
                }
            }

            writeln!(f)?;
        }

        Ok(())
    }
}
