//! Error types for transtatlib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during a translation survey
#[derive(Error, Debug)]
pub enum TranstatError {
    /// Source acquisition failed: the fetch command could not be launched,
    /// exited unsuccessfully, or left no source tree behind
    #[error("failed to fetch source for '{package}': {message}")]
    Fetch { package: String, message: String },

    /// The statistics tool could not be launched or exited unsuccessfully
    #[error("statistics tool failed on '{path}': {message}")]
    Stats { path: PathBuf, message: String },

    /// The language set was empty after trimming
    #[error("language set is empty")]
    EmptyLanguages,

    /// Failed to read the package list file
    #[error("failed to read package list '{path}': {source}")]
    PackageList {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to create the source cache directory
    #[error("failed to create source directory '{path}': {source}")]
    SourceRoot {
        path: PathBuf,
        source: std::io::Error,
    },
}
