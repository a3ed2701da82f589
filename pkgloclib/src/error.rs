//! Error types for pkgloclib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while gathering package statistics.
///
/// Most pipeline stages deliberately swallow their own failures and degrade
/// to zero counts; these variants cover the few places where the caller can
/// still act on an error (a bad working directory, a corrupt archive
/// header) before the best-effort policy takes over.
#[derive(Error, Debug)]
pub enum PkglocError {
    /// Path does not exist
    #[error("path does not exist: {0}")]
    PathNotFound(PathBuf),

    /// Archive could not be opened at all (corrupt or unrecognized header)
    #[error("failed to read archive '{path}': {message}")]
    Archive { path: PathBuf, message: String },

    /// Package container could not be opened
    #[error("failed to open package '{path}': {message}")]
    Package { path: PathBuf, message: String },

    /// Patch document could not be parsed
    #[error("failed to parse patch '{path}': {message}")]
    Patch { path: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
