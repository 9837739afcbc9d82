//! Analysis Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// An analysis error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The path could not be opened, or is not a zip container. Fatal to the
    /// record for that archive only.
    #[display("invalid archive: {}", _0.display())]
    InvalidArchive(#[error(not(source))] PathBuf),
    /// Recompressing the archive to estimate its download size failed. Never
    /// surfaced to callers of [`analyze`](crate::analyze); the raw size is
    /// used instead.
    #[display("download size estimate degraded")]
    MeasurementDegraded,
    /// The top-level input path does not exist or cannot be listed.
    #[display("cannot read input path: {}", _0.display())]
    BatchInput(#[error(not(source))] PathBuf),
    #[display("I/O error")]
    Io,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Every file-system operation is attempted exactly once; an archive is
        // either readable or it isn't.
        false
    }
}
