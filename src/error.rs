//! Top-level Error Types

use derive_more::{Display, Error};
use std::path::PathBuf;

pub type Error = exn::Exn<ErrorKind>;
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[display("could not load configuration")]
    Config,
    #[display("could not analyze input")]
    Analyze,
    /// Analysis ran, but not a single archive produced a record.
    #[display("no archives analyzed in {}", _0.display())]
    NothingAnalyzed(#[error(not(source))] PathBuf),
    #[display("could not write report")]
    Export,
}
