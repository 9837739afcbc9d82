use crate::error::{Error, ErrorKind};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Output format of a report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// A spreadsheet with one row per archive.
    #[default]
    Xlsx,
    /// The records themselves, sizes always in bytes.
    Json,
}
impl Format {
    /// File extension, without the dot.
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Xlsx => "xlsx",
            Format::Json => "json",
        }
    }
}
impl Display for Format {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.extension())
    }
}
impl FromStr for Format {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "xlsx" | "excel" => Ok(Format::Xlsx),
            "json" => Ok(Format::Json),
            _ => exn::bail!(ErrorKind::UnsupportedFormat(s.to_string())),
        }
    }
}

const MEBIBYTE: f64 = 1024.0 * 1024.0;

/// Unit that sizes are reported in by tabular formats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Units {
    #[default]
    Bytes,
    /// Binary megabytes, `bytes / 1024 / 1024`.
    Megabytes,
}
impl Units {
    #[must_use]
    pub fn from_readable(readable: bool) -> Self {
        if readable { Units::Megabytes } else { Units::Bytes }
    }

    #[must_use]
    pub fn convert(&self, bytes: u64) -> f64 {
        match self {
            Units::Bytes => bytes as f64,
            Units::Megabytes => bytes as f64 / MEBIBYTE,
        }
    }
}
