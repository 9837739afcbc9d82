//! Reports for APK size breakdowns.
//!
//! Takes the ordered [`SizeRecord`]s produced by `apkcompare-analyze` and
//! writes them out as either a spreadsheet (one row per archive, sizes in the
//! requested [`Units`]) or JSON (the records themselves, sizes in bytes).

pub mod error;
mod format;
mod json;
mod row;
mod xlsx;

use crate::error::Result;
pub use crate::format::{Format, Units};
pub use crate::row::{Row, headers, version_label};
use apkcompare_analyze::SizeRecord;
use std::path::Path;
use tracing::instrument;

/// Write `records` to `destination` in the given format, replacing any
/// existing file. `units` only applies to tabular formats.
#[instrument(skip_all, fields(%format, ?units, records = records.len(), destination = %destination.as_ref().display()))]
pub fn export(records: &[SizeRecord], format: Format, units: Units, destination: impl AsRef<Path>) -> Result<()> {
    let destination = destination.as_ref();
    match format {
        Format::Xlsx => xlsx::write(records, units, destination)?,
        Format::Json => json::write(records, destination)?,
    }
    tracing::debug!("Report written");
    Ok(())
}
