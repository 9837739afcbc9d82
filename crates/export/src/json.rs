use crate::error::{ErrorKind, Result};
use apkcompare_analyze::SizeRecord;
use exn::ResultExt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Serialize the records as-is; sizes stay in bytes regardless of units.
pub(crate) fn write(records: &[SizeRecord], destination: &Path) -> Result<()> {
    let file = File::create(destination).or_raise(|| ErrorKind::Io)?;
    write_to(records, BufWriter::new(file))
}

pub(crate) fn write_to<W: Write>(records: &[SizeRecord], mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, records).or_raise(|| ErrorKind::Serialize)?;
    writer.flush().or_raise(|| ErrorKind::Io)
}
