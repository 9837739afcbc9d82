use crate::error::{ErrorKind, Result};
use crate::{Row, Units, headers};
use apkcompare_analyze::SizeRecord;
use exn::ResultExt;
use rust_xlsxwriter::{Workbook, Worksheet};
use std::path::Path;

/// Header row, then one row per record, on the first sheet.
pub(crate) fn write(records: &[SizeRecord], units: Units, destination: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    fill(workbook.add_worksheet(), records, units)?;
    workbook.save(destination).or_raise(|| ErrorKind::Spreadsheet)
}

/// Cell-level writes, addressed zero-based as (row, column).
trait Cells {
    fn string(&mut self, row: u32, col: u16, value: &str) -> Result<()>;
    fn number(&mut self, row: u32, col: u16, value: f64) -> Result<()>;
}
impl Cells for Worksheet {
    fn string(&mut self, row: u32, col: u16, value: &str) -> Result<()> {
        self.write_string(row, col, value).or_raise(|| ErrorKind::Spreadsheet)?;
        Ok(())
    }

    fn number(&mut self, row: u32, col: u16, value: f64) -> Result<()> {
        self.write_number(row, col, value).or_raise(|| ErrorKind::Spreadsheet)?;
        Ok(())
    }
}

fn fill<C: Cells>(cells: &mut C, records: &[SizeRecord], units: Units) -> Result<()> {
    for (col, header) in (0u16..).zip(headers()) {
        cells.string(0, col, header)?;
    }
    for (row_num, record) in (1u32..).zip(records) {
        let row = Row::new(record, units);
        cells.string(row_num, 0, row.version)?;
        cells.string(row_num, 1, row.hash)?;
        for (col, size) in (2u16..).zip(row.sizes) {
            cells.number(row_num, col, size)?;
        }
    }
    Ok(())
}
