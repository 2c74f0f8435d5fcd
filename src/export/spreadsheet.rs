//! Spreadsheet serialization.

use crate::error::{GridsheetError, Result};
use crate::flatten::FlatTable;
use rust_xlsxwriter::{Format, Workbook, Worksheet};

/// Name of the single worksheet.
pub const SHEET_NAME: &str = "Sheet1";

/// Number format applied to the `time` column.
pub const DATETIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// Rows per worksheet in the xlsx format, header included.
pub const MAX_ROWS: usize = 1_048_576;

/// Encode a table as an xlsx workbook.
///
/// The first row holds the column names. Non-finite measurements are left
/// as empty cells.
pub fn to_xlsx(table: &FlatTable) -> Result<Vec<u8>> {
    let total = table.len() + 1;
    if total > MAX_ROWS {
        return Err(GridsheetError::TooManyRows {
            rows: total,
            limit: MAX_ROWS,
        });
    }

    let header = Format::new().set_bold();
    let datetime = Format::new().set_num_format(DATETIME_FORMAT);

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, name) in table.columns().iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *name, &header)?;
    }
    worksheet.set_column_width(0, 20.0)?;

    for (i, row) in table.rows().iter().enumerate() {
        let r = (i + 1) as u32;
        worksheet.write_datetime_with_format(r, 0, &row.time, &datetime)?;
        worksheet.write_number(r, 1, f64::from(row.hour))?;
        write_finite(worksheet, r, 2, row.latitude)?;
        write_finite(worksheet, r, 3, row.longitude)?;
        for (k, &value) in row.values.iter().enumerate() {
            write_finite(worksheet, r, (4 + k) as u16, value)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn write_finite(worksheet: &mut Worksheet, row: u32, col: u16, value: f64) -> Result<()> {
    if value.is_finite() {
        worksheet.write_number(row, col, value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::GriddedDataset;
    use crate::error::FailureKind;
    use crate::flatten::flatten;
    use crate::select::Selection;
    use chrono::NaiveDate;

    fn table(nx: usize) -> FlatTable {
        let t0 = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let ds = GriddedDataset::new("big.nc", vec![t0], vec![0.0; 1024], vec![0.0; nx])
            .with_variable("sst", vec![1.0; 1024 * nx])
            .unwrap();
        flatten(&ds, &Selection::Single("sst".into())).unwrap()
    }

    #[test]
    fn table_over_sheet_limit_is_rejected() {
        let err = to_xlsx(&table(1024)).unwrap_err();
        assert!(matches!(
            err,
            GridsheetError::TooManyRows {
                rows: 1_048_577,
                limit: MAX_ROWS
            }
        ));
        assert_eq!(err.kind(), FailureKind::ShapeFailure);
    }

    #[test]
    fn small_table_encodes() {
        let bytes = to_xlsx(&table(2)).unwrap();
        // xlsx files are zip containers.
        assert_eq!(&bytes[..2], b"PK");
    }
}
