//! Spreadsheet export of an [`AlignedTable`]: dates as the index column,
//! one column per symbol, empty cells where a symbol has no price.

use std::io::Write;
use std::path::Path;

use chrono::Datelike;
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook, Worksheet};

use crate::error::Error;
use crate::table::AlignedTable;

pub const DEFAULT_EXPORT_FILE: &str = "dados_acoes.xlsx";
const INDEX_HEADER: &str = "date";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Xlsx,
    Csv,
}

impl ExportFormat {
    /// Infers the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());
        match ext.as_deref() {
            Some("xlsx") => Ok(ExportFormat::Xlsx),
            Some("csv") => Ok(ExportFormat::Csv),
            _ => Err(Error::InvalidInput(format!(
                "unsupported export file '{}': expected .xlsx or .csv",
                path.display()
            ))),
        }
    }
}

/// Writes the table to `path`, choosing the format from its extension.
pub fn export(table: &AlignedTable, path: &Path) -> Result<ExportFormat, Error> {
    let format = ExportFormat::from_path(path)?;
    match format {
        ExportFormat::Xlsx => write_xlsx(table, path)?,
        ExportFormat::Csv => {
            let file = std::fs::File::create(path)?;
            write_csv(table, file)?;
        }
    }
    tracing::info!("Exported {} rows to {}", table.len(), path.display());
    Ok(format)
}

pub fn write_xlsx(table: &AlignedTable, path: &Path) -> Result<(), Error> {
    let mut workbook = build_workbook(table)?;
    workbook.save(path)?;
    Ok(())
}

/// Encodes the workbook in memory.
pub fn xlsx_bytes(table: &AlignedTable) -> Result<Vec<u8>, Error> {
    let mut workbook = build_workbook(table)?;
    Ok(workbook.save_to_buffer()?)
}

fn build_workbook(table: &AlignedTable) -> Result<Workbook, Error> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    fill_worksheet(worksheet, table)?;
    Ok(workbook)
}

fn fill_worksheet(worksheet: &mut Worksheet, table: &AlignedTable) -> Result<(), Error> {
    let header = Format::new().set_bold();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");

    worksheet.write_string_with_format(0, 0, INDEX_HEADER, &header)?;
    worksheet.set_column_width(0, 12)?;
    for (idx, column) in table.columns().iter().enumerate() {
        worksheet.write_string_with_format(0, col_num(idx + 1)?, column, &header)?;
    }

    for (r, row) in table.rows().iter().enumerate() {
        let xl_row = u32::try_from(r + 1)
            .map_err(|_| Error::InvalidInput("too many rows for a worksheet".to_string()))?;
        let date = ExcelDateTime::from_ymd(
            row.date.year() as u16,
            row.date.month() as u8,
            row.date.day() as u8,
        )?;
        worksheet.write_datetime_with_format(xl_row, 0, &date, &date_format)?;
        for (idx, value) in row.values.iter().enumerate() {
            match value {
                Some(v) if v.is_finite() => {
                    worksheet.write_number(xl_row, col_num(idx + 1)?, *v)?;
                }
                Some(_) => {
                    worksheet.write_string(xl_row, col_num(idx + 1)?, "NaN")?;
                }
                None => {}
            }
        }
    }
    Ok(())
}

fn col_num(idx: usize) -> Result<u16, Error> {
    u16::try_from(idx).map_err(|_| Error::InvalidInput("too many columns for a worksheet".to_string()))
}

/// Writes the table as CSV: a `date` column followed by one column per symbol.
pub fn write_csv<W: Write>(table: &AlignedTable, writer: W) -> Result<(), Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    let mut header = Vec::with_capacity(table.columns().len() + 1);
    header.push(INDEX_HEADER.to_string());
    header.extend(table.columns().iter().cloned());
    wtr.write_record(&header)?;

    for row in table.rows() {
        let mut record = Vec::with_capacity(row.values.len() + 1);
        record.push(row.date.format("%Y-%m-%d").to_string());
        record.extend(
            row.values
                .iter()
                .map(|v| v.map(|v| v.to_string()).unwrap_or_default()),
        );
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}
