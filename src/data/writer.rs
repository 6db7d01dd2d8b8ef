use std::path::Path;

use anyhow::{anyhow, Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};

use super::error::LoadError;
use super::model::{CellValue, Table};

/// MIME type to use when serving an exported workbook over HTTP.
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const CSV_MIME: &str = "text/csv";

/// Name of the single worksheet in exported workbooks.
pub const SHEET_NAME: &str = "pins";

// ---------------------------------------------------------------------------
// XLSX
// ---------------------------------------------------------------------------

/// Serialize the table to an `.xlsx` workbook.
///
/// One sheet named `pins`: a header row in canonical column order followed by
/// one row per record in table order. No index column.
pub fn to_xlsx(table: &Table) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_NAME)?;
        fill_worksheet(worksheet, table).context("writing worksheet cells")?;
    }
    let buffer = workbook.save_to_buffer().context("encoding workbook")?;
    Ok(buffer)
}

fn fill_worksheet(worksheet: &mut Worksheet, table: &Table) -> Result<(), XlsxError> {
    for (col, name) in table.columns().iter().enumerate() {
        worksheet.write_string(0, col as u16, *name)?;
    }
    for (i, record) in table.records.iter().enumerate() {
        let row = (i + 1) as u32;
        for (col, cell) in table.cells(record).iter().enumerate() {
            write_cell(worksheet, row, col as u16, cell)?;
        }
    }
    Ok(())
}

fn write_cell(ws: &mut Worksheet, row: u32, col: u16, cell: &CellValue) -> Result<(), XlsxError> {
    match cell {
        CellValue::String(s) | CellValue::Date(s) => {
            if !s.is_empty() {
                ws.write_string(row, col, s.as_str())?;
            }
        }
        CellValue::Integer(i) => {
            ws.write_number(row, col, *i as f64)?;
        }
        CellValue::Float(v) => {
            ws.write_number(row, col, *v)?;
        }
        CellValue::Bool(b) => {
            ws.write_boolean(row, col, *b)?;
        }
        CellValue::Null => {}
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// Serialize the table to CSV with the same layout as [`to_xlsx`].
pub fn to_csv(table: &Table) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(table.columns())
        .context("writing CSV header")?;
    for record in &table.records {
        let cells: Vec<String> = table.cells(record).iter().map(|c| c.to_string()).collect();
        writer.write_record(&cells).context("writing CSV row")?;
    }
    writer
        .into_inner()
        .map_err(|e| anyhow!("flushing CSV: {}", e.error()))
}

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase()
}

/// MIME type of the export format [`write_file`] picks for `path`.
pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    match extension(path).as_str() {
        "xlsx" => Some(XLSX_MIME),
        "csv" => Some(CSV_MIME),
        _ => None,
    }
}

/// Write the table to `path`, picking the format from the extension.
///
/// The parent directory is created when missing and an existing file is
/// overwritten wholesale.
pub fn write_file(path: &Path, table: &Table) -> Result<()> {
    let bytes = match extension(path).as_str() {
        "xlsx" => to_xlsx(table)?,
        "csv" => to_csv(table)?,
        other => return Err(LoadError::UnsupportedExtension(other.to_string()).into()),
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::read_xlsx;
    use crate::data::normalize::normalize;
    use crate::data::sample::make_sample;

    fn fixed_view(table: &Table) -> Vec<Vec<CellValue>> {
        table
            .records
            .iter()
            .map(|r| r.fixed_cells().to_vec())
            .collect()
    }

    #[test]
    fn test_xlsx_round_trip_preserves_fixed_columns() {
        let mut table = make_sample();
        table.records[1].notes = "échange, \"rare\"".into();

        let bytes = to_xlsx(&table).unwrap();
        let back = normalize(&read_xlsx(&bytes).unwrap());

        assert_eq!(back.columns(), table.columns());
        assert_eq!(fixed_view(&back), fixed_view(&table));
    }

    #[test]
    fn test_xlsx_round_trip_keeps_extra_columns() {
        let mut table = make_sample();
        table.extra_columns.push("origin".into());
        for record in &mut table.records {
            record.extra.push(CellValue::String("Lyon".into()));
        }
        table.records[0].extra[0] = CellValue::Null;

        let raw = read_xlsx(&to_xlsx(&table).unwrap()).unwrap();
        assert_eq!(raw.headers.last().map(String::as_str), Some("origin"));
        let back = normalize(&raw);
        assert_eq!(back.extra_columns, vec!["origin"]);
        assert_eq!(back.records[0].extra, vec![CellValue::Null]);
        assert_eq!(back.records[1].extra, vec![CellValue::String("Lyon".into())]);
    }

    #[test]
    fn test_csv_round_trip_keeps_text_verbatim() {
        let mut table = make_sample();
        table.records[0].name = "007".into();
        table.records[1].notes = "1e3".into();
        table.records[2].name = "Infinity".into();
        table.records[2].tags = "true".into();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pins.csv");
        write_file(&path, &table).unwrap();
        let back = normalize(&crate::data::loader::load_file(&path).unwrap());

        assert_eq!(back.columns(), table.columns());
        assert_eq!(fixed_view(&back), fixed_view(&table));
        assert_eq!(back.records[0].name, "007");
        assert_eq!(back.records[1].notes, "1e3");
    }

    #[test]
    fn test_empty_table_exports_header_only() {
        let raw = read_xlsx(&to_xlsx(&Table::default()).unwrap()).unwrap();
        assert_eq!(raw.headers.len(), 10);
        assert!(raw.is_empty());
    }

    #[test]
    fn test_csv_layout() {
        let table = make_sample();
        let text = String::from_utf8(to_csv(&table).unwrap()).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("name,serie,collection,quantity,state,tradeable,price,tags,notes,image_url")
        );
        assert_eq!(lines.count(), table.len());
    }

    #[test]
    fn test_mime_follows_extension() {
        assert_eq!(
            mime_for_path(Path::new("out/pins.XLSX")),
            Some("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet")
        );
        assert_eq!(mime_for_path(Path::new("pins.csv")), Some(CSV_MIME));
        assert_eq!(mime_for_path(Path::new("pins.txt")), None);
        assert_eq!(mime_for_path(Path::new("pins")), None);
    }

    #[test]
    fn test_write_file_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("pins.xlsx");
        write_file(&path, &make_sample()).unwrap();
        assert!(path.exists());

        let bad = dir.path().join("pins.txt");
        assert!(write_file(&bad, &make_sample()).is_err());
    }
}
