use std::collections::HashMap;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::{Context, Result};
use calamine::{open_workbook_auto, open_workbook_from_rs, Data, DataType, Range, Reader, Xlsx};
use serde_json::Value as JsonValue;

use super::error::LoadError;
use super::model::{CellValue, RawTable};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load raw rows from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.xlsx` / `.xlsm` / `.xlsb` / `.xls` / `.ods` – first worksheet, first row is the header
/// * `.csv`  – header row, every cell read as text
/// * `.json` – `[{ "name": "...", "quantity": 2, ... }, ...]`
pub fn load_file(path: &Path) -> Result<RawTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => load_workbook(path),
        "csv" => load_csv(path),
        "json" => load_json(path),
        other => Err(LoadError::UnsupportedExtension(other.to_string()).into()),
    }
}

// ---------------------------------------------------------------------------
// Spreadsheet loader
// ---------------------------------------------------------------------------

fn load_workbook(path: &Path) -> Result<RawTable> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("opening workbook {}", path.display()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| LoadError::NoWorksheet(path.to_path_buf()))?
        .context("reading first worksheet")?;
    Ok(range_to_raw(&range))
}

/// Read an in-memory `.xlsx` workbook (first sheet).
pub fn read_xlsx(bytes: &[u8]) -> Result<RawTable> {
    let mut workbook: Xlsx<_> =
        open_workbook_from_rs(Cursor::new(bytes)).context("opening in-memory workbook")?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| LoadError::NoWorksheet(PathBuf::from("<memory>")))?
        .context("reading first worksheet")?;
    Ok(range_to_raw(&range))
}

fn range_to_raw(range: &Range<Data>) -> RawTable {
    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header) => header.iter().map(|c| data_to_cell(c).to_string()).collect(),
        None => return RawTable::default(),
    };
    let body = rows
        .map(|row| row.iter().map(data_to_cell).collect())
        .collect();
    RawTable::new(headers, body)
}

fn data_to_cell(data: &Data) -> CellValue {
    match data {
        Data::String(s) => CellValue::String(s.clone()),
        Data::Int(i) => CellValue::Integer(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(_) => data
            .as_datetime()
            .map(|dt| CellValue::Date(dt.to_string()))
            .unwrap_or(CellValue::Null),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Date(s.clone()),
        Data::Error(_) | Data::Empty => CellValue::Null,
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(record.iter().map(csv_cell).collect());
    }

    Ok(RawTable::new(headers, rows))
}

/// CSV has no cell types: every cell stays text and the normalizer coerces
/// the typed columns.
fn csv_cell(s: &str) -> CellValue {
    if s.is_empty() {
        CellValue::Null
    } else {
        CellValue::String(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON (`df.to_json(orient='records')`). Columns are
/// collected in first-seen order across all objects.
fn load_json(path: &Path) -> Result<RawTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;
    let records = root.as_array().ok_or(LoadError::NotJsonRecords)?;

    let mut headers: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec.as_object().ok_or(LoadError::JsonRowNotObject(i))?;
        for key in obj.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let rows = records
        .iter()
        .filter_map(|rec| rec.as_object())
        .map(|obj| {
            headers
                .iter()
                .map(|h| obj.get(h).map(json_to_cell).unwrap_or(CellValue::Null))
                .collect()
        })
        .collect();

    Ok(RawTable::new(headers, rows))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Memoized loading
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
struct FileStamp {
    modified: Option<SystemTime>,
    len: u64,
}

/// Memoizes [`load_file`]: the same file (path, mtime, size) parses once.
#[derive(Debug, Default)]
pub struct LoadCache {
    entries: HashMap<PathBuf, (FileStamp, RawTable)>,
}

impl LoadCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, path: &Path) -> Result<RawTable> {
        let meta = std::fs::metadata(path)
            .with_context(|| format!("reading metadata of {}", path.display()))?;
        let stamp = FileStamp {
            modified: meta.modified().ok(),
            len: meta.len(),
        };

        if let Some((cached_stamp, raw)) = self.entries.get(path) {
            if *cached_stamp == stamp {
                log::debug!("load cache hit for {}", path.display());
                return Ok(raw.clone());
            }
        }

        let raw = load_file(path)?;
        self.entries
            .insert(path.to_path_buf(), (stamp, raw.clone()));
        Ok(raw)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_csv_cells_stay_text() {
        let file = write_temp(
            ".csv",
            "name,quantity,price,tradeable,origin\n007,2,9.9,true,\nEevee,abc,,oui,1e3\n",
        );
        let raw = load_file(file.path()).unwrap();
        assert_eq!(raw.headers, vec!["name", "quantity", "price", "tradeable", "origin"]);
        assert_eq!(raw.rows[0][0], CellValue::String("007".into()));
        assert_eq!(raw.rows[0][1], CellValue::String("2".into()));
        assert_eq!(raw.rows[0][4], CellValue::Null);
        assert_eq!(raw.rows[1][4], CellValue::String("1e3".into()));
    }

    #[test]
    fn test_csv_typed_columns_still_coerce() {
        let file = write_temp(
            ".csv",
            "name,quantity,price,tradeable\nPikachu,2,9.9,true\nEevee,abc,,oui\n",
        );
        let table = crate::data::normalize::normalize(&load_file(file.path()).unwrap());
        assert_eq!(table.records[0].quantity, 2);
        assert_eq!(table.records[0].price, 9.9);
        assert!(table.records[0].tradeable);
        assert_eq!(table.records[1].quantity, 0);
        assert_eq!(table.records[1].price, 0.0);
        assert!(table.records[1].tradeable);
    }

    #[test]
    fn test_json_records_keep_first_seen_order() {
        let file = write_temp(
            ".json",
            r#"[{"name": "Mew", "zeta": 1}, {"alpha": true, "name": "Ditto"}]"#,
        );
        let raw = load_file(file.path()).unwrap();
        assert_eq!(raw.headers, vec!["name", "zeta", "alpha"]);
        assert_eq!(raw.rows[1][0], CellValue::String("Ditto".into()));
        assert_eq!(raw.rows[1][1], CellValue::Null);
        assert_eq!(raw.rows[1][2], CellValue::Bool(true));
    }

    #[test]
    fn test_json_must_be_array() {
        let file = write_temp(".json", r#"{"name": "Mew"}"#);
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::NotJsonRecords)
        ));
    }

    #[test]
    fn test_unsupported_extension() {
        let file = write_temp(".txt", "hello");
        let err = load_file(file.path()).unwrap_err();
        assert!(err.to_string().contains(".txt"));
    }

    #[test]
    fn test_cache_returns_same_result() {
        let file = write_temp(".csv", "name\nPikachu\n");
        let mut cache = LoadCache::new();
        let first = cache.load(file.path()).unwrap();
        let second = cache.load(file.path()).unwrap();
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
    }
}
