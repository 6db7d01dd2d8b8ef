use std::fmt;

use uuid::Uuid;

// ---------------------------------------------------------------------------
// Fixed schema
// ---------------------------------------------------------------------------

/// The ten columns every normalized table carries, in canonical order.
pub const FIXED_COLUMNS: [&str; 10] = [
    "name",
    "serie",
    "collection",
    "quantity",
    "state",
    "tradeable",
    "price",
    "tags",
    "notes",
    "image_url",
];

// ---------------------------------------------------------------------------
// CellValue – a single imported cell
// ---------------------------------------------------------------------------

/// A dynamically-typed spreadsheet cell, as read before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// ISO-8601 date/time kept as text.
    Date(String),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) | CellValue::Date(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => Ok(()),
        }
    }
}

impl CellValue {
    /// Text the free-text search matches against.
    ///
    /// Same as [`Display`](fmt::Display) except that integral floats keep a
    /// trailing `.0`, so a price of 12 reads `12.0`.
    pub fn search_text(&self) -> String {
        match self {
            CellValue::Float(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e16 => {
                format!("{v:.1}")
            }
            other => other.to_string(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

// ---------------------------------------------------------------------------
// RawTable – un-normalized import result
// ---------------------------------------------------------------------------

/// Rows of arbitrary columns straight out of a spreadsheet, CSV or JSON file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl RawTable {
    /// Build a raw table, cleaning up headers and padding short rows.
    ///
    /// Other headers are kept verbatim, surrounding whitespace included.
    /// Empty headers become `Unnamed: <index>` and repeated headers get a
    /// `.1`, `.2`, … suffix so every column name is unique.
    pub fn new(headers: Vec<String>, mut rows: Vec<Vec<CellValue>>) -> Self {
        let headers = dedupe_headers(headers);
        let width = headers.len();
        for row in &mut rows {
            row.resize(width, CellValue::Null);
        }
        RawTable { headers, rows }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(headers.len());
    for (i, header) in headers.into_iter().enumerate() {
        let base = if header.trim().is_empty() {
            format!("Unnamed: {i}")
        } else {
            header
        };
        let mut candidate = base.clone();
        let mut n = 1;
        while out.contains(&candidate) {
            candidate = format!("{base}.{n}");
            n += 1;
        }
        out.push(candidate);
    }
    out
}

// ---------------------------------------------------------------------------
// Record – one pin
// ---------------------------------------------------------------------------

/// Stable opaque identity of a record, independent of its row position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(Uuid);

impl RecordId {
    pub fn new() -> Self {
        RecordId(Uuid::new_v4())
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One collection item with typed fixed attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: RecordId,
    pub name: String,
    pub serie: String,
    pub collection: String,
    pub quantity: u32,
    pub state: String,
    pub tradeable: bool,
    pub price: f64,
    pub tags: String,
    pub notes: String,
    pub image_url: String,
    /// Values of the table's extra columns, aligned with `Table::extra_columns`.
    pub extra: Vec<CellValue>,
}

impl Record {
    /// A blank record with a fresh id and `extra_len` null extra cells.
    pub fn blank(extra_len: usize) -> Self {
        Record {
            id: RecordId::new(),
            name: String::new(),
            serie: String::new(),
            collection: String::new(),
            quantity: 0,
            state: String::new(),
            tradeable: false,
            price: 0.0,
            tags: String::new(),
            notes: String::new(),
            image_url: String::new(),
            extra: vec![CellValue::Null; extra_len],
        }
    }

    /// The ten fixed cells in canonical order.
    pub fn fixed_cells(&self) -> [CellValue; 10] {
        [
            CellValue::String(self.name.clone()),
            CellValue::String(self.serie.clone()),
            CellValue::String(self.collection.clone()),
            CellValue::Integer(i64::from(self.quantity)),
            CellValue::String(self.state.clone()),
            CellValue::Bool(self.tradeable),
            CellValue::Float(self.price),
            CellValue::String(self.tags.clone()),
            CellValue::String(self.notes.clone()),
            CellValue::String(self.image_url.clone()),
        ]
    }

    /// Keep `price` finite and non-negative after an in-place edit.
    pub fn clamp_numbers(&mut self) {
        if !self.price.is_finite() || self.price < 0.0 {
            self.price = 0.0;
        }
    }
}

// ---------------------------------------------------------------------------
// Table – the full session collection
// ---------------------------------------------------------------------------

/// Ordered collection of records sharing the fixed schema plus extras.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    /// Non-fixed columns preserved from import, in original relative order.
    pub extra_columns: Vec<String>,
    pub records: Vec<Record>,
}

impl Table {
    pub fn new(extra_columns: Vec<String>, records: Vec<Record>) -> Self {
        Table {
            extra_columns,
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All column names: fixed columns first, then extras.
    pub fn columns(&self) -> Vec<&str> {
        FIXED_COLUMNS
            .iter()
            .copied()
            .chain(self.extra_columns.iter().map(String::as_str))
            .collect()
    }

    /// Every cell of a record in column order.
    pub fn cells(&self, record: &Record) -> Vec<CellValue> {
        let mut cells = record.fixed_cells().to_vec();
        cells.extend(
            (0..self.extra_columns.len())
                .map(|i| record.extra.get(i).cloned().unwrap_or(CellValue::Null)),
        );
        cells
    }

    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn get_mut(&mut self, id: RecordId) -> Option<&mut Record> {
        self.records.iter_mut().find(|r| r.id == id)
    }

    pub fn position(&self, id: RecordId) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    /// Append a blank record and return its id.
    pub fn add_blank(&mut self) -> RecordId {
        let record = Record::blank(self.extra_columns.len());
        let id = record.id;
        self.records.push(record);
        id
    }

    /// Append a record, resizing its extras to this table's extra columns.
    pub fn push(&mut self, mut record: Record) {
        record.extra.resize(self.extra_columns.len(), CellValue::Null);
        self.records.push(record);
    }

    /// Remove a record by id, returning it if present.
    pub fn remove(&mut self, id: RecordId) -> Option<Record> {
        let pos = self.position(id)?;
        Some(self.records.remove(pos))
    }
}
