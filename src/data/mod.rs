/// Data layer: core types, import/export, normalization and filtering.
///
/// Architecture:
/// ```text
///  .xlsx / .ods / .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → RawTable (arbitrary columns)
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ normalize │  fixed schema, typed columns → Table
///   │   url     │  blank non-http(s) image URLs
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  criteria → mask / visible ids
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  writer   │  Table → .xlsx / .csv   (store: data/pins.xlsx)
///   └──────────┘
/// ```

pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod sample;
pub mod store;
pub mod url;
pub mod writer;

use model::{RawTable, Table};

/// Normalize then sanitize: the single entry point from raw rows to a session table.
pub fn prepare(raw: &RawTable) -> Table {
    let mut table = normalize::normalize(raw);
    url::sanitize_urls(&mut table);
    table
}
