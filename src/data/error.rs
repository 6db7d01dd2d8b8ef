use std::path::PathBuf;

use thiserror::Error;

/// Failures of the import side of the data layer.
///
/// Cell-level problems never show up here: they are coerced to defaults by
/// the normalizer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("workbook {0} has no worksheet")]
    NoWorksheet(PathBuf),

    #[error("expected a top-level JSON array of objects")]
    NotJsonRecords,

    #[error("JSON row {0} is not an object")]
    JsonRowNotObject(usize),
}
