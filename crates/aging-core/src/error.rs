use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the AR aging pipeline.
///
/// There is no partial-success mode: a spreadsheet either loads and
/// aggregates completely or the whole operation fails with one of these.
#[derive(Error, Debug)]
pub enum AgingError {
    /// The file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but is not a spreadsheet this tool can open.
    #[error("Unsupported or corrupt spreadsheet {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    /// A required column header is absent from the sheet.
    #[error("Required column {column:?} not found in {path}")]
    MissingColumn { column: &'static str, path: PathBuf },

    /// The workbook contains no usable worksheet.
    #[error("No worksheet with data found in {path}")]
    EmptySheet { path: PathBuf },

    /// A cell value could not be coerced to the expected type.
    #[error("Row {row}, column {column:?}: cannot interpret value {value:?}")]
    CellParse {
        row: u32,
        column: &'static str,
        value: String,
    },
}

/// Convenience alias used throughout the aging crates.
pub type Result<T> = std::result::Result<T, AgingError>;
