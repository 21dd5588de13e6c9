//! Typed error enum for spreadsheet ingestion.

use tablechat_core::TableError;
use thiserror::Error;

/// Errors from loading one uploaded file. Each file in a batch fails
/// independently; a `LoadError` never aborts the rest of the batch.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Filename does not end in a supported spreadsheet extension.
    #[error("unsupported extension for '{0}': expected .xlsx or .xls")]
    UnsupportedExtension(String),

    /// Payload exceeds the per-file upload ceiling.
    #[error("file too large: {bytes} bytes (limit {limit})")]
    TooLarge { bytes: usize, limit: usize },

    /// Container is unreadable or not a spreadsheet.
    #[error("cannot open workbook: {0}")]
    Open(String),

    /// Workbook has no sheets at all.
    #[error("workbook contains no sheets")]
    NoSheets,

    /// First sheet has no header row to take columns from.
    #[error("sheet '{0}' is empty")]
    EmptySheet(String),

    /// Sheet exists but its cell range could not be read.
    #[error("failed to read sheet '{sheet}': {message}")]
    SheetRead { sheet: String, message: String },

    /// Header row or row data violates table invariants
    /// (duplicate/empty column names).
    #[error("invalid table data: {0}")]
    Table(#[from] TableError),
}
