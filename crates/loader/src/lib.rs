//! Spreadsheet ingestion for tablechat
//!
//! Converts uploaded `.xlsx`/`.xls` bytes into typed in-memory tables.
//! One-way conversion: files are never written back.

mod error;
mod xlsx;

pub use error::LoadError;
pub use xlsx::{FileOutcome, load_batch, load_table};
