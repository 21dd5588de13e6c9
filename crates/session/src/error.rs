//! Typed error enum for session state operations.

use tablechat_core::TableError;
use thiserror::Error;

/// Errors from registry and session-state operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Selection references a file that was never registered.
    #[error("not found: no table registered for '{name}'")]
    NotFound { name: String },

    /// Merge requested with no registered tables.
    #[error("nothing to merge: registry is empty")]
    EmptyRegistry,

    /// Merged rows violated table invariants while being assembled.
    #[error("merge failed: {0}")]
    Merge(#[from] TableError),
}
