//! Typed error enum for the service layer.
//!
//! Unifies loader, session, and collaborator failures into a single error
//! type so callers can match on specific failure modes. Every variant is
//! recoverable: no error here ends the session.

use tablechat_llm::LlmError;
use tablechat_loader::LoadError;
use tablechat_session::SessionError;
use thiserror::Error;

/// Service-layer error unifying the lower layers.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// One uploaded file failed to load.
    #[error("load: {0}")]
    Load(#[from] LoadError),

    /// Registry/session operation failed (missing entry, empty merge).
    #[error("session: {0}")]
    Session(#[from] SessionError),

    /// The collaborator call for `query` failed; the underlying cause is
    /// attached and the session stays usable.
    #[error("query '{query}' failed: {source}")]
    Query {
        query: String,
        #[source]
        source: LlmError,
    },

    /// A query was routed with no table loaded.
    #[error("no active table: upload a file before querying")]
    NoActiveTable,

    /// A shortcut label that is not in the static shortcut table.
    #[error("unknown query shortcut: {0}")]
    UnknownShortcut(String),
}

impl ServiceError {
    /// Whether this error is likely transient (worth retrying).
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Query { source, .. } if source.is_transient())
    }

    /// Whether this error represents a not-found selection.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Session(SessionError::NotFound { .. }))
    }
}
