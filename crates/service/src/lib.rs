//! Service layer for tablechat
//!
//! Centralizes the upload and query flows between a UI and the
//! loader/session/llm crates. One `SessionState` per user session is
//! threaded through every call.

#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]

mod context;
mod error;
mod ingest_service;
mod query_router;

pub use context::{GENERAL_CONTEXT, context_for, shortcut_labels, shortcut_query};
pub use error::ServiceError;
pub use ingest_service::{IngestService, UploadReport};
pub use query_router::QueryRouter;
