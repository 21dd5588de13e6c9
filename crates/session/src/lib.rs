//! Session state for tablechat
//!
//! Owns the per-session file registry, the optional merged table, the
//! current selection, and the transcript. One `SessionState` per user
//! session; nothing here is shared across sessions.

mod error;
mod registry;
mod state;

pub use error::SessionError;
pub use registry::{FileEntry, TableRegistry};
pub use state::{ActiveTable, SessionState};
