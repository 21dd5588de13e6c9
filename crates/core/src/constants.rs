//! Shared constants for tablechat.
//!
//! Centralizes the size ceilings that bound memory use for a session.

/// Maximum accepted size of one uploaded spreadsheet file, in bytes (20 MiB).
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Maximum number of data rows loaded per table. Rows past this limit are
/// dropped at load time with a warning.
pub const MAX_ROWS: usize = 100_000;

/// Maximum number of rows included in the table snapshot sent to the
/// answering collaborator. Keeps request bodies bounded for wide sessions.
pub const MAX_SNAPSHOT_ROWS: usize = 200;

/// Maximum characters of an assistant reply kept verbatim in the transcript.
pub const MAX_TRANSCRIPT_CONTENT_LEN: usize = 4000;

/// Default request timeout for collaborator calls, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
