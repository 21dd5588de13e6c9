use tablechat_loader::{LoadError, load_batch};
use tablechat_session::SessionState;

/// Per-file result of one upload batch. Successful files report their row
/// count; failed files carry the error for the UI to surface next to the
/// filename.
#[derive(Debug)]
pub struct UploadReport {
    pub name: String,
    pub result: Result<usize, LoadError>,
}

/// Handles upload batches: loads every file independently and registers the
/// successes into the session.
pub struct IngestService;

impl IngestService {
    /// Loads and registers a batch of uploaded files.
    ///
    /// Files fail independently: a malformed upload produces an `Err` report
    /// and never blocks the others. Successes are registered last-write-wins
    /// under their filename.
    pub fn upload<'a, I>(session: &mut SessionState, files: I) -> Vec<UploadReport>
    where
        I: IntoIterator<Item = (&'a str, &'a [u8])>,
    {
        load_batch(files)
            .into_iter()
            .map(|outcome| {
                let result = match outcome.result {
                    Ok(table) => {
                        let rows = table.row_count();
                        session.register_table(outcome.name.clone(), table);
                        Ok(rows)
                    },
                    Err(e) => Err(e),
                };
                UploadReport { name: outcome.name, result }
            })
            .collect()
    }
}
