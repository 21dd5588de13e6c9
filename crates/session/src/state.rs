use tablechat_core::{Message, ReportType, Table, Transcript};

use crate::error::SessionError;
use crate::registry::TableRegistry;

/// Which table queries run against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveTable {
    /// A single uploaded file's table.
    File(String),
    /// The cached merged table.
    Merged,
}

/// All mutable state for one interactive session.
///
/// Created empty at session start, passed by reference to every handler,
/// discarded at session end. Not shared across sessions.
#[derive(Debug, Default)]
pub struct SessionState {
    registry: TableRegistry,
    merged: Option<Table>,
    selected_file: Option<String>,
    active: Option<ActiveTable>,
    report_type: ReportType,
    transcript: Transcript,
}

impl SessionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a loaded table under its filename.
    ///
    /// Any cached merged table becomes stale and is dropped; callers merge
    /// again explicitly. The first registered file becomes the selection.
    pub fn register_table(&mut self, name: impl Into<String>, table: Table) {
        let name = name.into();
        self.registry.register(name.clone(), table);
        if self.merged.take().is_some() {
            tracing::debug!(file = %name, "dropping stale merged table");
            if self.active == Some(ActiveTable::Merged) {
                self.active = self.selected_file.clone().map(ActiveTable::File);
            }
        }
        if self.selected_file.is_none() {
            self.selected_file = Some(name.clone());
            self.active = Some(ActiveTable::File(name));
        }
    }

    /// Makes `name`'s table the selected and active one.
    ///
    /// # Errors
    /// `NotFound` when no table is registered under `name`.
    pub fn select_file(&mut self, name: &str) -> Result<(), SessionError> {
        self.registry.select(name)?;
        self.selected_file = Some(name.to_owned());
        self.active = Some(ActiveTable::File(name.to_owned()));
        Ok(())
    }

    /// Recomputes the merged table, caches it, and makes it active.
    ///
    /// # Errors
    /// `EmptyRegistry` when no files are registered.
    pub fn merge_all(&mut self) -> Result<&Table, SessionError> {
        let merged = self.registry.merge()?;
        self.merged = Some(merged);
        self.active = Some(ActiveTable::Merged);
        // Just stored above; this path cannot miss.
        self.merged.as_ref().ok_or(SessionError::EmptyRegistry)
    }

    /// The table queries currently run against, if any.
    #[must_use]
    pub fn active_table(&self) -> Option<&Table> {
        match self.active.as_ref()? {
            ActiveTable::File(name) => self.registry.select(name).ok(),
            ActiveTable::Merged => self.merged.as_ref(),
        }
    }

    #[must_use]
    pub fn active(&self) -> Option<&ActiveTable> {
        self.active.as_ref()
    }

    #[must_use]
    pub fn selected_file(&self) -> Option<&str> {
        self.selected_file.as_deref()
    }

    #[must_use]
    pub fn registry(&self) -> &TableRegistry {
        &self.registry
    }

    #[must_use]
    pub fn report_type(&self) -> ReportType {
        self.report_type
    }

    pub fn set_report_type(&mut self, report_type: ReportType) {
        self.report_type = report_type;
    }

    #[must_use]
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn push_message(&mut self, message: Message) {
        self.transcript.push(message);
    }
}
