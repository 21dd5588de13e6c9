use tablechat_core::{MAX_TRANSCRIPT_CONTENT_LEN, Message};
use tablechat_llm::{Answer, CollaboratorClient, truncate};
use tablechat_session::SessionState;

use crate::context::{context_for, shortcut_query};
use crate::error::ServiceError;

/// Routes user queries to the answering engine.
///
/// Picks the session's active table and report context, delegates the query
/// verbatim, and records the exchange: every submitted query appends exactly
/// two transcript messages (user, then assistant), whether the call
/// succeeded or not. A failed call leaves the session fully usable.
pub struct QueryRouter {
    client: CollaboratorClient,
}

impl QueryRouter {
    #[must_use]
    pub const fn new(client: CollaboratorClient) -> Self {
        Self { client }
    }

    /// Submits a free-text query against the session's active table.
    ///
    /// # Errors
    /// `NoActiveTable` when nothing is loaded (no messages are appended in
    /// that case, since no query was actually submitted); `Query` when the
    /// collaborator fails, with both messages appended first.
    pub async fn ask(
        &self,
        session: &mut SessionState,
        query: &str,
    ) -> Result<Answer, ServiceError> {
        if session.active_table().is_none() {
            return Err(ServiceError::NoActiveTable);
        }
        let context = context_for(session.report_type());
        session.push_message(Message::user(query));

        let result = {
            let Some(table) = session.active_table() else {
                return Err(ServiceError::NoActiveTable);
            };
            self.client.ask(table, context, query).await
        };

        match result {
            Ok(answer) => {
                let rendered = answer.render();
                session.push_message(Message::assistant(
                    truncate(&rendered, MAX_TRANSCRIPT_CONTENT_LEN),
                ));
                Ok(answer)
            },
            Err(e) => {
                tracing::warn!(query, error = %e, "collaborator query failed");
                session.push_message(Message::assistant(format!("Query failed: {e}")));
                Err(ServiceError::Query { query: query.to_owned(), source: e })
            },
        }
    }

    /// Submits a predefined shortcut by label; the mapped query text goes to
    /// the collaborator verbatim.
    ///
    /// # Errors
    /// `UnknownShortcut` when the label is not in the static table, plus
    /// everything [`QueryRouter::ask`] can return.
    pub async fn ask_shortcut(
        &self,
        session: &mut SessionState,
        label: &str,
    ) -> Result<Answer, ServiceError> {
        let query =
            shortcut_query(label).ok_or_else(|| ServiceError::UnknownShortcut(label.to_owned()))?;
        self.ask(session, query).await
    }
}
