use tablechat_core::{MAX_SNAPSHOT_ROWS, Table};

use crate::answer::Answer;
use crate::config::CollaboratorConfig;
use crate::error::LlmError;
use crate::wire::{ChatRequest, ChatResponse, WireMessage};

/// Client for the external answering engine.
pub struct CollaboratorClient {
    client: reqwest::Client,
    config: CollaboratorConfig,
}

impl std::fmt::Debug for CollaboratorClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollaboratorClient")
            .field("endpoint", &self.config.endpoint)
            .field("deployment", &self.config.deployment)
            .field("api_key", &"***")
            .field("api_version", &self.config.api_version)
            .finish_non_exhaustive()
    }
}

impl CollaboratorClient {
    /// Creates a client with the request timeout taken from the config.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend
    /// failure).
    pub fn new(config: CollaboratorConfig) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::ClientInit(e.to_string()))?;
        Ok(Self { client, config })
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.config.endpoint.trim_end_matches('/'),
            self.config.deployment,
            self.config.api_version,
        )
    }

    /// Sends one question about a table and interprets the reply.
    ///
    /// The request carries the context string plus a bounded JSON snapshot
    /// of the table as the system message and the query verbatim as the
    /// user message. Transient failures (network errors, timeouts,
    /// 429/5xx) are retried with backoff; anything else fails immediately.
    ///
    /// # Errors
    /// Returns the last error once retries are exhausted, or the first
    /// non-transient error.
    pub async fn ask(
        &self,
        table: &Table,
        context: &str,
        query: &str,
    ) -> Result<Answer, LlmError> {
        const MAX_RETRIES: usize = 3;
        const RETRY_DELAYS: [u64; 4] = [0, 1, 2, 4];

        let snapshot = table.snapshot_json(MAX_SNAPSHOT_ROWS);
        let request = ChatRequest {
            messages: vec![
                WireMessage {
                    role: "system".to_owned(),
                    content: format!("{context}\n\nData:\n{snapshot}"),
                },
                WireMessage { role: "user".to_owned(), content: query.to_owned() },
            ],
            temperature: self.config.temperature,
        };
        tracing::debug!(
            deployment = %self.config.deployment,
            rows = table.row_count(),
            query_len = query.len(),
            "sending collaborator request"
        );

        let mut last_error: Option<LlmError> = None;
        for attempt in 0..=MAX_RETRIES {
            if attempt > 0 {
                let delay_secs = RETRY_DELAYS.get(attempt).copied().unwrap_or(4);
                let delay = std::time::Duration::from_secs(delay_secs);
                tokio::time::sleep(delay).await;
                tracing::warn!("collaborator retry attempt {attempt}/{MAX_RETRIES} after {delay:?}");
            }

            let response = match self
                .client
                .post(self.completions_url())
                .header("api-key", &self.config.api_key)
                .json(&request)
                .send()
                .await
            {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(e.into());
                    continue;
                },
            };

            let status = response.status();
            if status.is_success() {
                let body = match response.text().await {
                    Ok(b) => b,
                    Err(e) => {
                        last_error = Some(e.into());
                        continue;
                    },
                };
                let chat_response: ChatResponse =
                    serde_json::from_str(&body).map_err(|e| LlmError::JsonParse {
                        context: format!("chat completion response (body: {})", truncate(&body, 200)),
                        source: e,
                    })?;
                let first_choice =
                    chat_response.choices.first().ok_or(LlmError::EmptyResponse)?;
                return Ok(Answer::from_reply(&first_choice.message.content));
            }

            let code = status.as_u16();
            let body =
                response.text().await.unwrap_or_else(|_| "could not read error body".to_owned());
            let err = LlmError::HttpStatus { code, body };
            if err.is_transient() {
                last_error = Some(err);
                continue;
            }
            return Err(err);
        }

        Err(LlmError::RetriesExhausted(Box::new(last_error.unwrap_or(LlmError::EmptyResponse))))
    }
}

/// Truncates a string to the given maximum length at a char boundary.
#[must_use]
pub fn truncate(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        return s;
    }
    let mut end = max_len;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    s.get(..end).unwrap_or("")
}
