use std::time::Duration;

use tablechat_core::{DEFAULT_REQUEST_TIMEOUT_SECS, env_parse_with_default};

use crate::error::LlmError;

/// Default API version when `TABLECHAT_API_VERSION` is not set.
pub const DEFAULT_API_VERSION: &str = "2024-08-01-preview";
/// Default sampling temperature when `TABLECHAT_TEMPERATURE` is not set.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Connection settings for the answering engine. All values are injected;
/// nothing here is derived from session state.
#[derive(Debug, Clone)]
pub struct CollaboratorConfig {
    /// Base endpoint URL, e.g. `https://myresource.openai.azure.com`.
    pub endpoint: String,
    /// Deployment identifier addressed in the request path.
    pub deployment: String,
    /// API key sent in the `api-key` header.
    pub api_key: String,
    /// API version query parameter.
    pub api_version: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Per-request timeout; expiry surfaces as [`LlmError::Timeout`].
    pub timeout: Duration,
}

impl CollaboratorConfig {
    /// Builds a config with defaults for version, temperature, and timeout.
    #[must_use]
    pub fn new(
        endpoint: impl Into<String>,
        deployment: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            deployment: deployment.into(),
            api_key: api_key.into(),
            api_version: DEFAULT_API_VERSION.to_owned(),
            temperature: DEFAULT_TEMPERATURE,
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Reads the config from `TABLECHAT_*` environment variables.
    ///
    /// # Errors
    /// Fails when `TABLECHAT_ENDPOINT`, `TABLECHAT_DEPLOYMENT`, or
    /// `TABLECHAT_API_KEY` is missing. Version, temperature, and timeout
    /// fall back to defaults.
    pub fn from_env() -> Result<Self, LlmError> {
        let required = |var: &str| {
            std::env::var(var).map_err(|_| LlmError::Config(format!("{var} is not set")))
        };
        let endpoint = required("TABLECHAT_ENDPOINT")?;
        let deployment = required("TABLECHAT_DEPLOYMENT")?;
        let api_key = required("TABLECHAT_API_KEY")?;
        let api_version = std::env::var("TABLECHAT_API_VERSION")
            .unwrap_or_else(|_| DEFAULT_API_VERSION.to_owned());
        let temperature = env_parse_with_default("TABLECHAT_TEMPERATURE", DEFAULT_TEMPERATURE);
        let timeout_secs =
            env_parse_with_default("TABLECHAT_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS);
        Ok(Self {
            endpoint,
            deployment,
            api_key,
            api_version,
            temperature,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}
