use crate::config::llm_provider::LlmProvider;
use crate::error_handler::{
    AiLlmError, ConfigError, validate_http_endpoint, validate_range_f32,
};

/// Configuration for a single text-completion model.
///
/// # Fields
///
/// - `provider`: which backend serves the model.
/// - `model`: model identifier (e.g. `"qwen3:14b"`, `"gpt-4o-mini"`).
/// - `endpoint`: base URL of the server, without the API path.
/// - `api_key`: bearer token, required for OpenAI.
/// - `max_tokens`: generation cap, if the provider supports one.
/// - `temperature`: sampling temperature (`0.0..=2.0`).
/// - `timeout_secs`: per-request HTTP timeout.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    pub provider: LlmProvider,
    pub model: String,
    pub endpoint: String,
    pub api_key: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub timeout_secs: Option<u64>,
}

impl LlmModelConfig {
    /// Checks the invariants every provider relies on.
    ///
    /// # Errors
    /// - [`ConfigError::EmptyModel`] for a blank model name
    /// - [`ConfigError::InvalidFormat`] for a non-HTTP endpoint
    /// - [`ConfigError::OutOfRange`] for a temperature outside `0.0..=2.0`
    /// - [`ConfigError::MissingVar`] for an OpenAI config without key
    pub fn validate(&self) -> Result<(), AiLlmError> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel.into());
        }
        validate_http_endpoint("endpoint", &self.endpoint)?;
        if let Some(t) = self.temperature {
            validate_range_f32("temperature", t, 0.0, 2.0)?;
        }
        if self.provider == LlmProvider::OpenAI
            && self.api_key.as_deref().is_none_or(|k| k.trim().is_empty())
        {
            return Err(ConfigError::MissingVar("OPENAI_API_KEY").into());
        }
        Ok(())
    }

    /// Endpoint without trailing slashes, ready for path concatenation.
    pub fn base_url(&self) -> &str {
        self.endpoint.trim().trim_end_matches('/')
    }
}
