//! Ranking-model config loaded from environment variables.
//!
//! # Environment variables
//!
//! Common:
//! - `LLM_KIND`         = `ollama` (default) or `openai`
//! - `LLM_MAX_TOKENS`   = optional generation cap (u32)
//! - `LLM_TEMPERATURE`  = optional temperature, defaults to `0.2`
//! - `LLM_TIMEOUT_SECS` = optional HTTP timeout, defaults to `60`
//!
//! Ollama:
//! - `OLLAMA_URL` or `OLLAMA_PORT` = endpoint (defaults to `http://localhost:11434`)
//! - `OLLAMA_MODEL`                = model (mandatory)
//!
//! OpenAI:
//! - `OPENAI_URL`     = base URL (defaults to `https://api.openai.com`)
//! - `OPENAI_API_KEY` = bearer token (mandatory)
//! - `OPENAI_MODEL`   = model (mandatory)

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{AiLlmError, ConfigError},
};

const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
const DEFAULT_OPENAI_URL: &str = "https://api.openai.com";
const DEFAULT_TEMPERATURE: f32 = 0.2;
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Builds the completion config from the process environment.
///
/// # Errors
/// Any [`ConfigError`] produced while reading or validating the variables.
pub fn config_from_env() -> Result<LlmModelConfig, AiLlmError> {
    config_from_lookup(|key| {
        std::env::var(key)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    })
}

/// Same as [`config_from_env`] but reads values through `lookup`.
///
/// `lookup` must return `None` for unset or blank variables.
pub fn config_from_lookup<F>(lookup: F) -> Result<LlmModelConfig, AiLlmError>
where
    F: Fn(&'static str) -> Option<String>,
{
    let provider = match lookup("LLM_KIND") {
        Some(kind) => kind.parse::<LlmProvider>()?,
        None => LlmProvider::Ollama,
    };

    let max_tokens = parse_number::<u32, _>(&lookup, "LLM_MAX_TOKENS", "expected u32")?;
    let temperature = parse_number::<f32, _>(&lookup, "LLM_TEMPERATURE", "expected float")?
        .or(Some(DEFAULT_TEMPERATURE));
    let timeout_secs = parse_number::<u64, _>(&lookup, "LLM_TIMEOUT_SECS", "expected u64")?
        .or(Some(DEFAULT_TIMEOUT_SECS));

    let cfg = match provider {
        LlmProvider::Ollama => LlmModelConfig {
            provider,
            model: lookup("OLLAMA_MODEL").ok_or(ConfigError::MissingVar("OLLAMA_MODEL"))?,
            endpoint: ollama_endpoint(&lookup)?,
            api_key: None,
            max_tokens,
            temperature,
            timeout_secs,
        },
        LlmProvider::OpenAI => LlmModelConfig {
            provider,
            model: lookup("OPENAI_MODEL").ok_or(ConfigError::MissingVar("OPENAI_MODEL"))?,
            endpoint: lookup("OPENAI_URL").unwrap_or_else(|| DEFAULT_OPENAI_URL.to_string()),
            api_key: Some(
                lookup("OPENAI_API_KEY").ok_or(ConfigError::MissingVar("OPENAI_API_KEY"))?,
            ),
            max_tokens,
            temperature,
            timeout_secs,
        },
    };

    cfg.validate()?;
    Ok(cfg)
}

/// Resolves the Ollama endpoint.
///
/// Precedence: `OLLAMA_URL`, then `OLLAMA_PORT` → `http://localhost:{port}`,
/// then the local default.
fn ollama_endpoint<F>(lookup: &F) -> Result<String, AiLlmError>
where
    F: Fn(&'static str) -> Option<String>,
{
    if let Some(url) = lookup("OLLAMA_URL") {
        return Ok(url);
    }
    if let Some(port) = lookup("OLLAMA_PORT") {
        port.parse::<u16>().map_err(|_| ConfigError::InvalidNumber {
            var: "OLLAMA_PORT",
            reason: "expected u16 (1..=65535)",
        })?;
        return Ok(format!("http://localhost:{port}"));
    }
    Ok(DEFAULT_OLLAMA_URL.to_string())
}

fn parse_number<T, F>(
    lookup: &F,
    var: &'static str,
    reason: &'static str,
) -> Result<Option<T>, AiLlmError>
where
    T: std::str::FromStr,
    F: Fn(&'static str) -> Option<String>,
{
    match lookup(var) {
        Some(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { var, reason }.into()),
        None => Ok(None),
    }
}
