//! Shared text-completion service.
//!
//! - Lives in the same Tokio runtime as the application.
//! - Construct once, wrap in `Arc`, and pass clones to dependents.
//! - Dispatches to the provider selected in [`LlmModelConfig`].
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use ai_llm_service::LlmService;
//!
//! # async fn run() -> Result<(), ai_llm_service::AiLlmError> {
//! let svc = Arc::new(LlmService::from_env()?);
//! let text = svc.generate("Suggest a breakfast dish.", None).await?;
//! println!("{text}");
//! # Ok(()) }
//! ```

use std::time::Duration;

use tracing::info;

use crate::{
    config::{default_config::config_from_env, llm_model_config::LlmModelConfig},
    error_handler::AiLlmError,
    health_service::{HealthService, HealthStatus},
    services::{ollama_service::OllamaService, open_ai_service::OpenAiService},
};

#[derive(Debug)]
enum Backend {
    Ollama(OllamaService),
    OpenAI(OpenAiService),
}

/// Completion service bound to one model config.
#[derive(Debug)]
pub struct LlmService {
    cfg: LlmModelConfig,
    backend: Backend,
    health: HealthService,
}

impl LlmService {
    /// Creates the service and its provider client.
    ///
    /// # Errors
    /// Config validation or HTTP client construction failures.
    pub fn new(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        cfg.validate()?;

        let backend = match cfg.provider {
            crate::LlmProvider::Ollama => Backend::Ollama(OllamaService::new(cfg.clone())?),
            crate::LlmProvider::OpenAI => Backend::OpenAI(OpenAiService::new(cfg.clone())?),
        };

        info!(
            provider = %cfg.provider,
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            "LlmService initialized"
        );

        Ok(Self {
            cfg,
            backend,
            health: HealthService::new(None)?,
        })
    }

    /// Builds the service from environment variables (see [`config_from_env`]).
    pub fn from_env() -> Result<Self, AiLlmError> {
        Self::new(config_from_env()?)
    }

    /// Sends `prompt` as a single user turn, preceded by an optional system
    /// instruction, and returns the raw model text.
    pub async fn generate(&self, prompt: &str, system: Option<&str>) -> Result<String, AiLlmError> {
        let result = match &self.backend {
            Backend::Ollama(cli) => cli.generate(prompt, system).await,
            Backend::OpenAI(cli) => cli.generate(prompt, system).await,
        };
        result.map_err(|err| match err {
            AiLlmError::HttpTransport(e) if e.is_timeout() => {
                AiLlmError::Timeout(Duration::from_secs(self.cfg.timeout_secs.unwrap_or(60)))
            }
            other => other,
        })
    }

    /// Probes the backend; never fails.
    pub async fn health(&self) -> HealthStatus {
        self.health.check(&self.cfg).await
    }

    pub fn config(&self) -> &LlmModelConfig {
        &self.cfg
    }
}
