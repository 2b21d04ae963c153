//! Text-completion gateway used by the recommender.
//!
//! One [`LlmService`] wraps the provider selected at startup (Ollama or an
//! OpenAI-compatible server), exposes `generate(prompt, system) -> String` and a
//! never-failing health probe. Errors are unified under [`AiLlmError`].

pub mod completion_service;
pub mod config;
pub mod error_handler;
pub mod health_service;
pub mod services;
pub mod telemetry;

pub use completion_service::LlmService;
pub use config::llm_model_config::LlmModelConfig;
pub use config::llm_provider::LlmProvider;
pub use error_handler::{AiLlmError, ConfigError};
pub use health_service::HealthStatus;
