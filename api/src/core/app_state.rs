use std::sync::Arc;

use ai_llm_service::LlmService;
use recommender::{Dataset, Recommender, RecommenderConfig};
use tracing::info;

use crate::error_handler::AppError;

pub const DEFAULT_API_ADDRESS: &str = "0.0.0.0:8080";
pub const DEFAULT_MENU_DATA_PATH: &str = "data/menu.json";

/// HTTP-layer settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Bind address, e.g. `0.0.0.0:8080`.
    pub address: String,
    /// JSON dataset with `menu` and `vendors`.
    pub data_path: String,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let read = |key, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        Self {
            address: read("API_ADDRESS", DEFAULT_API_ADDRESS),
            data_path: read("MENU_DATA_PATH", DEFAULT_MENU_DATA_PATH),
        }
    }
}

/// Shared state for all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<Recommender>,
    /// Completion backend, also probed by `/health`.
    pub llm: Arc<LlmService>,
}

impl AppState {
    pub fn new(recommender: Arc<Recommender>, llm: Arc<LlmService>) -> Self {
        Self { recommender, llm }
    }

    /// Wires the engine from environment variables and the dataset file.
    ///
    /// # Errors
    /// Any config, provider or dataset problem; the server must not start half-configured.
    pub fn from_env(config: &ApiConfig) -> Result<Self, AppError> {
        let llm = Arc::new(LlmService::from_env()?);
        let engine_config = RecommenderConfig::from_env()?;

        let dataset = Dataset::load(&config.data_path).map_err(AppError::Dataset)?;
        let (catalog, vendors) = dataset.into_sources();

        info!(
            data_path = %config.data_path,
            limit = engine_config.limit,
            seeded = matches!(engine_config.rng, recommender::RngSource::Seeded(_)),
            "recommender configured"
        );

        let recommender = Recommender::new(catalog, vendors, llm.clone(), engine_config);
        Ok(Self::new(Arc::new(recommender), llm))
    }
}
