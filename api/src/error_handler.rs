use ai_llm_service::AiLlmError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use recommender::{RecommendError, RecommenderConfigError, SourceError};
use thiserror::Error;
use tracing::error;

use crate::core::http::response_envelope::{ApiErrorDetail, ApiResponse};

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error("text model setup failed: {0}")]
    Llm(#[from] AiLlmError),

    #[error("recommender config: {0}")]
    RecommenderConfig(#[from] RecommenderConfigError),

    #[error("dataset could not be loaded: {0}")]
    Dataset(#[source] SourceError),

    // --- IO / server ---
    #[error("failed to bind listener: {0}")]
    Bind(#[source] std::io::Error),

    #[error("server error: {0}")]
    Server(#[source] std::io::Error),

    // --- Request ---
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Field-level input validation failure.
    #[error("{message}")]
    InvalidInput {
        message: String,
        field: Option<&'static str>,
    },

    #[error(transparent)]
    Recommend(#[from] RecommendError),
}

impl AppError {
    pub fn invalid_field(field: &'static str, message: impl Into<String>) -> Self {
        AppError::InvalidInput {
            message: message.into(),
            field: Some(field),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            AppError::Recommend(RecommendError::InvalidInput(_)) => StatusCode::BAD_REQUEST,
            AppError::Recommend(RecommendError::Catalog(_))
            | AppError::Recommend(RecommendError::VendorDirectory(_)) => StatusCode::BAD_GATEWAY,

            // startup-only
            AppError::Llm(_)
            | AppError::RecommenderConfig(_)
            | AppError::Dataset(_)
            | AppError::Bind(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::InvalidInput { .. } => "INVALID_INPUT",
            AppError::Recommend(RecommendError::InvalidInput(_)) => "INVALID_INPUT",
            AppError::Recommend(RecommendError::Catalog(_))
            | AppError::Recommend(RecommendError::VendorDirectory(_)) => "CATALOG_UNAVAILABLE",
            _ => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() || status == StatusCode::BAD_GATEWAY {
            error!(code = self.error_code(), error = %self, "request failed");
        }

        let details = match &self {
            AppError::InvalidInput {
                field: Some(field), ..
            } => vec![ApiErrorDetail {
                path: Some((*field).to_string()),
                hint: None,
            }],
            _ => Vec::new(),
        };

        // Upstream failure text stays in the logs.
        let message = match status {
            StatusCode::BAD_GATEWAY => "menu data is temporarily unavailable".to_string(),
            s if s.is_server_error() => "internal error".to_string(),
            _ => self.to_string(),
        };

        ApiResponse::<()>::error(self.error_code(), message, details)
            .into_response_with_status(status)
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(err: axum::extract::rejection::JsonRejection) -> Self {
        AppError::BadRequest(err.body_text())
    }
}

impl From<axum::extract::rejection::QueryRejection> for AppError {
    fn from(err: axum::extract::rejection::QueryRejection) -> Self {
        AppError::BadRequest(err.body_text())
    }
}
