//! Unified error types for the patient service.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error};

/// Errors that stop the service from starting.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Database connection or schema error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Prometheus recorder could not be installed.
    #[error("metrics error: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Request-level errors returned by the patient handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// No patient with the requested id.
    #[error("Patient not found")]
    PatientNotFound {
        /// The id that was looked up.
        id: i64,
    },

    /// A name search matched nothing.
    #[error("No Patient found with \"{name}\"")]
    NoMatches {
        /// The search term.
        name: String,
    },

    /// A required query parameter was absent or empty.
    #[error("{0} query parameter is required")]
    MissingQueryParam(&'static str),

    /// The request body was malformed or failed validation.
    #[error("{0}")]
    InvalidPayload(String),

    /// Persistence failure.
    #[error("{0}")]
    Database(#[from] sqlx::Error),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::PatientNotFound { .. } | Self::NoMatches { .. } => StatusCode::NOT_FOUND,
            Self::MissingQueryParam(_) | Self::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        } else {
            debug!(error = %self, status = status.as_u16(), "request rejected");
        }

        // Empty search results answer with `message`, everything else with `error`.
        let body = match &self {
            Self::NoMatches { .. } => json!({ "message": self.to_string() }),
            _ => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

/// Convenient Result type alias for handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Convenient Result type alias for startup code.
pub type Result<T> = std::result::Result<T, ServiceError>;
