use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};
use wolfden_core::StoreError;

/// Server-specific error types.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("API endpoint not found")]
    RouteNotFound,

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::RouteNotFound => StatusCode::NOT_FOUND,
            ServerError::Store(store_err) => match store_err {
                StoreError::NotFound { .. } => StatusCode::NOT_FOUND,
                StoreError::InvalidName(_) => StatusCode::BAD_REQUEST,
                StoreError::DataCorruption { .. }
                | StoreError::Io { .. }
                | StoreError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match &self {
            ServerError::RouteNotFound => self.to_string(),
            ServerError::Store(store_err) => match store_err {
                StoreError::NotFound { .. } | StoreError::InvalidName(_) => store_err.to_string(),
                StoreError::DataCorruption { path, source } => {
                    error!(path = ?path, error = %source, "Stored document is corrupted");
                    "Stored document is corrupted".to_string()
                }
                StoreError::Io { path, source } => {
                    error!(path = ?path, error = %source, "Store I/O error");
                    "Internal server error (I/O)".to_string()
                }
                StoreError::Serialization(msg) => {
                    error!(error = %msg, "Serialization error");
                    "Internal server error (Serialization)".to_string()
                }
            },
            ServerError::Internal(msg) => {
                error!(error = %msg, "Internal server error");
                "Internal server error".to_string()
            }
        };

        if status.is_server_error() {
            error!("Responding with status {}: {}", status, error_message);
        } else {
            warn!("Responding with status {}: {}", status, error_message);
        }

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub type ServerResult<T> = Result<T, ServerError>;
