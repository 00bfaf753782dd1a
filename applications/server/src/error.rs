/// Server error types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mockdb_core::StoreError;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Request body could not be read as a JSON object
    #[error("{0}")]
    Syntax(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ServerError {
    /// Error name reported in the response body
    pub fn name(&self) -> &'static str {
        match self {
            ServerError::Store(e) => e.name(),
            ServerError::Syntax(_) => "SyntaxError",
            ServerError::Config(_) => "ConfigError",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ServerError::Store(ref e @ StoreError::InvalidShape { .. }) => {
                tracing::debug!("Rejected write: {}", e);
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            ServerError::Store(ref e @ StoreError::NotFound { .. }) => {
                tracing::debug!("Missing record: {}", e);
                (StatusCode::NOT_FOUND, e.to_string())
            }
            ServerError::Syntax(ref msg) => {
                tracing::debug!("Unreadable body: {}", msg);
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            ServerError::Config(ref msg) => {
                tracing::error!("Config error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Configuration error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "name": self.name(),
            "msg": message,
        }));

        (status, body).into_response()
    }
}
