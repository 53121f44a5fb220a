use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("URL must be from {host} domain: {url}")]
    InvalidDomain { host: String, url: String },

    #[error("{0}")]
    FetchError(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Tool '{0}' not found")]
    ToolNotFound(String),

    #[error("{0}")]
    ExecutionError(String),

    #[error("Invalid API key")]
    Unauthorized,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    code: u16,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::InvalidDomain { .. } => {
                tracing::warn!(error = %self, "Rejected URL outside documentation host");
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            AppError::FetchError(msg) => {
                tracing::error!(error = %msg, "Documentation fetch error");
                (StatusCode::BAD_GATEWAY, msg.clone())
            }
            AppError::InvalidArgument(msg) => {
                tracing::warn!(error = %msg, "Invalid argument");
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            AppError::ToolNotFound(_) => {
                tracing::warn!(error = %self, "Unknown tool");
                (StatusCode::NOT_FOUND, self.to_string())
            }
            AppError::ExecutionError(msg) => {
                tracing::error!(error = %msg, "Tool execution error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
            AppError::Unauthorized => {
                tracing::warn!("Rejected request with missing or invalid API key");
                (StatusCode::UNAUTHORIZED, self.to_string())
            }
        };

        let body = Json(ErrorResponse {
            error: message,
            code: status.as_u16(),
        });

        (status, body).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::FetchError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
