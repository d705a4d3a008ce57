use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

use crate::engine::CostError;

/// Application error types
#[derive(Debug)]
pub enum AppError {
    /// Configuration error
    ConfigError(String),
    /// No user profile has been created yet
    ProfileNotFound,
    /// Input rejected before any computation
    InvalidInput(String),
    /// Error response returned by the service (client side)
    UpstreamError { status: StatusCode, message: String },
    /// Storage or other internal failure
    InternalError(String),
    /// HTTP request error (client side)
    HttpRequest(reqwest::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            Self::ProfileNotFound => write!(f, "No user profile found. Create one first."),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Self::UpstreamError { status, message } => {
                write!(f, "Service error ({}): {}", status, message)
            }
            Self::InternalError(msg) => write!(f, "Internal error: {}", msg),
            Self::HttpRequest(err) => write!(f, "HTTP request error: {}", err),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ProfileNotFound => StatusCode::NOT_FOUND,
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::UpstreamError { status, .. } => *status,
            Self::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::HttpRequest(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_message = match &self {
            Self::ConfigError(msg) => msg.clone(),
            Self::ProfileNotFound => self.to_string(),
            Self::InvalidInput(msg) => msg.clone(),
            Self::UpstreamError { message, .. } => message.clone(),
            Self::InternalError(msg) => {
                tracing::error!(error = %msg, "Request failed");
                // Storage details stay in the logs
                "internal error".to_string()
            }
            Self::HttpRequest(err) => err.to_string(),
        };

        crate::metrics::record_error(error_type_name(&self));

        let body = Json(json!({
            "error": {
                "message": error_message,
                "type": error_type_name(&self),
            }
        }));

        (self.status(), body).into_response()
    }
}

pub fn error_type_name(error: &AppError) -> &'static str {
    match error {
        AppError::ConfigError(_) => "config_error",
        AppError::ProfileNotFound => "not_found",
        AppError::InvalidInput(_) => "invalid_input",
        AppError::UpstreamError { .. } => "upstream_error",
        AppError::InternalError(_) => "internal_error",
        AppError::HttpRequest(_) => "http_request_error",
    }
}

// Implement conversions from common error types
impl From<CostError> for AppError {
    fn from(err: CostError) -> Self {
        match err {
            CostError::InvalidInput(msg) => Self::InvalidInput(msg),
            CostError::ProfileNotFound => Self::ProfileNotFound,
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::InternalError(format!("{:#}", err))
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        Self::InternalError(format!("database error: {}", err))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        Self::HttpRequest(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::InternalError(format!("JSON error: {}", err))
    }
}
