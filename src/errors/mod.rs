/// Unified error handling module
use crate::clients::FetchError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;

/// Unified error response format
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

#[derive(Debug)]
#[allow(dead_code)]
pub enum ApiError {
    Upstream(FetchError),
    NotFound(String),
    InvalidInput(String),
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Upstream(e) => write!(f, "Upstream error: {}", e),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<FetchError> for ApiError {
    fn from(err: FetchError) -> Self {
        ApiError::Upstream(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (code, message) = match &self {
            ApiError::Upstream(e) => (upstream_code(e), format!("Upstream error: {}", e)),
            ApiError::NotFound(msg) => ("NOT_FOUND".to_string(), msg.clone()),
            ApiError::InvalidInput(msg) => ("INVALID_INPUT".to_string(), msg.clone()),
            ApiError::Internal(msg) => ("INTERNAL_ERROR".to_string(), msg.clone()),
        };

        let error_response = ErrorResponse {
            ok: false,
            error: ErrorDetail { code, message },
        };

        // Always return HTTP 200 with ok=false as per requirements
        (StatusCode::OK, Json(error_response)).into_response()
    }
}

fn upstream_code(err: &FetchError) -> String {
    match err {
        FetchError::Auth(status) => format!("UPSTREAM_{}", status.as_u16()),
        FetchError::Status(status) => match status.as_u16() {
            404 => "UPSTREAM_404".to_string(),
            500..=599 => "UPSTREAM_5XX".to_string(),
            other => format!("UPSTREAM_{}", other),
        },
        FetchError::RetriesExhausted { .. } => "UPSTREAM_429".to_string(),
        FetchError::Network(_) => "UPSTREAM_ERROR".to_string(),
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
