// HTTP API Error Types
use axum::{
    extract::rejection::JsonRejection,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};

use crate::auth::AuthError;
use crate::database::StoreError;
use crate::drive::DriveError;

/// HTTP API error with its status code and the body sent to the client
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    InvalidJson(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 500 Internal Server Error
    Store(String),
    InternalServerError(String),

    /// Failure reported by a remote API; status and body are forwarded verbatim.
    Upstream { status: u16, body: UpstreamBody },
}

/// Raw error body received from a remote API
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamBody {
    Json(Value),
    Text(String),
}

impl UpstreamBody {
    /// Keep JSON bodies as JSON so clients see the remote error structure unchanged.
    pub fn from_raw(raw: String) -> Self {
        match serde_json::from_str::<Value>(&raw) {
            Ok(value) => UpstreamBody::Json(value),
            Err(_) => UpstreamBody::Text(raw),
        }
    }
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::InvalidJson(_) => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::Store(_) => 500,
            ApiError::InternalServerError(_) => 500,
            ApiError::Upstream { status, .. } => *status,
        }
    }

    /// Get client-facing error message
    pub fn message(&self) -> String {
        match self {
            ApiError::InvalidJson(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Store(msg)
            | ApiError::InternalServerError(msg) => msg.clone(),
            ApiError::Upstream { body: UpstreamBody::Text(text), .. } => text.clone(),
            ApiError::Upstream { body: UpstreamBody::Json(value), .. } => value.to_string(),
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::InvalidJson(_) => "INVALID_JSON",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::Store(_) => "STORE_ERROR",
            ApiError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
            ApiError::Upstream { .. } => "UPSTREAM_ERROR",
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        match self {
            ApiError::Upstream { body: UpstreamBody::Json(value), .. } => value.clone(),
            _ => json!({
                "error": true,
                "message": self.message(),
                "code": self.error_code()
            }),
        }
    }
}

impl ApiError {
    pub fn invalid_json(message: impl Into<String>) -> Self {
        ApiError::InvalidJson(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn upstream(status: u16, raw_body: String) -> Self {
        ApiError::Upstream {
            status,
            body: UpstreamBody::from_raw(raw_body),
        }
    }
}

// Convert other error types to ApiError
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        tracing::error!("Note store error: {}", err);
        ApiError::Store(err.to_string())
    }
}

impl From<DriveError> for ApiError {
    fn from(err: DriveError) -> Self {
        match err {
            DriveError::Remote { status, body } => {
                tracing::warn!("Drive API rejected upload with status {}", status);
                ApiError::upstream(status.as_u16(), body)
            }
            DriveError::Transport(e) => {
                tracing::error!("Drive API request failed: {}", e);
                ApiError::internal_server_error(e.to_string())
            }
            DriveError::InvalidBaseUrl(msg) => {
                tracing::error!("Drive API base URL is invalid: {}", msg);
                ApiError::internal_server_error(format!("Invalid Drive API URL: {}", msg))
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::unauthorized(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::invalid_json(rejection.body_text())
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        match self {
            ApiError::Upstream { body: UpstreamBody::Text(text), .. } => {
                (status, [(header::CONTENT_TYPE, "text/plain; charset=utf-8")], text).into_response()
            }
            other => (status, Json(other.to_json())).into_response(),
        }
    }
}
