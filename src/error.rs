//! Service-level error type mapped onto the HTTP surface.
//!
//! # Responsibilities
//! - Carry field-level validation detail to the caller (400)
//! - Signal quota exhaustion with a machine-readable retry hint (429)
//! - Hide store/upstream detail behind a generic message (500)
//!
//! # Design Decisions
//! - Store failures are logged at the call site with full detail; only
//!   the generic public message crosses the trust boundary
//! - 429 responses carry both a JSON `retryAfter` field and the standard
//!   `Retry-After` header when the window remainder is known

use axum::{
    http::{header::RETRY_AFTER, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::submission::validate::ValidationError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or out-of-bound input. Surfaced with field detail.
    #[error("{0}")]
    Validation(String),

    /// Caller exceeded a rate-limit window.
    #[error("{message}")]
    RateLimited {
        message: String,
        retry_after_secs: Option<u64>,
    },

    /// Request used a method the endpoint does not serve.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Missing or unrecognized admin credential.
    #[error("Unauthorized")]
    Unauthorized,

    /// Requested record, blob, or token does not exist (or expired).
    #[error("Not found")]
    NotFound,

    /// Store or upstream failure. `message` is the public text; the
    /// caller logs the underlying error before constructing this.
    #[error("{message}")]
    Internal { message: &'static str },
}

impl ApiError {
    pub fn internal(message: &'static str) -> Self {
        Self::Internal { message }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            ApiError::RateLimited {
                message,
                retry_after_secs,
            } => json!({
                "success": false,
                "error": message,
                "retryAfter": retry_after_secs,
            }),
            other => json!({ "success": false, "error": other.to_string() }),
        };

        let mut response = (status, Json(body)).into_response();

        if let ApiError::RateLimited {
            retry_after_secs: Some(secs),
            ..
        } = self
        {
            if let Ok(value) = secs.to_string().parse() {
                response.headers_mut().insert(RETRY_AFTER, value);
            }
        }

        response
    }
}
