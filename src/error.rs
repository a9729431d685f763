//! Frame server error types with HTTP status code mapping.
//!
//! [`FrameError`] is the central error type. Upstream failures are mostly
//! logged and degraded by the services; the variants that reach a client
//! map to a status code and a structured JSON body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::FidParseError;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1001,
///     "message": "invalid fid: \"abc\"",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category   | HTTP Status               |
/// |-----------|------------|---------------------------|
/// | 1000–1999 | Validation | 400 Bad Request           |
/// | 5000–5999 | Upstream   | 502 Bad Gateway           |
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// A user id in the request was not a decimal number.
    #[error(transparent)]
    InvalidFid(#[from] FidParseError),

    /// The data warehouse call failed or returned an unreadable body.
    #[error("data source error: {0}")]
    DataSource(String),

    /// The identity directory call failed or returned an unreadable body.
    #[error("identity directory error: {0}")]
    IdentityDirectory(String),
}

impl FrameError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidFid(_) => 1001,
            Self::DataSource(_) => 5001,
            Self::IdentityDirectory(_) => 5002,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidFid(_) => StatusCode::BAD_REQUEST,
            Self::DataSource(_) | Self::IdentityDirectory(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for FrameError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
