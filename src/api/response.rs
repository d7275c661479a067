//! Response types for the Shift Timeclock Engine API.
//!
//! This module defines the error body returned by every endpoint and the
//! mapping from [`TimeclockError`] to HTTP status codes.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::TimeclockError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A `400 Bad Request` carrying the given body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<TimeclockError> for ApiErrorResponse {
    fn from(error: TimeclockError) -> Self {
        let message = error.to_string();
        let (status, code, details) = match &error {
            TimeclockError::StateConflict { .. } => (
                StatusCode::CONFLICT,
                "STATE_CONFLICT",
                "The action is not valid in the shift's current state",
            ),
            TimeclockError::DuplicateActiveShift { .. } => (
                StatusCode::CONFLICT,
                "DUPLICATE_ACTIVE_SHIFT",
                "Finish the running shift before starting another one on the same day",
            ),
            TimeclockError::AlreadyFinished { .. } => (
                StatusCode::CONFLICT,
                "ALREADY_FINISHED",
                "Finished shifts cannot be modified",
            ),
            TimeclockError::BreakNotAllowed { .. } => (
                StatusCode::CONFLICT,
                "BREAK_NOT_ALLOWED",
                "The break policy does not allow this break right now",
            ),
            TimeclockError::NoOpenBreak { .. } => (
                StatusCode::CONFLICT,
                "NO_OPEN_BREAK",
                "Only a paused shift can be resumed",
            ),
            TimeclockError::NotContiguous { .. } => (
                StatusCode::CONFLICT,
                "NOT_CONTIGUOUS",
                "Automatic handoff requires the next shift to start when the current one ends",
            ),
            TimeclockError::ShiftNotFound { .. } => (
                StatusCode::NOT_FOUND,
                "SHIFT_NOT_FOUND",
                "No shift exists with this ID",
            ),
            TimeclockError::EmployeeNotFound { .. } => (
                StatusCode::NOT_FOUND,
                "EMPLOYEE_NOT_FOUND",
                "No employee exists with this ID",
            ),
            TimeclockError::InvalidShift { .. } => (
                StatusCode::BAD_REQUEST,
                "INVALID_SHIFT",
                "The shift data contains invalid information",
            ),
            TimeclockError::ConfigNotFound { .. } | TimeclockError::ConfigParseError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIG_ERROR",
                "The shift policy could not be loaded",
            ),
        };

        ApiErrorResponse {
            status,
            error: ApiError::with_details(code, message, details),
        }
    }
}
