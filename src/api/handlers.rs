//! HTTP request handlers for the Shift Timeclock Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{NetworkInfo, PunchMetadata};

use super::request::ActionRequest;
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/employees/:employee_id/status", get(status_handler))
        .route("/shifts/:shift_id/actions", post(action_handler))
        .with_state(state)
}

/// Handler for `GET /employees/{employee_id}/status`.
///
/// Returns today's shifts for the employee, ordered by scheduled start.
async fn status_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        employee_id = %employee_id,
        "Processing status request"
    );

    match state.controller().current_status(&employee_id) {
        Ok(status) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %employee_id,
                shifts_count = status.shifts.len(),
                "Status request completed"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(status),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                employee_id = %employee_id,
                error = %err,
                "Status request failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for `POST /shifts/{shift_id}/actions`.
///
/// Performs one action on the shift and returns its updated summary.
async fn action_handler(
    State(state): State<AppState>,
    Path(shift_id): Path<String>,
    headers: HeaderMap,
    payload: Result<Json<ActionRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        shift_id = %shift_id,
        "Processing shift action request"
    );

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            return ApiErrorResponse::bad_request(rejection_error(correlation_id, rejection))
                .into_response();
        }
    };

    let controller = state.controller();
    let user_id = match request.user_id {
        Some(user_id) => user_id,
        None => match controller.shift(&shift_id) {
            Ok(shift) => shift.employee_id,
            Err(err) => {
                warn!(correlation_id = %correlation_id, error = %err, "Shift lookup failed");
                return ApiErrorResponse::from(err).into_response();
            }
        },
    };
    let punch = PunchMetadata::user(user_id, request.location, network_info(&headers));

    let start_time = Instant::now();
    match controller.perform_action(&shift_id, request.action, punch) {
        Ok(summary) => {
            info!(
                correlation_id = %correlation_id,
                shift_id = %shift_id,
                action = ?request.action,
                state = %summary.state,
                duration_us = start_time.elapsed().as_micros(),
                "Shift action completed"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(summary),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                shift_id = %shift_id,
                action = ?request.action,
                error = %err,
                "Shift action rejected"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

fn rejection_error(correlation_id: Uuid, rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's description, including missing fields.
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    }
}

/// Caller network details: the first `X-Forwarded-For` entry and the
/// `User-Agent` header, each kept verbatim.
fn network_info(headers: &HeaderMap) -> NetworkInfo {
    let header_str = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
    };

    NetworkInfo {
        ip: header_str("x-forwarded-for")
            .and_then(|value| value.split(',').next())
            .map(|ip| ip.trim().to_string()),
        user_agent: header_str(header::USER_AGENT.as_str()).map(str::to_string),
    }
}
