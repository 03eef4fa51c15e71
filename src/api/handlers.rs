//! HTTP request handlers for the Severance Settlement Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::calculate_settlement;
use crate::report::SettlementReport;

use super::request::CalculationRequest;
use super::response::{ApiError, ApiErrorResponse, CalculationResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .with_state(state)
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Handler for POST /calculate endpoint.
///
/// Accepts a termination request and returns the calculated settlement
/// together with its formatted report.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing settlement request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    ApiError::new("VALIDATION_ERROR", body_text)
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
            };
            return json_response(StatusCode::BAD_REQUEST, error);
        }
    };

    let input = match request.into_input() {
        Ok(input) => input,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                fields = ?err.fields(),
                "Rejected settlement input"
            );
            return json_response(StatusCode::BAD_REQUEST, ApiError::validation_error(err));
        }
    };

    let config = state.config();
    let start_time = Instant::now();
    match calculate_settlement(&input, config) {
        Ok(result) => {
            let duration = start_time.elapsed();
            info!(
                correlation_id = %correlation_id,
                termination_reason = input.termination_reason.as_str(),
                gross_total = result.gross_total,
                net_total = result.net_total,
                warnings = result.audit_trace.warnings.len(),
                duration_us = duration.as_micros(),
                "Settlement calculated successfully"
            );
            let report = SettlementReport::from_result(&input, &result);
            json_response(
                StatusCode::OK,
                CalculationResponse {
                    calculation_id: correlation_id,
                    engine_version: env!("CARGO_PKG_VERSION").to_string(),
                    config_version: config.metadata().version.clone(),
                    result,
                    report,
                },
            )
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Settlement calculation failed"
            );
            let api_error: ApiErrorResponse = err.into();
            json_response(api_error.status, api_error.error)
        }
    }
}
