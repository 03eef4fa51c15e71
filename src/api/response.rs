//! Response types for the Severance Settlement Engine API.
//!
//! This module defines the success body, the error response structures and
//! the mapping from [`EngineError`] to HTTP statuses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, FieldIssue, ValidationError};
use crate::models::SettlementResult;
use crate::report::SettlementReport;

/// Successful response body for `/calculate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationResponse {
    /// Identifier of this calculation, also used as the log correlation id.
    pub calculation_id: Uuid,
    /// Version of the engine that produced the result.
    pub engine_version: String,
    /// Version of the statutory tables used.
    pub config_version: String,
    /// The typed settlement in centavos.
    pub result: SettlementResult,
    /// The same settlement formatted for display.
    pub report: SettlementReport,
}

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
    /// Per-field problems for validation errors.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldIssue>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            fields: Vec::new(),
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            details: Some(details.into()),
            ..Self::new(code, message)
        }
    }

    /// Creates a validation error response listing every offending field.
    pub fn validation_error(error: ValidationError) -> Self {
        Self {
            fields: error.issues.clone(),
            ..Self::new("VALIDATION_ERROR", error.to_string())
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::Validation(err) => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::validation_error(err),
            },
            EngineError::Computation { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CALCULATION_ERROR", "Calculation failed", message),
            },
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidConfig { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Invalid configuration", message),
            },
        }
    }
}
