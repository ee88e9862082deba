use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;

use crate::engine::models::SavingsReport;

/// Application error types
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// One or more required request fields are absent
    MissingFields(Vec<String>),
    /// Fuel type is not in the configured price table
    InvalidFuelType(String),
    /// A field value failed to parse or is out of domain.
    ///
    /// Also covers malformed boolean flags: the taxonomy has no separate
    /// kind for them, and the message names the field and the expected
    /// type, so clients see "Invalid value for hasSolar: expected a
    /// boolean, ...".
    InvalidNumericValue { field: &'static str, message: String },
    /// Unexpected failure during computation
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFields(fields) => {
                write!(f, "Missing required fields: {}", fields.join(", "))
            }
            Self::InvalidFuelType(fuel_type) => write!(f, "Invalid fuel type: {}", fuel_type),
            Self::InvalidNumericValue { field, message } => {
                write!(f, "Invalid value for {}: {}", field, message)
            }
            Self::Internal(msg) => write!(f, "An error occurred: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Error body: the message plus the complete zero-filled report shape,
/// so clients always receive every numeric field.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(flatten)]
    report: SavingsReport,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::MissingFields(_)
            | Self::InvalidFuelType(_)
            | Self::InvalidNumericValue { .. } => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        tracing::warn!(kind = error_kind(&self), error = %self, "Rejecting calculation request");

        let body = Json(ErrorBody {
            error: self.to_string(),
            report: SavingsReport::zeroed(),
        });

        (status, body).into_response()
    }
}

fn error_kind(error: &AppError) -> &'static str {
    match error {
        AppError::MissingFields(_) => "missing_fields",
        AppError::InvalidFuelType(_) => "invalid_fuel_type",
        AppError::InvalidNumericValue { .. } => "invalid_numeric_value",
        AppError::Internal(_) => "internal_error",
    }
}
