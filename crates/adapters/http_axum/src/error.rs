//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use smarthome_app::services::reading_service::AggregationError;
use smarthome_domain::error::{SmartHomeError, ValidationError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps service errors to an HTTP response with appropriate status code.
#[derive(Debug)]
pub enum ApiError {
    Service(SmartHomeError),
    Aggregation(AggregationError),
}

impl From<SmartHomeError> for ApiError {
    fn from(err: SmartHomeError) -> Self {
        Self::Service(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Service(err.into())
    }
}

impl From<AggregationError> for ApiError {
    fn from(err: AggregationError) -> Self {
        match err {
            AggregationError::Repository(inner) => Self::Service(inner),
            other => Self::Aggregation(other),
        }
    }
}

fn service_status(err: &SmartHomeError) -> (StatusCode, String) {
    match err {
        SmartHomeError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
        SmartHomeError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
        SmartHomeError::Conflict(err) => (StatusCode::CONFLICT, err.to_string()),
        SmartHomeError::Storage(err) => {
            tracing::error!(error = %err, "storage error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal server error".to_string(),
            )
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Service(err) => service_status(err),
            Self::Aggregation(err @ AggregationError::InvalidPeriod(_)) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            Self::Aggregation(err) => (StatusCode::NOT_FOUND, err.to_string()),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
