//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::services::FilterError;
use crate::store::StoreError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found
    NotFound(String),
    /// Rejected filter values
    InvalidFilter(FilterError),
    /// Internal server error
    Internal(String),
    /// Store error
    Store(StoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg)),
            AppError::InvalidFilter(e) => {
                let FilterError::InvalidFilterInput { field, .. } = &e;
                (
                    StatusCode::BAD_REQUEST,
                    ApiError::new("INVALID_FILTER_INPUT", e.to_string()).with_details(*field),
                )
            }
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", msg),
            ),
            AppError::Store(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("STORE_ERROR", e.to_string()),
            ),
        };

        (status, Json(error)).into_response()
    }
}

impl From<FilterError> for AppError {
    fn from(err: FilterError) -> Self {
        AppError::InvalidFilter(err)
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Store(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_error_maps_to_bad_request() {
        let err = AppError::from(FilterError::InvalidFilterInput {
            field: "min_rooms",
            reason: "must not be negative, got -1".to_string(),
        });
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_status() {
        let err = AppError::NotFound("No route for /v1/nope".to_string());
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_store_error_maps_to_internal() {
        let err = AppError::from(StoreError::data_load("rents.csv", "truncated"));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_api_error_skips_missing_details() {
        let json = serde_json::to_value(ApiError::new("NOT_FOUND", "nope")).unwrap();
        assert!(json.get("details").is_none());
        assert_eq!(json["code"], "NOT_FOUND");
    }
}
