//! HTTP error mapping for the API layer
//!
//! Every failure leaves the service as `{"success": false, "error": ...}`.

use crate::api::messages::ErrorResponse;
use crate::error::PtiError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Errors returned from API handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Calculation failed: {0}")]
    Unprocessable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Metric label for this failure
    pub fn reason(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Unprocessable(_) => "non_finite",
            ApiError::Internal(_) => "internal",
        }
    }
}

impl From<PtiError> for ApiError {
    fn from(err: PtiError) -> Self {
        match err {
            PtiError::InvalidRequest { .. } => ApiError::BadRequest(err.to_string()),
            PtiError::NonFiniteResult { .. } => ApiError::Unprocessable(err.to_string()),
            PtiError::ConfigurationError { .. } => ApiError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pti_error_mapping() {
        let err: ApiError = PtiError::NonFiniteResult {
            field: "spread".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.reason(), "non_finite");

        let err: ApiError = PtiError::InvalidRequest {
            reason: "missing".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err: ApiError = PtiError::ConfigurationError {
            message: "oops".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.reason(), "internal");
    }

    #[test]
    fn test_into_response_status() {
        let response = ApiError::BadRequest("nope".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_internal_error_body() {
        let response = ApiError::Internal("Failed to encode metrics".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Internal error: Failed to encode metrics");
    }
}
