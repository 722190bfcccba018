//! Error types for the HTTP API

use crate::api::MessageResponse;
use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use roster_core::RosterError;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Bad request (400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Missing or rejected bearer token (401)
    #[error("Unauthorized")]
    Unauthorized,

    /// Not found (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unhandled failure (500), rendered by the exception boundary
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// API result type
pub type ApiResult<T> = Result<T, ApiError>;

/// Marker attached to a response whose handler failed internally.
///
/// The response carrying it has status 500 and an empty body. The exception
/// boundary replaces the whole response with the final error body.
#[derive(Debug, Clone)]
pub struct InternalFailure {
    /// Top-level error message
    pub message: String,
    /// Error chain and backtrace
    pub detail: String,
}

impl InternalFailure {
    /// Capture message and diagnostics from an error
    pub fn from_error(err: &anyhow::Error) -> Self {
        Self {
            message: err.to_string(),
            detail: format!("{:?}", err),
        }
    }
}

impl From<RosterError> for ApiError {
    fn from(err: RosterError) -> Self {
        match err {
            RosterError::NotFound(_) => ApiError::NotFound(err.to_string()),
            RosterError::InvalidId(_)
            | RosterError::NameRequired
            | RosterError::InvalidEmail
            | RosterError::AddressParse(_) => ApiError::BadRequest(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, Json(msg)).into_response(),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(MessageResponse::new("Unauthorized")),
            )
                .into_response(),
            ApiError::NotFound(_) => StatusCode::NOT_FOUND.into_response(),
            ApiError::Internal(err) => {
                let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
                response
                    .extensions_mut()
                    .insert(InternalFailure::from_error(&err));
                response
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn test_api_error_display() {
        let err = ApiError::BadRequest("Invalid input".to_string());
        assert_eq!(format!("{}", err), "Bad request: Invalid input");

        assert_eq!(format!("{}", ApiError::Unauthorized), "Unauthorized");

        let err = ApiError::NotFound("User 3 not found".to_string());
        assert_eq!(format!("{}", err), "Not found: User 3 not found");

        let err = ApiError::Internal(anyhow::anyhow!("boom"));
        assert_eq!(format!("{}", err), "Internal error: boom");
    }

    #[test]
    fn test_api_error_from_roster_error() {
        let err: ApiError = RosterError::NameRequired.into();
        assert!(matches!(err, ApiError::BadRequest(ref m) if m == "Name is required."));

        let err: ApiError = RosterError::InvalidEmail.into();
        assert!(matches!(err, ApiError::BadRequest(ref m) if m == "Invalid email format."));

        let err: ApiError = RosterError::InvalidId(0).into();
        assert!(matches!(err, ApiError::BadRequest(ref m) if m == "Invalid user ID."));

        let err: ApiError = RosterError::NotFound(4).into();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_bad_request_body_is_json_string() {
        let response = ApiError::BadRequest("Name is required.".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json, "Name is required.");
    }

    #[tokio::test]
    async fn test_unauthorized_body() {
        let response = ApiError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json, serde_json::json!({"message": "Unauthorized"}));
    }

    #[tokio::test]
    async fn test_not_found_has_empty_body() {
        let response = ApiError::NotFound("gone".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_internal_error_defers_body_to_boundary() {
        let err = anyhow::anyhow!("disk on fire").context("saving user");
        let mut response = ApiError::Internal(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let failure = response.extensions_mut().remove::<InternalFailure>().unwrap();
        assert_eq!(failure.message, "saving user");
        assert!(failure.detail.contains("disk on fire"));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());
    }
}
