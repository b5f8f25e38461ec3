//! Error handling for the FOLIO HTTP layer.
//!
//! Every domain failure is expressed as an [`AppError`] variant and rendered
//! at the boundary as `{"message": ..., "error": ...?}` JSON. Uniqueness
//! conflicts deliberately map to 400 rather than 409: that is the wire
//! contract the clients were written against.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use folio_store::StoreError;

/// Application error types that map to HTTP responses
#[derive(Error, Debug)]
pub enum AppError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create an unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    /// Create a forbidden error
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    /// HTTP status this error renders as.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Conflict(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate { .. } => Self::Conflict(err.to_string()),
            StoreError::NotFound { .. } => Self::NotFound(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_id = Uuid::new_v4();
        let status = self.status();

        let body = match self {
            AppError::Internal(err) => json!({
                "message": "Server error",
                "error": err.to_string(),
            }),
            other => json!({ "message": other_message(&other) }),
        };

        tracing::error!(
            error_id = %error_id,
            status_code = %status.as_u16(),
            message = %body["message"],
            "request error"
        );

        (status, Json(body)).into_response()
    }
}

fn other_message(err: &AppError) -> String {
    match err {
        AppError::Validation(message)
        | AppError::Conflict(message)
        | AppError::NotFound(message)
        | AppError::Unauthorized(message)
        | AppError::Forbidden(message) => message.clone(),
        AppError::Internal(err) => err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn validation_and_conflict_are_bad_request() {
        assert_eq!(
            AppError::validation("All fields are required").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::conflict("Book with this title already exists").status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn ownership_violation_is_forbidden() {
        let response = AppError::forbidden("You can only edit your own reviews").into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn missing_entity_is_not_found() {
        let response = AppError::not_found("Book not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn internal_error_maps_to_500() {
        let internal = anyhow::anyhow!("store unavailable");
        let response = AppError::Internal(internal).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn store_duplicate_becomes_conflict() {
        let err: AppError = folio_store::StoreError::Duplicate {
            collection: "books",
            index: "title",
        }
        .into();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[test]
    fn store_missing_becomes_not_found() {
        let err: AppError = folio_store::StoreError::NotFound {
            collection: "reviews",
            id: Uuid::new_v4(),
        }
        .into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }
}
