//! API error type and response envelopes.
//!
//! Every error response carries the envelope
//! `{"success": false, "reason": <code>, "message": <text>}` with one of
//! five reason codes: `VALIDATION_ERROR`, `AUTH_ERROR`, `NOT_FOUND`,
//! `DUPLICATE_ERROR`, `DATABASE_ERROR`. Database internals are logged,
//! never sent to the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use serde_json::json;
use tracing::error;

use quicksnip_core::error::{AuthError, DomainError, StorageError};

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// HTTP-facing error: each variant fixes a status code and reason code.
#[derive(Debug)]
pub enum ApiError {
    /// 400 - malformed input (bad limit, cursor, ids, field bounds).
    Validation(String),
    /// 401 - missing/invalid/expired credentials.
    Unauthorized(String),
    /// 403 - authenticated but not the owner.
    Forbidden(String),
    /// 404 - entity absent or not visible to the caller.
    NotFound(String),
    /// 409 - unique-constraint conflict.
    Duplicate(String),
    /// 500 - unexpected failure; the message is logged, not returned.
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Duplicate(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn reason(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Unauthorized(_) | Self::Forbidden(_) => "AUTH_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Duplicate(_) => "DUPLICATE_ERROR",
            Self::Internal(_) => "DATABASE_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            Self::Internal(details) => {
                error!(details = %details, "internal error");
                "Unexpected server error".to_string()
            }
            Self::Validation(m)
            | Self::Unauthorized(m)
            | Self::Forbidden(m)
            | Self::NotFound(m)
            | Self::Duplicate(m) => m.clone(),
        };

        let body = json!({
            "success": false,
            "reason": self.reason(),
            "message": message,
        });

        (self.status(), Json(body)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(m) => Self::Validation(m),
            DomainError::NotFound(m) => Self::NotFound(m),
            DomainError::Duplicate(m) => Self::Duplicate(m),
            DomainError::Auth(e) => e.into(),
            DomainError::Storage(e) => e.into(),
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::ConstraintViolation(m) => Self::Duplicate(m),
            StorageError::NotFound(m) => Self::NotFound(m),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Forbidden(m) => Self::Forbidden(m),
            AuthError::Internal(m) => Self::Internal(m),
            other => Self::Unauthorized(other.to_string()),
        }
    }
}

// =============================================================================
// Success Envelope
// =============================================================================

/// The success envelope: `{"success": true, "message": ..., "data": ...}`.
#[derive(Debug, Serialize)]
pub struct SuccessBody<T: Serialize> {
    pub success: bool,
    pub message: String,
    pub data: T,
}

impl<T: Serialize> SuccessBody<T> {
    pub fn new(message: impl Into<String>, data: T) -> Json<Self> {
        Json(Self {
            success: true,
            message: message.into(),
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraint_violation_maps_to_conflict() {
        let err: ApiError = StorageError::ConstraintViolation("dup title".into()).into();
        assert!(matches!(err, ApiError::Duplicate(_)));
        assert_eq!(err.status(), StatusCode::CONFLICT);
        assert_eq!(err.reason(), "DUPLICATE_ERROR");
    }

    #[test]
    fn query_failure_maps_to_generic_500() {
        let err: ApiError = StorageError::QueryError("secret connection detail".into()).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.reason(), "DATABASE_ERROR");
    }

    #[test]
    fn ownership_mismatch_is_forbidden() {
        let err: ApiError = AuthError::Forbidden("not yours".into()).into();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
        assert_eq!(err.reason(), "AUTH_ERROR");
    }

    #[test]
    fn expired_token_is_unauthorized() {
        let err: ApiError = AuthError::TokenExpired.into();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }
}
