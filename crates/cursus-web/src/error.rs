//! API error responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use cursus_authorization::AccessDenied;
use cursus_core::CursusError;
use serde::Serialize;

/// Error returned by handlers and middleware
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// No usable session
    #[error("{0}")]
    Unauthorized(String),
    /// Session present, access refused
    #[error("{0}")]
    Forbidden(String),
    /// Malformed request
    #[error("{0}")]
    BadRequest(String),
    /// Anything else
    #[error("{0}")]
    Internal(String),
}

/// JSON body of an error response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Short machine-readable code
    pub error: &'static str,
    /// Human-readable message
    pub message: String,
}

impl ApiError {
    /// No usable session
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    /// Malformed request
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::Unauthorized(_) => "unauthorized",
            ApiError::Forbidden(_) => "forbidden",
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Internal(_) => "internal",
        }
    }
}

impl From<AccessDenied> for ApiError {
    fn from(err: AccessDenied) -> Self {
        ApiError::Forbidden(err.to_string())
    }
}

impl From<CursusError> for ApiError {
    fn from(err: CursusError) -> Self {
        match err {
            CursusError::Invalid { message } => ApiError::BadRequest(message),
            CursusError::PermissionDenied { message } => ApiError::Forbidden(message),
            other => {
                tracing::warn!(error = %other, "request failed");
                ApiError::Internal("internal error".to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.code(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cursus_core::{CourseId, UserId};

    #[test]
    fn test_access_denied_maps_to_forbidden() {
        let err: ApiError = AccessDenied {
            actor: UserId(1),
            resource: CourseId(4).into(),
        }
        .into();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
        assert_eq!(err.to_string(), "access denied to course-4");
    }

    #[test]
    fn test_cursus_errors_map_by_category() {
        assert_eq!(
            ApiError::from(CursusError::invalid("bad lifetime")).status(),
            StatusCode::BAD_REQUEST
        );
        let internal = ApiError::from(CursusError::storage("disk on fire"));
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!internal.to_string().contains("disk"));
    }
}
