//! Mapping from access-layer errors and extractor rejections to HTTP responses.

use api_shared::ErrorBody;
use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use neurocase_core::{RecordError, UuidError};

/// An error ready to be rendered as `{ "error": { "code", "message" } }`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            "internal server error",
        )
    }
}

impl From<RecordError> for ApiError {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::NotFound { .. } => {
                Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string())
            }
            RecordError::Validation(msg) => {
                Self::new(StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR", msg)
            }
            RecordError::Integrity(msg) => {
                Self::new(StatusCode::CONFLICT, "INTEGRITY_ERROR", msg)
            }
            RecordError::InvalidId(e) => e.into(),
            other => {
                tracing::error!(error = %other, "request failed");
                Self::internal()
            }
        }
    }
}

impl From<UuidError> for ApiError {
    fn from(err: UuidError) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "INVALID_ID", err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::MissingJsonContentType(_) => Self::new(
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_MEDIA_TYPE",
                rejection.body_text(),
            ),
            _ => Self::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION_ERROR",
                rejection.body_text(),
            ),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "INVALID_QUERY", rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody::new(self.code, self.message))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use neurocase_core::RecordId;

    #[test]
    fn record_errors_map_to_statuses() {
        let cases = [
            (
                RecordError::not_found("patient", RecordId::new()),
                StatusCode::NOT_FOUND,
            ),
            (
                RecordError::Validation("age out of range".into()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                RecordError::Integrity("FOREIGN KEY constraint failed".into()),
                StatusCode::CONFLICT,
            ),
            (
                RecordError::InvalidId(UuidError::InvalidInput("nope".into())),
                StatusCode::BAD_REQUEST,
            ),
            (
                RecordError::MigrationFailed {
                    version: 1,
                    reason: "disk full".into(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }

    #[test]
    fn internal_errors_hide_detail() {
        let err = ApiError::from(RecordError::InvalidConfig("secret path".into()));
        assert_eq!(err.code(), "INTERNAL_ERROR");
        assert!(!err.message.contains("secret"));
    }
}
