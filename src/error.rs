/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / JSON error body)
 * - RepoError を統一的に変換 (handler ごとの ad hoc な 500 は作らない)
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::repos::error::RepoError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed")]
    Validation(Vec<String>),

    #[error("unauthorized")]
    Unauthorized,

    #[error("forbidden")]
    Forbidden,

    #[error("not found: {message}")]
    NotFound { message: &'static str },

    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn not_found(message: &'static str) -> Self {
        Self::NotFound { message }
    }
}

#[derive(Serialize)]
struct MessageBody {
    message: &'static str,
}

#[derive(Serialize)]
struct ErrorsBody {
    errors: Vec<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(ErrorsBody { errors })).into_response()
            }
            // 401 and 403 share one generic body: the response must not say
            // whether the user is unknown, the secret wrong, or the resource
            // owned by someone else.
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(MessageBody {
                    message: "Access Denied",
                }),
            )
                .into_response(),
            AppError::Forbidden => (
                StatusCode::FORBIDDEN,
                Json(MessageBody {
                    message: "Access Denied",
                }),
            )
                .into_response(),
            AppError::NotFound { message } => {
                (StatusCode::NOT_FOUND, Json(MessageBody { message })).into_response()
            }
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(MessageBody {
                    message: "internal server error",
                }),
            )
                .into_response(),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            // The only unique constraint in the schema is users."emailAddress".
            RepoError::Conflict => AppError::Validation(vec![
                "The email address you entered already exists.".to_string(),
            ]),
            RepoError::Db(err) => {
                tracing::error!(error = ?err, "data store failure");
                AppError::Internal
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_match_taxonomy() {
        assert_eq!(
            AppError::Validation(vec!["x".to_string()])
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Unauthorized.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Forbidden.into_response().status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::not_found("This course does not exist.")
                .into_response()
                .status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Internal.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn unique_violation_becomes_validation_error() {
        let err: AppError = RepoError::Conflict.into();
        match err {
            AppError::Validation(errors) => assert!(!errors.is_empty()),
            other => panic!("expected Validation, got {other:?}"),
        }
    }
}
