//! HTTP-facing error type. Handlers return `ApiError`; this is the only place
//! that decides status codes.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use gather_db::DbError;

use crate::token::TokenError;

pub const UNAUTHORIZED: &str = "Unauthorized";
pub const INVALID_TOKEN_FORMAT: &str = "Invalid token format";
pub const INVALID_TOKEN: &str = "Invalid token";
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Infrastructure(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn unauthorized(message: &str) -> Self {
        ApiError::Unauthorized(message.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match &err {
            DbError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            _ => {
                error!("store failure: {}", err);
                ApiError::Infrastructure(err.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Invalid => ApiError::unauthorized(INVALID_TOKEN),
            TokenError::Signing(e) => {
                error!("token signing failed: {}", e);
                ApiError::Infrastructure("Error generating token".into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::Validation("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::unauthorized(UNAUTHORIZED).status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::NotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Infrastructure("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_db_errors() {
        let not_found = ApiError::from(DbError::NotFound { entity: "event" });
        assert!(matches!(&not_found, ApiError::NotFound(m) if m == "event not found"));

        let timeout = ApiError::from(DbError::Timeout(Duration::from_secs(3)));
        assert_eq!(timeout.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_token_errors() {
        let invalid = ApiError::from(TokenError::Invalid);
        assert!(matches!(&invalid, ApiError::Unauthorized(m) if m == INVALID_TOKEN));
    }
}
