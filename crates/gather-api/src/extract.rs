use axum::extract::FromRequest;

use crate::error::ApiError;

/// `axum::Json` with rejections rendered as `{"error": ...}` 400s.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Path ids arrive as text so a bad one produces our error body, not axum's.
pub fn parse_id(raw: &str, entity: &str) -> Result<i64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::Validation(format!("Invalid {} ID", entity)))
}
