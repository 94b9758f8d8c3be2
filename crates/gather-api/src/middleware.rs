use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::error::{ApiError, INVALID_TOKEN, INVALID_TOKEN_FORMAT, UNAUTHORIZED};
use crate::state::AppState;

/// Gate for protected routes.
///
/// Missing header, empty token and failed verification all end in a 401 with
/// an `{"error": ...}` body. On success the decoded `Claims` go into the
/// request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if auth_header.is_empty() {
        return Err(ApiError::unauthorized(UNAUTHORIZED));
    }

    let token = auth_header.strip_prefix("Bearer ").unwrap_or(auth_header);
    if token.is_empty() {
        return Err(ApiError::unauthorized(INVALID_TOKEN_FORMAT));
    }

    let claims = state.tokens.verify(token).map_err(|_| {
        warn!("Rejected bearer token on {} {}", req.method(), req.uri().path());
        ApiError::unauthorized(INVALID_TOKEN)
    })?;

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
