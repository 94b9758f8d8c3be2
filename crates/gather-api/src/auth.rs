use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use tracing::{error, info, warn};

use gather_types::api::{LoginRequest, LoginResponse, RegisterRequest};
use gather_types::models::User;

use crate::error::{ApiError, INVALID_CREDENTIALS};
use crate::extract::ApiJson;
use crate::password::{hash_password, verify_password};
use crate::state::{AppState, with_db};

pub async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = create_account(&state, req).await?;
    info!(user_id = user.id, "registered user");

    Ok((StatusCode::CREATED, Json(json!({ "user": user }))))
}

pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    if req.email.is_empty() || req.password.is_empty() {
        return Err(ApiError::Validation("email and password are required".into()));
    }

    let email = req.email.clone();
    let credentials = match with_db(&state, move |db| db.get_user_by_email(&email)).await {
        Ok(credentials) => credentials,
        Err(ApiError::NotFound(_)) => {
            warn!("login failed: unknown email");
            return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
        }
        Err(e) => return Err(e),
    };

    if !verify_password(&credentials.password_hash, &req.password) {
        warn!(user_id = credentials.user.id, "login failed: password mismatch");
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    }

    let token = state
        .tokens
        .issue(credentials.user.id, &credentials.user.email)?;

    info!(user_id = credentials.user.id, "user logged in");
    Ok(Json(LoginResponse {
        user: credentials.user,
        token,
    }))
}

/// Shared by registration and `POST /users`: validate, hash, store.
pub(crate) async fn create_account(state: &AppState, req: RegisterRequest) -> Result<User, ApiError> {
    if req.name.trim().is_empty() {
        return Err(ApiError::Validation("name is required".into()));
    }

    let password_hash = hash_password(&req.password).map_err(|e| {
        error!("password hashing failed: {}", e);
        ApiError::Infrastructure("failed to hash password".into())
    })?;

    with_db(state, move |db| db.insert_user(&req.name, &req.email, &password_hash)).await
}
