use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;

use gather_types::api::{RegisterRequest, UpdateUserRequest};

use crate::auth::create_account;
use crate::error::ApiError;
use crate::extract::{ApiJson, parse_id};
use crate::state::{AppState, with_db};

pub async fn create_user(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = create_account(&state, req).await?;
    Ok((StatusCode::CREATED, Json(json!({ "user": user }))))
}

pub async fn get_users(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let users = with_db(&state, |db| db.get_users()).await?;
    Ok(Json(json!({ "users": users })))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id, "user")?;
    let user = with_db(&state, move |db| db.get_user(id)).await?;
    Ok(Json(json!({ "user": user })))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id, "user")?;
    if req.name.trim().is_empty() {
        return Err(ApiError::Validation("name is required".into()));
    }

    with_db(&state, move |db| db.update_user(id, &req.name, &req.email)).await?;
    Ok(Json(json!({ "message": "User updated successfully" })))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id, "user")?;
    with_db(&state, move |db| db.delete_user(id)).await?;
    Ok(Json(json!({ "message": "User deleted successfully" })))
}
