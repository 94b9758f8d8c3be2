use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;

use gather_types::api::AttendeeInput;

use crate::error::ApiError;
use crate::extract::{ApiJson, parse_id};
use crate::state::{AppState, with_db};

/// The store does not read back the new id, so the echoed attendee has `id: 0`.
pub async fn create_attendee(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<AttendeeInput>,
) -> Result<impl IntoResponse, ApiError> {
    with_db(&state, move |db| db.insert_attendee(input.user_id, input.event_id)).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "attendee": input.into_attendee(0) })),
    ))
}

pub async fn get_attendees(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let attendees = with_db(&state, |db| db.get_attendees()).await?;
    Ok(Json(json!({ "attendees": attendees })))
}

pub async fn get_attendee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id, "attendee")?;
    let attendee = with_db(&state, move |db| db.get_attendee(id)).await?;
    Ok(Json(json!({ "attendee": attendee })))
}

pub async fn update_attendee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(input): ApiJson<AttendeeInput>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id, "attendee")?;
    with_db(&state, move |db| db.update_attendee(id, input.user_id, input.event_id)).await?;
    Ok(Json(json!({ "message": "Attendee updated successfully" })))
}

pub async fn delete_attendee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id, "attendee")?;
    with_db(&state, move |db| db.delete_attendee(id)).await?;
    Ok(Json(json!({ "message": "Attendee deleted successfully" })))
}
