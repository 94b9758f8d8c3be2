use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use tracing::info;

use gather_types::api::{Claims, EventInput};

use crate::error::ApiError;
use crate::extract::{ApiJson, parse_id};
use crate::state::{AppState, with_db};

pub async fn create_event(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    ApiJson(input): ApiJson<EventInput>,
) -> Result<impl IntoResponse, ApiError> {
    let event = input.into_event(0);
    let event = with_db(&state, move |db| db.insert_event(&event)).await?;

    info!(event_id = event.id, created_by = claims.user_id, "event created");
    Ok((StatusCode::CREATED, Json(json!({ "event": event }))))
}

pub async fn get_events(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let events = with_db(&state, |db| db.get_events()).await?;
    Ok(Json(json!({ "events": events })))
}

pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id, "event")?;
    let event = with_db(&state, move |db| db.get_event(id)).await?;
    Ok(Json(json!({ "event": event })))
}

/// Full replace: fields missing from the body are overwritten with defaults.
pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(input): ApiJson<EventInput>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id, "event")?;
    let event = input.into_event(id);

    with_db(&state, move |db| db.update_event(id, &event)).await?;
    Ok(Json(json!({ "message": "Event updated successfully" })))
}

pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id, "event")?;
    with_db(&state, move |db| db.delete_event(id)).await?;
    Ok(Json(json!({ "message": "Event deleted successfully" })))
}

/// POST /events/{id}/attendees/{user_id}
pub async fn add_attendee_to_event(
    State(state): State<AppState>,
    Path((event_id, user_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let event_id = parse_id(&event_id, "event")?;
    let user_id = parse_id(&user_id, "user")?;

    with_db(&state, move |db| db.insert_attendee(user_id, event_id)).await?;
    Ok(Json(json!({ "message": "Attendee added to event successfully" })))
}

/// GET /events/{id}/attendees
pub async fn get_attendees_for_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let event_id = parse_id(&event_id, "event")?;
    let attendees = with_db(&state, move |db| db.get_attendees_by_event(event_id)).await?;
    Ok(Json(json!({ "attendees": attendees })))
}
