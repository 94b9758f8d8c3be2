use axum::{
    Json, Router, middleware,
    routing::{get, post},
};
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::middleware::require_auth;
use crate::state::AppState;
use crate::{attendees, auth, events, users};

pub const API_PREFIX: &str = "/api/v1";

/// Assemble the full application router.
///
/// Register/login are public; everything else under the prefix sits behind
/// `require_auth`. The gate is a route layer, so unknown paths stay 404.
pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login));

    let protected_routes = Router::new()
        .route("/users", post(users::create_user).get(users::get_users))
        .route(
            "/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/events", post(events::create_event).get(events::get_events))
        .route(
            "/events/{id}",
            get(events::get_event)
                .put(events::update_event)
                .delete(events::delete_event),
        )
        .route("/events/{id}/attendees", get(events::get_attendees_for_event))
        .route(
            "/events/{id}/attendees/{user_id}",
            post(events::add_attendee_to_event),
        )
        .route(
            "/attendees",
            post(attendees::create_attendee).get(attendees::get_attendees),
        )
        .route(
            "/attendees/{id}",
            get(attendees::get_attendee)
                .put(attendees::update_attendee)
                .delete(attendees::delete_attendee),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .nest(API_PREFIX, public_routes.merge(protected_routes))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
