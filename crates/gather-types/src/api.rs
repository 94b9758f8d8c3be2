use serde::{Deserialize, Serialize};

use crate::models::{Attendee, Event, User};

// -- Token claims --

/// Bearer token claims. Issued at login, verified on every gated request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub email: String,
    pub exp: u64,
}

// -- Auth --

/// Used both by `/auth/register` and by direct `POST /users`. Extra keys such
/// as a client-supplied `id` are ignored.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: User,
    pub token: String,
}

// -- Entity payloads --

/// Only name and email are updatable; any other field in the body is ignored.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EventInput {
    pub owner_id: i64,
    pub name: String,
    pub description: String,
    pub date: String,
    pub location: String,
}

impl EventInput {
    pub fn into_event(self, id: i64) -> Event {
        Event {
            id,
            owner_id: self.owner_id,
            name: self.name,
            description: self.description,
            date: self.date,
            location: self.location,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct AttendeeInput {
    pub user_id: i64,
    pub event_id: i64,
}

impl AttendeeInput {
    pub fn into_attendee(self, id: i64) -> Attendee {
        Attendee {
            id,
            user_id: self.user_id,
            event_id: self.event_id,
        }
    }
}
