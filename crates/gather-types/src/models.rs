use serde::{Deserialize, Serialize};

/// Public projection of a user account. Carries no password field; the stored
/// hash only travels inside `gather_db::UserCredentials`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub description: String,
    /// Free-form date string, stored as given.
    pub date: String,
    pub location: String,
}

/// Join row between a user and an event. Duplicates are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendee {
    pub id: i64,
    pub user_id: i64,
    pub event_id: i64,
}
