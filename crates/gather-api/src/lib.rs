//! HTTP layer: handlers, bearer-token auth and the router.

pub mod attendees;
pub mod auth;
pub mod error;
pub mod events;
pub mod extract;
pub mod middleware;
pub mod password;
pub mod routes;
pub mod state;
pub mod token;
pub mod users;

pub use error::ApiError;
pub use routes::router;
pub use state::{AppState, AppStateInner};
pub use token::TokenService;
