use std::sync::Arc;

use tracing::error;

use gather_db::Database;

use crate::error::ApiError;
use crate::token::TokenService;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub tokens: TokenService,
}

impl AppStateInner {
    pub fn new(db: Database, tokens: TokenService) -> AppState {
        Arc::new(Self { db, tokens })
    }
}

/// Run a repository call off the async runtime.
pub(crate) async fn with_db<F, T>(state: &AppState, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&Database) -> gather_db::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let state = Arc::clone(state);
    tokio::task::spawn_blocking(move || f(&state.db))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::Infrastructure("internal task failure".into())
        })?
        .map_err(ApiError::from)
}
