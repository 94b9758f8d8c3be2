mod config;

use tracing::{info, warn};

use gather_api::{AppStateInner, TokenService};
use gather_db::Database;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "gather=debug,gather_api=debug,gather_db=info,tower_http=debug".into()
            }),
        )
        .init();

    let config = Config::from_env()?;
    if config.has_placeholder_secret() {
        warn!("GATHER_JWT_SECRET is unset or a placeholder; tokens are forgeable. Set it before deploying.");
    }

    // Init database
    let db = Database::open_with_timeout(&config.db_path, config.db_timeout)?;

    let state = AppStateInner::new(db, TokenService::new(&config.jwt_secret));
    let app = gather_api::router(state);

    let addr = config.listen_addr()?;
    info!("Gather API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
                    _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
                }
            }
            Err(e) => {
                warn!("failed to install SIGTERM handler: {}", e);
                ctrl_c.await.ok();
                info!("Received Ctrl+C, shutting down...");
            }
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
        info!("Received Ctrl+C, shutting down...");
    }
}
