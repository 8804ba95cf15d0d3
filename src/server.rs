//! Server startup and shutdown logic.

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::middleware::CorsLayer;
use crate::routes;
use crate::state::AppState;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Run the web server with the given configuration.
///
/// Builds the CORS layer from `config.cors`, assembles the router and serves
/// it on `addr` until Ctrl+C or SIGTERM.
///
/// # Errors
///
/// Returns an error if the CORS origin is not a valid header value, the
/// address cannot be bound, or the server fails at runtime.
pub async fn run_server(config: Config, addr: String) -> AppResult<()> {
    info!("Starting corsgate server...");

    let cors = CorsLayer::new(&config.cors)?;
    let state = Arc::new(AppState::new());
    let app = routes::create_router(state, cors);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to bind to address {}: {}", addr, e)))?;

    info!("Server listening on {}", addr);
    info!("Allowed CORS origin: {}", config.cors.allowed_origin);

    axum::serve(listener, app)
        .with_graceful_shutdown(create_shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Create a future that resolves when a shutdown signal is received.
///
/// On Unix-like systems, this listens for both Ctrl+C (SIGINT) and SIGTERM.
/// On other platforms, it only listens for Ctrl+C.
///
/// # Panics
///
/// Panics if signal handler installation fails.
async fn create_shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(unix)]
    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    #[cfg(not(unix))]
    ctrl_c.await;

    info!("Shutdown signal received");
}
