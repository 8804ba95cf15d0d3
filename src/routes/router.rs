use crate::middleware::{request_id_middleware, CorsLayer};
use axum::middleware;
use axum::routing::get;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::fallback;
use super::health;
use super::AppState;

/// Create application router.
///
/// The CORS layer is applied last so it wraps every route and the fallback:
/// preflights never reach a handler, and every response, 404s included,
/// carries the CORS headers.
pub fn create_router(state: Arc<AppState>, cors: CorsLayer) -> axum::Router {
    axum::Router::new()
        .route("/_health", get(health::health_check))
        .fallback(fallback::not_found)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
