//! corsgate - a static CORS decorator for HTTP services.
//!
//! The decorator lives in [`middleware::cors`] and can wrap any
//! [`tower::Service`]. The rest of the crate hosts it behind a small
//! Axum server.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::{Config, CorsConfig};
pub use error::{AppError, AppResult};
pub use middleware::{Cors, CorsLayer};
