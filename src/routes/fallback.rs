use crate::error::AppError;
use axum::http::Uri;

/// Catch-all for unmatched routes
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
