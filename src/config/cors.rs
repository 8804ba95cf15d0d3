use serde::Deserialize;

/// Environment key holding the allowed origin
pub(crate) const CORS_ORIGIN_VAR: &str = "CORS_ORIGIN";

/// Origin used when `CORS_ORIGIN` is unset or empty
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:8081";

/// CORS configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CorsConfig {
    /// Origin echoed verbatim as `Access-Control-Allow-Origin`
    pub allowed_origin: String,
}

impl CorsConfig {
    /// Resolve the allowed origin through an arbitrary key lookup.
    ///
    /// A missing or empty value falls back to [`DEFAULT_ALLOWED_ORIGIN`].
    /// Any other value is kept exactly as given.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let allowed_origin = lookup(CORS_ORIGIN_VAR)
            .filter(|origin| !origin.is_empty())
            .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGIN.to_string());

        Self { allowed_origin }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origin: DEFAULT_ALLOWED_ORIGIN.to_string(),
        }
    }
}
