mod cors;
mod server;

pub use cors::{CorsConfig, DEFAULT_ALLOWED_ORIGIN};
pub use server::ServerConfig;

use crate::error::{AppError, AppResult};
use crate::middleware::CorsLayer;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub cors: CorsConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> AppResult<Self> {
        Self::from_env_with(|_| None)
    }

    /// Load configuration from environment variables, preferring any key
    /// `overrides` answers (e.g. CLI flags). Overrides apply before parsing
    /// and validation, so an overridden variable is never looked at.
    pub fn from_env_with<F>(overrides: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // A missing .env file is fine
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| overrides(key).or_else(|| std::env::var(key).ok()))
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Config {
            server: ServerConfig::from_lookup(&lookup)?,
            cors: CorsConfig::from_lookup(&lookup),
        };

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> AppResult<()> {
        if self.server.port == 0 {
            return Err(AppError::Configuration(
                "SERVER_PORT must be greater than 0".to_string(),
            ));
        }

        // The origin is echoed as-is, so it only has to be a legal header value
        CorsLayer::new(&self.cors)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.addr(), "127.0.0.1:8080");
        assert_eq!(config.cors.allowed_origin, DEFAULT_ALLOWED_ORIGIN);
    }

    #[test]
    fn test_config_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("SERVER_HOST", "0.0.0.0"),
            ("SERVER_PORT", "9000"),
            ("CORS_ORIGIN", "https://example.com"),
        ]))
        .unwrap();

        assert_eq!(config.server.addr(), "0.0.0.0:9000");
        assert_eq!(config.cors.allowed_origin, "https://example.com");
    }

    #[test]
    fn test_invalid_port_rejected() {
        let result = Config::from_lookup(lookup(&[("SERVER_PORT", "not_a_port")]));
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn test_zero_port_rejected() {
        let result = Config::from_lookup(lookup(&[("SERVER_PORT", "0")]));
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn test_origin_with_newline_rejected() {
        let result = Config::from_lookup(lookup(&[("CORS_ORIGIN", "https://a.com\r\nX-Evil: 1")]));
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn test_validate_and_layer_report_same_origin_error() {
        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            cors: CorsConfig {
                allowed_origin: "bad\norigin".to_string(),
            },
        };

        let from_validate = config.validate().unwrap_err().to_string();
        let from_layer = CorsLayer::new(&config.cors).unwrap_err().to_string();
        assert_eq!(from_validate, from_layer);
        assert!(from_validate.contains("CORS_ORIGIN"));
    }
}
