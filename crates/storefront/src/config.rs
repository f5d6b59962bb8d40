//! Storefront client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `TIENDA_API_URL` - REST API root (default: `http://localhost:5000/api`)
//! - `TIENDA_DEMO_MODE` - Serve the sample catalog when `/productos` fails
//!   (default: false)
//! - `TIENDA_HTTP_TIMEOUT_SECS` - Per-request timeout (default: 10)
//! - `TIENDA_DEFAULT_AUTHOR` - Author shown on anonymous comments
//!   (default: `Usuario`)
//! - `TIENDA_COMMENT_PRODUCT_ID` - Product the comment widget posts to
//!   (default: 1)

use std::time::Duration;

use thiserror::Error;
use tienda_core::ProductId;
use url::Url;

use crate::state::comments::DEFAULT_AUTHOR;

/// Default REST API root.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_COMMENT_PRODUCT_ID: i32 = 1;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// REST API root; every resource path is appended to it.
    pub api_url: Url,
    /// Whether catalog reads fall back to built-in sample products.
    ///
    /// Only meant for demos: in production it would hide backend outages.
    pub demo_mode: bool,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Author name shown when no user is logged in.
    pub default_author: String,
    /// Product the comment widget associates new comments with.
    pub comment_product_id: ProductId,
}

impl ClientConfig {
    /// Configuration pointing at `api_url` with every other setting at its
    /// default.
    #[must_use]
    pub fn new(api_url: Url) -> Self {
        Self {
            api_url,
            demo_mode: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            default_author: DEFAULT_AUTHOR.to_string(),
            comment_product_id: ProductId::new(DEFAULT_COMMENT_PRODUCT_ID),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_url = parse_api_url(&get_env_or_default("TIENDA_API_URL", DEFAULT_API_URL))
            .map_err(|e| ConfigError::InvalidEnvVar("TIENDA_API_URL".to_string(), e))?;
        let demo_mode = parse_bool(&get_env_or_default("TIENDA_DEMO_MODE", "false"))
            .ok_or_else(|| {
                ConfigError::InvalidEnvVar(
                    "TIENDA_DEMO_MODE".to_string(),
                    "expected true/false".to_string(),
                )
            })?;
        let timeout_secs = get_env_or_default(
            "TIENDA_HTTP_TIMEOUT_SECS",
            &DEFAULT_TIMEOUT_SECS.to_string(),
        )
        .parse::<u64>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar("TIENDA_HTTP_TIMEOUT_SECS".to_string(), e.to_string())
        })?;
        let default_author = get_optional_env("TIENDA_DEFAULT_AUTHOR")
            .filter(|author| !author.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_AUTHOR.to_string());
        let comment_product_id = get_env_or_default(
            "TIENDA_COMMENT_PRODUCT_ID",
            &DEFAULT_COMMENT_PRODUCT_ID.to_string(),
        )
        .parse::<ProductId>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar("TIENDA_COMMENT_PRODUCT_ID".to_string(), e.to_string())
        })?;

        Ok(Self {
            api_url,
            demo_mode,
            timeout: Duration::from_secs(timeout_secs),
            default_author,
            comment_product_id,
        })
    }

    /// API root without a trailing slash, ready for `format!("{base}{path}")`.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.api_url.as_str().trim_end_matches('/')
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
#[must_use]
pub fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
#[must_use]
pub fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an API root, accepting only `http` and `https` URLs.
fn parse_api_url(raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw.trim()).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!("unsupported scheme '{other}'")),
    }
}

/// Parse a boolean flag the way people tend to write them in `.env` files.
fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool(" YES "), Some(true));
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool(""), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn test_parse_api_url() {
        assert!(parse_api_url("http://localhost:5000/api").is_ok());
        assert!(parse_api_url("https://tienda.example.com/api/").is_ok());
        assert!(parse_api_url("ftp://example.com").is_err());
        assert!(parse_api_url("not a url").is_err());
    }

    #[test]
    fn test_base_url_strips_trailing_slash() {
        let config = ClientConfig::new(Url::parse("http://localhost:5000/api/").unwrap());
        assert_eq!(config.base_url(), "http://localhost:5000/api");
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new(Url::parse(DEFAULT_API_URL).unwrap());
        assert!(!config.demo_mode);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.default_author, "Usuario");
        assert_eq!(config.comment_product_id, ProductId::new(1));
    }
}
