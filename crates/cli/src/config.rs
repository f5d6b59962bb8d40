//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! Everything [`ClientConfig::from_env`] reads, plus:
//!
//! - `TIENDA_SESSION_FILE` - Where the login session is kept
//!   (default: `.tienda/session.json`)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::path::PathBuf;

use tienda_storefront::config::{ClientConfig, ConfigError, get_env_or_default, get_optional_env};

const DEFAULT_SESSION_FILE: &str = ".tienda/session.json";

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Storefront client settings.
    pub client: ClientConfig,
    /// JSON file holding the auth token and user profile.
    pub session_file: PathBuf,
    pub sentry_dsn: Option<String>,
    pub sentry_environment: Option<String>,
}

impl CliConfig {
    /// Load configuration from environment variables (and `.env`).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a client variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let client = ClientConfig::from_env()?;

        Ok(Self {
            client,
            session_file: PathBuf::from(get_env_or_default(
                "TIENDA_SESSION_FILE",
                DEFAULT_SESSION_FILE,
            )),
            sentry_dsn: get_optional_env("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }
}
