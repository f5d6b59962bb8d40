//! Subcommand implementations.
//!
//! Output meant for the user goes to stdout; logs go to stderr.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod comments;

use std::sync::Arc;

use thiserror::Error;
use tienda_storefront::api::{ApiClient, ApiError, SessionExpired};
use tienda_storefront::storage::{FileStore, StorageError};

use crate::config::CliConfig;

/// Errors that can stop a command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("Session file error: {0}")]
    Storage(#[from] StorageError),

    /// Quantities sent to the cart must be at least 1.
    #[error("Invalid quantity: {0}. Use `cart remove` to drop a line")]
    InvalidQuantity(u32),
}

/// Open the session file and build the API client.
///
/// # Errors
///
/// Returns error if the session file cannot be read or the HTTP client fails
/// to build.
pub fn connect(config: &CliConfig) -> Result<ApiClient, CommandError> {
    let store = FileStore::open(&config.session_file)?;
    let client = ApiClient::builder(&config.client, Arc::new(store))
        .on_session_expired(Arc::new(session_expired))
        .build()?;
    Ok(client)
}

fn session_expired(expired: &SessionExpired) {
    tracing::warn!(
        operation = expired.operation,
        "Session expired. Run `tienda login` again"
    );
}
