//! REST API client for the storefront backend.
//!
//! # Architecture
//!
//! - One [`ApiClient`] per application, built explicitly and passed around
//! - JSON over HTTP via `reqwest`; the auth token is read from the
//!   [`SessionStore`](crate::storage::SessionStore) on every request
//! - Reads (catalog, cart, comments) degrade to empty results and log the
//!   cause; writes propagate errors to the caller
//! - HTTP 401 is logged and reported through an optional hook; the client
//!   never clears the session on its own
//!
//! # Resources
//!
//! | Operation | Path |
//! |---|---|
//! | products | `/productos`, `/productos/{id}`, `/productos/categoria/{categoria}` |
//! | auth | `/auth/login`, `/auth/register` |
//! | cart | `/carrito`, `/carrito/{itemId}` |
//! | comments | `/comentarios`, `/comentarios/producto/{productoId}` |
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tienda_storefront::api::ApiClient;
//! use tienda_storefront::storage::MemoryStore;
//!
//! let client = ApiClient::builder(&config, Arc::new(MemoryStore::new())).build()?;
//! let products = client.list_products().await;
//! let manga = client.products_by_category("Manga").await;
//! ```

mod auth;
mod cart;
mod client;
mod comments;
mod products;
pub mod sample;
pub mod types;

use std::future::Future;
use std::sync::Arc;

use thiserror::Error;
use tienda_core::{Comment, NewComment, Product, ProductId};

use crate::storage::StorageError;

pub use client::{ApiClient, ApiClientBuilder};
pub use types::{CartItem, LoginResponse};

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure (connection refused, timeout, TLS, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The backend answered 401: the session is missing or expired.
    #[error("Unauthorized: session expired or missing")]
    Unauthorized,

    /// The response body did not have the expected shape.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The operation needs a logged-in user and none is stored.
    #[error("User not authenticated")]
    Unauthenticated,

    /// Reading or writing the session store failed.
    #[error("Session storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// HTTP status of the failed response, when there was one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Unauthorized => Some(401),
            _ => None,
        }
    }
}

/// Details passed to the session-expired hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionExpired {
    /// Client operation that received the 401.
    pub operation: &'static str,
    /// Request path relative to the API root.
    pub path: String,
}

/// Callback invoked whenever the backend answers 401.
///
/// The host application decides what to do (log out, prompt for login, ...).
pub type SessionExpiredHook = Arc<dyn Fn(&SessionExpired) + Send + Sync>;

// =============================================================================
// Seams used by the front-end state
// =============================================================================

/// Source of the product catalog.
pub trait CatalogSource {
    /// Every product. Never fails; failures are absorbed by the source.
    fn list_products(&self) -> impl Future<Output = Vec<Product>> + Send;
}

/// Source of a product's comments.
pub trait CommentSource {
    /// Comments for `product_id`. Never fails; failures yield an empty list.
    fn list_comments(&self, product_id: ProductId) -> impl Future<Output = Vec<Comment>> + Send;
}

/// Destination for newly written comments.
pub trait CommentSink {
    /// Persist a comment, returning the backend's record.
    fn create_comment(
        &self,
        comment: &NewComment,
    ) -> impl Future<Output = Result<serde_json::Value, ApiError>> + Send;
}

impl CatalogSource for ApiClient {
    async fn list_products(&self) -> Vec<Product> {
        Self::list_products(self).await
    }
}

impl CommentSource for ApiClient {
    async fn list_comments(&self, product_id: ProductId) -> Vec<Comment> {
        Self::list_comments(self, product_id).await
    }
}

impl CommentSink for ApiClient {
    async fn create_comment(&self, comment: &NewComment) -> Result<serde_json::Value, ApiError> {
        Self::create_comment(self, comment).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ApiError::Api {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 500 - boom");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_unauthenticated_has_no_status() {
        let err = ApiError::Unauthenticated;
        assert_eq!(err.to_string(), "User not authenticated");
        assert_eq!(err.status(), None);
        assert_eq!(ApiError::Unauthorized.status(), Some(401));
    }
}
