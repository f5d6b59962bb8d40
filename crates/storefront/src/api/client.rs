//! HTTP plumbing shared by every API operation.

use std::sync::Arc;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{ApiError, SessionExpired, SessionExpiredHook};
use crate::config::ClientConfig;
use crate::storage::{SessionStore, keys};

/// Characters of a response body kept in logs and error messages.
const BODY_LOG_LIMIT: usize = 500;
const BODY_ERROR_LIMIT: usize = 200;

// =============================================================================
// ApiClient
// =============================================================================

/// Client for the storefront REST API.
///
/// Cheap to clone; clones share the HTTP connection pool, the session store
/// and the hook.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn SessionStore>,
    demo_mode: bool,
    on_session_expired: Option<SessionExpiredHook>,
}

/// Builder for [`ApiClient`].
pub struct ApiClientBuilder {
    config: ClientConfig,
    store: Arc<dyn SessionStore>,
    on_session_expired: Option<SessionExpiredHook>,
}

impl ApiClientBuilder {
    /// Call `hook` whenever the backend answers 401.
    #[must_use]
    pub fn on_session_expired(mut self, hook: SessionExpiredHook) -> Self {
        self.on_session_expired = Some(hook);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn build(self) -> Result<ApiClient, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(self.config.timeout)
            .build()?;

        Ok(ApiClient {
            inner: Arc::new(ApiClientInner {
                http,
                base_url: self.config.base_url().to_string(),
                store: self.store,
                demo_mode: self.config.demo_mode,
                on_session_expired: self.on_session_expired,
            }),
        })
    }
}

impl ApiClient {
    /// Start building a client for `config`, persisting the session in
    /// `store`.
    #[must_use]
    pub fn builder(config: &ClientConfig, store: Arc<dyn SessionStore>) -> ApiClientBuilder {
        ApiClientBuilder {
            config: config.clone(),
            store,
            on_session_expired: None,
        }
    }

    /// The session store this client reads the token from.
    #[must_use]
    pub fn store(&self) -> &dyn SessionStore {
        self.inner.store.as_ref()
    }

    /// Whether catalog reads fall back to sample products.
    #[must_use]
    pub fn demo_mode(&self) -> bool {
        self.inner.demo_mode
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    fn token(&self) -> Option<SecretString> {
        self.inner
            .store
            .get(keys::TOKEN)
            .filter(|token| !token.is_empty())
            .map(SecretString::from)
    }

    /// Send a request and return the raw body of a successful response.
    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        operation: &'static str,
    ) -> Result<String, ApiError> {
        let url = self.url(path);
        let mut request = self.inner.http.request(method.clone(), &url);

        if let Some(token) = self.token() {
            request = request.bearer_auth(token.expose_secret());
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        debug!(%method, %url, operation, "Sending API request");
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status == StatusCode::UNAUTHORIZED {
            self.session_expired(operation, path);
            return Err(ApiError::Unauthorized);
        }

        if !status.is_success() {
            tracing::error!(
                status = %status,
                operation,
                body = %truncate(&text, BODY_LOG_LIMIT),
                "API returned non-success status"
            );
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: truncate(&text, BODY_ERROR_LIMIT),
            });
        }

        Ok(text)
    }

    /// Send a request and decode the JSON response body.
    async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        operation: &'static str,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let text = self.send(method, path, body, operation).await?;

        serde_json::from_str(&text).map_err(|e| {
            tracing::error!(
                error = %e,
                operation,
                body = %truncate(&text, BODY_LOG_LIMIT),
                "Failed to parse API response"
            );
            ApiError::Parse(e)
        })
    }

    pub(super) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        operation: &'static str,
    ) -> Result<T, ApiError> {
        self.request::<T, ()>(Method::GET, path, None, operation)
            .await
    }

    pub(super) async fn post<T, B>(
        &self,
        path: &str,
        body: &B,
        operation: &'static str,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, path, Some(body), operation)
            .await
    }

    pub(super) async fn put<T, B>(
        &self,
        path: &str,
        body: &B,
        operation: &'static str,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PUT, path, Some(body), operation)
            .await
    }

    /// DELETE whose response body, if any, is ignored.
    pub(super) async fn delete(&self, path: &str, operation: &'static str) -> Result<(), ApiError> {
        self.send::<()>(Method::DELETE, path, None, operation)
            .await
            .map(drop)
    }

    fn session_expired(&self, operation: &'static str, path: &str) {
        tracing::warn!(operation, path, "Session expired (HTTP 401)");

        if let Some(hook) = &self.inner.on_session_expired {
            hook(&SessionExpired {
                operation,
                path: path.to_string(),
            });
        }
    }
}

fn truncate(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::storage::MemoryStore;

    fn client_with(store: Arc<MemoryStore>) -> ApiClient {
        let config = ClientConfig::new("http://localhost:5000/api/".parse().unwrap());
        ApiClient::builder(&config, store).build().unwrap()
    }

    #[test]
    fn test_url_joins_base_and_path() {
        let client = client_with(Arc::new(MemoryStore::new()));
        assert_eq!(
            client.url("/productos/3"),
            "http://localhost:5000/api/productos/3"
        );
    }

    #[test]
    fn test_token_ignores_empty_value() {
        let store = Arc::new(MemoryStore::new());
        let client = client_with(Arc::clone(&store));
        assert!(client.token().is_none());

        store.set(keys::TOKEN, "").unwrap();
        assert!(client.token().is_none());

        store.set(keys::TOKEN, "tok").unwrap();
        assert_eq!(client.token().unwrap().expose_secret(), "tok");
    }

    #[test]
    fn test_session_expired_invokes_hook() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let config = ClientConfig::new("http://localhost:5000/api".parse().unwrap());
        let client = ApiClient::builder(&config, Arc::new(MemoryStore::new()))
            .on_session_expired(Arc::new(move |expired: &SessionExpired| {
                assert_eq!(expired.operation, "get_cart");
                assert_eq!(expired.path, "/carrito");
                seen.fetch_add(1, Ordering::SeqCst);
            }))
            .build()
            .unwrap();

        client.session_expired("get_cart", "/carrito");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("sesión expirada", 6), "sesión");
        assert_eq!(truncate("ok", 10), "ok");
    }
}
