//! Authentication operations and session bookkeeping.

use secrecy::SecretString;
use tienda_core::{Credentials, Registration, UserProfile};
use tracing::instrument;

use super::types::{LoginBody, LoginResponse};
use super::{ApiClient, ApiError};
use crate::storage::keys;

impl ApiClient {
    /// Log in and persist the session.
    ///
    /// When the backend issues a token, the token and the user profile are
    /// written to the session store before returning.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the backend rejects the
    /// credentials, or the session cannot be stored.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        let body: LoginBody = self
            .post("/auth/login", credentials, "login")
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Error logging in"))?;

        let user = body.user.as_ref().and_then(|raw| {
            serde_json::from_value::<UserProfile>(raw.clone())
                .inspect_err(|e| tracing::warn!(error = %e, "Login response has malformed user"))
                .ok()
        });

        if let Some(token) = body.token.as_deref().filter(|token| !token.is_empty()) {
            let store = self.store();
            store.set(keys::TOKEN, token)?;
            match &body.user {
                Some(raw) => store.set(keys::USER, &raw.to_string())?,
                None => store.remove(keys::USER)?,
            }
            tracing::info!("Session stored");
        }

        Ok(LoginResponse {
            token: body.token.map(SecretString::from),
            user,
        })
    }

    /// Create an account. Does not log in.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self, registration), fields(username = %registration.username))]
    pub async fn register(
        &self,
        registration: &Registration,
    ) -> Result<serde_json::Value, ApiError> {
        self.post("/auth/register", registration, "register")
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Error registering user"))
    }

    /// Forget the stored session. Always succeeds.
    pub fn logout(&self) {
        let store = self.store();
        for key in [keys::TOKEN, keys::USER] {
            if let Err(e) = store.remove(key) {
                tracing::warn!(error = %e, key, "Failed to clear session key");
            }
        }
    }

    /// Whether a non-empty auth token is stored.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.store()
            .get(keys::TOKEN)
            .is_some_and(|token| !token.is_empty())
    }

    /// Profile of the stored user, or `None` if absent or unreadable.
    #[must_use]
    pub fn current_user(&self) -> Option<UserProfile> {
        let raw = self.store().get(keys::USER)?;
        serde_json::from_str::<Option<UserProfile>>(&raw)
            .inspect_err(|e| tracing::warn!(error = %e, "Stored user profile is unreadable"))
            .ok()
            .flatten()
    }
}
