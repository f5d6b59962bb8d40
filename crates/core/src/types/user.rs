//! User and authentication types.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer, ser::SerializeStruct};

use super::UserId;

/// Profile of the logged-in user, as returned by `/auth/login`.
///
/// Only `id` and `username` are interpreted; any other fields the backend
/// sends are kept so the persisted profile round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub username: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl UserProfile {
    /// Create a profile with no extra fields.
    #[must_use]
    pub fn new(id: UserId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            extra: serde_json::Map::new(),
        }
    }
}

/// Login credentials. The password is redacted from `Debug` output.
#[derive(Debug)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }
}

impl Serialize for Credentials {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Credentials", 2)?;
        state.serialize_field("username", &self.username)?;
        state.serialize_field("password", self.password.expose_secret())?;
        state.end()
    }
}

/// Body of `POST /auth/register`.
#[derive(Debug)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: SecretString,
}

impl Registration {
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }
}

impl Serialize for Registration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Registration", 3)?;
        state.serialize_field("username", &self.username)?;
        state.serialize_field("email", &self.email)?;
        state.serialize_field("password", self.password.expose_secret())?;
        state.end()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_profile_keeps_extra_fields() {
        let raw = json!({ "id": 3, "username": "pao", "email": "pao@example.com" });
        let profile: UserProfile = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(profile.id, UserId::new(3));
        assert_eq!(profile.username, "pao");
        assert_eq!(serde_json::to_value(&profile).unwrap(), raw);
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let credentials = Credentials::new("pao", "hunter2");
        let debug = format!("{credentials:?}");
        assert!(!debug.contains("hunter2"));

        let wire = serde_json::to_value(&credentials).unwrap();
        assert_eq!(wire, json!({ "username": "pao", "password": "hunter2" }));
    }
}
