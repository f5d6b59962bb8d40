//! Response types specific to the REST API.
//!
//! Domain types (products, comments, users) live in `tienda_core`; this
//! module only has the shapes that exist purely on the wire.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tienda_core::{CartItemId, ProductId, UserProfile};

/// A line of the server-side cart (`/carrito`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Backend ID of the cart line, used by update and delete.
    pub id: CartItemId,
    #[serde(rename = "productoId", alias = "producto_id")]
    pub product_id: ProductId,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
}

/// Raw `/auth/login` response.
#[derive(Debug, Deserialize)]
pub(super) struct LoginBody {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<serde_json::Value>,
}

/// Outcome of a successful login.
#[derive(Debug)]
pub struct LoginResponse {
    /// Auth token, when the backend issued one.
    pub token: Option<SecretString>,
    /// Profile of the logged-in user, when present and well-formed.
    pub user: Option<UserProfile>,
}
