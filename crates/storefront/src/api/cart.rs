//! Server-side cart operations.

use serde_json::json;
use tienda_core::{CartItemId, ProductId};
use tracing::instrument;

use super::types::CartItem;
use super::{ApiClient, ApiError};

impl ApiClient {
    /// Lines of the server-side cart. Empty on failure.
    #[instrument(skip(self))]
    pub async fn get_cart(&self) -> Vec<CartItem> {
        self.get("/carrito", "get_cart").await.unwrap_or_else(|e| {
            tracing::error!(error = %e, "Error fetching cart");
            Vec::new()
        })
    }

    /// Add `quantity` units of a product to the server-side cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add_to_cart(
        &self,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<CartItem, ApiError> {
        let body = json!({ "productoId": product_id, "cantidad": quantity });
        self.post("/carrito", &body, "add_to_cart")
            .await
            .inspect_err(|e| {
                tracing::error!(error = %e, product_id = %product_id, "Error adding to cart");
            })
    }

    /// Change the quantity of a cart line.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self), fields(item_id = %item_id))]
    pub async fn update_quantity(
        &self,
        item_id: CartItemId,
        quantity: u32,
    ) -> Result<CartItem, ApiError> {
        let body = json!({ "cantidad": quantity });
        self.put(&format!("/carrito/{item_id}"), &body, "update_quantity")
            .await
            .inspect_err(|e| {
                tracing::error!(error = %e, item_id = %item_id, "Error updating cart quantity");
            })
    }

    /// Remove a line from the server-side cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self), fields(item_id = %item_id))]
    pub async fn remove_from_cart(&self, item_id: CartItemId) -> Result<(), ApiError> {
        self.delete(&format!("/carrito/{item_id}"), "remove_from_cart")
            .await
            .inspect_err(|e| {
                tracing::error!(error = %e, item_id = %item_id, "Error removing from cart");
            })
    }

    /// Empty the server-side cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self))]
    pub async fn clear_cart(&self) -> Result<(), ApiError> {
        self.delete("/carrito", "clear_cart")
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Error clearing cart"))
    }
}
