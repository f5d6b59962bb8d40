//! Product catalog operations.

use tienda_core::{Product, ProductId, ProductInput};
use tracing::instrument;

use super::sample::sample_products;
use super::{ApiClient, ApiError};

impl ApiClient {
    /// Every product in the catalog.
    ///
    /// Never fails: on error the failure is logged and the built-in sample
    /// catalog is returned in demo mode, an empty list otherwise.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Vec<Product> {
        match self.get::<Vec<Product>>("/productos", "list_products").await {
            Ok(products) => products,
            Err(e) if self.demo_mode() => {
                tracing::error!(error = %e, "Error fetching products, serving sample catalog");
                sample_products()
            }
            Err(e) => {
                tracing::error!(error = %e, "Error fetching products");
                Vec::new()
            }
        }
    }

    /// Products in `category`, filtered by the backend. Empty on failure.
    #[instrument(skip(self), fields(category = %category))]
    pub async fn products_by_category(&self, category: &str) -> Vec<Product> {
        let path = format!("/productos/categoria/{}", urlencoding::encode(category));
        self.get(&path, "products_by_category")
            .await
            .unwrap_or_else(|e| {
                tracing::error!(error = %e, category, "Error fetching products by category");
                Vec::new()
            })
    }

    /// A single product, or `None` if it cannot be fetched.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: ProductId) -> Option<Product> {
        self.get(&format!("/productos/{id}"), "get_product")
            .await
            .inspect_err(|e| tracing::error!(error = %e, product_id = %id, "Error fetching product"))
            .ok()
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_product(&self, input: &ProductInput) -> Result<Product, ApiError> {
        self.post("/productos", input, "create_product")
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Error creating product"))
    }

    /// Replace a product's fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self, input), fields(product_id = %id))]
    pub async fn update_product(
        &self,
        id: ProductId,
        input: &ProductInput,
    ) -> Result<Product, ApiError> {
        self.put(&format!("/productos/{id}"), input, "update_product")
            .await
            .inspect_err(|e| tracing::error!(error = %e, product_id = %id, "Error updating product"))
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&self, id: ProductId) -> Result<(), ApiError> {
        self.delete(&format!("/productos/{id}"), "delete_product")
            .await
            .inspect_err(|e| tracing::error!(error = %e, product_id = %id, "Error deleting product"))
    }
}
