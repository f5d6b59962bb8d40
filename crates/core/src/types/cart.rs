//! Client-side shopping cart.
//!
//! A [`Cart`] holds at most one [`CartLine`] per product. Adding a product
//! that is already in the cart bumps the line's quantity instead of adding a
//! second line. Removing a product drops its whole line regardless of the
//! quantity.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use super::{Price, Product, ProductId};

/// Errors from cart mutations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// The product is not in the loaded catalog.
    #[error("product {0} is not in the catalog")]
    UnknownProduct(ProductId),
    /// The product has no stock, so purchasing is disabled.
    #[error("product {0} is out of stock")]
    OutOfStock(ProductId),
    /// The product has no line in the cart.
    #[error("product {0} is not in the cart")]
    NotInCart(ProductId),
}

/// One product's aggregated quantity within a cart.
///
/// Serializes like the product itself plus a `cantidad` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(flatten)]
    product: Product,
    #[serde(rename = "cantidad")]
    quantity: NonZeroU32,
}

impl CartLine {
    fn new(product: Product) -> Self {
        Self {
            product,
            quantity: NonZeroU32::MIN,
        }
    }

    /// The product snapshot taken when the line was created.
    #[must_use]
    pub const fn product(&self) -> &Product {
        &self.product
    }

    /// ID of the product on this line.
    #[must_use]
    pub const fn product_id(&self) -> ProductId {
        self.product.id
    }

    /// Number of units on this line (always at least 1).
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity.get()
    }

    /// Unit price × quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity.get())
    }
}

/// In-memory cart: an insertion-ordered list of [`CartLine`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add one unit of `product`.
    ///
    /// Increments the existing line if there is one, otherwise appends a new
    /// line with quantity 1.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::OutOfStock`] (leaving the cart untouched) when the
    /// product's stock is zero.
    pub fn add(&mut self, product: &Product) -> Result<&CartLine, CartError> {
        if !product.can_purchase() {
            return Err(CartError::OutOfStock(product.id));
        }

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product_id() == product.id)
        {
            line.quantity = line.quantity.saturating_add(1);
        } else {
            self.lines.push(CartLine::new(product.clone()));
        }

        self.line(product.id).ok_or(CartError::NotInCart(product.id))
    }

    /// Set the quantity of an existing line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NotInCart`] if the product has no line.
    pub fn set_quantity(
        &mut self,
        product_id: ProductId,
        quantity: NonZeroU32,
    ) -> Result<&CartLine, CartError> {
        let line = self
            .lines
            .iter_mut()
            .find(|line| line.product_id() == product_id)
            .ok_or(CartError::NotInCart(product_id))?;
        line.quantity = quantity;
        Ok(line)
    }

    /// Remove the whole line for `product_id`, returning it if present.
    pub fn remove(&mut self, product_id: ProductId) -> Option<CartLine> {
        let index = self.position(product_id)?;
        Some(self.lines.remove(index))
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line for `product_id`, if any.
    #[must_use]
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id() == product_id)
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of price × quantity over all lines.
    ///
    /// Computed on every call so it always matches the current lines.
    /// Saturates instead of overflowing on absurd prices.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Sum of quantities over all lines (the cart badge).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0_u32, |count, line| count.saturating_add(line.quantity()))
    }

    fn position(&self, product_id: ProductId) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| line.product_id() == product_id)
    }
}
