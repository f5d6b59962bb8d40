//! Status enums for products.

use serde::{Deserialize, Serialize};

/// Stock counts above this are shown as plainly in stock.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// Stock availability shown on a product card.
///
/// - more than [`LOW_STOCK_THRESHOLD`] units: in stock
/// - 1 to [`LOW_STOCK_THRESHOLD`] units: low stock
/// - 0 units: out of stock, purchase disabled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockLevel {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockLevel {
    /// Classify a stock count.
    #[must_use]
    pub const fn from_stock(stock: u32) -> Self {
        match stock {
            0 => Self::OutOfStock,
            1..=LOW_STOCK_THRESHOLD => Self::LowStock,
            _ => Self::InStock,
        }
    }

    /// Whether the purchase action is enabled at this level.
    #[must_use]
    pub const fn can_purchase(self) -> bool {
        !matches!(self, Self::OutOfStock)
    }

    /// Badge text for a product with `stock` units.
    #[must_use]
    pub fn badge(stock: u32) -> String {
        if stock > 0 {
            format!("Stock: {stock}")
        } else {
            "Agotado".to_string()
        }
    }

    /// Label of the purchase button at this level.
    #[must_use]
    pub const fn purchase_label(self) -> &'static str {
        match self {
            Self::InStock | Self::LowStock => "Agregar al Carrito",
            Self::OutOfStock => "Agotado",
        }
    }
}

impl std::fmt::Display for StockLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InStock => write!(f, "in_stock"),
            Self::LowStock => write!(f, "low_stock"),
            Self::OutOfStock => write!(f, "out_of_stock"),
        }
    }
}
