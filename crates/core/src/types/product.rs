//! Catalog product types.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId, StockLevel};

/// A product as served by `/productos`.
///
/// Immutable from the client's point of view: the catalog only ever replaces
/// its product list wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Backend product ID.
    pub id: ProductId,
    /// Display name.
    #[serde(rename = "nombre")]
    pub name: String,
    /// Unit price.
    #[serde(rename = "precio")]
    pub price: Price,
    /// Category label (e.g. `Manga`, `Comic`).
    #[serde(rename = "categoria")]
    pub category: String,
    /// Units available.
    #[serde(default)]
    pub stock: u32,
    /// Long description.
    #[serde(rename = "descripcion", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Cover image URL; older records use `imagen`.
    #[serde(
        rename = "imagen_url",
        alias = "imagen",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<String>,
}

impl Product {
    /// Stock availability of this product.
    #[must_use]
    pub const fn stock_level(&self) -> StockLevel {
        StockLevel::from_stock(self.stock)
    }

    /// Whether the product can currently be added to a cart.
    #[must_use]
    pub const fn can_purchase(&self) -> bool {
        self.stock_level().can_purchase()
    }
}

/// Body of an administrative create or update request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductInput {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "precio")]
    pub price: Price,
    #[serde(rename = "categoria")]
    pub category: String,
    pub stock: u32,
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "imagen_url", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl From<&Product> for ProductInput {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price,
            category: product.category.clone(),
            stock: product.stock,
            description: product.description.clone(),
            image_url: product.image_url.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_backend_shape() {
        let product: Product = serde_json::from_value(json!({
            "id": 1,
            "nombre": "Fairytail Volumen",
            "precio": 150,
            "categoria": "Manga",
            "stock": 15,
            "descripcion": "Tomo 1",
            "imagen_url": "https://example.com/ft.jpg"
        }))
        .unwrap();

        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.name, "Fairytail Volumen");
        assert_eq!(product.price, Price::from_units(150));
        assert_eq!(product.stock_level(), StockLevel::InStock);
        assert_eq!(
            product.image_url.as_deref(),
            Some("https://example.com/ft.jpg")
        );
    }

    #[test]
    fn test_imagen_alias_and_optional_fields() {
        let product: Product = serde_json::from_value(json!({
            "id": 2,
            "nombre": "Heartstopper",
            "precio": 180,
            "categoria": "Comic",
            "stock": 0,
            "imagen": "heartstopper.jpg"
        }))
        .unwrap();

        assert_eq!(product.image_url.as_deref(), Some("heartstopper.jpg"));
        assert!(product.description.is_none());
        assert!(!product.can_purchase());
    }

    #[test]
    fn test_input_serializes_wire_names() {
        let input = ProductInput {
            name: "One Piece 1".to_string(),
            price: Price::from_units(120),
            category: "Manga".to_string(),
            stock: 3,
            description: None,
            image_url: None,
        };
        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value["nombre"], "One Piece 1");
        assert_eq!(value["categoria"], "Manga");
        assert_eq!(value["stock"], 3);
        assert!(value.get("descripcion").is_none());
    }
}
