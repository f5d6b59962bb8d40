//! Built-in sample catalog served in demo mode when `/productos` fails.

use tienda_core::{Price, Product, ProductId};

/// Sample products that keep the catalog populated without a backend.
#[must_use]
pub fn sample_products() -> Vec<Product> {
    vec![
        Product {
            id: ProductId::new(1),
            name: "Fairytail Volumen".to_string(),
            price: Price::from_units(150),
            category: "Manga".to_string(),
            stock: 15,
            description: None,
            image_url: Some(
                "https://m.media-amazon.com/images/I/81EIdomF4FL._AC_UF1000,1000_QL80_.jpg"
                    .to_string(),
            ),
        },
        Product {
            id: ProductId::new(2),
            name: "Heartstopper".to_string(),
            price: Price::from_units(180),
            category: "Comic".to_string(),
            stock: 25,
            description: None,
            image_url: Some(
                "https://encantalibros.com/wp-content/uploads/2020/12/9789877475876.jpg"
                    .to_string(),
            ),
        },
    ]
}
