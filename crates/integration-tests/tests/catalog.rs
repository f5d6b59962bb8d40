//! Catalog state driven by a real client.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::sync::Arc;

use tienda_core::{CartError, Price, ProductId};
use tienda_integration_tests::FakeBackend;
use tienda_storefront::state::{Catalog, CategoryFilter};
use tienda_storefront::storage::MemoryStore;

#[tokio::test]
async fn test_browse_filter_and_buy() {
    let backend = FakeBackend::start().await.unwrap();
    let client = backend.client(Arc::new(MemoryStore::new())).unwrap();

    let mut catalog = Catalog::new();
    assert!(catalog.is_loading());
    catalog.load(&client).await;
    assert!(!catalog.is_loading());

    let labels: Vec<String> = catalog
        .categories()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(labels, ["Todas", "Manga", "Comic"]);

    catalog.set_filter(CategoryFilter::from_label("Manga"));
    let visible: Vec<ProductId> = catalog.visible_products().iter().map(|p| p.id).collect();
    assert_eq!(visible, [ProductId::new(1), ProductId::new(3)]);

    // Out of stock
    assert_eq!(
        catalog.add_to_cart(ProductId::new(2)).unwrap_err(),
        CartError::OutOfStock(ProductId::new(2))
    );

    catalog.add_to_cart(ProductId::new(1)).unwrap();
    catalog.add_to_cart(ProductId::new(1)).unwrap();
    catalog.add_to_cart(ProductId::new(3)).unwrap();

    assert_eq!(catalog.cart().lines().len(), 2);
    assert_eq!(catalog.cart_item_count(), 3);
    assert_eq!(catalog.cart_total(), Price::from_units(335));

    catalog.remove_from_cart(ProductId::new(1));
    assert_eq!(catalog.cart_total(), Price::from_units(95));
}

#[tokio::test]
async fn test_unreachable_backend_opens_gate_with_empty_catalog() {
    let backend = FakeBackend::start().await.unwrap();
    let client = backend.client(Arc::new(MemoryStore::new())).unwrap();
    backend.fail_with(Some(axum::http::StatusCode::INTERNAL_SERVER_ERROR));

    let mut catalog = Catalog::new();
    catalog.load(&client).await;

    assert!(!catalog.is_loading());
    assert!(catalog.visible_products().is_empty());
    assert_eq!(catalog.categories(), [CategoryFilter::All]);
}
