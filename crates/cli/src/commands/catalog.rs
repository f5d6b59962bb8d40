//! Catalog commands: `products`, `product`, `buy`.

use tienda_core::{Product, ProductId, StockLevel};
use tienda_storefront::api::ApiClient;
use tienda_storefront::state::{Catalog, CategoryFilter};

/// One catalog row: ID, name, category, price, stock badge and purchase
/// availability.
fn product_line(product: &Product) -> String {
    let level = product.stock_level();
    format!(
        "#{} {} ({}) - {} | {} | {}",
        product.id,
        product.name,
        product.category,
        product.price,
        StockLevel::badge(product.stock),
        level.purchase_label(),
    )
}

/// Filter choices, with the active one in brackets.
fn category_bar(catalog: &Catalog) -> String {
    catalog
        .categories()
        .iter()
        .map(|choice| {
            if choice == catalog.filter() {
                format!("[{choice}]")
            } else {
                choice.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// Print the catalog, optionally filtered by category label.
#[allow(clippy::print_stdout)]
pub async fn list(client: &ApiClient, category: Option<&str>) {
    let mut catalog = Catalog::new();
    println!("Cargando productos...");
    catalog.load(client).await;

    if let Some(label) = category {
        catalog.set_filter(CategoryFilter::from_label(label));
    }

    println!("{}", category_bar(&catalog));
    let visible = catalog.visible_products();
    if visible.is_empty() {
        println!("No hay productos disponibles");
        return;
    }
    for product in visible {
        println!("{}", product_line(product));
    }
}

/// Print a single product.
#[allow(clippy::print_stdout)]
pub async fn show(client: &ApiClient, id: ProductId) {
    let Some(product) = client.get_product(id).await else {
        println!("Producto {id} no encontrado");
        return;
    };

    println!("{}", product_line(&product));
    if let Some(description) = &product.description {
        println!("  {description}");
    }
    if let Some(image_url) = &product.image_url {
        println!("  {image_url}");
    }
}

/// Add each product ID to a local cart, one unit per occurrence, and print
/// the result.
#[allow(clippy::print_stdout)]
pub async fn buy(client: &ApiClient, ids: &[ProductId]) {
    let mut catalog = Catalog::new();
    catalog.load(client).await;

    for &id in ids {
        if let Err(e) = catalog.add_to_cart(id) {
            println!("No se pudo agregar: {e}");
        }
    }

    if catalog.cart().is_empty() {
        println!("El carrito está vacío");
        return;
    }
    for line in catalog.cart().lines() {
        println!(
            "{} x {} = {}",
            line.quantity(),
            line.product().name,
            line.line_total()
        );
    }
    println!("Artículos: {}", catalog.cart_item_count());
    println!("Total: {}", catalog.cart_total());
}
