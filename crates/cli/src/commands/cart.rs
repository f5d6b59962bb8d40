//! Server-side cart commands (`cart ...`). These need a logged-in session.

use tienda_core::{CartItemId, ProductId};
use tienda_storefront::api::ApiClient;

use super::CommandError;

fn check_quantity(quantity: u32) -> Result<u32, CommandError> {
    if quantity == 0 {
        return Err(CommandError::InvalidQuantity(quantity));
    }
    Ok(quantity)
}

/// Print the server-side cart.
#[allow(clippy::print_stdout)]
pub async fn show(client: &ApiClient) {
    let items = client.get_cart().await;
    if items.is_empty() {
        println!("El carrito está vacío");
        return;
    }
    for item in items {
        println!(
            "item {} - producto {} x {}",
            item.id, item.product_id, item.quantity
        );
    }
}

/// Add units of a product.
#[allow(clippy::print_stdout)]
pub async fn add(client: &ApiClient, product_id: ProductId, quantity: u32) -> Result<(), CommandError> {
    let quantity = check_quantity(quantity)?;
    let item = client.add_to_cart(product_id, quantity).await?;
    println!(
        "Agregado: item {} - producto {} x {}",
        item.id, item.product_id, item.quantity
    );
    Ok(())
}

/// Change a line's quantity.
#[allow(clippy::print_stdout)]
pub async fn update(client: &ApiClient, item_id: CartItemId, quantity: u32) -> Result<(), CommandError> {
    let quantity = check_quantity(quantity)?;
    let item = client.update_quantity(item_id, quantity).await?;
    println!("Actualizado: item {} x {}", item.id, item.quantity);
    Ok(())
}

/// Remove a line.
#[allow(clippy::print_stdout)]
pub async fn remove(client: &ApiClient, item_id: CartItemId) -> Result<(), CommandError> {
    client.remove_from_cart(item_id).await?;
    println!("Item {item_id} eliminado");
    Ok(())
}

/// Empty the cart.
#[allow(clippy::print_stdout)]
pub async fn clear(client: &ApiClient) -> Result<(), CommandError> {
    client.clear_cart().await?;
    println!("Carrito vaciado");
    Ok(())
}
