//! Catalog view state: products, category filter, and the cart.

use std::fmt;
use std::num::NonZeroU32;

use tienda_core::{Cart, CartError, CartLine, Price, Product, ProductId, StockLevel};
use tracing::{debug, instrument};

use crate::api::CatalogSource;

/// Label of the "no filter" choice.
pub const ALL_CATEGORIES_LABEL: &str = "Todas";

/// Active category filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    /// Show every product.
    #[default]
    All,
    /// Show products whose category equals this label exactly.
    Category(String),
}

impl CategoryFilter {
    /// Filter for a label as shown in the UI; [`ALL_CATEGORIES_LABEL`] means
    /// no filter.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        if label == ALL_CATEGORIES_LABEL {
            Self::All
        } else {
            Self::Category(label.to_string())
        }
    }

    /// Label shown on the filter button.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES_LABEL,
            Self::Category(category) => category,
        }
    }

    /// Whether `product` is visible under this filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Category(category) => product.category == *category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// State behind the catalog page.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    filter: CategoryFilter,
    cart: Cart,
    loading: bool,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// An empty catalog waiting for its first load.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            products: Vec::new(),
            filter: CategoryFilter::All,
            cart: Cart::new(),
            loading: true,
        }
    }

    /// Fetch the product list from `source` and open the loading gate.
    #[instrument(skip_all)]
    pub async fn load<S: CatalogSource>(&mut self, source: &S) {
        self.loading = true;
        let products = source.list_products().await;
        self.finish_loading(products);
    }

    /// Replace the product list and mark loading as done.
    pub fn finish_loading(&mut self, products: Vec<Product>) {
        debug!(count = products.len(), "Catalog loaded");
        self.products = products;
        self.loading = false;
    }

    /// Whether the initial fetch is still pending.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Every loaded product, in backend order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// A loaded product by ID.
    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// The active filter.
    #[must_use]
    pub const fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    /// Change the active filter.
    pub fn set_filter(&mut self, filter: CategoryFilter) {
        debug!(filter = %filter, "Category filter changed");
        self.filter = filter;
    }

    /// Filter choices: [`CategoryFilter::All`] followed by every distinct
    /// category in the loaded products, in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<CategoryFilter> {
        let mut categories = vec![CategoryFilter::All];
        for product in &self.products {
            let choice = CategoryFilter::Category(product.category.clone());
            if !categories.contains(&choice) {
                categories.push(choice);
            }
        }
        categories
    }

    /// Products visible under the active filter.
    #[must_use]
    pub fn visible_products(&self) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|product| self.filter.matches(product))
            .collect()
    }

    /// Stock badge level of a product.
    #[must_use]
    pub const fn stock_level(product: &Product) -> StockLevel {
        product.stock_level()
    }

    /// Add one unit of a loaded product to the cart.
    ///
    /// # Errors
    ///
    /// - [`CartError::UnknownProduct`] if `product_id` is not loaded
    /// - [`CartError::OutOfStock`] if the product has no stock; the cart is
    ///   left unchanged
    pub fn add_to_cart(&mut self, product_id: ProductId) -> Result<&CartLine, CartError> {
        let product = self
            .products
            .iter()
            .find(|product| product.id == product_id)
            .ok_or(CartError::UnknownProduct(product_id))?;

        let line = self.cart.add(product)?;
        debug!(
            product_id = %product_id,
            quantity = line.quantity(),
            "Added to cart"
        );
        Ok(line)
    }

    /// Drop the product's whole line from the cart, whatever its quantity.
    pub fn remove_from_cart(&mut self, product_id: ProductId) -> Option<CartLine> {
        let removed = self.cart.remove(product_id);
        if removed.is_some() {
            debug!(product_id = %product_id, "Removed from cart");
        }
        removed
    }

    /// Set the quantity of a line already in the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NotInCart`] if the product has no line.
    pub fn set_quantity(
        &mut self,
        product_id: ProductId,
        quantity: NonZeroU32,
    ) -> Result<&CartLine, CartError> {
        self.cart.set_quantity(product_id, quantity)
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    /// The cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Σ price × quantity over the cart, recomputed on each call.
    #[must_use]
    pub fn cart_total(&self) -> Price {
        self.cart.total()
    }

    /// Σ quantity over the cart (the badge number).
    #[must_use]
    pub fn cart_item_count(&self) -> u32 {
        self.cart.item_count()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn product(id: i32, category: &str, price: u32, stock: u32) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Tomo {id}"),
            price: Price::from_units(price),
            category: category.to_string(),
            stock,
            description: None,
            image_url: None,
        }
    }

    struct FakeCatalog(Vec<Product>);

    impl CatalogSource for FakeCatalog {
        async fn list_products(&self) -> Vec<Product> {
            self.0.clone()
        }
    }

    fn loaded(products: Vec<Product>) -> Catalog {
        let mut catalog = Catalog::new();
        catalog.finish_loading(products);
        catalog
    }

    #[tokio::test]
    async fn test_loading_gate() {
        let mut catalog = Catalog::new();
        assert!(catalog.is_loading());

        catalog
            .load(&FakeCatalog(vec![product(1, "Manga", 150, 15)]))
            .await;
        assert!(!catalog.is_loading());
        assert_eq!(catalog.products().len(), 1);
    }

    #[tokio::test]
    async fn test_loading_gate_opens_on_empty_result() {
        let mut catalog = Catalog::new();
        catalog.load(&FakeCatalog(Vec::new())).await;
        assert!(!catalog.is_loading());
        assert!(catalog.visible_products().is_empty());
    }

    #[test]
    fn test_categories_prefixed_with_all() {
        let catalog = loaded(vec![
            product(1, "Manga", 150, 15),
            product(2, "Comic", 180, 25),
            product(3, "Manga", 120, 4),
        ]);

        let labels: Vec<String> = catalog
            .categories()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(labels, ["Todas", "Manga", "Comic"]);
    }

    #[test]
    fn test_filter_all_returns_everything() {
        let catalog = loaded(vec![product(1, "Manga", 150, 15), product(2, "Comic", 180, 25)]);
        assert_eq!(catalog.visible_products().len(), 2);
    }

    #[test]
    fn test_filter_by_exact_category() {
        let mut catalog = loaded(vec![
            product(1, "Manga", 150, 15),
            product(2, "Comic", 180, 25),
            product(3, "manga", 90, 2),
        ]);

        catalog.set_filter(CategoryFilter::from_label("Manga"));
        let ids: Vec<ProductId> = catalog.visible_products().iter().map(|p| p.id).collect();
        assert_eq!(ids, [ProductId::new(1)]);

        catalog.set_filter(CategoryFilter::from_label(ALL_CATEGORIES_LABEL));
        assert_eq!(catalog.filter(), &CategoryFilter::All);
        assert_eq!(catalog.visible_products().len(), 3);
    }

    #[test]
    fn test_out_of_stock_then_repeat_add() {
        let mut catalog = loaded(vec![product(1, "Manga", 150, 0), product(2, "Comic", 180, 5)]);

        let err = catalog.add_to_cart(ProductId::new(1)).unwrap_err();
        assert_eq!(err, CartError::OutOfStock(ProductId::new(1)));
        assert!(catalog.cart().is_empty());

        catalog.add_to_cart(ProductId::new(2)).unwrap();
        catalog.add_to_cart(ProductId::new(2)).unwrap();

        let lines = catalog.cart().lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].product_id(), ProductId::new(2));
        assert_eq!(lines[0].quantity(), 2);
        assert_eq!(catalog.cart_total(), Price::from_units(360));
        assert_eq!(catalog.cart_item_count(), 2);
    }

    #[test]
    fn test_unknown_product() {
        let mut catalog = loaded(vec![product(1, "Manga", 150, 15)]);
        assert_eq!(
            catalog.add_to_cart(ProductId::new(99)).unwrap_err(),
            CartError::UnknownProduct(ProductId::new(99))
        );
    }

    #[test]
    fn test_remove_drops_line_and_updates_total() {
        let mut catalog = loaded(vec![product(1, "Manga", 150, 15), product(2, "Comic", 180, 25)]);
        catalog.add_to_cart(ProductId::new(1)).unwrap();
        catalog.add_to_cart(ProductId::new(1)).unwrap();
        catalog.add_to_cart(ProductId::new(2)).unwrap();
        assert_eq!(catalog.cart_total(), Price::from_units(480));

        let removed = catalog.remove_from_cart(ProductId::new(1)).unwrap();
        assert_eq!(removed.quantity(), 2);
        assert_eq!(catalog.cart_total(), Price::from_units(180));
        assert_eq!(catalog.cart_item_count(), 1);
        assert!(catalog.remove_from_cart(ProductId::new(1)).is_none());
    }

    #[test]
    fn test_set_quantity_and_clear() {
        let mut catalog = loaded(vec![product(1, "Manga", 150, 15)]);
        catalog.add_to_cart(ProductId::new(1)).unwrap();
        catalog
            .set_quantity(ProductId::new(1), NonZeroU32::new(3).unwrap())
            .unwrap();
        assert_eq!(catalog.cart_total(), Price::from_units(450));

        catalog.clear_cart();
        assert_eq!(catalog.cart_total(), Price::ZERO);
    }

    #[test]
    fn test_stock_levels() {
        assert_eq!(
            Catalog::stock_level(&product(1, "Manga", 1, 11)),
            StockLevel::InStock
        );
        assert_eq!(
            Catalog::stock_level(&product(1, "Manga", 1, 10)),
            StockLevel::LowStock
        );
        assert_eq!(
            Catalog::stock_level(&product(1, "Manga", 1, 0)),
            StockLevel::OutOfStock
        );
    }
}
