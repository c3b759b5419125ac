//! # Catalog Provider
//!
//! The async port the storefront uses to read products.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add_to_cart("pizza", {size: m})                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  provider.fetch_product(store, "pizza")   ◄── async boundary            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_selection / is_complete          ◄── pure, vitrine-core       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  cart.add(...)                             ◄── sync, under the cart lock│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Implementations must only hand out products that passed
//! [`validate_product`](vitrine_core::validation::validate_product).

use async_trait::async_trait;
use vitrine_core::validation::validate_product;
use vitrine_core::Product;

use crate::error::{CatalogError, CatalogResult};
use crate::snapshot::CatalogSnapshot;

/// Source of product data for one or more stores.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Fetches one product of a store by id, active or not.
    ///
    /// Product ids are unique per store only; a product with the same id
    /// in another store is never returned.
    async fn fetch_product(&self, store_id: &str, product_id: &str) -> CatalogResult<Product>;

    /// Fetches every product of a store, in catalog order.
    async fn fetch_products(&self, store_id: &str) -> CatalogResult<Vec<Product>>;

    /// Takes an immutable snapshot of a store's catalog.
    async fn snapshot(&self, store_id: &str) -> CatalogResult<CatalogSnapshot> {
        let products = self.fetch_products(store_id).await?;
        Ok(CatalogSnapshot::new(store_id, products))
    }
}

/// Runs catalog integrity checks, attaching the product id to failures.
pub(crate) fn checked(product: Product) -> CatalogResult<Product> {
    validate_product(&product).map_err(|source| CatalogError::Invalid {
        product_id: product.id.clone(),
        source,
    })?;
    Ok(product)
}
