//! # In-Memory Catalog
//!
//! A [`CatalogProvider`] backed by a `tokio::sync::RwLock`.
//!
//! Used by tests and the `quote` tool, and to simulate catalog edits while
//! carts are open: upserting a product with an option removed is exactly
//! the "stale option id" situation the pricing rules must tolerate.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use vitrine_core::Product;

use crate::error::{CatalogError, CatalogResult};
use crate::provider::{checked, CatalogProvider};

/// Thread-safe, mutable catalog held in memory.
///
/// ## Usage
/// ```rust,ignore
/// let catalog = InMemoryCatalog::new();
/// catalog.upsert(Product::simple("p1", "Tee", 7990).in_store("s1")).await?;
///
/// let product = catalog.fetch_product("s1", "p1").await?;
/// ```
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: RwLock<Vec<Product>>,
}

impl InMemoryCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog from products, validating each one.
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> CatalogResult<Self> {
        let products = products
            .into_iter()
            .map(checked)
            .collect::<CatalogResult<Vec<_>>>()?;

        Ok(InMemoryCatalog {
            products: RwLock::new(products),
        })
    }

    /// Inserts or replaces a product, keeping its position when replacing.
    ///
    /// Products are keyed by `(store_id, id)`.
    pub async fn upsert(&self, product: Product) -> CatalogResult<()> {
        let product = checked(product)?;
        let mut products = self.products.write().await;

        match products
            .iter_mut()
            .find(|p| p.store_id == product.store_id && p.id == product.id)
        {
            Some(existing) => {
                debug!(store_id = %product.store_id, product_id = %product.id, "Replacing catalog product");
                *existing = product;
            }
            None => {
                debug!(store_id = %product.store_id, product_id = %product.id, "Adding catalog product");
                products.push(product);
            }
        }
        Ok(())
    }

    /// Removes a store's product. Returns false when it was not present.
    pub async fn remove(&self, store_id: &str, product_id: &str) -> bool {
        let mut products = self.products.write().await;
        let before = products.len();
        products.retain(|p| !(p.store_id == store_id && p.id == product_id));
        let removed = products.len() != before;
        if removed {
            debug!(store_id = %store_id, product_id = %product_id, "Removed catalog product");
        }
        removed
    }

    /// Swaps the whole catalog at once; products must already be validated.
    pub(crate) async fn replace_all(&self, products: Vec<Product>) {
        *self.products.write().await = products;
    }

    /// Number of products across all stores.
    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    /// True when the catalog holds no products.
    pub async fn is_empty(&self) -> bool {
        self.products.read().await.is_empty()
    }
}

#[async_trait]
impl CatalogProvider for InMemoryCatalog {
    async fn fetch_product(&self, store_id: &str, product_id: &str) -> CatalogResult<Product> {
        self.products
            .read()
            .await
            .iter()
            .find(|p| p.store_id == store_id && p.id == product_id)
            .cloned()
            .ok_or_else(|| CatalogError::not_found(product_id))
    }

    async fn fetch_products(&self, store_id: &str) -> CatalogResult<Vec<Product>> {
        let products: Vec<Product> = self
            .products
            .read()
            .await
            .iter()
            .filter(|p| p.store_id == store_id)
            .cloned()
            .collect();

        debug!(store_id = %store_id, count = products.len(), "Fetched store catalog");
        Ok(products)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
