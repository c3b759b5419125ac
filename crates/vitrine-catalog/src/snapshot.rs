//! # Catalog Snapshot
//!
//! An immutable id → product map taken once per request.
//!
//! Pricing and the order gate read from a snapshot rather than from the
//! provider, so a cart total is computed against one consistent catalog
//! even while the provider is being edited.

use std::collections::HashMap;

use vitrine_core::{Product, ProductLookup};

/// Read-only view of one store's catalog at a point in time.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    store_id: String,
    order: Vec<String>,
    products: HashMap<String, Product>,
}

impl CatalogSnapshot {
    /// Builds a snapshot; a later duplicate id replaces the earlier product.
    pub fn new(store_id: impl Into<String>, products: impl IntoIterator<Item = Product>) -> Self {
        let mut order = Vec::new();
        let mut map = HashMap::new();

        for product in products {
            if !map.contains_key(&product.id) {
                order.push(product.id.clone());
            }
            map.insert(product.id.clone(), product);
        }

        CatalogSnapshot {
            store_id: store_id.into(),
            order,
            products: map,
        }
    }

    /// Store this snapshot belongs to.
    pub fn store_id(&self) -> &str {
        &self.store_id
    }

    /// Looks up a product by id.
    pub fn get(&self, product_id: &str) -> Option<&Product> {
        self.products.get(product_id)
    }

    /// Products in catalog order.
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.order.iter().filter_map(|id| self.products.get(id))
    }

    /// Products currently offered to customers.
    pub fn active(&self) -> impl Iterator<Item = &Product> {
        self.products().filter(|product| product.is_active)
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// True when the snapshot has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl ProductLookup for CatalogSnapshot {
    fn product(&self, product_id: &str) -> Option<&Product> {
        self.get(product_id)
    }
}
