//! # Catalog State
//!
//! The Catalog Provider a session reads products from.

use std::sync::Arc;

use vitrine_catalog::{CatalogProvider, CatalogResult, CatalogSnapshot, InMemoryCatalog, JsonFileCatalog};
use vitrine_core::Product;

use crate::config::StoreConfig;

/// Shared handle to a Catalog Provider.
#[derive(Clone)]
pub struct CatalogState {
    provider: Arc<dyn CatalogProvider>,
}

impl CatalogState {
    /// Wraps any provider.
    pub fn new(provider: Arc<dyn CatalogProvider>) -> Self {
        CatalogState { provider }
    }

    /// Opens the provider named by the configuration.
    ///
    /// A `[catalog] path` loads a JSON document; otherwise the catalog
    /// starts empty.
    pub async fn from_config(config: &StoreConfig) -> CatalogResult<Self> {
        let provider: Arc<dyn CatalogProvider> = match &config.catalog.path {
            Some(path) => Arc::new(JsonFileCatalog::open(path.clone()).await?),
            None => Arc::new(InMemoryCatalog::new()),
        };
        Ok(CatalogState::new(provider))
    }

    /// Fetches one product of a store.
    pub async fn product(&self, store_id: &str, product_id: &str) -> CatalogResult<Product> {
        self.provider.fetch_product(store_id, product_id).await
    }

    /// Takes a snapshot of a store's catalog.
    pub async fn snapshot(&self, store_id: &str) -> CatalogResult<CatalogSnapshot> {
        self.provider.snapshot(store_id).await
    }
}

impl std::fmt::Debug for CatalogState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogState").finish_non_exhaustive()
    }
}
