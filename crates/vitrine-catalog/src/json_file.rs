//! # JSON File Catalog
//!
//! A [`CatalogProvider`] that loads one store's products from a JSON file.
//!
//! ## Document Shape
//! ```text
//! {
//!   "store_id": "loja-centro",
//!   "products": [
//!     {
//!       "id": "pizza", "name": "Pizza", "base_price_cents": 0,
//!       "option_groups": [
//!         { "id": "size", "title": "Size", "required": true,
//!           "mode": { "kind": "single" },
//!           "options": [ { "id": "m", "name": "Medium", "additional_price_cents": 3990 } ] }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! Products without a `store_id` inherit the document's. Every product is
//! validated on load; one bad product rejects the whole document so a
//! half-loaded menu never reaches customers.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use vitrine_core::Product;

use crate::error::{CatalogError, CatalogResult};
use crate::memory::InMemoryCatalog;
use crate::provider::{checked, CatalogProvider};

// =============================================================================
// Catalog Document
// =============================================================================

/// On-disk catalog format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogDocument {
    pub store_id: String,
    #[serde(default)]
    pub products: Vec<Product>,
}

impl CatalogDocument {
    /// Reads and parses a document without validating products.
    pub async fn read(path: &Path) -> CatalogResult<Self> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| CatalogError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        serde_json::from_str(&raw).map_err(|source| CatalogError::Malformed {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Writes the document as pretty-printed JSON.
    pub async fn write(&self, path: &Path) -> CatalogResult<()> {
        let json = serde_json::to_string_pretty(self).map_err(|source| CatalogError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;

        tokio::fs::write(path, json)
            .await
            .map_err(|source| CatalogError::Io {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Fills in store ids and validates every product.
    fn into_products(self) -> CatalogResult<Vec<Product>> {
        let store_id = self.store_id;
        self.products
            .into_iter()
            .map(|mut product| {
                if product.store_id.is_empty() {
                    product.store_id = store_id.clone();
                }
                checked(product)
            })
            .collect()
    }
}

// =============================================================================
// JSON File Catalog
// =============================================================================

/// Catalog loaded from a [`CatalogDocument`] on disk.
#[derive(Debug)]
pub struct JsonFileCatalog {
    path: PathBuf,
    store_id: String,
    inner: InMemoryCatalog,
}

impl JsonFileCatalog {
    /// Loads and validates the document at `path`.
    pub async fn open(path: impl Into<PathBuf>) -> CatalogResult<Self> {
        let path = path.into();
        let document = CatalogDocument::read(&path).await?;
        let store_id = document.store_id.clone();
        let products = document.into_products()?;

        info!(path = %path.display(), store_id = %store_id, count = products.len(), "Loaded catalog file");

        let inner = InMemoryCatalog::new();
        inner.replace_all(products).await;
        Ok(JsonFileCatalog {
            path,
            store_id,
            inner,
        })
    }

    /// Re-reads the file. On any error the previous catalog stays in place.
    pub async fn reload(&self) -> CatalogResult<usize> {
        let document = CatalogDocument::read(&self.path).await?;
        let products = document.into_products()?;
        let count = products.len();

        self.inner.replace_all(products).await;
        debug!(path = %self.path.display(), count, "Reloaded catalog file");
        Ok(count)
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Store id declared by the document.
    pub fn store_id(&self) -> &str {
        &self.store_id
    }
}

#[async_trait]
impl CatalogProvider for JsonFileCatalog {
    async fn fetch_product(&self, store_id: &str, product_id: &str) -> CatalogResult<Product> {
        self.inner.fetch_product(store_id, product_id).await
    }

    async fn fetch_products(&self, store_id: &str) -> CatalogResult<Vec<Product>> {
        self.inner.fetch_products(store_id).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_core::{OptionGroup, ProductOption};

    const DOCUMENT: &str = r#"{
        "store_id": "s1",
        "products": [
            {
                "id": "pizza",
                "name": "Pizza",
                "option_groups": [
                    {
                        "id": "size",
                        "title": "Size",
                        "required": true,
                        "mode": { "kind": "single" },
                        "options": [
                            { "id": "m", "name": "Medium", "additional_price_cents": 3990 }
                        ]
                    }
                ]
            },
            { "id": "tee", "name": "Tee", "base_price_cents": 7990, "previous_price_cents": 24990 }
        ]
    }"#;

    async fn write_file(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("catalog.json");
        tokio::fs::write(&path, contents).await.unwrap();
        path
    }

    #[tokio::test]
    async fn test_open_inherits_store_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, DOCUMENT).await;

        let catalog = JsonFileCatalog::open(&path).await.unwrap();
        assert_eq!(catalog.store_id(), "s1");

        let products = catalog.fetch_products("s1").await.unwrap();
        assert_eq!(products.len(), 2);
        assert!(products.iter().all(|p| p.store_id == "s1"));

        let tee = catalog.fetch_product("s1", "tee").await.unwrap();
        assert!(tee.has_discount());
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = JsonFileCatalog::open(dir.path().join("nope.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }

    #[tokio::test]
    async fn test_malformed_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "{ not json").await;

        let err = JsonFileCatalog::open(&path).await.unwrap_err();
        assert!(matches!(err, CatalogError::Malformed { .. }));
    }

    #[tokio::test]
    async fn test_invalid_product_rejects_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            r#"{ "store_id": "s1", "products": [ { "id": "x", "name": "X", "base_price_cents": -5 } ] }"#,
        )
        .await;

        let err = JsonFileCatalog::open(&path).await.unwrap_err();
        assert!(matches!(err, CatalogError::Invalid { ref product_id, .. } if product_id == "x"));
    }

    #[tokio::test]
    async fn test_reload_keeps_previous_catalog_on_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, DOCUMENT).await;
        let catalog = JsonFileCatalog::open(&path).await.unwrap();

        tokio::fs::write(&path, "garbage").await.unwrap();
        assert!(catalog.reload().await.is_err());
        assert!(catalog.fetch_product("s1", "pizza").await.is_ok());
    }

    #[tokio::test]
    async fn test_write_then_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("written.json");
        let document = CatalogDocument {
            store_id: "s9".to_string(),
            products: vec![Product::simple("pizza", "Pizza", 0).with_group(
                OptionGroup::multiple("extras", "Extras", false, 0, Some(2))
                    .with_option(ProductOption::new("cheese", "Cheese", 500)),
            )],
        };
        document.write(&path).await.unwrap();

        let catalog = JsonFileCatalog::open(&path).await.unwrap();
        assert_eq!(catalog.reload().await.unwrap(), 1);
        let pizza = catalog.fetch_product("s9", "pizza").await.unwrap();
        assert_eq!(pizza.store_id, "s9");
    }
}
