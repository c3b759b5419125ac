//! # Catalog Error Types
//!
//! Error types for Catalog Provider operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  io::Error / serde_json::Error / ValidationError                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CatalogError (this module) ← Adds path/product context                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in storefront) ← Serialized for the front end               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Front end displays user-friendly message                              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use thiserror::Error;
use vitrine_core::ValidationError;

/// Catalog Provider errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Product does not exist in the catalog.
    ///
    /// ## When This Occurs
    /// - Product id never existed
    /// - Product was removed by a catalog edit
    #[error("Product not found: {product_id}")]
    NotFound { product_id: String },

    /// Catalog file could not be read or written.
    #[error("Catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Catalog document is not valid JSON or has the wrong shape.
    #[error("Malformed catalog document {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A product breaks an option-group or pricing invariant.
    ///
    /// ## When This Occurs
    /// - Duplicate option ids inside a group
    /// - `min_selections > max_selections`
    /// - Negative prices
    #[error("Invalid product {product_id}: {source}")]
    Invalid {
        product_id: String,
        #[source]
        source: ValidationError,
    },
}

impl CatalogError {
    /// Creates a NotFound error for a product id.
    pub fn not_found(product_id: impl Into<String>) -> Self {
        CatalogError::NotFound {
            product_id: product_id.into(),
        }
    }

    /// True for the "no such product" case.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound { .. })
    }
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = CatalogError::not_found("pizza");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Product not found: pizza");
    }

    #[test]
    fn test_invalid_message_includes_cause() {
        let err = CatalogError::Invalid {
            product_id: "pizza".to_string(),
            source: ValidationError::Required {
                field: "product name".to_string(),
            },
        };
        assert_eq!(err.to_string(), "Invalid product pizza: product name is required");
        assert!(!err.is_not_found());
    }
}
