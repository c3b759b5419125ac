//! # vitrine-catalog: Catalog Provider for Vitrine
//!
//! This crate supplies product data to the storefront. Pricing and cart
//! rules never fetch anything themselves; they read from a snapshot this
//! crate hands out.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Vitrine Data Flow                                │
//! │                                                                         │
//! │  Storefront command (add_to_cart, checkout_status)                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 vitrine-catalog (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────────────┐  ┌────────────────┐  ┌────────────────┐  │   │
//! │  │   │ CatalogProvider │  │   Adapters     │  │ CatalogSnapshot│  │   │
//! │  │   │ (provider.rs)   │◄─│ InMemoryCatalog│  │ (snapshot.rs)  │  │   │
//! │  │   │ async trait     │  │ JsonFileCatalog│  │ ProductLookup  │  │   │
//! │  │   └─────────────────┘  └────────────────┘  └────────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  vitrine-core validation (every product checked on load/upsert)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`provider`] - The `CatalogProvider` port
//! - [`memory`] - RwLock-backed adapter, supports edits
//! - [`json_file`] - Adapter loading a JSON catalog document
//! - [`snapshot`] - Immutable per-request view
//! - [`error`] - Catalog error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vitrine_catalog::{CatalogProvider, JsonFileCatalog};
//!
//! let catalog = JsonFileCatalog::open("catalog.json").await?;
//! let snapshot = catalog.snapshot("loja-centro").await?;
//! let total = vitrine_core::order_gate::total_cents(&cart, &snapshot);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod json_file;
pub mod memory;
pub mod provider;
pub mod snapshot;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{CatalogError, CatalogResult};
pub use json_file::{CatalogDocument, JsonFileCatalog};
pub use memory::InMemoryCatalog;
pub use provider::CatalogProvider;
pub use snapshot::CatalogSnapshot;
