//! # vitrine-core: Cart & Pricing Engine for Vitrine
//!
//! This crate is the **heart** of the Vitrine storefront. It decides how a
//! customer's option selections are represented, priced, validated, merged
//! into cart lines and gated against a store's minimum order.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Vitrine Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Storefront Front End                         │   │
//! │  │    Catalog ──► Product Detail ──► Cart ──► Checkout             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 vitrine-storefront (session layer)              │   │
//! │  │    add_to_cart, remove_cart_line, checkout_status, etc.        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ vitrine-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │  ┌────────┐ ┌─────────┐ ┌───────────┐ ┌──────┐ ┌────────────┐  │   │
//! │  │  │ money  │ │ pricing │ │ selection │ │ cart │ │ order_gate │  │   │
//! │  │  └────────┘ └─────────┘ └───────────┘ └──────┘ └────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CATALOG FETCHES • NO STORAGE • PURE FUNCTIONS    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                ▲                                        │
//! │  ┌─────────────────────────────┴───────────────────────────────────┐   │
//! │  │               vitrine-catalog (Catalog Provider)                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Integer-cents money with locale parsing/formatting
//! - [`types`] - Catalog types (Product, OptionGroup, Selection)
//! - [`pricing`] - Additive option pricing
//! - [`selection`] - Completeness and write-time selection checks
//! - [`cart`] - Cart lines and merge semantics
//! - [`order_gate`] - Minimum-order policy
//! - [`validation`] - Catalog integrity and input validators
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use vitrine_core::{cart::Cart, pricing, Money, Product, Selection};
//!
//! let product = Product::simple("p1", "Camiseta", 7990).with_previous_price(24990);
//! assert!(product.has_discount());
//!
//! let mut cart = Cart::new();
//! cart.add("p1", Selection::new());
//! cart.add("p1", Selection::new());
//! assert_eq!(cart.quantity_of("p1"), 2);
//!
//! let unit = pricing::total_price(&product, &Selection::new());
//! assert_eq!(unit.format(), "R$ 79,90");
//! assert_eq!(Money::parse("R$ 79,90"), unit);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod order_gate;
pub mod pricing;
pub mod selection;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine, LineId};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{CurrencyFormat, Money};
pub use order_gate::{OrderProgress, ProductLookup};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines allowed in a single cart.
///
/// ## Business Reason
/// Prevents runaway carts. Stores can lower it through configuration.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity of a single cart line.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., tapping "+" far too many times).
pub const MAX_LINE_QUANTITY: u32 = 999;
