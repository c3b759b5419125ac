//! # Order Gate Module
//!
//! Minimum-order policy: may this cart proceed to checkout?
//!
//! ## Checkout Gate
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cart                               Catalog snapshot                    │
//! │  ├── Pizza {size:m} × 2   ────────► Pizza: 0 + 39,90      = 79,80      │
//! │  └── Soda {}        × 1   ────────► Soda:  6,00           =  6,00      │
//! │                                                       total  85,80      │
//! │                                                                         │
//! │  Store minimum R$ 100,00                                                │
//! │     meets_minimum = false                                               │
//! │     remaining     = R$ 14,20   ◄── "Add R$ 14,20 more to check out"    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The catalog is whatever implements [`ProductLookup`]. Lines whose product
//! is no longer in the catalog contribute zero.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::money::Money;
use crate::pricing::total_price;
use crate::types::Product;

// =============================================================================
// Product Lookup
// =============================================================================

/// Read-only access to a catalog snapshot by product id.
pub trait ProductLookup {
    /// Returns the product, or `None` when the snapshot does not have it.
    fn product(&self, product_id: &str) -> Option<&Product>;
}

impl ProductLookup for HashMap<String, Product> {
    fn product(&self, product_id: &str) -> Option<&Product> {
        self.get(product_id)
    }
}

impl ProductLookup for [Product] {
    fn product(&self, product_id: &str) -> Option<&Product> {
        self.iter().find(|product| product.id == product_id)
    }
}

impl ProductLookup for Vec<Product> {
    fn product(&self, product_id: &str) -> Option<&Product> {
        self.as_slice().product(product_id)
    }
}

impl<T: ProductLookup + ?Sized> ProductLookup for &T {
    fn product(&self, product_id: &str) -> Option<&Product> {
        (**self).product(product_id)
    }
}

// =============================================================================
// Gate Operations
// =============================================================================

/// Σ unit price × quantity over every line.
///
/// ## Example
/// ```rust
/// use vitrine_core::{order_gate, Cart, Product, Selection};
///
/// let catalog = vec![Product::simple("p1", "Soda", 800)];
/// let mut cart = Cart::new();
/// cart.add("p1", Selection::new());
/// cart.add("p1", Selection::new());
///
/// assert_eq!(order_gate::total_cents(&cart, &catalog).cents(), 1600);
/// ```
pub fn total_cents<C: ProductLookup + ?Sized>(cart: &Cart, catalog: &C) -> Money {
    cart.lines()
        .iter()
        .filter_map(|line| {
            catalog
                .product(line.product_id())
                .map(|product| total_price(product, line.selection()) * line.quantity())
        })
        .sum()
}

/// True iff there is no minimum or the total reaches it.
pub fn meets_minimum<C: ProductLookup + ?Sized>(cart: &Cart, catalog: &C, minimum: Money) -> bool {
    let minimum = effective_minimum(minimum);
    minimum.is_zero() || total_cents(cart, catalog) >= minimum
}

/// How much more the customer must add; zero once the minimum is met.
pub fn remaining<C: ProductLookup + ?Sized>(cart: &Cart, catalog: &C, minimum: Money) -> Money {
    remaining_for(total_cents(cart, catalog), effective_minimum(minimum))
}

/// Everything a "minimum order" progress bar needs, computed from one total.
pub fn progress<C: ProductLookup + ?Sized>(
    cart: &Cart,
    catalog: &C,
    minimum: Money,
) -> OrderProgress {
    OrderProgress::from_total(total_cents(cart, catalog), minimum)
}

fn effective_minimum(minimum: Money) -> Money {
    if minimum.is_negative() {
        Money::zero()
    } else {
        minimum
    }
}

fn remaining_for(total: Money, minimum: Money) -> Money {
    if total >= minimum {
        Money::zero()
    } else {
        minimum - total
    }
}

// =============================================================================
// Order Progress
// =============================================================================

/// Snapshot of the cart against the store minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderProgress {
    pub total: Money,
    pub minimum: Money,
    pub remaining: Money,
    pub meets_minimum: bool,
    /// 0..=100; 100 when the store has no minimum.
    pub percent: u8,
}

impl OrderProgress {
    /// Builds the progress from an already computed total.
    pub fn from_total(total: Money, minimum: Money) -> Self {
        let minimum = effective_minimum(minimum);
        let percent = if minimum.is_zero() {
            100
        } else {
            let ratio = i128::from(total.cents()) * 100 / i128::from(minimum.cents());
            u8::try_from(ratio.clamp(0, 100)).unwrap_or(100)
        };

        OrderProgress {
            total,
            minimum,
            remaining: remaining_for(total, minimum),
            meets_minimum: minimum.is_zero() || total >= minimum,
            percent,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
