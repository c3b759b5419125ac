//! # Cart Module
//!
//! The ordered collection of cart lines and its merge/quantity rules.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Customer Action           Cart Method              Effect              │
//! │  ───────────────           ───────────              ──────              │
//! │                                                                         │
//! │  "Add" on product page ──► add(pid, sel) ─────────► merge or push line  │
//! │                                                                         │
//! │  "−" on a cart line ─────► remove(line_id) ───────► qty − 1, drop at 0  │
//! │                                                                         │
//! │  "−" on a catalog card ──► remove_any_variant(pid) ► most recent line   │
//! │                                                                         │
//! │  Edit options ───────────► set_selection(line_id) ► replace in place    │
//! │                                                                         │
//! │  Badge "3 in cart" ──────► quantity_of(pid) ──────► Σ over variants     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Every line has `quantity >= 1`; a line reaching zero is deleted
//! - `add` never creates a line that is line-equal to an existing one
//! - Every operation is total: unknown line ids and product ids are no-ops
//!
//! ## Line Equality
//! Same `product_id` and equal [`Selection`]s (same option ids per group,
//! order irrelevant, empty groups insignificant). Because pricing is purely
//! additive, line-equal lines always have the same unit price.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::types::Selection;

// =============================================================================
// Line Id
// =============================================================================

/// Stable identifier of one cart line.
///
/// Lines are addressed by id rather than by product id, because several
/// option variants of one product can sit in the cart side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineId(#[ts(type = "string")] Uuid);

impl LineId {
    /// Generates a fresh id.
    pub fn new() -> Self {
        LineId(Uuid::new_v4())
    }
}

impl Default for LineId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for LineId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(LineId)
            .map_err(|_| ValidationError::InvalidFormat {
                field: "line id".to_string(),
                reason: "must be a valid UUID".to_string(),
            })
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// One line of the cart: a product, the options chosen for it, and how many.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    id: LineId,
    product_id: String,
    quantity: u32,
    selection: Selection,
    #[ts(as = "String")]
    added_at: DateTime<Utc>,
    /// Monotonic touch sequence; higher means more recently added/changed.
    #[serde(default)]
    touched: u64,
}

impl CartLine {
    /// Line id.
    pub fn id(&self) -> LineId {
        self.id
    }

    /// Product this line refers to.
    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    /// Quantity, always at least 1.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Options chosen for this line.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// When the line was first created.
    pub fn added_at(&self) -> DateTime<Utc> {
        self.added_at
    }

    /// True iff this line is line-equal to `(product_id, selection)`.
    pub fn is_line_equal(&self, product_id: &str, selection: &Selection) -> bool {
        self.product_id == product_id && &self.selection == selection
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The customer's cart.
///
/// ## Ownership
/// A `Cart` is a plain value owned by one session. It holds no globals and
/// no locks; a multi-threaded host wraps it (see the storefront's
/// `CartState`).
///
/// ## Example
/// ```rust
/// use vitrine_core::{Cart, Selection};
///
/// let mut cart = Cart::new();
/// let first = cart.add("p1", Selection::new());
/// let again = cart.add("p1", Selection::new());
/// assert_eq!(first, again);
/// assert_eq!(cart.quantity_of("p1"), 2);
///
/// cart.remove(first);
/// assert_eq!(cart.quantity_of("p1"), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart {
    lines: Vec<CartLine>,
    #[ts(as = "String")]
    created_at: DateTime<Utc>,
    #[serde(default)]
    touch_seq: u64,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            lines: Vec::new(),
            created_at: Utc::now(),
            touch_seq: 0,
        }
    }

    /// Adds one unit of `(product_id, selection)`.
    ///
    /// ## Behavior
    /// - A line-equal line exists: its quantity grows by one
    /// - Otherwise: a new line with quantity 1 is appended
    ///
    /// Returns the id of the line that received the unit.
    pub fn add(&mut self, product_id: impl Into<String>, selection: Selection) -> LineId {
        let product_id = product_id.into();
        let touched = self.next_touch();

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.is_line_equal(&product_id, &selection))
        {
            line.quantity = line.quantity.saturating_add(1);
            line.touched = touched;
            return line.id;
        }

        let line = CartLine {
            id: LineId::new(),
            product_id,
            quantity: 1,
            selection,
            added_at: Utc::now(),
            touched,
        };
        let id = line.id;
        self.lines.push(line);
        id
    }

    /// Removes one unit from a specific line; the line goes away at zero.
    ///
    /// Returns false (and changes nothing) when the line does not exist.
    pub fn remove(&mut self, line_id: LineId) -> bool {
        let Some(index) = self.index_of(line_id) else {
            return false;
        };
        self.decrement_at(index);
        true
    }

    /// Removes one unit from the most recently touched line of a product.
    ///
    /// Convenience for surfaces that only know the product (a "−" on a
    /// catalog card). Returns the line that was decremented, or `None` when
    /// the product is not in the cart.
    pub fn remove_any_variant(&mut self, product_id: &str) -> Option<LineId> {
        let index = self
            .lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.product_id == product_id)
            .max_by_key(|(_, line)| line.touched)
            .map(|(index, _)| index)?;

        let id = self.lines.get(index)?.id;
        self.decrement_at(index);
        Some(id)
    }

    /// Replaces the selection of a line in place.
    ///
    /// The merge rule is NOT re-applied, so this can leave two line-equal
    /// lines in the cart. Returns false when the line does not exist.
    pub fn set_selection(&mut self, line_id: LineId, selection: Selection) -> bool {
        let touched = self.next_touch();
        match self.lines.iter_mut().find(|line| line.id == line_id) {
            Some(line) => {
                line.selection = selection;
                line.touched = touched;
                true
            }
            None => false,
        }
    }

    /// Sets the quantity of a line; zero deletes it.
    ///
    /// Returns false when the line does not exist.
    pub fn set_quantity(&mut self, line_id: LineId, quantity: u32) -> bool {
        let Some(index) = self.index_of(line_id) else {
            return false;
        };

        if quantity == 0 {
            self.lines.remove(index);
            return true;
        }

        let touched = self.next_touch();
        if let Some(line) = self.lines.get_mut(index) {
            line.quantity = quantity;
            line.touched = touched;
        }
        true
    }

    /// Total units of a product across all of its variants.
    pub fn quantity_of(&self, product_id: &str) -> u32 {
        self.lines
            .iter()
            .filter(|line| line.product_id == product_id)
            .fold(0u32, |sum, line| sum.saturating_add(line.quantity))
    }

    /// Finds the line that is line-equal to `(product_id, selection)`.
    pub fn find_equal(&self, product_id: &str, selection: &Selection) -> Option<&CartLine> {
        self.lines
            .iter()
            .find(|line| line.is_line_equal(product_id, selection))
    }

    /// Looks up a line by id.
    pub fn line(&self, line_id: LineId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id == line_id)
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total units across all lines.
    pub fn total_quantity(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |sum, line| sum.saturating_add(line.quantity))
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// When the cart was created or last cleared.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Removes every line.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.created_at = Utc::now();
    }

    fn index_of(&self, line_id: LineId) -> Option<usize> {
        self.lines.iter().position(|line| line.id == line_id)
    }

    fn decrement_at(&mut self, index: usize) {
        let touched = self.next_touch();
        let Some(line) = self.lines.get_mut(index) else {
            return;
        };

        if line.quantity <= 1 {
            self.lines.remove(index);
        } else {
            line.quantity -= 1;
            line.touched = touched;
        }
    }

    fn next_touch(&mut self) -> u64 {
        self.touch_seq += 1;
        self.touch_seq
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
