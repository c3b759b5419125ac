//! # Cart Commands
//!
//! Commands for cart manipulation.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Minimum  │────►│ Checkout │       │
//! │  │  Cart    │     │          │     │   Met    │     │ Hand-off │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                                 │              │
//! │                   add_to_cart                      begin_checkout      │
//! │                   remove_cart_line                 (checkout.rs)       │
//! │                   remove_any_variant                                    │
//! │                   update_line_selection                                 │
//! │                   update_line_quantity                                  │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear_cart ──────────────────────►                   │
//! │                                                      (back to empty)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Prices
//! Nothing is frozen in the cart. Every response re-prices each line
//! against a fresh catalog snapshot, so a catalog edit shows up on the
//! next read and a withdrawn option simply stops being charged.

use serde::Serialize;
use tracing::debug;
use vitrine_catalog::CatalogSnapshot;
use vitrine_core::selection::{is_complete, missing_groups, validate_selection};
use vitrine_core::validation::validate_quantity;
use vitrine_core::{
    order_gate, pricing, Cart, CartLine, CoreError, LineId, Money, OrderProgress, Product,
    Selection,
};

use crate::error::ApiError;
use crate::state::{CartState, CatalogState, ConfigState};

// =============================================================================
// Response Types
// =============================================================================

/// An amount with its display string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceView {
    pub cents: i64,
    pub formatted: String,
}

impl PriceView {
    pub fn new(amount: Money, config: &ConfigState) -> Self {
        PriceView {
            cents: amount.cents(),
            formatted: config.format_money(amount),
        }
    }
}

/// One priced cart line.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
    pub line_id: LineId,
    pub product_id: String,
    /// `None` when the product left the catalog.
    pub name: Option<String>,
    pub quantity: u32,
    pub selection: Selection,
    pub unit_price: PriceView,
    pub options_price: PriceView,
    pub line_total: PriceView,
    /// "Was" price per unit, only when the product is discounted.
    pub previous_unit_price: Option<PriceView>,
    pub discount_percent: Option<u32>,
    /// Product still exists and is active.
    pub available: bool,
    /// Selection still satisfies the product's option groups.
    pub complete: bool,
}

impl CartLineView {
    pub fn build(line: &CartLine, product: Option<&Product>, config: &ConfigState) -> Self {
        let zero = || PriceView::new(Money::zero(), config);

        let Some(product) = product else {
            return CartLineView {
                line_id: line.id(),
                product_id: line.product_id().to_string(),
                name: None,
                quantity: line.quantity(),
                selection: line.selection().clone(),
                unit_price: zero(),
                options_price: zero(),
                line_total: zero(),
                previous_unit_price: None,
                discount_percent: None,
                available: false,
                complete: false,
            };
        };

        let unit = pricing::total_price(product, line.selection());
        let previous = product
            .previous_price()
            .filter(|_| product.has_discount())
            .map(|base_was| {
                let options = pricing::additional_price_only(product, line.selection());
                PriceView::new(base_was + options, config)
            });

        CartLineView {
            line_id: line.id(),
            product_id: line.product_id().to_string(),
            name: Some(product.name.clone()),
            quantity: line.quantity(),
            selection: line.selection().clone(),
            unit_price: PriceView::new(unit, config),
            options_price: PriceView::new(
                pricing::additional_price_only(product, line.selection()),
                config,
            ),
            line_total: PriceView::new(unit * line.quantity(), config),
            previous_unit_price: previous,
            discount_percent: product.discount_percent(),
            available: product.is_active,
            complete: is_complete(product, line.selection()),
        }
    }
}

/// Cart totals summary.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub line_count: usize,
    pub total_quantity: u32,
    pub total: PriceView,
    pub minimum_order: PriceView,
    pub remaining: PriceView,
    pub meets_minimum: bool,
    /// Progress towards the minimum, 0..=100.
    pub percent: u8,
}

impl CartTotals {
    fn build(cart: &Cart, progress: &OrderProgress, config: &ConfigState) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            total_quantity: cart.total_quantity(),
            total: PriceView::new(progress.total, config),
            minimum_order: PriceView::new(progress.minimum, config),
            remaining: PriceView::new(progress.remaining, config),
            meets_minimum: progress.meets_minimum,
            percent: progress.percent,
        }
    }
}

/// Cart response including lines and totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub lines: Vec<CartLineView>,
    pub totals: CartTotals,
}

impl CartResponse {
    /// Prices a cart against a snapshot.
    pub fn build(cart: &Cart, snapshot: &CatalogSnapshot, config: &ConfigState) -> Self {
        let lines = cart
            .lines()
            .iter()
            .map(|line| CartLineView::build(line, snapshot.get(line.product_id()), config))
            .collect();
        let progress = order_gate::progress(cart, snapshot, config.minimum_order());

        CartResponse {
            lines,
            totals: CartTotals::build(cart, &progress, config),
        }
    }
}

// =============================================================================
// Commands
// =============================================================================

/// Gets the current cart, priced against the current catalog.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  CART                                                    3 items        │
/// ├─────────────────────────────────────────────────────────────────────────┤
/// │  Pizza (Medium, Cheese)      x2              R$ 89,80                   │
/// │  Camiseta  R$ 249,90 → R$ 79,90 (-68%)  x1   R$ 79,90                   │
/// ├─────────────────────────────────────────────────────────────────────────┤
/// │  TOTAL                                       R$ 169,70                  │
/// │  ████████████████████░░░░  Add R$ 30,30 more to check out               │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn get_cart(
    catalog: &CatalogState,
    cart: &CartState,
    config: &ConfigState,
) -> Result<CartResponse, ApiError> {
    debug!("get_cart command");

    let snapshot = catalog.snapshot(config.store_id()).await?;
    Ok(cart.with_cart(|c| CartResponse::build(c, &snapshot, config)))
}

/// Adds one unit of a product with the given selection.
///
/// ## Behavior
/// - Same product and same selection already in cart: quantity + 1
/// - Otherwise: a new line
///
/// ## Rejected When
/// - Product not in this store's catalog (`NOT_FOUND`)
/// - Product inactive (`UNAVAILABLE`)
/// - Selection names unknown groups/options or over-fills a group
/// - Selection incomplete (`INCOMPLETE_SELECTION` with `missingGroups`)
/// - Line at its quantity limit, or cart at its line limit
pub async fn add_to_cart(
    catalog: &CatalogState,
    cart: &CartState,
    config: &ConfigState,
    product_id: String,
    selection: Option<Selection>,
) -> Result<CartResponse, ApiError> {
    let selection = selection.unwrap_or_default();
    debug!(product_id = %product_id, choices = selection.total_chosen(), "add_to_cart command");

    let product = store_product(catalog, config, &product_id).await?;
    if !product.is_active {
        return Err(CoreError::ProductUnavailable(product_id).into());
    }
    check_selection(&product, &selection)?;

    let max_lines = config.max_lines();
    let max_quantity = config.max_line_quantity();

    let line_id = cart.with_cart_mut(|c| {
        let existing = c
            .find_equal(&product.id, &selection)
            .map(CartLine::quantity);

        match existing {
            Some(quantity) if quantity >= max_quantity => Err(CoreError::QuantityTooLarge {
                requested: quantity.saturating_add(1),
                max: max_quantity,
            }),
            None if c.line_count() >= max_lines => Err(CoreError::CartTooLarge { max: max_lines }),
            _ => Ok(c.add(product.id.clone(), selection)),
        }
    })?;

    debug!(product_id = %product_id, line_id = %line_id, "Added to cart");
    cart.persist().await;
    get_cart(catalog, cart, config).await
}

/// Removes one unit from a specific line. An unknown line is a no-op.
pub async fn remove_cart_line(
    catalog: &CatalogState,
    cart: &CartState,
    config: &ConfigState,
    line_id: String,
) -> Result<CartResponse, ApiError> {
    debug!(line_id = %line_id, "remove_cart_line command");

    let line_id: LineId = line_id.parse()?;
    if cart.with_cart_mut(|c| c.remove(line_id)) {
        cart.persist().await;
    } else {
        debug!(line_id = %line_id, "Line not in cart, nothing removed");
    }

    get_cart(catalog, cart, config).await
}

/// Removes one unit of a product from its most recently touched line.
///
/// For surfaces that only know the product, such as a "−" on a catalog
/// card. A product not in the cart is a no-op.
pub async fn remove_any_variant(
    catalog: &CatalogState,
    cart: &CartState,
    config: &ConfigState,
    product_id: String,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, "remove_any_variant command");

    if let Some(line_id) = cart.with_cart_mut(|c| c.remove_any_variant(&product_id)) {
        debug!(line_id = %line_id, "Removed one unit");
        cart.persist().await;
    }

    get_cart(catalog, cart, config).await
}

/// Replaces the selection of a line ("edit options").
///
/// The new selection is validated like an add. Lines are NOT merged
/// afterwards, so this can leave two identical lines in the cart.
pub async fn update_line_selection(
    catalog: &CatalogState,
    cart: &CartState,
    config: &ConfigState,
    line_id: String,
    selection: Selection,
) -> Result<CartResponse, ApiError> {
    debug!(line_id = %line_id, "update_line_selection command");

    let id: LineId = line_id.parse()?;
    let product_id = cart
        .with_cart(|c| c.line(id).map(|line| line.product_id().to_string()))
        .ok_or_else(|| ApiError::not_found("Cart line", &line_id))?;

    let product = store_product(catalog, config, &product_id).await?;
    if !product.is_active {
        return Err(CoreError::ProductUnavailable(product_id).into());
    }
    check_selection(&product, &selection)?;

    // The line may have been removed while the catalog was being read
    if !cart.with_cart_mut(|c| c.set_selection(id, selection)) {
        return Err(ApiError::not_found("Cart line", &line_id));
    }

    cart.persist().await;
    get_cart(catalog, cart, config).await
}

/// Sets the quantity of a line. Zero removes it.
pub async fn update_line_quantity(
    catalog: &CatalogState,
    cart: &CartState,
    config: &ConfigState,
    line_id: String,
    quantity: u32,
) -> Result<CartResponse, ApiError> {
    debug!(line_id = %line_id, quantity = %quantity, "update_line_quantity command");

    let id: LineId = line_id.parse()?;
    if quantity > 0 {
        validate_quantity(quantity, config.max_line_quantity())?;
    }

    if !cart.with_cart_mut(|c| c.set_quantity(id, quantity)) {
        return Err(ApiError::not_found("Cart line", &line_id));
    }

    cart.persist().await;
    get_cart(catalog, cart, config).await
}

/// Clears all lines from the cart.
pub async fn clear_cart(
    catalog: &CatalogState,
    cart: &CartState,
    config: &ConfigState,
) -> Result<CartResponse, ApiError> {
    debug!("clear_cart command");

    cart.with_cart_mut(Cart::clear);
    cart.persist().await;
    get_cart(catalog, cart, config).await
}

// =============================================================================
// Helpers
// =============================================================================

/// Fetches a product of the session's store; other stores read as not found.
async fn store_product(
    catalog: &CatalogState,
    config: &ConfigState,
    product_id: &str,
) -> Result<Product, ApiError> {
    Ok(catalog.product(config.store_id(), product_id).await?)
}

/// Write-time selection check: well-formed first, then complete.
pub(crate) fn check_selection(product: &Product, selection: &Selection) -> Result<(), CoreError> {
    validate_selection(product, selection)?;

    if !is_complete(product, selection) {
        return Err(CoreError::IncompleteSelection {
            product_id: product.id.clone(),
            missing_groups: missing_groups(product, selection),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
