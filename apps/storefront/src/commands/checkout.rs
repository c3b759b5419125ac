//! # Checkout Commands
//!
//! The minimum-order gate and the hand-off to checkout.
//!
//! ## Checkout Gate
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  checkout_status()                                                      │
//! │       │                                                                 │
//! │       ├── cart empty?                  → issue: empty_cart              │
//! │       ├── product gone or inactive?    → issue: product_unavailable     │
//! │       ├── selection incomplete now?    → issue: incomplete_selection    │
//! │       └── total below minimum?         → issue: below_minimum           │
//! │                                                                         │
//! │  can_checkout = no issues                                               │
//! │                                                                         │
//! │  begin_checkout()                                                       │
//! │       ├── first issue → ApiError                                        │
//! │       └── none        → CheckoutSummary (payment happens elsewhere)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A line can become incomplete after it was added: a catalog edit that
//! withdraws the chosen option leaves the line with a stale id, which
//! counts as "not selected".

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;
use vitrine_catalog::CatalogSnapshot;
use vitrine_core::selection::{is_complete, missing_groups};
use vitrine_core::{order_gate, Cart, CoreError, LineId};

use crate::commands::cart::{CartLineView, PriceView};
use crate::error::ApiError;
use crate::state::{CartState, CatalogState, ConfigState};

// =============================================================================
// Response Types
// =============================================================================

/// Something that keeps the cart from checking out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CheckoutIssue {
    EmptyCart,
    ProductUnavailable {
        line_id: LineId,
        product_id: String,
    },
    IncompleteSelection {
        line_id: LineId,
        product_id: String,
        missing_groups: Vec<String>,
    },
    BelowMinimum {
        remaining: PriceView,
    },
}

impl From<CheckoutIssue> for ApiError {
    fn from(issue: CheckoutIssue) -> Self {
        let err = match issue {
            CheckoutIssue::EmptyCart => CoreError::EmptyCart,
            CheckoutIssue::ProductUnavailable { product_id, .. } => {
                CoreError::ProductUnavailable(product_id)
            }
            CheckoutIssue::IncompleteSelection {
                product_id,
                missing_groups,
                ..
            } => CoreError::IncompleteSelection {
                product_id,
                missing_groups,
            },
            CheckoutIssue::BelowMinimum { remaining } => CoreError::BelowMinimumOrder {
                remaining: remaining.formatted,
            },
        };
        ApiError::from(err)
    }
}

/// Whether the cart may proceed, and why not.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutStatus {
    pub can_checkout: bool,
    pub total: PriceView,
    pub minimum_order: PriceView,
    pub remaining: PriceView,
    pub percent: u8,
    pub issues: Vec<CheckoutIssue>,
}

/// What checkout receives once the gate passes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSummary {
    pub order_ref: String,
    pub store_id: String,
    pub session_id: String,
    pub lines: Vec<CartLineView>,
    pub total: PriceView,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Gate
// =============================================================================

/// Evaluates every checkout rule against one snapshot.
pub fn evaluate(cart: &Cart, snapshot: &CatalogSnapshot, config: &ConfigState) -> CheckoutStatus {
    let mut issues = Vec::new();

    if cart.is_empty() {
        issues.push(CheckoutIssue::EmptyCart);
    }

    for line in cart.lines() {
        match snapshot.get(line.product_id()) {
            Some(product) if product.is_active => {
                if !is_complete(product, line.selection()) {
                    issues.push(CheckoutIssue::IncompleteSelection {
                        line_id: line.id(),
                        product_id: product.id.clone(),
                        missing_groups: missing_groups(product, line.selection()),
                    });
                }
            }
            _ => issues.push(CheckoutIssue::ProductUnavailable {
                line_id: line.id(),
                product_id: line.product_id().to_string(),
            }),
        }
    }

    let progress = order_gate::progress(cart, snapshot, config.minimum_order());
    if !progress.meets_minimum {
        issues.push(CheckoutIssue::BelowMinimum {
            remaining: PriceView::new(progress.remaining, config),
        });
    }

    CheckoutStatus {
        can_checkout: issues.is_empty(),
        total: PriceView::new(progress.total, config),
        minimum_order: PriceView::new(progress.minimum, config),
        remaining: PriceView::new(progress.remaining, config),
        percent: progress.percent,
        issues,
    }
}

// =============================================================================
// Commands
// =============================================================================

/// Reports whether the cart can check out, for the checkout button.
pub async fn checkout_status(
    catalog: &CatalogState,
    cart: &CartState,
    config: &ConfigState,
) -> Result<CheckoutStatus, ApiError> {
    debug!("checkout_status command");

    let snapshot = catalog.snapshot(config.store_id()).await?;
    Ok(cart.with_cart(|c| evaluate(c, &snapshot, config)))
}

/// Passes the gate and hands the priced cart to checkout.
///
/// The cart is left untouched; it is cleared once the order is placed,
/// which happens outside this crate.
pub async fn begin_checkout(
    catalog: &CatalogState,
    cart: &CartState,
    config: &ConfigState,
) -> Result<CheckoutSummary, ApiError> {
    debug!("begin_checkout command");

    let snapshot = catalog.snapshot(config.store_id()).await?;
    let (status, lines) = cart.with_cart(|c| {
        let lines = c
            .lines()
            .iter()
            .map(|line| CartLineView::build(line, snapshot.get(line.product_id()), config))
            .collect::<Vec<_>>();
        (evaluate(c, &snapshot, config), lines)
    });

    if let Some(issue) = status.issues.into_iter().next() {
        return Err(issue.into());
    }

    let summary = CheckoutSummary {
        order_ref: Uuid::new_v4().to_string(),
        store_id: config.store_id().to_string(),
        session_id: cart.session_id().to_string(),
        lines,
        total: status.total,
        created_at: Utc::now(),
    };

    info!(
        order_ref = %summary.order_ref,
        total = %summary.total.formatted,
        "Checkout started"
    );
    Ok(summary)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cart::add_to_cart;
    use crate::commands::test_support::session;
    use crate::error::ErrorCode;
    use crate::state::Session;
    use vitrine_core::{OptionGroup, Product, ProductOption, Selection};

    async fn add(s: &Session, product_id: &str, selection: Selection) {
        add_to_cart(&s.catalog, &s.cart, &s.config, product_id.to_string(), Some(selection))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_empty_cart_cannot_check_out() {
        let (s, _) = session(0);

        let status = checkout_status(&s.catalog, &s.cart, &s.config).await.unwrap();
        assert!(!status.can_checkout);
        assert_eq!(status.issues, vec![CheckoutIssue::EmptyCart]);

        let err = begin_checkout(&s.catalog, &s.cart, &s.config).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);
    }

    #[tokio::test]
    async fn test_scenario_c_below_minimum() {
        let (s, _) = session(2000);
        add(&s, "soda", Selection::new()).await;
        add(&s, "soda", Selection::new()).await;

        let status = checkout_status(&s.catalog, &s.cart, &s.config).await.unwrap();
        assert!(!status.can_checkout);
        assert_eq!(status.total.cents, 1600);
        assert_eq!(status.remaining.cents, 400);
        assert!(matches!(
            status.issues.as_slice(),
            [CheckoutIssue::BelowMinimum { remaining }] if remaining.cents == 400
        ));

        let err = begin_checkout(&s.catalog, &s.cart, &s.config).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::BelowMinimum);
        assert_eq!(err.message, "Minimum order not reached: R$ 4,00 remaining");
    }

    #[tokio::test]
    async fn test_minimum_reached() {
        let (s, _) = session(2000);
        for _ in 0..3 {
            add(&s, "soda", Selection::new()).await;
        }

        let status = checkout_status(&s.catalog, &s.cart, &s.config).await.unwrap();
        assert!(status.can_checkout);
        assert_eq!(status.percent, 100);

        let summary = begin_checkout(&s.catalog, &s.cart, &s.config).await.unwrap();
        assert_eq!(summary.total.cents, 2400);
        assert_eq!(summary.store_id, "demo");
        assert_eq!(summary.session_id, "test-session");
        assert_eq!(summary.lines.len(), 1);
        // the cart survives the hand-off
        assert_eq!(s.cart.with_cart(|c| c.quantity_of("soda")), 3);
    }

    #[tokio::test]
    async fn test_withdrawn_option_blocks_checkout() {
        let (s, catalog) = session(0);
        add(&s, "burger", Selection::new().with("g", "B")).await;

        catalog
            .upsert(
                Product::simple("burger", "Burger", 2500)
                    .in_store("demo")
                    .with_group(
                        OptionGroup::single("g", "Size", true)
                            .with_option(ProductOption::new("A", "Regular", 0)),
                    ),
            )
            .await
            .unwrap();

        let status = checkout_status(&s.catalog, &s.cart, &s.config).await.unwrap();
        assert!(matches!(
            status.issues.as_slice(),
            [CheckoutIssue::IncompleteSelection { missing_groups, .. }] if missing_groups == &vec!["g".to_string()]
        ));

        let err = begin_checkout(&s.catalog, &s.cart, &s.config).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::IncompleteSelection);
    }

    #[tokio::test]
    async fn test_deactivated_product_blocks_checkout() {
        let (s, catalog) = session(0);
        add(&s, "tee", Selection::new()).await;

        let mut tee = Product::simple("tee", "Tee", 7990).in_store("demo");
        tee.is_active = false;
        catalog.upsert(tee).await.unwrap();

        let err = begin_checkout(&s.catalog, &s.cart, &s.config).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Unavailable);
    }

    #[test]
    fn test_issue_serialization() {
        let json = serde_json::to_value(CheckoutIssue::EmptyCart).unwrap();
        assert_eq!(json["kind"], "empty_cart");
    }
}
