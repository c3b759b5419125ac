//! # Pricing Module
//!
//! Computes what a product costs for a given selection of options.
//!
//! ## Additive Pricing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Pizza (base R$ 0,00, option-priced)                                    │
//! │                                                                         │
//! │  Size (Single, required)     Medium  + R$ 39,90   ◄── chosen           │
//! │  Extras (Multiple, max 3)    Cheese  + R$ 5,00    ◄── chosen           │
//! │                              Bacon   + R$ 7,00    ◄── chosen           │
//! │                              (deleted option)     ◄── stale, ignored   │
//! │                                                                         │
//! │  total = base + Σ chosen additional prices = R$ 51,90                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only additions, no per-combination overrides and no multipliers. The sum
//! is independent of the order options were picked in, which is what lets
//! two line-equal cart lines always share a unit price.

use crate::money::Money;
use crate::types::{Product, Selection};

/// Base price plus every chosen option that still exists in the catalog.
///
/// Group ids the product does not have and option ids their group does not
/// have are skipped, so a selection made before a catalog edit still prices.
///
/// ## Example
/// ```rust
/// use vitrine_core::{pricing, OptionGroup, Product, ProductOption, Selection};
///
/// let product = Product::simple("burger", "Burger", 2500).with_group(
///     OptionGroup::single("size", "Size", true)
///         .with_option(ProductOption::new("a", "Regular", 0))
///         .with_option(ProductOption::new("b", "Double", 500)),
/// );
///
/// let selection = Selection::new().with("size", "b");
/// assert_eq!(pricing::total_price(&product, &selection).cents(), 3000);
/// ```
pub fn total_price(product: &Product, selection: &Selection) -> Money {
    product.base_price() + additional_price_only(product, selection)
}

/// The option surcharge alone, for "+ R$ 12,00 in options" annotations.
pub fn additional_price_only(product: &Product, selection: &Selection) -> Money {
    product
        .option_groups
        .iter()
        .flat_map(|group| {
            selection
                .chosen(&group.id)
                .filter_map(move |option_id| group.option(option_id))
        })
        .map(|option| option.additional_price())
        .sum()
}

/// True iff the product has a standalone price.
///
/// Products without one are option-priced: their price comes entirely from
/// what the customer picks.
#[inline]
pub fn has_base_price(product: &Product) -> bool {
    product.base_price_cents > 0
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OptionGroup, ProductOption};

    fn pizza() -> Product {
        Product::simple("pizza", "Pizza", 0)
            .with_group(
                OptionGroup::single("size", "Size", true)
                    .with_option(ProductOption::new("m", "Medium", 3990))
                    .with_option(ProductOption::new("l", "Large", 4990)),
            )
            .with_group(
                OptionGroup::multiple("extras", "Extras", false, 0, Some(3))
                    .with_option(ProductOption::new("cheese", "Cheese", 500))
                    .with_option(ProductOption::new("bacon", "Bacon", 700)),
            )
    }

    #[test]
    fn test_total_is_base_for_empty_selection() {
        let product = Product::simple("tee", "Tee", 7990).with_previous_price(24990);
        assert_eq!(total_price(&product, &Selection::new()).cents(), 7990);
    }

    #[test]
    fn test_scenario_b_single_group_surcharge() {
        let product = Product::simple("burger", "Burger", 2500).with_group(
            OptionGroup::single("g", "Size", true)
                .with_option(ProductOption::new("A", "A", 0))
                .with_option(ProductOption::new("B", "B", 500)),
        );

        let selection = Selection::new().with("g", "B");
        assert_eq!(total_price(&product, &selection).cents(), 3000);
        assert_eq!(additional_price_only(&product, &selection).cents(), 500);
    }

    #[test]
    fn test_sums_across_groups() {
        let selection = Selection::new()
            .with("size", "m")
            .with("extras", "cheese")
            .with("extras", "bacon");

        assert_eq!(total_price(&pizza(), &selection).cents(), 3990 + 500 + 700);
        assert_eq!(additional_price_only(&pizza(), &selection).cents(), 5190);
    }

    #[test]
    fn test_insertion_order_does_not_matter() {
        let forward = Selection::new()
            .with("size", "l")
            .with("extras", "cheese")
            .with("extras", "bacon");
        let backward = Selection::new()
            .with("extras", "bacon")
            .with("extras", "cheese")
            .with("size", "l");

        assert_eq!(total_price(&pizza(), &forward), total_price(&pizza(), &backward));
    }

    #[test]
    fn test_stale_ids_are_ignored() {
        let selection = Selection::new()
            .with("size", "m")
            .with("size", "deleted-size")
            .with("removed-group", "anything")
            .with("extras", "cheese");

        assert_eq!(total_price(&pizza(), &selection).cents(), 3990 + 500);
    }

    #[test]
    fn test_option_priced_product_with_nothing_chosen_is_free() {
        assert!(!has_base_price(&pizza()));
        assert_eq!(total_price(&pizza(), &Selection::new()), Money::zero());
    }

    #[test]
    fn test_option_id_resolves_only_within_its_group() {
        // "cheese" belongs to extras, not size
        let selection = Selection::new().with("size", "cheese");
        assert_eq!(total_price(&pizza(), &selection), Money::zero());
    }
}
