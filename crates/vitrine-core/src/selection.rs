//! # Selection Module
//!
//! Decides whether a customer's selection satisfies a product's option
//! groups.
//!
//! ## Two Questions, Two Functions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  "Can this be added to the cart yet?"      is_complete / missing_groups │
//! │   ─ pure, total, returns bool / group ids                              │
//! │   ─ stale option ids count as "not selected"                           │
//! │   ─ drives the disabled "Add" button and field highlighting            │
//! │                                                                         │
//! │  "Is this selection well-formed?"          validate_selection           │
//! │   ─ write-time check before a selection enters the cart                │
//! │   ─ rejects unknown groups/options and over-full groups                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Completeness Rules
//! 1. Option-priced product (no base price): at least one known option must
//!    be chosen somewhere, otherwise its price would be zero.
//! 2. Every required group needs at least its minimum (Single: one).
//! 3. Any group with an upper bound must not exceed it.
//! 4. No groups at all: complete iff the product has a base price.

use crate::error::ValidationError;
use crate::pricing::has_base_price;
use crate::types::{Product, Selection};
use crate::validation::ValidationResult;

/// True iff the selection can be added to the cart.
///
/// ## Example
/// ```rust
/// use vitrine_core::{selection, OptionGroup, Product, ProductOption, Selection};
///
/// let product = Product::simple("burger", "Burger", 2500).with_group(
///     OptionGroup::single("size", "Size", true)
///         .with_option(ProductOption::new("a", "Regular", 0)),
/// );
///
/// assert!(!selection::is_complete(&product, &Selection::new()));
/// assert!(selection::is_complete(&product, &Selection::new().with("size", "a")));
/// ```
pub fn is_complete(product: &Product, selection: &Selection) -> bool {
    if !has_base_price(product) && known_choices(product, selection) == 0 {
        return false;
    }

    product.option_groups.iter().all(|group| {
        let chosen = group.chosen_count(selection);
        let within_max = group
            .mode
            .max_selections()
            .is_none_or(|max| chosen <= max);
        chosen >= group.required_minimum() && within_max
    })
}

/// Required groups whose minimum is not met, in catalog order.
///
/// Used for field-level highlighting. An option-priced product with nothing
/// chosen and no required groups is incomplete yet reports no groups here;
/// callers should still consult [`is_complete`].
pub fn missing_groups(product: &Product, selection: &Selection) -> Vec<String> {
    product
        .option_groups
        .iter()
        .filter(|group| group.chosen_count(selection) < group.required_minimum())
        .map(|group| group.id.clone())
        .collect()
}

/// Write-time check that every chosen id exists and no group is over-full.
///
/// ## Rules
/// - every group id must belong to the product
/// - every option id must belong to its group
/// - a group must not exceed its maximum (Single: one)
///
/// Completeness is NOT checked here; see [`is_complete`].
pub fn validate_selection(product: &Product, selection: &Selection) -> ValidationResult<()> {
    for group_id in selection.groups() {
        let group = product
            .group(group_id)
            .ok_or_else(|| ValidationError::UnknownGroup {
                product_id: product.id.clone(),
                group_id: group_id.to_string(),
            })?;

        if let Some(unknown) = selection
            .chosen(group_id)
            .find(|option_id| group.option(option_id).is_none())
        {
            return Err(ValidationError::UnknownOption {
                group_id: group_id.to_string(),
                option_id: unknown.to_string(),
            });
        }

        let chosen = selection.count(group_id);
        if let Some(max) = group.mode.max_selections() {
            if chosen > max as usize {
                return Err(ValidationError::TooManySelections {
                    group_id: group_id.to_string(),
                    max,
                    chosen,
                });
            }
        }
    }

    Ok(())
}

fn known_choices(product: &Product, selection: &Selection) -> u32 {
    product
        .option_groups
        .iter()
        .map(|group| group.chosen_count(selection))
        .sum()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OptionGroup, ProductOption};

    fn burger() -> Product {
        Product::simple("burger", "Burger", 2500).with_group(
            OptionGroup::single("g", "Size", true)
                .with_option(ProductOption::new("A", "A", 0))
                .with_option(ProductOption::new("B", "B", 500)),
        )
    }

    fn pizza() -> Product {
        Product::simple("pizza", "Pizza", 0)
            .with_group(
                OptionGroup::single("size", "Size", false)
                    .with_option(ProductOption::new("m", "Medium", 3990)),
            )
            .with_group(
                OptionGroup::multiple("extras", "Extras", false, 0, Some(2))
                    .with_option(ProductOption::new("cheese", "Cheese", 500))
                    .with_option(ProductOption::new("bacon", "Bacon", 700))
                    .with_option(ProductOption::new("egg", "Egg", 300)),
            )
    }

    #[test]
    fn test_scenario_b_required_single_group() {
        let product = burger();
        assert!(is_complete(&product, &Selection::new().with("g", "B")));
        assert!(!is_complete(&product, &Selection::new()));
        assert_eq!(missing_groups(&product, &Selection::new()), vec!["g".to_string()]);
        assert!(missing_groups(&product, &Selection::new().with("g", "A")).is_empty());
    }

    #[test]
    fn test_option_priced_product_needs_a_choice() {
        let product = pizza();
        assert!(!is_complete(&product, &Selection::new()));
        assert!(missing_groups(&product, &Selection::new()).is_empty());

        assert!(is_complete(&product, &Selection::new().with("extras", "egg")));
        assert!(is_complete(&product, &Selection::new().with("size", "m")));
    }

    #[test]
    fn test_option_priced_product_with_only_stale_choice_is_incomplete() {
        let product = pizza();
        let selection = Selection::new().with("extras", "deleted");
        assert!(!is_complete(&product, &selection));
    }

    #[test]
    fn test_product_without_groups() {
        assert!(is_complete(&Product::simple("tee", "Tee", 7990), &Selection::new()));
        assert!(!is_complete(&Product::simple("free", "Free", 0), &Selection::new()));
    }

    #[test]
    fn test_optional_group_upper_bound_still_applies() {
        let product = pizza();
        let two = Selection::new().with("extras", "cheese").with("extras", "bacon");
        let three = two.clone().with("extras", "egg");

        assert!(is_complete(&product, &two));
        assert!(!is_complete(&product, &three));
    }

    #[test]
    fn test_required_multiple_minimum() {
        let product = Product::simple("bowl", "Bowl", 1500).with_group(
            OptionGroup::multiple("base", "Base", true, 2, Some(3))
                .with_option(ProductOption::new("rice", "Rice", 0))
                .with_option(ProductOption::new("beans", "Beans", 0))
                .with_option(ProductOption::new("salad", "Salad", 0)),
        );

        let one = Selection::new().with("base", "rice");
        let two = one.clone().with("base", "beans");
        assert!(!is_complete(&product, &one));
        assert_eq!(missing_groups(&product, &one), vec!["base".to_string()]);
        assert!(is_complete(&product, &two));
    }

    #[test]
    fn test_required_group_with_zero_minimum() {
        let product = Product::simple("bowl", "Bowl", 1500).with_group(
            OptionGroup::multiple("extras", "Extras", true, 0, Some(3))
                .with_option(ProductOption::new("corn", "Corn", 200))
                .with_option(ProductOption::new("egg", "Egg", 300)),
        );

        assert!(is_complete(&product, &Selection::new()));
        assert!(missing_groups(&product, &Selection::new()).is_empty());
        assert!(is_complete(&product, &Selection::new().with("extras", "egg")));
    }

    #[test]
    fn test_stale_option_counts_as_not_selected() {
        let product = burger();
        let selection = Selection::new().with("g", "removed");
        assert!(!is_complete(&product, &selection));
        assert_eq!(missing_groups(&product, &selection), vec!["g".to_string()]);
    }

    #[test]
    fn test_validate_selection_accepts_known_ids() {
        let selection = Selection::new().with("size", "m").with("extras", "cheese");
        assert!(validate_selection(&pizza(), &selection).is_ok());
        assert!(validate_selection(&pizza(), &Selection::new()).is_ok());
    }

    #[test]
    fn test_validate_selection_rejects_unknown_ids() {
        let unknown_group = Selection::new().with("drinks", "cola");
        assert!(matches!(
            validate_selection(&pizza(), &unknown_group),
            Err(ValidationError::UnknownGroup { .. })
        ));

        let unknown_option = Selection::new().with("size", "xl");
        assert!(matches!(
            validate_selection(&pizza(), &unknown_option),
            Err(ValidationError::UnknownOption { .. })
        ));
    }

    #[test]
    fn test_validate_selection_rejects_overfull_groups() {
        let two_sizes = Selection::new().with("g", "A").with("g", "B");
        assert!(matches!(
            validate_selection(&burger(), &two_sizes),
            Err(ValidationError::TooManySelections { max: 1, chosen: 2, .. })
        ));
    }
}
