//! # Domain Types
//!
//! Catalog types read from the Catalog Provider and the customer's
//! selection of options.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │  OptionGroup    │   │ ProductOption   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │──►│  id             │──►│  id             │       │
//! │  │  base_price     │   │  mode           │   │  name           │       │
//! │  │  previous_price │   │  required       │   │  additional_    │       │
//! │  │  option_groups  │   │  options        │   │    price        │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────────────────────────────┐    │
//! │  │ SelectionMode   │   │  Selection                               │    │
//! │  │  Single         │   │  group id ──► { option id, ... }         │    │
//! │  │  Multiple{min,  │   │  (unordered, empty groups insignificant) │    │
//! │  │           max}  │   └──────────────────────────────────────────┘    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Derived, Never Stored
//! `has_discount` is computed from `base_price_cents` and
//! `previous_price_cents` every time. There is no flag to drift out of sync.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product Option
// =============================================================================

/// One choosable option inside an option group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductOption {
    /// Unique within the owning group.
    pub id: String,

    /// Display name ("Large", "Extra cheese").
    pub name: String,

    /// Price added to the product when chosen, in cents (>= 0).
    #[serde(default)]
    pub additional_price_cents: i64,
}

impl ProductOption {
    /// Creates an option.
    pub fn new(id: impl Into<String>, name: impl Into<String>, additional_price_cents: i64) -> Self {
        ProductOption {
            id: id.into(),
            name: name.into(),
            additional_price_cents,
        }
    }

    /// Returns the additional price as Money.
    #[inline]
    pub fn additional_price(&self) -> Money {
        Money::from_cents(self.additional_price_cents)
    }
}

// =============================================================================
// Selection Mode
// =============================================================================

/// How many options of a group a customer may choose.
///
/// ## Bounds by Construction
/// ```text
/// Single                      → min = 1, max = 1 (no fields to get wrong)
/// Multiple { min, max: None } → at least `min`, unbounded
/// Multiple { min, max: n }    → between `min` and `n`
/// ```
/// The lower bound is only enforced when the group is `required`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectionMode {
    /// Pick exactly one.
    #[default]
    Single,

    /// Pick several.
    Multiple {
        #[serde(default)]
        min_selections: u32,
        #[serde(default)]
        max_selections: Option<u32>,
    },
}

impl SelectionMode {
    /// Lower bound on chosen options.
    pub const fn min_selections(&self) -> u32 {
        match self {
            SelectionMode::Single => 1,
            SelectionMode::Multiple { min_selections, .. } => *min_selections,
        }
    }

    /// Upper bound on chosen options, if any.
    pub const fn max_selections(&self) -> Option<u32> {
        match self {
            SelectionMode::Single => Some(1),
            SelectionMode::Multiple { max_selections, .. } => *max_selections,
        }
    }
}

// =============================================================================
// Option Group
// =============================================================================

/// A named set of options ("Size", "Toppings").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OptionGroup {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub mode: SelectionMode,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub options: Vec<ProductOption>,
}

impl OptionGroup {
    /// Creates a pick-one group.
    pub fn single(id: impl Into<String>, title: impl Into<String>, required: bool) -> Self {
        OptionGroup {
            id: id.into(),
            title: title.into(),
            mode: SelectionMode::Single,
            required,
            options: Vec::new(),
        }
    }

    /// Creates a pick-many group.
    pub fn multiple(
        id: impl Into<String>,
        title: impl Into<String>,
        required: bool,
        min_selections: u32,
        max_selections: Option<u32>,
    ) -> Self {
        OptionGroup {
            id: id.into(),
            title: title.into(),
            mode: SelectionMode::Multiple {
                min_selections,
                max_selections,
            },
            required,
            options: Vec::new(),
        }
    }

    /// Appends an option (builder style).
    pub fn with_option(mut self, option: ProductOption) -> Self {
        self.options.push(option);
        self
    }

    /// Finds an option by id.
    pub fn option(&self, option_id: &str) -> Option<&ProductOption> {
        self.options.iter().find(|o| o.id == option_id)
    }

    /// Minimum chosen options this group demands.
    ///
    /// Optional groups demand nothing. A required group demands its mode's
    /// minimum: one for `Single`, `min_selections` for `Multiple` (which may
    /// be zero).
    pub fn required_minimum(&self) -> u32 {
        if self.required {
            self.mode.min_selections()
        } else {
            0
        }
    }

    /// Number of selected ids that still resolve to an option of this group.
    pub fn chosen_count(&self, selection: &Selection) -> u32 {
        let count = selection
            .chosen(&self.id)
            .filter(|id| self.option(id).is_some())
            .count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product as served by the Catalog Provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique identifier.
    pub id: String,

    /// Store (tenant) this product belongs to.
    #[serde(default)]
    pub store_id: String,

    /// Display name.
    pub name: String,

    /// Standalone price in cents. Zero means option-priced.
    #[serde(default)]
    pub base_price_cents: i64,

    /// "Was" price in cents, shown struck through when higher.
    #[serde(default)]
    pub previous_price_cents: Option<i64>,

    /// Customization groups, in display order.
    #[serde(default)]
    pub option_groups: Vec<OptionGroup>,

    /// Inactive products stay in carts but cannot be added again.
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl Product {
    /// Creates an active product with no option groups.
    pub fn simple(id: impl Into<String>, name: impl Into<String>, base_price_cents: i64) -> Self {
        Product {
            id: id.into(),
            store_id: String::new(),
            name: name.into(),
            base_price_cents,
            previous_price_cents: None,
            option_groups: Vec::new(),
            is_active: true,
        }
    }

    /// Sets the previous ("was") price (builder style).
    pub fn with_previous_price(mut self, previous_price_cents: i64) -> Self {
        self.previous_price_cents = Some(previous_price_cents);
        self
    }

    /// Appends an option group (builder style).
    pub fn with_group(mut self, group: OptionGroup) -> Self {
        self.option_groups.push(group);
        self
    }

    /// Sets the owning store (builder style).
    pub fn in_store(mut self, store_id: impl Into<String>) -> Self {
        self.store_id = store_id.into();
        self
    }

    /// Returns the base price as Money.
    #[inline]
    pub fn base_price(&self) -> Money {
        Money::from_cents(self.base_price_cents)
    }

    /// Returns the previous price as Money, if any.
    #[inline]
    pub fn previous_price(&self) -> Option<Money> {
        self.previous_price_cents.map(Money::from_cents)
    }

    /// Finds an option group by id.
    pub fn group(&self, group_id: &str) -> Option<&OptionGroup> {
        self.option_groups.iter().find(|g| g.id == group_id)
    }

    /// True iff the previous price strictly exceeds the base price and
    /// both are positive.
    ///
    /// ## Example
    /// ```rust
    /// use vitrine_core::Product;
    ///
    /// assert!(Product::simple("p", "Tee", 7990).with_previous_price(24990).has_discount());
    /// assert!(!Product::simple("p", "Tee", 7990).with_previous_price(7990).has_discount());
    /// assert!(!Product::simple("p", "Tee", 7990).has_discount());
    /// ```
    pub fn has_discount(&self) -> bool {
        match self.previous_price_cents {
            Some(previous) => self.base_price_cents > 0 && previous > self.base_price_cents,
            None => false,
        }
    }

    /// Whole percentage off for a discount badge, rounded half up.
    ///
    /// `None` whenever [`has_discount`](Self::has_discount) is false, so the
    /// badge and the struck-through price always agree.
    pub fn discount_percent(&self) -> Option<u32> {
        if !self.has_discount() {
            return None;
        }
        let previous = i128::from(self.previous_price_cents?);
        let saved = previous - i128::from(self.base_price_cents);
        let percent = (saved * 100 + previous / 2) / previous;
        u32::try_from(percent).ok()
    }
}

// =============================================================================
// Selection
// =============================================================================

/// The options a customer picked for one product instance.
///
/// ## Equality
/// Two selections are equal when they choose the same option ids in the same
/// groups. Insertion order never matters and a group with nothing chosen is
/// the same as an absent group:
/// ```rust
/// use vitrine_core::Selection;
///
/// let a = Selection::new().with("size", "L").with("extras", "cheese").with("extras", "bacon");
/// let mut b = Selection::new().with("extras", "bacon").with("extras", "cheese").with("size", "L");
/// b.set_group("drinks", Vec::<String>::new());
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Selection(BTreeMap<String, BTreeSet<String>>);

impl Selection {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Selection(BTreeMap::new())
    }

    /// Adds a choice (builder style).
    pub fn with(mut self, group_id: impl Into<String>, option_id: impl Into<String>) -> Self {
        self.select(group_id, option_id);
        self
    }

    /// Adds a choice to a group.
    pub fn select(&mut self, group_id: impl Into<String>, option_id: impl Into<String>) {
        self.0
            .entry(group_id.into())
            .or_default()
            .insert(option_id.into());
    }

    /// Removes a choice; the group disappears once empty.
    pub fn deselect(&mut self, group_id: &str, option_id: &str) {
        if let Some(chosen) = self.0.get_mut(group_id) {
            chosen.remove(option_id);
            if chosen.is_empty() {
                self.0.remove(group_id);
            }
        }
    }

    /// Replaces everything chosen in a group.
    pub fn set_group<I, S>(&mut self, group_id: impl Into<String>, option_ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let chosen: BTreeSet<String> = option_ids.into_iter().map(Into::into).collect();
        let group_id = group_id.into();
        if chosen.is_empty() {
            self.0.remove(&group_id);
        } else {
            self.0.insert(group_id, chosen);
        }
    }

    /// Option ids chosen in a group (sorted).
    pub fn chosen<'a>(&'a self, group_id: &str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .get(group_id)
            .into_iter()
            .flat_map(|chosen| chosen.iter().map(String::as_str))
    }

    /// Number of ids chosen in a group, resolvable or not.
    pub fn count(&self, group_id: &str) -> usize {
        self.0.get(group_id).map_or(0, BTreeSet::len)
    }

    /// Whether an option is chosen.
    pub fn contains(&self, group_id: &str, option_id: &str) -> bool {
        self.0
            .get(group_id)
            .is_some_and(|chosen| chosen.contains(option_id))
    }

    /// Group ids with at least one choice.
    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|(_, chosen)| !chosen.is_empty())
            .map(|(id, _)| id.as_str())
    }

    /// True when nothing is chosen anywhere.
    pub fn is_empty(&self) -> bool {
        self.0.values().all(BTreeSet::is_empty)
    }

    /// Total ids chosen across groups.
    pub fn total_chosen(&self) -> usize {
        self.0.values().map(BTreeSet::len).sum()
    }
}

impl PartialEq for Selection {
    fn eq(&self, other: &Self) -> bool {
        let mine = self.0.iter().filter(|(_, chosen)| !chosen.is_empty());
        let theirs = other.0.iter().filter(|(_, chosen)| !chosen.is_empty());
        mine.eq(theirs)
    }
}

impl Eq for Selection {}

impl<G, O> FromIterator<(G, O)> for Selection
where
    G: Into<String>,
    O: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (G, O)>>(iter: T) -> Self {
        let mut selection = Selection::new();
        for (group_id, option_id) in iter {
            selection.select(group_id, option_id);
        }
        selection
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_discount_scenario_a() {
        let product = Product::simple("p1", "Tee", 7990).with_previous_price(24990);
        assert!(product.has_discount());
        assert_eq!(product.discount_percent(), Some(68));
    }

    #[test]
    fn test_no_discount_when_previous_missing_or_not_higher() {
        let base = Product::simple("p1", "Tee", 7990);
        assert!(!base.has_discount());
        assert!(!base.clone().with_previous_price(7990).has_discount());
        assert!(!base.clone().with_previous_price(5000).has_discount());
        assert!(!base.with_previous_price(0).has_discount());
        assert_eq!(Product::simple("p1", "Tee", 7990).discount_percent(), None);
    }

    #[test]
    fn test_no_discount_for_option_priced_product() {
        let product = Product::simple("p1", "Pizza", 0).with_previous_price(3000);
        assert!(!product.has_discount());
        assert_eq!(product.discount_percent(), None);
    }

    #[test]
    fn test_selection_mode_bounds() {
        assert_eq!(SelectionMode::default(), SelectionMode::Single);
        assert_eq!(SelectionMode::Single.min_selections(), 1);
        assert_eq!(SelectionMode::Single.max_selections(), Some(1));

        let multi = SelectionMode::Multiple {
            min_selections: 2,
            max_selections: None,
        };
        assert_eq!(multi.min_selections(), 2);
        assert_eq!(multi.max_selections(), None);
    }

    #[test]
    fn test_required_minimum() {
        assert_eq!(OptionGroup::single("g", "Size", true).required_minimum(), 1);
        assert_eq!(OptionGroup::single("g", "Size", false).required_minimum(), 0);
        assert_eq!(OptionGroup::multiple("g", "Extras", true, 0, None).required_minimum(), 0);
        assert_eq!(OptionGroup::multiple("g", "Extras", true, 3, Some(5)).required_minimum(), 3);
        assert_eq!(OptionGroup::multiple("g", "Extras", false, 3, Some(5)).required_minimum(), 0);
    }

    #[test]
    fn test_chosen_count_ignores_stale_ids() {
        let group = OptionGroup::multiple("extras", "Extras", false, 0, None)
            .with_option(ProductOption::new("cheese", "Cheese", 300));
        let selection = Selection::new().with("extras", "cheese").with("extras", "deleted");

        assert_eq!(selection.count("extras"), 2);
        assert_eq!(group.chosen_count(&selection), 1);
    }

    #[test]
    fn test_selection_equality_ignores_order_and_empty_groups() {
        let a = Selection::new().with("size", "L").with("extras", "a").with("extras", "b");
        let mut b = Selection::new().with("extras", "b").with("size", "L").with("extras", "a");
        b.set_group("drinks", Vec::<String>::new());
        assert_eq!(a, b);

        let c = Selection::new().with("size", "M");
        assert_ne!(a, c);
    }

    #[test]
    fn test_selection_deselect_drops_empty_group() {
        let mut selection = Selection::new().with("size", "L");
        selection.deselect("size", "L");
        assert!(selection.is_empty());
        assert_eq!(selection.groups().count(), 0);
        assert_eq!(selection, Selection::new());
    }

    #[test]
    fn test_selection_deserialized_empty_group_is_insignificant() {
        let parsed: Selection = serde_json::from_str(r#"{"size":["L"],"extras":[]}"#).unwrap();
        assert_eq!(parsed, Selection::new().with("size", "L"));
        assert_eq!(parsed.groups().collect::<Vec<_>>(), vec!["size"]);
    }

    #[test]
    fn test_selection_from_iter() {
        let selection: Selection = [("size", "L"), ("extras", "cheese")].into_iter().collect();
        assert!(selection.contains("size", "L"));
        assert!(selection.contains("extras", "cheese"));
        assert_eq!(selection.total_chosen(), 2);
    }

    #[test]
    fn test_product_json_shape() {
        let json = r#"{
            "id": "pizza",
            "name": "Pizza",
            "base_price_cents": 0,
            "option_groups": [
                {
                    "id": "size",
                    "title": "Size",
                    "mode": { "kind": "single" },
                    "required": true,
                    "options": [{ "id": "m", "name": "Medium", "additional_price_cents": 3990 }]
                },
                {
                    "id": "extras",
                    "title": "Extras",
                    "mode": { "kind": "multiple", "min_selections": 0, "max_selections": 3 },
                    "options": []
                }
            ]
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.is_active);
        assert_eq!(product.option_groups.len(), 2);
        assert_eq!(product.option_groups[0].mode, SelectionMode::Single);
        assert_eq!(product.option_groups[1].mode.max_selections(), Some(3));
        assert!(!product.option_groups[1].required);
    }
}
