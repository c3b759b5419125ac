//! # Error Types
//!
//! Domain-specific error types for vitrine-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  vitrine-core errors (this file)                                       │
//! │  ├── CoreError        - Business outcomes surfaced to the customer     │
//! │  └── ValidationError  - Write-time input validation failures           │
//! │                                                                         │
//! │  vitrine-catalog errors (separate crate)                               │
//! │  └── CatalogError     - Catalog Provider failures                      │
//! │                                                                         │
//! │  storefront errors (in app)                                            │
//! │  └── ApiError         - What the front end sees (serialized)           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Front end              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT an Error
//! The pricing and cart operations themselves never fail:
//! - an unparsable price is zero
//! - a stale option id is ignored
//! - removing an absent line is a no-op
//! - an incomplete selection is a `false`, not an `Err`
//!
//! These types exist for the session layer, which turns those outcomes
//! into messages for the customer.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business outcomes that block a customer action.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found in the current catalog snapshot.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Product exists but is no longer offered.
    #[error("Product {0} is not available")]
    ProductUnavailable(String),

    /// The selection does not satisfy the product's option groups.
    ///
    /// ## User Workflow
    /// ```text
    /// Tap "Add to cart" on Pizza
    ///      │
    ///      ▼
    /// is_complete(pizza, {}) == false
    ///      │
    ///      ▼
    /// IncompleteSelection { product_id: "pizza", missing_groups: ["size"] }
    ///      │
    ///      ▼
    /// UI highlights the "Size" group
    /// ```
    #[error("Selection for {product_id} is incomplete (missing: {})", .missing_groups.join(", "))]
    IncompleteSelection {
        product_id: String,
        missing_groups: Vec<String>,
    },

    /// Cart has reached its line limit.
    #[error("Cart cannot have more than {max} lines")]
    CartTooLarge { max: usize },

    /// Line quantity would exceed the limit.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: u32, max: u32 },

    /// Checkout attempted with an empty cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Checkout attempted below the store's minimum order.
    #[error("Minimum order not reached: {remaining} remaining")]
    BelowMinimumOrder { remaining: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised when data is written: a selection entering the cart, a catalog
/// document being loaded. Reads never produce these.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., two options sharing an id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// Selection names a group the product does not have.
    #[error("Product {product_id} has no option group '{group_id}'")]
    UnknownGroup { product_id: String, group_id: String },

    /// Selection names an option the group does not have.
    #[error("Option group '{group_id}' has no option '{option_id}'")]
    UnknownOption { group_id: String, option_id: String },

    /// More options chosen than the group allows.
    #[error("Option group '{group_id}' allows at most {max} choices, got {chosen}")]
    TooManySelections {
        group_id: String,
        max: u32,
        chosen: usize,
    },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::IncompleteSelection {
            product_id: "pizza".to_string(),
            missing_groups: vec!["size".to_string(), "crust".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Selection for pizza is incomplete (missing: size, crust)"
        );

        let err = CoreError::BelowMinimumOrder {
            remaining: "R$ 4,00".to_string(),
        };
        assert_eq!(err.to_string(), "Minimum order not reached: R$ 4,00 remaining");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "id".to_string(),
        };
        assert_eq!(err.to_string(), "id is required");

        let err = ValidationError::TooManySelections {
            group_id: "extras".to_string(),
            max: 2,
            chosen: 3,
        };
        assert_eq!(
            err.to_string(),
            "Option group 'extras' allows at most 2 choices, got 3"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::UnknownOption {
            group_id: "size".to_string(),
            option_id: "xl".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
