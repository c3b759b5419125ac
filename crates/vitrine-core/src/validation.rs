//! # Validation Module
//!
//! Input validation utilities for Vitrine.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Catalog load (vitrine-catalog)                               │
//! │  ├── validate_product / validate_option_group                          │
//! │  └── Rejects documents that break option-group invariants              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Cart write (storefront commands)                             │
//! │  ├── selection::validate_selection                                     │
//! │  └── validate_quantity                                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Reads (pricing, completeness, order gate)                    │
//! │  └── Never validate: stale data degrades to "ignored" or "zero"        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use vitrine_core::validation::{validate_id, validate_quantity};
//!
//! validate_id("product", "pizza-margherita").unwrap();
//! validate_quantity(5, 999).unwrap();
//! ```

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::types::{OptionGroup, Product, SelectionMode};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a catalog identifier (product, group or option id).
///
/// ## Rules
/// - Must not be empty
/// - At most 64 characters
/// - Letters, digits, hyphens and underscores only
///
/// ## Example
/// ```rust
/// use vitrine_core::validation::validate_id;
///
/// assert!(validate_id("option", "extra_cheese").is_ok());
/// assert!(validate_id("option", "").is_err());
/// assert!(validate_id("option", "has space").is_err());
/// ```
pub fn validate_id(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if id.len() > 64 {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: 64,
        });
    }

    if !id
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a display name (product name, group title, option name).
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.chars().count() > 200 {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: 200,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a cart line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed `max`
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Cart: tap "+" on a line at quantity 999                                │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_quantity(1000, 999) ← THIS FUNCTION                          │
/// │       │                                                                 │
/// │       ├── qty == 0?  → Error: "quantity must be positive"              │
/// │       ├── qty > max? → Error: "quantity must be between 1 and 999"     │
/// │       └── OK → CartStore mutation proceeds                             │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(qty: u32, max: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > max {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: i64::from(max),
        });
    }

    Ok(())
}

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (option-priced products, free options)
///
/// ## Example
/// ```rust
/// use vitrine_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents("price", 7990).is_ok());
/// assert!(validate_price_cents("price", 0).is_ok());
/// assert!(validate_price_cents("price", -100).is_err());
/// ```
pub fn validate_price_cents(field: &str, cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Catalog Validators
// =============================================================================

/// Validates an option group's invariants.
///
/// ## Rules
/// - id and title present
/// - `Multiple`: `min_selections <= max_selections` when a max is set
/// - `Multiple`: a max of zero makes the group unusable
/// - options have unique ids, names and non-negative prices
/// - a required group must offer at least its minimum number of options
pub fn validate_option_group(group: &OptionGroup) -> ValidationResult<()> {
    validate_id("option group id", &group.id)?;
    validate_name("option group title", &group.title)?;

    if let SelectionMode::Multiple {
        min_selections,
        max_selections: Some(max),
    } = group.mode
    {
        if max == 0 {
            return Err(ValidationError::MustBePositive {
                field: format!("max_selections of '{}'", group.id),
            });
        }
        if min_selections > max {
            return Err(ValidationError::OutOfRange {
                field: format!("min_selections of '{}'", group.id),
                min: 0,
                max: i64::from(max),
            });
        }
    }

    let mut seen = HashSet::new();
    for option in &group.options {
        validate_id("option id", &option.id)?;
        validate_name("option name", &option.name)?;
        validate_price_cents("additional_price_cents", option.additional_price_cents)?;

        if !seen.insert(option.id.as_str()) {
            return Err(ValidationError::Duplicate {
                field: format!("option id in group '{}'", group.id),
                value: option.id.clone(),
            });
        }
    }

    let offered = u32::try_from(group.options.len()).unwrap_or(u32::MAX);
    if offered < group.required_minimum() {
        return Err(ValidationError::OutOfRange {
            field: format!("options of required group '{}'", group.id),
            min: i64::from(group.required_minimum()),
            max: i64::from(u32::MAX),
        });
    }

    Ok(())
}

/// Validates a product before it enters a catalog snapshot.
///
/// ## Rules
/// - id and name present
/// - base and previous prices non-negative
/// - group ids unique, every group valid
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_id("product id", &product.id)?;
    validate_name("product name", &product.name)?;
    validate_price_cents("base_price_cents", product.base_price_cents)?;
    if let Some(previous) = product.previous_price_cents {
        validate_price_cents("previous_price_cents", previous)?;
    }

    let mut seen = HashSet::new();
    for group in &product.option_groups {
        validate_option_group(group)?;
        if !seen.insert(group.id.as_str()) {
            return Err(ValidationError::Duplicate {
                field: format!("option group id in product '{}'", product.id),
                value: group.id.clone(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
