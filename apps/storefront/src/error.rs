//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Vitrine                                │
//! │                                                                         │
//! │  Front end                   Rust Backend                               │
//! │  ─────────                   ────────────                               │
//! │                                                                         │
//! │  addToCart('pizza', {})                                                 │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Catalog Error? ─── CatalogError::NotFound ─────────┐           │  │
//! │  │         │                                            │           │  │
//! │  │         ▼                                            ▼           │  │
//! │  │  Incomplete? ─── CoreError::IncompleteSelection ── ApiError ───►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  catch (e) {                                                            │
//! │    // e.code = "INCOMPLETE_SELECTION"                                   │
//! │    // e.details.missingGroups = ["size"]  → highlight the fields        │
//! │  }                                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use serde_json::{json, Value};
use vitrine_catalog::CatalogError;
use vitrine_core::{CoreError, ValidationError};

use crate::config::ConfigError;
use crate::persistence::PersistenceError;

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "INCOMPLETE_SELECTION",
///   "message": "Selection for pizza is incomplete (missing: size)",
///   "details": { "productId": "pizza", "missingGroups": ["size"] }
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,

    /// Structured data the front end can act on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Product exists but is not offered
    Unavailable,

    /// Selection misses required groups
    IncompleteSelection,

    /// Cart limits exceeded or cart empty
    CartError,

    /// Cart total below the store minimum
    BelowMinimum,

    /// Catalog could not be loaded
    CatalogError,

    /// Store configuration is invalid
    ConfigError,

    /// Internal error (500)
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Attaches structured details.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// Creates a cart error.
    pub fn cart(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::CartError, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let message = err.to_string();
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CoreError::ProductUnavailable(id) => ApiError::new(ErrorCode::Unavailable, message)
                .with_details(json!({ "productId": id })),
            CoreError::IncompleteSelection {
                product_id,
                missing_groups,
            } => ApiError::new(ErrorCode::IncompleteSelection, message).with_details(json!({
                "productId": product_id,
                "missingGroups": missing_groups,
            })),
            CoreError::CartTooLarge { max } => {
                ApiError::cart(message).with_details(json!({ "maxLines": max }))
            }
            CoreError::QuantityTooLarge { requested, max } => ApiError::validation(message)
                .with_details(json!({ "requested": requested, "max": max })),
            CoreError::EmptyCart => ApiError::cart(message),
            CoreError::BelowMinimumOrder { remaining } => {
                ApiError::new(ErrorCode::BelowMinimum, message)
                    .with_details(json!({ "remaining": remaining }))
            }
            CoreError::Validation(e) => ApiError::from(e),
        }
    }
}

/// Converts validation errors to API errors.
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts catalog errors to API errors.
impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound { product_id } => ApiError::not_found("Product", &product_id),
            other => {
                // Log the actual error but return a generic message
                tracing::error!(error = %other, "Catalog error");
                ApiError::new(ErrorCode::CatalogError, "Catalog is unavailable")
            }
        }
    }
}

/// Converts configuration errors to API errors.
impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

/// Converts persistence errors to API errors.
impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        tracing::error!(error = %err, "Cart persistence error");
        ApiError::internal("Cart storage failed")
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
