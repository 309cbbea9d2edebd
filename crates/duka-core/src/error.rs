//! # Error Types
//!
//! Domain-specific error types for duka-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  duka-core errors (this file)                                          │
//! │  ├── CartError        - Engine operation failures                      │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  duka-session errors (separate crate)                                  │
//! │  └── StoreError       - Storage failures + serialized cart errors      │
//! │                                                                         │
//! │  Flow: ValidationError → CartError → StoreError → Frontend             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (SKU, quantities, limits)
//! 3. Errors are enum variants, never String
//! 4. A signaled error means the cart was NOT touched - operations are
//!    all-or-nothing

use thiserror::Error;

// =============================================================================
// Cart Error
// =============================================================================

/// Cart pricing engine errors.
///
/// Every variant means the operation was rejected as a whole: the cart the
/// caller passed in is unchanged. The Presentation Layer translates these
/// into user-visible feedback.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// The product has no stock at all.
    ///
    /// ## When This Occurs
    /// - Adding a product whose `available_stock` is below 1
    ///
    /// The source system dropped the add silently in this case; here the
    /// condition is surfaced so the UI can say why nothing happened.
    #[error("{sku} is out of stock")]
    StockUnavailable { sku: String },

    /// The requested total quantity exceeds available stock.
    ///
    /// ## User Workflow
    /// ```text
    /// Cart already holds 2 × COKE, user adds 3 more
    ///      │
    ///      ▼
    /// Merged quantity 5 > available 3
    ///      │
    ///      ▼
    /// StockExceeded { sku: "COKE", available: 3, requested: 5 }
    ///      │
    ///      ▼
    /// UI shows: "Only 3 COKE in stock" - cart still holds 2
    /// ```
    #[error("Insufficient stock for {sku}: available {available}, requested {requested}")]
    StockExceeded {
        sku: String,
        available: i64,
        requested: i64,
    },

    /// Cart has reached the maximum number of unique line items.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Line quantity exceeds the per-item maximum.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These fire before any business logic runs; a precondition the caller
/// violated, not a business-rule outcome.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Quantity must be positive where a positive is required
    /// (everywhere except the update-to-zero removal path).
    #[error("quantity must be at least 1, got {got}")]
    InvalidQuantity { got: i64 },

    /// Unit price must be non-negative (zero is allowed - free items).
    #[error("unit price must not be negative, got {got}")]
    InvalidPrice { got: i64 },

    /// Discount must be within 0..=10000 bps (0% to 100%).
    #[error("discount must be between 0 and 10000 bps, got {got}")]
    InvalidDiscount { got: u32 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CartError.
pub type CartResult<T> = Result<T, CartError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CartError::StockExceeded {
            sku: "COKE-330".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for COKE-330: available 3, requested 5"
        );

        let err = CartError::StockUnavailable {
            sku: "UNGA-2KG".to_string(),
        };
        assert_eq!(err.to_string(), "UNGA-2KG is out of stock");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::InvalidQuantity { got: 0 };
        assert_eq!(err.to_string(), "quantity must be at least 1, got 0");

        let err = ValidationError::InvalidPrice { got: -100 };
        assert_eq!(err.to_string(), "unit price must not be negative, got -100");
    }

    #[test]
    fn test_validation_converts_to_cart_error() {
        let validation_err = ValidationError::InvalidDiscount { got: 12_000 };
        let cart_err: CartError = validation_err.into();
        assert!(matches!(cart_err, CartError::Validation(_)));
    }
}
