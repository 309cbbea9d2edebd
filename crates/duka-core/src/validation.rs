//! # Validation Module
//!
//! Input validation for the pricing engine.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (TypeScript)                                        │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Runs BEFORE any cart mutation                                     │
//! │  └── A failed check means the cart is provably untouched               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Remote API (checkout submission)                             │
//! │  └── Authoritative re-validation server-side                           │
//! │                                                                         │
//! │  Defense in depth: multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a requested quantity.
///
/// ## Rules
/// - Must be positive (> 0)
///
/// The update-to-zero removal path bypasses this deliberately; everywhere
/// else a non-positive quantity is a caller bug, not a removal request.
/// The `MAX_ITEM_QUANTITY` ceiling is enforced by the cart itself, against
/// the merged quantity rather than the requested delta.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 1 {
        return Err(ValidationError::InvalidQuantity { got: qty });
    }

    Ok(())
}

/// Validates a unit price in cents.
///
/// ## Rules
/// - Must be non-negative (zero is allowed - free items)
///
/// ## Example
/// ```rust
/// use duka_core::validation::validate_unit_price;
///
/// assert!(validate_unit_price(10_000).is_ok()); // 100.00
/// assert!(validate_unit_price(0).is_ok());      // free item
/// assert!(validate_unit_price(-100).is_err());  // invalid
/// ```
pub fn validate_unit_price(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::InvalidPrice { got: cents });
    }

    Ok(())
}

/// Validates a discount in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 bps (0% to 100% of the unit price)
pub fn validate_discount_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10_000 {
        return Err(ValidationError::InvalidDiscount { got: bps });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
