//! # Store Error Type
//!
//! Unified error type for cart store operations.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Duka POS                               │
//! │                                                                         │
//! │  Frontend                    Rust Backend                               │
//! │  ────────                    ────────────                               │
//! │                                                                         │
//! │  session.add(product, qty)                                              │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Engine rejects? ── CartError::StockExceeded ──┐                 │  │
//! │  │         │                                      ▼                 │  │
//! │  │  Storage fails? ─── StoreError::Storage ──── StoreError ────────►│  │
//! │  │         │                                                        │  │
//! │  │  Success ───────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  catch (e) {                                                            │
//! │    // e.code = "INSUFFICIENT_STOCK"                                     │
//! │    // e.message = "Insufficient stock for COKE: available 3, ..."       │
//! │  }                                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use thiserror::Error;

use duka_core::CartError;

// =============================================================================
// Store Error
// =============================================================================

/// Errors surfaced by the cart store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The pricing engine rejected the operation; the cart is unchanged.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// The storage collaborator failed to load/save/clear.
    #[error("Cart storage failed: {message}")]
    Storage { message: String },

    /// A persisted cart document could not be (de)serialized.
    #[error("Cart document is corrupt: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for Results with StoreError.
pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    /// Creates a storage failure with context.
    pub fn storage(message: impl Into<String>) -> Self {
        StoreError::Storage {
            message: message.into(),
        }
    }

    /// The machine-readable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            StoreError::Cart(CartError::StockUnavailable { .. })
            | StoreError::Cart(CartError::StockExceeded { .. }) => ErrorCode::InsufficientStock,
            StoreError::Cart(CartError::Validation(_)) => ErrorCode::ValidationError,
            StoreError::Cart(_) => ErrorCode::CartError,
            StoreError::Storage { .. } => ErrorCode::StorageError,
            StoreError::Serialization(_) => ErrorCode::Internal,
        }
    }

    /// The `{code, message}` shape the frontend receives.
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.code(),
            message: self.to_string(),
        }
    }
}

// =============================================================================
// Wire Shape
// =============================================================================

/// Error codes for frontend responses.
///
/// ## Usage in Frontend
/// ```typescript
/// try {
///   await cart.add(product, qty);
/// } catch (e) {
///   switch (e.code) {
///     case 'INSUFFICIENT_STOCK':
///       toast(`Only ${available} in stock`);
///       break;
///     case 'VALIDATION_ERROR':
///       highlightQuantityField(e.message);
///       break;
///     default:
///       toast('An error occurred');
///   }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input validation failed (400)
    ValidationError,

    /// Stock guard rejected the quantity
    InsufficientStock,

    /// Other cart rule violation (cart size, quantity ceiling)
    CartError,

    /// The persistence collaborator failed (500)
    StorageError,

    /// Internal error (500)
    Internal,
}

/// What the frontend receives when a store call fails.
///
/// ```json
/// {
///   "code": "INSUFFICIENT_STOCK",
///   "message": "Insufficient stock for COKE-330: available 3, requested 5"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_errors_map_to_insufficient_stock() {
        let err = StoreError::from(CartError::StockExceeded {
            sku: "COKE-330".to_string(),
            available: 3,
            requested: 5,
        });
        assert_eq!(err.code(), ErrorCode::InsufficientStock);

        let err = StoreError::from(CartError::StockUnavailable {
            sku: "COKE-330".to_string(),
        });
        assert_eq!(err.code(), ErrorCode::InsufficientStock);
    }

    #[test]
    fn test_validation_errors_map_to_validation_code() {
        let err = StoreError::from(CartError::Validation(
            duka_core::ValidationError::InvalidQuantity { got: 0 },
        ));
        assert_eq!(err.code(), ErrorCode::ValidationError);
    }

    #[test]
    fn test_response_serialization() {
        let response = StoreError::storage("backend unreachable").to_response();
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["code"], "STORAGE_ERROR");
        assert_eq!(json["message"], "Cart storage failed: backend unreachable");
    }
}
