//! # duka-core: Pure Pricing Engine for Duka POS
//!
//! This crate is the **heart** of Duka POS. It contains the cart pricing
//! engine as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Duka POS Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Frontend (browser dashboard)                    │   │
//! │  │    Product Grid ──► Cart Panel ──► Totals ──► Checkout          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                duka-session (Cart Store)                        │   │
//! │  │    owns the cart, serializes mutations, persists snapshots      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ duka-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│   │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │   rules   │   │   │
//! │  │   │  TaxRate  │  │ rounding  │  │ LineItem  │  │  checks   │   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, TaxRate, TaxMode)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - The cart: line items, stock guards, totals
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every operation is deterministic - same input = same output
//! 2. **No I/O**: Storage and network access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **All-or-Nothing**: A failed operation leaves the cart exactly as it was
//!
//! ## Example Usage
//!
//! ```rust
//! use duka_core::{Cart, Product, TaxMode, TaxRate, DEFAULT_TAX_RATE_BPS};
//!
//! let product = Product {
//!     id: "p-100".to_string(),
//!     sku: "UNGA-2KG".to_string(),
//!     name: "Maize Flour 2kg".to_string(),
//!     barcode: None,
//!     image_ref: None,
//!     unit_price_cents: 10_000, // 100.00
//!     discount_bps: 1_000,      // 10%
//!     available_stock: 20,
//! };
//!
//! let mut cart = Cart::new();
//! cart.add_item(&product, 2).unwrap();
//!
//! let totals = cart.totals(TaxRate::from_bps(DEFAULT_TAX_RATE_BPS), TaxMode::Exclusive);
//! assert_eq!(totals.subtotal_cents, 20_000); // 200.00
//! assert_eq!(totals.discount_cents, 2_000);  //  20.00
//! assert_eq!(totals.tax_cents, 2_880);       //  28.80
//! assert_eq!(totals.total_cents, 20_880);    // 208.80
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use duka_core::Cart` instead of
// `use duka_core::cart::Cart`

pub use cart::{Cart, CartTotals, LineItem};
pub use error::{CartError, CartResult, ValidationError};
pub use money::Money;
pub use types::{Product, TaxMode, TaxRate};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default tax rate in basis points: 16% VAT.
///
/// ## Why a constant?
/// The rate is a single global value in this design - not configurable per
/// item or per jurisdiction. Callers that need a different rate (or a
/// tax-inclusive convention) pass it explicitly to [`Cart::totals`].
pub const DEFAULT_TAX_RATE_BPS: u32 = 1_600;

/// Maximum unique line items allowed in a single cart.
///
/// ## Business Reason
/// Prevents runaway carts and ensures reasonable transaction sizes.
/// Can be made configurable per-store in future versions.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single line item.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;
