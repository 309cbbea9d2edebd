//! # Domain Types
//!
//! Core domain types used throughout Duka POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    TaxRate      │   │     TaxMode     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (opaque)    │   │  bps (u32)      │   │  Exclusive      │       │
//! │  │  unit_price     │   │  1600 = 16%     │   │  Inclusive      │       │
//! │  │  discount_bps   │   └─────────────────┘   └─────────────────┘       │
//! │  │  available_stock│                                                    │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  Product is a DESCRIPTOR, not an entity: the remote API owns product   │
//! │  truth. This is the snapshot the backend handed us at add-to-cart      │
//! │  time, including the stock oracle's answer.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000.
/// 1600 bps = 16% (Kenyan VAT, the deployed default).
/// Integer bps keep all rate math exact; no float rate ever enters the
/// engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::from_bps(crate::DEFAULT_TAX_RATE_BPS)
    }
}

// =============================================================================
// Tax Mode
// =============================================================================

/// Which tax convention the totals follow.
///
/// The source system mixed both conventions across parallel cart
/// implementations; here the convention is a single explicit flag on one
/// totals path, never a divergent branch of code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TaxMode {
    /// Prices exclude tax; tax is added on top of the discounted
    /// subtotal (`total = taxable + tax`). The default.
    Exclusive,
    /// Prices already include tax; the pre-tax amount is derived
    /// backward (`pre_tax = taxable / (1 + rate)`, `total = taxable`).
    Inclusive,
}

impl Default for TaxMode {
    fn default() -> Self {
        TaxMode::Exclusive
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product descriptor, as handed to [`Cart::add_item`].
///
/// ## Snapshot Semantics
/// The remote inventory API is the source of truth for products. This
/// struct is the caller's snapshot of one product at the moment of an add
/// operation: current price, current promotional discount, and the stock
/// oracle's answer. The cart freezes `unit_price_cents` and
/// `discount_bps` into the line item; `available_stock` is consulted only
/// at mutation time and never stored.
///
/// [`Cart::add_item`]: crate::cart::Cart::add_item
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Opaque identifier, unique within a cart's line items.
    pub id: String,

    /// Stock Keeping Unit - human-readable business identifier.
    pub sku: String,

    /// Display name shown in the cart panel and on receipts.
    pub name: String,

    /// Barcode (EAN-13, UPC-A, etc.), pass-through metadata.
    pub barcode: Option<String>,

    /// Product image reference, pass-through metadata.
    pub image_ref: Option<String>,

    /// Unit price in cents. Must be non-negative (zero = free item).
    pub unit_price_cents: i64,

    /// Promotional discount in basis points, 0..=10000 (0% to 100%).
    pub discount_bps: u32,

    /// Units currently available, per the inventory backend.
    pub available_stock: i64,
}

impl Product {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
