//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A cart that sums f64 line totals drifts by fractions of a cent and    │
//! │  the drift surfaces as off-by-one totals in golden-value tests.        │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Every derived amount (discount, tax, total) is computed and         │
//! │    rounded to whole cents at its own derivation point. "Rounded to     │
//! │    2 decimal places" is not a formatting step - it is the              │
//! │    representation.                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Currency Neutrality
//! `Money` carries no currency. The deployed system prices in Kenyan
//! Shillings, but nothing here depends on that; the UI owns symbols and
//! localization.
//!
//! ## Usage
//! ```rust
//! use duka_core::money::Money;
//!
//! let price = Money::from_cents(10_000); // 100.00
//!
//! // 10% of the price, rounded half away from zero
//! let discount = price.percentage_of(1_000);
//! assert_eq!(discount.cents(), 1_000);
//!
//! // NEVER construct from floats - no such method exists.
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for refunds and corrections
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Why Cents?
    /// Using the smallest unit eliminates all floating-point concerns.
    /// The engine, the persisted cart, and the API all use cents.
    /// Only the UI converts to major units for display.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// ## Example
    /// ```rust
    /// use duka_core::money::Money;
    ///
    /// let price = Money::from_major_minor(100, 50); // 100.50
    /// assert_eq!(price.cents(), 10_050);
    ///
    /// let refund = Money::from_major_minor(-5, 50); // -5.50
    /// assert_eq!(refund.cents(), -550);
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative:
    /// `from_major_minor(-5, 50)` is -5.50, not -4.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major-unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor-unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Takes a basis-point fraction of this amount, rounded half away
    /// from zero.
    ///
    /// This single function is the rounding authority for the whole
    /// engine: per-unit discounts and tax amounts both go through it, so
    /// every derived figure is independently rounded to whole cents at
    /// the point it is computed.
    ///
    /// ## Rounding Rule
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  ROUND HALF AWAY FROM ZERO                                          │
    /// │                                                                     │
    /// │    12.345 → 12.35      -12.345 → -12.35                             │
    /// │    0.5 cents of remainder always moves AWAY from zero, so a        │
    /// │    positive charge and its negative correction round to exact      │
    /// │    mirror values and cancel to zero.                                │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// ## Implementation
    /// Integer math on the absolute value with the sign restored:
    /// `(|cents| * bps + 5000) / 10000`, widened to i128 so large carts
    /// cannot overflow.
    ///
    /// ## Example
    /// ```rust
    /// use duka_core::money::Money;
    ///
    /// let price = Money::from_cents(5_000);          // 50.00
    /// assert_eq!(price.percentage_of(2_000).cents(), 1_000); // 20% = 10.00
    /// ```
    pub fn percentage_of(&self, bps: u32) -> Money {
        let magnitude = (self.0.unsigned_abs() as u128 * bps as u128 + 5_000) / 10_000;
        Money::from_cents(self.0.signum() * magnitude as i64)
    }

    /// Calculates the tax charged on top of this (tax-exclusive) amount.
    ///
    /// ## Example
    /// ```rust
    /// use duka_core::money::Money;
    /// use duka_core::types::TaxRate;
    ///
    /// let taxable = Money::from_cents(18_000);      // 180.00
    /// let tax = taxable.tax_on(TaxRate::from_bps(1_600)); // 16%
    /// assert_eq!(tax.cents(), 2_880);               // 28.80
    /// ```
    #[inline]
    pub fn tax_on(&self, rate: TaxRate) -> Money {
        self.percentage_of(rate.bps())
    }

    /// Derives the pre-tax portion of a tax-inclusive amount.
    ///
    /// Used by the tax-inclusive convention, where the quoted amount
    /// already contains tax: `pre_tax = amount / (1 + rate)`, rounded
    /// half away from zero. The tax is then `amount - pre_tax`, so the
    /// two parts always reconcile exactly.
    pub fn pre_tax_portion(&self, rate: TaxRate) -> Money {
        let divisor = 10_000u128 + rate.bps() as u128;
        let magnitude = (self.0.unsigned_abs() as u128 * 10_000 + divisor / 2) / divisor;
        Money::from_cents(self.0.signum() * magnitude as i64)
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use duka_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(5_000); // 50.00
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 15_000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money as `major.minor`.
///
/// ## Note
/// This is for debugging and logs. The UI owns currency symbols and
/// localization; `Money` stays currency-neutral.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summing line amounts into a cart total.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
