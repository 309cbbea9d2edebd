//! # Cart Module
//!
//! The cart pricing engine: line items, stock guards, and totals.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Frontend Action          Engine Operation        Cart Change           │
//! │  ───────────────          ────────────────        ───────────           │
//! │                                                                         │
//! │  Click Product ──────────► add_item() ──────────► merge or push line   │
//! │                                                                         │
//! │  Change Quantity ────────► update_quantity() ───► set qty / remove     │
//! │                                                                         │
//! │  Click Remove ───────────► remove_item() ───────► drop the line        │
//! │                                                                         │
//! │  Click Clear ────────────► clear() ─────────────► empty cart           │
//! │                                                                         │
//! │  Render Totals ──────────► totals() ────────────► (read only)          │
//! │                                                                         │
//! │  EVERY mutation is all-or-nothing: validation and stock guards run     │
//! │  before the first write, so a rejected call leaves the cart exactly    │
//! │  as it was. Totals are never stored - always derived from the items.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Totals Arithmetic (tax-exclusive, the default)
//! ```text
//! subtotal  = Σ unit_price × qty
//! discount  = Σ round(unit_price × discount%) × qty
//! taxable   = subtotal - discount
//! tax       = round(taxable × 16%)
//! total     = taxable + tax
//! ```
//! Each figure is rounded to whole cents independently at its own
//! derivation point. Deriving `total` by re-summing full-precision
//! intermediates instead would drift from these values by a cent on
//! awkward amounts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CartError, CartResult};
use crate::money::Money;
use crate::types::{Product, TaxMode, TaxRate};
use crate::validation::{validate_discount_bps, validate_quantity, validate_unit_price};
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

// =============================================================================
// Line Item
// =============================================================================

/// One product entry in the cart.
///
/// ## Price Freezing
/// `unit_price_cents` and `discount_bps` are captured when the product is
/// added. If the backend later reprices the product, the cart keeps
/// showing what the shopper agreed to.
///
/// ## Derived Discount
/// The per-unit discount amount is **never stored** - it is a function of
/// the frozen price and discount rate, so it cannot drift out of sync
/// with its inputs.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Product id (opaque, unique within the cart).
    pub product_id: String,

    /// SKU at time of adding (frozen).
    pub sku: String,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Barcode, pass-through metadata.
    pub barcode: Option<String>,

    /// Image reference, pass-through metadata.
    pub image_ref: Option<String>,

    /// Unit price in cents at time of adding (frozen).
    pub unit_price_cents: i64,

    /// Discount in basis points at time of adding (frozen).
    pub discount_bps: u32,

    /// Quantity in cart. Invariant: always >= 1 - a drop to zero removes
    /// the line instead.
    pub quantity: i64,

    /// When this item was added to the cart.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl LineItem {
    /// Creates a new line item from a product descriptor and quantity.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        LineItem {
            product_id: product.id.clone(),
            sku: product.sku.clone(),
            name: product.name.clone(),
            barcode: product.barcode.clone(),
            image_ref: product.image_ref.clone(),
            unit_price_cents: product.unit_price_cents,
            discount_bps: product.discount_bps,
            quantity,
            added_at: Utc::now(),
        }
    }

    /// The unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// The per-unit discount amount, derived from the frozen price and
    /// discount rate: `round(unit_price × discount_bps / 10000)`.
    pub fn discount_per_unit(&self) -> Money {
        self.unit_price().percentage_of(self.discount_bps)
    }

    /// Line total before discount (`unit_price × quantity`).
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }

    /// Total discount for this line (`discount_per_unit × quantity`).
    pub fn line_discount(&self) -> Money {
        self.discount_per_unit().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Derived totals for a cart, all in cents.
///
/// Never stored on the cart; recompute via [`Cart::totals`] after every
/// mutation. Computing twice over the same items yields identical values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Unique line items in the cart.
    pub item_count: usize,
    /// Sum of all line quantities (the cart badge number).
    pub total_quantity: i64,
    /// Σ unit_price × quantity.
    pub subtotal_cents: i64,
    /// Σ discount_per_unit × quantity.
    pub discount_cents: i64,
    /// subtotal - discount.
    pub taxable_cents: i64,
    /// Tax on the taxable amount (per the [`TaxMode`] convention).
    pub tax_cents: i64,
    /// Grand total the customer pays.
    pub total_cents: i64,
}

impl CartTotals {
    /// An empty cart's totals: everything zero.
    pub fn zero() -> Self {
        CartTotals {
            item_count: 0,
            total_quantity: 0,
            subtotal_cents: 0,
            discount_cents: 0,
            taxable_cents: 0,
            tax_cents: 0,
            total_cents: 0,
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart: an ordered list of line items.
///
/// ## Invariants
/// - Items are unique by `product_id` (adding the same product merges
///   quantities into the existing line, preserving its position)
/// - Every line quantity is >= 1 (updates to zero remove the line)
/// - Maximum unique items: [`MAX_CART_ITEMS`]
/// - Maximum quantity per line: [`MAX_ITEM_QUANTITY`]
/// - Totals are derived, never stored
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Items in the cart, in insertion order.
    pub items: Vec<LineItem>,

    /// When the cart was created/last cleared.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            items: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds a product to the cart, or merges into its existing line.
    ///
    /// ## Behavior
    /// - Product already in cart: the quantities merge into one line. The
    ///   merged quantity is checked against `product.available_stock` as a
    ///   whole - on excess, nothing merges (no partial add).
    /// - Product not in cart: a new line is appended with the price and
    ///   discount frozen from the descriptor.
    ///
    /// ## Errors
    /// - [`CartError::Validation`] - quantity < 1, negative price, or
    ///   discount over 100%
    /// - [`CartError::StockUnavailable`] - the product has no stock at all
    /// - [`CartError::StockExceeded`] - merged quantity exceeds stock
    /// - [`CartError::CartTooLarge`] / [`CartError::QuantityTooLarge`] -
    ///   cart limits
    ///
    /// On any error the cart is unchanged.
    pub fn add_item(&mut self, product: &Product, quantity: i64) -> CartResult<()> {
        validate_quantity(quantity)?;
        validate_unit_price(product.unit_price_cents)?;
        validate_discount_bps(product.discount_bps)?;

        if product.available_stock < 1 {
            return Err(CartError::StockUnavailable {
                sku: product.sku.clone(),
            });
        }

        // Merged quantity if the product already has a line, else the
        // requested quantity. Guards run against this BEFORE any write.
        let existing = self.items.iter().position(|i| i.product_id == product.id);
        let new_qty = match existing {
            Some(idx) => self.items[idx].quantity + quantity,
            None => quantity,
        };

        if new_qty > product.available_stock {
            return Err(CartError::StockExceeded {
                sku: product.sku.clone(),
                available: product.available_stock,
                requested: new_qty,
            });
        }

        if new_qty > MAX_ITEM_QUANTITY {
            return Err(CartError::QuantityTooLarge {
                requested: new_qty,
                max: MAX_ITEM_QUANTITY,
            });
        }

        match existing {
            Some(idx) => self.items[idx].quantity = new_qty,
            None => {
                if self.items.len() >= MAX_CART_ITEMS {
                    return Err(CartError::CartTooLarge {
                        max: MAX_CART_ITEMS,
                    });
                }
                self.items.push(LineItem::from_product(product, quantity));
            }
        }

        Ok(())
    }

    /// Sets the quantity of a line item.
    ///
    /// ## Behavior
    /// - `quantity < 1`: equivalent to [`Cart::remove_item`]
    /// - Unknown product id: benign no-op, returns `Ok(false)`
    /// - Otherwise the line's quantity is replaced and `Ok(true)` returned
    ///
    /// ## Stock Re-validation
    /// Updates re-check against `available_stock`, same as adds. The add
    /// path guarding stock while the update path did not was a latent bug
    /// in the system this replaces; both paths now enforce the same rule.
    pub fn update_quantity(
        &mut self,
        product_id: &str,
        quantity: i64,
        available_stock: i64,
    ) -> CartResult<bool> {
        if quantity < 1 {
            return Ok(self.remove_item(product_id));
        }

        let Some(item) = self.items.iter_mut().find(|i| i.product_id == product_id) else {
            return Ok(false);
        };

        if quantity > available_stock {
            return Err(CartError::StockExceeded {
                sku: item.sku.clone(),
                available: available_stock,
                requested: quantity,
            });
        }

        if quantity > MAX_ITEM_QUANTITY {
            return Err(CartError::QuantityTooLarge {
                requested: quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }

        item.quantity = quantity;
        Ok(true)
    }

    /// Removes a line item by product id.
    ///
    /// Returns `true` if a line was removed. An absent id is a benign
    /// no-op (`false`), never an error.
    pub fn remove_item(&mut self, product_id: &str) -> bool {
        let initial_len = self.items.len();
        self.items.retain(|i| i.product_id != product_id);
        self.items.len() != initial_len
    }

    /// Clears all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.created_at = Utc::now();
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of unique line items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Subtotal before discounts.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(|i| i.line_total()).sum()
    }

    /// Total discount across all lines.
    pub fn discount_total(&self) -> Money {
        self.items.iter().map(|i| i.line_discount()).sum()
    }

    /// Computes the full set of derived totals.
    ///
    /// Pure function of the item list: no hidden state, idempotent.
    ///
    /// ## Conventions
    /// - [`TaxMode::Exclusive`]: `tax = round(taxable × rate)`,
    ///   `total = taxable + tax`
    /// - [`TaxMode::Inclusive`]: the taxable amount already contains tax;
    ///   `pre_tax = round(taxable / (1 + rate))`, `tax = taxable - pre_tax`,
    ///   `total = taxable`
    pub fn totals(&self, rate: TaxRate, mode: TaxMode) -> CartTotals {
        let subtotal = self.subtotal();
        let discount = self.discount_total();
        let taxable = subtotal - discount;

        let (tax, total) = match mode {
            TaxMode::Exclusive => {
                let tax = taxable.tax_on(rate);
                (tax, taxable + tax)
            }
            TaxMode::Inclusive => {
                let tax = taxable - taxable.pre_tax_portion(rate);
                (tax, taxable)
            }
        };

        CartTotals {
            item_count: self.item_count(),
            total_quantity: self.total_quantity(),
            subtotal_cents: subtotal.cents(),
            discount_cents: discount.cents(),
            taxable_cents: taxable.cents(),
            tax_cents: tax.cents(),
            total_cents: total.cents(),
        }
    }
}

impl Default for Cart {
    fn default() -> Self {
        Cart::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, price_cents: i64, discount_bps: u32, stock: i64) -> Product {
        Product {
            id: id.to_string(),
            sku: format!("SKU-{}", id),
            name: format!("Product {}", id),
            barcode: None,
            image_ref: None,
            unit_price_cents: price_cents,
            discount_bps,
            available_stock: stock,
        }
    }

    fn vat() -> TaxRate {
        TaxRate::from_bps(crate::DEFAULT_TAX_RATE_BPS)
    }

    #[test]
    fn test_add_item() {
        let mut cart = Cart::new();
        let p = product("1", 999, 0, 10);

        cart.add_item(&p, 2).unwrap();

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.subtotal().cents(), 1_998);
    }

    #[test]
    fn test_add_same_product_merges_lines() {
        let mut cart = Cart::new();
        let p = product("1", 999, 0, 10);

        cart.add_item(&p, 2).unwrap();
        cart.add_item(&p, 3).unwrap();

        assert_eq!(cart.item_count(), 1); // still one unique line
        assert_eq!(cart.total_quantity(), 5);
    }

    #[test]
    fn test_add_freezes_price_and_discount() {
        let mut cart = Cart::new();
        let mut p = product("1", 1_000, 500, 10);
        cart.add_item(&p, 1).unwrap();

        // Backend reprices the product; existing line is unaffected
        p.unit_price_cents = 2_000;
        p.discount_bps = 0;

        assert_eq!(cart.items[0].unit_price_cents, 1_000);
        assert_eq!(cart.items[0].discount_bps, 500);
    }

    #[test]
    fn test_add_rejects_out_of_stock() {
        let mut cart = Cart::new();
        let p = product("1", 999, 0, 0);

        let err = cart.add_item(&p, 1).unwrap_err();
        assert!(matches!(err, CartError::StockUnavailable { .. }));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_rejects_quantity_over_stock() {
        let mut cart = Cart::new();
        let p = product("1", 999, 0, 3);

        let err = cart.add_item(&p, 5).unwrap_err();
        assert_eq!(
            err,
            CartError::StockExceeded {
                sku: "SKU-1".to_string(),
                available: 3,
                requested: 5,
            }
        );
        assert!(cart.is_empty()); // cart unchanged
    }

    #[test]
    fn test_merge_over_stock_rejected_as_a_whole() {
        let mut cart = Cart::new();
        let p = product("1", 999, 0, 3);

        cart.add_item(&p, 2).unwrap();
        let err = cart.add_item(&p, 2).unwrap_err();

        assert!(matches!(err, CartError::StockExceeded { requested: 4, .. }));
        // No partial merge: the existing line keeps its quantity
        assert_eq!(cart.items[0].quantity, 2);
    }

    #[test]
    fn test_add_rejects_invalid_inputs() {
        let mut cart = Cart::new();

        let err = cart.add_item(&product("1", 999, 0, 10), 0).unwrap_err();
        assert!(matches!(err, CartError::Validation(_)));

        let err = cart.add_item(&product("2", -100, 0, 10), 1).unwrap_err();
        assert!(matches!(err, CartError::Validation(_)));

        let err = cart.add_item(&product("3", 100, 12_000, 10), 1).unwrap_err();
        assert!(matches!(err, CartError::Validation(_)));

        assert!(cart.is_empty());
    }

    #[test]
    fn test_cart_item_limit() {
        let mut cart = Cart::new();
        for i in 0..MAX_CART_ITEMS {
            cart.add_item(&product(&i.to_string(), 100, 0, 10), 1).unwrap();
        }

        let err = cart.add_item(&product("overflow", 100, 0, 10), 1).unwrap_err();
        assert_eq!(err, CartError::CartTooLarge { max: MAX_CART_ITEMS });
    }

    #[test]
    fn test_quantity_ceiling() {
        let mut cart = Cart::new();
        let p = product("1", 100, 0, 100_000);

        let err = cart.add_item(&p, MAX_ITEM_QUANTITY + 1).unwrap_err();
        assert!(matches!(err, CartError::QuantityTooLarge { .. }));
    }

    #[test]
    fn test_update_quantity() {
        let mut cart = Cart::new();
        cart.add_item(&product("1", 999, 0, 10), 2).unwrap();

        assert!(cart.update_quantity("1", 5, 10).unwrap());
        assert_eq!(cart.items[0].quantity, 5);
    }

    #[test]
    fn test_update_to_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add_item(&product("1", 999, 0, 10), 2).unwrap();

        assert!(cart.update_quantity("1", 0, 10).unwrap());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_revalidates_stock() {
        let mut cart = Cart::new();
        cart.add_item(&product("1", 999, 0, 10), 2).unwrap();

        // Stock dropped to 4 since the add; bumping to 5 must fail
        let err = cart.update_quantity("1", 5, 4).unwrap_err();
        assert!(matches!(err, CartError::StockExceeded { available: 4, .. }));
        assert_eq!(cart.items[0].quantity, 2);
    }

    #[test]
    fn test_update_unknown_product_is_noop() {
        let mut cart = Cart::new();
        assert!(!cart.update_quantity("ghost", 3, 10).unwrap());
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::new();
        cart.add_item(&product("1", 999, 0, 10), 2).unwrap();

        assert!(cart.remove_item("1"));
        assert!(cart.is_empty());
        assert!(!cart.remove_item("1")); // absent id: no-op, not an error
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add_item(&product("1", 999, 0, 10), 2).unwrap();
        assert!(!cart.is_empty());

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.totals(vat(), TaxMode::Exclusive), CartTotals::zero());
    }

    #[test]
    fn test_empty_cart_totals_all_zero() {
        let cart = Cart::new();
        assert_eq!(cart.totals(vat(), TaxMode::Exclusive), CartTotals::zero());
    }

    /// Golden values: 100.00 × 2 at 10% discount, 16% VAT.
    #[test]
    fn test_totals_single_discounted_line() {
        let mut cart = Cart::new();
        cart.add_item(&product("1", 10_000, 1_000, 10), 2).unwrap();

        assert_eq!(cart.items[0].discount_per_unit().cents(), 1_000); // 10.00

        let totals = cart.totals(vat(), TaxMode::Exclusive);
        assert_eq!(totals.subtotal_cents, 20_000); // 200.00
        assert_eq!(totals.discount_cents, 2_000);  //  20.00
        assert_eq!(totals.taxable_cents, 18_000);  // 180.00
        assert_eq!(totals.tax_cents, 2_880);       //  28.80
        assert_eq!(totals.total_cents, 20_880);    // 208.80
    }

    /// Golden values: {100.00 × 1, 0%} + {50.00 × 3, 20%}, 16% VAT.
    #[test]
    fn test_totals_mixed_lines() {
        let mut cart = Cart::new();
        cart.add_item(&product("1", 10_000, 0, 10), 1).unwrap();
        cart.add_item(&product("2", 5_000, 2_000, 10), 3).unwrap();

        let totals = cart.totals(vat(), TaxMode::Exclusive);
        assert_eq!(totals.subtotal_cents, 25_000); // 100 + 150
        assert_eq!(totals.discount_cents, 3_000);  // 0 + 30
        assert_eq!(totals.taxable_cents, 22_000);
        assert_eq!(totals.tax_cents, 3_520);       // 35.20
        assert_eq!(totals.total_cents, 25_520);    // 255.20
        assert_eq!(totals.item_count, 2);
        assert_eq!(totals.total_quantity, 4);
    }

    #[test]
    fn test_totals_inclusive_mode() {
        let mut cart = Cart::new();
        // 116.00, tax-inclusive, 16% VAT
        cart.add_item(&product("1", 11_600, 0, 10), 1).unwrap();

        let totals = cart.totals(vat(), TaxMode::Inclusive);
        assert_eq!(totals.taxable_cents, 11_600);
        assert_eq!(totals.tax_cents, 1_600);
        assert_eq!(totals.total_cents, 11_600); // already contains tax
        // parts reconcile exactly
        assert_eq!(totals.taxable_cents - totals.tax_cents, 10_000);
    }

    #[test]
    fn test_totals_idempotent() {
        let mut cart = Cart::new();
        cart.add_item(&product("1", 3_333, 750, 10), 3).unwrap();

        let first = cart.totals(vat(), TaxMode::Exclusive);
        let second = cart.totals(vat(), TaxMode::Exclusive);
        assert_eq!(first, second);
    }

    #[test]
    fn test_subtotal_dominates_discount() {
        let mut cart = Cart::new();
        cart.add_item(&product("1", 10_000, 10_000, 10), 2).unwrap(); // 100% off
        cart.add_item(&product("2", 777, 2_500, 10), 1).unwrap();

        let totals = cart.totals(vat(), TaxMode::Exclusive);
        assert!(totals.subtotal_cents >= totals.discount_cents);
        assert!(totals.discount_cents >= 0);
        assert_eq!(
            totals.taxable_cents,
            totals.subtotal_cents - totals.discount_cents
        );
    }

    /// Independently rounded figures: 33.33 × 3 at 7.5% discount.
    /// Per-unit discount rounds first (2.50), then multiplies - not a
    /// full-precision sum rounded at the end.
    #[test]
    fn test_rounding_applied_per_derivation() {
        let mut cart = Cart::new();
        cart.add_item(&product("1", 3_333, 750, 10), 3).unwrap();

        // 3333 × 7.5% = 249.975 → 250 per unit, × 3 = 750
        assert_eq!(cart.items[0].discount_per_unit().cents(), 250);

        let totals = cart.totals(vat(), TaxMode::Exclusive);
        assert_eq!(totals.subtotal_cents, 9_999);
        assert_eq!(totals.discount_cents, 750);
        assert_eq!(totals.taxable_cents, 9_249);
        // 9249 × 16% = 1479.84 → 1480
        assert_eq!(totals.tax_cents, 1_480);
        assert_eq!(totals.total_cents, 10_729);
    }
}
