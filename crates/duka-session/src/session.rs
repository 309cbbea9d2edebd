//! # Cart Session
//!
//! Session-scoped ownership of the cart: one shopper, one cart, one lock.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Session │────►│  Items   │────►│ Checkout │────►│  Empty   │       │
//! │  │  opens   │     │  in cart │     │          │     │  again   │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │       │                │                 │                              │
//! │  load persisted    add / set /      final totals,                      │
//! │  cart or start     remove, each     cart + storage                     │
//! │  empty             persisted        cleared                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Serialized Dispatch
//! Every mutating call locks the cart, applies exactly one engine
//! operation against the current snapshot, persists the result, and
//! returns a fresh view. Concurrent UI interactions therefore apply one
//! at a time, each against the snapshot the previous one produced - the
//! Mutex *is* the lost-update guard, no further coordination needed for
//! one cart per session.

use std::sync::Mutex;

use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use duka_core::{Cart, CartTotals, LineItem, Product, TaxMode, TaxRate};

use crate::error::{StoreError, StoreResult};
use crate::repository::CartRepository;

// =============================================================================
// Cart View
// =============================================================================

/// Cart response for the frontend: items plus derived totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<LineItem>,
    pub totals: CartTotals,
}

impl CartView {
    fn of(cart: &Cart, rate: TaxRate, mode: TaxMode) -> Self {
        CartView {
            items: cart.items.clone(),
            totals: cart.totals(rate, mode),
        }
    }
}

// =============================================================================
// Cart Session
// =============================================================================

/// A shopper session that owns the authoritative cart.
///
/// ## Ownership
/// The session exclusively owns the `Cart`; callers only ever see
/// [`CartView`] snapshots. The pricing engine stays stateless - this is
/// where the state lives.
pub struct CartSession<R: CartRepository> {
    /// Session identifier (for log correlation).
    session_id: Uuid,

    /// The user whose cart this is; keys the persisted document.
    user_id: String,

    /// The authoritative cart. Mutations are serialized by this lock.
    cart: Mutex<Cart>,

    /// Persistence collaborator.
    repo: R,

    /// Tax configuration for this session's totals.
    tax_rate: TaxRate,
    tax_mode: TaxMode,
}

impl<R: CartRepository> CartSession<R> {
    /// Opens a session for a user: resumes the persisted cart if one
    /// exists, otherwise starts empty.
    pub fn open(
        repo: R,
        user_id: impl Into<String>,
        tax_rate: TaxRate,
        tax_mode: TaxMode,
    ) -> StoreResult<Self> {
        let user_id = user_id.into();
        let session_id = Uuid::new_v4();

        let cart = match repo.load(&user_id)? {
            Some(cart) => {
                debug!(%session_id, %user_id, items = cart.items.len(), "resumed persisted cart");
                cart
            }
            None => {
                debug!(%session_id, %user_id, "starting empty cart");
                Cart::new()
            }
        };

        Ok(CartSession {
            session_id,
            user_id,
            cart: Mutex::new(cart),
            repo,
            tax_rate,
            tax_mode,
        })
    }

    /// This session's identifier.
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Returns the current cart view without mutating anything.
    pub fn view(&self) -> StoreResult<CartView> {
        let cart = self.lock()?;
        Ok(CartView::of(&cart, self.tax_rate, self.tax_mode))
    }

    /// Adds a product to the cart and persists the new snapshot.
    pub fn add(&self, product: &Product, quantity: i64) -> StoreResult<CartView> {
        debug!(
            session_id = %self.session_id,
            product_id = %product.id,
            quantity,
            "add to cart"
        );

        self.mutate(|cart| cart.add_item(product, quantity).map_err(StoreError::from))
    }

    /// Sets a line's quantity (0 removes it) and persists.
    ///
    /// `available_stock` is the stock oracle's current answer for the
    /// product; updates re-validate against it just like adds do.
    pub fn set_quantity(
        &self,
        product_id: &str,
        quantity: i64,
        available_stock: i64,
    ) -> StoreResult<CartView> {
        debug!(
            session_id = %self.session_id,
            product_id,
            quantity,
            available_stock,
            "set quantity"
        );

        self.mutate(|cart| {
            let touched = cart.update_quantity(product_id, quantity, available_stock)?;
            if !touched {
                warn!(product_id, "set_quantity on product not in cart (no-op)");
            }
            Ok(())
        })
    }

    /// Removes a line item and persists. Absent id is a benign no-op.
    pub fn remove(&self, product_id: &str) -> StoreResult<CartView> {
        debug!(session_id = %self.session_id, product_id, "remove from cart");

        self.mutate(|cart| {
            if !cart.remove_item(product_id) {
                warn!(product_id, "remove on product not in cart (no-op)");
            }
            Ok(())
        })
    }

    /// Empties the cart and persists the empty snapshot.
    pub fn clear(&self) -> StoreResult<CartView> {
        debug!(session_id = %self.session_id, "clear cart");

        self.mutate(|cart| {
            cart.clear();
            Ok(())
        })
    }

    /// Completes the checkout: returns the final totals and clears both
    /// the in-memory cart and the persisted copy.
    ///
    /// Submitting the order to the backend is the network layer's job;
    /// by the time this is called the order has been accepted.
    pub fn checkout(&self) -> StoreResult<CartTotals> {
        let mut cart = self.lock()?;
        let totals = cart.totals(self.tax_rate, self.tax_mode);

        debug!(
            session_id = %self.session_id,
            user_id = %self.user_id,
            total_cents = totals.total_cents,
            "checkout complete, clearing cart"
        );

        cart.clear();
        self.repo.clear(&self.user_id)?;
        Ok(totals)
    }

    /// Locks, applies one engine operation, persists, returns the view.
    ///
    /// Persisting happens while the lock is held so the stored document
    /// can never lag behind a concurrent mutation.
    fn mutate<F>(&self, op: F) -> StoreResult<CartView>
    where
        F: FnOnce(&mut Cart) -> StoreResult<()>,
    {
        let mut cart = self.lock()?;
        op(&mut cart)?;
        self.repo.save(&self.user_id, &cart)?;
        Ok(CartView::of(&cart, self.tax_rate, self.tax_mode))
    }

    fn lock(&self) -> StoreResult<std::sync::MutexGuard<'_, Cart>> {
        self.cart
            .lock()
            .map_err(|_| StoreError::storage("cart mutex poisoned"))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryRepository;
    use duka_core::{CartError, DEFAULT_TAX_RATE_BPS};

    fn vat() -> TaxRate {
        TaxRate::from_bps(DEFAULT_TAX_RATE_BPS)
    }

    fn open_session() -> CartSession<MemoryRepository> {
        CartSession::open(MemoryRepository::new(), "user-42", vat(), TaxMode::Exclusive).unwrap()
    }

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

    #[test]
    fn test_open_starts_empty() {
        let session = open_session();
        let view = session.view().unwrap();
        assert!(view.items.is_empty());
        assert_eq!(view.totals, CartTotals::zero());
    }

    #[test]
    fn test_add_returns_view_with_totals() {
        let session = open_session();
        let view = session.add(&product("1", 10_000, 1_000, 10), 2).unwrap();

        assert_eq!(view.items.len(), 1);
        assert_eq!(view.totals.subtotal_cents, 20_000);
        assert_eq!(view.totals.total_cents, 20_880); // 16% VAT on 180.00
    }

    #[test]
    fn test_mutations_persist_and_resume() {
        let repo = std::sync::Arc::new(MemoryRepository::new());

        {
            let session =
                CartSession::open(repo.clone(), "user-42", vat(), TaxMode::Exclusive).unwrap();
            session.add(&product("1", 5_000, 0, 10), 3).unwrap();
            session.set_quantity("1", 2, 10).unwrap();
        }

        // A later session for the same user resumes the persisted cart
        let session = CartSession::open(repo, "user-42", vat(), TaxMode::Exclusive).unwrap();
        let view = session.view().unwrap();
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].quantity, 2);
    }

    #[test]
    fn test_engine_rejections_pass_through_unchanged() {
        let session = open_session();
        let err = session.add(&product("1", 999, 0, 3), 5).unwrap_err();

        assert!(matches!(
            err,
            StoreError::Cart(CartError::StockExceeded { .. })
        ));
        assert_eq!(err.code(), crate::ErrorCode::InsufficientStock);
        // Cart untouched
        assert!(session.view().unwrap().items.is_empty());
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let session = open_session();
        session.add(&product("1", 999, 0, 10), 2).unwrap();

        let view = session.set_quantity("1", 0, 10).unwrap();
        assert!(view.items.is_empty());
    }

    #[test]
    fn test_remove_unknown_is_benign() {
        let session = open_session();
        let view = session.remove("ghost").unwrap();
        assert!(view.items.is_empty());
    }

    #[test]
    fn test_clear() {
        let session = open_session();
        session.add(&product("1", 999, 0, 10), 2).unwrap();

        let view = session.clear().unwrap();
        assert!(view.items.is_empty());
        assert_eq!(view.totals, CartTotals::zero());
    }

    #[test]
    fn test_checkout_returns_totals_and_clears_storage() {
        let repo = std::sync::Arc::new(MemoryRepository::new());
        let session =
            CartSession::open(repo.clone(), "user-42", vat(), TaxMode::Exclusive).unwrap();
        session.add(&product("1", 10_000, 0, 10), 1).unwrap();
        session.add(&product("2", 5_000, 2_000, 10), 3).unwrap();

        let totals = session.checkout().unwrap();
        assert_eq!(totals.subtotal_cents, 25_000);
        assert_eq!(totals.discount_cents, 3_000);
        assert_eq!(totals.tax_cents, 3_520);
        assert_eq!(totals.total_cents, 25_520);

        // In-memory cart and persisted copy both gone
        assert!(session.view().unwrap().items.is_empty());
        assert!(repo.load("user-42").unwrap().is_none());
    }

    #[test]
    fn test_inclusive_session_totals() {
        let session = CartSession::open(
            MemoryRepository::new(),
            "user-42",
            vat(),
            TaxMode::Inclusive,
        )
        .unwrap();

        let view = session.add(&product("1", 11_600, 0, 10), 1).unwrap();
        assert_eq!(view.totals.total_cents, 11_600); // price already contains tax
        assert_eq!(view.totals.tax_cents, 1_600);
    }
}
