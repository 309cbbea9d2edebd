//! # Cart Repository
//!
//! The persistence seam between the cart store and whatever actually
//! holds persisted carts - browser session storage, a remote `/cart`
//! endpoint, or the in-memory map used in tests.
//!
//! ## Storage Model
//! One JSON document per user id. The cart snapshot is serialized whole
//! on every save; there is no per-item delta protocol. This mirrors the
//! deployed system, which keeps the cart keyed by user id in a browser
//! storage facility as a single JSON string.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   key: user id              value: JSON cart document                   │
//! │   ───────────               ─────────────────────────                   │
//! │   "user-42"          ──►    {"items":[...],"createdAt":"..."}           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::Mutex;

use duka_core::Cart;

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Repository Trait
// =============================================================================

/// Persistence collaborator for cart snapshots.
///
/// Implementations must be usable from behind a shared reference; the
/// session calls `save` while holding its cart lock so that the persisted
/// document always matches the snapshot just produced.
pub trait CartRepository {
    /// Loads the persisted cart for a user, if any.
    fn load(&self, user_id: &str) -> StoreResult<Option<Cart>>;

    /// Persists the cart snapshot for a user, replacing any previous one.
    fn save(&self, user_id: &str, cart: &Cart) -> StoreResult<()>;

    /// Deletes the persisted cart for a user. Absent is not an error.
    fn clear(&self, user_id: &str) -> StoreResult<()>;
}

/// Shared repositories work wherever an owned one does.
///
/// Lets tests and multi-session hosts hand the same backing store to
/// several sessions via `Arc`.
impl<R: CartRepository + ?Sized> CartRepository for std::sync::Arc<R> {
    fn load(&self, user_id: &str) -> StoreResult<Option<Cart>> {
        (**self).load(user_id)
    }

    fn save(&self, user_id: &str, cart: &Cart) -> StoreResult<()> {
        (**self).save(user_id, cart)
    }

    fn clear(&self, user_id: &str) -> StoreResult<()> {
        (**self).clear(user_id)
    }
}

// =============================================================================
// In-Memory Repository
// =============================================================================

/// In-process repository over a map of JSON documents.
///
/// Backs unit tests and the demo example. Deliberately stores serialized
/// JSON rather than `Cart` values, so it exercises the same round-trip a
/// real storage backend would.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    documents: Mutex<HashMap<String, String>>,
}

impl MemoryRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> StoreResult<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.documents
            .lock()
            .map_err(|_| StoreError::storage("repository mutex poisoned"))
    }
}

impl CartRepository for MemoryRepository {
    fn load(&self, user_id: &str) -> StoreResult<Option<Cart>> {
        let documents = self.lock()?;
        match documents.get(user_id) {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    fn save(&self, user_id: &str, cart: &Cart) -> StoreResult<()> {
        let json = serde_json::to_string(cart)?;
        self.lock()?.insert(user_id.to_string(), json);
        Ok(())
    }

    fn clear(&self, user_id: &str) -> StoreResult<()> {
        self.lock()?.remove(user_id);
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
