//! # duka-session: Session Cart Store for Duka POS
//!
//! The Cart Store sits between the browser frontend and the pure pricing
//! engine in `duka-core`. Its contract with the engine is deliberately
//! thin: give it items, get back totals.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Session Cart Store                                 │
//! │                                                                         │
//! │  Frontend Action        Store Operation          Engine + Persistence   │
//! │  ───────────────        ───────────────          ────────────────────   │
//! │                                                                         │
//! │  Click Product ───────► session.add() ─────────► lock → add_item()     │
//! │                                                  → repo.save() → view   │
//! │                                                                         │
//! │  Change Quantity ─────► session.set_quantity() ► lock → update → save  │
//! │                                                                         │
//! │  Click Checkout ──────► session.checkout() ────► final totals, cart    │
//! │                                                  and storage cleared    │
//! │                                                                         │
//! │  THREAD SAFETY: the cart lives behind a Mutex. Two rapid "+1" clicks   │
//! │  arriving concurrently each take the lock in turn and apply against    │
//! │  the snapshot the previous one produced - no lost updates against a    │
//! │  stale cart.                                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`session`] - [`CartSession`]: serialized mutation dispatch + views
//! - [`repository`] - [`CartRepository`] persistence seam and the
//!   in-memory implementation
//! - [`error`] - [`StoreError`] and the `{code, message}` wire shape

pub mod error;
pub mod repository;
pub mod session;

pub use error::{ErrorCode, ErrorResponse, StoreError, StoreResult};
pub use repository::{CartRepository, MemoryRepository};
pub use session::{CartSession, CartView};
