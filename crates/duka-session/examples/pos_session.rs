//! End-to-end walkthrough of a shopper session.
//!
//! Run with logging enabled to watch every cart mutation:
//!
//! ```sh
//! RUST_LOG=debug cargo run -p duka-session --example pos_session
//! ```

use duka_core::{Product, TaxMode, TaxRate, DEFAULT_TAX_RATE_BPS};
use duka_session::{CartSession, MemoryRepository, StoreError};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), StoreError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let flour = Product {
        id: "p-100".to_string(),
        sku: "UNGA-2KG".to_string(),
        name: "Maize Flour 2kg".to_string(),
        barcode: Some("6161100000100".to_string()),
        image_ref: None,
        unit_price_cents: 10_000, // 100.00
        discount_bps: 1_000,      // 10% promo
        available_stock: 20,
    };
    let milk = Product {
        id: "p-200".to_string(),
        sku: "MILK-500ML".to_string(),
        name: "Fresh Milk 500ml".to_string(),
        barcode: Some("6161100000200".to_string()),
        image_ref: None,
        unit_price_cents: 5_000, // 50.00
        discount_bps: 0,
        available_stock: 3,
    };

    let session = CartSession::open(
        MemoryRepository::new(),
        "user-42",
        TaxRate::from_bps(DEFAULT_TAX_RATE_BPS),
        TaxMode::Exclusive,
    )?;

    println!("session {} opened for user-42", session.session_id());

    session.add(&flour, 2)?;
    let view = session.add(&milk, 1)?;
    println!("cart: {} lines, total {} cents", view.items.len(), view.totals.total_cents);

    // Stock guard in action: only 3 milk available, 4 requested in total
    match session.set_quantity("p-200", 4, milk.available_stock) {
        Err(err) => println!("rejected as expected: {}", err.to_response().message),
        Ok(_) => unreachable!("stock guard should have fired"),
    }

    let totals = session.checkout()?;
    println!(
        "checkout: subtotal {} / discount {} / tax {} / total {}",
        totals.subtotal_cents, totals.discount_cents, totals.tax_cents, totals.total_cents
    );

    Ok(())
}
