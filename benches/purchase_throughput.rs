//! Benchmark suite for engine throughput
//!
//! Measures the hot paths of the ledger engine with the divan benchmarking
//! framework: the purchase commit cycle and the rating recomputation that
//! follows a submission.
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench
//! ```

use marketplace_ledger::core::LedgerEngine;
use marketplace_ledger::store::EntityStore;
use marketplace_ledger::types::{NewProduct, ProductCategory, Role};
use rust_decimal::Decimal;
use std::sync::Arc;

fn main() {
    divan::main();
}

fn funded_marketplace(purchases: u32) -> (LedgerEngine, u64, u64) {
    let engine = LedgerEngine::new(Arc::new(EntityStore::new()));
    let buyer = engine
        .create_user(Role::Buyer, Decimal::from(10_000_000))
        .expect("buyer");
    let seller = engine.create_user(Role::Seller, Decimal::ZERO).expect("seller");
    let product = engine
        .create_product(
            seller.id,
            NewProduct {
                title: "Benchmark Listing".to_string(),
                description: String::new(),
                price: Decimal::from(5),
                category: ProductCategory::Assets,
                hidden_link: "https://example.com/x".to_string(),
            },
        )
        .expect("product");

    for _ in 0..purchases {
        engine.purchase(buyer.id, product.id).expect("purchase");
    }
    (engine, buyer.id, product.id)
}

/// Single purchase against a small store
#[divan::bench]
fn purchase_small_store(bencher: divan::Bencher) {
    let (engine, buyer, product) = funded_marketplace(100);
    bencher.bench_local(|| engine.purchase(buyer, product).expect("purchase"));
}

/// Single purchase against a store holding 10k prior purchases
#[divan::bench]
fn purchase_large_store(bencher: divan::Bencher) {
    let (engine, buyer, product) = funded_marketplace(10_000);
    bencher.bench_local(|| engine.purchase(buyer, product).expect("purchase"));
}

/// Rating submission, which recomputes the product average from scratch
#[divan::bench]
fn rating_recompute_large_store(bencher: divan::Bencher) {
    let (engine, _, _) = funded_marketplace(10_000);
    // First purchase id follows the three setup entities; overwriting the
    // same rating still recomputes over all 10k purchases
    bencher.bench_local(|| engine.submit_rating(4, 5).expect("rating"));
}
