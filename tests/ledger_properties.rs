//! End-to-end property tests for the ledger
//!
//! These tests exercise the public library surface the way the binary does
//! and check the system-wide guarantees that individual unit tests cannot:
//!
//! - Money conservation: purchases move money between accounts and the
//!   platform without creating or destroying any
//! - Non-negativity: no interleaving of operations drives a balance below
//!   zero
//! - Rating consistency: a product's average always equals the mean of its
//!   purchases' ratings
//! - Ban cascade completeness: a confirmed report leaves no partial state
//! - Idempotent resolution: resolving twice never double-applies
//!
//! Concurrency tests retry on `Busy`: the engine's lock is non-blocking by
//! contract, so callers that want the operation to happen must loop.

use marketplace_ledger::core::LedgerEngine;
use marketplace_ledger::io;
use marketplace_ledger::store::EntityStore;
use marketplace_ledger::types::{
    Decision, LedgerError, NewProduct, Product, ProductCategory, ReportDecision, ReportReason,
    Role, User,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

fn engine() -> LedgerEngine {
    LedgerEngine::new(Arc::new(EntityStore::new()))
}

fn listing(price: Decimal) -> NewProduct {
    NewProduct {
        title: "Listing".to_string(),
        description: String::new(),
        price,
        category: ProductCategory::Ebooks,
        hidden_link: "https://example.com/secret".to_string(),
    }
}

/// Total money in the system: user balances, the platform balance, and
/// amounts escrowed in pending withdrawals
fn total_money(engine: &LedgerEngine) -> Decimal {
    let store = engine.store();
    let users: Decimal = store.users.get().iter().map(|u| u.balance).sum();
    let escrowed: Decimal = store
        .withdrawals
        .get()
        .iter()
        .filter(|w| w.status == marketplace_ledger::types::WithdrawalStatus::Pending)
        .map(|w| w.amount)
        .sum();
    users + escrowed + engine.platform_balance()
}

/// Retry an operation until the transaction lock is free
fn retrying<T>(mut op: impl FnMut() -> Result<T, LedgerError>) -> Result<T, LedgerError> {
    loop {
        match op() {
            Err(LedgerError::Busy) => std::thread::yield_now(),
            other => return other,
        }
    }
}

// --- scenario walkthroughs ---

#[test]
fn scenario_purchase_splits_price_and_fee() {
    let engine = engine();
    let buyer = engine.create_user(Role::Buyer, Decimal::from(10)).unwrap();
    let seller = engine.create_user(Role::Seller, Decimal::ZERO).unwrap();
    let product = engine
        .create_product(seller.id, listing(Decimal::from(5)))
        .unwrap();

    engine.purchase(buyer.id, product.id).unwrap();

    let store = engine.store();
    assert_eq!(store.users.find(buyer.id).unwrap().balance, Decimal::new(49, 1));
    assert_eq!(store.users.find(seller.id).unwrap().balance, Decimal::from(5));
    assert_eq!(engine.platform_balance(), Decimal::new(1, 1));
}

#[test]
fn scenario_underfunded_purchase_changes_nothing() {
    let engine = engine();
    let buyer = engine.create_user(Role::Buyer, Decimal::from(4)).unwrap();
    let seller = engine.create_user(Role::Seller, Decimal::ZERO).unwrap();
    let product = engine
        .create_product(seller.id, listing(Decimal::from(5)))
        .unwrap();

    let before = total_money(&engine);
    let result = engine.purchase(buyer.id, product.id);

    assert!(matches!(
        result.unwrap_err(),
        LedgerError::InsufficientFunds { .. }
    ));
    assert_eq!(total_money(&engine), before);
    assert!(engine.store().purchases.is_empty());
}

#[test]
fn scenario_rejected_withdrawal_restores_balance() {
    let engine = engine();
    let seller = engine.create_user(Role::Seller, Decimal::from(20)).unwrap();

    let withdrawal = engine
        .request_withdrawal(seller.id, Decimal::from(15))
        .unwrap();
    assert_eq!(
        engine.store().users.find(seller.id).unwrap().balance,
        Decimal::from(5)
    );

    engine
        .resolve_withdrawal(withdrawal.id, Decision::Reject)
        .unwrap();
    assert_eq!(
        engine.store().users.find(seller.id).unwrap().balance,
        Decimal::from(20)
    );
}

#[test]
fn scenario_confirmed_report_bans_completely() {
    let engine = engine();
    let buyer = engine.create_user(Role::Buyer, Decimal::from(100)).unwrap();
    let seller = engine.create_user(Role::Seller, Decimal::from(42)).unwrap();
    let products: Vec<Product> = (0..3)
        .map(|_| {
            engine
                .create_product(seller.id, listing(Decimal::from(5)))
                .unwrap()
        })
        .collect();

    let report = engine
        .create_report(
            buyer.id,
            products[1].id,
            ReportReason::Scam,
            "fraudulent listing".to_string(),
        )
        .unwrap();
    engine
        .resolve_report(report.id, ReportDecision::ConfirmBan)
        .unwrap();

    let banned: User = engine.store().users.find(seller.id).unwrap();
    assert!(banned.is_banned);
    assert_eq!(banned.balance, Decimal::ZERO);
    for product in &products {
        assert!(!engine.store().products.find(product.id).unwrap().is_active);
    }
    // And no operation lets the banned seller back in
    assert!(engine
        .create_product(seller.id, listing(Decimal::from(5)))
        .is_err());
    assert!(engine.purchase(buyer.id, products[0].id).is_err());
}

#[test]
fn scenario_ratings_average_across_buyers() {
    let engine = engine();
    let first = engine.create_user(Role::Buyer, Decimal::from(10)).unwrap();
    let second = engine.create_user(Role::Buyer, Decimal::from(10)).unwrap();
    let seller = engine.create_user(Role::Seller, Decimal::ZERO).unwrap();
    let product = engine
        .create_product(seller.id, listing(Decimal::from(5)))
        .unwrap();

    let a = engine.purchase(first.id, product.id).unwrap();
    let b = engine.purchase(second.id, product.id).unwrap();
    engine.submit_rating(a.id, 4).unwrap();
    engine.submit_rating(b.id, 5).unwrap();

    let product = engine.store().products.find(product.id).unwrap();
    assert_eq!(product.average_rating, Decimal::new(45, 1));
    assert_eq!(product.total_ratings, 2);
}

// --- system-wide properties ---

#[test]
fn purchases_conserve_money_across_a_session() {
    let engine = engine();
    let buyer = engine.create_user(Role::Buyer, Decimal::from(100)).unwrap();
    let seller = engine.create_user(Role::Seller, Decimal::from(10)).unwrap();
    let product = engine
        .create_product(seller.id, listing(Decimal::new(75, 1)))
        .unwrap();

    let before = total_money(&engine);
    for _ in 0..8 {
        engine.purchase(buyer.id, product.id).unwrap();
    }

    // Fees moved to the platform, prices to the seller, total unchanged
    assert_eq!(total_money(&engine), before);
    assert_eq!(engine.platform_balance(), Decimal::new(8, 1));
    assert_eq!(engine.total_volume(), Decimal::from(60));
}

#[test]
fn concurrent_purchases_never_overdraw() {
    // A buyer who can afford exactly one purchase races two threads; at
    // most one purchase may land and the balance must stay non-negative
    let engine = Arc::new(engine());
    let buyer = engine.create_user(Role::Buyer, Decimal::new(51, 1)).unwrap();
    let seller = engine.create_user(Role::Seller, Decimal::ZERO).unwrap();
    let product = engine
        .create_product(seller.id, listing(Decimal::from(5)))
        .unwrap();

    let buyer_id = buyer.id;
    let product_id = product.id;
    let mut handles = Vec::new();
    for _ in 0..2 {
        let engine = Arc::clone(&engine);
        handles.push(std::thread::spawn(move || {
            retrying(|| engine.purchase(buyer_id, product_id)).is_ok()
        }));
    }
    let successes = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|&ok| ok)
        .count();

    assert_eq!(successes, 1);
    assert_eq!(
        engine.store().users.find(buyer.id).unwrap().balance,
        Decimal::ZERO
    );
    assert_eq!(
        engine.store().users.find(seller.id).unwrap().balance,
        Decimal::from(5)
    );
    assert_eq!(engine.platform_balance(), Decimal::new(1, 1));
}

#[test]
fn double_resolution_is_rejected_everywhere() {
    let engine = engine();
    let buyer = engine.create_user(Role::Buyer, Decimal::from(10)).unwrap();
    let seller = engine.create_user(Role::Seller, Decimal::from(30)).unwrap();
    let product = engine
        .create_product(seller.id, listing(Decimal::from(5)))
        .unwrap();

    let withdrawal = engine
        .request_withdrawal(seller.id, Decimal::from(10))
        .unwrap();
    engine
        .resolve_withdrawal(withdrawal.id, Decision::Approve)
        .unwrap();
    assert!(matches!(
        engine
            .resolve_withdrawal(withdrawal.id, Decision::Reject)
            .unwrap_err(),
        LedgerError::NotPending { .. }
    ));

    let verification = engine.request_verification(seller.id).unwrap();
    engine
        .resolve_verification(verification.id, Decision::Approve)
        .unwrap();
    assert!(matches!(
        engine
            .resolve_verification(verification.id, Decision::Reject)
            .unwrap_err(),
        LedgerError::NotPending { .. }
    ));

    let report = engine
        .create_report(buyer.id, product.id, ReportReason::Spam, String::new())
        .unwrap();
    engine
        .resolve_report(report.id, ReportDecision::Reject)
        .unwrap();
    assert!(matches!(
        engine
            .resolve_report(report.id, ReportDecision::ConfirmBan)
            .unwrap_err(),
        LedgerError::NotPending { .. }
    ));
    assert!(!engine.store().users.find(seller.id).unwrap().is_banned);
}

// --- script pipeline ---

#[test]
fn script_run_produces_expected_report() {
    let engine = engine();
    let mut script = NamedTempFile::new().unwrap();
    write!(
        script,
        "op,actor,target,amount,rating,decision,role,reason,description,title,link\n\
         create_user,,,10,,,buyer,,,,\n\
         create_user,,,,,,seller,,,,\n\
         create_product,2,,5,,,,,,Guide,https://example.com/g\n\
         purchase,1,3,,,,,,,,\n\
         purchase,1,99,,,,,,,,\n"
    )
    .unwrap();
    script.flush().unwrap();

    io::run_script(&engine, script.path()).unwrap();

    let mut output = Vec::new();
    io::write_balance_report(engine.store(), &mut output).unwrap();
    let report = String::from_utf8(output).unwrap();

    let expected = "user,role,balance,banned\n\
                    1,Buyer,4.9,false\n\
                    2,Seller,5,false\n\
                    platform,,0.1,\n";
    assert_eq!(report, expected);
}

// --- generated sequences ---

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Any sequence of purchases from any funding level conserves money
    /// and leaves every balance non-negative
    #[test]
    fn purchase_sequences_conserve_money(
        funding in 0u32..200,
        prices in prop::collection::vec(1u32..50, 1..8),
        attempts in 1usize..20,
    ) {
        let engine = engine();
        let buyer = engine
            .create_user(Role::Buyer, Decimal::from(funding))
            .unwrap();
        let seller = engine.create_user(Role::Seller, Decimal::ZERO).unwrap();
        let products: Vec<Product> = prices
            .iter()
            .map(|&p| {
                engine
                    .create_product(seller.id, listing(Decimal::from(p)))
                    .unwrap()
            })
            .collect();

        let before = total_money(&engine);
        for i in 0..attempts {
            let product = &products[i % products.len()];
            // Success or failure, the invariants must hold after each step
            let _ = engine.purchase(buyer.id, product.id);
            prop_assert_eq!(total_money(&engine), before);
            prop_assert!(
                engine.store().users.find(buyer.id).unwrap().balance >= Decimal::ZERO
            );
        }
    }
}
