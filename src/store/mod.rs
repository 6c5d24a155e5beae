//! Entity store for the marketplace ledger
//!
//! This module provides the `EntityStore`, the single shared home of all
//! persisted collections (users, products, purchases, withdrawals, reports,
//! verification requests) plus the platform-balance scalar.
//!
//! # Atomicity contract
//!
//! Each collection lives behind its own `RwLock`: `get` returns an ordered
//! snapshot and `put` replaces the collection wholesale under the write
//! lock, so no reader ever observes a half-written collection.
//! Cross-collection consistency is the ledger engine's responsibility; it
//! serializes its read-validate-commit cycles behind a transaction lock.
//!
//! # Lifecycle
//!
//! The store is constructed once at startup and injected into the engine
//! (no process-wide singleton). `reset` clears every collection, which test
//! code uses for isolation.

pub mod repository;

pub use repository::{CsvRepository, Repository};

use crate::types::{Product, Purchase, Report, User, VerificationRequest, Withdrawal};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

/// A record stored in one of the ledger's keyed collections
pub trait Stored: Clone {
    /// Collection name used in error messages and snapshot file names
    const COLLECTION: &'static str;

    /// The record's unique id
    fn id(&self) -> u64;
}

impl Stored for User {
    const COLLECTION: &'static str = "users";
    fn id(&self) -> u64 {
        self.id
    }
}

impl Stored for Product {
    const COLLECTION: &'static str = "products";
    fn id(&self) -> u64 {
        self.id
    }
}

impl Stored for Purchase {
    const COLLECTION: &'static str = "purchases";
    fn id(&self) -> u64 {
        self.id
    }
}

impl Stored for Withdrawal {
    const COLLECTION: &'static str = "withdrawals";
    fn id(&self) -> u64 {
        self.id
    }
}

impl Stored for Report {
    const COLLECTION: &'static str = "reports";
    fn id(&self) -> u64 {
        self.id
    }
}

impl Stored for VerificationRequest {
    const COLLECTION: &'static str = "verifications";
    fn id(&self) -> u64 {
        self.id
    }
}

/// One keyed collection of the store
///
/// Backed by a `BTreeMap` so snapshots come out ordered by ascending id.
/// All reads return clones; writers replace entries under the write lock.
pub struct Collection<T> {
    inner: RwLock<BTreeMap<u64, T>>,
}

impl<T: Stored> Collection<T> {
    /// Create an empty collection
    pub fn new() -> Self {
        Collection {
            inner: RwLock::new(BTreeMap::new()),
        }
    }

    /// Get an ordered snapshot of all records, ascending by id
    pub fn get(&self) -> Vec<T> {
        let map = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        map.values().cloned().collect()
    }

    /// Get a keyed snapshot of all records
    ///
    /// Used by the engine when an operation needs to mutate several records
    /// of one collection together (e.g. buyer and seller balances).
    pub fn snapshot(&self) -> BTreeMap<u64, T> {
        let map = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        map.clone()
    }

    /// Look up a single record by id
    pub fn find(&self, id: u64) -> Option<T> {
        let map = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        map.get(&id).cloned()
    }

    /// Replace the collection wholesale
    ///
    /// The swap happens under the write lock, so readers see either the old
    /// or the new collection, never a mix.
    pub fn put(&self, records: impl IntoIterator<Item = T>) {
        let next: BTreeMap<u64, T> = records.into_iter().map(|r| (r.id(), r)).collect();
        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *map = next;
    }

    /// Insert or replace a single record
    pub fn upsert(&self, record: T) {
        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        map.insert(record.id(), record);
    }

    /// Number of records in the collection
    pub fn len(&self) -> usize {
        let map = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        map.len()
    }

    /// Whether the collection is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Largest id present, if any
    pub fn max_id(&self) -> Option<u64> {
        let map = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        map.keys().next_back().copied()
    }

    /// Remove every record
    pub fn clear(&self) {
        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        map.clear();
    }
}

impl<T: Stored> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// The shared entity store
///
/// Holds every persisted collection plus the platform balance. Constructed
/// at startup and shared via `Arc` between the engine and the persistence
/// layer.
pub struct EntityStore {
    /// All user accounts
    pub users: Collection<User>,
    /// All product listings
    pub products: Collection<Product>,
    /// All committed purchases
    pub purchases: Collection<Purchase>,
    /// All withdrawal requests
    pub withdrawals: Collection<Withdrawal>,
    /// All moderation reports
    pub reports: Collection<Report>,
    /// All verification requests
    pub verifications: Collection<VerificationRequest>,
    /// Accumulated platform fees
    platform_balance: RwLock<Decimal>,
}

impl EntityStore {
    /// Create an empty store
    pub fn new() -> Self {
        EntityStore {
            users: Collection::new(),
            products: Collection::new(),
            purchases: Collection::new(),
            withdrawals: Collection::new(),
            reports: Collection::new(),
            verifications: Collection::new(),
            platform_balance: RwLock::new(Decimal::ZERO),
        }
    }

    /// Current platform balance
    pub fn platform_balance(&self) -> Decimal {
        *self
            .platform_balance
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the platform balance
    pub fn set_platform_balance(&self, balance: Decimal) {
        let mut guard = self
            .platform_balance
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = balance;
    }

    /// Largest id in any collection
    ///
    /// Used to reseed the id generator after a snapshot load so ids are
    /// never reused across process restarts.
    pub fn max_id(&self) -> u64 {
        [
            self.users.max_id(),
            self.products.max_id(),
            self.purchases.max_id(),
            self.withdrawals.max_id(),
            self.reports.max_id(),
            self.verifications.max_id(),
        ]
        .into_iter()
        .flatten()
        .max()
        .unwrap_or(0)
    }

    /// Clear every collection and zero the platform balance
    ///
    /// Intended for test isolation and the explicit empty-state
    /// initialization; issued ids are not reset.
    pub fn reset(&self) {
        self.users.clear();
        self.products.clear();
        self.purchases.clear();
        self.withdrawals.clear();
        self.reports.clear();
        self.verifications.clear();
        self.set_platform_balance(Decimal::ZERO);
    }
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}
