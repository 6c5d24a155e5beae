//! Marketplace Ledger Library
//! # Overview
//!
//! This library provides the transactional ledger of a digital-goods
//! marketplace: keyed entity collections, an all-or-nothing transaction
//! engine, and CSV persistence.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Entity types (User, Product, Purchase, ...) and errors
//! - [`store`] - Keyed in-memory collections and snapshot persistence
//! - [`core`] - Business logic components:
//!   - [`core::engine`] - Transaction processing with all-or-nothing commits
//!   - [`core::ratings`] - Product rating aggregation
//!   - [`core::ids`] - Monotonic id generation
//! - [`wallet`] - Wallet connection behind an async trait
//! - [`session`] - Current-user tracking
//! - [`io`] - Operation-script parsing and balance report output
//! - [`cli`] - CLI argument parsing
//!
//! # Transactional Model
//!
//! Every engine operation validates all of its preconditions before the
//! first write, so a failed operation leaves the store untouched.
//! Operations are serialized behind a non-blocking transaction lock;
//! contention is reported as [`types::LedgerError::Busy`] rather than
//! queued.
//!
//! # Money Flow
//!
//! A purchase debits the buyer by `price + fee`, credits the seller by
//! `price`, and credits the platform by `fee`. Withdrawal requests escrow
//! the amount until an admin resolves them. Banning a seller forfeits
//! their balance and deactivates every listing they own, atomically.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod session;
pub mod store;
pub mod types;
pub mod wallet;

pub use self::core::{EngineConfig, LedgerEngine, VerificationThresholds};
pub use io::write_balance_report;
pub use store::EntityStore;
pub use types::{
    LedgerError, Product, ProductId, Purchase, PurchaseId, Report, ReportId, User, UserId,
    VerificationId, VerificationRequest, Withdrawal, WithdrawalId,
};
