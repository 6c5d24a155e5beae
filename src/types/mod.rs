//! Core data types for the marketplace ledger
//!
//! This module contains all entity types persisted by the ledger, the id
//! aliases used to reference them, and the error type returned by every
//! engine operation.

pub mod error;
pub mod product;
pub mod purchase;
pub mod report;
pub mod user;
pub mod verification;
pub mod withdrawal;

pub use error::LedgerError;
pub use product::{NewProduct, Product, ProductCategory};
pub use purchase::Purchase;
pub use report::{Report, ReportDecision, ReportReason, ReportStatus};
pub use user::{Role, User, VerificationStatus};
pub use verification::{RequestStatus, VerificationRequest};
pub use withdrawal::{Withdrawal, WithdrawalStatus};

use serde::{Deserialize, Serialize};

/// User identifier
pub type UserId = u64;

/// Product identifier
pub type ProductId = u64;

/// Purchase identifier
pub type PurchaseId = u64;

/// Withdrawal identifier
pub type WithdrawalId = u64;

/// Report identifier
pub type ReportId = u64;

/// Verification request identifier
pub type VerificationId = u64;

/// Admin decision on a pending withdrawal or verification request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    Approve,
    Reject,
}
