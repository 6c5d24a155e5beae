//! Error types for the marketplace ledger
//!
//! This module defines all errors an engine operation can report. Every
//! engine operation is transactional: whenever one of these errors is
//! returned, the entity store is exactly as it was before the call.
//!
//! # Error Categories
//!
//! - **Validation**: malformed or out-of-range input (amount, price, rating)
//! - **Not found**: a referenced entity is absent
//! - **Insufficient funds**: a debit would drive a balance negative
//! - **Invalid state**: a lifecycle transition that is not allowed
//! - **Unauthorized**: banned actor, wrong role, or non-owner
//! - **Busy**: the transaction lock is contended; the caller may retry
//! - **I/O and parsing**: persistence and operation-script boundary failures

use super::user::Role;
use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the marketplace ledger
///
/// Each variant carries enough context to diagnose the rejection without
/// consulting the store again.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// A requested amount was zero or negative
    #[error("amount must be positive, got {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// A product price was outside the allowed range
    #[error("product price must be positive and at most {max}, got {price}")]
    InvalidPrice {
        /// The rejected price
        price: Decimal,
        /// Upper bound from the engine configuration
        max: Decimal,
    },

    /// A rating outside 1..=5 was submitted
    #[error("rating must be between 1 and 5, got {rating}")]
    InvalidRating {
        /// The rejected rating
        rating: u8,
    },

    /// A user was created with a negative starting balance
    #[error("initial balance must be non-negative, got {balance}")]
    InvalidBalance {
        /// The rejected balance
        balance: Decimal,
    },

    /// A wallet address failed shape validation
    #[error("invalid wallet address '{address}'")]
    InvalidAddress {
        /// The rejected address
        address: String,
    },

    /// A referenced entity does not exist
    #[error("{entity} {id} not found")]
    NotFound {
        /// Collection name ("user", "product", ...)
        entity: String,
        /// The id that was looked up
        id: u64,
    },

    /// A debit exceeds the user's balance
    #[error("insufficient funds for user {user}: available {available}, required {required}")]
    InsufficientFunds {
        /// User being debited
        user: u64,
        /// Current balance
        available: Decimal,
        /// Amount the operation needed
        required: Decimal,
    },

    /// The product cannot be purchased (deactivated, or its seller is banned)
    #[error("product {product} is not available for purchase")]
    ProductInactive {
        /// The unavailable product
        product: u64,
    },

    /// A resolution was attempted on an already-resolved record
    #[error("{entity} {id} is not pending (current status: {status})")]
    NotPending {
        /// Collection name ("withdrawal", "verification request", "report")
        entity: String,
        /// The id being resolved
        id: u64,
        /// The record's current status
        status: String,
    },

    /// The seller already has a pending verification request
    #[error("seller {seller} already has a pending verification request")]
    AlreadyPending {
        /// The requesting seller
        seller: u64,
    },

    /// The seller is already verified
    #[error("seller {seller} is already verified")]
    AlreadyVerified {
        /// The requesting seller
        seller: u64,
    },

    /// The acting user is banned
    #[error("user {user} is banned")]
    Banned {
        /// The banned user
        user: u64,
    },

    /// The acting user does not hold the role the operation requires
    #[error("user {user} must hold the {expected:?} role (has {actual:?})")]
    WrongRole {
        /// The acting user
        user: u64,
        /// Role the operation requires
        expected: Role,
        /// Role the user actually holds
        actual: Role,
    },

    /// The acting user does not own the product
    #[error("user {user} does not own product {product}")]
    NotOwner {
        /// The acting user
        user: u64,
        /// The product in question
        product: u64,
    },

    /// The buyer has no purchase of the product (hidden link stays hidden)
    #[error("user {user} has not purchased product {product}")]
    NotPurchased {
        /// The requesting user
        user: u64,
        /// The product in question
        product: u64,
    },

    /// Configured verification thresholds are not met
    #[error("seller {seller} does not meet the verification requirements")]
    EligibilityNotMet {
        /// The requesting seller
        seller: u64,
    },

    /// A balance update would overflow
    ///
    /// The operation is rejected to keep account integrity.
    #[error("arithmetic overflow in {operation} for user {user}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// User whose balance was being updated
        user: u64,
    },

    /// The transaction lock is contended
    ///
    /// The store is untouched; retry policy belongs to the caller.
    #[error("ledger is busy, retry the operation")]
    Busy,

    /// The wallet connector did not produce an address in time
    #[error("wallet connection timed out after {timeout_ms} ms")]
    WalletTimeout {
        /// The timeout that elapsed
        timeout_ms: u64,
    },

    /// I/O failure while loading or saving a snapshot
    #[error("I/O error: {message}")]
    Io {
        /// Description of the failure
        message: String,
    },

    /// CSV parsing failure in a snapshot or operation script
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    Parse {
        /// Line number, when the reader can report one
        line: Option<u64>,
        /// Description of the failure
        message: String,
    },

    /// Unknown operation name in a script
    #[error("invalid operation '{op}'")]
    InvalidOperation {
        /// The unrecognized operation string
        op: String,
    },

    /// A script row is missing a column its operation requires
    #[error("operation '{op}' requires a {field} column")]
    MissingField {
        /// The operation being parsed
        op: String,
        /// The absent column
        field: String,
    },
}

impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::Io {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        LedgerError::Parse {
            line,
            message: error.to_string(),
        }
    }
}

// Helper constructors for the errors the engine builds in many places

impl LedgerError {
    /// Create a NotFound error
    pub fn not_found(entity: &str, id: u64) -> Self {
        LedgerError::NotFound {
            entity: entity.to_string(),
            id,
        }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(user: u64, available: Decimal, required: Decimal) -> Self {
        LedgerError::InsufficientFunds {
            user,
            available,
            required,
        }
    }

    /// Create a NotPending error from a record's current status
    pub fn not_pending(entity: &str, id: u64, status: impl std::fmt::Debug) -> Self {
        LedgerError::NotPending {
            entity: entity.to_string(),
            id,
            status: format!("{:?}", status),
        }
    }

    /// Create a WrongRole error
    pub fn wrong_role(user: u64, expected: Role, actual: Role) -> Self {
        LedgerError::WrongRole {
            user,
            expected,
            actual,
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn overflow(operation: &str, user: u64) -> Self {
        LedgerError::ArithmeticOverflow {
            operation: operation.to_string(),
            user,
        }
    }

    /// Create a MissingField error
    pub fn missing_field(op: &str, field: &str) -> Self {
        LedgerError::MissingField {
            op: op.to_string(),
            field: field.to_string(),
        }
    }
}
