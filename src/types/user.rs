//! User account types
//!
//! This module defines the User entity and its role and verification status
//! enums. Users are created on registration (or by the demo seed), mutated
//! only by the ledger engine, and never deleted.

use super::UserId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Role a user acts under
///
/// The role is supplied by the identity provider at the call boundary, but
/// the engine re-validates it (together with ban state) on every operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Buyer,
    Seller,
    Admin,
}

/// Seller verification lifecycle state
///
/// Unverified -> Pending -> Verified, with Pending falling back to
/// Unverified when an admin rejects the request (re-requesting is allowed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationStatus {
    Unverified,
    Pending,
    Verified,
}

/// A marketplace user account
///
/// Holds the single source of truth for a user's spendable balance.
/// The balance is never negative after a committed transaction; a banned
/// seller always has a zero balance (forfeiture, no refund path).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique user id, issued by the engine's id generator
    pub id: UserId,

    /// Role the user registered with
    pub role: Role,

    /// Spendable balance in platform currency units
    pub balance: Decimal,

    /// Wallet address supplied by the wallet connector, if attached
    pub wallet_address: Option<String>,

    /// Current seller verification state
    pub verification_status: VerificationStatus,

    /// Whether moderation has banned this user
    ///
    /// Set only by the report-confirmation cascade. A banned seller has all
    /// owned products deactivated and cannot receive purchase credits.
    pub is_banned: bool,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new, unbanned, unverified user with the given balance
    pub fn new(id: UserId, role: Role, balance: Decimal) -> Self {
        User {
            id,
            role,
            balance,
            wallet_address: None,
            verification_status: VerificationStatus::Unverified,
            is_banned: false,
            created_at: Utc::now(),
        }
    }
}
