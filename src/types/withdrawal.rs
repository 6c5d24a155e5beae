//! Withdrawal request types

use super::{UserId, WithdrawalId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Withdrawal lifecycle state
///
/// Pending -> Approved | Rejected; both resolved states are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WithdrawalStatus {
    Pending,
    Approved,
    Rejected,
}

/// A seller's request to withdraw funds
///
/// The requested amount is escrowed (deducted from the seller's balance) at
/// request time. Rejection restores it; approval leaves it permanently
/// removed from the system, the funds being considered disbursed externally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Withdrawal {
    /// Unique withdrawal id
    pub id: WithdrawalId,

    /// Requesting seller
    pub seller_id: UserId,

    /// Escrowed amount, always positive
    pub amount: Decimal,

    /// Current lifecycle state
    pub status: WithdrawalStatus,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Withdrawal {
    /// Create a pending withdrawal for an already-escrowed amount
    pub fn new(id: WithdrawalId, seller_id: UserId, amount: Decimal) -> Self {
        Withdrawal {
            id,
            seller_id,
            amount,
            status: WithdrawalStatus::Pending,
            created_at: Utc::now(),
        }
    }
}
