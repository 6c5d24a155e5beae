//! Seller verification request types

use super::{UserId, VerificationId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Verification request lifecycle state
///
/// Pending -> Approved | Rejected; both resolved states are terminal.
/// At most one pending request exists per seller at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

/// A seller's request for verified status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationRequest {
    /// Unique request id
    pub id: VerificationId,

    /// Requesting seller
    pub seller_id: UserId,

    /// Current lifecycle state
    pub status: RequestStatus,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl VerificationRequest {
    /// Create a pending verification request
    pub fn new(id: VerificationId, seller_id: UserId) -> Self {
        VerificationRequest {
            id,
            seller_id,
            status: RequestStatus::Pending,
            created_at: Utc::now(),
        }
    }
}
