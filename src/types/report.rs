//! Moderation report types

use super::{ProductId, ReportId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reason a product was reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportReason {
    Scam,
    Spam,
    Inappropriate,
    Fake,
    Other,
}

/// Report lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportStatus {
    Pending,
    Resolved,
}

/// Admin decision on a pending report
///
/// `ConfirmBan` triggers the full moderation cascade: ban the product's
/// seller, zero their balance, deactivate every product they own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportDecision {
    Reject,
    ConfirmBan,
}

/// A user-filed report against a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Unique report id
    pub id: ReportId,

    /// User who filed the report
    pub reporter_id: UserId,

    /// Product being reported
    pub product_id: ProductId,

    /// Reason category
    pub reason: ReportReason,

    /// Free-form description
    pub description: String,

    /// Current lifecycle state
    pub status: ReportStatus,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Report {
    /// Create a pending report
    pub fn new(
        id: ReportId,
        reporter_id: UserId,
        product_id: ProductId,
        reason: ReportReason,
        description: String,
    ) -> Self {
        Report {
            id,
            reporter_id,
            product_id,
            reason,
            description,
            status: ReportStatus::Pending,
            created_at: Utc::now(),
        }
    }
}
