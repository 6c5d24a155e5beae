//! Purchase record types

use super::{ProductId, PurchaseId, UserId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A committed purchase of a product
///
/// Created only by a successful purchase transaction and never deleted.
/// `price_paid` snapshots the product price at purchase time and is immutable
/// afterwards, so later price changes don't rewrite history. The seller id is
/// denormalized at creation time for the same reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    /// Unique purchase id
    pub id: PurchaseId,

    /// Buyer who was debited
    pub buyer_id: UserId,

    /// Product that was bought
    pub product_id: ProductId,

    /// Seller who was credited (snapshot at purchase time)
    pub seller_id: UserId,

    /// Product price at purchase time, exclusive of the platform fee
    pub price_paid: Decimal,

    /// Rating submitted by the buyer, 1..=5
    ///
    /// Settable through the rating operation; re-submission overwrites.
    pub user_rating: Option<u8>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Purchase {
    /// Create an unrated purchase record
    pub fn new(id: PurchaseId, buyer_id: UserId, product_id: ProductId, seller_id: UserId, price_paid: Decimal) -> Self {
        Purchase {
            id,
            buyer_id,
            product_id,
            seller_id,
            price_paid,
            user_rating: None,
            created_at: Utc::now(),
        }
    }
}
