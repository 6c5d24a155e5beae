//! Product listing types

use super::{ProductId, UserId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Digital-goods product category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductCategory {
    Ebooks,
    Tutorials,
    Assets,
    Software,
    Other,
}

/// A product listing owned by a seller
///
/// `average_rating` and `total_ratings` are owned exclusively by the rating
/// aggregation module: they are always recomputed from the full set of rated
/// purchases, never adjusted incrementally. `is_active` is mutable by the
/// owning seller and forced to false for every product of a banned seller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product id
    pub id: ProductId,

    /// Owning seller
    pub seller_id: UserId,

    /// Listing title
    pub title: String,

    /// Listing description
    pub description: String,

    /// Price in platform currency units, always positive
    pub price: Decimal,

    /// Product category
    pub category: ProductCategory,

    /// Delivery payload, disclosed to a buyer only after purchase
    pub hidden_link: String,

    /// Mean of all submitted ratings, rounded to one decimal, in [0, 5]
    pub average_rating: Decimal,

    /// Number of purchases with a rating submitted
    pub total_ratings: u32,

    /// Whether the product can currently be purchased
    pub is_active: bool,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied fields for a new product listing
///
/// The engine fills in the id, rating fields, active flag and timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub category: ProductCategory,
    pub hidden_link: String,
}

impl Product {
    /// Create an active, unrated product from caller-supplied fields
    pub fn new(id: ProductId, seller_id: UserId, listing: NewProduct) -> Self {
        Product {
            id,
            seller_id,
            title: listing.title,
            description: listing.description,
            price: listing.price,
            category: listing.category,
            hidden_link: listing.hidden_link,
            average_rating: Decimal::ZERO,
            total_ratings: 0,
            is_active: true,
            created_at: Utc::now(),
        }
    }
}
