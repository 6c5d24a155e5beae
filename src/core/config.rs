//! Engine configuration

use rust_decimal::Decimal;

/// Eligibility thresholds for seller verification
///
/// The original UI displays thresholds like these as advisory text without
/// enforcing them. Whether they bind is a configuration decision: leave
/// `EngineConfig::verification_thresholds` unset to keep them advisory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerificationThresholds {
    /// Minimum number of active products the seller must have listed
    pub min_products: usize,
    /// Minimum number of completed sales
    pub min_sales: usize,
    /// Minimum average rating across the seller's rated sales
    ///
    /// A seller with no rated sales has an average of zero for this check.
    pub min_rating: Decimal,
}

/// Configuration for the ledger engine
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Fixed platform surcharge added to every purchase
    pub fee: Decimal,

    /// Upper bound on product prices
    pub max_price: Decimal,

    /// Verification eligibility thresholds; None leaves them advisory
    pub verification_thresholds: Option<VerificationThresholds>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            // 0.1 currency units, credited to the platform balance
            fee: Decimal::new(1, 1),
            max_price: Decimal::new(1000, 0),
            verification_thresholds: None,
        }
    }
}
