//! Ledger transaction engine
//!
//! This module provides the `LedgerEngine`, the only component allowed to
//! mutate the entity store. It implements the money- and state-moving
//! operations (purchase, withdrawal lifecycle, verification workflow,
//! moderation, rating submission) as all-or-nothing units.
//!
//! # Transactional discipline
//!
//! Every operation follows the same shape: acquire the transaction lock,
//! read snapshots, validate every precondition, and only then write. All
//! fallible work happens before the first write, so a rejected operation
//! leaves the store exactly as it was.
//!
//! # Isolation
//!
//! A single global transaction mutex serializes the read-validate-commit
//! cycles (sufficient at this contention level; see `begin`). Acquisition
//! is non-blocking: a contended lock fails fast with `LedgerError::Busy`
//! instead of queueing, and retry policy belongs to the caller.

use crate::core::config::EngineConfig;
use crate::core::ids::IdGenerator;
use crate::core::ratings;
use crate::store::EntityStore;
use crate::types::{
    Decision, LedgerError, NewProduct, Product, ProductId, Purchase, PurchaseId, Report,
    ReportDecision, ReportId, ReportReason, ReportStatus, RequestStatus, Role, User, UserId,
    VerificationId, VerificationRequest, VerificationStatus, Withdrawal, WithdrawalId,
    WithdrawalStatus,
};
use crate::wallet;
use rust_decimal::Decimal;
use std::sync::{Arc, Mutex, MutexGuard, TryLockError};
use tracing::debug;

/// The marketplace transaction engine
///
/// Owns the id generator and the transaction lock; shares the entity store
/// with the persistence layer via `Arc`.
pub struct LedgerEngine {
    store: Arc<EntityStore>,
    ids: IdGenerator,
    config: EngineConfig,
    tx_lock: Mutex<()>,
}

impl LedgerEngine {
    /// Create an engine over the given store with the default configuration
    pub fn new(store: Arc<EntityStore>) -> Self {
        Self::with_config(store, EngineConfig::default())
    }

    /// Create an engine with an explicit configuration
    pub fn with_config(store: Arc<EntityStore>, config: EngineConfig) -> Self {
        LedgerEngine {
            store,
            ids: IdGenerator::new(),
            config,
            tx_lock: Mutex::new(()),
        }
    }

    /// The shared entity store
    pub fn store(&self) -> &Arc<EntityStore> {
        &self.store
    }

    /// Reseed the id generator above the largest id in the store
    ///
    /// Must be called after loading a snapshot so new entities never reuse
    /// persisted ids.
    pub fn reseed_ids(&self) {
        self.ids.seed_above(self.store.max_id());
    }

    /// Acquire the transaction lock without blocking
    ///
    /// Serializes every read-validate-commit cycle. Contention surfaces as
    /// `LedgerError::Busy` rather than an unbounded wait.
    fn begin(&self) -> Result<MutexGuard<'_, ()>, LedgerError> {
        match self.tx_lock.try_lock() {
            Ok(guard) => Ok(guard),
            Err(TryLockError::Poisoned(poisoned)) => Ok(poisoned.into_inner()),
            Err(TryLockError::WouldBlock) => Err(LedgerError::Busy),
        }
    }

    // ----- users -----

    /// Create a user with the given role and starting balance
    ///
    /// # Errors
    ///
    /// Returns `InvalidBalance` if the starting balance is negative.
    pub fn create_user(&self, role: Role, initial_balance: Decimal) -> Result<User, LedgerError> {
        let _guard = self.begin()?;
        self.create_user_locked(role, initial_balance)
    }

    fn create_user_locked(
        &self,
        role: Role,
        initial_balance: Decimal,
    ) -> Result<User, LedgerError> {
        if initial_balance < Decimal::ZERO {
            return Err(LedgerError::InvalidBalance {
                balance: initial_balance,
            });
        }

        let user = User::new(self.ids.next(), role, initial_balance);
        self.store.users.upsert(user.clone());
        debug!(user = user.id, role = ?role, "user created");
        Ok(user)
    }

    /// Attach a wallet address produced by the wallet connector
    ///
    /// The connection protocol is outside the ledger; by the time the
    /// address arrives here it is plain data, validated for shape only.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAddress` for a malformed address and `NotFound` for
    /// an unknown user.
    pub fn attach_wallet(&self, user_id: UserId, address: String) -> Result<User, LedgerError> {
        let _guard = self.begin()?;

        if !wallet::is_valid_address(&address) {
            return Err(LedgerError::InvalidAddress { address });
        }
        let mut user = self
            .store
            .users
            .find(user_id)
            .ok_or_else(|| LedgerError::not_found("user", user_id))?;

        user.wallet_address = Some(address);
        self.store.users.upsert(user.clone());
        Ok(user)
    }

    // ----- products -----

    /// Create a product listing owned by a seller
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown seller, `WrongRole` if the user is
    /// not a seller, `Banned` for a banned seller, and `InvalidPrice` for a
    /// price outside `(0, max_price]`.
    pub fn create_product(
        &self,
        seller_id: UserId,
        listing: NewProduct,
    ) -> Result<Product, LedgerError> {
        let _guard = self.begin()?;
        self.create_product_locked(seller_id, listing)
    }

    fn create_product_locked(
        &self,
        seller_id: UserId,
        listing: NewProduct,
    ) -> Result<Product, LedgerError> {
        let seller = self.seller(seller_id)?;
        if listing.price <= Decimal::ZERO || listing.price > self.config.max_price {
            return Err(LedgerError::InvalidPrice {
                price: listing.price,
                max: self.config.max_price,
            });
        }

        let product = Product::new(self.ids.next(), seller.id, listing);
        self.store.products.upsert(product.clone());
        debug!(product = product.id, seller = seller_id, "product created");
        Ok(product)
    }

    /// Activate or deactivate a product listing
    ///
    /// Only the owning seller may flip the flag, and a banned seller cannot
    /// (the ban cascade deactivated the listing; it stays that way).
    pub fn set_product_active(
        &self,
        seller_id: UserId,
        product_id: ProductId,
        active: bool,
    ) -> Result<Product, LedgerError> {
        let _guard = self.begin()?;

        let mut product = self
            .store
            .products
            .find(product_id)
            .ok_or_else(|| LedgerError::not_found("product", product_id))?;
        if product.seller_id != seller_id {
            return Err(LedgerError::NotOwner {
                user: seller_id,
                product: product_id,
            });
        }
        let seller = self
            .store
            .users
            .find(seller_id)
            .ok_or_else(|| LedgerError::not_found("user", seller_id))?;
        if seller.is_banned {
            return Err(LedgerError::Banned { user: seller_id });
        }

        product.is_active = active;
        self.store.products.upsert(product.clone());
        Ok(product)
    }

    // ----- purchases -----

    /// Purchase a product
    ///
    /// Atomically debits the buyer by `price + fee`, credits the seller by
    /// `price`, credits the platform by `fee`, and appends a purchase
    /// record with the price snapshotted. Self-purchase is permitted; the
    /// net effect on the single account is `-fee`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown buyer or product,
    /// `ProductInactive` for a deactivated product or a banned seller
    /// (banned sellers never receive purchase credits), `Banned` for a
    /// banned buyer, and `InsufficientFunds` when the buyer cannot cover
    /// `price + fee`.
    pub fn purchase(
        &self,
        buyer_id: UserId,
        product_id: ProductId,
    ) -> Result<Purchase, LedgerError> {
        let _guard = self.begin()?;

        let product = self
            .store
            .products
            .find(product_id)
            .ok_or_else(|| LedgerError::not_found("product", product_id))?;
        if !product.is_active {
            return Err(LedgerError::ProductInactive {
                product: product_id,
            });
        }

        let mut users = self.store.users.snapshot();
        let buyer = users
            .get(&buyer_id)
            .ok_or_else(|| LedgerError::not_found("user", buyer_id))?
            .clone();
        if buyer.is_banned {
            return Err(LedgerError::Banned { user: buyer_id });
        }
        let seller = users
            .get(&product.seller_id)
            .ok_or_else(|| LedgerError::not_found("user", product.seller_id))?;
        // Ban state is re-checked here, not just is_active: a banned seller
        // must never receive purchase credits
        if seller.is_banned {
            return Err(LedgerError::ProductInactive {
                product: product_id,
            });
        }

        let total = product
            .price
            .checked_add(self.config.fee)
            .ok_or_else(|| LedgerError::overflow("purchase", buyer_id))?;
        if buyer.balance < total {
            return Err(LedgerError::insufficient_funds(
                buyer_id,
                buyer.balance,
                total,
            ));
        }

        // Stage both balance changes on the keyed snapshot; mutating the
        // map handles self-purchase (one entry, net -fee) correctly
        if let Some(b) = users.get_mut(&buyer_id) {
            b.balance = b
                .balance
                .checked_sub(total)
                .ok_or_else(|| LedgerError::overflow("purchase", buyer_id))?;
        }
        if let Some(s) = users.get_mut(&product.seller_id) {
            s.balance = s
                .balance
                .checked_add(product.price)
                .ok_or_else(|| LedgerError::overflow("purchase", product.seller_id))?;
        }
        let platform = self
            .store
            .platform_balance()
            .checked_add(self.config.fee)
            .ok_or_else(|| LedgerError::overflow("purchase", buyer_id))?;

        let purchase = Purchase::new(
            self.ids.next(),
            buyer_id,
            product_id,
            product.seller_id,
            product.price,
        );

        self.store.users.put(users.into_values());
        self.store.set_platform_balance(platform);
        self.store.purchases.upsert(purchase.clone());
        debug!(
            purchase = purchase.id,
            buyer = buyer_id,
            product = product_id,
            price = %purchase.price_paid,
            "purchase committed"
        );
        Ok(purchase)
    }

    /// The delivery payload of a product, disclosed only to its buyers
    ///
    /// # Errors
    ///
    /// Returns `NotPurchased` if the user holds no purchase of the product.
    pub fn hidden_link(
        &self,
        buyer_id: UserId,
        product_id: ProductId,
    ) -> Result<String, LedgerError> {
        let owned = self
            .store
            .purchases
            .get()
            .iter()
            .any(|p| p.buyer_id == buyer_id && p.product_id == product_id);
        if !owned {
            return Err(LedgerError::NotPurchased {
                user: buyer_id,
                product: product_id,
            });
        }
        let product = self
            .store
            .products
            .find(product_id)
            .ok_or_else(|| LedgerError::not_found("product", product_id))?;
        Ok(product.hidden_link)
    }

    // ----- withdrawals -----

    /// Request a withdrawal, escrowing the amount
    ///
    /// The amount leaves the seller's balance immediately; resolution
    /// either restores it (reject) or leaves it disbursed (approve).
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` for a non-positive amount, `NotFound` /
    /// `WrongRole` / `Banned` for actor problems, and `InsufficientFunds`
    /// when the balance cannot cover the amount.
    pub fn request_withdrawal(
        &self,
        seller_id: UserId,
        amount: Decimal,
    ) -> Result<Withdrawal, LedgerError> {
        let _guard = self.begin()?;

        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount { amount });
        }
        let mut seller = self.seller(seller_id)?;
        if seller.balance < amount {
            return Err(LedgerError::insufficient_funds(
                seller_id,
                seller.balance,
                amount,
            ));
        }

        seller.balance = seller
            .balance
            .checked_sub(amount)
            .ok_or_else(|| LedgerError::overflow("withdrawal request", seller_id))?;
        let withdrawal = Withdrawal::new(self.ids.next(), seller_id, amount);

        self.store.users.upsert(seller);
        self.store.withdrawals.upsert(withdrawal.clone());
        debug!(
            withdrawal = withdrawal.id,
            seller = seller_id,
            amount = %amount,
            "withdrawal requested"
        );
        Ok(withdrawal)
    }

    /// Resolve a pending withdrawal
    ///
    /// Approval leaves balances as-is (the funds are considered disbursed
    /// externally). Rejection credits the escrowed amount back, unless the
    /// seller was banned in the meantime: ban forfeiture has no refund
    /// path, so the amount stays removed.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown withdrawal and `NotPending` when
    /// it was already resolved; a second resolution never mutates state.
    pub fn resolve_withdrawal(
        &self,
        withdrawal_id: WithdrawalId,
        decision: Decision,
    ) -> Result<Withdrawal, LedgerError> {
        let _guard = self.begin()?;

        let mut withdrawal = self
            .store
            .withdrawals
            .find(withdrawal_id)
            .ok_or_else(|| LedgerError::not_found("withdrawal", withdrawal_id))?;
        if withdrawal.status != WithdrawalStatus::Pending {
            return Err(LedgerError::not_pending(
                "withdrawal",
                withdrawal_id,
                withdrawal.status,
            ));
        }

        match decision {
            Decision::Approve => {
                withdrawal.status = WithdrawalStatus::Approved;
                self.store.withdrawals.upsert(withdrawal.clone());
            }
            Decision::Reject => {
                let mut seller = self
                    .store
                    .users
                    .find(withdrawal.seller_id)
                    .ok_or_else(|| LedgerError::not_found("user", withdrawal.seller_id))?;
                let refund = if seller.is_banned {
                    None
                } else {
                    Some(
                        seller
                            .balance
                            .checked_add(withdrawal.amount)
                            .ok_or_else(|| {
                                LedgerError::overflow("withdrawal reject", seller.id)
                            })?,
                    )
                };

                withdrawal.status = WithdrawalStatus::Rejected;
                if let Some(balance) = refund {
                    seller.balance = balance;
                    self.store.users.upsert(seller);
                }
                self.store.withdrawals.upsert(withdrawal.clone());
            }
        }
        debug!(
            withdrawal = withdrawal_id,
            decision = ?decision,
            "withdrawal resolved"
        );
        Ok(withdrawal)
    }

    // ----- verification -----

    /// Request seller verification
    ///
    /// Allowed only for an unverified seller with no pending request; the
    /// seller's status moves to Pending alongside the new request.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyVerified` / `AlreadyPending` on state conflicts and
    /// `EligibilityNotMet` when configured thresholds are not satisfied.
    pub fn request_verification(
        &self,
        seller_id: UserId,
    ) -> Result<VerificationRequest, LedgerError> {
        let _guard = self.begin()?;

        let mut seller = self.seller(seller_id)?;
        match seller.verification_status {
            VerificationStatus::Verified => {
                return Err(LedgerError::AlreadyVerified { seller: seller_id })
            }
            VerificationStatus::Pending => {
                return Err(LedgerError::AlreadyPending { seller: seller_id })
            }
            VerificationStatus::Unverified => {}
        }
        let has_pending = self
            .store
            .verifications
            .get()
            .iter()
            .any(|r| r.seller_id == seller_id && r.status == RequestStatus::Pending);
        if has_pending {
            return Err(LedgerError::AlreadyPending { seller: seller_id });
        }

        if let Some(thresholds) = self.config.verification_thresholds {
            // Deactivated listings don't count toward the product minimum
            let active_products = self
                .products_by_seller(seller_id)
                .iter()
                .filter(|p| p.is_active)
                .count();
            let sales = self.purchases_by_seller(seller_id);
            let ratings: Vec<u8> = sales.iter().filter_map(|p| p.user_rating).collect();
            let average = if ratings.is_empty() {
                Decimal::ZERO
            } else {
                let sum: u64 = ratings.iter().map(|&r| u64::from(r)).sum();
                Decimal::from(sum) / Decimal::from(ratings.len() as u64)
            };
            if active_products < thresholds.min_products
                || sales.len() < thresholds.min_sales
                || average < thresholds.min_rating
            {
                return Err(LedgerError::EligibilityNotMet { seller: seller_id });
            }
        }

        let request = VerificationRequest::new(self.ids.next(), seller_id);
        seller.verification_status = VerificationStatus::Pending;

        self.store.users.upsert(seller);
        self.store.verifications.upsert(request.clone());
        debug!(request = request.id, seller = seller_id, "verification requested");
        Ok(request)
    }

    /// Resolve a pending verification request
    ///
    /// Approval marks the seller Verified; rejection returns the seller to
    /// Unverified so a re-request is possible.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown request and `NotPending` when it
    /// was already resolved.
    pub fn resolve_verification(
        &self,
        request_id: VerificationId,
        decision: Decision,
    ) -> Result<VerificationRequest, LedgerError> {
        let _guard = self.begin()?;

        let mut request = self
            .store
            .verifications
            .find(request_id)
            .ok_or_else(|| LedgerError::not_found("verification request", request_id))?;
        if request.status != RequestStatus::Pending {
            return Err(LedgerError::not_pending(
                "verification request",
                request_id,
                request.status,
            ));
        }
        let mut seller = self
            .store
            .users
            .find(request.seller_id)
            .ok_or_else(|| LedgerError::not_found("user", request.seller_id))?;

        match decision {
            Decision::Approve => {
                request.status = RequestStatus::Approved;
                seller.verification_status = VerificationStatus::Verified;
            }
            Decision::Reject => {
                request.status = RequestStatus::Rejected;
                seller.verification_status = VerificationStatus::Unverified;
            }
        }

        self.store.users.upsert(seller);
        self.store.verifications.upsert(request.clone());
        debug!(request = request_id, decision = ?decision, "verification resolved");
        Ok(request)
    }

    // ----- moderation -----

    /// File a report against a product
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown reporter or product and `Banned`
    /// for a banned reporter.
    pub fn create_report(
        &self,
        reporter_id: UserId,
        product_id: ProductId,
        reason: ReportReason,
        description: String,
    ) -> Result<Report, LedgerError> {
        let _guard = self.begin()?;

        let reporter = self
            .store
            .users
            .find(reporter_id)
            .ok_or_else(|| LedgerError::not_found("user", reporter_id))?;
        if reporter.is_banned {
            return Err(LedgerError::Banned { user: reporter_id });
        }
        if self.store.products.find(product_id).is_none() {
            return Err(LedgerError::not_found("product", product_id));
        }

        let report = Report::new(self.ids.next(), reporter_id, product_id, reason, description);
        self.store.reports.upsert(report.clone());
        debug!(report = report.id, product = product_id, "report filed");
        Ok(report)
    }

    /// Resolve a pending report
    ///
    /// Rejection only marks the report resolved. Confirmation runs the ban
    /// cascade as one unit: the reported product's seller is banned and
    /// their balance forfeited to zero, every product they own is
    /// deactivated, and the report is marked resolved — all three commit
    /// together or not at all.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown report and `NotPending` when it
    /// was already resolved.
    pub fn resolve_report(
        &self,
        report_id: ReportId,
        decision: ReportDecision,
    ) -> Result<Report, LedgerError> {
        let _guard = self.begin()?;

        let mut report = self
            .store
            .reports
            .find(report_id)
            .ok_or_else(|| LedgerError::not_found("report", report_id))?;
        if report.status != ReportStatus::Pending {
            return Err(LedgerError::not_pending("report", report_id, report.status));
        }

        match decision {
            ReportDecision::Reject => {
                report.status = ReportStatus::Resolved;
                self.store.reports.upsert(report.clone());
            }
            ReportDecision::ConfirmBan => {
                let product = self
                    .store
                    .products
                    .find(report.product_id)
                    .ok_or_else(|| LedgerError::not_found("product", report.product_id))?;
                let seller_id = product.seller_id;

                let mut users = self.store.users.snapshot();
                let seller = users
                    .get_mut(&seller_id)
                    .ok_or_else(|| LedgerError::not_found("user", seller_id))?;
                seller.is_banned = true;
                seller.balance = Decimal::ZERO;

                let mut products = self.store.products.snapshot();
                for product in products.values_mut() {
                    if product.seller_id == seller_id {
                        product.is_active = false;
                    }
                }

                report.status = ReportStatus::Resolved;

                self.store.users.put(users.into_values());
                self.store.products.put(products.into_values());
                self.store.reports.upsert(report.clone());
                debug!(report = report_id, seller = seller_id, "seller banned");
            }
        }
        Ok(report)
    }

    // ----- ratings -----

    /// Submit a rating for a purchase
    ///
    /// Sets the purchase's rating (re-submission overwrites), then
    /// recomputes the product's average and count from the full current
    /// set of rated purchases.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRating` outside 1..=5 and `NotFound` for an unknown
    /// purchase.
    pub fn submit_rating(
        &self,
        purchase_id: PurchaseId,
        rating: u8,
    ) -> Result<Purchase, LedgerError> {
        let _guard = self.begin()?;

        if !(1..=5).contains(&rating) {
            return Err(LedgerError::InvalidRating { rating });
        }
        let mut purchases = self.store.purchases.snapshot();
        let purchase = purchases
            .get_mut(&purchase_id)
            .ok_or_else(|| LedgerError::not_found("purchase", purchase_id))?;
        purchase.user_rating = Some(rating);
        let updated = purchase.clone();

        let mut product = self
            .store
            .products
            .find(updated.product_id)
            .ok_or_else(|| LedgerError::not_found("product", updated.product_id))?;
        let (average, count) = ratings::recompute(purchases.values(), updated.product_id);
        product.average_rating = average;
        product.total_ratings = count;

        self.store.purchases.put(purchases.into_values());
        self.store.products.upsert(product);
        debug!(
            purchase = purchase_id,
            rating,
            average = %average,
            "rating submitted"
        );
        Ok(updated)
    }

    // ----- queries -----

    /// Current platform balance (accumulated fees)
    pub fn platform_balance(&self) -> Decimal {
        self.store.platform_balance()
    }

    /// All purchases made by a buyer, ascending by id
    pub fn purchases_by_buyer(&self, buyer_id: UserId) -> Vec<Purchase> {
        self.store
            .purchases
            .get()
            .into_iter()
            .filter(|p| p.buyer_id == buyer_id)
            .collect()
    }

    /// All sales of a seller, ascending by id
    pub fn purchases_by_seller(&self, seller_id: UserId) -> Vec<Purchase> {
        self.store
            .purchases
            .get()
            .into_iter()
            .filter(|p| p.seller_id == seller_id)
            .collect()
    }

    /// All products owned by a seller, ascending by id
    pub fn products_by_seller(&self, seller_id: UserId) -> Vec<Product> {
        self.store
            .products
            .get()
            .into_iter()
            .filter(|p| p.seller_id == seller_id)
            .collect()
    }

    /// Total traded volume (sum of prices paid, exclusive of fees)
    pub fn total_volume(&self) -> Decimal {
        self.store
            .purchases
            .get()
            .iter()
            .map(|p| p.price_paid)
            .sum()
    }

    /// Number of registered users
    pub fn total_users(&self) -> usize {
        self.store.users.len()
    }

    // ----- initialization -----

    /// Clear the store for a fresh start
    ///
    /// Issued ids keep climbing; the uniqueness contract spans the whole
    /// process lifetime.
    pub fn reset(&self) -> Result<(), LedgerError> {
        let _guard = self.begin()?;
        self.store.reset();
        Ok(())
    }

    /// Populate the store with the demo data set
    ///
    /// One funded buyer, one verified seller with two active listings —
    /// the original application's demo seed.
    pub fn seed_demo_data(&self) -> Result<(), LedgerError> {
        let _guard = self.begin()?;

        let buyer = self.create_user_locked(Role::Buyer, Decimal::new(50, 0))?;
        let mut seller = self.create_user_locked(Role::Seller, Decimal::new(255, 1))?;
        seller.verification_status = VerificationStatus::Verified;
        self.store.users.upsert(seller.clone());

        self.create_product_locked(
            seller.id,
            NewProduct {
                title: "Complete React Guide".to_string(),
                description: "Comprehensive React tutorial with TypeScript".to_string(),
                price: Decimal::new(15, 0),
                category: crate::types::ProductCategory::Tutorials,
                hidden_link: "https://example.com/react-guide-secret".to_string(),
            },
        )?;
        self.create_product_locked(
            seller.id,
            NewProduct {
                title: "UI Design Assets Pack".to_string(),
                description: "Premium UI components and icons".to_string(),
                price: Decimal::new(25, 0),
                category: crate::types::ProductCategory::Assets,
                hidden_link: "https://example.com/ui-assets-secret".to_string(),
            },
        )?;

        debug!(buyer = buyer.id, seller = seller.id, "demo data seeded");
        Ok(())
    }

    // ----- shared validation -----

    /// Look up a user and require an unbanned seller
    fn seller(&self, seller_id: UserId) -> Result<User, LedgerError> {
        let user = self
            .store
            .users
            .find(seller_id)
            .ok_or_else(|| LedgerError::not_found("user", seller_id))?;
        if user.role != Role::Seller {
            return Err(LedgerError::wrong_role(seller_id, Role::Seller, user.role));
        }
        if user.is_banned {
            return Err(LedgerError::Banned { user: seller_id });
        }
        Ok(user)
    }
}
