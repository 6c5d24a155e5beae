//! Snapshot persistence for the entity store
//!
//! The `Repository` trait abstracts the durable medium behind the store:
//! load a snapshot into it at startup, save one on demand. The ledger makes
//! no assumption about what backs it (files here, but an embedded database
//! or remote store fit the same contract).
//!
//! `CsvRepository` persists one CSV file per collection plus a small meta
//! file for the platform balance and the session pointer. `Decimal` values
//! serialize as exact decimal strings, so balances round-trip without
//! losing precision.

use crate::session::SessionStore;
use crate::store::{Collection, EntityStore, Stored};
use crate::types::LedgerError;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Snapshot persistence capability for the entity store
pub trait Repository {
    /// Replace the store's contents with the last saved snapshot
    ///
    /// A missing snapshot is not an error; the affected collections are
    /// simply left empty.
    fn load(&self, store: &EntityStore, session: &SessionStore) -> Result<(), LedgerError>;

    /// Write the store's current contents as a snapshot
    fn save(&self, store: &EntityStore, session: &SessionStore) -> Result<(), LedgerError>;
}

/// Key/value row of the meta file
#[derive(Debug, Serialize, Deserialize)]
struct MetaRow {
    key: String,
    value: String,
}

/// CSV-file-per-collection snapshot repository
pub struct CsvRepository {
    dir: PathBuf,
}

impl CsvRepository {
    /// Create a repository rooted at the given directory
    ///
    /// The directory is created on the first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        CsvRepository { dir: dir.into() }
    }

    fn collection_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", name))
    }

    fn meta_path(&self) -> PathBuf {
        self.dir.join("meta.csv")
    }

    fn save_collection<T>(&self, collection: &Collection<T>) -> Result<(), LedgerError>
    where
        T: Stored + Serialize,
    {
        let mut writer = csv::Writer::from_path(self.collection_path(T::COLLECTION))?;
        for record in collection.get() {
            writer.serialize(record)?;
        }
        writer.flush()?;
        Ok(())
    }

    fn load_collection<T>(&self, collection: &Collection<T>) -> Result<(), LedgerError>
    where
        T: Stored + DeserializeOwned,
    {
        let path = self.collection_path(T::COLLECTION);
        if !path.exists() {
            collection.put(Vec::new());
            return Ok(());
        }

        let mut reader = csv::Reader::from_path(&path)?;
        let mut records: Vec<T> = Vec::new();
        for result in reader.deserialize() {
            records.push(result?);
        }
        collection.put(records);
        Ok(())
    }

    fn save_meta(&self, store: &EntityStore, session: &SessionStore) -> Result<(), LedgerError> {
        let mut writer = csv::Writer::from_path(self.meta_path())?;
        writer.serialize(MetaRow {
            key: "platform_balance".to_string(),
            value: store.platform_balance().to_string(),
        })?;
        if let Some(user_id) = session.current() {
            writer.serialize(MetaRow {
                key: "current_user".to_string(),
                value: user_id.to_string(),
            })?;
        }
        writer.flush()?;
        Ok(())
    }

    fn load_meta(&self, store: &EntityStore, session: &SessionStore) -> Result<(), LedgerError> {
        let path = self.meta_path();
        store.set_platform_balance(Decimal::ZERO);
        session.clear();
        if !path.exists() {
            return Ok(());
        }

        let mut reader = csv::Reader::from_path(&path)?;
        for result in reader.deserialize() {
            let row: MetaRow = result?;
            match row.key.as_str() {
                "platform_balance" => {
                    let balance = Decimal::from_str(&row.value).map_err(|e| LedgerError::Parse {
                        line: None,
                        message: format!("invalid platform balance '{}': {}", row.value, e),
                    })?;
                    store.set_platform_balance(balance);
                }
                "current_user" => {
                    let user_id = row.value.parse().map_err(|e| LedgerError::Parse {
                        line: None,
                        message: format!("invalid current user '{}': {}", row.value, e),
                    })?;
                    session.set_current(user_id);
                }
                // Unknown keys are ignored so older snapshots keep loading
                _ => {}
            }
        }
        Ok(())
    }
}

impl Repository for CsvRepository {
    fn load(&self, store: &EntityStore, session: &SessionStore) -> Result<(), LedgerError> {
        self.load_collection(&store.users)?;
        self.load_collection(&store.products)?;
        self.load_collection(&store.purchases)?;
        self.load_collection(&store.withdrawals)?;
        self.load_collection(&store.reports)?;
        self.load_collection(&store.verifications)?;
        self.load_meta(store, session)?;
        Ok(())
    }

    fn save(&self, store: &EntityStore, session: &SessionStore) -> Result<(), LedgerError> {
        std::fs::create_dir_all(&self.dir)?;
        self.save_collection(&store.users)?;
        self.save_collection(&store.products)?;
        self.save_collection(&store.purchases)?;
        self.save_collection(&store.withdrawals)?;
        self.save_collection(&store.reports)?;
        self.save_collection(&store.verifications)?;
        self.save_meta(store, session)?;
        Ok(())
    }
}

/// Check whether a snapshot exists at the given directory
pub fn snapshot_exists(dir: &Path) -> bool {
    dir.join("users.csv").exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        NewProduct, Product, ProductCategory, Purchase, Report, ReportReason, Role, User,
        VerificationRequest, Withdrawal,
    };
    use tempfile::tempdir;

    fn sample_store() -> EntityStore {
        let store = EntityStore::new();
        store
            .users
            .upsert(User::new(1, Role::Buyer, Decimal::new(501, 1)));
        let mut seller = User::new(2, Role::Seller, Decimal::new(255, 1));
        seller.wallet_address = Some("UQBvI0aFLnw2QbZgjMPCLRdtRHxhUyinQudg6sdiohIwg5jL".into());
        store.users.upsert(seller);
        store.products.upsert(Product::new(
            3,
            2,
            NewProduct {
                title: "Complete React Guide".into(),
                description: "Comprehensive tutorial".into(),
                price: Decimal::new(150, 1),
                category: ProductCategory::Tutorials,
                hidden_link: "https://example.com/secret".into(),
            },
        ));
        let mut purchase = Purchase::new(4, 1, 3, 2, Decimal::new(150, 1));
        purchase.user_rating = Some(4);
        store.purchases.upsert(purchase);
        store.withdrawals.upsert(Withdrawal::new(5, 2, Decimal::new(100, 1)));
        store.reports.upsert(Report::new(
            6,
            1,
            3,
            ReportReason::Spam,
            "spammy listing".into(),
        ));
        store.verifications.upsert(VerificationRequest::new(7, 2));
        store.set_platform_balance(Decimal::new(3, 1));
        store
    }

    #[test]
    fn test_snapshot_roundtrip_is_lossless() {
        let dir = tempdir().unwrap();
        let repo = CsvRepository::new(dir.path());
        let session = SessionStore::new();
        session.set_current(1);

        let store = sample_store();
        repo.save(&store, &session).unwrap();

        let restored = EntityStore::new();
        let restored_session = SessionStore::new();
        repo.load(&restored, &restored_session).unwrap();

        assert_eq!(store.users.get(), restored.users.get());
        assert_eq!(store.products.get(), restored.products.get());
        assert_eq!(store.purchases.get(), restored.purchases.get());
        assert_eq!(store.withdrawals.get(), restored.withdrawals.get());
        assert_eq!(store.reports.get(), restored.reports.get());
        assert_eq!(store.verifications.get(), restored.verifications.get());
        assert_eq!(store.platform_balance(), restored.platform_balance());
        assert_eq!(restored_session.current(), Some(1));
    }

    #[test]
    fn test_balance_precision_survives_roundtrip() {
        let dir = tempdir().unwrap();
        let repo = CsvRepository::new(dir.path());
        let session = SessionStore::new();

        let store = EntityStore::new();
        // 4.9 = 10 - 5.1, the canonical post-purchase balance
        store
            .users
            .upsert(User::new(1, Role::Buyer, Decimal::new(49, 1)));
        repo.save(&store, &session).unwrap();

        let restored = EntityStore::new();
        repo.load(&restored, &session).unwrap();
        assert_eq!(restored.users.find(1).unwrap().balance, Decimal::new(49, 1));
    }

    #[test]
    fn test_load_missing_snapshot_leaves_store_empty() {
        let dir = tempdir().unwrap();
        let repo = CsvRepository::new(dir.path().join("absent"));
        let session = SessionStore::new();

        let store = EntityStore::new();
        repo.load(&store, &session).unwrap();

        assert!(store.users.is_empty());
        assert_eq!(store.platform_balance(), Decimal::ZERO);
        assert_eq!(session.current(), None);
    }

    #[test]
    fn test_load_replaces_previous_contents() {
        let dir = tempdir().unwrap();
        let repo = CsvRepository::new(dir.path());
        let session = SessionStore::new();

        let store = sample_store();
        repo.save(&store, &session).unwrap();

        // Pre-populate the target store; load must replace wholesale
        let target = EntityStore::new();
        target
            .users
            .upsert(User::new(99, Role::Admin, Decimal::ZERO));
        repo.load(&target, &session).unwrap();

        assert!(target.users.find(99).is_none());
        assert_eq!(target.users.len(), 2);
    }

    #[test]
    fn test_snapshot_exists() {
        let dir = tempdir().unwrap();
        assert!(!snapshot_exists(dir.path()));

        let repo = CsvRepository::new(dir.path());
        repo.save(&EntityStore::new(), &SessionStore::new()).unwrap();
        assert!(snapshot_exists(dir.path()));
    }
}
