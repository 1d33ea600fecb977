//! redb-backed local store
//!
//! Holds what has to survive the checkout redirect and process restarts.
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `drafts` | `"{user_id}:{club_id}"` | `StoredDraft` | Validated application awaiting payment |
//! | `draft_sessions` | checkout session id | draft key | Lookup from the success redirect |
//! | `finalized_payments` | payment id | `FinalizedRecord` | Payments that already produced a membership |
//! | `auth` | `"token"` | bearer token | Session restore |
//!
//! Draft writes come from the payment hand-off only; deletion happens when a
//! membership is created for the draft.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::membership::MembershipApplication;

const DRAFTS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("drafts");

const DRAFT_SESSIONS_TABLE: TableDefinition<&str, &str> = TableDefinition::new("draft_sessions");

const FINALIZED_TABLE: TableDefinition<i64, &[u8]> = TableDefinition::new("finalized_payments");

const AUTH_TABLE: TableDefinition<&str, &str> = TableDefinition::new("auth");

const TOKEN_KEY: &str = "token";

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("No draft for user {user_id} in club {club_id}")]
    DraftNotFound { user_id: i64, club_id: i64 },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Where a stored draft is in the paid flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftState {
    /// Saved, checkout session not created yet (or creation failed)
    AwaitingCheckout,
    /// Checkout session issued, user is on the hosted page
    AwaitingPayment,
    /// Payment succeeded but membership creation was rejected
    AwaitingFinalization,
}

/// A validated application parked across the checkout redirect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredDraft {
    /// Identifies this checkout attempt in logs
    pub attempt_id: Uuid,
    pub user_id: i64,
    pub club_id: i64,
    pub application: MembershipApplication,
    pub state: DraftState,
    pub session_id: Option<String>,
    pub payment_id: Option<i64>,
    pub saved_at: DateTime<Utc>,
    /// Last backend rejection, kept for support
    #[serde(default)]
    pub last_error: Option<String>,
}

impl StoredDraft {
    pub fn new(user_id: i64, club_id: i64, application: MembershipApplication) -> Self {
        Self {
            attempt_id: Uuid::new_v4(),
            user_id,
            club_id,
            application,
            state: DraftState::AwaitingCheckout,
            session_id: None,
            payment_id: None,
            saved_at: Utc::now(),
            last_error: None,
        }
    }

    pub fn key(&self) -> String {
        draft_key(self.user_id, self.club_id)
    }
}

/// Proof that a payment already produced a membership
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalizedRecord {
    pub payment_id: i64,
    pub membership_id: i64,
    pub user_id: i64,
    pub club_id: i64,
    pub finalized_at: DateTime<Utc>,
}

fn draft_key(user_id: i64, club_id: i64) -> String {
    format!("{}:{}", user_id, club_id)
}

/// Local store backed by redb
#[derive(Clone)]
pub struct ClientStore {
    db: Arc<Database>,
}

impl std::fmt::Debug for ClientStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientStore").finish_non_exhaustive()
    }
}

impl ClientStore {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory database
    pub fn open_in_memory() -> StoreResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StoreResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(DRAFTS_TABLE)?;
            let _ = write_txn.open_table(DRAFT_SESSIONS_TABLE)?;
            let _ = write_txn.open_table(FINALIZED_TABLE)?;
            let _ = write_txn.open_table(AUTH_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    // ========== Drafts ==========

    /// Insert or replace the draft for its (user, club)
    ///
    /// A replaced draft's session index entry is dropped with it.
    pub fn save_draft(&self, draft: &StoredDraft) -> StoreResult<()> {
        let key = draft.key();
        let bytes = serde_json::to_vec(draft)?;

        let txn = self.db.begin_write()?;
        {
            let mut drafts = txn.open_table(DRAFTS_TABLE)?;
            let previous: Option<StoredDraft> = match drafts.get(key.as_str())? {
                Some(guard) => Some(serde_json::from_slice(guard.value())?),
                None => None,
            };
            drafts.insert(key.as_str(), bytes.as_slice())?;

            let mut sessions = txn.open_table(DRAFT_SESSIONS_TABLE)?;
            let stale = previous
                .and_then(|p| p.session_id)
                .filter(|old| draft.session_id.as_deref() != Some(old.as_str()));
            if let Some(old) = stale {
                sessions.remove(old.as_str())?;
            }
            if let Some(session_id) = &draft.session_id {
                sessions.insert(session_id.as_str(), key.as_str())?;
            }
        }
        txn.commit()?;
        Ok(())
    }

    /// Draft for a (user, club), if any
    pub fn draft(&self, user_id: i64, club_id: i64) -> StoreResult<Option<StoredDraft>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(DRAFTS_TABLE)?;
        match table.get(draft_key(user_id, club_id).as_str())? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    /// Draft attached to a checkout session
    pub fn draft_by_session(&self, session_id: &str) -> StoreResult<Option<StoredDraft>> {
        let read_txn = self.db.begin_read()?;
        let sessions = read_txn.open_table(DRAFT_SESSIONS_TABLE)?;
        let key = match sessions.get(session_id)? {
            Some(guard) => guard.value().to_string(),
            None => return Ok(None),
        };
        let drafts = read_txn.open_table(DRAFTS_TABLE)?;
        match drafts.get(key.as_str())? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    /// Draft attached to a payment
    pub fn draft_by_payment(&self, payment_id: i64) -> StoreResult<Option<StoredDraft>> {
        Ok(self
            .drafts()?
            .into_iter()
            .find(|d| d.payment_id == Some(payment_id)))
    }

    /// All stored drafts
    pub fn drafts(&self) -> StoreResult<Vec<StoredDraft>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(DRAFTS_TABLE)?;
        let mut drafts = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            drafts.push(serde_json::from_slice(value.value())?);
        }
        Ok(drafts)
    }

    /// Record the checkout session issued for a stored draft
    pub fn attach_checkout(
        &self,
        user_id: i64,
        club_id: i64,
        session_id: &str,
        payment_id: i64,
    ) -> StoreResult<StoredDraft> {
        let mut draft = self
            .draft(user_id, club_id)?
            .ok_or(StoreError::DraftNotFound { user_id, club_id })?;
        draft.session_id = Some(session_id.to_string());
        draft.payment_id = Some(payment_id);
        draft.state = DraftState::AwaitingPayment;
        draft.last_error = None;
        self.save_draft(&draft)?;
        Ok(draft)
    }

    /// Mark a draft as paid but not yet a membership
    ///
    /// Records the payment id and the backend's rejection message.
    pub fn park_for_finalization(
        &self,
        user_id: i64,
        club_id: i64,
        payment_id: i64,
        last_error: &str,
    ) -> StoreResult<StoredDraft> {
        let mut draft = self
            .draft(user_id, club_id)?
            .ok_or(StoreError::DraftNotFound { user_id, club_id })?;
        draft.state = DraftState::AwaitingFinalization;
        draft.payment_id = Some(payment_id);
        draft.last_error = Some(last_error.to_string());
        self.save_draft(&draft)?;
        Ok(draft)
    }

    /// Remove the draft for a (user, club) and its session index
    ///
    /// Returns the removed draft.
    pub fn remove_draft(&self, user_id: i64, club_id: i64) -> StoreResult<Option<StoredDraft>> {
        let key = draft_key(user_id, club_id);
        let txn = self.db.begin_write()?;
        let removed = {
            let mut drafts = txn.open_table(DRAFTS_TABLE)?;
            let removed: Option<StoredDraft> = match drafts.remove(key.as_str())? {
                Some(guard) => Some(serde_json::from_slice(guard.value())?),
                None => None,
            };
            if let Some(session_id) = removed.as_ref().and_then(|d| d.session_id.as_deref()) {
                let mut sessions = txn.open_table(DRAFT_SESSIONS_TABLE)?;
                sessions.remove(session_id)?;
            }
            removed
        };
        txn.commit()?;
        Ok(removed)
    }

    // ========== Finalized payments ==========

    pub fn is_finalized(&self, payment_id: i64) -> StoreResult<bool> {
        Ok(self.finalized_record(payment_id)?.is_some())
    }

    pub fn finalized_record(&self, payment_id: i64) -> StoreResult<Option<FinalizedRecord>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(FINALIZED_TABLE)?;
        match table.get(payment_id)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    /// Record a finalized payment and delete its draft in one transaction
    pub fn finalize(&self, record: &FinalizedRecord) -> StoreResult<()> {
        let key = draft_key(record.user_id, record.club_id);
        let bytes = serde_json::to_vec(record)?;

        let txn = self.db.begin_write()?;
        {
            let mut finalized = txn.open_table(FINALIZED_TABLE)?;
            finalized.insert(record.payment_id, bytes.as_slice())?;

            let mut drafts = txn.open_table(DRAFTS_TABLE)?;
            let removed: Option<StoredDraft> = match drafts.remove(key.as_str())? {
                Some(guard) => Some(serde_json::from_slice(guard.value())?),
                None => None,
            };
            if let Some(session_id) = removed.and_then(|d| d.session_id) {
                let mut sessions = txn.open_table(DRAFT_SESSIONS_TABLE)?;
                sessions.remove(session_id.as_str())?;
            }
        }
        txn.commit()?;
        Ok(())
    }

    // ========== Auth token ==========

    pub fn save_token(&self, token: &str) -> StoreResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(AUTH_TABLE)?;
            table.insert(TOKEN_KEY, token)?;
        }
        txn.commit()?;
        Ok(())
    }

    pub fn load_token(&self) -> StoreResult<Option<String>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(AUTH_TABLE)?;
        Ok(table.get(TOKEN_KEY)?.map(|guard| guard.value().to_string()))
    }

    pub fn clear_token(&self) -> StoreResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(AUTH_TABLE)?;
            table.remove(TOKEN_KEY)?;
        }
        txn.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::membership::{ApplicationInput, validate};
    use chrono::NaiveDate;

    fn application() -> MembershipApplication {
        let input = ApplicationInput {
            full_name: "Nimal Fernando".into(),
            address: "45 Temple Road, Galle".into(),
            contact_number: "+94712345678".into(),
            birthday: "2003-06-01".into(),
            faculty: "Faculty of Computing and Technology".into(),
            year: "3rd Year".into(),
            skills: vec!["Web Development".into(), "Leadership".into()],
        };
        validate(&input, NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()).unwrap()
    }

    #[test]
    fn test_draft_round_trip() {
        let store = ClientStore::open_in_memory().unwrap();
        let draft = StoredDraft::new(7, 3, application());
        store.save_draft(&draft).unwrap();

        assert_eq!(store.draft(7, 3).unwrap(), Some(draft));
        assert!(store.draft(7, 4).unwrap().is_none());
    }

    #[test]
    fn test_attach_checkout_indexes_session() {
        let store = ClientStore::open_in_memory().unwrap();
        store.save_draft(&StoredDraft::new(7, 3, application())).unwrap();

        let draft = store.attach_checkout(7, 3, "cs_test_1", 42).unwrap();
        assert_eq!(draft.state, DraftState::AwaitingPayment);

        let found = store.draft_by_session("cs_test_1").unwrap().unwrap();
        assert_eq!(found.payment_id, Some(42));
        assert_eq!(store.draft_by_payment(42).unwrap().unwrap().club_id, 3);

        // a new session replaces the old index entry
        store.attach_checkout(7, 3, "cs_test_2", 43).unwrap();
        assert!(store.draft_by_session("cs_test_1").unwrap().is_none());
        assert!(store.draft_by_session("cs_test_2").unwrap().is_some());
    }

    #[test]
    fn test_attach_checkout_without_draft() {
        let store = ClientStore::open_in_memory().unwrap();
        let err = store.attach_checkout(1, 1, "cs", 1).unwrap_err();
        assert!(matches!(err, StoreError::DraftNotFound { user_id: 1, club_id: 1 }));
    }

    #[test]
    fn test_finalize_is_atomic() {
        let store = ClientStore::open_in_memory().unwrap();
        store.save_draft(&StoredDraft::new(7, 3, application())).unwrap();
        store.attach_checkout(7, 3, "cs_test_1", 42).unwrap();

        let record = FinalizedRecord {
            payment_id: 42,
            membership_id: 900,
            user_id: 7,
            club_id: 3,
            finalized_at: Utc::now(),
        };
        store.finalize(&record).unwrap();

        assert!(store.is_finalized(42).unwrap());
        assert_eq!(store.finalized_record(42).unwrap(), Some(record));
        assert!(store.draft(7, 3).unwrap().is_none());
        assert!(store.draft_by_session("cs_test_1").unwrap().is_none());
        assert!(!store.is_finalized(43).unwrap());
    }

    #[test]
    fn test_park_for_finalization_and_remove() {
        let store = ClientStore::open_in_memory().unwrap();
        store.save_draft(&StoredDraft::new(7, 3, application())).unwrap();

        let draft = store
            .park_for_finalization(7, 3, 42, "Invalid payment")
            .unwrap();
        assert_eq!(draft.state, DraftState::AwaitingFinalization);
        assert_eq!(draft.payment_id, Some(42));
        assert_eq!(draft.last_error.as_deref(), Some("Invalid payment"));
        assert_eq!(store.draft_by_payment(42).unwrap().unwrap().attempt_id, draft.attempt_id);
        assert!(matches!(
            store.park_for_finalization(7, 4, 43, "x"),
            Err(StoreError::DraftNotFound { user_id: 7, club_id: 4 })
        ));
        assert_eq!(store.drafts().unwrap().len(), 1);

        assert!(store.remove_draft(7, 3).unwrap().is_some());
        assert!(store.remove_draft(7, 3).unwrap().is_none());
    }

    #[test]
    fn test_token() {
        let store = ClientStore::open_in_memory().unwrap();
        assert!(store.load_token().unwrap().is_none());
        store.save_token("jwt").unwrap();
        assert_eq!(store.load_token().unwrap().as_deref(), Some("jwt"));
        store.clear_token().unwrap();
        assert!(store.load_token().unwrap().is_none());
    }

    #[test]
    fn test_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("universe.redb");
        {
            let store = ClientStore::open(&path).unwrap();
            store.save_draft(&StoredDraft::new(1, 2, application())).unwrap();
        }
        let store = ClientStore::open(&path).unwrap();
        assert_eq!(store.draft(1, 2).unwrap().unwrap().application, application());
    }
}
