//! The storage collaborator boundary.
//!
//! The ledger is held by an external transactional store reached through
//! this narrow read/insert/update interface. Backends that can increment
//! a balance atomically advertise it via `supports_atomic_delta`; the
//! recorder picks its balance strategy from that flag once, at startup.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hisob_core::UserId;
use hisob_core::locale::Lang;

use crate::types::{BudgetLimit, Transaction, User};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("user {0} not found")]
    UserNotFound(UserId),
    #[error("atomic balance delta not supported by this store")]
    DeltaUnsupported,
    #[error("storage backend failure: {0}")]
    Backend(String),
}

#[async_trait]
pub trait Store: Send + Sync {
    async fn get_user(&self, id: UserId) -> Result<Option<User>, StoreError>;

    /// Create a user with a zero balance and the default language.
    async fn create_user(&self, id: UserId, name: &str) -> Result<User, StoreError>;

    /// O(1) read of the materialized balance; never re-sums the ledger.
    async fn get_balance(&self, id: UserId) -> Result<i64, StoreError>;

    async fn set_balance(&self, id: UserId, balance: i64) -> Result<(), StoreError>;

    /// Whether `apply_balance_delta` is available on this backend.
    fn supports_atomic_delta(&self) -> bool {
        false
    }

    /// Atomically add `delta` to the user's balance.
    async fn apply_balance_delta(&self, id: UserId, delta: i64) -> Result<(), StoreError> {
        let _ = (id, delta);
        Err(StoreError::DeltaUnsupported)
    }

    async fn insert_transaction(&self, tx: &Transaction) -> Result<(), StoreError>;

    /// Transactions for a user with `from <= created_at <= to`, ledger order.
    async fn query_transactions(
        &self,
        id: UserId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Transaction>, StoreError>;

    /// Enabled or not; `category_id: None` looks up the aggregate limit.
    async fn get_budget_limit(
        &self,
        id: UserId,
        category_id: Option<&str>,
    ) -> Result<Option<BudgetLimit>, StoreError>;

    async fn set_language(&self, id: UserId, lang: Lang) -> Result<(), StoreError>;
}
