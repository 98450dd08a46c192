//! In-memory `Store` backend.
//!
//! Backs the interactive REPL and the test suite. Supports the atomic
//! delta primitive by default; `without_atomic_delta()` turns it off so
//! the read-modify-write fallback path can be exercised.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hisob_core::UserId;
use hisob_core::locale::Lang;
use tokio::sync::RwLock;

use crate::store::{Store, StoreError};
use crate::types::{BudgetLimit, Transaction, User};

#[derive(Debug, Default)]
struct Inner {
    users: HashMap<UserId, User>,
    transactions: Vec<Transaction>,
    limits: Vec<BudgetLimit>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
    no_atomic_delta: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that pretends not to have the atomic delta primitive.
    pub fn without_atomic_delta() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            no_atomic_delta: true,
        }
    }

    /// Seed a budget limit (limits are edited by an external surface in
    /// production; this stands in for it).
    pub async fn set_budget_limit(&self, limit: BudgetLimit) {
        let mut inner = self.inner.write().await;
        inner
            .limits
            .retain(|l| !(l.user_id == limit.user_id && l.category_id == limit.category_id));
        inner.limits.push(limit);
    }

    pub async fn transaction_count(&self) -> usize {
        self.inner.read().await.transactions.len()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get_user(&self, id: UserId) -> Result<Option<User>, StoreError> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }

    async fn create_user(&self, id: UserId, name: &str) -> Result<User, StoreError> {
        let user = User {
            id,
            name: name.to_string(),
            lang: Lang::default(),
            balance: 0,
        };
        self.inner.write().await.users.insert(id, user.clone());
        Ok(user)
    }

    async fn get_balance(&self, id: UserId) -> Result<i64, StoreError> {
        self.inner
            .read()
            .await
            .users
            .get(&id)
            .map(|u| u.balance)
            .ok_or(StoreError::UserNotFound(id))
    }

    async fn set_balance(&self, id: UserId, balance: i64) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let user = inner.users.get_mut(&id).ok_or(StoreError::UserNotFound(id))?;
        user.balance = balance;
        Ok(())
    }

    fn supports_atomic_delta(&self) -> bool {
        !self.no_atomic_delta
    }

    async fn apply_balance_delta(&self, id: UserId, delta: i64) -> Result<(), StoreError> {
        if self.no_atomic_delta {
            return Err(StoreError::DeltaUnsupported);
        }
        let mut inner = self.inner.write().await;
        let user = inner.users.get_mut(&id).ok_or(StoreError::UserNotFound(id))?;
        user.balance += delta;
        Ok(())
    }

    async fn insert_transaction(&self, tx: &Transaction) -> Result<(), StoreError> {
        self.inner.write().await.transactions.push(tx.clone());
        Ok(())
    }

    async fn query_transactions(
        &self,
        id: UserId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Transaction>, StoreError> {
        Ok(self
            .inner
            .read()
            .await
            .transactions
            .iter()
            .filter(|t| t.user_id == id && t.created_at >= from && t.created_at <= to)
            .cloned()
            .collect())
    }

    async fn get_budget_limit(
        &self,
        id: UserId,
        category_id: Option<&str>,
    ) -> Result<Option<BudgetLimit>, StoreError> {
        Ok(self
            .inner
            .read()
            .await
            .limits
            .iter()
            .find(|l| l.user_id == id && l.category_id.as_deref() == category_id)
            .cloned())
    }

    async fn set_language(&self, id: UserId, lang: Lang) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let user = inner.users.get_mut(&id).ok_or(StoreError::UserNotFound(id))?;
        user.lang = lang;
        Ok(())
    }
}
