//! Ledger & balance maintainer.
//!
//! `record` is the single write path: it appends the immutable
//! transaction and applies the signed delta to the materialized balance
//! as one logical unit. The balance update strategy is chosen once from
//! the store's capability — atomic delta when available, read-modify-
//! write otherwise (the fallback's race window is closed by the caller's
//! per-user serialization, not by retries).

use std::sync::Arc;

use chrono::{DateTime, Utc};
use hisob_core::UserId;
use hisob_core::taxonomy::Category;

use crate::store::{Store, StoreError};
use crate::types::{Source, Transaction};

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("transaction amount must be non-zero")]
    ZeroAmount,
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceStrategy {
    AtomicDelta,
    ReadModifyWrite,
}

pub struct Recorder<S: Store> {
    store: Arc<S>,
    strategy: BalanceStrategy,
}

impl<S: Store> Recorder<S> {
    pub fn new(store: Arc<S>) -> Self {
        let strategy = if store.supports_atomic_delta() {
            BalanceStrategy::AtomicDelta
        } else {
            BalanceStrategy::ReadModifyWrite
        };
        Self { store, strategy }
    }

    pub fn strategy(&self) -> BalanceStrategy {
        self.strategy
    }

    /// Append a transaction and update the balance.
    ///
    /// The sign is resolved from the category (expense negates, income
    /// keeps, debt follows the category's direction). If the append
    /// succeeds but the balance step fails, the ledger entry is kept and
    /// the drift is logged — `reconcile_balance` is the recovery path.
    /// There is no dedup key: two identical calls append two entries.
    pub async fn record(
        &self,
        user_id: UserId,
        description: &str,
        raw_amount: i64,
        category: &'static Category,
        source: Source,
        now: DateTime<Utc>,
    ) -> Result<Transaction, RecordError> {
        if raw_amount == 0 {
            return Err(RecordError::ZeroAmount);
        }

        let amount = category.signed_amount(raw_amount);
        let tx = Transaction {
            user_id,
            description: description.to_string(),
            amount,
            category_id: category.id.to_string(),
            source,
            created_at: now,
        };

        self.store.insert_transaction(&tx).await?;

        if let Err(err) = self.apply_delta(user_id, amount).await {
            tracing::error!(
                user_id,
                amount,
                category = category.id,
                %err,
                "balance update failed after ledger append; balance is stale until reconciliation"
            );
        }

        tracing::debug!(user_id, amount, category = category.id, source = source.as_str(), "recorded transaction");
        Ok(tx)
    }

    async fn apply_delta(&self, user_id: UserId, delta: i64) -> Result<(), StoreError> {
        match self.strategy {
            BalanceStrategy::AtomicDelta => self.store.apply_balance_delta(user_id, delta).await,
            BalanceStrategy::ReadModifyWrite => {
                let balance = self.store.get_balance(user_id).await?;
                self.store.set_balance(user_id, balance + delta).await
            }
        }
    }

    /// Recompute the balance as the full-ledger sum and store it.
    /// Background recovery for a logged append/balance drift.
    pub async fn reconcile_balance(&self, user_id: UserId) -> Result<i64, StoreError> {
        let ledger = self
            .store
            .query_transactions(user_id, DateTime::<Utc>::MIN_UTC, Utc::now())
            .await?;
        let sum: i64 = ledger.iter().map(|t| t.amount).sum();
        self.store.set_balance(user_id, sum).await?;
        tracing::info!(user_id, balance = sum, "reconciled balance from ledger");
        Ok(sum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use hisob_core::taxonomy;

    async fn store_with_user() -> Arc<MemoryStore> {
        let store = Arc::new(MemoryStore::new());
        store.create_user(1, "A").await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_expense_negates_income_keeps() {
        let store = store_with_user().await;
        let recorder = Recorder::new(store.clone());
        let now = Utc::now();

        let tx = recorder
            .record(1, "taxi 30000", 30_000, taxonomy::by_id("taxi").unwrap(), Source::Text, now)
            .await
            .unwrap();
        assert_eq!(tx.amount, -30_000);

        let tx = recorder
            .record(1, "salary", 5_000_000, taxonomy::by_id("salary").unwrap(), Source::Text, now)
            .await
            .unwrap();
        assert_eq!(tx.amount, 5_000_000);

        assert_eq!(store.get_balance(1).await.unwrap(), 4_970_000);
    }

    #[tokio::test]
    async fn test_debt_sign_follows_category() {
        let store = store_with_user().await;
        let recorder = Recorder::new(store.clone());
        let now = Utc::now();

        recorder
            .record(1, "from friend", 200_000, taxonomy::by_id("borrowed").unwrap(), Source::Manual, now)
            .await
            .unwrap();
        assert_eq!(store.get_balance(1).await.unwrap(), 200_000);

        recorder
            .record(1, "to friend", 50_000, taxonomy::by_id("lent").unwrap(), Source::Manual, now)
            .await
            .unwrap();
        recorder
            .record(1, "paid back", 150_000, taxonomy::by_id("repaid").unwrap(), Source::Manual, now)
            .await
            .unwrap();
        assert_eq!(store.get_balance(1).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_zero_amount_rejected() {
        let store = store_with_user().await;
        let recorder = Recorder::new(store.clone());
        let err = recorder
            .record(1, "x", 0, taxonomy::by_id("taxi").unwrap(), Source::Text, Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, RecordError::ZeroAmount));
        assert_eq!(store.transaction_count().await, 0);
    }

    #[tokio::test]
    async fn test_balance_equals_ledger_sum_after_every_record() {
        let store = store_with_user().await;
        let recorder = Recorder::new(store.clone());
        let now = Utc::now();
        let cases = [
            ("taxi", 12_000),
            ("salary", 3_000_000),
            ("food", 85_000),
            ("borrowed", 500_000),
        ];
        for (cat, raw) in cases {
            recorder
                .record(1, cat, raw, taxonomy::by_id(cat).unwrap(), Source::Text, now)
                .await
                .unwrap();
            let ledger = store
                .query_transactions(1, DateTime::<Utc>::MIN_UTC, now + chrono::Duration::seconds(1))
                .await
                .unwrap();
            let sum: i64 = ledger.iter().map(|t| t.amount).sum();
            assert_eq!(store.get_balance(1).await.unwrap(), sum);
        }
    }

    #[tokio::test]
    async fn test_identical_records_both_apply() {
        // No dedup key, by design: two logically distinct calls with the
        // same fields are two ledger entries and two deltas.
        let store = store_with_user().await;
        let recorder = Recorder::new(store.clone());
        let now = Utc::now();
        for _ in 0..2 {
            recorder
                .record(1, "kofe", 15_000, taxonomy::by_id("coffee").unwrap(), Source::Text, now)
                .await
                .unwrap();
        }
        assert_eq!(store.transaction_count().await, 2);
        assert_eq!(store.get_balance(1).await.unwrap(), -30_000);
    }

    #[tokio::test]
    async fn test_read_modify_write_fallback() {
        let store = Arc::new(MemoryStore::without_atomic_delta());
        store.create_user(1, "A").await.unwrap();
        let recorder = Recorder::new(store.clone());
        assert_eq!(recorder.strategy(), BalanceStrategy::ReadModifyWrite);

        recorder
            .record(1, "taxi", 40_000, taxonomy::by_id("taxi").unwrap(), Source::Text, Utc::now())
            .await
            .unwrap();
        assert_eq!(store.get_balance(1).await.unwrap(), -40_000);
    }

    #[tokio::test]
    async fn test_reconcile_repairs_drift() {
        let store = store_with_user().await;
        let recorder = Recorder::new(store.clone());
        let now = Utc::now();
        recorder
            .record(1, "taxi", 25_000, taxonomy::by_id("taxi").unwrap(), Source::Text, now)
            .await
            .unwrap();

        // Force a drift, as if a balance write had been lost.
        store.set_balance(1, 999).await.unwrap();
        let repaired = recorder.reconcile_balance(1).await.unwrap();
        assert_eq!(repaired, -25_000);
        assert_eq!(store.get_balance(1).await.unwrap(), -25_000);
    }
}
