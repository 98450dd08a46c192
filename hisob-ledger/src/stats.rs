//! Period statistics over the ledger, for reports.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use hisob_core::UserId;

use crate::store::{Store, StoreError};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeriodSummary {
    /// Sum of expense magnitudes (positive number).
    pub expenses: i64,
    /// Sum of income amounts.
    pub income: i64,
    pub count: usize,
    /// Expense magnitude per category id.
    pub by_category: HashMap<String, i64>,
}

impl PeriodSummary {
    /// Top expense categories, largest first; ties break on category id
    /// so report ordering is stable.
    pub fn top_categories(&self, n: usize) -> Vec<(String, i64)> {
        let mut ranked: Vec<(String, i64)> = self
            .by_category
            .iter()
            .map(|(id, spent)| (id.clone(), *spent))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(n);
        ranked
    }
}

pub async fn period_summary<S: Store>(
    store: &S,
    user_id: UserId,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<PeriodSummary, StoreError> {
    let ledger = store.query_transactions(user_id, from, to).await?;
    let mut summary = PeriodSummary {
        count: ledger.len(),
        ..PeriodSummary::default()
    };
    for tx in &ledger {
        if tx.amount < 0 {
            let spent = tx.amount.abs();
            summary.expenses += spent;
            *summary.by_category.entry(tx.category_id.clone()).or_insert(0) += spent;
        } else {
            summary.income += tx.amount;
        }
    }
    Ok(summary)
}

/// Summary for the trailing `days` ending at `now`.
pub async fn trailing_summary<S: Store>(
    store: &S,
    user_id: UserId,
    days: i64,
    now: DateTime<Utc>,
) -> Result<PeriodSummary, StoreError> {
    period_summary(store, user_id, now - Duration::days(days), now).await
}
