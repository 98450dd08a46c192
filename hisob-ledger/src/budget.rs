//! Budget limit evaluation.
//!
//! Spend is the sum of expense magnitudes for the current calendar month,
//! computed in the configured timezone (budget months are a user-facing
//! concept, so "month" follows the user's clock, not UTC). Thresholds are
//! exact integer comparisons: spend ≥ limit → exceeded, spend·5 ≥ limit·4
//! (i.e. 80%) → warning.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Datelike, TimeZone, Utc};
use chrono_tz::Tz;
use hisob_core::UserId;
use tokio::sync::Mutex;

use crate::store::{Store, StoreError};
use crate::types::BudgetLimit;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetStatus {
    Ok,
    Warning { spent: i64, limit: i64 },
    Exceeded { spent: i64, limit: i64 },
}

impl BudgetStatus {
    fn tier(self) -> u8 {
        match self {
            BudgetStatus::Ok => 0,
            BudgetStatus::Warning { .. } => 1,
            BudgetStatus::Exceeded { .. } => 2,
        }
    }
}

/// A non-Ok evaluation that has not been alerted this month yet.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetAlert {
    pub status: BudgetStatus,
    /// `None` when the aggregate (all-category) limit triggered.
    pub category_id: Option<String>,
}

type AlertKey = (UserId, Option<String>, i32, u32);

pub struct BudgetEvaluator<S: Store> {
    store: Arc<S>,
    tz: Tz,
    /// Highest tier already alerted per (user, limit, month). Ephemeral:
    /// a restart may repeat one alert, which is acceptable UX state.
    alerted: Mutex<HashMap<AlertKey, u8>>,
}

impl<S: Store> BudgetEvaluator<S> {
    pub fn new(store: Arc<S>, tz: Tz) -> Self {
        Self {
            store,
            tz,
            alerted: Mutex::new(HashMap::new()),
        }
    }

    /// Classify month-to-date spend for `category_id` against its limit.
    ///
    /// Falls back to the aggregate limit when no per-category limit is
    /// enabled; with neither, the result is `Ok` and nothing is notified.
    pub async fn evaluate(
        &self,
        user_id: UserId,
        category_id: &str,
        now: DateTime<Utc>,
    ) -> Result<(BudgetStatus, Option<BudgetLimit>), StoreError> {
        let limit = match self.enabled_limit(user_id, category_id).await? {
            Some(l) => l,
            None => return Ok((BudgetStatus::Ok, None)),
        };
        if limit.monthly_limit <= 0 {
            return Ok((BudgetStatus::Ok, Some(limit)));
        }

        let from = month_start(self.tz, now);
        let ledger = self.store.query_transactions(user_id, from, now).await?;
        let spent: i64 = ledger
            .iter()
            .filter(|t| t.amount < 0)
            .filter(|t| match &limit.category_id {
                Some(cat) => t.category_id == *cat,
                None => true,
            })
            .map(|t| t.amount.abs())
            .sum();

        Ok((status_for(spent, limit.monthly_limit), Some(limit)))
    }

    /// Evaluate after a recorded expense and decide whether to alert.
    ///
    /// Never fails: evaluation errors are logged and swallowed so they
    /// cannot affect transaction recording. Each tier alerts at most once
    /// per (user, limit, month); a later, higher tier still alerts.
    pub async fn check(
        &self,
        user_id: UserId,
        category_id: &str,
        now: DateTime<Utc>,
    ) -> Option<BudgetAlert> {
        let (status, limit) = match self.evaluate(user_id, category_id, now).await {
            Ok(result) => result,
            Err(err) => {
                tracing::warn!(user_id, category_id, %err, "budget evaluation failed");
                return None;
            }
        };
        if status.tier() == 0 {
            return None;
        }
        let limit = limit?;

        let local = now.with_timezone(&self.tz);
        let key = (user_id, limit.category_id.clone(), local.year(), local.month());
        let mut alerted = self.alerted.lock().await;
        let seen = alerted.get(&key).copied().unwrap_or(0);
        if seen >= status.tier() {
            return None;
        }
        alerted.insert(key, status.tier());

        Some(BudgetAlert {
            status,
            category_id: limit.category_id,
        })
    }

    async fn enabled_limit(
        &self,
        user_id: UserId,
        category_id: &str,
    ) -> Result<Option<BudgetLimit>, StoreError> {
        if let Some(limit) = self.store.get_budget_limit(user_id, Some(category_id)).await? {
            if limit.enabled {
                return Ok(Some(limit));
            }
        }
        match self.store.get_budget_limit(user_id, None).await? {
            Some(limit) if limit.enabled => Ok(Some(limit)),
            _ => Ok(None),
        }
    }
}

fn status_for(spent: i64, limit: i64) -> BudgetStatus {
    if spent >= limit {
        BudgetStatus::Exceeded { spent, limit }
    } else if spent * 5 >= limit * 4 {
        BudgetStatus::Warning { spent, limit }
    } else {
        BudgetStatus::Ok
    }
}

/// First instant of `now`'s calendar month in `tz`, as UTC.
fn month_start(tz: Tz, now: DateTime<Utc>) -> DateTime<Utc> {
    let local = now.with_timezone(&tz);
    match tz
        .with_ymd_and_hms(local.year(), local.month(), 1, 0, 0, 0)
        .earliest()
    {
        Some(start) => start.with_timezone(&Utc),
        // Month starts are never DST gaps in practice; fall back to UTC.
        None => Utc
            .with_ymd_and_hms(local.year(), local.month(), 1, 0, 0, 0)
            .unwrap(),
    }
}
