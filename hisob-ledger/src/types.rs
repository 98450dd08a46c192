//! Persistent record types shared with the storage collaborator.

use chrono::{DateTime, Utc};
use hisob_core::UserId;
use hisob_core::locale::Lang;
use serde::{Deserialize, Serialize};

/// A known user. Created on first contact, never deleted by this core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    #[serde(default)]
    pub lang: Lang,
    /// Materialized running balance in the smallest currency unit.
    /// Invariant (steady state): equals the sum of all ledger amounts.
    pub balance: i64,
}

/// Where the text of a transaction came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Text,
    Voice,
    Receipt,
    Manual,
}

impl Source {
    pub fn as_str(self) -> &'static str {
        match self {
            Source::Text => "text",
            Source::Voice => "voice",
            Source::Receipt => "receipt",
            Source::Manual => "manual",
        }
    }
}

/// One immutable ledger entry. Negative amount = money leaving the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub user_id: UserId,
    pub description: String,
    /// Signed, non-zero, smallest currency unit.
    pub amount: i64,
    pub category_id: String,
    pub source: Source,
    pub created_at: DateTime<Utc>,
}

/// A monthly spending limit. `category_id: None` is the aggregate limit
/// covering all expense categories. Owned and edited elsewhere; read-only
/// for this core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetLimit {
    pub user_id: UserId,
    pub category_id: Option<String>,
    pub monthly_limit: i64,
    pub enabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Source::Receipt).unwrap(), "\"receipt\"");
        let s: Source = serde_json::from_str("\"voice\"").unwrap();
        assert_eq!(s, Source::Voice);
        assert_eq!(s.as_str(), "voice");
    }

    #[test]
    fn test_transaction_roundtrip() {
        let tx = Transaction {
            user_id: 42,
            description: "taxi 30k".into(),
            amount: -30_000,
            category_id: "taxi".into(),
            source: Source::Text,
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&tx).unwrap();
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tx);
    }
}
