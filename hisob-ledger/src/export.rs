//! Read-only CSV projection of a user's recent transactions.
//!
//! Columns: Date, Description, Amount, Category, Source. The consumer
//! owns what happens to the file; this core only flattens the ledger.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use hisob_core::UserId;
use hisob_core::locale::Lang;
use hisob_core::taxonomy;

use crate::store::Store;

pub const DEFAULT_EXPORT_DAYS: i64 = 30;

/// Export the trailing `days` of a user's ledger as CSV, newest first.
/// Category ids resolve to localized display names; unknown ids (from an
/// older taxonomy) pass through as-is.
pub async fn export_csv<S: Store>(
    store: &S,
    user_id: UserId,
    lang: Lang,
    days: i64,
    now: DateTime<Utc>,
) -> Result<String> {
    let mut ledger = store
        .query_transactions(user_id, now - Duration::days(days), now)
        .await
        .context("querying transactions for export")?;
    ledger.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["Date", "Description", "Amount", "Category", "Source"])
        .context("writing export header")?;

    for tx in &ledger {
        let category = taxonomy::by_id(&tx.category_id)
            .map(|c| c.name(lang))
            .unwrap_or(&tx.category_id);
        writer
            .write_record([
                tx.created_at.format("%Y-%m-%d").to_string().as_str(),
                tx.description.as_str(),
                tx.amount.to_string().as_str(),
                category,
                tx.source.as_str(),
            ])
            .context("writing export row")?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| anyhow::anyhow!("flushing export: {err}"))?;
    String::from_utf8(bytes).context("export is not valid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::types::{Source, Transaction};

    #[tokio::test]
    async fn test_export_shape_and_order() {
        let store = MemoryStore::new();
        store.create_user(1, "A").await.unwrap();
        let now = Utc::now();
        for (category, amount, hours_ago) in
            [("taxi", -30_000i64, 30i64), ("salary", 1_000_000, 5)]
        {
            store
                .insert_transaction(&Transaction {
                    user_id: 1,
                    description: format!("{category} entry"),
                    amount,
                    category_id: category.into(),
                    source: Source::Text,
                    created_at: now - Duration::hours(hours_ago),
                })
                .await
                .unwrap();
        }

        let csv = export_csv(&store, 1, Lang::En, DEFAULT_EXPORT_DAYS, now)
            .await
            .unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Date,Description,Amount,Category,Source");
        // Newest first.
        assert!(lines[1].contains("salary entry"));
        assert!(lines[1].contains("1000000"));
        assert!(lines[1].contains("Salary"));
        assert!(lines[2].contains("-30000"));
        assert!(lines[2].contains("Taxi"));
        assert!(lines[2].ends_with("text"));
    }

    #[tokio::test]
    async fn test_export_respects_window_and_unknown_category() {
        let store = MemoryStore::new();
        store.create_user(1, "A").await.unwrap();
        let now = Utc::now();
        store
            .insert_transaction(&Transaction {
                user_id: 1,
                description: "ancient".into(),
                amount: -1_000,
                category_id: "taxi".into(),
                source: Source::Text,
                created_at: now - Duration::days(90),
            })
            .await
            .unwrap();
        store
            .insert_transaction(&Transaction {
                user_id: 1,
                description: "legacy".into(),
                amount: -2_000,
                category_id: "retired_category".into(),
                source: Source::Manual,
                created_at: now - Duration::days(2),
            })
            .await
            .unwrap();

        let csv = export_csv(&store, 1, Lang::Uz, 30, now).await.unwrap();
        assert!(!csv.contains("ancient"));
        // Unknown id passes through untranslated.
        assert!(csv.contains("retired_category"));
    }
}
