//! Rendering of localized reply texts.

use hisob_core::locale::{Lang, replies};
use hisob_core::taxonomy::{self, Category};
use hisob_core::{UserId, format_amount};
use hisob_ledger::budget::{BudgetAlert, BudgetStatus};
use hisob_ledger::stats::PeriodSummary;

/// Confirmation after a transaction landed.
pub fn saved(lang: Lang, category: &Category, amount: i64, balance: i64) -> String {
    let r = replies(lang);
    let arrow = if amount < 0 { "💸" } else { "💰" };
    format!(
        "✅ {} {}\n{} {}\n{} {}",
        category.emoji,
        category.name(lang),
        arrow,
        format_amount(amount.abs()),
        r.balance,
        format_amount(balance),
    )
}

/// Acknowledgement after a category pick, prompting for the amount.
pub fn pick_ack(lang: Lang, category: &Category) -> String {
    format!(
        "✅ {} {}\n\n{}",
        category.emoji,
        category.name(lang),
        replies(lang).send_amount,
    )
}

/// Budget alert text. `Ok` alerts are never rendered.
pub fn limit_warning(lang: Lang, user_id: UserId, alert: &BudgetAlert) -> String {
    let (spent, limit) = match alert.status {
        BudgetStatus::Warning { spent, limit } | BudgetStatus::Exceeded { spent, limit } => {
            (spent, limit)
        }
        BudgetStatus::Ok => {
            tracing::warn!(user_id, "asked to render an Ok budget status");
            return String::new();
        }
    };
    let label = match &alert.category_id {
        Some(id) => match taxonomy::by_id(id) {
            Some(c) => format!("{} {}", c.emoji, c.name(lang)),
            None => id.clone(),
        },
        None => replies(lang).monthly_budget.to_string(),
    };
    let icon = match alert.status {
        BudgetStatus::Exceeded { .. } => "🚨",
        _ => "⚠️",
    };
    // limit > 0 is guaranteed upstream: zero limits never alert.
    let pct = spent * 100 / limit;
    format!(
        "{icon} {label}: {} / {} ({pct}%)",
        format_amount(spent),
        format_amount(limit),
    )
}

/// Balance line plus a short today section.
pub fn balance_report(lang: Lang, balance: i64, today: &PeriodSummary) -> String {
    let r = replies(lang);
    format!(
        "{}: {}\n\n{}:\n{} {}\n{} {}",
        r.balance,
        format_amount(balance),
        r.today,
        r.expense,
        format_amount(today.expenses),
        r.income,
        format_amount(today.income),
    )
}

/// Multi-day report with the top expense categories.
pub fn period_report(lang: Lang, days: i64, summary: &PeriodSummary) -> String {
    let r = replies(lang);
    let mut out = format!(
        "📊 {days}d\n{} {}\n{} {}\n🧾 {}",
        r.expense,
        format_amount(summary.expenses),
        r.income,
        format_amount(summary.income),
        summary.count,
    );
    for (id, spent) in summary.top_categories(5) {
        let label = match taxonomy::by_id(&id) {
            Some(c) => format!("{} {}", c.emoji, c.name(lang)),
            None => id,
        };
        out.push_str(&format!("\n  {label}: {}", format_amount(spent)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saved_shows_sign_icon_and_balance() {
        let taxi = taxonomy::by_id("taxi").unwrap();
        let text = saved(Lang::En, taxi, -30_000, 470_000);
        assert!(text.contains("Taxi"));
        assert!(text.contains("💸 30 000 UZS"));
        assert!(text.contains("Balance"));
        assert!(text.contains("470 000 UZS"));

        let salary = taxonomy::by_id("salary").unwrap();
        let text = saved(Lang::En, salary, 1_500_000, 1_970_000);
        assert!(text.contains("💰 1.5M"));
    }

    #[test]
    fn test_limit_warning_percent_and_label() {
        let alert = BudgetAlert {
            status: BudgetStatus::Warning {
                spent: 80_000,
                limit: 100_000,
            },
            category_id: Some("food".into()),
        };
        let text = limit_warning(Lang::En, 1, &alert);
        assert!(text.starts_with("⚠️"));
        assert!(text.contains("Food"));
        assert!(text.contains("(80%)"));

        let aggregate = BudgetAlert {
            status: BudgetStatus::Exceeded {
                spent: 120_000,
                limit: 100_000,
            },
            category_id: None,
        };
        let text = limit_warning(Lang::Ru, 1, &aggregate);
        assert!(text.starts_with("🚨"));
        assert!(text.contains("Месячный бюджет"));
        assert!(text.contains("(120%)"));
    }

    #[test]
    fn test_period_report_lists_top_categories() {
        let mut summary = PeriodSummary {
            expenses: 100_000,
            income: 0,
            count: 2,
            ..PeriodSummary::default()
        };
        summary.by_category.insert("food".into(), 70_000);
        summary.by_category.insert("taxi".into(), 30_000);
        let text = period_report(Lang::En, 7, &summary);
        let food = text.find("Food").unwrap();
        let taxi = text.find("Taxi").unwrap();
        assert!(food < taxi, "largest spend listed first");
    }
}
