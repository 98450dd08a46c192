//! Keyword classifier: maps free text to a taxonomy category.
//!
//! A deliberately simple stand-in for intent understanding — the taxonomy
//! is data, the classifier is a pure function over it, and a smarter
//! matcher can replace this one behind the same signature.

use crate::taxonomy::{self, Category, TxKind};

/// Classify raw text into a category.
///
/// Income categories are scanned before expense categories (a salary
/// message usually also names a big number, and income phrasing is the
/// rarer, more specific signal); within a kind, taxonomy order breaks
/// ties. Debt categories are never matched here — free-text debt phrasing
/// is ambiguous between borrowing and lending, so debt entries go through
/// an explicit category pick. No match falls back to `other_expense`.
pub fn classify(text: &str) -> &'static Category {
    let lower = text.to_lowercase();
    for kind in [TxKind::Income, TxKind::Expense] {
        for category in taxonomy::of_kind(kind) {
            if category.keywords.iter().any(|k| lower.contains(k)) {
                return category;
            }
        }
    }
    taxonomy::fallback()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_taxi_expense() {
        let cat = classify("taxi 30000");
        assert_eq!(cat.id, "taxi");
        assert_eq!(cat.kind, TxKind::Expense);
    }

    #[test]
    fn test_salary_income_beats_expense_scan() {
        let cat = classify("salary 5000000");
        assert_eq!(cat.id, "salary");
        assert_eq!(cat.kind, TxKind::Income);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(classify("TAKSI 20k").id, "taxi");
        assert_eq!(classify("Такси до дома 25000").id, "taxi");
    }

    #[test]
    fn test_fallback_for_unknown_text() {
        let cat = classify("zzz 900000");
        assert_eq!(cat.id, "other_expense");
        assert_eq!(cat.kind, TxKind::Expense);
    }

    #[test]
    fn test_debt_never_matched() {
        // Even explicit debt wording resolves to the fallback here.
        let cat = classify("qarz oldim 100000");
        assert_ne!(cat.kind, TxKind::Debt);
    }

    #[test]
    fn test_deterministic() {
        let a = classify("kofe 15000").id;
        let b = classify("kofe 15000").id;
        assert_eq!(a, b);
        assert_eq!(a, "coffee");
    }
}
