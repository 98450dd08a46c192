//! Static category taxonomy: the fixed, ordered catalog of categories
//! with localized names, emoji, and classifier keywords.
//!
//! Order matters: the classifier scans in declaration order and takes the
//! first keyword hit, so more specific categories come before broader ones
//! within a kind.

use serde::{Deserialize, Serialize};

use crate::locale::Lang;

/// Transaction kind; decides the default sign of a recorded amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Expense,
    Income,
    Debt,
}

/// Direction of a debt-kind category relative to the user's balance.
///
/// Debt signs are category semantics, never inferred from the kind:
/// borrowing money increases the balance, lending or repaying decreases it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebtDirection {
    Incoming,
    Outgoing,
}

/// One immutable taxonomy entry.
#[derive(Debug, PartialEq, Eq)]
pub struct Category {
    pub id: &'static str,
    pub name_uz: &'static str,
    pub name_ru: &'static str,
    pub name_en: &'static str,
    pub emoji: &'static str,
    pub kind: TxKind,
    /// Lowercase substrings the classifier matches against.
    pub keywords: &'static [&'static str],
    /// Set only on debt-kind categories.
    pub debt_direction: Option<DebtDirection>,
}

impl Category {
    pub fn name(&self, lang: Lang) -> &'static str {
        match lang {
            Lang::Uz => self.name_uz,
            Lang::Ru => self.name_ru,
            Lang::En => self.name_en,
        }
    }

    /// Resolve the signed ledger amount for a raw (unsigned) magnitude.
    pub fn signed_amount(&self, raw: i64) -> i64 {
        let magnitude = raw.abs();
        match self.kind {
            TxKind::Income => magnitude,
            TxKind::Expense => -magnitude,
            TxKind::Debt => match self.debt_direction {
                Some(DebtDirection::Incoming) => magnitude,
                _ => -magnitude,
            },
        }
    }
}

const fn expense(
    id: &'static str,
    name_uz: &'static str,
    name_ru: &'static str,
    name_en: &'static str,
    emoji: &'static str,
    keywords: &'static [&'static str],
) -> Category {
    Category {
        id,
        name_uz,
        name_ru,
        name_en,
        emoji,
        kind: TxKind::Expense,
        keywords,
        debt_direction: None,
    }
}

const fn income(
    id: &'static str,
    name_uz: &'static str,
    name_ru: &'static str,
    name_en: &'static str,
    emoji: &'static str,
    keywords: &'static [&'static str],
) -> Category {
    Category {
        id,
        name_uz,
        name_ru,
        name_en,
        emoji,
        kind: TxKind::Income,
        keywords,
        debt_direction: None,
    }
}

const fn debt(
    id: &'static str,
    name_uz: &'static str,
    name_ru: &'static str,
    name_en: &'static str,
    emoji: &'static str,
    keywords: &'static [&'static str],
    direction: DebtDirection,
) -> Category {
    Category {
        id,
        name_uz,
        name_ru,
        name_en,
        emoji,
        kind: TxKind::Debt,
        keywords,
        debt_direction: Some(direction),
    }
}

pub static CATEGORIES: &[Category] = &[
    // Expenses
    expense("food", "Oziq-ovqat", "Продукты", "Food", "🍕",
        &["food", "oziq", "ovqat", "grocery", "продукты", "magazin"]),
    expense("restaurants", "Restoranlar", "Рестораны", "Restaurants", "🍽️",
        &["restaurant", "restoran", "cafe", "ресторан", "oshxona"]),
    expense("coffee", "Kofe", "Кофе", "Coffee", "☕",
        &["coffee", "kofe", "кофе", "starbucks"]),
    expense("taxi", "Taksi", "Такси", "Taxi", "🚕",
        &["taxi", "taksi", "такси", "yandex", "uber", "bolt", "mytaxi"]),
    expense("fuel", "Benzin", "Бензин", "Fuel", "⛽",
        &["fuel", "benzin", "petrol", "бензин", "zapravka"]),
    expense("transport", "Transport", "Транспорт", "Transport", "🚌",
        &["transport", "bus", "avtobus", "metro", "marshrutka"]),
    expense("bills", "Kommunal", "Коммунальные", "Bills", "💡",
        &["bills", "kommunal", "electric", "коммунальные", "свет", "газ"]),
    expense("rent", "Ijara", "Аренда", "Rent", "🏠",
        &["rent", "ijara", "kvartira", "аренда"]),
    expense("shopping", "Xaridlar", "Покупки", "Shopping", "🛍️",
        &["shopping", "xarid", "buy", "покупки"]),
    expense("clothing", "Kiyim", "Одежда", "Clothing", "👕",
        &["clothing", "kiyim", "clothes", "одежда"]),
    expense("health", "Salomatlik", "Здоровье", "Health", "💊",
        &["health", "salomatlik", "medicine", "doctor", "здоровье", "dorixona"]),
    expense("beauty", "Go'zallik", "Красота", "Beauty", "💄",
        &["beauty", "salon", "haircut", "sartarosh", "красота"]),
    expense("education", "Ta'lim", "Образование", "Education", "📚",
        &["education", "talim", "course", "kurs", "kitob", "образование"]),
    expense("entertainment", "Ko'ngilochar", "Развлечения", "Entertainment", "🎬",
        &["entertainment", "movie", "kino", "развлечения"]),
    expense("sports", "Sport", "Спорт", "Sports", "🏃",
        &["sports", "sport", "gym", "fitness", "спорт"]),
    expense("travel", "Sayohat", "Путешествия", "Travel", "✈️",
        &["travel", "sayohat", "trip", "путешествие"]),
    expense("electronics", "Elektronika", "Электроника", "Electronics", "📱",
        &["electronics", "phone", "telefon", "laptop", "электроника"]),
    expense("gifts", "Sovg'alar", "Подарки", "Gifts", "🎁",
        &["gift", "sovga", "present", "подарок"]),
    expense("subscriptions", "Obunalar", "Подписки", "Subscriptions", "📺",
        &["subscription", "netflix", "spotify", "подписка"]),
    expense("other_expense", "Boshqa", "Другое", "Other", "📦",
        &["other", "boshqa", "другое"]),
    // Income
    income("salary", "Oylik", "Зарплата", "Salary", "💰",
        &["salary", "oylik", "maosh", "зарплата"]),
    income("freelance", "Frilanser", "Фриланс", "Freelance", "💻",
        &["freelance", "frilanser", "фриланс"]),
    income("business", "Biznes", "Бизнес", "Business", "🏢",
        &["business", "biznes", "бизнес", "savdo"]),
    income("bonus", "Bonus", "Бонус", "Bonus", "🎉",
        &["bonus", "mukofot", "бонус", "премия"]),
    income("refund", "Qaytarish", "Возврат", "Refund", "↩️",
        &["refund", "qaytarish", "возврат"]),
    income("other_income", "Boshqa", "Другое", "Other", "💵",
        &["daromad", "доход"]),
    // Debt — never matched by the keyword classifier; reachable only
    // through an explicit category pick.
    debt("borrowed", "Qarz oldim", "Взял в долг", "Borrowed", "🤝",
        &["borrowed", "qarz oldim", "занял"], DebtDirection::Incoming),
    debt("lent", "Qarz berdim", "Дал в долг", "Lent", "💸",
        &["lent", "qarz berdim", "дал в долг"], DebtDirection::Outgoing),
    debt("repaid", "Qarz qaytardim", "Вернул долг", "Repaid", "✅",
        &["repaid", "qarz qaytardim", "вернул долг"], DebtDirection::Outgoing),
];

pub const FALLBACK_CATEGORY_ID: &str = "other_expense";

pub fn all() -> &'static [Category] {
    CATEGORIES
}

pub fn by_id(id: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.id == id)
}

pub fn of_kind(kind: TxKind) -> impl Iterator<Item = &'static Category> {
    CATEGORIES.iter().filter(move |c| c.kind == kind)
}

/// The "other/uncategorized" expense category the classifier falls back to.
pub fn fallback() -> &'static Category {
    by_id(FALLBACK_CATEGORY_ID).unwrap_or(&CATEGORIES[0])
}
