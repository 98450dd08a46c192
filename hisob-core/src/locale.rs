//! User-facing languages and reply strings.
//!
//! Only the strings this core sends itself live here (confirmations,
//! parse-failure prompts, budget warnings). Anything the chat surface
//! renders on its own stays with the chat surface.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    Uz,
    Ru,
    En,
}

impl Lang {
    pub fn from_code(code: &str) -> Option<Lang> {
        match code.trim().to_lowercase().as_str() {
            "uz" => Some(Lang::Uz),
            "ru" => Some(Lang::Ru),
            "en" => Some(Lang::En),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Lang::Uz => "uz",
            Lang::Ru => "ru",
            Lang::En => "en",
        }
    }
}

/// Static reply strings for one language.
#[derive(Debug)]
pub struct Replies {
    pub welcome: &'static str,
    pub balance: &'static str,
    pub today: &'static str,
    pub expense: &'static str,
    pub income: &'static str,
    pub send_amount: &'static str,
    pub monthly_budget: &'static str,
    pub cannot_parse: &'static str,
    pub canceled: &'static str,
    pub transient_error: &'static str,
    pub export_caption: &'static str,
}

static UZ: Replies = Replies {
    welcome: "👋 Salom! Kategoriya tanlang yoki \"Taksi 30k\" deb yozing.",
    balance: "💰 Balans",
    today: "📅 Bugun",
    expense: "↘️ Xarajat",
    income: "↗️ Daromad",
    send_amount: "Summa yuboring:",
    monthly_budget: "Oylik budjet",
    cannot_parse: "❌ Summa aniqlanmadi. Masalan: \"Taksi 30k\"",
    canceled: "❌ Bekor qilindi",
    transient_error: "⚠️ Vaqtinchalik xatolik, qayta urinib ko'ring",
    export_caption: "📥 Eksport",
};

static RU: Replies = Replies {
    welcome: "👋 Привет! Выберите категорию или напишите \"Такси 30k\".",
    balance: "💰 Баланс",
    today: "📅 Сегодня",
    expense: "↘️ Расход",
    income: "↗️ Доход",
    send_amount: "Отправьте сумму:",
    monthly_budget: "Месячный бюджет",
    cannot_parse: "❌ Не понял сумму. Например: \"Такси 30k\"",
    canceled: "❌ Отменено",
    transient_error: "⚠️ Временная ошибка, попробуйте ещё раз",
    export_caption: "📥 Экспорт",
};

static EN: Replies = Replies {
    welcome: "👋 Hello! Pick a category or type \"Taxi 30k\".",
    balance: "💰 Balance",
    today: "📅 Today",
    expense: "↘️ Expense",
    income: "↗️ Income",
    send_amount: "Send the amount:",
    monthly_budget: "Monthly budget",
    cannot_parse: "❌ Couldn't find an amount. Try \"Taxi 30k\"",
    canceled: "❌ Canceled",
    transient_error: "⚠️ Temporary problem, please try again",
    export_caption: "📥 Export",
};

pub fn replies(lang: Lang) -> &'static Replies {
    match lang {
        Lang::Uz => &UZ,
        Lang::Ru => &RU,
        Lang::En => &EN,
    }
}
