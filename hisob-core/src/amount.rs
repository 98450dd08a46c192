//! Monetary amount extraction from free-form text.
//!
//! The parser looks for one amount per message, trying tiers in order:
//! million tokens, thousand tokens, a separator-grouped literal, then a
//! bare digit run. Bare runs below 100 are rejected so phone numbers,
//! dates, and stray digits don't become transactions.

use std::sync::LazyLock;

use regex::Regex;

/// Minimum plausible bare amount in the smallest currency unit.
const BARE_AMOUNT_FLOOR: i64 = 100;

// The trailing \b keeps lone suffix letters from firing inside longer
// words: "150 ming" must never hit the million tier via its "m".
static MILLION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:[.,]\d+)?)\s*(?:mln|million|млн|m)\b").expect("million pattern")
});

static THOUSAND_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:[.,]\d+)?)\s*(?:k|к|ming|тысяч|тыс)\b").expect("thousand pattern")
});

static GROUPED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{1,3}(?:[,\s]\d{3})+").expect("grouped pattern"));

static DIGITS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("digits pattern"));

/// Extract a positive amount (smallest currency unit) from raw text.
///
/// Pure: the same text always yields the same result. Returns `None` when
/// no tier matches ("no amount found").
pub fn parse_amount(text: &str) -> Option<i64> {
    if let Some(caps) = MILLION_RE.captures(text) {
        return scaled(&caps[1], 1_000_000.0);
    }
    if let Some(caps) = THOUSAND_RE.captures(text) {
        return scaled(&caps[1], 1_000.0);
    }
    if let Some(m) = GROUPED_RE.find(text) {
        let digits: String = m.as_str().chars().filter(char::is_ascii_digit).collect();
        return digits.parse::<i64>().ok().filter(|v| *v > 0);
    }
    if let Some(m) = DIGITS_RE.find(text) {
        return m
            .as_str()
            .parse::<i64>()
            .ok()
            .filter(|v| *v >= BARE_AMOUNT_FLOOR);
    }
    None
}

/// Scale a decimal magnitude ("1.5", "2,5") and truncate toward zero.
fn scaled(number: &str, factor: f64) -> Option<i64> {
    let normalized = number.replace(',', ".");
    let value: f64 = normalized.parse().ok()?;
    let scaled = (value * factor) as i64;
    (scaled > 0).then_some(scaled)
}

/// Human-friendly amount rendering: millions as "1.5M", everything else
/// space-grouped with the currency suffix.
pub fn format_amount(amount: i64) -> String {
    if amount.abs() >= 1_000_000 {
        let millions = amount as f64 / 1_000_000.0;
        let mut s = format!("{millions:.1}");
        if let Some(trimmed) = s.strip_suffix(".0") {
            s = trimmed.to_string();
        }
        format!("{s}M")
    } else {
        format!("{} UZS", group_thousands(amount))
    }
}

fn group_thousands(amount: i64) -> String {
    let digits = amount.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_digits() {
        assert_eq!(parse_amount("500000"), Some(500_000));
        assert_eq!(parse_amount("taxi 30000"), Some(30_000));
    }

    #[test]
    fn test_bare_digits_below_floor_rejected() {
        assert_eq!(parse_amount("call me at 99"), None);
        assert_eq!(parse_amount("99"), None);
        assert_eq!(parse_amount("100"), Some(100));
    }

    #[test]
    fn test_thousand_suffixes() {
        assert_eq!(parse_amount("500k"), Some(500_000));
        assert_eq!(parse_amount("50 K taxi"), Some(50_000));
        assert_eq!(parse_amount("150 ming"), Some(150_000));
        assert_eq!(parse_amount("20 тысяч"), Some(20_000));
        assert_eq!(parse_amount("30к"), Some(30_000));
    }

    #[test]
    fn test_million_suffixes() {
        assert_eq!(parse_amount("1.5m"), Some(1_500_000));
        assert_eq!(parse_amount("2 mln"), Some(2_000_000));
        assert_eq!(parse_amount("3 млн"), Some(3_000_000));
        assert_eq!(parse_amount("1,2 million"), Some(1_200_000));
    }

    #[test]
    fn test_million_letter_does_not_fire_inside_words() {
        // "ming" starts with the million suffix letter but is a thousand token.
        assert_eq!(parse_amount("150 ming"), Some(150_000));
        assert_eq!(parse_amount("5 metro"), None);
    }

    #[test]
    fn test_decimal_truncates_toward_zero() {
        assert_eq!(parse_amount("1.2345m"), Some(1_234_500));
        assert_eq!(parse_amount("0.0005k"), None);
        // 1.9999k scales to 1999.9 and truncates, never rounds up.
        assert_eq!(parse_amount("1.9999k"), Some(1_999));
    }

    #[test]
    fn test_grouped_literal() {
        assert_eq!(parse_amount("1,500,000"), Some(1_500_000));
        assert_eq!(parse_amount("1 500 000"), Some(1_500_000));
    }

    #[test]
    fn test_first_tier_wins() {
        // Million tier beats the later bare-digit tier on the same text.
        assert_eq!(parse_amount("1m or 250"), Some(1_000_000));
        // Only the first match of a tier is used; amounts are never summed.
        assert_eq!(parse_amount("500k and 200k"), Some(500_000));
    }

    #[test]
    fn test_no_amount() {
        assert_eq!(parse_amount("just words"), None);
        assert_eq!(parse_amount(""), None);
    }

    #[test]
    fn test_parse_is_pure() {
        for _ in 0..3 {
            assert_eq!(parse_amount("taxi 30k"), Some(30_000));
        }
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(1_500_000), "1.5M");
        assert_eq!(format_amount(2_000_000), "2M");
        assert_eq!(format_amount(30_000), "30 000 UZS");
        assert_eq!(format_amount(-450_000), "-450 000 UZS");
        assert_eq!(format_amount(950), "950 UZS");
    }
}
