//! Presentation formatting
//!
//! Locale-aware display helpers for the dashboard's text surfaces. Grouping
//! keys and wire values never pass through here; these render for humans
//! only.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::money::Money;
use crate::models::month::short_month_name;

/// Locale-aware formatting preferences
///
/// Serde-able so the UI layer can persist it alongside its other settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Locale {
    pub currency_symbol: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
}

impl Default for Locale {
    fn default() -> Self {
        Self {
            currency_symbol: "$".into(),
            decimal_separator: '.',
            grouping_separator: ',',
        }
    }
}

/// Format an amount for display, e.g. "$3,500.00" / "-$120.50"
///
/// The sign comes ahead of the symbol. Integer-cents arithmetic throughout.
pub fn format_currency(amount: Money, locale: &Locale) -> String {
    let cents = amount.cents();
    let abs = cents.unsigned_abs();
    let sign = if cents < 0 { "-" } else { "" };
    format!(
        "{}{}{}{}{:02}",
        sign,
        locale.currency_symbol,
        group_digits(abs / 100, locale.grouping_separator),
        locale.decimal_separator,
        abs % 100
    )
}

/// Format a date for display, e.g. "Jul 1, 2024"
pub fn format_date(date: NaiveDate) -> String {
    format!(
        "{} {}, {}",
        short_month_name(date.month()),
        date.day(),
        date.year()
    )
}

/// Group an unsigned integer's digits in threes
fn group_digits(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut grouped = String::new();
    let mut count = 0;
    for ch in digits.chars().rev() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
        count += 1;
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency_default_locale() {
        let locale = Locale::default();
        assert_eq!(format_currency(Money::from_cents(350_000), &locale), "$3,500.00");
        assert_eq!(format_currency(Money::from_cents(-12050), &locale), "-$120.50");
        assert_eq!(format_currency(Money::zero(), &locale), "$0.00");
        assert_eq!(format_currency(Money::from_cents(-5), &locale), "-$0.05");
        assert_eq!(
            format_currency(Money::from_cents(123_456_789), &locale),
            "$1,234,567.89"
        );
    }

    #[test]
    fn test_format_currency_custom_locale() {
        let locale = Locale {
            currency_symbol: "€".to_string(),
            decimal_separator: ',',
            grouping_separator: ' ',
        };
        assert_eq!(format_currency(Money::from_cents(350_000), &locale), "€3 500,00");
        assert_eq!(format_currency(Money::from_cents(-12050), &locale), "-€120,50");
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        assert_eq!(format_date(date), "Jul 1, 2024");

        let date = NaiveDate::from_ymd_opt(2023, 12, 25).unwrap();
        assert_eq!(format_date(date), "Dec 25, 2023");
    }

    #[test]
    fn test_locale_serde_round_trip() {
        let locale = Locale::default();
        let json = serde_json::to_string(&locale).unwrap();
        let back: Locale = serde_json::from_str(&json).unwrap();
        assert_eq!(back, locale);
    }
}
