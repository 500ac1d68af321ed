//! Literal recognizers for each column data type.
//!
//! Every recognizer trims its input and returns `None` for text that is not a
//! literal of its type. Inference and coercion are built on these.

use chrono::{Datelike, NaiveDate, NaiveTime};
use regex::Regex;
use std::sync::OnceLock;

use crate::cell::{CellValue, ColumnDataType, CurrencyAmount};
use crate::format::FormatConfig;

fn number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?$").expect("valid number pattern")
    })
}

/// Amounts may group thousands with commas (`1,234.50`)
fn amount_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[+-]?(\d{1,3}(,\d{3})+|\d+)(\.\d*)?$|^[+-]?\.\d+$")
            .expect("valid amount pattern")
    })
}

/// `true` / `false`, any case
pub fn parse_boolean(text: &str) -> Option<bool> {
    let trimmed = text.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        Some(true)
    } else if trimmed.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Finite decimal literal (`42`, `-3.5`, `.5`, `1e3`); words like `inf` or
/// `NaN` are not numbers here
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if !number_pattern().is_match(trimmed) {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Date in one of the configured patterns.
///
/// `%Y` accepts one to four digits, so years outside 1000..=9999 are rejected;
/// codes like `1-2-3` stay text.
pub fn parse_date(text: &str, config: &FormatConfig) -> Option<NaiveDate> {
    let trimmed = text.trim();
    config
        .date_formats
        .iter()
        .find_map(|pattern| NaiveDate::parse_from_str(trimmed, pattern).ok())
        .filter(|date| (1000..=9999).contains(&date.year()))
}

pub fn parse_time(text: &str, config: &FormatConfig) -> Option<NaiveTime> {
    let trimmed = text.trim();
    config
        .time_formats
        .iter()
        .find_map(|pattern| NaiveTime::parse_from_str(trimmed, pattern).ok())
}

/// Symbols sorted longest first so `US$` wins over `$`
fn symbols_by_length(config: &FormatConfig) -> Vec<&str> {
    let mut symbols: Vec<&str> = config
        .currency_symbols
        .iter()
        .map(String::as_str)
        .filter(|s| !s.is_empty())
        .collect();
    symbols.sort_by_key(|s| std::cmp::Reverse(s.chars().count()));
    symbols
}

pub fn contains_currency_symbol(text: &str, config: &FormatConfig) -> bool {
    symbols_by_length(config).iter().any(|symbol| text.contains(symbol))
}

/// Currency amount with an optional symbol before or after the number.
///
/// Accepts `$5`, `$6.50`, `-$3`, `$-3`, `($3)`, `1,234.50 €` and bare numbers.
/// A bare number takes `config.default_currency_symbol`.
pub fn parse_currency(text: &str, config: &FormatConfig) -> Option<CurrencyAmount> {
    let mut rest = text.trim();
    let mut negative = false;

    if let Some(inner) = rest.strip_prefix('(').and_then(|r| r.strip_suffix(')')) {
        negative = true;
        rest = inner.trim();
    }
    if let Some(inner) = rest.strip_prefix('-') {
        negative = !negative;
        rest = inner.trim_start();
    }

    let mut symbol = None;
    let mut symbol_after = false;
    for candidate in symbols_by_length(config) {
        if let Some(inner) = rest.strip_prefix(candidate) {
            symbol = Some(candidate);
            rest = inner.trim_start();
            break;
        }
        if let Some(inner) = rest.strip_suffix(candidate) {
            symbol = Some(candidate);
            symbol_after = true;
            rest = inner.trim_end();
            break;
        }
    }

    if !amount_pattern().is_match(rest) {
        return None;
    }
    let amount: f64 = rest.replace(',', "").parse().ok().filter(|n: &f64| n.is_finite())?;
    let amount = if negative { -amount } else { amount };

    let symbol = symbol.unwrap_or(config.default_currency_symbol.as_str());
    Some(CurrencyAmount::new(amount, symbol).with_symbol_after(symbol_after))
}

/// Percentage as a fraction: `10%` -> `0.1`.
///
/// A bare number is read as percent points (`20` -> `0.2`).
pub fn parse_percentage(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let points = trimmed.strip_suffix('%').unwrap_or(trimmed);
    parse_number(points).map(|p| p / 100.0)
}

/// Coerce raw text under a column type.
///
/// Blank text is always `Some(CellValue::Empty)`; `None` means the text is not
/// a literal of `column_type`.
pub fn coerce(raw: &str, column_type: ColumnDataType, config: &FormatConfig) -> Option<CellValue> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(CellValue::Empty);
    }

    match column_type {
        ColumnDataType::String => Some(CellValue::String(trimmed.to_string())),
        ColumnDataType::Number => parse_boolean(trimmed)
            .map(CellValue::Boolean)
            .or_else(|| parse_number(trimmed).map(CellValue::Number)),
        ColumnDataType::Boolean => parse_boolean(trimmed).map(CellValue::Boolean),
        ColumnDataType::Date => parse_date(trimmed, config).map(CellValue::Date),
        ColumnDataType::Time => parse_time(trimmed, config).map(CellValue::Time),
        ColumnDataType::Currency => parse_currency(trimmed, config).map(CellValue::Currency),
        ColumnDataType::Percentage => parse_percentage(trimmed).map(CellValue::Percentage),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_boolean() {
        assert_eq!(parse_boolean("TRUE"), Some(true));
        assert_eq!(parse_boolean(" False "), Some(false));
        assert_eq!(parse_boolean("yes"), None);
        assert_eq!(parse_boolean("1"), None);
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("42"), Some(42.0));
        assert_eq!(parse_number(" -3.5 "), Some(-3.5));
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_number("5."), Some(5.0));
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number("+7"), Some(7.0));
        assert_eq!(parse_number("1e999"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("1,000"), None);
        assert_eq!(parse_number("12abc"), None);
        assert_eq!(parse_number(""), None);
    }

    #[test]
    fn test_parse_date() {
        let config = FormatConfig::default();
        assert_eq!(parse_date("1/2/2024", &config), NaiveDate::from_ymd_opt(2024, 1, 2));
        assert_eq!(parse_date("2024-03-04", &config), NaiveDate::from_ymd_opt(2024, 3, 4));
        assert_eq!(parse_date("2/30/2024", &config), None);
        assert_eq!(parse_date("2024", &config), None);
        assert_eq!(parse_date("hello", &config), None);
    }

    #[test]
    fn test_parse_date_requires_four_digit_year() {
        let config = FormatConfig::default();
        assert_eq!(parse_date("1-2-3", &config), None);
        assert_eq!(parse_date("10-11-12", &config), None);
        assert_eq!(parse_date("1/2/24", &config), None);
        assert_eq!(parse_date("0999-01-01", &config), None);
        assert_eq!(parse_date("1000-01-01", &config), NaiveDate::from_ymd_opt(1000, 1, 1));
    }

    #[test]
    fn test_parse_time() {
        let config = FormatConfig::default();
        assert_eq!(parse_time("14:30", &config), NaiveTime::from_hms_opt(14, 30, 0));
        assert_eq!(parse_time("14:30:15", &config), NaiveTime::from_hms_opt(14, 30, 15));
        assert_eq!(parse_time("2:30 PM", &config), NaiveTime::from_hms_opt(14, 30, 0));
        assert_eq!(parse_time("25:00", &config), None);
        assert_eq!(parse_time("1/2/2024", &config), None);
    }

    #[test]
    fn test_parse_currency() {
        let config = FormatConfig::default();

        assert_eq!(parse_currency("$5", &config), Some(CurrencyAmount::new(5.0, "$")));
        assert_eq!(parse_currency("$6.50", &config), Some(CurrencyAmount::new(6.5, "$")));
        assert_eq!(parse_currency("-$3", &config), Some(CurrencyAmount::new(-3.0, "$")));
        assert_eq!(parse_currency("$-3", &config), Some(CurrencyAmount::new(-3.0, "$")));
        assert_eq!(parse_currency("($3)", &config), Some(CurrencyAmount::new(-3.0, "$")));
        assert_eq!(
            parse_currency("£1,234.50", &config),
            Some(CurrencyAmount::new(1234.5, "£"))
        );
        assert_eq!(
            parse_currency("5 €", &config),
            Some(CurrencyAmount::new(5.0, "€").with_symbol_after(true))
        );
        assert_eq!(parse_currency("12", &config), Some(CurrencyAmount::new(12.0, "$")));

        assert_eq!(parse_currency("$", &config), None);
        assert_eq!(parse_currency("$1,23", &config), None);
        assert_eq!(parse_currency("CHF 5", &config), None);
        assert_eq!(parse_currency("abc", &config), None);
    }

    #[test]
    fn test_parse_currency_custom_symbols() {
        let config = FormatConfig::default().with_currency_symbols(["$", "US$", "CHF"]);

        assert_eq!(parse_currency("US$5", &config), Some(CurrencyAmount::new(5.0, "US$")));
        assert_eq!(parse_currency("CHF 5", &config), Some(CurrencyAmount::new(5.0, "CHF")));
        assert_eq!(parse_currency("€5", &config), None);
        assert!(contains_currency_symbol("10 CHF", &config));
        assert!(!contains_currency_symbol("10 €", &config));
    }

    #[test]
    fn test_parse_percentage() {
        assert_eq!(parse_percentage("10%"), Some(0.1));
        assert_eq!(parse_percentage(" 12.5 % "), Some(0.125));
        assert_eq!(parse_percentage("50"), Some(0.5));
        assert_eq!(parse_percentage("%"), None);
        assert_eq!(parse_percentage("ten%"), None);
    }

    #[test]
    fn test_coerce() {
        let config = FormatConfig::default();

        assert_eq!(coerce("  ", ColumnDataType::Date, &config), Some(CellValue::Empty));
        assert_eq!(
            coerce("true", ColumnDataType::Number, &config),
            Some(CellValue::Boolean(true))
        );
        assert_eq!(coerce("7", ColumnDataType::Number, &config), Some(CellValue::Number(7.0)));
        assert_eq!(coerce("x", ColumnDataType::Number, &config), None);
        assert_eq!(
            coerce(" x ", ColumnDataType::String, &config),
            Some(CellValue::String("x".to_string()))
        );
        assert_eq!(
            coerce("20%", ColumnDataType::Percentage, &config),
            Some(CellValue::Percentage(0.2))
        );
    }
}
