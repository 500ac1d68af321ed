use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

use crate::cell::{CellValue, ColumnDataType, CurrencyAmount};

pub const DEFAULT_CURRENCY_DECIMALS: usize = 2;

/// Decimal places kept when scaling a fraction to percent points for display
const PERCENT_DISPLAY_PRECISION: f64 = 1e10;

/// Locale-dependent settings for inference and display.
///
/// Always passed explicitly; nothing in this crate reads the process locale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormatConfig {
    /// Symbols recognized as currency markers during inference
    pub currency_symbols: Vec<String>,
    /// Symbol used when a plain number is displayed in a currency column
    pub default_currency_symbol: String,
    /// Fixed decimal places for currency display
    pub currency_decimals: usize,
    /// `chrono` patterns tried in order when recognizing dates
    pub date_formats: Vec<String>,
    /// `chrono` pattern used to display dates
    pub date_display_format: String,
    /// `chrono` patterns tried in order when recognizing times
    pub time_formats: Vec<String>,
    /// `chrono` pattern used to display times
    pub time_display_format: String,
    /// Fixed decimal places for percentages; `None` prints the shortest form
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage_decimals: Option<usize>,
}

impl Default for FormatConfig {
    fn default() -> Self {
        FormatConfig {
            currency_symbols: ["$", "€", "£", "¥", "₹"].map(String::from).to_vec(),
            default_currency_symbol: "$".to_string(),
            currency_decimals: DEFAULT_CURRENCY_DECIMALS,
            date_formats: ["%Y-%m-%d", "%m/%d/%Y"].map(String::from).to_vec(),
            date_display_format: "%-m/%-d/%Y".to_string(),
            time_formats: ["%H:%M:%S", "%H:%M", "%I:%M:%S %p", "%I:%M %p"]
                .map(String::from)
                .to_vec(),
            time_display_format: "%H:%M:%S".to_string(),
            percentage_decimals: None,
        }
    }
}

impl FormatConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: replace the currency symbol set
    pub fn with_currency_symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.currency_symbols = symbols.into_iter().map(Into::into).collect();
        self
    }

    /// Builder pattern: set the date display pattern
    pub fn with_date_display_format(mut self, pattern: impl Into<String>) -> Self {
        self.date_display_format = pattern.into();
        self
    }

    /// Builder pattern: set fixed percentage decimals
    pub fn with_percentage_decimals(mut self, decimals: usize) -> Self {
        self.percentage_decimals = Some(decimals);
        self
    }
}

/// Format a number the way cells show it: integers without a fraction part
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

pub fn format_boolean(b: bool) -> &'static str {
    if b {
        "TRUE"
    } else {
        "FALSE"
    }
}

pub fn format_currency(currency: &CurrencyAmount, decimals: usize) -> String {
    let sign = if currency.amount < 0.0 { "-" } else { "" };
    let digits = format!("{:.*}", decimals, currency.amount.abs());
    if currency.symbol_after {
        format!("{}{} {}", sign, digits, currency.symbol)
    } else {
        format!("{}{}{}", sign, currency.symbol, digits)
    }
}

/// Format a fraction as percent points (`0.1` -> `10%`)
pub fn format_percentage(fraction: f64, decimals: Option<usize>) -> String {
    let points = fraction * 100.0;
    match decimals {
        Some(d) => format!("{:.*}%", d, points),
        None => {
            let rounded = (points * PERCENT_DISPLAY_PRECISION).round() / PERCENT_DISPLAY_PRECISION;
            format!("{}%", format_number(rounded))
        }
    }
}

/// Render a value through the display formatter of its column type.
///
/// Plain numbers pick up the column's presentation (currency symbol, percent
/// sign); every other value keeps its own kind's formatting. Empty cells
/// always render as empty text.
pub fn display_value(value: &CellValue, column_type: ColumnDataType, config: &FormatConfig) -> String {
    match (column_type, value) {
        (_, CellValue::Empty) => String::new(),
        (ColumnDataType::Currency, CellValue::Number(n)) => format_currency(
            &CurrencyAmount::new(*n, config.default_currency_symbol.clone()),
            config.currency_decimals,
        ),
        (ColumnDataType::Percentage, CellValue::Number(n)) => {
            format_percentage(*n, config.percentage_decimals)
        }
        (_, value) => natural_text(value, config),
    }
}

/// Render a value with the formatter of its own kind
pub fn natural_text(value: &CellValue, config: &FormatConfig) -> String {
    match value {
        CellValue::Empty => String::new(),
        CellValue::String(s) => s.clone(),
        CellValue::Number(n) => format_number(*n),
        CellValue::Boolean(b) => format_boolean(*b).to_string(),
        CellValue::Date(d) => render_pattern(d.format(&config.date_display_format))
            .unwrap_or_else(|| d.format("%Y-%m-%d").to_string()),
        CellValue::Time(t) => render_pattern(t.format(&config.time_display_format))
            .unwrap_or_else(|| t.format("%H:%M:%S").to_string()),
        CellValue::Currency(c) => format_currency(c, config.currency_decimals),
        CellValue::Percentage(p) => format_percentage(*p, config.percentage_decimals),
    }
}

// chrono reports a bad pattern as a fmt::Error at render time
fn render_pattern(formatted: impl fmt::Display) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", formatted).ok()?;
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(42.0), "42");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(0.1), "0.1");
        assert_eq!(format_number(1e20), "100000000000000000000");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(&CurrencyAmount::new(5.0, "$"), 2), "$5.00");
        assert_eq!(format_currency(&CurrencyAmount::new(-1234.5, "£"), 2), "-£1234.50");
        assert_eq!(
            format_currency(&CurrencyAmount::new(3.0, "€").with_symbol_after(true), 2),
            "3.00 €"
        );
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.1, None), "10%");
        assert_eq!(format_percentage(0.07, None), "7%");
        assert_eq!(format_percentage(0.125, None), "12.5%");
        assert_eq!(format_percentage(0.126, Some(0)), "13%");
        assert_eq!(format_percentage(-0.5, Some(1)), "-50.0%");
    }

    #[test]
    fn test_display_value_by_column_type() {
        let config = FormatConfig::default();

        assert_eq!(display_value(&CellValue::Empty, ColumnDataType::Currency, &config), "");
        assert_eq!(
            display_value(&CellValue::Number(5.0), ColumnDataType::Currency, &config),
            "$5.00"
        );
        assert_eq!(
            display_value(&CellValue::Number(0.2), ColumnDataType::Percentage, &config),
            "20%"
        );
        assert_eq!(display_value(&CellValue::Number(5.0), ColumnDataType::Number, &config), "5");
        assert_eq!(
            display_value(&CellValue::Boolean(true), ColumnDataType::Number, &config),
            "TRUE"
        );
        assert_eq!(
            display_value(&CellValue::from("abc"), ColumnDataType::Date, &config),
            "abc"
        );
    }

    #[test]
    fn test_date_and_time_display_follow_config() {
        let date = CellValue::Date(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        let time = CellValue::Time(NaiveTime::from_hms_opt(14, 30, 0).unwrap());

        let config = FormatConfig::default();
        assert_eq!(display_value(&date, ColumnDataType::Date, &config), "1/2/2024");
        assert_eq!(display_value(&time, ColumnDataType::Time, &config), "14:30:00");

        let iso = FormatConfig::default().with_date_display_format("%Y-%m-%d");
        assert_eq!(display_value(&date, ColumnDataType::Date, &iso), "2024-01-02");

        let broken = FormatConfig::default().with_date_display_format("%Q");
        assert_eq!(display_value(&date, ColumnDataType::Date, &broken), "2024-01-02");
    }

    #[test]
    fn test_config_serde_defaults() {
        let config: FormatConfig = serde_json::from_str(r#"{"currencySymbols":["CHF"]}"#).unwrap();
        assert_eq!(config.currency_symbols, vec!["CHF".to_string()]);
        assert_eq!(config.default_currency_symbol, "$");
        assert_eq!(config.date_formats, FormatConfig::default().date_formats);
    }
}
