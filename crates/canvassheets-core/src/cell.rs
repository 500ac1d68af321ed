use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::format;
use crate::parse;

/// A monetary amount together with the symbol it was written with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyAmount {
    pub amount: f64,
    pub symbol: String,
    /// Symbol is written after the amount (`5 €`) rather than before (`$5`)
    #[serde(default, skip_serializing_if = "is_false")]
    pub symbol_after: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl CurrencyAmount {
    pub fn new(amount: f64, symbol: impl Into<String>) -> Self {
        CurrencyAmount {
            amount,
            symbol: symbol.into(),
            symbol_after: false,
        }
    }

    pub fn with_symbol_after(mut self, symbol_after: bool) -> Self {
        self.symbol_after = symbol_after;
        self
    }
}

/// The typed value held by a table cell
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CellValue {
    #[default]
    Empty,
    String(String),
    Number(f64),
    #[serde(rename = "bool")]
    Boolean(bool),
    Date(NaiveDate),
    Time(NaiveTime),
    Currency(CurrencyAmount),
    /// Stored as a fraction: `10%` is `0.1`
    Percentage(f64),
}

impl CellValue {
    /// General inference used for body cells: boolean literal, then numeric
    /// literal, then the trimmed text, else empty.
    pub fn infer(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return CellValue::Empty;
        }
        if let Some(b) = parse::parse_boolean(trimmed) {
            return CellValue::Boolean(b);
        }
        if let Some(n) = parse::parse_number(trimmed) {
            return CellValue::Number(n);
        }
        CellValue::String(trimmed.to_string())
    }

    /// Plain text with no coercion; blank text becomes empty
    pub fn text(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            CellValue::Empty
        } else {
            CellValue::String(trimmed.to_string())
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Data type this value would be displayed as, `None` for empty cells
    pub fn data_type(&self) -> Option<ColumnDataType> {
        match self {
            CellValue::Empty => None,
            CellValue::String(_) => Some(ColumnDataType::String),
            CellValue::Number(_) => Some(ColumnDataType::Number),
            CellValue::Boolean(_) => Some(ColumnDataType::Boolean),
            CellValue::Date(_) => Some(ColumnDataType::Date),
            CellValue::Time(_) => Some(ColumnDataType::Time),
            CellValue::Currency(_) => Some(ColumnDataType::Currency),
            CellValue::Percentage(_) => Some(ColumnDataType::Percentage),
        }
    }

    /// Try to get the value as a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) | CellValue::Percentage(n) => Some(*n),
            CellValue::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
            CellValue::Currency(c) => Some(c.amount),
            _ => None,
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::String(s) => f.write_str(s),
            CellValue::Number(n) => f.write_str(&format::format_number(*n)),
            CellValue::Boolean(b) => f.write_str(format::format_boolean(*b)),
            CellValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            CellValue::Time(t) => write!(f, "{}", t.format("%H:%M:%S")),
            CellValue::Currency(c) => {
                f.write_str(&format::format_currency(c, format::DEFAULT_CURRENCY_DECIMALS))
            }
            CellValue::Percentage(p) => f.write_str(&format::format_percentage(*p, None)),
        }
    }
}

/// Column data type, used for inference and display only
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnDataType {
    String,
    Number,
    Boolean,
    Date,
    Time,
    Currency,
    Percentage,
}

impl ColumnDataType {
    pub fn name(self) -> &'static str {
        match self {
            ColumnDataType::String => "string",
            ColumnDataType::Number => "number",
            ColumnDataType::Boolean => "boolean",
            ColumnDataType::Date => "date",
            ColumnDataType::Time => "time",
            ColumnDataType::Currency => "currency",
            ColumnDataType::Percentage => "percentage",
        }
    }
}

impl fmt::Display for ColumnDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer() {
        assert_eq!(CellValue::infer("  "), CellValue::Empty);
        assert_eq!(CellValue::infer("TRUE"), CellValue::Boolean(true));
        assert_eq!(CellValue::infer("false"), CellValue::Boolean(false));
        assert_eq!(CellValue::infer(" 42 "), CellValue::Number(42.0));
        assert_eq!(CellValue::infer("-3.5e2"), CellValue::Number(-350.0));
        assert_eq!(CellValue::infer(" hello "), CellValue::String("hello".to_string()));
        assert_eq!(CellValue::infer("inf"), CellValue::String("inf".to_string()));
        assert_eq!(CellValue::infer("$5"), CellValue::String("$5".to_string()));
    }

    #[test]
    fn test_text() {
        assert_eq!(CellValue::text(" 42 "), CellValue::String("42".to_string()));
        assert_eq!(CellValue::text("\t"), CellValue::Empty);
    }

    #[test]
    fn test_as_number() {
        assert_eq!(CellValue::Number(42.0).as_number(), Some(42.0));
        assert_eq!(CellValue::Boolean(true).as_number(), Some(1.0));
        assert_eq!(CellValue::Percentage(0.25).as_number(), Some(0.25));
        assert_eq!(CellValue::Currency(CurrencyAmount::new(6.5, "$")).as_number(), Some(6.5));
        assert_eq!(CellValue::String("123".to_string()).as_number(), None);
        assert_eq!(CellValue::Empty.as_number(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(CellValue::Empty.to_string(), "");
        assert_eq!(CellValue::Number(42.0).to_string(), "42");
        assert_eq!(CellValue::Number(42.5).to_string(), "42.5");
        assert_eq!(CellValue::Boolean(false).to_string(), "FALSE");
        assert_eq!(
            CellValue::Date(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()).to_string(),
            "2024-01-02"
        );
        assert_eq!(
            CellValue::Time(NaiveTime::from_hms_opt(9, 5, 0).unwrap()).to_string(),
            "09:05:00"
        );
        assert_eq!(CellValue::Currency(CurrencyAmount::new(6.5, "$")).to_string(), "$6.50");
        assert_eq!(CellValue::Percentage(0.07).to_string(), "7%");
    }

    #[test]
    fn test_data_type() {
        assert_eq!(CellValue::Empty.data_type(), None);
        assert_eq!(CellValue::Percentage(0.1).data_type(), Some(ColumnDataType::Percentage));
        assert_eq!(CellValue::from("x").data_type(), Some(ColumnDataType::String));
    }

    #[test]
    fn test_serialization() {
        assert_eq!(serde_json::to_string(&CellValue::Empty).unwrap(), r#"{"type":"empty"}"#);
        assert_eq!(
            serde_json::to_string(&CellValue::Boolean(true)).unwrap(),
            r#"{"type":"bool","value":true}"#
        );
        assert_eq!(
            serde_json::to_string(&CellValue::Number(1.5)).unwrap(),
            r#"{"type":"number","value":1.5}"#
        );
        assert_eq!(
            serde_json::to_string(&CellValue::Date(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()))
                .unwrap(),
            r#"{"type":"date","value":"2024-03-04"}"#
        );

        let value = CellValue::Currency(CurrencyAmount::new(5.0, "€").with_symbol_after(true));
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(
            json,
            r#"{"type":"currency","value":{"amount":5.0,"symbol":"€","symbolAfter":true}}"#
        );
        let back: CellValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
    }
}
