use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while parsing `region[A1]` / `region[A1:B2]` references
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "input", rename_all = "snake_case")]
pub enum AddressError {
    /// Missing `[`, missing trailing `]`, or the wrong number of `:` parts
    #[error("invalid range format: {0:?}")]
    InvalidFormat(String),
    /// Region token is not one of the five known regions
    #[error("invalid region: {0:?}")]
    InvalidRegion(String),
    /// Cell part is not letters followed by a positive row number
    #[error("invalid cell reference: {0:?}")]
    InvalidCellReference(String),
}

impl AddressError {
    /// Short machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            AddressError::InvalidFormat(_) => "invalid_format",
            AddressError::InvalidRegion(_) => "invalid_region",
            AddressError::InvalidCellReference(_) => "invalid_cell_reference",
        }
    }
}

pub type Result<T> = std::result::Result<T, AddressError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = AddressError::InvalidRegion("bogus".to_string());
        assert_eq!(err.to_string(), "invalid region: \"bogus\"");
        assert_eq!(err.kind(), "invalid_region");
    }

    #[test]
    fn test_serialization() {
        let err = AddressError::InvalidCellReference("1A".to_string());
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, r#"{"kind":"invalid_cell_reference","input":"1A"}"#);

        let back: AddressError = serde_json::from_str(&json).unwrap();
        assert_eq!(back, err);
    }
}
