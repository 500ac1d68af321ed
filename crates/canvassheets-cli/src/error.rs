use canvassheets_core::AddressError;
use thiserror::Error;

/// Runner error type
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Address error: {0}")]
    Address(#[from] AddressError),

    #[error("Bad argument: {0}")]
    BadArgument(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;
