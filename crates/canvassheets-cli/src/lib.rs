pub mod commands;
pub mod config;
pub mod error;

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::Context;

pub use config::Config;
pub use error::CliError;

/// Read a file, or stdin when no path is given
pub fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("Failed to read '{}'", path.display()))
        }
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}
