//! CanvasSheets runner: addresses, typed import, export and viewport windows

use anyhow::Result;
use canvassheets_cli::{commands, read_input, Config};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "canvassheets")]
#[command(author, version, about = "Table addressing and tabular-interchange tool")]
struct Cli {
    /// JSON format config (overrides CANVASSHEETS_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a range address such as `body[A1:B2]`
    Address {
        text: String,
    },

    /// Print the column label of a 0-based index
    Label {
        index: u32,
    },

    /// Print the 0-based index of a column label
    Column {
        label: String,
    },

    /// Import comma-delimited text as typed rows (stdin when no file)
    Import {
        file: Option<PathBuf>,

        /// Field delimiter (default: comma)
        #[arg(short, long, default_value = ",")]
        delimiter: char,
    },

    /// Export the body of a table JSON document as comma-delimited text
    Export {
        file: PathBuf,
    },

    /// Interpret clipboard text for a region (stdin when no file)
    Paste {
        file: Option<PathBuf>,

        /// Target region token
        #[arg(short, long, default_value = "body")]
        region: String,
    },

    /// Compute the visible row and column window
    Viewport {
        /// Visible rect as minX,minY,maxX,maxY
        #[arg(long, allow_hyphen_values = true)]
        rect: String,

        /// Cell size as width,height
        #[arg(long)]
        cell: String,

        #[arg(long)]
        rows: usize,

        #[arg(long)]
        cols: usize,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("canvassheets=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?.with_format_config_path(cli.config);

    let output = match cli.command {
        Commands::Address { text } => commands::address(&text)?,
        Commands::Label { index } => commands::label(index),
        Commands::Column { label } => commands::column(&label)?,
        Commands::Import { file, delimiter } => {
            let text = read_input(file.as_deref())?;
            commands::import(&text, delimiter, &config.format_config()?)?
        }
        Commands::Export { file } => {
            let text = read_input(Some(&file))?;
            commands::export(&text, &config.format_config()?)?
        }
        Commands::Paste { file, region } => {
            let text = read_input(file.as_deref())?;
            commands::paste(&text, &region)?
        }
        Commands::Viewport {
            rect,
            cell,
            rows,
            cols,
        } => commands::viewport(&rect, &cell, rows, cols)?,
    };

    println!("{output}");
    Ok(())
}
