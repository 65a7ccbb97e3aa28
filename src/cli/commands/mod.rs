//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod config_cmd;
mod extract;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use pdflinks::config::{load_settings, LoadOptions};

pub use extract::ExtractOptions;

#[derive(Parser)]
#[command(name = "pdflinks")]
#[command(about = "Extract hyperlinks from PDF documents and resolve their page titles")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Title lookup endpoint (overrides config file)
    #[arg(long, global = true, env = "PDFLINKS_LOOKUP_URL")]
    endpoint: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Extract links from a PDF and resolve their titles
    Extract {
        /// PDF file to read
        file: PathBuf,
        /// Skip title resolution
        #[arg(long)]
        no_titles: bool,
        /// Export links as CSV [default path: <output_dir>/extracted_links.csv]
        #[arg(long, value_name = "PATH", num_args = 0..=1, require_equals = true)]
        csv: Option<Option<PathBuf>>,
        /// Export links as XLSX [default path: <output_dir>/extracted_links.xlsx]
        #[arg(long, value_name = "PATH", num_args = 0..=1, require_equals = true)]
        xlsx: Option<Option<PathBuf>>,
        /// Print the result as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective settings
    Show,
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let options = LoadOptions {
        config_path: cli.config,
    };
    let (mut settings, config) = load_settings(options).await?;

    if let Some(endpoint) = cli.endpoint.filter(|s| !s.is_empty()) {
        settings.lookup_url = endpoint;
    }

    match cli.command {
        Commands::Extract {
            file,
            no_titles,
            csv,
            xlsx,
            json,
        } => {
            let options = ExtractOptions {
                resolve_titles: settings.resolve_titles && !no_titles,
                csv,
                xlsx,
                json,
            };
            extract::cmd_extract(&settings, &file, options).await
        }
        Commands::Config { command } => match command {
            ConfigCommands::Show => config_cmd::cmd_config_show(&settings, &config).await,
        },
    }
}
