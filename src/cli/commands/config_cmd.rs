//! Configuration management commands.

use pdflinks::config::{Config, Settings};

use crate::cli::icons::Icon;

/// Print the effective settings as JSON.
pub async fn cmd_config_show(settings: &Settings, config: &Config) -> anyhow::Result<()> {
    match config.source_path {
        Some(ref path) => eprintln!("{} Config file: {}", Icon::Detail, path.display()),
        None => eprintln!("{} No config file found, using defaults", Icon::Warn),
    }

    println!("{}", serde_json::to_string_pretty(settings)?);
    Ok(())
}
