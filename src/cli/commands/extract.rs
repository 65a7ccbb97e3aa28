//! Link extraction command.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use console::style;
use tokio::sync::mpsc;

use pdflinks::config::Settings;
use pdflinks::document::{LopdfParser, ParseError};
use pdflinks::export::ExportFormat;
use pdflinks::models::TitleStatus;
use pdflinks::services::{Session, TitleEvent};

use crate::cli::icons::Icon;
use crate::cli::progress::{spinner, truncate, TitleProgress};
use crate::cli::table::{render_table, title_cell};

/// Width URLs are cut to in per-resolution lines.
const EVENT_URL_WIDTH: usize = 50;

/// What `extract` should do after reading the document.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    pub resolve_titles: bool,
    /// `Some(None)` exports to the default path under the output directory.
    pub csv: Option<Option<PathBuf>>,
    pub xlsx: Option<Option<PathBuf>>,
    pub json: bool,
}

impl ExtractOptions {
    fn exports(&self) -> Vec<(ExportFormat, Option<&Path>)> {
        let mut exports = Vec::new();
        if let Some(ref target) = self.csv {
            exports.push((ExportFormat::Csv, target.as_deref()));
        }
        if let Some(ref target) = self.xlsx {
            exports.push((ExportFormat::Xlsx, target.as_deref()));
        }
        exports
    }
}

/// Extract links, resolve titles, render, then export.
pub async fn cmd_extract(
    settings: &Settings,
    file: &Path,
    options: ExtractOptions,
) -> anyhow::Result<()> {
    let bytes = tokio::fs::read(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let mut session = Session::new();

    let progress = spinner(format!("Extracting links from {}", file.display()));
    let extracted = session.extract(&LopdfParser, &bytes).await;
    progress.finish_and_clear();

    if let Err(e) = extracted {
        return Err(extraction_failed(file, e));
    }

    if let Some(summary) = session.summary() {
        eprintln!("{} {}", Icon::Success, summary);
    }

    if !session.has_links() {
        if !options.exports().is_empty() {
            eprintln!("{} Nothing to export", Icon::Warn);
        }
        if options.json {
            println!("{}", serde_json::to_string_pretty(&session.report())?);
        }
        return Ok(());
    }

    if options.resolve_titles {
        resolve_titles(settings, &session).await?;
    } else {
        tracing::debug!("Title resolution disabled");
    }

    if options.json {
        println!("{}", serde_json::to_string_pretty(&session.report())?);
    } else {
        for line in render_table(&session.rows()) {
            println!("{}", line);
        }
    }

    for (format, target) in options.exports() {
        let path = target
            .map(Path::to_path_buf)
            .unwrap_or_else(|| settings.output_dir.join(format.default_filename()));
        format
            .write_to(&path, session.links())
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        eprintln!(
            "{} Saved {} export to {}",
            Icon::Success,
            format.as_str().to_uppercase(),
            path.display()
        );
    }

    Ok(())
}

/// The single error reported when a document cannot be read.
fn extraction_failed(file: &Path, e: ParseError) -> anyhow::Error {
    anyhow::Error::new(e).context(format!(
        "An error occurred while extracting links from {}",
        file.display()
    ))
}

/// Resolve every distinct URL, reporting each result as it lands.
async fn resolve_titles(settings: &Settings, session: &Session) -> anyhow::Result<()> {
    let resolver = settings
        .title_resolver()
        .context("Failed to set up title lookup")?;

    let total = session.distinct_urls().len();
    eprintln!(
        "{} Resolving titles for {} URLs via {}",
        Icon::Info,
        total,
        style(&settings.lookup_url).dim()
    );

    // Event channel for progress updates
    let (event_tx, mut event_rx) = mpsc::channel::<TitleEvent>(100);
    let progress = Arc::new(TitleProgress::new(total as u64));

    // Spawn event handler task (UI layer)
    let progress_clone = progress.clone();
    let event_handler = tokio::spawn(async move {
        let mut failed = 0usize;
        while let Some(event) = event_rx.recv().await {
            match event {
                TitleEvent::Resolved { url, result } => {
                    let status = result.status();
                    if status != TitleStatus::Success {
                        failed += 1;
                    }
                    progress_clone.println(&format!(
                        "  {} {} {} {}",
                        Icon::for_status(status),
                        truncate(&url, EVENT_URL_WIDTH),
                        Icon::Detail,
                        title_cell(status, Some(&result))
                    ));
                    progress_clone.inc();
                }
            }
        }
        failed
    });

    session.resolve_titles(&resolver, Some(event_tx)).wait().await;

    // All senders are gone once the tasks finish, which ends the handler.
    let failed = event_handler.await.unwrap_or(0);
    progress.finish();

    if failed > 0 {
        eprintln!(
            "{} Resolved {} titles ({} failed)",
            Icon::Warn,
            total - failed,
            failed
        );
    } else {
        eprintln!("{} Resolved {} titles", Icon::Success, total);
    }
    Ok(())
}
