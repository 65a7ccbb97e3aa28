//! Link table rendering.

use console::style;
use pdflinks::models::{TitleResult, TitleStatus};
use pdflinks::services::LinkRow;

use super::progress::truncate;

/// Widest URL column before truncation.
const MAX_URL_WIDTH: usize = 60;

/// Render rows as aligned, colored lines: page, URL, then title state.
pub fn render_table(rows: &[LinkRow]) -> Vec<String> {
    let url_width = rows
        .iter()
        .map(|row| row.url.chars().count())
        .max()
        .unwrap_or(0)
        .clamp("URL".len(), MAX_URL_WIDTH);

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(format!(
        "{}",
        style(format!("{:>4}  {:<url_width$}  {}", "Page", "URL", "Title")).bold()
    ));

    for row in rows {
        lines.push(format!(
            "{:>4}  {:<url_width$}  {}",
            row.page,
            truncate(&row.url, url_width),
            title_cell(row.status, row.title.as_ref())
        ));
    }
    lines
}

/// Styled title text: the title, else the error, else the bare status.
/// Yellow while pending, green on success, red on failure.
pub fn title_cell(status: TitleStatus, title: Option<&TitleResult>) -> String {
    let text = title
        .map(TitleResult::display_text)
        .unwrap_or_else(|| "pending".to_string());
    match status {
        TitleStatus::Success => style(text).green().to_string(),
        TitleStatus::Failure => style(text).red().to_string(),
        TitleStatus::Pending => style(text).yellow().to_string(),
    }
}
