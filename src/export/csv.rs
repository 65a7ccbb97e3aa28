//! CSV export.

use std::fmt::Write;

use crate::models::LinkEntry;

const HEADER: &str = "Page,URL";

/// Render links as CSV: a `Page,URL` header, then one `<page>,<url>` line
/// per link, newline separated with no trailing newline after the last row.
///
/// URLs are written verbatim unless they contain a comma, quote or line
/// break, in which case they are quoted.
pub fn to_csv(links: &[LinkEntry]) -> String {
    let mut output = String::with_capacity(HEADER.len() + 1 + links.len() * 32);
    output.push_str(HEADER);
    output.push('\n');

    for (i, link) in links.iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        let _ = write!(output, "{},{}", link.page, escape_field(&link.url));
    }
    output
}

fn escape_field(field: &str) -> std::borrow::Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\"")).into()
    } else {
        field.into()
    }
}
