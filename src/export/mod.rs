//! Link table export.

mod csv;
mod xlsx;

pub use self::csv::to_csv;
pub use self::xlsx::{to_xlsx, SHEET_NAME};

use std::path::Path;

use thiserror::Error;

use crate::models::LinkEntry;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to serialize rows: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Failed to build workbook: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub fn default_filename(&self) -> &'static str {
        match self {
            Self::Csv => "extracted_links.csv",
            Self::Xlsx => "extracted_links.xlsx",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
        }
    }

    /// Encode links as file contents.
    pub fn render(&self, links: &[LinkEntry]) -> Result<Vec<u8>, ExportError> {
        match self {
            Self::Csv => Ok(to_csv(links).into_bytes()),
            Self::Xlsx => to_xlsx(links),
        }
    }

    /// Encode links and write them to `path`.
    pub async fn write_to(&self, path: &Path, links: &[LinkEntry]) -> Result<(), ExportError> {
        let bytes = self.render(links)?;
        tokio::fs::write(path, &bytes).await?;
        tracing::info!(
            "Wrote {} links as {} to {}",
            links.len(),
            self.as_str(),
            path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filenames() {
        assert_eq!(ExportFormat::Csv.default_filename(), "extracted_links.csv");
        assert_eq!(ExportFormat::Xlsx.default_filename(), "extracted_links.xlsx");
    }

    #[tokio::test]
    async fn write_to_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(ExportFormat::Csv.default_filename());
        let links = vec![LinkEntry::new(1, "http://a")];

        ExportFormat::Csv.write_to(&path, &links).await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Page,URL\n1,http://a");
    }
}
