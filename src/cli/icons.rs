//! Status glyphs for console output.

use std::fmt;

use console::{style, StyledObject};
use pdflinks::models::TitleStatus;

/// A styled one-character marker printed before a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Success,
    Info,
    Warn,
    Error,
    Pending,
    /// Dim arrow for secondary detail lines.
    Detail,
}

impl Icon {
    /// Marker for a title resolution outcome.
    pub fn for_status(status: TitleStatus) -> Self {
        match status {
            TitleStatus::Success => Self::Success,
            TitleStatus::Failure => Self::Error,
            TitleStatus::Pending => Self::Pending,
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Self::Success => "✓",
            Self::Info | Self::Detail => "→",
            Self::Warn => "!",
            Self::Error => "✗",
            Self::Pending => "…",
        }
    }

    fn styled(self) -> StyledObject<&'static str> {
        let glyph = style(self.glyph());
        match self {
            Self::Success => glyph.green(),
            Self::Info => glyph.cyan(),
            Self::Warn | Self::Pending => glyph.yellow(),
            Self::Error => glyph.red(),
            Self::Detail => glyph.dim(),
        }
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.styled())
    }
}
