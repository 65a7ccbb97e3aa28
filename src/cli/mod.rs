//! Command-line interface for pdflinks.

mod commands;
pub mod icons;
pub mod progress;
pub mod table;

pub use commands::{is_verbose, run};
