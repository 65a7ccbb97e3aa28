//! pdflinks - extract hyperlinks from PDF documents.
//!
//! Core library: document link reading, deduplication, title resolution
//! against a remote lookup service, and CSV/XLSX export.

pub mod config;
pub mod document;
pub mod export;
pub mod http_client;
pub mod models;
pub mod services;
