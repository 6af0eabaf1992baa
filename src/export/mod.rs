//! Flat exports of the record collection (CSV / JSON) and JSON import.

mod csv;
mod fs_utils;
mod json;

pub use self::csv::{SessionRow, write_csv};
pub use self::json::{read_json, write_json};
pub use fs_utils::ensure_writable;

use crate::errors::{AppError, AppResult};
use crate::models::Record;
use clap::ValueEnum;
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    pub fn parse(s: &str) -> AppResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(AppError::InvalidExportFormat(other.to_string())),
        }
    }
}

/// Write `records` to `path` in `format`; an existing file needs `force`.
pub fn export_records(
    records: &[Record],
    format: ExportFormat,
    path: &Path,
    force: bool,
) -> AppResult<()> {
    ensure_writable(path, force)?;
    match format {
        ExportFormat::Csv => write_csv(path, records),
        ExportFormat::Json => write_json(path, records),
    }
}
