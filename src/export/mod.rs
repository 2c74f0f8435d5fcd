//! Export of flattened tables.
//!
//! This module names, serializes and packages output spreadsheets.

pub mod archive;
mod naming;
pub mod spreadsheet;

pub use archive::{package, ARCHIVE_NAME};
pub use naming::output_name;
pub use spreadsheet::to_xlsx;

use crate::config::ExportConfig;
use crate::error::{GridsheetError, Result};
use std::path::{Path, PathBuf};

/// One produced spreadsheet: its output name and encoded bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRecord {
    name: String,
    bytes: Vec<u8>,
}

impl ExportRecord {
    /// Create a record.
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Output file name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Encoded spreadsheet.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Write the record into `dir` under its output name.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&self.name);
        std::fs::write(&path, &self.bytes)
            .map_err(|e| GridsheetError::file_write(path.clone(), e))?;
        Ok(path)
    }
}

/// Write the archive and, if configured, each record to the output directory.
///
/// Returns the paths written, archive first. Nothing is written for an
/// empty record list.
pub fn write_outputs(records: &[ExportRecord], config: &ExportConfig) -> Result<Vec<PathBuf>> {
    if records.is_empty() {
        return Ok(Vec::new());
    }
    std::fs::create_dir_all(&config.output_dir)
        .map_err(|e| GridsheetError::file_write(config.output_dir.clone(), e))?;

    let archive_path = config.output_dir.join(&config.archive_name);
    std::fs::write(&archive_path, package(records)?)
        .map_err(|e| GridsheetError::file_write(archive_path.clone(), e))?;
    tracing::info!("Wrote {} ({} entries)", archive_path.display(), records.len());

    let mut written = vec![archive_path];
    if config.write_individual {
        for record in records {
            written.push(record.write_to(&config.output_dir)?);
        }
    }
    Ok(written)
}
