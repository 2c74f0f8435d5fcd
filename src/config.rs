//! Export configuration.

use crate::export::ARCHIVE_NAME;
use crate::select::SelectionPolicy;
use std::path::PathBuf;

/// Settings for one batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    /// Directory receiving the archive and spreadsheets.
    pub output_dir: PathBuf,
    /// File name of the archive.
    pub archive_name: String,
    /// Also write each spreadsheet as its own file.
    pub write_individual: bool,
    /// Variable selection rules.
    pub policy: SelectionPolicy,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            archive_name: ARCHIVE_NAME.to_string(),
            write_individual: true,
            policy: SelectionPolicy::default(),
        }
    }
}

impl ExportConfig {
    /// Set the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the archive file name.
    pub fn with_archive_name(mut self, name: impl Into<String>) -> Self {
        self.archive_name = name.into();
        self
    }

    /// Choose whether individual spreadsheets are written.
    pub fn with_individual_files(mut self, enabled: bool) -> Self {
        self.write_individual = enabled;
        self
    }

    /// Set the selection policy.
    pub fn with_policy(mut self, policy: SelectionPolicy) -> Self {
        self.policy = policy;
        self
    }
}
