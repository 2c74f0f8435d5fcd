//! Batch processing.
//!
//! Runs every input through read → select → flatten → serialize, strictly in
//! order, and collects the outcome in a caller-owned [`BatchResult`]. A
//! failing input is recorded and skipped; it never stops the batch.

use crate::data::{DataReader, GriddedDataset};
use crate::error::{FailureKind, GridsheetError, Result};
use crate::export::{output_name, package, to_xlsx, ExportRecord};
use crate::flatten::flatten;
use crate::select::{Selection, SelectionPolicy};
use std::path::{Path, PathBuf};

/// A skipped input and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFailure {
    /// Input name as reported.
    pub input: String,
    /// Failure class.
    pub kind: FailureKind,
    /// User-facing message.
    pub message: String,
}

/// Accumulated outcome of a batch.
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    records: Vec<ExportRecord>,
    failures: Vec<InputFailure>,
}

impl BatchResult {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of one input.
    ///
    /// A record whose output name was already produced earlier in the batch
    /// is rejected as a [`FailureKind::DuplicateOutput`]; the earlier record
    /// is kept.
    pub fn push(&mut self, input: &str, outcome: Result<ExportRecord>) {
        let outcome = outcome.and_then(|record| {
            if self.record(record.name()).is_some() {
                Err(GridsheetError::DuplicateOutput {
                    name: record.name().to_string(),
                })
            } else {
                Ok(record)
            }
        });

        match outcome {
            Ok(record) => {
                tracing::info!("{} -> {}", input, record.name());
                self.records.push(record);
            }
            Err(err) => {
                let failure = InputFailure {
                    input: input.to_string(),
                    kind: err.kind(),
                    message: err.report(input),
                };
                tracing::warn!("{}", failure.message);
                self.failures.push(failure);
            }
        }
    }

    /// Successful records in input order.
    pub fn records(&self) -> &[ExportRecord] {
        &self.records
    }

    /// Failed inputs in input order.
    pub fn failures(&self) -> &[InputFailure] {
        &self.failures
    }

    /// Look up a record by output name.
    pub fn record(&self, name: &str) -> Option<&ExportRecord> {
        self.records.iter().find(|r| r.name() == name)
    }

    /// Number of inputs that produced a record.
    pub fn success_count(&self) -> usize {
        self.records.len()
    }

    /// Number of inputs seen, successful or not.
    pub fn attempted(&self) -> usize {
        self.records.len() + self.failures.len()
    }

    /// Completion line shown to the user.
    pub fn summary(&self) -> String {
        format!("Successfully processed {} files!", self.success_count())
    }

    /// Zip every record into one archive.
    pub fn package(&self) -> Result<Vec<u8>> {
        package(&self.records)
    }
}

/// Flatten and serialize an already loaded dataset.
pub fn export_dataset(dataset: &GriddedDataset, selection: &Selection) -> Result<ExportRecord> {
    let table = flatten(dataset, selection)?;
    let tag = selection
        .tag()
        .ok_or_else(|| GridsheetError::unsupported(dataset.source()))?;

    tracing::debug!(
        "{}: {} rows, columns {:?}",
        dataset.source(),
        table.len(),
        table.columns()
    );

    let bytes = to_xlsx(&table)?;
    Ok(ExportRecord::new(output_name(dataset.source(), tag), bytes))
}

/// Process one NetCDF file into a spreadsheet record.
pub fn process_input(path: &Path, policy: &SelectionPolicy) -> Result<ExportRecord> {
    let (dataset, selection) = load(path, policy)?;
    export_dataset(&dataset, &selection)
}

/// Read the selected grids; the file is closed when this returns.
fn load(path: &Path, policy: &SelectionPolicy) -> Result<(GriddedDataset, Selection)> {
    let reader = DataReader::open(path)?;
    let names = reader.variable_names();
    let selection = policy.select(names.iter().map(String::as_str));
    if selection == Selection::Unsupported {
        return Err(GridsheetError::unsupported(reader.source_name()));
    }
    tracing::debug!("{}: selected {:?}", path.display(), selection);

    let dataset = reader.read_dataset(&selection.variables())?;
    Ok((dataset, selection))
}

/// Process inputs in order, appending every outcome to `result`.
///
/// Only an empty input list is an error; per-input failures are recorded in
/// `result`.
pub fn process_batch(
    inputs: &[PathBuf],
    policy: &SelectionPolicy,
    result: &mut BatchResult,
) -> Result<()> {
    if inputs.is_empty() {
        return Err(GridsheetError::NoInputs);
    }

    for (idx, path) in inputs.iter().enumerate() {
        let input = display_name(path);
        tracing::debug!("[{}/{}] {}", idx + 1, inputs.len(), path.display());
        result.push(&input, process_input(path, policy));
    }

    tracing::info!(
        "{} of {} inputs processed",
        result.success_count(),
        result.attempted()
    );
    Ok(())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
