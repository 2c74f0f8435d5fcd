//! Error types for Gridsheet.
//!
//! This module provides a unified error handling approach using `thiserror`.
//! Every variant maps onto a coarser [`FailureKind`], which is what the batch
//! reports to the user.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Gridsheet operations.
pub type Result<T> = std::result::Result<T, GridsheetError>;

/// Errors that can occur in Gridsheet.
#[derive(Debug, Error)]
pub enum GridsheetError {
    /// Failed to open a file.
    #[error("Failed to open file: {path}")]
    FileOpen {
        /// Path that could not be opened.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write an output file or create its directory.
    #[error("Failed to write {path}: {source}")]
    FileWrite {
        /// Path that could not be written.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to read NetCDF file.
    #[error("NetCDF error: {0}")]
    NetCDF(String),

    /// None of the accepted names for a coordinate is present.
    #[error("Missing coordinate variable: {names}")]
    MissingCoordinate {
        /// Accepted names, joined for display.
        names: String,
    },

    /// A selected data variable is not present.
    #[error("Variable not found: {name}")]
    MissingVariable {
        /// Variable name.
        name: String,
    },

    /// The time axis could not be decoded.
    #[error("Invalid time axis: {reason}")]
    InvalidTime {
        /// What went wrong.
        reason: String,
    },

    /// Neither the wind pair nor any single-variable candidate is present.
    #[error("{input}: No compatible variables found.")]
    UnsupportedVariables {
        /// Name of the offending input.
        input: String,
    },

    /// A variable's dimensions disagree with the coordinate axes.
    #[error("Shape mismatch for '{variable}': expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        /// Variable name.
        variable: String,
        /// Shape implied by the coordinates.
        expected: Vec<usize>,
        /// Shape found in the file.
        got: Vec<usize>,
    },

    /// The flattened table does not fit in one worksheet.
    #[error("Table has {rows} rows, worksheet limit is {limit}")]
    TooManyRows {
        /// Rows including the header.
        rows: usize,
        /// Worksheet row limit.
        limit: usize,
    },

    /// Spreadsheet serialization failed.
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    /// Archive packaging failed.
    #[error("Archive error: {0}")]
    Archive(String),

    /// Another input of the same batch already produced this output name.
    #[error("Output name already produced in this batch: {name}")]
    DuplicateOutput {
        /// Colliding output name.
        name: String,
    },

    /// A batch was started without any input.
    #[error("No input files given")]
    NoInputs,

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure classes visible at the reporting boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Neither the wind pair nor a candidate variable was present.
    UnsupportedVariables,
    /// The input could not be opened or parsed as a gridded dataset.
    LoadFailure,
    /// Dimensions were inconsistent or the table could not be shaped.
    ShapeFailure,
    /// The input collided with an earlier output name.
    DuplicateOutput,
}

impl GridsheetError {
    /// Create a FileOpen error.
    pub fn file_open(path: PathBuf, source: std::io::Error) -> Self {
        Self::FileOpen { path, source }
    }

    /// Create a FileWrite error.
    pub fn file_write(path: PathBuf, source: std::io::Error) -> Self {
        Self::FileWrite { path, source }
    }

    /// Create a MissingCoordinate error from the accepted names.
    pub fn missing_coordinate(names: &[&str]) -> Self {
        Self::MissingCoordinate {
            names: names.join(" or "),
        }
    }

    /// Create an InvalidTime error.
    pub fn invalid_time(reason: impl Into<String>) -> Self {
        Self::InvalidTime {
            reason: reason.into(),
        }
    }

    /// Create an UnsupportedVariables error.
    pub fn unsupported(input: impl Into<String>) -> Self {
        Self::UnsupportedVariables {
            input: input.into(),
        }
    }

    /// Create a ShapeMismatch error.
    pub fn shape_mismatch(
        variable: impl Into<String>,
        expected: Vec<usize>,
        got: Vec<usize>,
    ) -> Self {
        Self::ShapeMismatch {
            variable: variable.into(),
            expected,
            got,
        }
    }

    /// Classify this error for reporting.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::UnsupportedVariables { .. } => FailureKind::UnsupportedVariables,
            Self::DuplicateOutput { .. } => FailureKind::DuplicateOutput,
            Self::ShapeMismatch { .. }
            | Self::TooManyRows { .. }
            | Self::Spreadsheet(_)
            | Self::Archive(_) => FailureKind::ShapeFailure,
            Self::FileOpen { .. }
            | Self::FileWrite { .. }
            | Self::NetCDF(_)
            | Self::MissingCoordinate { .. }
            | Self::MissingVariable { .. }
            | Self::InvalidTime { .. }
            | Self::NoInputs
            | Self::Io(_) => FailureKind::LoadFailure,
        }
    }

    /// The user-facing line reported for a failed input.
    ///
    /// Load and shape failures share one message form; the kinds are not
    /// distinguished at this boundary.
    pub fn report(&self, input: &str) -> String {
        match self.kind() {
            FailureKind::UnsupportedVariables => format!("{input}: No compatible variables found."),
            _ => format!("Failed to process {input}: {self}"),
        }
    }
}

impl From<netcdf::Error> for GridsheetError {
    fn from(err: netcdf::Error) -> Self {
        Self::NetCDF(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for GridsheetError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        Self::Spreadsheet(err.to_string())
    }
}

impl From<zip::result::ZipError> for GridsheetError {
    fn from(err: zip::result::ZipError) -> Self {
        Self::Archive(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_report_names_the_input() {
        let err = GridsheetError::unsupported("waves.nc");
        assert_eq!(err.kind(), FailureKind::UnsupportedVariables);
        assert_eq!(err.report("waves.nc"), "waves.nc: No compatible variables found.");
    }

    #[test]
    fn load_and_shape_failures_share_message_form() {
        let load = GridsheetError::NetCDF("bad header".to_string());
        let shape = GridsheetError::shape_mismatch("sst", vec![2, 3, 4], vec![2, 4, 3]);

        assert_eq!(load.kind(), FailureKind::LoadFailure);
        assert_eq!(shape.kind(), FailureKind::ShapeFailure);
        assert_eq!(
            load.report("a.nc"),
            "Failed to process a.nc: NetCDF error: bad header"
        );
        assert!(shape.report("b.nc").starts_with("Failed to process b.nc: Shape mismatch"));
    }

    #[test]
    fn missing_coordinate_lists_aliases() {
        let err = GridsheetError::missing_coordinate(&["valid_time", "time"]);
        assert_eq!(err.to_string(), "Missing coordinate variable: valid_time or time");
    }

    #[test]
    fn netcdf_errors_convert() {
        let err: GridsheetError = netcdf::Error::Str("oops".to_string()).into();
        assert!(matches!(err, GridsheetError::NetCDF(_)));
        assert_eq!(err.kind(), FailureKind::LoadFailure);
    }

    #[test]
    fn write_failure_names_the_path() {
        let source = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = GridsheetError::file_write(PathBuf::from("out/pack.zip"), source);
        assert_eq!(err.to_string(), "Failed to write out/pack.zip: denied");
    }
}
