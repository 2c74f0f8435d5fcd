//! Output file naming.

use std::path::Path;

/// Extension of accepted input files.
const INPUT_SUFFIX: &str = ".nc";

/// Derive the spreadsheet name for an input.
///
/// Only the final path component is used. A trailing `.nc` is replaced by
/// `_<tag>.xlsx`; any other name gets `_<tag>.xlsx` appended unchanged.
pub fn output_name(input: &str, tag: &str) -> String {
    let base = Path::new(input)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| input.to_string());

    match base.strip_suffix(INPUT_SUFFIX) {
        Some(stem) => format!("{stem}_{tag}.xlsx"),
        None => format!("{base}_{tag}.xlsx"),
    }
}
