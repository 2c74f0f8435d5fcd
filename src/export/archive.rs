//! Zip packaging of a batch.

use super::ExportRecord;
use crate::error::Result;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Default file name of the batch archive.
pub const ARCHIVE_NAME: &str = "ocean_data_package.zip";

/// Pack records into one deflate-compressed zip, in order.
///
/// Entries are named exactly by their output name with no directory
/// structure. Names must be unique; the batch guarantees this.
pub fn package(records: &[ExportRecord]) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for record in records {
        zip.start_file(record.name(), options)?;
        zip.write_all(record.bytes())?;
    }

    Ok(zip.finish()?.into_inner())
}
