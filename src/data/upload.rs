// Uploaded file metadata and ingestion
// Author: Gabriel Demetrios Lafis

use serde::Serialize;

use super::{CsvSource, DataError, DataSet, DataSource, FileFormat, XlsxSource};

/// Metadata of the file a session was created from. The raw bytes are
/// dropped once parsed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadedFile {
    pub name: String,
    pub size: usize,
    pub format: FileFormat,
}

impl UploadedFile {
    /// Size in kilobytes with two decimals, e.g. `1.50 KB`
    pub fn size_label(&self) -> String {
        format!("{:.2} KB", self.size as f64 / 1024.0)
    }

    /// Extension of the uploaded file, with the leading dot
    pub fn extension(&self) -> String {
        format!(".{}", self.format.extension())
    }
}

/// Parse an uploaded file into a dataset, choosing the reader by extension.
///
/// # Errors
///
/// `UnsupportedFormat` when the extension is neither `.csv` nor `.xlsx`,
/// `ParseFailure` when the reader rejects the bytes.
pub fn ingest(name: &str, bytes: &[u8]) -> Result<(UploadedFile, DataSet), DataError> {
    let format = FileFormat::from_file_name(name)?;

    let source: Box<dyn DataSource + '_> = match format {
        FileFormat::Csv => Box::new(CsvSource::new(name, bytes)),
        FileFormat::Xlsx => Box::new(XlsxSource::new(name, bytes)),
    };
    let dataset = source.read()?;

    let file = UploadedFile {
        name: source.name().to_string(),
        size: bytes.len(),
        format: source.format(),
    };
    log::info!(
        "Ingested {} '{}' ({}): {} rows, {} columns",
        file.format,
        file.name,
        file.size_label(),
        dataset.len(),
        dataset.column_count()
    );

    Ok((file, dataset))
}
