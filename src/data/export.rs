// Export of the working table
// Author: Gabriel Demetrios Lafis

use std::io::Cursor;

use super::{CsvSink, DataError, DataSet, DataSink, FileFormat, XlsxSink};

/// A serialized table ready for download
#[derive(Debug, Clone)]
pub struct ExportBuffer {
    buffer: Cursor<Vec<u8>>,
    pub format: FileFormat,
}

impl ExportBuffer {
    /// Content type of the buffer
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// Download name, `processed_data.<ext>`
    pub fn file_name(&self) -> String {
        self.format.export_file_name()
    }

    /// Current read position; always zero for a fresh export
    pub fn position(&self) -> u64 {
        self.buffer.position()
    }

    /// Size of the serialized file in bytes
    pub fn len(&self) -> usize {
        self.buffer.get_ref().len()
    }

    /// Whether nothing was written
    pub fn is_empty(&self) -> bool {
        self.buffer.get_ref().is_empty()
    }

    /// Take the file contents
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer.into_inner()
    }
}

/// Serialize the whole dataset in the chosen format
pub fn export(data: &DataSet, format: FileFormat) -> Result<ExportBuffer, DataError> {
    let sink: Box<dyn DataSink> = match format {
        FileFormat::Csv => Box::new(CsvSink::new()),
        FileFormat::Xlsx => Box::new(XlsxSink::new()),
    };

    let mut buffer = Cursor::new(sink.write(data)?);
    buffer.set_position(0);

    log::info!(
        "Exported {} rows x {} columns as {} ({} bytes)",
        data.len(),
        data.column_count(),
        sink.format(),
        buffer.get_ref().len()
    );

    Ok(ExportBuffer {
        buffer,
        format: sink.format(),
    })
}
