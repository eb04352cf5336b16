// CSV data source and sink implementation
// Author: Gabriel Demetrios Lafis

use std::io::Write;

use super::{build_dataset, DataError, DataSet, DataSink, DataSource, FileFormat, RawCell};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// CSV data source over an uploaded buffer
pub struct CsvSource<'a> {
    name: String,
    bytes: &'a [u8],
}

impl<'a> CsvSource<'a> {
    /// Create a new source over the uploaded bytes
    pub fn new(name: &str, bytes: &'a [u8]) -> Self {
        CsvSource {
            name: name.to_string(),
            bytes,
        }
    }
}

impl DataSource for CsvSource<'_> {
    fn read(&self) -> Result<DataSet, DataError> {
        let bytes = self.bytes.strip_prefix(UTF8_BOM).unwrap_or(self.bytes);

        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(bytes);

        let headers: Vec<String> = csv_reader
            .headers()
            .map_err(|e| DataError::ParseFailure(e.to_string()))?
            .iter()
            .map(|s| s.to_string())
            .collect();

        if headers.is_empty() {
            return Err(DataError::ParseFailure("No columns to parse from file".to_string()));
        }

        let mut records = Vec::new();
        for result in csv_reader.records() {
            let record = result.map_err(|e| DataError::ParseFailure(e.to_string()))?;
            records.push(record.iter().map(RawCell::from_text).collect());
        }

        let dataset = build_dataset(headers, records)?;
        log::debug!(
            "Parsed CSV '{}': {} rows x {} columns",
            self.name,
            dataset.len(),
            dataset.column_count()
        );

        Ok(dataset)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn format(&self) -> FileFormat {
        FileFormat::Csv
    }
}

/// CSV data sink writing a header row and no index column
pub struct CsvSink;

impl CsvSink {
    /// Create a new comma-delimited sink
    pub fn new() -> Self {
        CsvSink
    }
}

impl Default for CsvSink {
    fn default() -> Self {
        Self::new()
    }
}

impl DataSink for CsvSink {
    fn write(&self, data: &DataSet) -> Result<Vec<u8>, DataError> {
        let mut csv_writer = csv::WriterBuilder::new().from_writer(Vec::new());

        let export_err = |e: csv::Error| DataError::Export(e.to_string());

        // A zero-column table still gets a (blank) header line
        if data.column_count() > 0 {
            csv_writer
                .write_record(data.schema.fields.iter().map(|field| field.name.as_str()))
                .map_err(export_err)?;

            for row in &data.data {
                csv_writer
                    .write_record(row.values.iter().map(|value| value.to_text()))
                    .map_err(export_err)?;
            }
        }

        let mut bytes = csv_writer
            .into_inner()
            .map_err(|e| DataError::Export(e.to_string()))?;
        if data.column_count() == 0 {
            bytes.write_all(b"\n")?;
        }

        Ok(bytes)
    }

    fn format(&self) -> FileFormat {
        FileFormat::Csv
    }
}
