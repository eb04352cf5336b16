// Supported file formats
// Author: Gabriel Demetrios Lafis

use std::fmt;
use std::path::Path;

use serde::Serialize;

use super::DataError;

/// MIME type of delimited text exports
pub const CSV_MIME: &str = "text/csv";

/// MIME type of spreadsheet exports
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Base name of every exported file
pub const EXPORT_FILE_STEM: &str = "processed_data";

/// File format for uploads and exports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Csv,
    Xlsx,
}

impl FileFormat {
    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::Csv => "csv",
            FileFormat::Xlsx => "xlsx",
        }
    }

    /// Get the content type for this format
    pub fn mime_type(&self) -> &'static str {
        match self {
            FileFormat::Csv => CSV_MIME,
            FileFormat::Xlsx => XLSX_MIME,
        }
    }

    /// Name offered for the download, e.g. `processed_data.csv`
    pub fn export_file_name(&self) -> String {
        format!("{}.{}", EXPORT_FILE_STEM, self.extension())
    }

    /// Parse a file format from a file extension (without the dot)
    pub fn from_extension(ext: &str) -> Result<Self, DataError> {
        match ext.to_lowercase().as_str() {
            "csv" => Ok(FileFormat::Csv),
            "xlsx" => Ok(FileFormat::Xlsx),
            other => Err(DataError::UnsupportedFormat(format!(".{}", other))),
        }
    }

    /// Detect the format of an uploaded file from its name
    pub fn from_file_name(name: &str) -> Result<Self, DataError> {
        let ext = Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| DataError::UnsupportedFormat(format!("'{}' has no extension", name)))?;

        Self::from_extension(ext)
    }

    /// Parse the export choice offered in the UI (`CSV` or `Excel`)
    pub fn from_choice(choice: &str) -> Result<Self, DataError> {
        match choice.to_lowercase().as_str() {
            "csv" => Ok(FileFormat::Csv),
            "excel" | "xlsx" => Ok(FileFormat::Xlsx),
            other => Err(DataError::UnsupportedFormat(format!(
                "Unknown export format: {}", other
            ))),
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileFormat::Csv => write!(f, "CSV"),
            FileFormat::Xlsx => write!(f, "Excel"),
        }
    }
}
