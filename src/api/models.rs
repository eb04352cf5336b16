// API request and response models
// Author: Gabriel Demetrios Lafis

use serde::{Deserialize, Serialize};

use crate::data::{DataSet, FileFormat};
use crate::processing::{CleaningOperation, CorrelationMatrix, DatasetInfo, Description};
use crate::session::Session;

/// Rows shown in the table preview
pub const PREVIEW_ROWS: usize = 5;

/// Query of an upload request
#[derive(Debug, Clone, Deserialize)]
pub struct UploadQuery {
    pub filename: String,
}

/// Request to change the column selection
#[derive(Debug, Clone, Deserialize)]
pub struct SelectColumnsRequest {
    pub columns: Vec<String>,
}

/// Query of an export request
#[derive(Debug, Clone, Deserialize)]
pub struct ExportQuery {
    #[serde(default = "default_export_format")]
    pub format: String,
}

fn default_export_format() -> String {
    "csv".to_string()
}

/// Uploaded file as shown to the user
#[derive(Debug, Clone, Serialize)]
pub struct FileView {
    pub name: String,
    pub size: usize,
    pub size_label: String,
    pub format: FileFormat,
}

/// State of a session as shown to the user
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub id: String,
    pub file: FileView,
    pub columns: Vec<String>,
    pub selected: Vec<String>,
    pub operations: Vec<CleaningOperation>,
    pub rows: usize,
    pub column_count: usize,
    pub preview: DataSet,
}

impl SessionView {
    pub fn new(id: &str, session: &Session) -> Self {
        let file = session.file();
        let table = session.table();

        SessionView {
            id: id.to_string(),
            file: FileView {
                name: file.name.clone(),
                size: file.size,
                size_label: file.size_label(),
                format: file.format,
            },
            columns: session.all_columns(),
            selected: session.selection().to_vec(),
            operations: session.operations().to_vec(),
            rows: table.len(),
            column_count: table.column_count(),
            preview: table.head(PREVIEW_ROWS),
        }
    }
}

/// Result of a cleaning action
#[derive(Debug, Clone, Serialize)]
pub struct CleanResponse {
    pub message: String,
    pub changed: usize,
    pub session: SessionView,
}

/// Overview and descriptive statistics of the working table
#[derive(Debug, Clone, Serialize)]
pub struct SummaryResponse {
    pub info: DatasetInfo,
    pub info_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Description>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Correlation matrix and its heatmap
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matrix: Option<CorrelationMatrix>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// One rendered histogram
#[derive(Debug, Clone, Serialize)]
pub struct HistogramChart {
    pub column: String,
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
    pub image: String,
}

/// Histograms of every numeric column
#[derive(Debug, Clone, Serialize)]
pub struct HistogramsResponse {
    pub charts: Vec<HistogramChart>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}
