// Per-user session holding the working table
// Author: Gabriel Demetrios Lafis

use crate::data::{ingest, DataError, DataSet, UploadedFile};
use crate::processing::{CleaningOperation, DataProcessor, ProcessingError, SelectTransform};

/// State owned by one browser session.
///
/// The working table is always the projection of the uploaded table onto
/// the current selection, followed by the cleaning operations in the
/// order the user triggered them.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    file: UploadedFile,
    source: DataSet,
    selection: Vec<String>,
    operations: Vec<CleaningOperation>,
    table: DataSet,
}

impl Session {
    /// Start a session over a parsed upload, with every column selected
    pub fn new(file: UploadedFile, source: DataSet) -> Self {
        Session {
            file,
            selection: source.column_names(),
            operations: Vec::new(),
            table: source.clone(),
            source,
        }
    }

    /// Parse an upload and start a session over it
    pub fn from_upload(name: &str, bytes: &[u8]) -> Result<Self, DataError> {
        let (file, dataset) = ingest(name, bytes)?;
        Ok(Self::new(file, dataset))
    }

    /// Metadata of the uploaded file
    pub fn file(&self) -> &UploadedFile {
        &self.file
    }

    /// Every column of the uploaded table, in file order
    pub fn all_columns(&self) -> Vec<String> {
        self.source.column_names()
    }

    /// Currently selected columns, in selection order
    pub fn selection(&self) -> &[String] {
        &self.selection
    }

    /// Cleaning operations applied so far, oldest first
    pub fn operations(&self) -> &[CleaningOperation] {
        &self.operations
    }

    /// The working table
    pub fn table(&self) -> &DataSet {
        &self.table
    }

    /// Change the column selection, rebuilding the working table.
    ///
    /// On error the session is left unchanged.
    pub fn select_columns(&mut self, columns: Vec<String>) -> Result<(), ProcessingError> {
        let projection = SelectTransform::new(columns.clone());
        let mut table = projection.process(&self.source)?;
        for operation in &self.operations {
            operation.apply(&mut table)?;
        }

        log::debug!(
            "{} kept {} of {} columns, replayed {} cleaning operations",
            projection.name(),
            columns.len(),
            self.source.column_count(),
            self.operations.len()
        );

        self.table = table;
        self.selection = columns;
        Ok(())
    }

    /// Run a cleaning operation on the working table and record it
    pub fn apply(&mut self, operation: CleaningOperation) -> Result<usize, ProcessingError> {
        let changed = operation.apply(&mut self.table)?;
        self.operations.push(operation);
        Ok(changed)
    }
}
