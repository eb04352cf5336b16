// Column projection
// Author: Gabriel Demetrios Lafis

use std::collections::HashSet;

use crate::data::{DataSet, Row, Schema};
use super::{DataProcessor, ProcessingError};

/// Select specific columns from a dataset, in the order given.
///
/// An empty selection yields a table with no columns and the same number
/// of rows.
pub struct SelectTransform {
    columns: Vec<String>,
}

impl SelectTransform {
    /// Create a new select transform with the given column names
    pub fn new(columns: Vec<String>) -> Self {
        SelectTransform { columns }
    }

    /// Selected column names
    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

impl DataProcessor for SelectTransform {
    fn process(&self, input: &DataSet) -> Result<DataSet, ProcessingError> {
        let mut seen = HashSet::new();
        let mut indices = Vec::with_capacity(self.columns.len());
        let mut selected_fields = Vec::with_capacity(self.columns.len());

        for col in &self.columns {
            if !seen.insert(col.as_str()) {
                return Err(ProcessingError::InvalidArgument(format!(
                    "Column '{}' selected more than once",
                    col
                )));
            }

            let index = input.schema.index_of(col).ok_or_else(|| {
                ProcessingError::InvalidArgument(format!("Column '{}' not found", col))
            })?;
            indices.push(index);
            selected_fields.push(input.schema.fields[index].clone());
        }

        let mut result = DataSet::new(Schema::new(selected_fields));
        for row in &input.data {
            let values = indices.iter().map(|&i| row.values[i].clone()).collect();
            result.add_row(Row::new(values))?;
        }

        Ok(result)
    }

    fn name(&self) -> &str {
        "select"
    }
}
