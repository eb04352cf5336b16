// Cleaning operations applied to the working table in place
// Author: Gabriel Demetrios Lafis

use std::collections::HashSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::data::{DataSet, DataType, Value};
use super::{mean, InPlaceDataProcessor, ProcessingError};

/// A cleaning action the user can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleaningOperation {
    RemoveDuplicates,
    FillMissingMean,
}

impl CleaningOperation {
    /// Apply the operation to the dataset
    pub fn apply(&self, data: &mut DataSet) -> Result<usize, ProcessingError> {
        let processor: &dyn InPlaceDataProcessor = match self {
            CleaningOperation::RemoveDuplicates => &DropDuplicates,
            CleaningOperation::FillMissingMean => &FillMissingMean,
        };

        let changed = processor.process_in_place(data)?;
        log::debug!("{} changed {}", processor.name(), changed);
        Ok(changed)
    }

    /// Message shown once the operation has run
    pub fn success_message(&self) -> &'static str {
        match self {
            CleaningOperation::RemoveDuplicates => "Duplicates removed successfully!",
            CleaningOperation::FillMissingMean => "Missing values filled with column means!",
        }
    }
}

/// Hashable image of a cell, used to compare whole rows
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum CellKey {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(u64),
    String(String),
    DateTime(NaiveDateTime),
}

impl From<&Value> for CellKey {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => CellKey::Null,
            Value::Boolean(b) => CellKey::Boolean(*b),
            Value::Integer(i) => CellKey::Integer(*i),
            // -0.0 and 0.0 compare equal
            Value::Float(f) => CellKey::Float(if *f == 0.0 { 0 } else { f.to_bits() }),
            Value::String(s) => CellKey::String(s.clone()),
            Value::DateTime(dt) => CellKey::DateTime(*dt),
        }
    }
}

/// Remove rows identical to an earlier row across every column.
///
/// The first occurrence is kept and row order is otherwise preserved;
/// missing values compare equal to each other.
pub struct DropDuplicates;

impl InPlaceDataProcessor for DropDuplicates {
    fn process_in_place(&self, input: &mut DataSet) -> Result<usize, ProcessingError> {
        if input.column_count() == 0 {
            return Ok(0);
        }

        let before = input.len();
        let mut seen = HashSet::with_capacity(before);
        input
            .data
            .retain(|row| seen.insert(row.values.iter().map(CellKey::from).collect::<Vec<_>>()));

        Ok(before - input.len())
    }

    fn name(&self) -> &str {
        "drop_duplicates"
    }
}

/// Replace missing values of numeric columns with the mean of the column's
/// present values.
///
/// Non-numeric columns are untouched. A numeric column with no present
/// value has no mean and is left as it is. Integer columns that receive a
/// fill become float columns.
pub struct FillMissingMean;

impl InPlaceDataProcessor for FillMissingMean {
    fn process_in_place(&self, input: &mut DataSet) -> Result<usize, ProcessingError> {
        let mut filled = 0;

        for column in input.numeric_columns() {
            let present = input.numeric_values(column);
            let missing = input.len() - present.len();
            if missing == 0 {
                continue;
            }

            let column_mean = match mean(&present) {
                Some(m) => m,
                None => {
                    log::debug!(
                        "Column '{}' has no values, leaving it unfilled",
                        input.schema.fields[column].name
                    );
                    continue;
                }
            };

            if input.schema.fields[column].data_type == DataType::Integer {
                promote_to_float(input, column);
            }

            for row in &mut input.data {
                if let Some(value) = row.get_mut(column) {
                    if value.is_null() {
                        *value = Value::Float(column_mean);
                        filled += 1;
                    }
                }
            }
        }

        Ok(filled)
    }

    fn name(&self) -> &str {
        "fill_missing_mean"
    }
}

fn promote_to_float(input: &mut DataSet, column: usize) {
    input.schema.fields[column].data_type = DataType::Float;
    for row in &mut input.data {
        if let Some(value) = row.get_mut(column) {
            if let Value::Integer(i) = *value {
                *value = Value::Float(i as f64);
            }
        }
    }
}
