// Header normalisation and column type inference
// Author: Gabriel Demetrios Lafis

use std::collections::{HashMap, HashSet};

use chrono::NaiveDateTime;

use super::{format_float, DataError, DataSet, DataType, Field, Row, Schema, Value, DATETIME_FORMAT};

/// Tokens read as missing values in delimited text
pub const NA_TOKENS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "NULL", "null", "None",
    "#N/A", "#NA", "<NA>", "#N/A N/A", "1.#IND", "-1.#IND", "1.#QNAN", "-1.#QNAN",
];

/// An untyped cell as produced by a reader, before its column is typed
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    Missing,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl RawCell {
    /// Classify a text field, mapping the missing-value tokens to `Missing`
    pub fn from_text(text: &str) -> Self {
        if NA_TOKENS.contains(&text) {
            RawCell::Missing
        } else {
            RawCell::Text(text.to_string())
        }
    }

    fn as_int(&self) -> Option<i64> {
        match self {
            RawCell::Int(i) => Some(*i),
            RawCell::Float(f) if f.fract() == 0.0 && f.abs() < 9.0e15 => Some(*f as i64),
            RawCell::Text(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        }
    }

    fn as_float(&self) -> Option<f64> {
        match self {
            RawCell::Int(i) => Some(*i as f64),
            RawCell::Float(f) => Some(*f),
            RawCell::Text(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    fn as_bool(&self) -> Option<bool> {
        match self {
            RawCell::Bool(b) => Some(*b),
            RawCell::Text(s) if s.eq_ignore_ascii_case("true") => Some(true),
            RawCell::Text(s) if s.eq_ignore_ascii_case("false") => Some(false),
            _ => None,
        }
    }

    fn as_text(&self) -> Option<String> {
        match self {
            RawCell::Missing => None,
            RawCell::Text(s) => Some(s.clone()),
            RawCell::Int(i) => Some(i.to_string()),
            RawCell::Float(f) => Some(format_float(*f)),
            RawCell::Bool(true) => Some("True".to_string()),
            RawCell::Bool(false) => Some("False".to_string()),
            RawCell::DateTime(dt) => Some(dt.format(DATETIME_FORMAT).to_string()),
        }
    }

    fn is_missing(&self) -> bool {
        matches!(self, RawCell::Missing)
    }
}

/// Make header names usable as unique column names.
///
/// Blank names become `Unnamed: <index>` and repeats are suffixed
/// `.1`, `.2`, ... in order of appearance.
pub fn normalize_headers(raw: Vec<String>) -> Vec<String> {
    let mut used = HashSet::new();
    let mut counters: HashMap<String, usize> = HashMap::new();
    let mut names = Vec::with_capacity(raw.len());

    for (i, name) in raw.into_iter().enumerate() {
        let base = if name.trim().is_empty() {
            format!("Unnamed: {}", i)
        } else {
            name
        };

        if used.insert(base.clone()) {
            names.push(base);
            continue;
        }

        let counter = counters.entry(base.clone()).or_insert(0);
        loop {
            *counter += 1;
            let candidate = format!("{}.{}", base, counter);
            if used.insert(candidate.clone()) {
                names.push(candidate);
                break;
            }
        }
    }

    names
}

/// Decide the type of a column and convert its cells.
///
/// A column is integer only when no value is missing; otherwise integers
/// widen to float. A column whose rows are all missing is float; a column
/// with no rows at all is text.
pub fn infer_column(cells: &[RawCell]) -> (DataType, Vec<Value>) {
    let present: Vec<&RawCell> = cells.iter().filter(|c| !c.is_missing()).collect();
    let has_missing = present.len() != cells.len();

    let data_type = if cells.is_empty() {
        DataType::String
    } else if present.is_empty() {
        DataType::Float
    } else if !has_missing && present.iter().all(|c| c.as_int().is_some()) {
        DataType::Integer
    } else if present.iter().all(|c| c.as_float().is_some()) {
        DataType::Float
    } else if present.iter().all(|c| c.as_bool().is_some()) {
        DataType::Boolean
    } else if present.iter().all(|c| matches!(c, RawCell::DateTime(_))) {
        DataType::DateTime
    } else {
        DataType::String
    };

    let values = cells
        .iter()
        .map(|cell| convert_cell(cell, data_type))
        .collect();

    (data_type, values)
}

fn convert_cell(cell: &RawCell, data_type: DataType) -> Value {
    let value = match data_type {
        DataType::Integer => cell.as_int().map(Value::Integer),
        DataType::Float => cell.as_float().map(Value::Float),
        DataType::Boolean => cell.as_bool().map(Value::Boolean),
        DataType::DateTime => match cell {
            RawCell::DateTime(dt) => Some(Value::DateTime(*dt)),
            _ => None,
        },
        DataType::String => cell.as_text().map(Value::String),
    };

    value.unwrap_or(Value::Null)
}

/// Build a typed dataset from a header row and untyped records.
///
/// Records shorter than the header are padded with missing cells.
pub fn build_dataset(headers: Vec<String>, records: Vec<Vec<RawCell>>) -> Result<DataSet, DataError> {
    let names = normalize_headers(headers);
    let width = names.len();

    let mut columns: Vec<Vec<RawCell>> = vec![Vec::with_capacity(records.len()); width];
    for (line, mut record) in records.into_iter().enumerate() {
        if record.len() > width {
            return Err(DataError::ParseFailure(format!(
                "Expected {} fields in line {}, saw {}",
                width,
                line + 2,
                record.len()
            )));
        }
        record.resize(width, RawCell::Missing);
        for (column, cell) in columns.iter_mut().zip(record) {
            column.push(cell);
        }
    }

    let row_count = columns.first().map_or(0, Vec::len);
    let mut fields = Vec::with_capacity(width);
    let mut typed: Vec<std::vec::IntoIter<Value>> = Vec::with_capacity(width);

    for (name, cells) in names.into_iter().zip(columns.iter()) {
        let (data_type, values) = infer_column(cells);
        fields.push(Field::new(name, data_type));
        typed.push(values.into_iter());
    }

    let mut dataset = DataSet::new(Schema::new(fields));
    for _ in 0..row_count {
        let values = typed
            .iter_mut()
            .map(|column| column.next().unwrap_or(Value::Null))
            .collect();
        dataset.add_row(Row::new(values))?;
    }

    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_headers() {
        let names = normalize_headers(vec![
            "a".to_string(),
            "".to_string(),
            "a".to_string(),
            "a".to_string(),
        ]);
        assert_eq!(names, vec!["a", "Unnamed: 1", "a.1", "a.2"]);
    }

    #[test]
    fn test_integer_with_missing_widens_to_float() {
        let cells = vec![RawCell::from_text("10"), RawCell::from_text(""), RawCell::from_text("10")];
        let (data_type, values) = infer_column(&cells);
        assert_eq!(data_type, DataType::Float);
        assert_eq!(values, vec![Value::Float(10.0), Value::Null, Value::Float(10.0)]);
    }

    #[test]
    fn test_rowless_column_is_string() {
        let (data_type, values) = infer_column(&[]);
        assert_eq!(data_type, DataType::String);
        assert!(values.is_empty());

        let (data_type, _) = infer_column(&[RawCell::Missing, RawCell::Missing]);
        assert_eq!(data_type, DataType::Float);
    }

    #[test]
    fn test_mixed_column_is_string() {
        let cells = vec![RawCell::from_text("1"), RawCell::from_text("x")];
        let (data_type, values) = infer_column(&cells);
        assert_eq!(data_type, DataType::String);
        assert_eq!(values[0], Value::String("1".to_string()));
    }

    #[test]
    fn test_boolean_column() {
        let cells = vec![RawCell::from_text("True"), RawCell::from_text("false")];
        let (data_type, _) = infer_column(&cells);
        assert_eq!(data_type, DataType::Boolean);
    }

    #[test]
    fn test_all_missing_column_is_float() {
        let cells = vec![RawCell::Missing, RawCell::from_text("NaN")];
        let (data_type, values) = infer_column(&cells);
        assert_eq!(data_type, DataType::Float);
        assert!(values.iter().all(Value::is_null));
    }
}
