// Data module for the working table and its file formats
// Author: Gabriel Demetrios Lafis

mod csv;
mod excel;
mod export;
mod format;
mod schema;
mod upload;

pub use self::csv::*;
pub use excel::*;
pub use export::*;
pub use format::*;
pub use schema::*;
pub use upload::*;

use chrono::NaiveDateTime;
use serde::Serialize;
use thiserror::Error;

/// Timestamp layout used when a datetime cell is rendered as text
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Represents a readable tabular source
pub trait DataSource {
    /// Read the whole source into a dataset
    fn read(&self) -> Result<DataSet, DataError>;

    /// Get the source name
    fn name(&self) -> &str;

    /// Get the file format the source decodes
    fn format(&self) -> FileFormat;
}

/// Represents a serializer producing file bytes
pub trait DataSink {
    /// Serialize the dataset into a complete file image
    fn write(&self, data: &DataSet) -> Result<Vec<u8>, DataError>;

    /// Get the file format the sink encodes
    fn format(&self) -> FileFormat;
}

/// Represents a dataset with schema and data
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DataSet {
    pub schema: Schema,
    pub data: Vec<Row>,
}

impl DataSet {
    /// Create a new empty dataset
    pub fn new(schema: Schema) -> Self {
        DataSet {
            schema,
            data: Vec::new(),
        }
    }

    /// Add a row to the dataset
    pub fn add_row(&mut self, row: Row) -> Result<(), DataError> {
        if row.values.len() != self.schema.fields.len() {
            return Err(DataError::SchemaMismatch {
                expected: self.schema.fields.len(),
                found: row.values.len(),
            });
        }

        self.data.push(row);
        Ok(())
    }

    /// Get the number of rows in the dataset
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the dataset is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the number of columns in the dataset
    pub fn column_count(&self) -> usize {
        self.schema.fields.len()
    }

    /// Column names in schema order
    pub fn column_names(&self) -> Vec<String> {
        self.schema.names()
    }

    /// Indices of the integer and float columns, in schema order
    pub fn numeric_columns(&self) -> Vec<usize> {
        self.schema
            .fields
            .iter()
            .enumerate()
            .filter(|(_, field)| field.data_type.is_numeric())
            .map(|(i, _)| i)
            .collect()
    }

    /// Present values of a numeric column, missing entries skipped
    pub fn numeric_values(&self, column: usize) -> Vec<f64> {
        self.data
            .iter()
            .filter_map(|row| row.get(column).and_then(Value::as_f64))
            .collect()
    }

    /// Number of present values in a column
    pub fn non_null_count(&self, column: usize) -> usize {
        self.data
            .iter()
            .filter(|row| row.get(column).map_or(false, |v| !v.is_null()))
            .count()
    }

    /// Copy of the first `n` rows
    pub fn head(&self, n: usize) -> DataSet {
        DataSet {
            schema: self.schema.clone(),
            data: self.data.iter().take(n).cloned().collect(),
        }
    }

    /// Get a reference to a row by index
    pub fn get_row(&self, index: usize) -> Option<&Row> {
        self.data.get(index)
    }
}

/// Represents a row in a dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Row {
    pub values: Vec<Value>,
}

impl Row {
    /// Create a new row with the given values
    pub fn new(values: Vec<Value>) -> Self {
        Row { values }
    }

    /// Get a reference to a value by index
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Get a mutable reference to a value by index
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Value> {
        self.values.get_mut(index)
    }
}

/// Represents a value in a row
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    DateTime(NaiveDateTime),
}

impl Value {
    /// Whether the value is missing
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric view of integer and float values
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Render the value the way it is written to a delimited file.
    /// Missing values become the empty string.
    pub fn to_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Boolean(true) => "True".to_string(),
            Value::Boolean(false) => "False".to_string(),
            Value::Integer(i) => i.to_string(),
            Value::Float(f) => format_float(*f),
            Value::String(s) => s.clone(),
            Value::DateTime(dt) => dt.format(DATETIME_FORMAT).to_string(),
        }
    }
}

impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Boolean(b) => serde_json::Value::Bool(*b),
            Value::Integer(i) => serde_json::Value::Number((*i).into()),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::DateTime(_) => serde_json::Value::String(value.to_text()),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde_json::Value::from(self).serialize(serializer)
    }
}

/// Format a float so that integral values keep a trailing `.0`
pub fn format_float(f: f64) -> String {
    if f.is_nan() {
        "nan".to_string()
    } else if f.is_infinite() {
        if f > 0.0 { "inf".to_string() } else { "-inf".to_string() }
    } else if f.fract() == 0.0 && f.abs() < 1e16 {
        format!("{:.1}", f)
    } else {
        f.to_string()
    }
}

/// Represents a schema for a dataset
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Schema {
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema with the given fields
    pub fn new(fields: Vec<Field>) -> Self {
        Schema { fields }
    }

    /// Get a reference to a field by name
    pub fn get_field_by_name(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Get the position of a field by name
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Get a reference to a field by index
    pub fn get_field(&self, index: usize) -> Option<&Field> {
        self.fields.get(index)
    }

    /// Field names in order
    pub fn names(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.name.clone()).collect()
    }
}

/// Represents a field in a schema
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub name: String,
    pub data_type: DataType,
}

impl Field {
    /// Create a new field
    pub fn new(name: String, data_type: DataType) -> Self {
        Field { name, data_type }
    }
}

/// Represents the inferred type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Boolean,
    Integer,
    Float,
    String,
    DateTime,
}

impl DataType {
    /// Integer and float columns take part in statistics and charts
    pub fn is_numeric(&self) -> bool {
        matches!(self, DataType::Integer | DataType::Float)
    }

    /// Dtype label shown in the dataset summary
    pub fn label(&self) -> &'static str {
        match self {
            DataType::Boolean => "bool",
            DataType::Integer => "int64",
            DataType::Float => "float64",
            DataType::String => "object",
            DataType::DateTime => "datetime64[ns]",
        }
    }
}

/// Represents an error in the data module
#[derive(Debug, Error)]
pub enum DataError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("Parse error: {0}")]
    ParseFailure(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Schema mismatch: row has {found} values, schema has {expected} fields")]
    SchemaMismatch { expected: usize, found: usize },

    #[error("Export error: {0}")]
    Export(String),
}
