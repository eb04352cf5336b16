// Spreadsheet (xlsx) data source and sink implementation
// Author: Gabriel Demetrios Lafis

use std::io::Cursor;

use calamine::{open_workbook_from_rs, Data, DataType as _, Reader, Xlsx};
use rust_xlsxwriter::{Format, Workbook, XlsxError};

use super::{build_dataset, DataError, DataSet, DataSink, DataSource, FileFormat, RawCell, Value};

/// Worksheet name used for exports
pub const SHEET_NAME: &str = "Sheet1";

const MAX_EXCEL_ROWS: usize = 1_048_576;
const MAX_EXCEL_COLUMNS: usize = 16_384;

/// Spreadsheet source reading the first worksheet of an uploaded workbook
pub struct XlsxSource<'a> {
    name: String,
    bytes: &'a [u8],
}

impl<'a> XlsxSource<'a> {
    /// Create a new spreadsheet source
    pub fn new(name: &str, bytes: &'a [u8]) -> Self {
        XlsxSource {
            name: name.to_string(),
            bytes,
        }
    }

    fn header_text(cell: &Data) -> String {
        match cell {
            Data::Empty => String::new(),
            Data::String(s) => s.clone(),
            Data::Float(f) if f.fract() == 0.0 => (*f as i64).to_string(),
            other => other.to_string(),
        }
    }

    fn raw_cell(cell: &Data) -> RawCell {
        match cell {
            Data::Empty | Data::Error(_) => RawCell::Missing,
            Data::Int(i) => RawCell::Int(*i),
            Data::Float(f) => RawCell::Float(*f),
            Data::Bool(b) => RawCell::Bool(*b),
            Data::String(s) => RawCell::from_text(s),
            Data::DateTime(_) | Data::DateTimeIso(_) => cell
                .as_datetime()
                .map(RawCell::DateTime)
                .unwrap_or_else(|| RawCell::Text(cell.to_string())),
            Data::DurationIso(s) => RawCell::Text(s.clone()),
        }
    }
}

impl DataSource for XlsxSource<'_> {
    fn read(&self) -> Result<DataSet, DataError> {
        let parse_err = |e: calamine::XlsxError| DataError::ParseFailure(e.to_string());

        let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(self.bytes)).map_err(parse_err)?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| DataError::ParseFailure("Workbook has no worksheets".to_string()))?
            .map_err(parse_err)?;

        let mut rows = range.rows();
        let headers: Vec<String> = rows
            .next()
            .ok_or_else(|| DataError::ParseFailure("No columns to parse from file".to_string()))?
            .iter()
            .map(Self::header_text)
            .collect();

        let records = rows
            .map(|row| row.iter().map(Self::raw_cell).collect())
            .collect();

        let dataset = build_dataset(headers, records)?;
        log::debug!(
            "Parsed workbook '{}': {} rows x {} columns",
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
        FileFormat::Xlsx
    }
}

/// Spreadsheet sink writing a single worksheet with a bold header row
pub struct XlsxSink {
    datetime_format: String,
}

impl XlsxSink {
    /// Create a new spreadsheet sink
    pub fn new() -> Self {
        XlsxSink {
            datetime_format: "yyyy-mm-dd hh:mm:ss".to_string(),
        }
    }

    fn build_workbook(&self, data: &DataSet) -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();
        let datetime_format = Format::new().set_num_format(&self.datetime_format);

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_NAME)?;

        for (col, field) in data.schema.fields.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, &field.name, &header_format)?;
        }

        for (index, row) in data.data.iter().enumerate() {
            let excel_row = (index + 1) as u32;

            for (col, value) in row.values.iter().enumerate() {
                let col = col as u16;
                match value {
                    Value::Null => {}
                    Value::Boolean(b) => {
                        worksheet.write_boolean(excel_row, col, *b)?;
                    }
                    Value::Integer(i) => {
                        worksheet.write_number(excel_row, col, *i as f64)?;
                    }
                    Value::Float(f) if f.is_finite() => {
                        worksheet.write_number(excel_row, col, *f)?;
                    }
                    Value::Float(_) | Value::String(_) => {
                        worksheet.write_string(excel_row, col, value.to_text())?;
                    }
                    Value::DateTime(dt) => {
                        worksheet.write_datetime_with_format(excel_row, col, dt, &datetime_format)?;
                    }
                }
            }
        }

        workbook.save_to_buffer()
    }
}

impl Default for XlsxSink {
    fn default() -> Self {
        Self::new()
    }
}

impl DataSink for XlsxSink {
    fn write(&self, data: &DataSet) -> Result<Vec<u8>, DataError> {
        if data.column_count() > MAX_EXCEL_COLUMNS || data.len() + 1 > MAX_EXCEL_ROWS {
            return Err(DataError::Export(format!(
                "{} rows x {} columns exceeds the worksheet limit",
                data.len(),
                data.column_count()
            )));
        }

        self.build_workbook(data)
            .map_err(|e| DataError::Export(e.to_string()))
    }

    fn format(&self) -> FileFormat {
        FileFormat::Xlsx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DataType, Field, Row, Schema};

    fn sample() -> DataSet {
        let mut dataset = DataSet::new(Schema::new(vec![
            Field::new("id".to_string(), DataType::Integer),
            Field::new("score".to_string(), DataType::Float),
            Field::new("name".to_string(), DataType::String),
        ]));
        dataset
            .add_row(Row::new(vec![Value::Integer(1), Value::Float(2.5), Value::String("a".to_string())]))
            .unwrap();
        dataset
            .add_row(Row::new(vec![Value::Integer(2), Value::Null, Value::String("b".to_string())]))
            .unwrap();
        dataset
    }

    #[test]
    fn test_workbook_round_trip() {
        let bytes = XlsxSink::new().write(&sample()).unwrap();
        let dataset = XlsxSource::new("t.xlsx", &bytes).read().unwrap();

        assert_eq!(dataset.column_names(), vec!["id", "score", "name"]);
        assert_eq!(dataset.schema.fields[0].data_type, DataType::Integer);
        assert_eq!(dataset.data[0].values[1], Value::Float(2.5));
        assert_eq!(dataset.data[1].values[1], Value::Null);
        assert_eq!(dataset.data[1].values[2], Value::String("b".to_string()));
    }

    #[test]
    fn test_datetime_cells_survive_export() {
        let stamp = chrono::NaiveDate::from_ymd_opt(2024, 3, 1)
            .and_then(|d| d.and_hms_opt(6, 0, 0))
            .unwrap();
        let mut dataset = DataSet::new(Schema::new(vec![Field::new("at".to_string(), DataType::DateTime)]));
        dataset.add_row(Row::new(vec![Value::DateTime(stamp)])).unwrap();

        let bytes = XlsxSink::new().write(&dataset).unwrap();
        let read_back = XlsxSource::new("t.xlsx", &bytes).read().unwrap();

        assert_eq!(read_back.schema.fields[0].data_type, DataType::DateTime);
        assert_eq!(read_back.data[0].values[0], Value::DateTime(stamp));
    }

    #[test]
    fn test_garbage_is_parse_failure() {
        let result = XlsxSource::new("t.xlsx", b"not a zip archive").read();
        assert!(matches!(result, Err(DataError::ParseFailure(_))));
    }
}
