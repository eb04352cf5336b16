// Ingestion and export tests
// Author: Gabriel Demetrios Lafis

use data_sweeper::{
    data::{export, ingest, DataError, DataType, FileFormat, Value},
    processing::{DataProcessor, DatasetInfo, SelectTransform},
};

#[test]
fn test_csv_upload_metadata() {
    let bytes = b"id,value,label\n1,10,a\n2,,b\n2,10,b\n";
    let (file, dataset) = ingest("Scores.CSV", bytes).unwrap();

    assert_eq!(file.name, "Scores.CSV");
    assert_eq!(file.size, bytes.len());
    assert_eq!(file.format, FileFormat::Csv);
    assert_eq!(file.extension(), ".csv");
    assert_eq!(file.size_label(), format!("{:.2} KB", bytes.len() as f64 / 1024.0));

    assert_eq!(dataset.len(), 3);
    assert_eq!(dataset.column_names(), vec!["id", "value", "label"]);
    assert_eq!(dataset.schema.fields[0].data_type, DataType::Integer);
    // Integer column with a gap becomes float
    assert_eq!(dataset.schema.fields[1].data_type, DataType::Float);
    assert_eq!(dataset.schema.fields[2].data_type, DataType::String);
    assert_eq!(dataset.get_row(1).unwrap().values[1], Value::Null);
    assert_eq!(
        dataset.schema.get_field_by_name("label").map(|f| f.data_type),
        Some(DataType::String)
    );
    assert_eq!(dataset.schema.get_field(3), None);
}

#[test]
fn test_unsupported_extension() {
    let result = ingest("notes.txt", b"hello");
    match result {
        Err(DataError::UnsupportedFormat(ext)) => assert_eq!(ext, ".txt"),
        other => panic!("expected UnsupportedFormat, got {:?}", other),
    }

    assert!(matches!(ingest("no_extension", b"a\n1\n"), Err(DataError::UnsupportedFormat(_))));
}

#[test]
fn test_malformed_upload_is_parse_failure() {
    assert!(matches!(ingest("empty.csv", b""), Err(DataError::ParseFailure(_))));
    assert!(matches!(ingest("broken.xlsx", b"id,value\n1,2\n"), Err(DataError::ParseFailure(_))));
}

#[test]
fn test_missing_value_tokens_and_headers() {
    let bytes = b"a,,a,flag\nNA,x,1,true\nnull,y,2,FALSE\n#N/A,z,3,True\n";
    let (_, dataset) = ingest("data.csv", bytes).unwrap();

    assert_eq!(dataset.column_names(), vec!["a", "Unnamed: 1", "a.1", "flag"]);
    // All-missing column is float
    assert_eq!(dataset.schema.fields[0].data_type, DataType::Float);
    assert_eq!(dataset.non_null_count(0), 0);
    assert_eq!(dataset.schema.fields[3].data_type, DataType::Boolean);
    assert_eq!(dataset.data[1].values[3], Value::Boolean(false));

    // Booleans are not numeric
    assert_eq!(dataset.numeric_columns(), vec![0, 2]);
}

#[test]
fn test_header_only_csv_has_text_columns() {
    let (_, dataset) = ingest("header.csv", b"id,value\n").unwrap();

    assert!(dataset.is_empty());
    assert_eq!(dataset.column_names(), vec!["id", "value"]);
    assert!(dataset.schema.fields.iter().all(|f| f.data_type.label() == "object"));
    assert!(dataset.numeric_columns().is_empty());

    let info = DatasetInfo::compute(&dataset);
    assert_eq!(info.dtype_counts.get("object"), Some(&2));
}

#[test]
fn test_csv_export_has_header_and_no_index() {
    let (_, dataset) = ingest("data.csv", b"id,value,label\n1,1.5,a\n2,,b\n").unwrap();

    let buffer = export(&dataset, FileFormat::Csv).unwrap();
    assert_eq!(buffer.position(), 0);
    assert_eq!(buffer.mime_type(), "text/csv");
    assert_eq!(buffer.file_name(), "processed_data.csv");

    let text = String::from_utf8(buffer.into_bytes()).unwrap();
    assert_eq!(text, "id,value,label\n1,1.5,a\n2,,b\n");
}

#[test]
fn test_export_round_trip_preserves_table() {
    let (_, dataset) = ingest("data.csv", b"id,score,name\n1,2.5,ann\n2,,bob\n3,4.0,\n").unwrap();

    for format in [FileFormat::Csv, FileFormat::Xlsx] {
        let buffer = export(&dataset, format).unwrap();
        let file_name = buffer.file_name();
        assert_eq!(file_name, format!("processed_data.{}", format.extension()));

        let (_, reread) = ingest(&file_name, &buffer.into_bytes()).unwrap();
        assert_eq!(reread.column_names(), dataset.column_names());
        assert_eq!(reread.len(), dataset.len());
        for (left, right) in reread.data.iter().zip(&dataset.data) {
            assert_eq!(left, right, "{} round trip changed a row", format);
        }
    }
}

#[test]
fn test_xlsx_export_mime_type() {
    let (_, dataset) = ingest("data.csv", b"a\n1\n").unwrap();
    let buffer = export(&dataset, FileFormat::Xlsx).unwrap();

    assert_eq!(
        buffer.mime_type(),
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    assert!(!buffer.is_empty());
}

#[test]
fn test_zero_column_export() {
    let (_, dataset) = ingest("data.csv", b"a\n1\n2\n").unwrap();
    let empty = SelectTransform::new(Vec::new()).process(&dataset).unwrap();

    let buffer = export(&empty, FileFormat::Csv).unwrap();
    assert_eq!(buffer.into_bytes(), b"\n".to_vec());

    let buffer = export(&empty, FileFormat::Xlsx).unwrap();
    assert!(!buffer.is_empty());
}
