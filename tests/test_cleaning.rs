// Projection and cleaning tests
// Author: Gabriel Demetrios Lafis

use data_sweeper::{
    data::{DataType, Value},
    processing::{CleaningOperation, DataProcessor, ProcessingError, SelectTransform},
    Session,
};

const SCORES: &[u8] = b"id,value\n1,10\n2,\n2,10\n";

fn session() -> Session {
    Session::from_upload("scores.csv", SCORES).unwrap()
}

#[test]
fn test_default_selection_is_every_column() {
    let session = session();

    assert_eq!(session.selection(), &["id".to_string(), "value".to_string()]);
    assert_eq!(session.table().column_count(), 2);
    assert!(session.operations().is_empty());
}

#[test]
fn test_projection_keeps_order_and_rows() {
    let mut session = session();
    session
        .select_columns(vec!["value".to_string(), "id".to_string()])
        .unwrap();

    let table = session.table();
    assert_eq!(table.column_names(), vec!["value", "id"]);
    assert_eq!(table.len(), 3);
    assert_eq!(table.data[0].values, vec![Value::Float(10.0), Value::Integer(1)]);
}

#[test]
fn test_empty_projection_yields_zero_columns() {
    let mut session = session();
    session.select_columns(Vec::new()).unwrap();

    assert_eq!(session.table().column_count(), 0);
    assert_eq!(session.table().len(), 3);

    // Cleaning a zero-column table is harmless
    assert_eq!(session.apply(CleaningOperation::RemoveDuplicates).unwrap(), 0);
    assert_eq!(session.apply(CleaningOperation::FillMissingMean).unwrap(), 0);
}

#[test]
fn test_invalid_projection_leaves_session_unchanged() {
    let mut session = session();
    let before = session.clone();

    let result = session.select_columns(vec!["missing".to_string()]);
    assert!(matches!(result, Err(ProcessingError::InvalidArgument(_))));

    let result = SelectTransform::new(vec!["id".to_string(), "id".to_string()]).process(session.table());
    assert!(matches!(result, Err(ProcessingError::InvalidArgument(_))));

    assert_eq!(session, before);
}

#[test]
fn test_fill_then_dedup_merges_rows() {
    let mut session = session();

    assert_eq!(session.apply(CleaningOperation::FillMissingMean).unwrap(), 1);
    assert_eq!(session.apply(CleaningOperation::RemoveDuplicates).unwrap(), 1);

    let table = session.table();
    assert_eq!(table.len(), 2);
    assert_eq!(table.data[1].values, vec![Value::Integer(2), Value::Float(10.0)]);
}

#[test]
fn test_dedup_then_fill_keeps_rows() {
    let mut session = session();

    assert_eq!(session.apply(CleaningOperation::RemoveDuplicates).unwrap(), 0);
    assert_eq!(session.apply(CleaningOperation::FillMissingMean).unwrap(), 1);

    assert_eq!(session.table().len(), 3);
    assert_eq!(
        session.operations(),
        &[CleaningOperation::RemoveDuplicates, CleaningOperation::FillMissingMean]
    );
}

#[test]
fn test_dedup_is_idempotent_and_keeps_first() {
    let mut session = Session::from_upload("d.csv", b"k,v\nb,1\na,2\nb,1\na,2\nc,\nc,\n").unwrap();

    assert_eq!(session.apply(CleaningOperation::RemoveDuplicates).unwrap(), 3);
    let once = session.table().clone();
    assert_eq!(session.apply(CleaningOperation::RemoveDuplicates).unwrap(), 0);
    assert_eq!(session.table(), &once);

    let keys: Vec<String> = once.data.iter().map(|row| row.values[0].to_text()).collect();
    assert_eq!(keys, vec!["b", "a", "c"]);
}

#[test]
fn test_fill_uses_pre_fill_mean() {
    let mut session = Session::from_upload("f.csv", b"a,b,name\n1,,x\n,4,\n3,8,z\n").unwrap();

    assert_eq!(session.apply(CleaningOperation::FillMissingMean).unwrap(), 2);
    let table = session.table();

    assert_eq!(table.data[1].values[0], Value::Float(2.0));
    assert_eq!(table.data[0].values[1], Value::Float(6.0));
    // Non-numeric columns are untouched
    assert_eq!(table.data[1].values[2], Value::Null);
    assert_eq!(table.non_null_count(0), 3);
    assert_eq!(table.non_null_count(1), 3);

    // Nothing left to fill
    assert_eq!(session.apply(CleaningOperation::FillMissingMean).unwrap(), 0);
}

#[test]
fn test_fill_leaves_all_missing_column() {
    let mut session = Session::from_upload("m.csv", b"a,empty\n1,\n2,\n").unwrap();

    assert_eq!(session.apply(CleaningOperation::FillMissingMean).unwrap(), 0);
    assert_eq!(session.table().non_null_count(1), 0);
    assert_eq!(session.table().schema.fields[1].data_type, DataType::Float);
}

#[test]
fn test_reselection_replays_cleaning_in_order() {
    let mut session = session();
    session.apply(CleaningOperation::FillMissingMean).unwrap();
    session.apply(CleaningOperation::RemoveDuplicates).unwrap();

    session.select_columns(vec!["id".to_string()]).unwrap();
    let ids: Vec<Value> = session.table().data.iter().map(|row| row.values[0].clone()).collect();
    assert_eq!(ids, vec![Value::Integer(1), Value::Integer(2)]);

    session
        .select_columns(vec!["id".to_string(), "value".to_string()])
        .unwrap();
    assert_eq!(session.table().len(), 2);
    assert_eq!(session.operations().len(), 2);
}

#[test]
fn test_success_messages() {
    assert_eq!(
        CleaningOperation::RemoveDuplicates.success_message(),
        "Duplicates removed successfully!"
    );
    assert_eq!(
        CleaningOperation::FillMissingMean.success_message(),
        "Missing values filled with column means!"
    );
}
