// Exploration tests
// Author: Gabriel Demetrios Lafis

use data_sweeper::{
    data::ingest,
    processing::{quantile, ProcessingError, CorrelationMatrix, DatasetInfo, Description, Histogram, HISTOGRAM_BINS},
    render::{render_heatmap, render_histogram, svg_data_uri},
};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_dataset_info() {
    let (_, dataset) = ingest("d.csv", b"id,score,name\n1,2.5,a\n2,,b\n3,1.0,\n").unwrap();
    let info = DatasetInfo::compute(&dataset);

    assert_eq!(info.rows, 3);
    assert_eq!(info.columns, 3);
    assert_eq!(info.column_info[0].dtype, "int64");
    assert_eq!(info.column_info[1].dtype, "float64");
    assert_eq!(info.column_info[1].non_null, 2);
    assert_eq!(info.column_info[2].dtype, "object");
    assert_eq!(info.dtype_counts["float64"], 1);

    let text = info.render();
    assert!(text.contains("RangeIndex: 3 entries, 0 to 2"));
    assert!(text.contains("Data columns (total 3 columns):"));
    assert!(text.contains("2 non-null"));
    assert!(text.contains("dtypes: float64(1), int64(1), object(1)"));
}

#[test]
fn test_numeric_description() {
    let (_, dataset) = ingest("d.csv", b"x,label\n1,a\n2,b\n3,c\n4,d\n").unwrap();

    let columns = match Description::compute(&dataset) {
        Some(Description::Numeric(columns)) => columns,
        other => panic!("expected numeric description, got {:?}", other),
    };

    assert_eq!(columns.len(), 1);
    let x = &columns[0];
    assert_eq!(x.name, "x");
    assert_eq!(x.count, 4);
    assert!(approx(x.mean.unwrap(), 2.5));
    assert!(approx(x.std.unwrap(), (5.0f64 / 3.0).sqrt()));
    assert_eq!(x.min, Some(1.0));
    assert!(approx(x.p25.unwrap(), 1.75));
    assert!(approx(x.p50.unwrap(), 2.5));
    assert!(approx(x.p75.unwrap(), 3.25));
    assert_eq!(x.max, Some(4.0));
}

#[test]
fn test_categorical_description_without_numeric_columns() {
    let (_, dataset) = ingest("d.csv", b"name\na\nb\na\n\n").unwrap();

    match Description::compute(&dataset) {
        Some(Description::Categorical(columns)) => {
            assert_eq!(columns[0].count, 3);
            assert_eq!(columns[0].unique, 2);
            assert_eq!(columns[0].top.as_deref(), Some("a"));
            assert_eq!(columns[0].freq, Some(2));
        }
        other => panic!("expected categorical description, got {:?}", other),
    }
}

#[test]
fn test_quantile_interpolates() {
    let sorted = [10.0, 20.0, 30.0];
    assert_eq!(quantile(&sorted, 0.0), Some(10.0));
    assert_eq!(quantile(&sorted, 0.25), Some(15.0));
    assert_eq!(quantile(&sorted, 1.0), Some(30.0));
    assert_eq!(quantile(&[], 0.5), None);
}

#[test]
fn test_correlation_matrix() {
    let (_, dataset) = ingest("c.csv", b"x,y,z,w,name\n1,2,5,3,a\n2,4,5,2,b\n3,6,5,1,c\n").unwrap();
    let matrix = CorrelationMatrix::compute(&dataset).unwrap();

    assert_eq!(matrix.columns, vec!["x", "y", "z", "w"]);
    assert!(approx(matrix.get(0, 1).unwrap(), 1.0));
    assert!(approx(matrix.get(0, 3).unwrap(), -1.0));
    assert_eq!(matrix.get(0, 0), Some(1.0));
    // Constant column has no defined coefficient
    assert_eq!(matrix.get(0, 2), None);
    assert_eq!(matrix.get(2, 2), None);
    assert_eq!(matrix.get(1, 3), matrix.get(3, 1));
}

#[test]
fn test_correlation_uses_pairwise_complete_rows() {
    let (_, dataset) = ingest("c.csv", b"a,b\n1,2\n2,\n3,6\n4,8\n").unwrap();
    let matrix = CorrelationMatrix::compute(&dataset).unwrap();

    assert!(approx(matrix.get(0, 1).unwrap(), 1.0));
}

#[test]
fn test_no_numeric_columns() {
    let (_, dataset) = ingest("s.csv", b"name,flag\na,true\nb,false\n").unwrap();

    assert!(CorrelationMatrix::compute(&dataset).is_none());
    assert!(Histogram::for_dataset(&dataset).is_empty());
}

#[test]
fn test_histogram_bins() {
    let histogram = Histogram::compute("x", &[0.0, 10.0, 5.0, 5.0], HISTOGRAM_BINS);

    assert_eq!(histogram.counts.len(), HISTOGRAM_BINS);
    assert_eq!(histogram.edges.len(), HISTOGRAM_BINS + 1);
    assert_eq!(histogram.edges[0], 0.0);
    assert_eq!(histogram.edges[HISTOGRAM_BINS], 10.0);
    assert_eq!(histogram.counts[0], 1);
    assert_eq!(histogram.counts[10], 2);
    // Maximum lands in the last bin
    assert_eq!(histogram.counts[HISTOGRAM_BINS - 1], 1);
    assert_eq!(histogram.total(), 4);
}

#[test]
fn test_histogram_edge_cases() {
    let constant = Histogram::compute("c", &[3.0, 3.0], HISTOGRAM_BINS);
    assert_eq!(constant.edges[0], 2.5);
    assert_eq!(constant.edges[HISTOGRAM_BINS], 3.5);
    assert_eq!(constant.total(), 2);

    let empty = Histogram::compute("e", &[], HISTOGRAM_BINS);
    assert_eq!(empty.edges[0], 0.0);
    assert_eq!(empty.edges[HISTOGRAM_BINS], 1.0);
    assert_eq!(empty.total(), 0);
}

#[test]
fn test_histogram_of_extreme_values() {
    let histogram = Histogram::compute("x", &[-1e308, 1e308], HISTOGRAM_BINS);

    assert!(histogram.edges.iter().all(|e| e.is_finite()));
    assert_eq!(histogram.edges[0], -1e308);
    assert_eq!(histogram.edges[HISTOGRAM_BINS], 1e308);
    assert_eq!(histogram.counts[0], 1);
    assert_eq!(histogram.counts[HISTOGRAM_BINS - 1], 1);

    // Too wide for a chart axis; refused instead of plotted
    let err = render_histogram(&histogram).unwrap_err();
    assert!(matches!(err, ProcessingError::Render(_)));
}

#[test]
fn test_histogram_of_large_constant() {
    let histogram = Histogram::compute("big", &[1.7e18, 1.7e18], HISTOGRAM_BINS);

    assert!(histogram.edges[0] < 1.7e18);
    assert!(histogram.edges[HISTOGRAM_BINS] > 1.7e18);
    assert_eq!(histogram.total(), 2);

    let chart = render_histogram(&histogram).unwrap();
    assert!(chart.contains("Distribution of big"));
}

#[test]
fn test_histograms_skip_missing_values() {
    let (_, dataset) = ingest("h.csv", b"a,b\n1,x\n,y\n3,z\n").unwrap();
    let histograms = Histogram::for_dataset(&dataset);

    assert_eq!(histograms.len(), 1);
    assert_eq!(histograms[0].column, "a");
    assert_eq!(histograms[0].total(), 2);
}

#[test]
fn test_rendered_charts() {
    let (_, dataset) = ingest("r.csv", b"height,weight\n1.6,60\n1.7,72\n1.8,80\n").unwrap();

    let matrix = CorrelationMatrix::compute(&dataset).unwrap();
    let heatmap = render_heatmap(&matrix).unwrap();
    assert!(heatmap.contains("<svg"));
    assert!(heatmap.contains("Correlation Heatmap"));
    assert!(heatmap.contains("1.00"));

    let histogram = &Histogram::for_dataset(&dataset)[1];
    let chart = render_histogram(histogram).unwrap();
    assert!(chart.contains("Distribution of weight"));

    let uri = svg_data_uri(&chart);
    assert!(uri.starts_with("data:image/svg+xml;base64,"));
    assert_eq!(base64::decode(&uri["data:image/svg+xml;base64,".len()..]).unwrap(), chart.as_bytes());
}
