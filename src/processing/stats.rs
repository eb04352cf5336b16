// Statistical summaries of the working table
// Author: Gabriel Demetrios Lafis

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::fmt::Write as _;

use serde::Serialize;

use crate::data::DataSet;

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator), `None` below two values
pub fn std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }

    let mean = mean(values)?;
    let variance = values.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;

    Some(variance.sqrt())
}

/// Quantile with linear interpolation between the closest ranks.
/// `sorted` must be in ascending order.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }

    let pos = q * (sorted.len() - 1) as f64;
    let idx = pos.floor() as usize;
    let frac = pos - idx as f64;

    if idx + 1 < sorted.len() {
        Some(sorted[idx] + frac * (sorted[idx + 1] - sorted[idx]))
    } else {
        Some(sorted[idx])
    }
}

/// Minimum and maximum, `None` for an empty slice
pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    values.iter().fold(None, |acc, &v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Shape and per-column overview of a dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetInfo {
    pub rows: usize,
    pub columns: usize,
    pub column_info: Vec<ColumnInfo>,
    pub dtype_counts: BTreeMap<String, usize>,
}

/// One line of the dataset overview
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnInfo {
    pub name: String,
    pub dtype: String,
    pub non_null: usize,
}

impl DatasetInfo {
    /// Collect the overview of a dataset
    pub fn compute(data: &DataSet) -> Self {
        let column_info: Vec<ColumnInfo> = data
            .schema
            .fields
            .iter()
            .enumerate()
            .map(|(i, field)| ColumnInfo {
                name: field.name.clone(),
                dtype: field.data_type.label().to_string(),
                non_null: data.non_null_count(i),
            })
            .collect();

        let mut dtype_counts = BTreeMap::new();
        for info in &column_info {
            *dtype_counts.entry(info.dtype.clone()).or_insert(0) += 1;
        }

        DatasetInfo {
            rows: data.len(),
            columns: data.column_count(),
            column_info,
            dtype_counts,
        }
    }

    /// Plain-text rendering in the layout of a dataframe `info()` report
    pub fn render(&self) -> String {
        let mut out = String::new();

        if self.rows == 0 {
            let _ = writeln!(out, "RangeIndex: 0 entries");
        } else {
            let _ = writeln!(out, "RangeIndex: {} entries, 0 to {}", self.rows, self.rows - 1);
        }
        let _ = writeln!(out, "Data columns (total {} columns):", self.columns);

        if !self.column_info.is_empty() {
            let name_width = self
                .column_info
                .iter()
                .map(|c| c.name.chars().count())
                .max()
                .unwrap_or(0)
                .max("Column".len());
            let count_width = "Non-Null Count".len();

            let _ = writeln!(out, " #   {:<nw$}  {:<cw$}  Dtype", "Column", "Non-Null Count", nw = name_width, cw = count_width);
            let _ = writeln!(
                out,
                "---  {:<nw$}  {:<cw$}  -----",
                "------",
                "--------------",
                nw = name_width,
                cw = count_width
            );

            for (i, info) in self.column_info.iter().enumerate() {
                let count = format!("{} non-null", info.non_null);
                let _ = writeln!(
                    out,
                    " {:<3} {:<nw$}  {:<cw$}  {}",
                    i,
                    info.name,
                    count,
                    info.dtype,
                    nw = name_width,
                    cw = count_width
                );
            }
        }

        let dtypes: Vec<String> = self
            .dtype_counts
            .iter()
            .map(|(dtype, count)| format!("{}({})", dtype, count))
            .collect();
        let _ = writeln!(out, "dtypes: {}", dtypes.join(", "));

        out
    }
}

/// Descriptive statistics of one numeric column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSummary {
    pub name: String,
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    #[serde(rename = "25%")]
    pub p25: Option<f64>,
    #[serde(rename = "50%")]
    pub p50: Option<f64>,
    #[serde(rename = "75%")]
    pub p75: Option<f64>,
    pub max: Option<f64>,
}

impl NumericSummary {
    /// Summarise the present values of a column
    pub fn compute(name: &str, values: &[f64]) -> Self {
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        let bounds = min_max(values);

        NumericSummary {
            name: name.to_string(),
            count: values.len(),
            mean: mean(values),
            std: std_dev(values),
            min: bounds.map(|(lo, _)| lo),
            p25: quantile(&sorted, 0.25),
            p50: quantile(&sorted, 0.5),
            p75: quantile(&sorted, 0.75),
            max: bounds.map(|(_, hi)| hi),
        }
    }
}

/// Frequency summary of a non-numeric column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoricalSummary {
    pub name: String,
    pub count: usize,
    pub unique: usize,
    pub top: Option<String>,
    pub freq: Option<usize>,
}

impl CategoricalSummary {
    /// Summarise the present values of column `index`
    pub fn compute(data: &DataSet, index: usize) -> Self {
        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut order: Vec<String> = Vec::new();

        for value in data.data.iter().filter_map(|row| row.get(index)) {
            if value.is_null() {
                continue;
            }
            let text = value.to_text();
            let entry = counts.entry(text.clone()).or_insert(0);
            if *entry == 0 {
                order.push(text);
            }
            *entry += 1;
        }

        // Ties go to the value seen first
        let mut top: Option<(&String, usize)> = None;
        for text in &order {
            let count = counts[text];
            if top.map_or(true, |(_, best)| count > best) {
                top = Some((text, count));
            }
        }

        CategoricalSummary {
            name: data.schema.fields[index].name.clone(),
            count: counts.values().sum(),
            unique: order.len(),
            top: top.map(|(text, _)| text.clone()),
            freq: top.map(|(_, count)| count),
        }
    }
}

/// Descriptive statistics of a dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "columns", rename_all = "lowercase")]
pub enum Description {
    /// Numeric columns only, used whenever at least one exists
    Numeric(Vec<NumericSummary>),
    /// Every column, used when none is numeric
    Categorical(Vec<CategoricalSummary>),
}

impl Description {
    /// Describe the dataset; `None` when it has no columns at all
    pub fn compute(data: &DataSet) -> Option<Self> {
        if data.column_count() == 0 {
            return None;
        }

        let numeric = data.numeric_columns();
        if numeric.is_empty() {
            let columns = (0..data.column_count())
                .map(|i| CategoricalSummary::compute(data, i))
                .collect();
            return Some(Description::Categorical(columns));
        }

        let columns = numeric
            .into_iter()
            .map(|i| NumericSummary::compute(&data.schema.fields[i].name, &data.numeric_values(i)))
            .collect();

        Some(Description::Numeric(columns))
    }
}
