// Pairwise correlation of numeric columns
// Author: Gabriel Demetrios Lafis

use serde::Serialize;

use crate::data::DataSet;

/// Pearson correlation matrix over the numeric columns of a dataset.
/// Undefined coefficients (too few pairs, zero variance) are `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    /// Correlate every pair of numeric columns; `None` when there are none
    pub fn compute(data: &DataSet) -> Option<Self> {
        let numeric = data.numeric_columns();
        if numeric.is_empty() {
            return None;
        }

        let series: Vec<Vec<Option<f64>>> = numeric
            .iter()
            .map(|&col| {
                data.data
                    .iter()
                    .map(|row| row.get(col).and_then(|v| v.as_f64()))
                    .collect()
            })
            .collect();

        let n = series.len();
        let mut values = vec![vec![None; n]; n];
        for i in 0..n {
            for j in i..n {
                let r = pearson(&series[i], &series[j]);
                let r = if i == j { r.map(|_| 1.0) } else { r };
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        let columns = numeric
            .iter()
            .map(|&col| data.schema.fields[col].name.clone())
            .collect();

        Some(CorrelationMatrix { columns, values })
    }

    /// Coefficient between columns `i` and `j`
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.values.get(i).and_then(|row| row.get(j)).copied().flatten()
    }
}

/// Pearson coefficient over the positions where both series have a value
pub fn pearson(xs: &[Option<f64>], ys: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect();

    if pairs.len() < 2 {
        return None;
    }

    let count = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / count;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / count;

    let mut numerator = 0.0;
    let mut denom_x = 0.0;
    let mut denom_y = 0.0;
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        numerator += dx * dy;
        denom_x += dx * dx;
        denom_y += dy * dy;
    }

    if denom_x == 0.0 || denom_y == 0.0 {
        return None;
    }

    Some((numerator / (denom_x.sqrt() * denom_y.sqrt())).clamp(-1.0, 1.0))
}
