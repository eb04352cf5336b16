// Fixed-width histograms of numeric columns
// Author: Gabriel Demetrios Lafis

use serde::Serialize;

use crate::data::DataSet;
use super::min_max;

/// Number of buckets per histogram
pub const HISTOGRAM_BINS: usize = 20;

/// Bucket counts of one column; `edges` has one more entry than `counts`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub column: String,
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bucket the finite values into `bins` equal-width bins over their
    /// range. The last bin includes its right edge. A constant column is
    /// padded by 0.5, or by a thousandth of its magnitude when that is
    /// larger; an empty one spans `[0, 1]`.
    pub fn compute(column: &str, values: &[f64], bins: usize) -> Self {
        let bins = bins.max(1);
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();

        let (lo, hi) = match min_max(&finite) {
            None => (0.0, 1.0),
            Some((lo, hi)) if lo == hi => {
                let pad = (lo.abs() * 1e-3).max(0.5);
                ((lo - pad).max(f64::MIN), (hi + pad).min(f64::MAX))
            }
            Some(bounds) => bounds,
        };

        // Interpolate and bucket on halved bounds so that `hi - lo` never
        // overflows for values near the ends of the f64 range
        let edges: Vec<f64> = (0..=bins)
            .map(|i| {
                let t = i as f64 / bins as f64;
                lo * (1.0 - t) + hi * t
            })
            .collect();
        let half_span = hi / 2.0 - lo / 2.0;

        let mut counts = vec![0; bins];
        for v in &finite {
            let t = (v / 2.0 - lo / 2.0) / half_span;
            let idx = ((t * bins as f64).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Histogram {
            column: column.to_string(),
            edges,
            counts,
        }
    }

    /// One histogram per numeric column, missing values excluded
    pub fn for_dataset(data: &DataSet) -> Vec<Self> {
        data.numeric_columns()
            .into_iter()
            .map(|i| Self::compute(&data.schema.fields[i].name, &data.numeric_values(i), HISTOGRAM_BINS))
            .collect()
    }

    /// Number of values counted
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}
