// Histogram charts
// Author: Gabriel Demetrios Lafis

use plotters::prelude::*;

use crate::processing::{Histogram, ProcessingError};
use super::render_err;

const SIZE: (u32, u32) = (640, 400);
const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);

/// Render one histogram as an SVG bar chart with its own axis ranges
pub fn render_histogram(histogram: &Histogram) -> Result<String, ProcessingError> {
    let lo = histogram.edges.first().copied().unwrap_or(0.0);
    let hi = histogram.edges.last().copied().unwrap_or(1.0);
    if !(lo.is_finite() && hi.is_finite() && (hi - lo).is_finite() && lo < hi) {
        return Err(ProcessingError::Render(format!(
            "Cannot plot '{}' over the range [{}, {}]",
            histogram.column, lo, hi
        )));
    }
    let peak = histogram.counts.iter().copied().max().unwrap_or(0);
    let y_max = (peak as f64 * 1.05).max(1.0);

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(format!("Distribution of {}", histogram.column), ("sans-serif", 20))
            .margin(12)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(lo..hi, 0f64..y_max)
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(histogram.column.as_str())
            .y_desc("Count")
            .draw()
            .map_err(render_err)?;

        let bars = histogram.counts.iter().enumerate().map(|(i, &count)| {
            (histogram.edges[i], histogram.edges[i + 1], count as f64)
        });

        chart
            .draw_series(bars.clone().map(|(x0, x1, y)| Rectangle::new([(x0, 0.0), (x1, y)], SKY_BLUE.filled())))
            .map_err(render_err)?;
        chart
            .draw_series(bars.map(|(x0, x1, y)| Rectangle::new([(x0, 0.0), (x1, y)], BLACK.mix(0.4).stroke_width(1))))
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
    }

    Ok(svg)
}
