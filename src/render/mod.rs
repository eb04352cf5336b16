// Chart rendering for the exploration views
// Author: Gabriel Demetrios Lafis

mod heatmap;
mod histogram;

pub use heatmap::*;
pub use histogram::*;

use crate::processing::ProcessingError;

/// Wrap an SVG document as a `data:` URI for an `<img>` tag
pub fn svg_data_uri(svg: &str) -> String {
    format!("data:image/svg+xml;base64,{}", base64::encode(svg.as_bytes()))
}

fn render_err<E: std::fmt::Display>(err: E) -> ProcessingError {
    ProcessingError::Render(err.to_string())
}
