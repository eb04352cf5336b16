// Annotated correlation heatmap
// Author: Gabriel Demetrios Lafis

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::processing::{CorrelationMatrix, ProcessingError};
use super::render_err;

const CELL: i32 = 64;
const LEFT: i32 = 130;
const TOP: i32 = 50;
const BOTTOM: i32 = 40;
const RIGHT: i32 = 20;
const LABEL_CHARS: usize = 14;

// Diverging ramp anchors at -1, 0 and 1
const COLD: (f64, f64, f64) = (59.0, 76.0, 192.0);
const NEUTRAL: (f64, f64, f64) = (221.0, 221.0, 221.0);
const WARM: (f64, f64, f64) = (180.0, 4.0, 38.0);
const UNDEFINED: RGBColor = RGBColor(240, 240, 240);

/// Map a coefficient in [-1, 1] onto the blue-white-red ramp
pub fn coolwarm(value: Option<f64>) -> RGBColor {
    let v = match value {
        Some(v) if v.is_finite() => v.clamp(-1.0, 1.0),
        _ => return UNDEFINED,
    };

    let (from, to, t) = if v < 0.0 { (NEUTRAL, COLD, -v) } else { (NEUTRAL, WARM, v) };
    let lerp = |a: f64, b: f64| (a + (b - a) * t).round() as u8;

    RGBColor(lerp(from.0, to.0), lerp(from.1, to.1), lerp(from.2, to.2))
}

fn short_label(name: &str) -> String {
    if name.chars().count() > LABEL_CHARS {
        let head: String = name.chars().take(LABEL_CHARS - 1).collect();
        format!("{}…", head)
    } else {
        name.to_string()
    }
}

/// Render the matrix as an SVG heatmap, each cell annotated with its
/// coefficient to two decimals and row 0 at the top
pub fn render_heatmap(matrix: &CorrelationMatrix) -> Result<String, ProcessingError> {
    let n = matrix.columns.len() as i32;
    let width = (LEFT + n * CELL + RIGHT) as u32;
    let height = (TOP + n * CELL + BOTTOM) as u32;

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let centered = Pos::new(HPos::Center, VPos::Center);
        let title = ("sans-serif", 20).into_font().color(&BLACK).pos(centered);
        root.draw(&Text::new(
            "Correlation Heatmap".to_string(),
            ((LEFT + n * CELL / 2), TOP / 2),
            title,
        ))
        .map_err(render_err)?;

        let label_style = ("sans-serif", 12).into_font().color(&BLACK);
        for (k, name) in matrix.columns.iter().enumerate() {
            let k = k as i32;
            root.draw(&Text::new(
                short_label(name),
                (LEFT - 8, TOP + k * CELL + CELL / 2),
                label_style.pos(Pos::new(HPos::Right, VPos::Center)),
            ))
            .map_err(render_err)?;
            root.draw(&Text::new(
                short_label(name),
                (LEFT + k * CELL + CELL / 2, TOP + n * CELL + BOTTOM / 2),
                label_style.pos(centered),
            ))
            .map_err(render_err)?;
        }

        for i in 0..n {
            for j in 0..n {
                let value = matrix.get(i as usize, j as usize);
                let x0 = LEFT + j * CELL;
                let y0 = TOP + i * CELL;

                root.draw(&Rectangle::new([(x0, y0), (x0 + CELL, y0 + CELL)], coolwarm(value).filled()))
                    .map_err(render_err)?;
                root.draw(&Rectangle::new([(x0, y0), (x0 + CELL, y0 + CELL)], WHITE.stroke_width(1)))
                    .map_err(render_err)?;

                let (text, ink) = match value {
                    Some(v) => (format!("{:.2}", v), if v.abs() > 0.6 { WHITE } else { BLACK }),
                    None => ("nan".to_string(), BLACK),
                };
                let annotation = ("sans-serif", 13).into_font().color(&ink).pos(centered);
                root.draw(&Text::new(text, (x0 + CELL / 2, y0 + CELL / 2), annotation))
                    .map_err(render_err)?;
            }
        }

        root.present().map_err(render_err)?;
    }

    Ok(svg)
}
