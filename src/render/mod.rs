//! Render Module: Barcode and Persistence Diagram Plots
//!
//! Both plots are emitted as standalone SVG documents. Colours follow
//! homology dimension; essential (never-dying) features are drawn up to
//! the plot edge and flagged as infinite.

mod barcode;
mod diagram;

use std::fs;
use std::path::Path;

use log::info;

use crate::error::{TdaError, TdaResult};
use crate::topology::PersistenceDiagram;

pub use barcode::render_barcode;
pub use diagram::render_diagram;

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 480.0;
const MARGIN: f64 = 56.0;

/// Stroke colour of H0, H1, H2, H3; higher dimensions cycle.
const PALETTE: [&str; 4] = ["#1f77b4", "#ff7f0e", "#2ca02c", "#d62728"];

fn colour(dimension: usize) -> &'static str {
    PALETTE[dimension % PALETTE.len()]
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Upper end of the scale axis: 10% above the largest finite value
fn scale_limit(pd: &PersistenceDiagram) -> f64 {
    let finite_max = pd
        .pairs()
        .iter()
        .flat_map(|p| [p.birth, p.death])
        .filter(|v| v.is_finite())
        .fold(0.0, f64::max);
    if finite_max > 0.0 {
        finite_max * 1.1
    } else {
        1.0
    }
}

fn ensure_non_empty(pd: &PersistenceDiagram) -> TdaResult<()> {
    if pd.is_empty() {
        return Err(TdaError::EmptyInput("nothing to plot: diagram has no pairs".to_string()));
    }
    Ok(())
}

fn header(title: &str) -> String {
    format!(
        concat!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" ",
            "viewBox=\"0 0 {w} {h}\" font-family=\"sans-serif\" font-size=\"12\">\n",
            "<rect width=\"{w}\" height=\"{h}\" fill=\"white\"/>\n",
            "<text x=\"{cx}\" y=\"24\" text-anchor=\"middle\" font-size=\"16\">{title}</text>\n",
        ),
        w = WIDTH,
        h = HEIGHT,
        cx = WIDTH / 2.0,
        title = escape(title),
    )
}

/// Legend entries for every dimension present
fn legend(pd: &PersistenceDiagram) -> String {
    let mut out = String::new();
    for d in 0..=pd.max_dimension() {
        if pd.dim(d).is_empty() {
            continue;
        }
        let y = MARGIN + 14.0 * d as f64;
        out.push_str(&format!(
            "<rect x=\"{x}\" y=\"{ry}\" width=\"10\" height=\"10\" fill=\"{c}\"/>\
             <text x=\"{tx}\" y=\"{ty}\">H{d}</text>\n",
            x = WIDTH - MARGIN - 30.0,
            ry = y - 9.0,
            c = colour(d),
            tx = WIDTH - MARGIN - 16.0,
            ty = y,
        ));
    }
    out
}

/// Write an SVG document to `path`, creating parent directories
pub fn write_svg(path: impl AsRef<Path>, svg: &str) -> TdaResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, svg)?;
    info!("wrote {}", path.display());
    Ok(())
}
