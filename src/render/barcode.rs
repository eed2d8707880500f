//! Persistence Barcode
//!
//! One horizontal bar per pair spanning [birth, death], stacked top to
//! bottom in diagram order (H0 first). Essential bars run to the right
//! edge and end in an arrow head.

use super::{colour, ensure_non_empty, header, legend, scale_limit, HEIGHT, MARGIN, WIDTH};
use crate::error::TdaResult;
use crate::topology::PersistenceDiagram;

/// Render the barcode of `pd` as an SVG document
pub fn render_barcode(pd: &PersistenceDiagram, title: &str) -> TdaResult<String> {
    ensure_non_empty(pd)?;

    let limit = scale_limit(pd);
    let plot_w = WIDTH - 2.0 * MARGIN;
    let plot_h = HEIGHT - 2.0 * MARGIN;
    let x = |v: f64| MARGIN + plot_w * v.min(limit) / limit;

    let n = pd.len() as f64;
    let row = plot_h / n;
    let thickness = (row * 0.6).clamp(0.5, 8.0);

    let mut svg = header(title);

    // scale axis
    let axis_y = HEIGHT - MARGIN;
    svg.push_str(&format!(
        "<line x1=\"{MARGIN}\" y1=\"{axis_y}\" x2=\"{}\" y2=\"{axis_y}\" stroke=\"black\"/>\n",
        WIDTH - MARGIN
    ));
    for tick in 0..=5 {
        let v = limit * tick as f64 / 5.0;
        svg.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\">{:.3}</text>\n",
            x(v),
            axis_y + 16.0,
            v
        ));
    }
    svg.push_str(&format!(
        "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\">scale ε</text>\n",
        WIDTH / 2.0,
        HEIGHT - 12.0
    ));

    for (i, pair) in pd.pairs().iter().enumerate() {
        let y = MARGIN + row * (i as f64 + 0.5);
        let x0 = x(pair.birth);
        let x1 = if pair.is_essential() { WIDTH - MARGIN } else { x(pair.death) };
        let c = colour(pair.dimension);

        svg.push_str(&format!(
            "<line x1=\"{x0:.2}\" y1=\"{y:.2}\" x2=\"{x1:.2}\" y2=\"{y:.2}\" \
             stroke=\"{c}\" stroke-width=\"{thickness:.2}\" stroke-linecap=\"butt\"/>\n"
        ));
        if pair.is_essential() {
            let h = thickness.max(3.0);
            svg.push_str(&format!(
                "<polygon points=\"{:.2},{:.2} {:.2},{:.2} {:.2},{:.2}\" fill=\"{c}\"/>\n",
                x1, y - h,
                x1 + 2.0 * h, y,
                x1, y + h
            ));
        }
    }

    svg.push_str(&legend(pd));
    svg.push_str("</svg>\n");
    Ok(svg)
}
