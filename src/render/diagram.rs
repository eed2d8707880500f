//! Persistence Diagram (birth vs death scatter)
//!
//! One point per pair at (birth, death) with the diagonal birth = death
//! as reference. Essential pairs sit on a dashed "∞" line above the
//! finite range.

use super::{colour, ensure_non_empty, header, legend, scale_limit, HEIGHT, MARGIN, WIDTH};
use crate::error::TdaResult;
use crate::topology::PersistenceDiagram;

/// Render the (birth, death) scatter of `pd` as an SVG document
pub fn render_diagram(pd: &PersistenceDiagram, title: &str) -> TdaResult<String> {
    ensure_non_empty(pd)?;

    let limit = scale_limit(pd);
    let side = (HEIGHT - 2.0 * MARGIN).min(WIDTH - 2.0 * MARGIN);
    let left = (WIDTH - side) / 2.0;
    let bottom = MARGIN + side;
    // the square's top strip is reserved for the infinity line
    let inner = side * 0.92;
    let x = |v: f64| left + inner * v / limit;
    let y = |v: f64| bottom - inner * v / limit;
    let inf_y = bottom - side;

    let mut svg = header(title);

    svg.push_str(&format!(
        "<rect x=\"{left}\" y=\"{inf_y}\" width=\"{side}\" height=\"{side}\" fill=\"none\" stroke=\"black\"/>\n"
    ));
    svg.push_str(&format!(
        "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"gray\"/>\n",
        x(0.0), y(0.0), x(limit), y(limit)
    ));
    svg.push_str(&format!(
        "<line x1=\"{left}\" y1=\"{inf_y:.2}\" x2=\"{:.2}\" y2=\"{inf_y:.2}\" \
         stroke=\"gray\" stroke-dasharray=\"4 3\"/>\n\
         <text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"end\">∞</text>\n",
        left + side,
        left - 6.0,
        inf_y + 4.0
    ));

    for tick in 0..=4 {
        let v = limit * tick as f64 / 4.0;
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\">{v:.3}</text>\n\
             <text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"end\">{v:.3}</text>\n",
            x(v),
            bottom + 16.0,
            left - 6.0,
            y(v) + 4.0
        ));
    }
    svg.push_str(&format!(
        "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\">birth</text>\n\
         <text x=\"16\" y=\"{}\" text-anchor=\"middle\" transform=\"rotate(-90 16 {})\">death</text>\n",
        WIDTH / 2.0,
        HEIGHT - 12.0,
        HEIGHT / 2.0,
        HEIGHT / 2.0
    ));

    for pair in pd.pairs() {
        let cy = if pair.is_essential() { inf_y } else { y(pair.death) };
        svg.push_str(&format!(
            "<circle cx=\"{:.2}\" cy=\"{cy:.2}\" r=\"3\" fill=\"{}\" fill-opacity=\"0.8\"/>\n",
            x(pair.birth),
            colour(pair.dimension)
        ));
    }

    svg.push_str(&legend(pd));
    svg.push_str("</svg>\n");
    Ok(svg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::PersistencePair;

    #[test]
    fn test_one_point_per_pair() {
        let pd = PersistenceDiagram::from_pairs(vec![
            PersistencePair::new(0, 0.0, 1.0),
            PersistencePair::new(0, 0.0, f64::INFINITY),
            PersistencePair::new(1, 1.0, 1.5),
            PersistencePair::new(1, 1.2, 1.2),
        ]);
        let svg = render_diagram(&pd, "USDMXN diagram").unwrap();

        assert_eq!(svg.matches("<circle").count(), 4);
        assert!(svg.contains("stroke-dasharray"));
        assert!(svg.contains("∞"));
        assert!(!svg.contains("NaN") && !svg.contains("inf"));
    }

    #[test]
    fn test_essential_on_infinity_line() {
        let pd = PersistenceDiagram::from_pairs(vec![PersistencePair::new(0, 0.0, f64::INFINITY)]);
        let svg = render_diagram(&pd, "x").unwrap();
        let side = (HEIGHT - 2.0 * MARGIN).min(WIDTH - 2.0 * MARGIN);
        let inf_y = MARGIN + side - side;
        assert!(svg.contains(&format!("cy=\"{:.2}\"", inf_y)));
    }
}
