//! Plain-text renderings used by the experiment harness.
//!
//! The engines never format anything themselves; these helpers turn their
//! inputs and results into strings.

use std::fmt::Write;

use crate::grid::Grid;
use crate::problems::zero_square::SquareResult;
use crate::weights::WeightTable;

/// Largest grid side that [`render_grid`] will draw.
pub const MAX_RENDER_SIDE: usize = 20;

const GRAPH_WIDTH: usize = 60;
const GRAPH_HEIGHT: usize = 15;

/// Draw `grid` with cells of `result` bracketed, or `None` when the grid is
/// larger than [`MAX_RENDER_SIDE`] in either direction.
pub fn render_grid(grid: &Grid, result: Option<&SquareResult>) -> Option<String> {
    if grid.rows() > MAX_RENDER_SIDE || grid.cols() > MAX_RENDER_SIDE {
        return None;
    }
    let mut out = String::new();
    for r in 0..grid.rows() {
        for c in 0..grid.cols() {
            let value = grid.get(r, c).unwrap_or_default();
            if result.is_some_and(|res| res.contains(r, c)) {
                let _ = write!(out, "[{value}]");
            } else {
                let _ = write!(out, " {value} ");
            }
        }
        out.push('\n');
    }
    Some(out)
}

/// List weights six to a line.
pub fn render_weights(weights: &WeightTable) -> String {
    let mut out = String::new();
    for (idx, (symbol, weight)) in weights.iter().enumerate() {
        let _ = write!(out, "{symbol}: {weight:.3}  ");
        if (idx + 1) % 6 == 0 {
            out.push('\n');
        }
    }
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

/// Scatter `ys` against `xs` on a 60x15 character canvas anchored at zero.
///
/// Points are widened to three columns so sparse series stay visible.
pub fn ascii_graph(xs: &[f64], ys: &[f64], x_label: &str, y_label: &str) -> String {
    let max_x = xs.iter().copied().fold(0.0, f64::max);
    let max_y = ys.iter().copied().fold(0.0, f64::max);
    let points: Vec<(i64, i64)> = xs
        .iter()
        .zip(ys)
        .map(|(&x, &y)| {
            (
                scale(x, max_x, GRAPH_WIDTH),
                scale(y, max_y, GRAPH_HEIGHT),
            )
        })
        .collect();

    let mut out = String::new();
    let _ = writeln!(out, "{y_label}");
    let _ = writeln!(out, "^");
    for row in (0..=GRAPH_HEIGHT).rev() {
        let y_val = max_y * row as f64 / GRAPH_HEIGHT as f64;
        let _ = write!(out, "{y_val:7.1} |");
        for col in 0..GRAPH_WIDTH {
            let hit = points
                .iter()
                .any(|&(px, py)| (col as i64 - px).abs() <= 1 && row as i64 == py);
            out.push(match (hit, row) {
                (true, _) => '*',
                (false, 0) => '-',
                _ => ' ',
            });
        }
        out.push('\n');
    }
    let _ = writeln!(out, "        +{}> {x_label}", "-".repeat(GRAPH_WIDTH));
    let _ = writeln!(
        out,
        "        0{}{}",
        " ".repeat(GRAPH_WIDTH - 5),
        max_x.round() as i64
    );
    out
}

fn scale(value: f64, max: f64, cells: usize) -> i64 {
    if max > 0.0 {
        (value * cells as f64 / max) as i64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brackets_solution_cells() {
        let g = Grid::from_rows(&[[0u8, 1], [0, 0]]).unwrap();
        let r = SquareResult {
            size: 1,
            position: Some((1, 1)),
        };
        assert_eq!(render_grid(&g, Some(&r)).unwrap(), " 0  1 \n 0 [0]\n");
    }

    #[test]
    fn large_grids_are_not_rendered() {
        assert!(render_grid(&Grid::filled(21, 3, 0), None).is_none());
        assert!(render_grid(&Grid::filled(20, 20, 0), None).is_some());
    }

    #[test]
    fn weights_wrap_after_six() {
        let text = render_weights(&WeightTable::latin_uniform());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("A: 1.000  B: 1.000"));
        assert!(lines[4].starts_with("Y: 1.000  Z: 1.000"));
    }

    #[test]
    fn graph_has_fixed_canvas() {
        let g = ascii_graph(&[100.0, 1000.0], &[1.0, 10.0], "size", "time");
        let lines: Vec<&str> = g.lines().collect();
        // label, caret, 16 canvas rows, axis, tick labels
        assert_eq!(lines.len(), 2 + GRAPH_HEIGHT + 1 + 2);
        assert_eq!(lines[0], "time");
        assert!(lines[2].starts_with("   10.0 |"));
        assert!(lines[2].contains('*'));
        assert!(lines.last().unwrap().ends_with("1000"));
    }

    #[test]
    fn graph_tolerates_all_zero_series() {
        let g = ascii_graph(&[0.0], &[0.0], "x", "y");
        assert!(g.contains('*'));
    }
}
