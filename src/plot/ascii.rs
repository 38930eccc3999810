//! Character-grid plots for the terminal.
//!
//! Output is a fixed-size grid with a one-line range header, so the same fit
//! always renders to the same text. Observed samples are drawn as `o`, the
//! fitted curve as `-`; samples win where both land on one cell.

use crate::domain::{FitFile, FitReport, Samples};
use crate::io::fit_file::build_grid;

const MIN_WIDTH: usize = 10;
const MIN_HEIGHT: usize = 5;
/// Fraction of the y span added above and below the data.
const Y_MARGIN: f64 = 0.05;

/// Samples with the fitted curve overlaid.
pub fn render_ascii_plot(samples: &Samples, report: &FitReport, width: usize, height: usize) -> String {
    let stats = samples.stats();
    let (x_lo, x_hi) = finite_span(stats.x_min, stats.x_max).unwrap_or((0.0, 1.0));
    let grid = build_grid(report.model, &report.coefficients, x_lo, x_hi, width.max(2));
    let curve: Vec<(f64, f64)> = grid.x.into_iter().zip(grid.y).collect();
    let points: Vec<(f64, f64)> = samples.x().iter().copied().zip(samples.y().iter().copied()).collect();

    Canvas::new(width, height, (x_lo, x_hi), &points, &curve).render()
}

/// The saved evaluation grid of a fit file, without samples.
pub fn render_ascii_plot_from_fit_file(fit: &FitFile, width: usize, height: usize) -> String {
    let (x_lo, x_hi) = finite_span(fit.stats.x_min, fit.stats.x_max).unwrap_or((0.0, 1.0));
    let curve: Vec<(f64, f64)> = fit.grid.x.iter().copied().zip(fit.grid.y.iter().copied()).collect();

    Canvas::new(width, height, (x_lo, x_hi), &[], &curve).render()
}

/// Linear map from a value range onto `0..cells`.
#[derive(Debug, Clone, Copy)]
struct Axis {
    lo: f64,
    hi: f64,
    cells: usize,
}

impl Axis {
    fn cell(&self, v: f64) -> usize {
        let t = ((v - self.lo) / (self.hi - self.lo)).clamp(0.0, 1.0);
        (t * (self.cells - 1) as f64).round() as usize
    }
}

struct Canvas<'a> {
    cells: Vec<Vec<char>>,
    x: Axis,
    y: Axis,
    points: &'a [(f64, f64)],
    curve: &'a [(f64, f64)],
}

impl<'a> Canvas<'a> {
    fn new(
        width: usize,
        height: usize,
        x_span: (f64, f64),
        points: &'a [(f64, f64)],
        curve: &'a [(f64, f64)],
    ) -> Self {
        let width = width.max(MIN_WIDTH);
        let height = height.max(MIN_HEIGHT);

        let ys = points.iter().chain(curve).map(|&(_, y)| y);
        let (y_lo, y_hi) = ys
            .fold(None, |acc: Option<(f64, f64)>, y| match acc {
                None => Some((y, y)),
                Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
            })
            .and_then(|(lo, hi)| finite_span(lo, hi))
            .unwrap_or((0.0, 1.0));
        let margin = ((y_hi - y_lo) * Y_MARGIN).max(1e-12);

        Self {
            cells: vec![vec![' '; width]; height],
            x: Axis {
                lo: x_span.0,
                hi: x_span.1,
                cells: width,
            },
            y: Axis {
                lo: y_lo - margin,
                hi: y_hi + margin,
                cells: height,
            },
            points,
            curve,
        }
    }

    /// Grid position of a data point; row 0 is the top.
    fn locate(&self, x: f64, y: f64) -> (usize, usize) {
        (self.y.cells - 1 - self.y.cell(y), self.x.cell(x))
    }

    fn render(mut self) -> String {
        self.draw_curve();
        for &(x, y) in self.points {
            let (row, col) = self.locate(x, y);
            self.cells[row][col] = 'o';
        }

        let mut out = format!(
            "Plot: x=[{:.3}, {:.3}] | y=[{:.2}, {:.2}]\n",
            self.x.lo, self.x.hi, self.y.lo, self.y.hi
        );
        for row in &self.cells {
            out.extend(row.iter());
            out.push('\n');
        }
        out
    }

    fn draw_curve(&mut self) {
        let cells: Vec<(usize, usize)> = self.curve.iter().map(|&(x, y)| self.locate(x, y)).collect();
        if cells.len() < 2 {
            return;
        }
        for pair in cells.windows(2) {
            self.segment(pair[0], pair[1]);
        }
    }

    /// Connect two cells, one mark per column (or per row for vertical runs).
    fn segment(&mut self, (r0, c0): (usize, usize), (r1, c1): (usize, usize)) {
        if c0 == c1 {
            for row in r0.min(r1)..=r0.max(r1) {
                self.mark(row, c0);
            }
            return;
        }

        let (left, right) = if c0 < c1 { ((r0, c0), (r1, c1)) } else { ((r1, c1), (r0, c0)) };
        let run = (right.1 - left.1) as f64;
        for col in left.1..=right.1 {
            let t = (col - left.1) as f64 / run;
            let row = left.0 as f64 + t * (right.0 as f64 - left.0 as f64);
            self.mark(row.round() as usize, col);
        }
    }

    fn mark(&mut self, row: usize, col: usize) {
        let cell = self.cells.get_mut(row).and_then(|r| r.get_mut(col));
        if let Some(cell) = cell.filter(|c| **c == ' ') {
            *cell = '-';
        }
    }
}

fn finite_span(lo: f64, hi: f64) -> Option<(f64, f64)> {
    (lo.is_finite() && hi.is_finite() && hi > lo).then_some((lo, hi))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Correlation;
    use crate::models::Model;

    fn report(model: Model, coefficients: Vec<f64>) -> FitReport {
        FitReport {
            model,
            coefficients,
            phi: vec![],
            epsilon: vec![],
            rmse: 0.0,
            correlation: Correlation {
                r: 1.0,
                note: String::new(),
            },
        }
    }

    #[test]
    fn constant_fit_golden() {
        let samples = Samples::new(vec![1.0, 10.0], vec![100.0, 110.0]).unwrap();
        let txt = render_ascii_plot(&samples, &report(Model::polynomial(0), vec![100.0]), 10, 5);
        let expected = concat!(
            "Plot: x=[1.000, 10.000] | y=[99.50, 110.50]\n",
            "         o\n",
            "          \n",
            "          \n",
            "          \n",
            "o---------\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn rising_line_golden() {
        let samples = Samples::new(vec![0.0, 9.0], vec![0.0, 9.0]).unwrap();
        let txt = render_ascii_plot(&samples, &report(Model::polynomial(1), vec![0.0, 1.0]), 10, 5);
        let expected = concat!(
            "Plot: x=[0.000, 9.000] | y=[-0.45, 9.45]\n",
            "         o\n",
            "      --- \n",
            "    --    \n",
            " ---      \n",
            "o         \n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn dimensions_are_clamped() {
        let samples = Samples::new(vec![0.0, 1.0], vec![0.0, 1.0]).unwrap();
        let txt = render_ascii_plot(&samples, &report(Model::polynomial(1), vec![0.0, 1.0]), 1, 1);
        // header + 5 rows of 10 columns
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[1..].iter().all(|l| l.chars().count() == 10));
    }
}
