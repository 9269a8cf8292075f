use crate::foundation::core::{Point, Viewport};

/// Columns per row when none is configured.
pub const DEFAULT_COLUMNS: usize = 10;
/// Slot count of the synthetic grid used when there are no records.
pub const PLACEHOLDER_SLOTS: usize = 10;

/// Anchor of one record: the base of its stem.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Position {
    /// Horizontal anchor.
    pub x: f64,
    /// Vertical anchor, the flower's ground point.
    pub y: f64,
    /// Row index, 0 nearest the viewer.
    pub row: usize,
    /// Column index.
    pub col: usize,
}

impl Position {
    /// Anchor as a point.
    pub fn point(self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Wrapping grid: columns spread between fixed side margins, rows stacked upward inside a
/// horizontal band, row 0 on the band's bottom edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLayout {
    /// Columns per row.
    pub columns: usize,
    /// Side margin in user units.
    pub margin_x: f64,
    /// Band top as a fraction of the viewport height.
    pub band_top: f64,
    /// Band bottom as a fraction of the viewport height.
    pub band_bottom: f64,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            margin_x: 140.0,
            band_top: 0.66,
            band_bottom: 0.92,
        }
    }
}

impl GridLayout {
    /// Layout with `columns` per row and default margins.
    pub fn with_columns(columns: usize) -> Self {
        Self {
            columns,
            ..Self::default()
        }
    }

    /// Positions for `n` records; `n == 0` yields the placeholder grid.
    pub fn positions(&self, n: usize, viewport: Viewport) -> Vec<Position> {
        let n = if n == 0 { PLACEHOLDER_SLOTS } else { n };
        let columns = self.columns.max(1);
        let rows = n.div_ceil(columns);

        // Margins shrink on viewports too narrow to hold them.
        let margin = self.margin_x.min(viewport.width * 0.25);
        let span = viewport.width - 2.0 * margin;
        let x_step = if columns > 1 {
            span / (columns - 1) as f64
        } else {
            0.0
        };

        let top = viewport.height * self.band_top;
        let bottom = viewport.height * self.band_bottom;
        let y_step = if rows > 1 {
            (bottom - top) / (rows - 1) as f64
        } else {
            0.0
        };

        (0..n)
            .map(|index| {
                let col = index % columns;
                let row = index / columns;
                let x = if columns == 1 {
                    viewport.width * 0.5
                } else {
                    margin + col as f64 * x_step
                };
                Position {
                    x,
                    y: bottom - row as f64 * y_step,
                    row,
                    col,
                }
            })
            .collect()
    }
}

/// Lay out `n` records on a `columns`-wide grid with the default margins and band.
pub fn layout(n: usize, viewport: Viewport, columns: usize) -> Vec<Position> {
    GridLayout::with_columns(columns).positions(n, viewport)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/solver.rs"]
mod tests;
