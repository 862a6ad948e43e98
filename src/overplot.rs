//! Overplotting diagnostic.
//!
//! Buckets display-space point positions into a uniform grid whose cell is
//! the footprint of one marker, and counts how many points land in each
//! cell. Independent of design enumeration and ranking.

use tracing::trace;

use crate::error::{Error, Result};
use crate::geometry::{Point, Rect};

/// Typographic points per inch; marker sizes are given in points.
pub const POINTS_PER_INCH: f32 = 72.0;

/// Upper bound on grid cells; larger grids are rejected rather than allocated.
pub const MAX_GRID_CELLS: usize = 1 << 24;

/// Figure dimensions in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureSize {
    /// Width in inches.
    pub width: f32,
    /// Height in inches.
    pub height: f32,
}

impl FigureSize {
    /// Create a figure size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    fn validate(self) -> Result<Self> {
        let ok = |v: f32| v.is_finite() && v > 0.0;
        if ok(self.width) && ok(self.height) {
            Ok(self)
        } else {
            Err(Error::InvalidDimensions {
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// Per-cell point counts, row-major, row 0 at the bottom of the figure.
#[derive(Debug, Clone, PartialEq)]
pub struct OccupancyGrid {
    rows: usize,
    cols: usize,
    cell_size: f32,
    counts: Vec<u32>,
}

impl OccupancyGrid {
    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cell edge length in inches.
    #[must_use]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Count for one cell.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        if row < self.rows && col < self.cols {
            Some(self.counts[row * self.cols + col])
        } else {
            None
        }
    }

    /// All counts, row-major.
    #[must_use]
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    /// Total number of counted points.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// Highest cell count.
    #[must_use]
    pub fn max(&self) -> u32 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Number of cells holding at least one point.
    #[must_use]
    pub fn occupied_cells(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Number of cells holding more than `threshold` points.
    #[must_use]
    pub fn crowded_cells(&self, threshold: u32) -> usize {
        self.counts.iter().filter(|&&c| c > threshold).count()
    }

    /// Mean count over occupied cells; 0 for an empty grid.
    #[must_use]
    pub fn mean_occupancy(&self) -> f32 {
        match self.occupied_cells() {
            0 => 0.0,
            n => self.total() as f32 / n as f32,
        }
    }
}

/// Map data-space points onto the figure, stretching their bounds to fill it.
///
/// A degenerate axis (all points share the coordinate) maps to 0.
#[must_use]
pub fn rescale_to_figure(points: &[Point], figure: FigureSize) -> Vec<Point> {
    let Some(bounds) = Rect::bounding(points) else {
        return Vec::new();
    };
    let scale = |v: f32, min: f32, extent: f32, size: f32| {
        if extent > 0.0 {
            (v - min) / extent * size
        } else {
            0.0
        }
    };
    points
        .iter()
        .map(|p| {
            Point::new(
                scale(p.x, bounds.x, bounds.width, figure.width),
                scale(p.y, bounds.y, bounds.height, figure.height),
            )
        })
        .collect()
}

/// Count display-space points per marker-sized cell.
///
/// `points` are in inches within `figure`; `marker_size` is in points.
/// Points on the far edges fall into the last row/column; points outside the
/// figure are skipped.
///
/// # Errors
///
/// Returns [`Error::InvalidDimensions`] for a non-positive or non-finite
/// figure, or one whose grid would exceed [`MAX_GRID_CELLS`] at this marker
/// size, and [`Error::InvalidMarkerSize`] for a non-positive marker.
pub fn occupancy_grid(points: &[Point], figure: FigureSize, marker_size: f32) -> Result<OccupancyGrid> {
    let figure = figure.validate()?;
    if !(marker_size.is_finite() && marker_size > 0.0) {
        return Err(Error::InvalidMarkerSize(marker_size));
    }

    let cell_size = marker_size / POINTS_PER_INCH;
    let rows = (figure.height / cell_size).ceil();
    let cols = (figure.width / cell_size).ceil();
    let cells = if rows.is_finite() && cols.is_finite() {
        (rows as usize).checked_mul(cols as usize)
    } else {
        None
    };
    let Some(cells) = cells.filter(|&n| n <= MAX_GRID_CELLS) else {
        return Err(Error::InvalidDimensions {
            width: figure.width,
            height: figure.height,
        });
    };
    let (rows, cols) = (rows as usize, cols as usize);
    let mut counts = vec![0u32; cells];

    let area = Rect::new(0.0, 0.0, figure.width, figure.height);
    for p in points {
        if !area.contains(*p) {
            trace!(x = p.x, y = p.y, "point outside figure");
            continue;
        }
        let col = ((p.x / cell_size) as usize).min(cols - 1);
        let row = ((p.y / cell_size) as usize).min(rows - 1);
        counts[row * cols + col] += 1;
    }

    Ok(OccupancyGrid {
        rows,
        cols,
        cell_size,
        counts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_grid_dimensions() {
        let grid = occupancy_grid(&[], FigureSize::new(10.0, 10.0), 7.0).unwrap();
        assert_eq!(grid.rows(), 103);
        assert_eq!(grid.cols(), 103);
        assert_relative_eq!(grid.cell_size(), 7.0 / 72.0);
        assert_eq!(grid.total(), 0);
        assert_eq!(grid.max(), 0);
    }

    #[test]
    fn test_counts_per_cell() {
        let pts = [
            Point::new(0.1, 0.1),
            Point::new(0.2, 0.3),
            Point::new(0.9, 0.9),
            Point::new(1.0, 1.0),
            Point::new(0.7, 0.2),
        ];
        let grid = occupancy_grid(&pts, FigureSize::new(1.0, 1.0), 36.0).unwrap();
        assert_eq!((grid.rows(), grid.cols()), (2, 2));
        assert_eq!(grid.get(0, 0), Some(2));
        assert_eq!(grid.get(0, 1), Some(1));
        assert_eq!(grid.get(1, 0), Some(0));
        assert_eq!(grid.get(1, 1), Some(2));
        assert_eq!(grid.get(2, 0), None);
        assert_eq!(grid.occupied_cells(), 3);
        assert_eq!(grid.crowded_cells(1), 2);
        assert_relative_eq!(grid.mean_occupancy(), 5.0 / 3.0);
    }

    #[test]
    fn test_outside_points_skipped() {
        let pts = [Point::new(-0.1, 0.5), Point::new(0.5, 1.5), Point::new(0.5, 0.5)];
        let grid = occupancy_grid(&pts, FigureSize::new(1.0, 1.0), 36.0).unwrap();
        assert_eq!(grid.total(), 1);
    }

    #[test]
    fn test_non_square_figure() {
        let grid = occupancy_grid(&[], FigureSize::new(2.0, 1.0), 36.0).unwrap();
        assert_eq!((grid.rows(), grid.cols()), (2, 4));
        assert_eq!(grid.counts().len(), 8);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            occupancy_grid(&[], FigureSize::new(0.0, 1.0), 7.0),
            Err(Error::InvalidDimensions { .. })
        ));
        assert!(matches!(
            occupancy_grid(&[], FigureSize::new(1.0, f32::NAN), 7.0),
            Err(Error::InvalidDimensions { .. })
        ));
        assert!(matches!(
            occupancy_grid(&[], FigureSize::new(1.0, 1.0), 0.0),
            Err(Error::InvalidMarkerSize(_))
        ));
    }

    #[test]
    fn test_oversized_grid_rejected() {
        assert!(matches!(
            occupancy_grid(&[Point::new(1.0, 1.0)], FigureSize::new(1e30, 1e30), 7.0),
            Err(Error::InvalidDimensions { .. })
        ));
        assert!(matches!(
            occupancy_grid(&[], FigureSize::new(10.0, 10.0), 1e-3),
            Err(Error::InvalidDimensions { .. })
        ));
        assert!(matches!(
            occupancy_grid(&[], FigureSize::new(f32::MAX, f32::MAX), f32::MIN_POSITIVE),
            Err(Error::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_grid_at_cell_limit() {
        // 4096 x 4096 cells of one inch each.
        let grid = occupancy_grid(&[], FigureSize::new(4096.0, 4096.0), 72.0).unwrap();
        assert_eq!(grid.counts().len(), MAX_GRID_CELLS);
        assert!(occupancy_grid(&[], FigureSize::new(4097.0, 4096.0), 72.0).is_err());
    }

    #[test]
    fn test_rescale_fills_figure() {
        let pts = [Point::new(-70.0, 40.0), Point::new(-60.0, 45.0), Point::new(-65.0, 42.5)];
        let out = rescale_to_figure(&pts, FigureSize::new(10.0, 5.0));
        assert_relative_eq!(out[0].x, 0.0);
        assert_relative_eq!(out[0].y, 0.0);
        assert_relative_eq!(out[1].x, 10.0);
        assert_relative_eq!(out[1].y, 5.0);
        assert_relative_eq!(out[2].x, 5.0);
        assert_relative_eq!(out[2].y, 2.5);
    }

    #[test]
    fn test_rescale_degenerate() {
        let pts = [Point::new(3.0, 1.0), Point::new(3.0, 2.0)];
        let out = rescale_to_figure(&pts, FigureSize::new(4.0, 4.0));
        assert!(out.iter().all(|p| p.x == 0.0));
        assert!(rescale_to_figure(&[], FigureSize::new(4.0, 4.0)).is_empty());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Every rescaled point is counted exactly once.
        #[test]
        fn prop_rescaled_points_all_counted(
            coords in prop::collection::vec((-180.0f32..180.0, -90.0f32..90.0), 1..200),
            marker in 1.0f32..40.0
        ) {
            let pts: Vec<Point> = coords.into_iter().map(|(x, y)| Point::new(x, y)).collect();
            let figure = FigureSize::new(10.0, 10.0);
            let grid = occupancy_grid(&rescale_to_figure(&pts, figure), figure, marker).unwrap();
            prop_assert_eq!(grid.total() as usize, pts.len());
            prop_assert!(grid.max() as usize <= pts.len());
        }
    }
}
