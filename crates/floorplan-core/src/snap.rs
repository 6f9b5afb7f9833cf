//! Coordinate quantization strategies.

use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

/// Grid size for snapping (matches the visual floor grid).
pub const GRID_SIZE: f64 = 20.0;

/// Snap mode selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapMode {
    /// No snapping.
    None,
    /// Snap to grid intersections.
    #[default]
    Grid,
}

impl SnapMode {
    /// Build the strategy for this mode.
    pub fn strategy(self, grid_size: f64) -> Box<dyn SnapStrategy> {
        match self {
            SnapMode::None => Box::new(NoSnap),
            SnapMode::Grid => Box::new(GridSnap::new(grid_size)),
        }
    }
}

/// Round `value` to the nearest multiple of `cell`, halves rounding up.
///
/// Non-positive or non-finite cells leave the value unchanged.
pub fn snap_value(value: f64, cell: f64) -> f64 {
    if !(cell.is_finite() && cell > 0.0) {
        return value;
    }
    (value / cell + 0.5).floor() * cell
}

/// Snap a point to the nearest grid intersection.
pub fn snap_to_grid(point: Point, grid_size: f64) -> Point {
    Point::new(snap_value(point.x, grid_size), snap_value(point.y, grid_size))
}

/// Snap a size to the grid, never below one cell.
pub fn snap_size_to_grid(size: Size, grid_size: f64) -> Size {
    if !(grid_size.is_finite() && grid_size > 0.0) {
        return size;
    }
    Size::new(
        grid_size.max(snap_value(size.width, grid_size)),
        grid_size.max(snap_value(size.height, grid_size)),
    )
}

/// Pluggable quantization used by the interaction engine.
///
/// Any `Fn(Point) -> Point` closure is a strategy too (it leaves sizes
/// alone).
pub trait SnapStrategy {
    /// Quantize a position.
    fn snap_point(&self, point: Point) -> Point;

    /// Quantize a size produced by a resize.
    fn snap_size(&self, size: Size) -> Size {
        size
    }
}

impl<F> SnapStrategy for F
where
    F: Fn(Point) -> Point,
{
    fn snap_point(&self, point: Point) -> Point {
        self(point)
    }
}

/// Identity strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSnap;

impl SnapStrategy for NoSnap {
    fn snap_point(&self, point: Point) -> Point {
        point
    }
}

/// Square-grid strategy.
#[derive(Debug, Clone, Copy)]
pub struct GridSnap {
    cell: f64,
}

impl GridSnap {
    pub fn new(cell: f64) -> Self {
        Self { cell }
    }

    pub fn cell(&self) -> f64 {
        self.cell
    }
}

impl Default for GridSnap {
    fn default() -> Self {
        Self::new(GRID_SIZE)
    }
}

impl SnapStrategy for GridSnap {
    fn snap_point(&self, point: Point) -> Point {
        snap_to_grid(point, self.cell)
    }

    fn snap_size(&self, size: Size) -> Size {
        snap_size_to_grid(size, self.cell)
    }
}
