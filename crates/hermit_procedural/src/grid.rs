//! # Grid Quantizer
//!
//! Every tile of a generated level sits on a uniform square grid. This module
//! snaps arbitrary world positions onto that grid and lays out vertical tile
//! columns (fill-below, hazard columns, boundary walls).
//!
//! Columns are computed from an integer tile count, never by repeatedly
//! subtracting the cell size, so long columns do not drift off the grid.

use hermit_shared::Vec2;

/// Tolerance used when comparing grid-aligned world coordinates.
pub const ALIGN_EPSILON: f32 = 1e-3;

/// Snaps positions to a uniform grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridQuantizer {
    cell: f32,
}

impl GridQuantizer {
    /// Creates a quantizer for square cells of `cell` world units.
    #[inline]
    #[must_use]
    pub const fn new(cell: f32) -> Self {
        Self { cell }
    }

    /// Cell size in world units.
    #[inline]
    #[must_use]
    pub const fn cell(self) -> f32 {
        self.cell
    }

    /// Rounds one coordinate to the nearest multiple of the cell size.
    #[inline]
    #[must_use]
    pub fn snap_scalar(self, value: f32) -> f32 {
        (value / self.cell).round() * self.cell
    }

    /// Rounds each axis independently to the nearest multiple of the cell size.
    #[inline]
    #[must_use]
    pub fn snap(self, position: Vec2) -> Vec2 {
        Vec2::new(self.snap_scalar(position.x), self.snap_scalar(position.y))
    }

    /// Returns true if `value` is a multiple of the cell size.
    #[must_use]
    pub fn is_aligned(self, value: f32) -> bool {
        (value - self.snap_scalar(value)).abs() <= ALIGN_EPSILON
    }

    /// Returns true if both axes of `position` are on the grid.
    #[must_use]
    pub fn is_aligned_pos(self, position: Vec2) -> bool {
        self.is_aligned(position.x) && self.is_aligned(position.y)
    }

    /// Number of whole cells between `from` and `to` (rounded).
    #[must_use]
    pub fn cells_between(self, from: f32, to: f32) -> i32 {
        ((to - from) / self.cell).round() as i32
    }

    /// Tiles strictly below `top`, one cell apart, down to `floor_y` inclusive.
    pub fn column_below(self, top: Vec2, floor_y: f32) -> impl Iterator<Item = Vec2> {
        let start = top.y - self.cell;
        self.column_between(top.x, start, floor_y)
    }

    /// Tiles from `top_y` down to `bottom_y`, both inclusive, at column `x`.
    ///
    /// Yields nothing when `top_y < bottom_y`.
    pub fn column_between(self, x: f32, top_y: f32, bottom_y: f32) -> impl Iterator<Item = Vec2> {
        let cell = self.cell;
        let span = (top_y - bottom_y) / cell;
        let count = if span < -ALIGN_EPSILON {
            0
        } else {
            (span + ALIGN_EPSILON).floor() as i32 + 1
        };
        (0..count).map(move |step| Vec2::new(x, top_y - step as f32 * cell))
    }
}
