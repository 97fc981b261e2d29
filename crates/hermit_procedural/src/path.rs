//! # Main Path Generation
//!
//! The main path is the ordered list of floor anchors the player walks on.
//! It is produced by a constrained random walk over the grid in three phases:
//!
//! ```text
//! safe zone ──► scaled region ──────────────────────► end clear runway
//! flat, no RNG   flat runs | gaps | height steps        flat, contiguous
//! ```
//!
//! The walk tracks a column cursor (the first free column right of the last
//! anchor) as an integer, so anchor X coordinates never accumulate float error.
//!
//! ## Feasibility
//!
//! - consecutive anchors are at most `(max_gap_tiles + 1)` cells apart
//! - a height step never exceeds `max_jump_y`
//! - a gap never changes height
//!
//! No physics simulation is involved. These bounds are what "passable" means.

use hermit_shared::Vec2;

use crate::config::GenerationConfig;
use crate::grid::{GridQuantizer, ALIGN_EPSILON};
use crate::random::SeededRandom;

/// Chance that a height step is doubled into a larger jump.
pub const LARGE_STEP_CHANCE: f32 = 0.2;

/// Ordered floor anchors of one level.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MainPath {
    anchors: Vec<Vec2>,
}

impl MainPath {
    /// Wraps an anchor list. Anchors must be ordered by increasing X.
    #[must_use]
    pub fn from_anchors(anchors: Vec<Vec2>) -> Self {
        Self { anchors }
    }

    /// All anchors in path order.
    #[must_use]
    pub fn anchors(&self) -> &[Vec2] {
        &self.anchors
    }

    /// Number of anchors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    /// Returns true if the path has no anchors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Anchor at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Vec2> {
        self.anchors.get(index).copied()
    }

    /// First anchor.
    #[must_use]
    pub fn first(&self) -> Option<Vec2> {
        self.anchors.first().copied()
    }

    /// Last anchor.
    #[must_use]
    pub fn last(&self) -> Option<Vec2> {
        self.anchors.last().copied()
    }

    /// Length (in anchors) of the flat, gapless run starting at `index`.
    ///
    /// The run continues while the next anchor is exactly one cell to the
    /// right at the same height. Returns 0 for an out-of-range index.
    #[must_use]
    pub fn contiguous_run(&self, index: usize, cell: f32) -> usize {
        let Some(mut current) = self.get(index) else {
            return 0;
        };
        let mut count = 1;
        for &next in &self.anchors[index + 1..] {
            let same_height = (next.y - current.y).abs() <= ALIGN_EPSILON;
            let adjacent = ((next.x - current.x) - cell).abs() <= ALIGN_EPSILON;
            if !(same_height && adjacent) {
                break;
            }
            count += 1;
            current = next;
        }
        count
    }
}

/// Produces the main path for a config.
#[derive(Clone, Copy, Debug)]
pub struct PathGenerator<'a> {
    config: &'a GenerationConfig,
    grid: GridQuantizer,
}

impl<'a> PathGenerator<'a> {
    /// Creates a generator for a validated config.
    #[must_use]
    pub const fn new(config: &'a GenerationConfig) -> Self {
        Self {
            config,
            grid: config.grid(),
        }
    }

    /// Walks the three phases and returns the finished path.
    ///
    /// Randomness is drawn only in the scaled region, in path order.
    pub fn generate(&self, rng: &mut SeededRandom) -> MainPath {
        let cfg = self.config;
        let origin = self.grid.snap(cfg.start_position);
        let end_start = cfg.end_zone_start();
        let x_at = |column: i32| origin.x + column as f32 * cfg.grid_size;

        let mut anchors = Vec::new();
        let mut column = 0i32;
        let mut y = origin.y;

        // Phase 1: safe zone
        for _ in 0..cfg.safe_zone_blocks {
            anchors.push(Vec2::new(x_at(column), y));
            column += 1;
        }

        // Phase 2: scaled region
        while x_at(column) < end_start {
            if rng.chance(cfg.consecutive_floor_probability) {
                for _ in 0..cfg.consecutive_floor_count {
                    anchors.push(Vec2::new(x_at(column), y));
                    column += 1;
                    if x_at(column) >= end_start {
                        break;
                    }
                }
                continue;
            }

            let mut gap = 0;
            if rng.chance(cfg.gap_insertion_chance) {
                let max_gap = i32::try_from(cfg.max_gap_tiles).unwrap_or(i32::MAX);
                gap = rng.next_int(1, max_gap.saturating_add(1));
                // The landing anchor must stay in the scaled region.
                let columns_left = self.grid.cells_between(x_at(column), end_start).max(0);
                gap = gap.min(columns_left + 1);
                while gap > 0 && x_at(column + gap) >= end_start {
                    gap -= 1;
                }
            }

            if gap == 0 {
                y = self.next_height(y, rng);
            }

            let landing = column + gap;
            anchors.push(Vec2::new(x_at(landing), y));
            column = landing + 1;
        }

        // Phase 3: end clear runway
        while x_at(column) < cfg.level_width {
            anchors.push(Vec2::new(x_at(column), y));
            column += 1;
        }

        MainPath::from_anchors(anchors)
    }

    /// One height step from `y`.
    ///
    /// Clamp order: world bounds first, then jump height, then grid snap.
    fn next_height(&self, y: f32, rng: &mut SeededRandom) -> f32 {
        let cfg = self.config;
        let cell = cfg.grid_size;

        let mut delta = rng.next_range(-cell, cell);
        if rng.chance(LARGE_STEP_CHANCE) {
            delta *= 2.0;
        }

        let mut next = (y + delta).clamp(cfg.min_y, cfg.max_y);
        if (next - y).abs() > cfg.max_jump_y {
            next = y + (next - y).signum() * cfg.max_jump_y;
        }

        let mut snapped = self.grid.snap_scalar(next);
        if (snapped - y).abs() > cfg.max_jump_y + ALIGN_EPSILON {
            snapped -= (snapped - y).signum() * cell;
        }
        snapped
    }
}
