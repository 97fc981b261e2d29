//! # Placement Planner
//!
//! Decides what stands on, floats above, or fills the gap before each anchor
//! of the scaled zone.
//!
//! ## Draw Order
//!
//! For one anchor the rolls are always consumed in this order:
//!
//! ```text
//! gap fill (no RNG) -> obstacle -> collectible -> enemy -> platform
//! ```
//!
//! Changing the order changes every level generated from an existing seed.
//!
//! ## Difficulty
//!
//! Obstacle and enemy chances scale linearly with horizontal progress, from
//! the base chance at `x = 0` up to double the base chance at `level_width`.

use hermit_shared::{Vec2, ENEMY_HEIGHT_OFFSET, WORLD_FLOOR_Y};

use crate::config::GenerationConfig;
use crate::grid::GridQuantizer;
use crate::path::MainPath;
use crate::placement::{
    CollectibleKind, EnemyKind, HazardFill, ObstacleKind, PlacementKind, PlacementRequest,
    SawMotion,
};
use crate::random::SeededRandom;
use crate::zone::Zone;

/// Draw below which the first enemy variant is picked.
const ZOMBIE_A_CUTOFF: f32 = 0.33;
/// Draw below which the second enemy variant is picked.
const ZOMBIE_B_CUTOFF: f32 = 0.66;

/// Per-anchor placement decisions for the scaled zone.
#[derive(Clone, Copy, Debug)]
pub struct PlacementPlanner<'a> {
    config: &'a GenerationConfig,
    grid: GridQuantizer,
}

impl<'a> PlacementPlanner<'a> {
    /// Creates a planner for a validated config.
    #[must_use]
    pub const fn new(config: &'a GenerationConfig) -> Self {
        Self {
            config,
            grid: config.grid(),
        }
    }

    /// Zone of anchor `index` on `path`.
    #[must_use]
    pub fn zone(&self, index: usize, path: &MainPath) -> Zone {
        Zone::classify(
            index,
            path.len(),
            self.config.safe_zone_blocks,
            self.config.end_clear_zone_blocks,
        )
    }

    /// Appends every placement for anchor `index` to `out`.
    ///
    /// Anchors outside the scaled zone get nothing and consume no randomness.
    pub fn plan_anchor(
        &self,
        index: usize,
        path: &MainPath,
        rng: &mut SeededRandom,
        out: &mut Vec<PlacementRequest>,
    ) {
        if !self.zone(index, path).is_scaled() {
            return;
        }
        let Some(anchor) = path.get(index) else {
            return;
        };
        let floor = self.grid.snap(anchor);

        if let Some(previous) = index.checked_sub(1).and_then(|i| path.get(i)) {
            self.fill_gap(previous, anchor, out);
        }

        let progress = self.progress(floor.x);
        let obstacle_chance = self.config.base_obstacle_chance * (1.0 + progress);
        let enemy_chance = self.config.base_enemy_chance * (1.0 + progress);

        self.roll_obstacle(floor, obstacle_chance, rng, out);
        self.roll_collectible(floor, rng, out);
        self.roll_enemy(index, path, floor, enemy_chance, rng, out);
        self.roll_platform(floor, rng, out);
    }

    /// Horizontal completion fraction at `x`, clamped to `[0, 1]`.
    #[must_use]
    pub fn progress(&self, x: f32) -> f32 {
        (x / self.config.level_width).clamp(0.0, 1.0)
    }

    /// Turns the open columns between two anchors into hazard columns.
    fn fill_gap(&self, previous: Vec2, current: Vec2, out: &mut Vec<PlacementRequest>) {
        let open_columns = self.grid.cells_between(previous.x, current.x) - 1;
        if open_columns <= 0 {
            return;
        }

        let surface_y = self.grid.snap_scalar(previous.y);
        for step in 1..=open_columns {
            let x = previous.x + step as f32 * self.grid.cell();
            let surface = self.grid.snap(Vec2::new(x, surface_y));
            out.push(PlacementRequest::new(
                PlacementKind::HazardFill(HazardFill::Surface),
                surface,
            ));
            out.extend(
                self.grid
                    .column_below(surface, WORLD_FLOOR_Y)
                    .map(|p| PlacementRequest::new(PlacementKind::HazardFill(HazardFill::Column), p)),
            );
        }
    }

    fn roll_obstacle(
        &self,
        floor: Vec2,
        chance: f32,
        rng: &mut SeededRandom,
        out: &mut Vec<PlacementRequest>,
    ) {
        if !rng.chance(chance) {
            return;
        }

        let cell = self.grid.cell();
        let thresholds = &self.config.obstacles;
        let roll = rng.next_uniform();
        let standing = self.grid.snap(floor.lifted(cell));

        let kind = if roll < thresholds.spike {
            ObstacleKind::Spike
        } else if roll < thresholds.explosive_barrel {
            ObstacleKind::ExplosiveBarrel
        } else if roll < thresholds.poison_barrel {
            ObstacleKind::PoisonBarrel
        } else if roll < thresholds.saw {
            let offset = rng.next_range(cell, 4.0 * cell);
            let floating = self.grid.snap(floor.lifted(offset));
            let motion = if rng.chance(0.5) {
                SawMotion::Horizontal
            } else {
                SawMotion::Vertical
            };
            out.push(PlacementRequest::new(
                PlacementKind::Obstacle(ObstacleKind::Saw(motion)),
                floating,
            ));
            return;
        } else {
            return;
        };

        out.push(PlacementRequest::new(PlacementKind::Obstacle(kind), standing));
    }

    fn roll_collectible(&self, floor: Vec2, rng: &mut SeededRandom, out: &mut Vec<PlacementRequest>) {
        if !rng.chance(self.config.collectible_chance) {
            return;
        }
        let kind = if rng.chance(0.5) {
            CollectibleKind::Battery
        } else {
            CollectibleKind::RepairKit
        };
        let position = self.grid.snap(floor.lifted(self.grid.cell()));
        out.push(PlacementRequest::new(PlacementKind::Collectible(kind), position));
    }

    fn roll_enemy(
        &self,
        index: usize,
        path: &MainPath,
        floor: Vec2,
        chance: f32,
        rng: &mut SeededRandom,
        out: &mut Vec<PlacementRequest>,
    ) {
        // Enemies need room to patrol; the roll is skipped entirely otherwise.
        let run = path.contiguous_run(index, self.grid.cell());
        if (run as f32) * self.grid.cell() < self.config.min_enemy_floor_length {
            return;
        }
        if !rng.chance(chance) {
            return;
        }

        let roll = rng.next_uniform();
        let kind = if roll < ZOMBIE_A_CUTOFF {
            EnemyKind::ZombieA
        } else if roll < ZOMBIE_B_CUTOFF {
            EnemyKind::ZombieB
        } else {
            EnemyKind::Robot
        };
        let position = self.grid.snap(floor.lifted(ENEMY_HEIGHT_OFFSET));
        out.push(PlacementRequest::new(PlacementKind::Enemy(kind), position));
    }

    fn roll_platform(&self, floor: Vec2, rng: &mut SeededRandom, out: &mut Vec<PlacementRequest>) {
        if !rng.chance(self.config.floating_platform_chance) {
            return;
        }
        let cell = self.grid.cell();
        let height = rng.next_range(2.0 * cell, 4.0 * cell);
        let position = self.grid.snap(floor.lifted(height));
        out.push(PlacementRequest::new(PlacementKind::Platform, position));
    }
}
