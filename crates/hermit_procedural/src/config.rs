//! # Generation Configuration
//!
//! All tuning for a level build lives in one immutable [`GenerationConfig`].
//! Designers edit it as TOML; every field has a default so a file only needs
//! the values it changes.
//!
//! ```toml
//! grid_size = 2.5
//! level_width = 500.0
//! safe_zone_blocks = 12
//!
//! [obstacles]
//! spike = 0.4
//! explosive_barrel = 0.6
//! poison_barrel = 0.8
//! saw = 1.0
//!
//! [seed]
//! seed = 42
//! use_random_seed = false
//! ```
//!
//! A config is validated once, before path generation starts. Nothing is
//! silently clamped mid-build.

use std::path::Path;

use hermit_shared::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::grid::GridQuantizer;
use crate::random::LevelSeed;

/// Cumulative cut points used to pick an obstacle subtype from one uniform draw.
///
/// A draw below `spike` is a spike, below `explosive_barrel` an explosive
/// barrel, below `poison_barrel` a poison barrel, below `saw` a saw.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleThresholds {
    /// Upper cut point for spikes.
    pub spike: f32,
    /// Upper cut point for explosive barrels.
    pub explosive_barrel: f32,
    /// Upper cut point for poison barrels.
    pub poison_barrel: f32,
    /// Upper cut point for saws. Must be 1.0.
    pub saw: f32,
}

impl ObstacleThresholds {
    /// Returns the cut points in classification order.
    #[must_use]
    pub const fn as_array(self) -> [f32; 4] {
        [self.spike, self.explosive_barrel, self.poison_barrel, self.saw]
    }
}

impl Default for ObstacleThresholds {
    fn default() -> Self {
        Self {
            spike: 0.4,
            explosive_barrel: 0.6,
            poison_barrel: 0.8,
            saw: 1.0,
        }
    }
}

/// Immutable tuning for one level build.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Edge length of one square tile in world units.
    pub grid_size: f32,
    /// Position of the first floor anchor.
    pub start_position: Vec2,
    /// Lowest height the path may wander to.
    pub min_y: f32,
    /// Highest height the path may wander to.
    pub max_y: f32,
    /// Longest horizontal distance a character can clear.
    pub max_jump_x: f32,
    /// Largest height change allowed between two consecutive anchors.
    pub max_jump_y: f32,
    /// X coordinate the path must reach (exclusive).
    pub level_width: f32,
    /// Widest gap in tiles.
    pub max_gap_tiles: u32,
    /// Anchors at the start with no hazards, gaps or height changes.
    pub safe_zone_blocks: usize,
    /// Anchors at the end forced into a flat, hazard-free runway.
    pub end_clear_zone_blocks: usize,
    /// Chance that a path step opens a gap.
    pub gap_insertion_chance: f32,
    /// Obstacle chance at the start of the level (doubles towards the end).
    pub base_obstacle_chance: f32,
    /// Enemy chance at the start of the level (doubles towards the end).
    pub base_enemy_chance: f32,
    /// Chance of a floating platform above an anchor.
    pub floating_platform_chance: f32,
    /// Obstacle subtype distribution.
    pub obstacles: ObstacleThresholds,
    /// Chance of a collectible above an anchor.
    pub collectible_chance: f32,
    /// Shortest flat run (world units) an enemy may be placed on.
    pub min_enemy_floor_length: f32,
    /// Chance that the path lays a flat run instead of a single step.
    pub consecutive_floor_probability: f32,
    /// Length of a flat run in anchors.
    pub consecutive_floor_count: usize,
    /// Placement requests processed before the build yields.
    pub yield_threshold: usize,
    /// Height of the background decoration row.
    pub level_background_y: f32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            grid_size: 2.5,
            start_position: Vec2::new(-2.5, -7.5),
            min_y: -10.0,
            max_y: 20.0,
            max_jump_x: 7.5,
            max_jump_y: 5.0,
            level_width: 500.0,
            max_gap_tiles: 2,
            safe_zone_blocks: 12,
            end_clear_zone_blocks: 5,
            gap_insertion_chance: 0.15,
            base_obstacle_chance: 0.2,
            base_enemy_chance: 0.1,
            floating_platform_chance: 0.15,
            obstacles: ObstacleThresholds::default(),
            collectible_chance: 0.1,
            min_enemy_floor_length: 8.0,
            consecutive_floor_probability: 0.3,
            consecutive_floor_count: 3,
            yield_threshold: 10,
            level_background_y: 5.0,
        }
    }
}

impl GenerationConfig {
    /// Quantizer for this config's grid.
    #[must_use]
    pub const fn grid(&self) -> GridQuantizer {
        GridQuantizer::new(self.grid_size)
    }

    /// X coordinate where the forced-clear runway begins.
    #[must_use]
    pub fn end_zone_start(&self) -> f32 {
        self.level_width - self.end_clear_zone_blocks as f32 * self.grid_size
    }

    /// Parses a config from TOML text and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML, or the first
    /// validation failure.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`Self::from_toml_str`].
    pub fn from_toml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(format!("{}: {e}", path.as_ref().display())))?;
        Self::from_toml_str(&text)
    }

    /// Checks every structural rule the generator relies on.
    ///
    /// # Errors
    ///
    /// Returns the first rule that is broken.
    pub fn validate(&self) -> ConfigResult<()> {
        positive("grid_size", self.grid_size)?;
        positive("level_width", self.level_width)?;
        non_negative_jump("max_jump_x", self.max_jump_x)?;
        non_negative_jump("max_jump_y", self.max_jump_y)?;
        if !self.min_enemy_floor_length.is_finite() {
            return Err(ConfigError::NonPositive {
                field: "min_enemy_floor_length",
                value: self.min_enemy_floor_length,
            });
        }

        for (field, value) in [
            ("gap_insertion_chance", self.gap_insertion_chance),
            ("base_obstacle_chance", self.base_obstacle_chance),
            ("base_enemy_chance", self.base_enemy_chance),
            ("floating_platform_chance", self.floating_platform_chance),
            ("collectible_chance", self.collectible_chance),
            ("consecutive_floor_probability", self.consecutive_floor_probability),
            ("obstacles.spike", self.obstacles.spike),
            ("obstacles.explosive_barrel", self.obstacles.explosive_barrel),
            ("obstacles.poison_barrel", self.obstacles.poison_barrel),
            ("obstacles.saw", self.obstacles.saw),
        ] {
            probability(field, value)?;
        }

        let thresholds = self.obstacles.as_array();
        let monotonic = thresholds.windows(2).all(|pair| pair[0] <= pair[1]);
        #[allow(clippy::float_cmp)]
        let ends_at_one = self.obstacles.saw == 1.0;
        if !monotonic || !ends_at_one {
            return Err(ConfigError::ThresholdsNotMonotonic { thresholds });
        }

        if self.consecutive_floor_count == 0 {
            return Err(ConfigError::ZeroCount {
                field: "consecutive_floor_count",
            });
        }
        if self.yield_threshold == 0 {
            return Err(ConfigError::ZeroCount {
                field: "yield_threshold",
            });
        }
        if self.max_gap_tiles == 0 {
            return Err(ConfigError::ZeroCount {
                field: "max_gap_tiles",
            });
        }

        if self.min_y > self.max_y {
            return Err(ConfigError::InvertedBounds {
                min_y: self.min_y,
                max_y: self.max_y,
            });
        }

        let grid = self.grid();
        for (field, value) in [
            ("start_position.x", self.start_position.x),
            ("start_position.y", self.start_position.y),
            ("min_y", self.min_y),
            ("max_y", self.max_y),
        ] {
            if !grid.is_aligned(value) {
                return Err(ConfigError::OffGrid {
                    field,
                    value,
                    grid_size: self.grid_size,
                });
            }
        }

        let start_y = self.start_position.y;
        if start_y < self.min_y || start_y > self.max_y {
            return Err(ConfigError::StartOutOfBounds {
                start_y,
                min_y: self.min_y,
                max_y: self.max_y,
            });
        }

        let widest_step = (f64::from(self.max_gap_tiles) + 1.0) * f64::from(self.grid_size);
        if widest_step > f64::from(self.max_jump_x) {
            return Err(ConfigError::GapExceedsJump {
                step: widest_step as f32,
                max_jump_x: self.max_jump_x,
            });
        }

        let zone_width = self.end_clear_zone_blocks as f32 * self.grid_size;
        if zone_width >= self.level_width {
            return Err(ConfigError::EndZoneTooWide {
                zone_width,
                level_width: self.level_width,
            });
        }

        let safe_end = self.start_position.x + self.safe_zone_blocks as f32 * self.grid_size;
        let end_start = self.end_zone_start();
        if safe_end > end_start {
            return Err(ConfigError::ZonesOverlap { safe_end, end_start });
        }

        Ok(())
    }
}

/// How the seed for a build is chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedSettings {
    /// Explicit seed, used when `use_random_seed` is false.
    pub seed: u64,
    /// Derive a fresh seed from the clock at the start of every build.
    pub use_random_seed: bool,
}

impl SeedSettings {
    /// Always builds from `seed`.
    #[must_use]
    pub const fn fixed(seed: u64) -> Self {
        Self {
            seed,
            use_random_seed: false,
        }
    }

    /// Picks a new seed for every build.
    #[must_use]
    pub const fn random() -> Self {
        Self {
            seed: 0,
            use_random_seed: true,
        }
    }

    /// Resolves the seed for a build that starts now.
    #[must_use]
    pub fn resolve(self) -> LevelSeed {
        if self.use_random_seed {
            LevelSeed::from_clock()
        } else {
            LevelSeed::new(self.seed)
        }
    }
}

/// On-disk layout: generation tuning at the top level, seed under `[seed]`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelConfigFile {
    /// Seed selection.
    #[serde(default)]
    pub seed: SeedSettings,
    /// Generation tuning.
    #[serde(flatten)]
    pub generation: GenerationConfig,
}

impl LevelConfigFile {
    /// Parses both sections from TOML text and validates the tuning.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML, or the first
    /// validation failure.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let file: Self = toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        file.generation.validate()?;
        Ok(file)
    }

    /// Reads, parses and validates a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`Self::from_toml_str`].
    pub fn from_toml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(format!("{}: {e}", path.as_ref().display())))?;
        Self::from_toml_str(&text)
    }
}

fn probability(field: &'static str, value: f32) -> ConfigResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ProbabilityOutOfRange { field, value })
    }
}

fn positive(field: &'static str, value: f32) -> ConfigResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn non_negative_jump(field: &'static str, value: f32) -> ConfigResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NegativeJump { field, value })
    }
}
