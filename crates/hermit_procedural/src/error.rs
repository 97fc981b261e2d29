//! # Generation Error Types
//!
//! All errors that can occur before or while driving a level build.
//!
//! Per-request problems (a kind the factory cannot create, a path too short
//! for the hand-off markers) are NOT errors. They are collected as
//! [`BuildWarning`](crate::assembler::BuildWarning)s on the finished build.

use thiserror::Error;

/// Errors raised while loading or validating a [`GenerationConfig`](crate::GenerationConfig).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A probability field is outside `[0, 1]` (or NaN).
    #[error("probability `{field}` must be within [0, 1], got {value}")]
    ProbabilityOutOfRange {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f32,
    },

    /// A length that must be strictly positive is zero, negative or not finite.
    #[error("`{field}` must be a positive finite number, got {value}")]
    NonPositive {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f32,
    },

    /// A count that must be at least one is zero.
    #[error("`{field}` must be at least 1")]
    ZeroCount {
        /// Name of the offending field.
        field: &'static str,
    },

    /// Obstacle thresholds are not cumulative cut points ending at 1.0.
    #[error("obstacle thresholds must be non-decreasing and end at 1.0, got {thresholds:?}")]
    ThresholdsNotMonotonic {
        /// Spike, explosive, poison and saw cut points in that order.
        thresholds: [f32; 4],
    },

    /// The forced-clear runway does not fit inside the level.
    #[error("end clear zone ({zone_width} units) must be shorter than the level ({level_width} units)")]
    EndZoneTooWide {
        /// `end_clear_zone_blocks * grid_size`.
        zone_width: f32,
        /// Configured level width.
        level_width: f32,
    },

    /// The safe zone already reaches into the end clear zone.
    #[error("safe zone ends at x={safe_end} but the end clear zone starts at x={end_start}")]
    ZonesOverlap {
        /// First column after the safe zone.
        safe_end: f32,
        /// First column of the end clear zone.
        end_start: f32,
    },

    /// Vertical bounds are inverted.
    #[error("min_y ({min_y}) is greater than max_y ({max_y})")]
    InvertedBounds {
        /// Configured lower bound.
        min_y: f32,
        /// Configured upper bound.
        max_y: f32,
    },

    /// The start height lies outside the vertical bounds.
    #[error("start y ({start_y}) lies outside [{min_y}, {max_y}]")]
    StartOutOfBounds {
        /// Configured start height.
        start_y: f32,
        /// Configured lower bound.
        min_y: f32,
        /// Configured upper bound.
        max_y: f32,
    },

    /// A position that anchors the grid is not a multiple of the grid size.
    #[error("`{field}` ({value}) is not a multiple of grid size {grid_size}")]
    OffGrid {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f32,
        /// Configured grid size.
        grid_size: f32,
    },

    /// The widest gap the path may open is longer than a character can jump.
    #[error("widest gap step ({step} units) exceeds max_jump_x ({max_jump_x} units)")]
    GapExceedsJump {
        /// `(max_gap_tiles + 1) * grid_size`.
        step: f32,
        /// Configured horizontal jump limit.
        max_jump_x: f32,
    },

    /// A jump limit is negative or not finite.
    #[error("`{field}` must be a non-negative finite number, got {value}")]
    NegativeJump {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f32,
    },

    /// The config file could not be read.
    #[error("cannot read config file: {0}")]
    Io(String),

    /// The config file is not valid TOML for this schema.
    #[error("invalid config file: {0}")]
    Parse(String),
}

/// Errors raised by the [`LevelGenerator`](crate::LevelGenerator) driver.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    /// Configuration was rejected before path generation started.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The build stopped before every request was issued.
    #[error("level build for seed {seed} was cancelled before completion")]
    Cancelled {
        /// Seed of the abandoned build.
        seed: u64,
    },
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for generator operations.
pub type GenerationResult<T> = Result<T, GenerationError>;
