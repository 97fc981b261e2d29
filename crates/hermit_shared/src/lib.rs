//! # Hermit Shared
//!
//! Common types used by both the level generator and the game host.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER contain generation logic. It only carries the
//! vocabulary both sides agree on: world-space positions and the fixed
//! layout constants of a level.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
pub mod math;

pub use constants::{
    BACKGROUND_SPACING, ENEMY_HEIGHT_OFFSET, MARKER_LIFT, SPAWN_ANCHOR_INDEX,
    VICTORY_ANCHOR_OFFSET, WALL_TOP_Y, WORLD_FLOOR_Y,
};
pub use math::Vec2;
