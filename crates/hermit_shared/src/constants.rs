//! # Level Layout Constants
//!
//! Fixed world-space values that every generated level shares.
//!
//! **CRITICAL:** The game host positions the camera kill-plane and the
//! door triggers against these values. Changing them changes every level.

// =============================================================================
// VERTICAL EXTENTS
// =============================================================================

/// Lowest Y that fill-below columns, hazard columns and walls reach (inclusive).
pub const WORLD_FLOOR_Y: f32 = -15.0;

/// Top of the boundary walls built at the first and last anchors.
pub const WALL_TOP_Y: f32 = 20.0;

// =============================================================================
// HAND-OFF MARKERS
// =============================================================================

/// Anchor index that carries the player spawn marker.
pub const SPAWN_ANCHOR_INDEX: usize = 5;

/// Distance from the end of the path (in anchors) of the victory marker.
pub const VICTORY_ANCHOR_OFFSET: usize = 6;

/// Extra lift applied on top of one grid cell when placing either marker.
pub const MARKER_LIFT: f32 = 1.15;

// =============================================================================
// ELEMENT OFFSETS
// =============================================================================

/// Height above the floor anchor at which enemies are dropped in.
pub const ENEMY_HEIGHT_OFFSET: f32 = 5.0;

/// Horizontal distance between background decoration tiles.
pub const BACKGROUND_SPACING: f32 = 5.0;
