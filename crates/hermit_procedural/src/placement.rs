//! # Placement Requests
//!
//! The generator never builds game objects itself. It emits a stream of
//! [`PlacementRequest`]s, each naming *what* goes *where*, and the level
//! assembler hands them to the game's factory one by one.

use std::fmt;

use hermit_shared::Vec2;

/// Which part of a gap a hazard tile fills.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HazardFill {
    /// Top tile of the gap, level with the floor before it.
    Surface,
    /// Tiles beneath the surface down to the world floor.
    Column,
}

/// Direction a saw travels along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SawMotion {
    /// Moves left and right.
    Horizontal,
    /// Moves up and down.
    Vertical,
}

/// Obstacle subtypes, picked from cumulative thresholds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ObstacleKind {
    /// Static floor spikes.
    Spike,
    /// Barrel that explodes when hit.
    ExplosiveBarrel,
    /// Barrel that leaks poison.
    PoisonBarrel,
    /// Floating moving saw.
    Saw(SawMotion),
}

/// Pickup subtypes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CollectibleKind {
    /// Restores energy.
    Battery,
    /// Restores health.
    RepairKit,
}

/// Enemy subtypes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EnemyKind {
    /// First zombie variant.
    ZombieA,
    /// Second zombie variant.
    ZombieB,
    /// Robot.
    Robot,
}

/// Everything the generator can ask the factory to create.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PlacementKind {
    /// Walkable floor tile (also used for fill-below and walls).
    Floor,
    /// Hazard tile filling a gap.
    HazardFill(HazardFill),
    /// Obstacle standing on or floating above the floor.
    Obstacle(ObstacleKind),
    /// Pickup above the floor.
    Collectible(CollectibleKind),
    /// Enemy dropped above the floor.
    Enemy(EnemyKind),
    /// Floating platform.
    Platform,
    /// Where the player is placed when the level starts.
    SpawnMarker,
    /// Object carrying the level-complete trigger.
    VictoryMarker,
    /// Background decoration tile.
    Background,
}

impl PlacementKind {
    /// Returns true for kinds that may only appear in the scaled zone.
    #[must_use]
    pub const fn is_hazard_or_encounter(self) -> bool {
        matches!(
            self,
            Self::HazardFill(_) | Self::Obstacle(_) | Self::Enemy(_) | Self::Platform
        )
    }

    /// Returns true for the two hand-off markers.
    #[must_use]
    pub const fn is_marker(self) -> bool {
        matches!(self, Self::SpawnMarker | Self::VictoryMarker)
    }
}

impl fmt::Display for PlacementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Floor => write!(f, "floor"),
            Self::HazardFill(HazardFill::Surface) => write!(f, "hazard surface"),
            Self::HazardFill(HazardFill::Column) => write!(f, "hazard column"),
            Self::Obstacle(ObstacleKind::Spike) => write!(f, "spike"),
            Self::Obstacle(ObstacleKind::ExplosiveBarrel) => write!(f, "explosive barrel"),
            Self::Obstacle(ObstacleKind::PoisonBarrel) => write!(f, "poison barrel"),
            Self::Obstacle(ObstacleKind::Saw(SawMotion::Horizontal)) => write!(f, "horizontal saw"),
            Self::Obstacle(ObstacleKind::Saw(SawMotion::Vertical)) => write!(f, "vertical saw"),
            Self::Collectible(CollectibleKind::Battery) => write!(f, "battery"),
            Self::Collectible(CollectibleKind::RepairKit) => write!(f, "repair kit"),
            Self::Enemy(EnemyKind::ZombieA) => write!(f, "zombie a"),
            Self::Enemy(EnemyKind::ZombieB) => write!(f, "zombie b"),
            Self::Enemy(EnemyKind::Robot) => write!(f, "robot"),
            Self::Platform => write!(f, "platform"),
            Self::SpawnMarker => write!(f, "spawn marker"),
            Self::VictoryMarker => write!(f, "victory marker"),
            Self::Background => write!(f, "background"),
        }
    }
}

/// One element of the level: a kind at a world position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementRequest {
    /// What to create.
    pub kind: PlacementKind,
    /// Where to create it.
    pub position: Vec2,
}

impl PlacementRequest {
    /// Creates a new request.
    #[inline]
    #[must_use]
    pub const fn new(kind: PlacementKind, position: Vec2) -> Self {
        Self { kind, position }
    }

    /// Bitwise equality of kind and position.
    #[must_use]
    pub fn bit_eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.position.bit_eq(other.position)
    }
}
