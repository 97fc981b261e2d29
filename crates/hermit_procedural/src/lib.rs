//! # Hermit Procedural Level Generation
//!
//! Deterministic side-scrolling platformer levels from a seed and a config.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Same seed and config always produce the same requests
//! 2. **Passable**: Gaps and height steps stay within the player's jump
//! 3. **Amortized**: Builds advance a bounded number of requests per frame
//! 4. **Engine-agnostic**: Objects are created through [`EnvironmentFactory`]
//!
//! ## Core Components
//!
//! - `SeededRandom`: the single random stream of a build
//! - `GridQuantizer`: snaps positions and lays out tile columns
//! - `PathGenerator`: produces the main path of floor anchors
//! - `PlacementPlanner`: hazards, pickups, enemies and platforms per anchor
//! - `LevelBuild`: resumable state machine issuing factory requests
//! - `LevelGenerator`: owns the running build and hands out results
//!
//! ## Example
//!
//! ```rust,ignore
//! use hermit_procedural::{GenerationConfig, LevelGenerator, RecordingFactory, SeedSettings, TickOutcome};
//!
//! let mut factory = RecordingFactory::new();
//! let mut generator = LevelGenerator::new(GenerationConfig::default(), SeedSettings::fixed(42));
//!
//! generator.generate_level(&mut factory)?;
//! while generator.tick(&mut factory) == TickOutcome::InProgress {}
//!
//! let level = generator.take_result().unwrap();
//! assert!(level.spawn_marker.is_some());
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod assembler;
pub mod config;
pub mod error;
pub mod factory;
pub mod generator;
pub mod grid;
pub mod path;
pub mod placement;
pub mod planner;
pub mod random;
pub mod zone;

pub use assembler::{
    BuildReport, BuildStatus, BuildWarning, LevelBuild, LevelBuildResult, LEVEL_CONTAINER_NAME,
};
pub use config::{GenerationConfig, LevelConfigFile, ObstacleThresholds, SeedSettings};
pub use error::{ConfigError, ConfigResult, GenerationError, GenerationResult};
pub use factory::{EnvironmentFactory, RecordedContainer, RecordingFactory};
pub use generator::{BuildResultOf, LevelGenerator, TickOutcome};
pub use grid::GridQuantizer;
pub use path::{MainPath, PathGenerator};
pub use placement::{
    CollectibleKind, EnemyKind, HazardFill, ObstacleKind, PlacementKind, PlacementRequest,
    SawMotion,
};
pub use planner::PlacementPlanner;
pub use random::{LevelSeed, SeededRandom};
pub use zone::Zone;
