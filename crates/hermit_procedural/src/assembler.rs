//! # Level Assembler
//!
//! Turns a generated path into factory calls, a few at a time.
//!
//! ## Build Order
//!
//! ```text
//! anchors ──► markers ──► walls ──► background ──► Complete
//!   │
//!   └─ per anchor: floor tile, fill below, then the planner's placements
//! ```
//!
//! ## Amortization
//!
//! Every request handed to the factory is one step. The caller advances the
//! build once per frame with [`LevelBuild::step_batch`] (`yield_threshold`
//! steps) or [`LevelBuild::advance`] (explicit budget). Requests are produced
//! lazily, one anchor at a time, so a build never holds the whole level in
//! memory.
//!
//! ## Missing Assets
//!
//! When the factory has no asset for a kind it returns `None`. The request is
//! dropped and counted; the build carries on.

use std::collections::{BTreeMap, VecDeque};
use std::fmt;

use hermit_shared::{
    Vec2, BACKGROUND_SPACING, MARKER_LIFT, SPAWN_ANCHOR_INDEX, VICTORY_ANCHOR_OFFSET,
    WALL_TOP_Y, WORLD_FLOOR_Y,
};

use crate::config::GenerationConfig;
use crate::error::ConfigResult;
use crate::factory::EnvironmentFactory;
use crate::grid::GridQuantizer;
use crate::path::{MainPath, PathGenerator};
use crate::placement::{PlacementKind, PlacementRequest};
use crate::planner::PlacementPlanner;
use crate::random::{LevelSeed, SeededRandom};

/// Name of the root container of every generated level.
pub const LEVEL_CONTAINER_NAME: &str = "ProceduralLevel";

// ============================================================================
// REPORT
// ============================================================================

/// Non-fatal problem found while building a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildWarning {
    /// The path was too short to place spawn and victory markers.
    MarkersSkipped {
        /// Anchors in the path.
        anchors: usize,
    },
    /// The factory had no asset for a kind.
    MissingAsset {
        /// Unconfigured kind.
        kind: PlacementKind,
        /// Requests dropped for it.
        count: usize,
    },
}

impl fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MarkersSkipped { anchors } => write!(
                f,
                "path has {anchors} anchors, need at least {VICTORY_ANCHOR_OFFSET} for markers"
            ),
            Self::MissingAsset { kind, count } => {
                write!(f, "no asset for {kind}: {count} requests skipped")
            }
        }
    }
}

/// Counts collected over one build.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Anchors in the main path.
    pub anchors: usize,
    /// Requests handed to the factory.
    pub requested: usize,
    /// Requests that produced a handle.
    pub created: usize,
    /// Created elements per kind.
    pub per_kind: BTreeMap<PlacementKind, usize>,
    /// Dropped requests per kind.
    pub missing: BTreeMap<PlacementKind, usize>,
    /// Non-fatal problems, in the order they were found.
    pub warnings: Vec<BuildWarning>,
}

impl BuildReport {
    /// Created elements of `kind`.
    #[must_use]
    pub fn count(&self, kind: PlacementKind) -> usize {
        self.per_kind.get(&kind).copied().unwrap_or(0)
    }

    /// Dropped requests of `kind`.
    #[must_use]
    pub fn missing_count(&self, kind: PlacementKind) -> usize {
        self.missing.get(&kind).copied().unwrap_or(0)
    }

    /// Requests that were dropped.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.requested - self.created
    }
}

/// What a finished build hands back to the caller.
#[derive(Clone, Debug)]
pub struct LevelBuildResult<C, H> {
    /// Root container owning every element.
    pub root: C,
    /// Spawn marker, if it was placed and created.
    pub spawn_marker: Option<H>,
    /// Victory marker, if it was placed and created.
    pub victory_marker: Option<H>,
    /// Seed the level was built from.
    pub seed: LevelSeed,
    /// Counts and warnings.
    pub report: BuildReport,
}

// ============================================================================
// BUILD STATE MACHINE
// ============================================================================

/// Where a build stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildStatus {
    /// More steps remain.
    InProgress,
    /// Every request was handed to the factory.
    Complete,
    /// Stopped by [`LevelBuild::cancel`]. Terminal.
    Cancelled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Anchors { next: usize },
    Markers,
    Walls,
    Background,
    Done,
}

/// One resumable level build.
pub struct LevelBuild<F: EnvironmentFactory> {
    config: GenerationConfig,
    grid: GridQuantizer,
    seed: LevelSeed,
    rng: SeededRandom,
    path: MainPath,
    root: F::Container,
    spawn_marker: Option<F::Handle>,
    victory_marker: Option<F::Handle>,
    report: BuildReport,
    phase: Phase,
    pending: VecDeque<PlacementRequest>,
    scratch: Vec<PlacementRequest>,
    status: BuildStatus,
}

impl<F: EnvironmentFactory> LevelBuild<F> {
    /// Validates `config`, generates the path and creates the root container.
    ///
    /// No elements are created until the build is advanced.
    ///
    /// # Errors
    ///
    /// Returns the first [`crate::ConfigError`] found in `config`.
    pub fn start(config: GenerationConfig, seed: LevelSeed, factory: &mut F) -> ConfigResult<Self> {
        config.validate()?;

        let mut rng = SeededRandom::new(seed);
        let path = PathGenerator::new(&config).generate(&mut rng);
        let root = factory.create_container(LEVEL_CONTAINER_NAME);

        tracing::info!(
            "Level build started: seed={}, anchors={}, width={}",
            seed.value(),
            path.len(),
            config.level_width
        );

        let report = BuildReport {
            anchors: path.len(),
            ..BuildReport::default()
        };

        Ok(Self {
            grid: config.grid(),
            config,
            seed,
            rng,
            path,
            root,
            spawn_marker: None,
            victory_marker: None,
            report,
            phase: Phase::Anchors { next: 0 },
            pending: VecDeque::new(),
            scratch: Vec::new(),
            status: BuildStatus::InProgress,
        })
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> BuildStatus {
        self.status
    }

    /// Seed this build draws from.
    #[must_use]
    pub fn seed(&self) -> LevelSeed {
        self.seed
    }

    /// Generated main path.
    #[must_use]
    pub fn path(&self) -> &MainPath {
        &self.path
    }

    /// Root container. Partially built levels hang off it after a cancel.
    #[must_use]
    pub fn root(&self) -> &F::Container {
        &self.root
    }

    /// Counts so far.
    #[must_use]
    pub fn report(&self) -> &BuildReport {
        &self.report
    }

    /// Runs one batch of `yield_threshold` steps.
    pub fn step_batch(&mut self, factory: &mut F) -> BuildStatus {
        self.advance(factory, self.config.yield_threshold)
    }

    /// Runs at most `budget` steps and returns the resulting status.
    ///
    /// Does nothing once the build is complete or cancelled.
    pub fn advance(&mut self, factory: &mut F, budget: usize) -> BuildStatus {
        if self.status != BuildStatus::InProgress {
            return self.status;
        }

        let mut steps = 0;
        while steps < budget {
            let Some(request) = self.next_request() else {
                self.complete();
                return self.status;
            };
            self.execute(factory, request);
            steps += 1;
        }

        // The last step may have drained everything.
        if self.pending.is_empty() && self.phase == Phase::Done {
            self.complete();
        } else {
            tracing::debug!(
                "Level build yielded after {} steps ({} requests so far)",
                steps,
                self.report.requested
            );
        }
        self.status
    }

    /// Runs every remaining step.
    pub fn run_to_completion(&mut self, factory: &mut F) -> BuildStatus {
        self.advance(factory, usize::MAX)
    }

    /// Stops the build for good. Already created elements stay under the root.
    pub fn cancel(&mut self) {
        if self.status == BuildStatus::InProgress {
            tracing::info!(
                "Level build cancelled: seed={}, {} requests issued",
                self.seed.value(),
                self.report.requested
            );
            self.status = BuildStatus::Cancelled;
            self.pending.clear();
        }
    }

    /// Hands the result over once the build is complete.
    #[must_use]
    pub fn into_result(self) -> Option<LevelBuildResult<F::Container, F::Handle>> {
        if self.status != BuildStatus::Complete {
            return None;
        }
        Some(LevelBuildResult {
            root: self.root,
            spawn_marker: self.spawn_marker,
            victory_marker: self.victory_marker,
            seed: self.seed,
            report: self.report,
        })
    }

    fn next_request(&mut self) -> Option<PlacementRequest> {
        while self.pending.is_empty() && self.phase != Phase::Done {
            self.refill();
        }
        self.pending.pop_front()
    }

    /// Queues the requests of the next phase (or the next anchor).
    fn refill(&mut self) {
        match self.phase {
            Phase::Anchors { next } => {
                let Some(anchor) = self.path.get(next) else {
                    self.phase = Phase::Markers;
                    return;
                };
                let floor = self.grid.snap(anchor);
                self.pending
                    .push_back(PlacementRequest::new(PlacementKind::Floor, floor));
                self.pending.extend(
                    self.grid
                        .column_below(floor, WORLD_FLOOR_Y)
                        .map(|p| PlacementRequest::new(PlacementKind::Floor, p)),
                );

                self.scratch.clear();
                PlacementPlanner::new(&self.config).plan_anchor(
                    next,
                    &self.path,
                    &mut self.rng,
                    &mut self.scratch,
                );
                self.pending.extend(self.scratch.drain(..));
                self.phase = Phase::Anchors { next: next + 1 };
            }
            Phase::Markers => {
                self.queue_markers();
                self.phase = Phase::Walls;
            }
            Phase::Walls => {
                self.queue_walls();
                self.phase = Phase::Background;
            }
            Phase::Background => {
                self.queue_background();
                self.phase = Phase::Done;
            }
            Phase::Done => {}
        }
    }

    fn queue_markers(&mut self) {
        let len = self.path.len();
        if len < VICTORY_ANCHOR_OFFSET {
            tracing::warn!("Path has only {} anchors, skipping spawn and victory markers", len);
            self.report
                .warnings
                .push(BuildWarning::MarkersSkipped { anchors: len });
            return;
        }

        let lift = self.config.grid_size + MARKER_LIFT;
        let markers = [
            (PlacementKind::SpawnMarker, SPAWN_ANCHOR_INDEX),
            (PlacementKind::VictoryMarker, len - VICTORY_ANCHOR_OFFSET),
        ];
        for (kind, index) in markers {
            if let Some(anchor) = self.path.get(index) {
                self.pending
                    .push_back(PlacementRequest::new(kind, anchor.lifted(lift)));
            }
        }
    }

    fn queue_walls(&mut self) {
        let (Some(first), Some(last)) = (self.path.first(), self.path.last()) else {
            return;
        };
        let top = self.grid.snap_scalar(WALL_TOP_Y);
        for x in [first.x, last.x] {
            self.pending.extend(
                self.grid
                    .column_between(x, top, WORLD_FLOOR_Y)
                    .map(|p| PlacementRequest::new(PlacementKind::Floor, p)),
            );
        }
    }

    /// Background tiles are snapped like everything else, so spacing is only
    /// exact when the grid divides it.
    fn queue_background(&mut self) {
        let start_x = self.config.start_position.x;
        let y = self.config.level_background_y;
        let mut step = 0u32;
        loop {
            let position = self
                .grid
                .snap(Vec2::new(start_x + step as f32 * BACKGROUND_SPACING, y));
            if position.x >= self.config.level_width {
                break;
            }
            self.pending
                .push_back(PlacementRequest::new(PlacementKind::Background, position));
            step += 1;
        }
    }

    fn execute(&mut self, factory: &mut F, request: PlacementRequest) {
        self.report.requested += 1;
        let Some(handle) = factory.create_environment_object(request.kind, request.position, &self.root)
        else {
            tracing::debug!(
                "No asset for {} at ({}, {}), skipping",
                request.kind,
                request.position.x,
                request.position.y
            );
            *self.report.missing.entry(request.kind).or_insert(0) += 1;
            return;
        };

        self.report.created += 1;
        *self.report.per_kind.entry(request.kind).or_insert(0) += 1;
        match request.kind {
            PlacementKind::SpawnMarker => self.spawn_marker = Some(handle),
            PlacementKind::VictoryMarker => self.victory_marker = Some(handle),
            _ => {}
        }
    }

    fn complete(&mut self) {
        if self.status != BuildStatus::InProgress {
            return;
        }
        self.status = BuildStatus::Complete;

        for (&kind, &count) in &self.report.missing {
            tracing::warn!("No asset configured for {}: {} requests skipped", kind, count);
            self.report
                .warnings
                .push(BuildWarning::MissingAsset { kind, count });
        }

        tracing::info!(
            "Level build complete: seed={}, {} of {} requests created",
            self.seed.value(),
            self.report.created,
            self.report.requested
        );
    }
}
