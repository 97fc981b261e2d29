//! # Level Generator
//!
//! Runtime driver owning at most one in-progress [`LevelBuild`].
//!
//! ```text
//! generate_level ──► tick ──► tick ──► ... ──► Complete ──► take_result
//!        │
//!        └─ cancels whatever build was still running
//! ```
//!
//! The caller ticks the generator once per frame. Each tick runs one batch of
//! `yield_threshold` factory requests.

use crate::assembler::{BuildStatus, LevelBuild, LevelBuildResult};
use crate::config::{GenerationConfig, LevelConfigFile, SeedSettings};
use crate::error::{GenerationError, GenerationResult};
use crate::factory::EnvironmentFactory;
use crate::random::LevelSeed;

/// Finished build result for factory `F`.
pub type BuildResultOf<F> =
    LevelBuildResult<<F as EnvironmentFactory>::Container, <F as EnvironmentFactory>::Handle>;

/// What one [`LevelGenerator::tick`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// No build is running.
    Idle,
    /// A batch ran and more remain.
    InProgress,
    /// The build finished during this tick. The result is ready.
    Complete,
}

/// Drives level builds for one factory type.
pub struct LevelGenerator<F: EnvironmentFactory> {
    config: GenerationConfig,
    seed: SeedSettings,
    build: Option<LevelBuild<F>>,
    finished: Option<BuildResultOf<F>>,
}

impl<F: EnvironmentFactory> LevelGenerator<F> {
    /// Creates an idle generator.
    #[must_use]
    pub fn new(config: GenerationConfig, seed: SeedSettings) -> Self {
        Self {
            config,
            seed,
            build: None,
            finished: None,
        }
    }

    /// Creates an idle generator from a loaded config file.
    #[must_use]
    pub fn from_file(file: LevelConfigFile) -> Self {
        Self::new(file.generation, file.seed)
    }

    /// Generation tuning used by the next build.
    #[must_use]
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Replaces the tuning. A running build keeps the config it started with.
    pub fn set_config(&mut self, config: GenerationConfig) {
        self.config = config;
    }

    /// Seed selection used by the next build.
    #[must_use]
    pub fn seed_settings(&self) -> SeedSettings {
        self.seed
    }

    /// Replaces the seed selection.
    pub fn set_seed_settings(&mut self, seed: SeedSettings) {
        self.seed = seed;
    }

    /// Returns true while a build is running.
    #[must_use]
    pub fn is_building(&self) -> bool {
        self.build.is_some()
    }

    /// Build in progress, if any.
    #[must_use]
    pub fn current_build(&self) -> Option<&LevelBuild<F>> {
        self.build.as_ref()
    }

    /// Starts a new level and returns the seed it uses.
    ///
    /// A build that is still running is cancelled and dropped first. An
    /// unclaimed finished result is discarded.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Config`] if the config is invalid. The
    /// running build, if any, is left untouched in that case.
    pub fn generate_level(&mut self, factory: &mut F) -> GenerationResult<LevelSeed> {
        self.config.validate()?;

        if let Some(mut previous) = self.build.take() {
            tracing::warn!(
                "Superseding unfinished level build (seed={}, {} requests issued)",
                previous.seed().value(),
                previous.report().requested
            );
            previous.cancel();
        }
        self.finished = None;

        let seed = self.seed.resolve();
        let build = LevelBuild::start(self.config.clone(), seed, factory)?;
        self.build = Some(build);
        Ok(seed)
    }

    /// Runs one batch of the current build.
    pub fn tick(&mut self, factory: &mut F) -> TickOutcome {
        let Some(build) = self.build.as_mut() else {
            return TickOutcome::Idle;
        };

        match build.step_batch(factory) {
            BuildStatus::InProgress => TickOutcome::InProgress,
            BuildStatus::Complete => {
                self.finished = self.build.take().and_then(LevelBuild::into_result);
                TickOutcome::Complete
            }
            BuildStatus::Cancelled => {
                self.build = None;
                TickOutcome::Idle
            }
        }
    }

    /// Cancels the running build. Returns false if nothing was running.
    pub fn cancel(&mut self) -> bool {
        match self.build.take() {
            Some(mut build) => {
                build.cancel();
                true
            }
            None => false,
        }
    }

    /// Takes the result of the last completed build.
    pub fn take_result(&mut self) -> Option<BuildResultOf<F>> {
        self.finished.take()
    }

    /// Starts a level and runs it to the end in one call.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Config`] if the config is invalid.
    pub fn run_to_completion(&mut self, factory: &mut F) -> GenerationResult<BuildResultOf<F>> {
        let seed = self.generate_level(factory)?;
        let Some(mut build) = self.build.take() else {
            return Err(GenerationError::Cancelled { seed: seed.value() });
        };
        build.run_to_completion(factory);
        build
            .into_result()
            .ok_or(GenerationError::Cancelled { seed: seed.value() })
    }
}
