//! # Seeded Random Source
//!
//! Every random decision in a level build is drawn from one [`SeededRandom`].
//!
//! ## Determinism Guarantee
//!
//! Given the same [`LevelSeed`] and the same sequence of calls, this source
//! produces **exactly** the same values on any platform, any time. The
//! stream is ChaCha8, which is specified bit-for-bit and does not depend on
//! the host's word size or endianness.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Level seed for deterministic generation.
///
/// Recording the resolved seed of a build is enough to replay it exactly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LevelSeed(u64);

impl LevelSeed {
    /// Creates a new level seed.
    #[inline]
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Returns the raw seed value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Derives a seed from the wall clock.
    ///
    /// Used when the caller asks for a fresh level every time. The result is
    /// fixed for the whole build and reported back, so it can be replayed.
    #[must_use]
    pub fn from_clock() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_nanos());
        // Fold the 128-bit nanosecond count so both halves contribute.
        let folded = (nanos as u64) ^ ((nanos >> 64) as u64);
        Self(folded.wrapping_mul(0x517c_c1b7_2722_0a95))
    }
}

/// Deterministic pseudo-random stream for one level build.
#[derive(Clone, Debug)]
pub struct SeededRandom {
    seed: LevelSeed,
    rng: ChaCha8Rng,
}

impl SeededRandom {
    /// Creates a stream positioned at the start of `seed`.
    #[must_use]
    pub fn new(seed: LevelSeed) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed.value()),
        }
    }

    /// Resets the stream to the start of `seed`.
    pub fn reseed(&mut self, seed: LevelSeed) {
        *self = Self::new(seed);
    }

    /// Seed this stream was started from.
    #[must_use]
    pub const fn seed(&self) -> LevelSeed {
        self.seed
    }

    /// Uniform value in `[0, 1)`.
    pub fn next_uniform(&mut self) -> f32 {
        self.rng.gen::<f32>()
    }

    /// Uniform value in `[min, max)`. Returns `min` when the range is empty.
    pub fn next_range(&mut self, min: f32, max: f32) -> f32 {
        let t = self.next_uniform();
        if max <= min {
            return min;
        }
        min + (max - min) * t
    }

    /// Uniform integer in `[min, max_exclusive)`. Returns `min` when the range is empty.
    pub fn next_int(&mut self, min: i32, max_exclusive: i32) -> i32 {
        if max_exclusive <= min {
            return min;
        }
        self.rng.gen_range(min..max_exclusive)
    }

    /// Bernoulli trial: one uniform draw compared against `probability`.
    pub fn chance(&mut self, probability: f32) -> bool {
        self.next_uniform() < probability
    }
}
