//! # Zone Classification
//!
//! The main path is split into three policy zones by anchor index:
//!
//! ```text
//! | Safe (first N) | Scaled (hazards, enemies, pickups) | EndClear (last M) |
//! ```
//!
//! On paths too short to hold both end zones, `Safe` wins.

/// Policy zone of one anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Zone {
    /// Start of the level: floor only.
    Safe,
    /// Middle of the level: every placement rule applies.
    Scaled,
    /// Runway to the exit: floor only, no gaps.
    EndClear,
}

impl Zone {
    /// Classifies `index` on a path of `path_len` anchors.
    #[must_use]
    pub fn classify(index: usize, path_len: usize, safe_blocks: usize, end_blocks: usize) -> Self {
        if index < safe_blocks {
            Self::Safe
        } else if index >= path_len.saturating_sub(end_blocks) {
            Self::EndClear
        } else {
            Self::Scaled
        }
    }

    /// Returns true if placement rolls run for this zone.
    #[must_use]
    pub const fn is_scaled(self) -> bool {
        matches!(self, Self::Scaled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_zones() {
        let zones: Vec<Zone> = (0..10).map(|i| Zone::classify(i, 10, 3, 2)).collect();
        assert_eq!(&zones[..3], &[Zone::Safe; 3]);
        assert_eq!(&zones[3..8], &[Zone::Scaled; 5]);
        assert_eq!(&zones[8..], &[Zone::EndClear; 2]);
    }

    #[test]
    fn test_short_path_prefers_safe() {
        assert_eq!(Zone::classify(1, 3, 2, 5), Zone::Safe);
        assert_eq!(Zone::classify(2, 3, 2, 5), Zone::EndClear);
        assert!(!Zone::classify(0, 0, 0, 0).is_scaled());
    }

    #[test]
    fn test_no_zones_configured() {
        assert!((0..4).all(|i| Zone::classify(i, 4, 0, 0).is_scaled()));
    }
}
