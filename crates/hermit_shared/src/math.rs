//! Mathematical types shared between the generator and the game host.
//!
//! Positions are expressed in world units on the X/Y plane.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// 2D Vector - world positions and offsets
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vec2 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
}

impl Vec2 {
    /// Creates a new Vec2
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Zero vector
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Returns this position moved straight up by `dy`.
    #[must_use]
    pub fn lifted(self, dy: f32) -> Self {
        Self::new(self.x, self.y + dy)
    }

    /// Bitwise equality, used by replay comparisons.
    #[must_use]
    pub fn bit_eq(self, other: Self) -> bool {
        self.x.to_bits() == other.x.to_bits() && self.y.to_bits() == other.y.to_bits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifted() {
        let a = Vec2::new(2.5, -7.5);
        assert_eq!(a.lifted(2.5), Vec2::new(2.5, -5.0));
        assert_eq!(a.lifted(-7.5), Vec2::new(2.5, -15.0));
    }

    #[test]
    fn test_bit_eq_distinguishes_signed_zero() {
        assert!(Vec2::ZERO.bit_eq(Vec2::new(0.0, 0.0)));
        assert!(!Vec2::ZERO.bit_eq(Vec2::new(-0.0, 0.0)));
    }

    #[test]
    fn test_pod_cast() {
        let v = Vec2::new(1.0, 2.0);
        let raw: &[f32; 2] = bytemuck::cast_ref(&v);
        assert_eq!(*raw, [1.0, 2.0]);
        assert_eq!(bytemuck::cast::<[f32; 2], Vec2>([3.0, 4.0]), Vec2::new(3.0, 4.0));
    }
}
