//! A minimal f32 3-vector for probe geometry.
//!
//! Whisker uses a Y-up convention: probes are laid out in the agent's
//! local XZ plane, with vertical start/end offsets applied on Y.

use std::fmt;
use std::ops::{Add, Mul, Sub};

/// A 3-component f32 vector.
///
/// # Examples
///
/// ```
/// use whisker_core::Vec3;
///
/// let a = Vec3::new(1.0, 2.0, 3.0);
/// let b = Vec3::new(0.5, 0.0, -1.0);
/// assert_eq!(a + b, Vec3::new(1.5, 2.0, 2.0));
/// assert_eq!(a - b, Vec3::new(0.5, 2.0, 4.0));
/// assert_eq!(b * 2.0, Vec3::new(1.0, 0.0, -2.0));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    /// X component (lateral).
    pub x: f32,
    /// Y component (vertical).
    pub y: f32,
    /// Z component (forward at a probe angle of 90°).
    pub z: f32,
}

impl Vec3 {
    /// The zero vector.
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Construct a vector from components.
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean length.
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// True if all three components are finite.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
