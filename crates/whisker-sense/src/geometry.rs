//! Polar/cartesian conversion for probe endpoints.
//!
//! Probes are laid out in the agent's local XZ plane by angle in
//! degrees, with 90° pointing forward (+Z). Both helpers are pure and
//! total; vertical offsets are applied by the caller.

use whisker_core::Vec3;

/// Convert degrees to radians.
pub fn degrees_to_radians(degrees: f32) -> f32 {
    degrees.to_radians()
}

/// Convert a polar coordinate in the XZ plane to a cartesian point.
///
/// `x = radius * cos(angle)`, `z = radius * sin(angle)`, `y = 0`.
/// Under this convention an angle of 90° points straight forward:
///
/// ```
/// use whisker_sense::geometry::polar_to_cartesian;
///
/// let forward = polar_to_cartesian(5.0, 90.0);
/// assert!(forward.x.abs() < 1e-5);
/// assert_eq!(forward.y, 0.0);
/// assert!((forward.z - 5.0).abs() < 1e-5);
/// ```
pub fn polar_to_cartesian(radius: f32, angle_degrees: f32) -> Vec3 {
    let rad = degrees_to_radians(angle_degrees);
    Vec3::new(radius * rad.cos(), 0.0, radius * rad.sin())
}
