//! Probe descriptors and cast-shape dispatch.

use whisker_core::Vec3;

use crate::geometry::polar_to_cartesian;

/// Shape of the spatial query used for every probe in a pass.
///
/// Derived once from the configured cast radius before the per-angle
/// loop: a positive radius selects `Sphere`, anything else `Line`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CastShape {
    /// Zero-width line cast.
    Line,
    /// Sphere cast of the given radius.
    Sphere {
        /// Sphere radius in world units.
        radius: f32,
    },
}

impl CastShape {
    /// Select the cast shape for a configured radius.
    pub fn from_radius(cast_radius: f32) -> Self {
        if cast_radius > 0.0 {
            CastShape::Sphere {
                radius: cast_radius,
            }
        } else {
            CastShape::Line
        }
    }
}

/// One probe's endpoints in the agent's local frame.
///
/// Recomputed from the angle every pass; descriptors are never cached
/// across calls.
///
/// # Examples
///
/// ```
/// use whisker_sense::RayProbe;
///
/// // Forward probe, no vertical offsets: ends at (0, 0, max_range).
/// let p = RayProbe::from_angle(90.0, 10.0, 0.0, 0.0);
/// assert_eq!(p.local_start, whisker_core::Vec3::ZERO);
/// assert!(p.local_end.x.abs() < 1e-4);
/// assert!((p.local_end.z - 10.0).abs() < 1e-4);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayProbe {
    /// Probe angle in degrees; 90° is forward.
    pub angle_degrees: f32,
    /// Local-frame start point: `(0, start_offset, 0)`.
    pub local_start: Vec3,
    /// Local-frame end point: polar endpoint with `end_offset` on Y.
    pub local_end: Vec3,
}

impl RayProbe {
    /// Derive a probe from its angle and the pass parameters.
    pub fn from_angle(
        angle_degrees: f32,
        max_range: f32,
        start_offset: f32,
        end_offset: f32,
    ) -> Self {
        let local_start = Vec3::new(0.0, start_offset, 0.0);
        let mut local_end = polar_to_cartesian(max_range, angle_degrees);
        local_end.y += end_offset;
        Self {
            angle_degrees,
            local_start,
            local_end,
        }
    }
}
