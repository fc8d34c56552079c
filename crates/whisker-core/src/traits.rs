//! Collaborator traits the encoder is written against.
//!
//! These traits decouple the perception encoder from any particular
//! physics or scene backend, so it can be tested with deterministic
//! fakes instead of a live world.

use crate::error::QueryError;
use crate::hit::ProbeHit;
use crate::id::FrameId;
use crate::vec3::Vec3;

/// Maps points from the agent's local frame into world space.
///
/// The map must be affine; the encoder only ever forward-maps, it never
/// asks for the inverse.
pub trait PoseProvider {
    /// Transform a local-frame point into world space.
    fn local_to_world_point(&self, point: Vec3) -> Vec3;
}

/// Read-only spatial queries against world geometry.
///
/// This is the encoder's sole side-effecting dependency; the encoder
/// never mutates world state through it. Both methods return
/// `Ok(None)` for a clean miss — a miss is data, not an error.
pub trait SpatialQueryBackend {
    /// Cast a zero-width line from `origin` along `direction`, up to
    /// `max_distance`.
    fn line_query(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
    ) -> Result<Option<ProbeHit>, QueryError>;

    /// Cast a sphere of `radius` from `origin` along `direction`, up to
    /// `max_distance`.
    fn sphere_query(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
    ) -> Result<Option<ProbeHit>, QueryError>;
}

/// Monotone frame counter.
///
/// Used only to age debug records; the numeric encoding never reads it.
pub trait FrameClock {
    /// The current frame.
    fn frame(&self) -> FrameId;
}

/// Destination for encoded observation values.
///
/// Implemented for `Vec<f32>`; hosts with their own tensor plumbing
/// supply their own implementation.
pub trait ObsSink {
    /// Append `values` to the sink.
    fn append(&mut self, values: &[f32]);
}

impl ObsSink for Vec<f32> {
    fn append(&mut self, values: &[f32]) {
        self.extend_from_slice(values);
    }
}
