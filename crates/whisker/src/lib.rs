//! Whisker: directional-probe perception encoding for learning agents.
//!
//! A whisker sensor casts a fan of ray or sphere probes from an
//! agent's position and encodes the outcomes into a fixed-size f32
//! feature vector with a frozen layout: per probe, a one-hot over the
//! detectable-tag registry, a miss indicator, and a normalized hit
//! distance. The physics world and the agent's pose sit behind trait
//! seams, so the encoding is deterministic and testable in isolation.
//!
//! # Quick start
//!
//! ```rust
//! use whisker::prelude::*;
//!
//! // A toy world: everything 5 units out is a wall.
//! struct FlatWall;
//! impl SpatialQueryBackend for FlatWall {
//!     fn line_query(
//!         &self,
//!         _origin: Vec3,
//!         _direction: Vec3,
//!         _max_distance: f32,
//!     ) -> Result<Option<ProbeHit>, QueryError> {
//!         Ok(Some(ProbeHit::new(5.0, ["wall"])))
//!     }
//!     fn sphere_query(
//!         &self,
//!         origin: Vec3,
//!         _radius: f32,
//!         direction: Vec3,
//!         max_distance: f32,
//!     ) -> Result<Option<ProbeHit>, QueryError> {
//!         self.line_query(origin, direction, max_distance)
//!     }
//! }
//!
//! struct Still;
//! impl PoseProvider for Still {
//!     fn local_to_world_point(&self, p: Vec3) -> Vec3 { p }
//! }
//!
//! struct Paused;
//! impl FrameClock for Paused {
//!     fn frame(&self) -> FrameId { FrameId(0) }
//! }
//!
//! let config = PerceptionConfig {
//!     max_range: 10.0,
//!     angles: vec![45.0, 90.0, 135.0],
//!     detectable_tags: ["wall"].into_iter().map(String::from).collect(),
//!     start_offset: 0.0,
//!     end_offset: 0.0,
//!     cast_radius: 0.0,
//!     legacy_distances: false,
//! };
//! let mut sensor = RaySensor::new(
//!     config,
//!     Box::new(Still),
//!     Box::new(FlatWall),
//!     Box::new(Paused),
//! )
//! .unwrap();
//!
//! assert_eq!(sensor.observation_shape(), [9]);
//! let mut obs: Vec<f32> = Vec::new();
//! let written = sensor.write(&mut obs).unwrap();
//! assert_eq!(written, 9);
//! // Each probe: wall one-hot, no miss, hit at half range.
//! assert_eq!(&obs[0..3], &[1.0, 0.0, 0.5]);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `whisker-core` | `Vec3`, `FrameId`, `ProbeHit`, errors, collaborator traits |
//! | [`sense`] | `whisker-sense` | Geometry helpers, encode pass, debug record, `RaySensor` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, errors, and collaborator traits (`whisker-core`).
pub use whisker_core as types;

/// Geometry, the encode pass, and the sensor surface (`whisker-sense`).
pub use whisker_sense as sense;

/// Common imports for typical whisker usage.
///
/// ```rust
/// use whisker::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use whisker_core::{
        FrameClock, FrameId, ObsSink, PoseProvider, ProbeHit, SpatialQueryBackend, Vec3,
    };

    // Errors
    pub use whisker_core::{EncodeError, QueryError};

    // Encoding
    pub use whisker_sense::{
        encode, CastShape, DebugRecord, PerceptionConfig, RayProbe, RaySensor,
    };
}
