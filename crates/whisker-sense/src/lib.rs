//! Directional-probe perception encoding.
//!
//! Converts a fan of ray or sphere casts from an agent's position into
//! a fixed-size f32 feature vector for a learning system. The buffer
//! layout, tag tie-break, and legacy-mode semantics are a frozen
//! contract: trained models depend on them bit-for-bit.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod debug;
pub mod encoder;
pub mod geometry;
pub mod probe;
pub mod sensor;

pub use debug::{DebugRay, DebugRecord};
pub use encoder::{encode, PerceptionConfig};
pub use probe::{CastShape, RayProbe};
pub use sensor::RaySensor;
