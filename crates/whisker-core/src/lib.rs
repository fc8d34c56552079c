//! Core types and traits for the whisker perception workspace.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the whisker workspace:
//! the 3-vector type, frame identifiers, query results, error types,
//! and the collaborator traits the encoder is written against.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod hit;
pub mod id;
pub mod traits;
pub mod vec3;

pub use error::{EncodeError, QueryError};
pub use hit::ProbeHit;
pub use id::FrameId;
pub use traits::{FrameClock, ObsSink, PoseProvider, SpatialQueryBackend};
pub use vec3::Vec3;
