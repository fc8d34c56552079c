//! Deterministic fakes for whisker's collaborator traits.
//!
//! Lets the encoder be exercised without a live physics world: scripted
//! poses, scripted query backends, and a manually advanced frame clock.

#![forbid(unsafe_code)]

mod fixtures;

pub use fixtures::{
    ConstBackend, FailingBackend, IdentityPose, IssuedQuery, ManualClock, ScriptedBackend,
    TranslatePose,
};
