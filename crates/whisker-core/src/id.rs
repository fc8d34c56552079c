//! Strongly-typed identifiers.

use std::fmt;

/// Monotonically increasing frame counter.
///
/// Read from the host's [`FrameClock`](crate::FrameClock); used only to
/// age debug records, never by the numeric encoding itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(pub u64);

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for FrameId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}
