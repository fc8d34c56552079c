//! Diagnostic record mirroring a single encode pass.
//!
//! Purely for overlay rendering and debugging; downstream consumers
//! never read it and the numeric encoding never depends on it.

use whisker_core::{FrameId, Vec3};

/// Debug mirror of one probe.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DebugRay {
    /// Probe start in the agent's local frame.
    pub local_start: Vec3,
    /// Probe end in the agent's local frame.
    pub local_end: Vec3,
    /// Whether the probe struck anything.
    pub hit: bool,
    /// Hit distance over max range; 1.0 on a miss.
    pub hit_fraction: f32,
}

/// Debug mirror of a full encode pass.
///
/// Reset at the top of every pass, stamping the current frame so an
/// overlay can fade stale data by [`age`](DebugRecord::age).
#[derive(Clone, Debug, Default)]
pub struct DebugRecord {
    rays: Vec<DebugRay>,
    reset_frame: FrameId,
}

impl DebugRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all rays and stamp `now` as the reset frame.
    pub fn reset(&mut self, now: FrameId) {
        self.rays.clear();
        self.reset_frame = now;
    }

    /// Record one probe's debug data.
    pub fn push(&mut self, ray: DebugRay) {
        self.rays.push(ray);
    }

    /// Rays recorded since the last reset, in probe order.
    pub fn rays(&self) -> &[DebugRay] {
        &self.rays
    }

    /// Frames elapsed since the last reset.
    pub fn age(&self, now: FrameId) -> u64 {
        now.0.saturating_sub(self.reset_frame.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ray(hit: bool) -> DebugRay {
        DebugRay {
            local_start: Vec3::ZERO,
            local_end: Vec3::new(0.0, 0.0, 1.0),
            hit,
            hit_fraction: if hit { 0.5 } else { 1.0 },
        }
    }

    #[test]
    fn reset_clears_and_stamps() {
        let mut rec = DebugRecord::new();
        rec.push(ray(true));
        rec.push(ray(false));
        assert_eq!(rec.rays().len(), 2);

        rec.reset(FrameId(10));
        assert!(rec.rays().is_empty());
        assert_eq!(rec.age(FrameId(10)), 0);
        assert_eq!(rec.age(FrameId(13)), 3);
    }

    #[test]
    fn age_saturates_on_clock_rewind() {
        let mut rec = DebugRecord::new();
        rec.reset(FrameId(5));
        assert_eq!(rec.age(FrameId(3)), 0);
    }
}
