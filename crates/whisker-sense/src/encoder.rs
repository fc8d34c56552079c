//! The encode pass: probes in, feature vector out.
//!
//! One call to [`encode`] casts one spatial query per configured angle
//! and writes the results into a caller-provided flat f32 buffer. The
//! per-probe block layout and the legacy-mode branches are a frozen
//! contract — trained models consume these vectors, so any drift here
//! silently corrupts them.

use indexmap::IndexSet;

use whisker_core::{
    EncodeError, FrameClock, PoseProvider, ProbeHit, SpatialQueryBackend,
};

use crate::debug::{DebugRay, DebugRecord};
use crate::probe::{CastShape, RayProbe};

/// Configuration for a perception encode pass.
///
/// Plain data; validated by [`encode`] (and once up front by
/// [`RaySensor::new`](crate::RaySensor)) rather than at construction.
///
/// # Examples
///
/// ```
/// use whisker_sense::PerceptionConfig;
///
/// let config = PerceptionConfig {
///     max_range: 20.0,
///     angles: vec![60.0, 90.0, 120.0],
///     detectable_tags: ["wall", "agent"].into_iter().map(String::from).collect(),
///     start_offset: 0.0,
///     end_offset: 0.0,
///     cast_radius: 0.0,
///     legacy_distances: false,
/// };
///
/// // Per-probe block: one slot per tag, a miss slot, a distance slot.
/// assert_eq!(config.block_size(), 4);
/// assert_eq!(config.observation_len(), 12);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PerceptionConfig {
    /// Maximum probe range in world units. Must be positive and finite.
    pub max_range: f32,
    /// Probe angles in degrees; 90° is forward. One probe per entry.
    pub angles: Vec<f32>,
    /// Tag registry. Insertion order defines one-hot slot order and is
    /// fixed for the sensor's lifetime.
    pub detectable_tags: IndexSet<String>,
    /// Vertical offset applied to every probe's local start point.
    pub start_offset: f32,
    /// Vertical offset applied to every probe's local end point.
    pub end_offset: f32,
    /// Sphere-cast radius; zero (or negative) selects a line cast.
    pub cast_radius: f32,
    /// Legacy distance semantics: untracked hits leave the whole block
    /// zero, and clean misses leave the distance slot zero.
    pub legacy_distances: bool,
}

impl PerceptionConfig {
    /// Elements per probe block: one per tag, plus miss and distance slots.
    pub fn block_size(&self) -> usize {
        self.detectable_tags.len() + 2
    }

    /// Total observation length: `angles.len() * block_size()`.
    pub fn observation_len(&self) -> usize {
        self.angles.len() * self.block_size()
    }

    /// Check the configuration parameters.
    ///
    /// Called by [`encode`] before any buffer write or spatial query,
    /// and by [`RaySensor::new`](crate::RaySensor) at construction.
    pub fn validate(&self) -> Result<(), EncodeError> {
        if !self.max_range.is_finite() || self.max_range <= 0.0 {
            return Err(EncodeError::InvalidConfig {
                reason: format!("max_range must be positive and finite, got {}", self.max_range),
            });
        }
        if !self.cast_radius.is_finite() || self.cast_radius < 0.0 {
            return Err(EncodeError::InvalidConfig {
                reason: format!(
                    "cast_radius must be non-negative and finite, got {}",
                    self.cast_radius
                ),
            });
        }
        if !self.start_offset.is_finite() || !self.end_offset.is_finite() {
            return Err(EncodeError::InvalidConfig {
                reason: "start/end offsets must be finite".into(),
            });
        }
        if let Some((i, &a)) = self
            .angles
            .iter()
            .enumerate()
            .find(|(_, a)| !a.is_finite())
        {
            return Err(EncodeError::InvalidConfig {
                reason: format!("angle {i} is not finite ({a})"),
            });
        }
        Ok(())
    }
}

/// Run one encode pass.
///
/// Casts one probe per configured angle, in angle order, and writes
/// each outcome into its block of `output`. The buffer is zero-filled
/// first; on success every block has been written exactly once.
///
/// Per-probe block at `i * block_size`:
/// - slots `[0, N)`: one-hot over the tag registry (first matching tag
///   wins, registry order);
/// - slot `N`: 1.0 on a clean miss;
/// - slot `N + 1`: hit distance over max range, subject to the legacy
///   branches below.
///
/// Legacy mode (`legacy_distances`) changes two cases only: an
/// untracked hit leaves its entire block zero, and a clean miss leaves
/// the distance slot at 0 instead of 1.0. This reproduces historical
/// behavior that deployed models were trained against; it is kept
/// bit-exact on purpose.
///
/// # Errors
///
/// [`EncodeError::BufferSizeMismatch`] and
/// [`EncodeError::InvalidConfig`] are raised before the buffer is
/// touched or any query is issued. [`EncodeError::QueryFailed`] aborts
/// the pass at the failing probe; the partially written buffer must be
/// discarded by the caller.
pub fn encode(
    config: &PerceptionConfig,
    pose: &dyn PoseProvider,
    backend: &dyn SpatialQueryBackend,
    clock: &dyn FrameClock,
    output: &mut [f32],
    mut debug: Option<&mut DebugRecord>,
) -> Result<(), EncodeError> {
    config.validate()?;
    let expected = config.observation_len();
    if output.len() != expected {
        return Err(EncodeError::BufferSizeMismatch {
            expected,
            actual: output.len(),
        });
    }

    output.fill(0.0);
    if let Some(record) = debug.as_deref_mut() {
        record.reset(clock.frame());
    }

    let shape = CastShape::from_radius(config.cast_radius);
    let n_tags = config.detectable_tags.len();
    let block = config.block_size();

    for (i, &angle) in config.angles.iter().enumerate() {
        let probe = RayProbe::from_angle(angle, config.max_range, config.start_offset, config.end_offset);
        let world_start = pose.local_to_world_point(probe.local_start);
        let world_end = pose.local_to_world_point(probe.local_end);
        let direction = world_end - world_start;

        let outcome = match shape {
            CastShape::Line => backend.line_query(world_start, direction, config.max_range),
            CastShape::Sphere { radius } => {
                backend.sphere_query(world_start, radius, direction, config.max_range)
            }
        }
        .map_err(|source| EncodeError::QueryFailed {
            probe_index: i,
            source,
        })?;

        let hit_fraction = match &outcome {
            Some(hit) => hit.distance / config.max_range,
            None => 1.0,
        };

        if let Some(record) = debug.as_deref_mut() {
            record.push(DebugRay {
                local_start: probe.local_start,
                local_end: probe.local_end,
                hit: outcome.is_some(),
                hit_fraction,
            });
        }

        let offset = i * block;
        match outcome {
            Some(hit) => {
                if let Some(slot) = first_matching_tag(&config.detectable_tags, &hit) {
                    output[offset + slot] = 1.0;
                    output[offset + n_tags + 1] = hit_fraction;
                } else if !config.legacy_distances {
                    // Untracked hit still reports distance; in legacy
                    // mode the block stays all zero.
                    output[offset + n_tags + 1] = hit_fraction;
                }
            }
            None => {
                output[offset + n_tags] = 1.0;
                if !config.legacy_distances {
                    output[offset + n_tags + 1] = 1.0;
                }
            }
        }
    }

    Ok(())
}

/// Scan the registry in insertion order; first tag carried by the
/// struck object wins.
fn first_matching_tag(registry: &IndexSet<String>, hit: &ProbeHit) -> Option<usize> {
    registry.iter().position(|tag| hit.has_tag(tag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use whisker_core::{FrameId, QueryError, Vec3};
    use whisker_test_utils::{
        ConstBackend, FailingBackend, IdentityPose, ManualClock, ScriptedBackend, TranslatePose,
    };

    fn config(angles: Vec<f32>, tags: &[&str]) -> PerceptionConfig {
        PerceptionConfig {
            max_range: 10.0,
            angles,
            detectable_tags: tags.iter().map(|t| t.to_string()).collect(),
            start_offset: 0.0,
            end_offset: 0.0,
            cast_radius: 0.0,
            legacy_distances: false,
        }
    }

    fn run(
        config: &PerceptionConfig,
        backend: &dyn SpatialQueryBackend,
    ) -> Result<Vec<f32>, EncodeError> {
        let mut out = vec![0.0; config.observation_len()];
        encode(
            config,
            &IdentityPose,
            backend,
            &ManualClock::new(0),
            &mut out,
            None,
        )?;
        Ok(out)
    }

    // ── Preconditions ───────────────────────────────────────────

    #[test]
    fn rejects_wrong_buffer_size_before_writing() {
        let cfg = config(vec![90.0], &["red", "blue"]);
        let mut out = vec![7.0; 3]; // needs 4
        let err = encode(
            &cfg,
            &IdentityPose,
            &ConstBackend::miss(),
            &ManualClock::new(0),
            &mut out,
            None,
        )
        .unwrap_err();
        assert_eq!(
            err,
            EncodeError::BufferSizeMismatch {
                expected: 4,
                actual: 3
            }
        );
        // Buffer untouched on precondition failure.
        assert_eq!(out, vec![7.0; 3]);
    }

    #[test]
    fn rejects_non_positive_max_range() {
        let mut cfg = config(vec![90.0], &[]);
        cfg.max_range = 0.0;
        let mut out = vec![7.0; 2];
        let err = encode(
            &cfg,
            &IdentityPose,
            &ConstBackend::miss(),
            &ManualClock::new(0),
            &mut out,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, EncodeError::InvalidConfig { .. }));
        assert_eq!(out, vec![7.0; 2]);
    }

    #[test]
    fn rejects_nan_angle() {
        let cfg = config(vec![90.0, f32::NAN], &[]);
        let err = run(&cfg, &ConstBackend::miss()).unwrap_err();
        assert!(matches!(err, EncodeError::InvalidConfig { .. }));
    }

    #[test]
    fn rejects_negative_cast_radius() {
        let mut cfg = config(vec![90.0], &[]);
        cfg.cast_radius = -0.5;
        let err = run(&cfg, &ConstBackend::miss()).unwrap_err();
        assert!(matches!(err, EncodeError::InvalidConfig { .. }));
    }

    #[test]
    fn precondition_failure_issues_no_queries() {
        let backend = ScriptedBackend::new(vec![]);
        let mut cfg = config(vec![90.0], &[]);
        cfg.max_range = -1.0;
        let mut out = vec![0.0; 2];
        let _ = encode(
            &cfg,
            &IdentityPose,
            &backend,
            &ManualClock::new(0),
            &mut out,
            None,
        );
        assert!(backend.queries().is_empty());
    }

    // ── Block encoding (spec-pinned cases) ──────────────────────

    #[test]
    fn miss_block_non_legacy() {
        let cfg = config(vec![90.0], &["red", "blue"]);
        let out = run(&cfg, &ConstBackend::miss()).unwrap();
        assert_eq!(out, vec![0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn miss_block_legacy() {
        let mut cfg = config(vec![90.0], &["red", "blue"]);
        cfg.legacy_distances = true;
        let out = run(&cfg, &ConstBackend::miss()).unwrap();
        assert_eq!(out, vec![0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn tracked_hit_at_half_range() {
        let cfg = config(vec![90.0], &["red", "blue"]);
        let out = run(&cfg, &ConstBackend::hit(5.0, &["blue"])).unwrap();
        assert_eq!(out, vec![0.0, 1.0, 0.0, 0.5]);
    }

    #[test]
    fn untracked_hit_non_legacy_reports_distance() {
        let cfg = config(vec![90.0], &["red", "blue"]);
        let out = run(&cfg, &ConstBackend::hit(3.0, &["tree"])).unwrap();
        assert_eq!(out, vec![0.0, 0.0, 0.0, 0.3]);
    }

    #[test]
    fn untracked_hit_legacy_all_zero() {
        let mut cfg = config(vec![90.0], &["red", "blue"]);
        cfg.legacy_distances = true;
        let out = run(&cfg, &ConstBackend::hit(3.0, &["tree"])).unwrap();
        assert_eq!(out, vec![0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn first_registry_tag_wins_on_multi_tagged_object() {
        let cfg = config(vec![90.0], &["red", "blue"]);
        // Object carries both; registry order says red.
        let out = run(&cfg, &ConstBackend::hit(5.0, &["blue", "red"])).unwrap();
        assert_eq!(out, vec![1.0, 0.0, 0.0, 0.5]);
    }

    #[test]
    fn zero_tags_block_is_two_wide() {
        let cfg = config(vec![90.0, 270.0], &[]);
        let out = run(&cfg, &ConstBackend::miss()).unwrap();
        assert_eq!(out, vec![1.0, 1.0, 1.0, 1.0]);

        let out = run(&cfg, &ConstBackend::hit(2.0, &["anything"])).unwrap();
        assert_eq!(out, vec![0.0, 0.2, 0.0, 0.2]);
    }

    #[test]
    fn blocks_are_disjoint_per_probe() {
        let cfg = config(vec![60.0, 90.0, 120.0], &["red"]);
        let backend = ScriptedBackend::new(vec![
            Ok(Some(ProbeHit::new(2.5, ["red"]))),
            Ok(None),
            Ok(Some(ProbeHit::new(7.5, ["tree"]))),
        ]);
        let out = run(&cfg, &backend).unwrap();
        assert_eq!(
            out,
            vec![
                1.0, 0.0, 0.25, // probe 0: tracked hit at 25%
                0.0, 1.0, 1.0, // probe 1: miss
                0.0, 0.0, 0.75, // probe 2: untracked hit at 75%
            ]
        );
    }

    #[test]
    fn stale_buffer_contents_are_cleared() {
        let cfg = config(vec![90.0], &["red"]);
        let mut out = vec![9.0; 3];
        encode(
            &cfg,
            &IdentityPose,
            &ConstBackend::miss(),
            &ManualClock::new(0),
            &mut out,
            None,
        )
        .unwrap();
        assert_eq!(out, vec![0.0, 1.0, 1.0]);
    }

    // ── Dispatch and collaborator interaction ───────────────────

    #[test]
    fn zero_radius_issues_line_queries() {
        let cfg = config(vec![90.0, 45.0], &[]);
        let backend = ScriptedBackend::all_misses(2);
        run(&cfg, &backend).unwrap();
        let queries = backend.queries();
        assert_eq!(queries.len(), 2);
        assert!(queries.iter().all(|q| q.radius.is_none()));
        assert!(queries.iter().all(|q| q.max_distance == 10.0));
    }

    #[test]
    fn positive_radius_issues_sphere_queries() {
        let mut cfg = config(vec![90.0, 45.0], &[]);
        cfg.cast_radius = 0.4;
        let backend = ScriptedBackend::all_misses(2);
        run(&cfg, &backend).unwrap();
        let queries = backend.queries();
        assert_eq!(queries.len(), 2);
        assert!(queries.iter().all(|q| q.radius == Some(0.4)));
    }

    #[test]
    fn direction_comes_from_world_endpoints() {
        let cfg = config(vec![90.0], &[]);
        let pose = TranslatePose::new(Vec3::new(100.0, 0.0, 0.0));
        let backend = ScriptedBackend::all_misses(1);
        let mut out = vec![0.0; 2];
        encode(&cfg, &pose, &backend, &ManualClock::new(0), &mut out, None).unwrap();
        let q = &backend.queries()[0];
        // Translation moves the origin but cancels out of the direction.
        assert_eq!(q.origin, Vec3::new(100.0, 0.0, 0.0));
        assert!(q.direction.x.abs() < 1e-4);
        assert!((q.direction.z - 10.0).abs() < 1e-4);
    }

    #[test]
    fn backend_failure_aborts_remaining_probes() {
        let cfg = config(vec![0.0, 45.0, 90.0, 135.0], &[]);
        let backend = FailingBackend::new(2);
        let mut out = vec![0.0; 8];
        let err = encode(
            &cfg,
            &IdentityPose,
            &backend,
            &ManualClock::new(0),
            &mut out,
            None,
        )
        .unwrap_err();
        match err {
            EncodeError::QueryFailed {
                probe_index,
                source,
            } => {
                assert_eq!(probe_index, 2);
                assert!(matches!(source, QueryError::BackendUnavailable { .. }));
            }
            other => panic!("expected QueryFailed, got {other:?}"),
        }
        // Probe 3 was never cast.
        assert_eq!(backend.calls(), 3);
    }

    #[test]
    fn idempotent_for_unchanged_world() {
        let cfg = config(vec![30.0, 90.0, 150.0], &["red", "blue"]);
        let backend = ConstBackend::hit(4.0, &["blue"]);
        let a = run(&cfg, &backend).unwrap();
        let b = run(&cfg, &backend).unwrap();
        assert_eq!(a, b);
    }

    // ── Debug record mirroring ──────────────────────────────────

    #[test]
    fn debug_record_mirrors_pass() {
        let cfg = config(vec![90.0, 270.0], &["red"]);
        let backend = ScriptedBackend::new(vec![
            Ok(Some(ProbeHit::new(2.0, ["red"]))),
            Ok(None),
        ]);
        let clock = ManualClock::new(7);
        let mut record = DebugRecord::new();
        // Leftovers from a previous pass get cleared.
        record.push(DebugRay {
            local_start: Vec3::ZERO,
            local_end: Vec3::ZERO,
            hit: false,
            hit_fraction: 1.0,
        });
        let mut out = vec![0.0; 6];
        encode(
            &cfg,
            &IdentityPose,
            &backend,
            &clock,
            &mut out,
            Some(&mut record),
        )
        .unwrap();

        let rays = record.rays();
        assert_eq!(rays.len(), 2);
        assert!(rays[0].hit);
        assert_eq!(rays[0].hit_fraction, 0.2);
        assert!(!rays[1].hit);
        assert_eq!(rays[1].hit_fraction, 1.0);
        assert_eq!(record.age(FrameId(7)), 0);
        clock.advance(5);
        assert_eq!(record.age(clock.frame()), 5);
    }

    // ── Property tests ──────────────────────────────────────────

    proptest! {
        /// Non-legacy invariant: per probe, exactly one of the one-hot
        /// slots and the miss slot is nonzero.
        #[test]
        fn exactly_one_indicator_non_legacy(
            distance in 0.0f32..10.0,
            tag_pick in 0usize..3,
        ) {
            let cfg = config(vec![90.0], &["red", "blue"]);
            let outcome = match tag_pick {
                0 => ConstBackend::hit(distance, &["red"]),
                1 => ConstBackend::hit(distance, &["tree"]),
                _ => ConstBackend::miss(),
            };
            let out = run(&cfg, &outcome).unwrap();
            let indicators = out[..3].iter().filter(|&&v| v != 0.0).count();
            // Untracked hits set no indicator; everything else exactly one.
            if tag_pick == 1 {
                prop_assert_eq!(indicators, 0);
            } else {
                prop_assert_eq!(indicators, 1);
            }
        }

        /// Hit fractions always land in [0, 1] for in-range hits.
        #[test]
        fn hit_fraction_normalized(distance in 0.0f32..10.0) {
            let cfg = config(vec![90.0], &["red"]);
            let out = run(&cfg, &ConstBackend::hit(distance, &["red"])).unwrap();
            prop_assert!(out[2] >= 0.0 && out[2] <= 1.0);
        }
    }
}
