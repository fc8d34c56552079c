//! Reusable collaborator fixtures.
//!
//! Standard fakes for encoder and sensor testing:
//!
//! - [`IdentityPose`] / [`TranslatePose`] — trivial affine pose maps.
//! - [`ConstBackend`] — every query returns the same outcome.
//! - [`ScriptedBackend`] — queries pop scripted outcomes in order and
//!   are logged for assertions on dispatch and parameters.
//! - [`FailingBackend`] — fails deterministically after N calls.
//! - [`ManualClock`] — frame counter advanced by the test.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use whisker_core::{FrameClock, FrameId, PoseProvider, ProbeHit, QueryError, SpatialQueryBackend, Vec3};

/// Pose that maps local points to world points unchanged.
pub struct IdentityPose;

impl PoseProvider for IdentityPose {
    fn local_to_world_point(&self, point: Vec3) -> Vec3 {
        point
    }
}

/// Pose that translates local points by a fixed offset.
pub struct TranslatePose {
    offset: Vec3,
}

impl TranslatePose {
    /// Build a pose translating by `offset`.
    pub fn new(offset: Vec3) -> Self {
        Self { offset }
    }
}

impl PoseProvider for TranslatePose {
    fn local_to_world_point(&self, point: Vec3) -> Vec3 {
        point + self.offset
    }
}

/// Backend returning the same outcome for every query.
pub struct ConstBackend {
    outcome: Option<ProbeHit>,
}

impl ConstBackend {
    /// Every query misses.
    pub fn miss() -> Self {
        Self { outcome: None }
    }

    /// Every query hits at `distance` with the given tags.
    pub fn hit(distance: f32, tags: &[&str]) -> Self {
        Self {
            outcome: Some(ProbeHit::new(distance, tags.iter().copied())),
        }
    }
}

impl SpatialQueryBackend for ConstBackend {
    fn line_query(
        &self,
        _origin: Vec3,
        _direction: Vec3,
        _max_distance: f32,
    ) -> Result<Option<ProbeHit>, QueryError> {
        Ok(self.outcome.clone())
    }

    fn sphere_query(
        &self,
        _origin: Vec3,
        _radius: f32,
        _direction: Vec3,
        _max_distance: f32,
    ) -> Result<Option<ProbeHit>, QueryError> {
        Ok(self.outcome.clone())
    }
}

/// One query as the backend saw it.
#[derive(Clone, Debug, PartialEq)]
pub struct IssuedQuery {
    /// World-space origin.
    pub origin: Vec3,
    /// World-space direction (not normalized).
    pub direction: Vec3,
    /// Maximum query distance.
    pub max_distance: f32,
    /// Sphere radius, or `None` for a line query.
    pub radius: Option<f32>,
}

/// Backend that replays scripted outcomes in query order and logs
/// every query it receives.
///
/// Panics if queried more times than it has scripted outcomes; an
/// over-query is a test bug.
pub struct ScriptedBackend {
    outcomes: RefCell<VecDeque<Result<Option<ProbeHit>, QueryError>>>,
    log: RefCell<Vec<IssuedQuery>>,
}

impl ScriptedBackend {
    /// Script the outcomes, first query first.
    pub fn new(outcomes: Vec<Result<Option<ProbeHit>, QueryError>>) -> Self {
        Self {
            outcomes: RefCell::new(outcomes.into()),
            log: RefCell::new(Vec::new()),
        }
    }

    /// Script `n` clean misses.
    pub fn all_misses(n: usize) -> Self {
        Self::new(vec![Ok(None); n])
    }

    /// Every query issued so far, in order.
    pub fn queries(&self) -> Vec<IssuedQuery> {
        self.log.borrow().clone()
    }

    fn answer(&self, query: IssuedQuery) -> Result<Option<ProbeHit>, QueryError> {
        self.log.borrow_mut().push(query);
        self.outcomes
            .borrow_mut()
            .pop_front()
            .expect("ScriptedBackend queried more times than scripted")
    }
}

impl SpatialQueryBackend for ScriptedBackend {
    fn line_query(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
    ) -> Result<Option<ProbeHit>, QueryError> {
        self.answer(IssuedQuery {
            origin,
            direction,
            max_distance,
            radius: None,
        })
    }

    fn sphere_query(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
    ) -> Result<Option<ProbeHit>, QueryError> {
        self.answer(IssuedQuery {
            origin,
            direction,
            max_distance,
            radius: Some(radius),
        })
    }
}

/// Backend that misses for the first `fail_after` calls, then fails
/// every call with [`QueryError::BackendUnavailable`].
pub struct FailingBackend {
    fail_after: usize,
    calls: AtomicUsize,
}

impl FailingBackend {
    /// Fail on call number `fail_after` (zero-based).
    pub fn new(fail_after: usize) -> Self {
        Self {
            fail_after,
            calls: AtomicUsize::new(0),
        }
    }

    /// Total calls received so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn next(&self) -> Result<Option<ProbeHit>, QueryError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if n >= self.fail_after {
            Err(QueryError::BackendUnavailable {
                reason: format!("scripted failure on call {n}"),
            })
        } else {
            Ok(None)
        }
    }
}

impl SpatialQueryBackend for FailingBackend {
    fn line_query(
        &self,
        _origin: Vec3,
        _direction: Vec3,
        _max_distance: f32,
    ) -> Result<Option<ProbeHit>, QueryError> {
        self.next()
    }

    fn sphere_query(
        &self,
        _origin: Vec3,
        _radius: f32,
        _direction: Vec3,
        _max_distance: f32,
    ) -> Result<Option<ProbeHit>, QueryError> {
        self.next()
    }
}

/// Frame clock advanced manually by the test.
pub struct ManualClock {
    frame: Cell<u64>,
}

impl ManualClock {
    /// Start at `frame`.
    pub fn new(frame: u64) -> Self {
        Self {
            frame: Cell::new(frame),
        }
    }

    /// Advance the clock by `frames`.
    pub fn advance(&self, frames: u64) {
        self.frame.set(self.frame.get() + frames);
    }
}

impl FrameClock for ManualClock {
    fn frame(&self) -> FrameId {
        FrameId(self.frame.get())
    }
}
