//! The configured observation surface.
//!
//! [`RaySensor`] binds a [`PerceptionConfig`] to its collaborators and
//! exposes the two operations the host observation pipeline uses:
//! shape discovery and write-to-sink.

use whisker_core::{EncodeError, FrameClock, ObsSink, PoseProvider, SpatialQueryBackend};

use crate::debug::DebugRecord;
use crate::encoder::{encode, PerceptionConfig};

/// A perception sensor with fixed configuration and collaborators.
///
/// Owns a scratch buffer of `observation_len()` floats so repeated
/// [`write`](RaySensor::write) calls allocate nothing.
pub struct RaySensor {
    config: PerceptionConfig,
    pose: Box<dyn PoseProvider>,
    backend: Box<dyn SpatialQueryBackend>,
    clock: Box<dyn FrameClock>,
    scratch: Vec<f32>,
    debug: Option<DebugRecord>,
}

impl core::fmt::Debug for RaySensor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RaySensor")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl RaySensor {
    /// Build a sensor, validating the configuration once up front.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::InvalidConfig`] for a malformed
    /// configuration (non-positive max range, negative cast radius,
    /// non-finite parameters).
    pub fn new(
        config: PerceptionConfig,
        pose: Box<dyn PoseProvider>,
        backend: Box<dyn SpatialQueryBackend>,
        clock: Box<dyn FrameClock>,
    ) -> Result<Self, EncodeError> {
        config.validate()?;
        let scratch = vec![0.0; config.observation_len()];
        Ok(Self {
            config,
            pose,
            backend,
            clock,
            scratch,
            debug: None,
        })
    }

    /// Shape of the observation this sensor produces:
    /// `[angles.len() * (tags.len() + 2)]`.
    pub fn observation_shape(&self) -> [usize; 1] {
        [self.config.observation_len()]
    }

    /// The sensor's configuration.
    pub fn config(&self) -> &PerceptionConfig {
        &self.config
    }

    /// Start mirroring each pass into a [`DebugRecord`].
    pub fn enable_debug(&mut self) {
        self.debug.get_or_insert_with(DebugRecord::new);
    }

    /// The debug record, if [`enable_debug`](Self::enable_debug) was called.
    pub fn debug_record(&self) -> Option<&DebugRecord> {
        self.debug.as_ref()
    }

    /// Run one encode pass and append the result to `sink`.
    ///
    /// Returns the number of floats written (always the observation
    /// length on success). On error nothing is appended.
    pub fn write(&mut self, sink: &mut dyn ObsSink) -> Result<usize, EncodeError> {
        encode(
            &self.config,
            self.pose.as_ref(),
            self.backend.as_ref(),
            self.clock.as_ref(),
            &mut self.scratch,
            self.debug.as_mut(),
        )?;
        sink.append(&self.scratch);
        Ok(self.scratch.len())
    }
}
