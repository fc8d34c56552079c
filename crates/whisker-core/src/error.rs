//! Error types for the whisker perception workspace.
//!
//! Two layers: [`QueryError`] is the spatial backend's failure surface,
//! and [`EncodeError`] is what an encode pass reports to its caller —
//! either a precondition violation (caller bug, raised before any
//! buffer write or query) or a wrapped backend failure.

use std::error::Error;
use std::fmt;

/// Errors from an encode pass.
///
/// `BufferSizeMismatch` and `InvalidConfig` are precondition violations:
/// they are raised before the output buffer is touched or any spatial
/// query is issued. `QueryFailed` aborts the pass mid-flight; probes
/// after the failing one are not processed and the partially written
/// buffer must be discarded by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EncodeError {
    /// The caller-provided buffer does not match the observation length.
    BufferSizeMismatch {
        /// Required length: `angles.len() * (detectable_tags.len() + 2)`.
        expected: usize,
        /// Length of the buffer actually supplied.
        actual: usize,
    },
    /// The perception configuration is malformed (non-positive max
    /// range, negative cast radius, non-finite parameter).
    InvalidConfig {
        /// Human-readable description of the problem.
        reason: String,
    },
    /// The spatial query backend failed while casting a probe.
    QueryFailed {
        /// Index of the probe whose query failed.
        probe_index: usize,
        /// The underlying backend error.
        source: QueryError,
    },
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferSizeMismatch { expected, actual } => {
                write!(f, "output buffer has {actual} elements, expected {expected}")
            }
            Self::InvalidConfig { reason } => write!(f, "invalid config: {reason}"),
            Self::QueryFailed {
                probe_index,
                source,
            } => {
                write!(f, "spatial query for probe {probe_index} failed: {source}")
            }
        }
    }
}

impl Error for EncodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::QueryFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Errors from the spatial query backend.
///
/// Ordinary hit/miss outcomes are data, not errors; these variants
/// cover the backend itself being unable to answer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryError {
    /// The backend is not available (world torn down, device lost).
    BackendUnavailable {
        /// Human-readable description of the failure.
        reason: String,
    },
    /// The backend rejected the query parameters.
    QueryRejected {
        /// Human-readable description of the rejection.
        reason: String,
    },
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BackendUnavailable { reason } => write!(f, "backend unavailable: {reason}"),
            Self::QueryRejected { reason } => write!(f, "query rejected: {reason}"),
        }
    }
}

impl Error for QueryError {}
