//! The public error surface of the planner.
//!
//! Every failure of a request maps onto one of these variants, each with a
//! short context string.  Errors are reported, never swallowed, and the
//! planner performs no retries: `NetworkUnavailable` is explicitly
//! retryable by the caller, everything else is final for the given input.

use thiserror::Error;

use wl_core::CoreError;
use wl_spatial::SpatialError;

/// Why a `plan_loop` request failed.
#[derive(Debug, Error)]
pub enum PlanError {
    /// Bad request parameters: non-positive target, tolerance outside
    /// [0, 1), latitude out of range, negative wind speed.  Raised before
    /// any work is done.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The network source failed transiently.  Retry is the caller's policy.
    #[error("network unavailable: {0}")]
    NetworkUnavailable(String),

    /// The fetched region contains no junctions.
    #[error("network empty: {0}")]
    NetworkEmpty(String),

    /// No junction is reachable within the configured approach distance.
    #[error("start unreachable: {0}")]
    StartUnreachable(String),

    /// Enumeration finished (or timed out) with zero accepted candidates.
    #[error("no loop found: {0}")]
    NoLoopFound(String),

    /// An internal invariant was violated.  Indicates a bug in the engine,
    /// not a problem with the request.
    #[error("internal error: {0}")]
    Internal(String),
}

pub type PlanResult<T> = Result<T, PlanError>;

impl From<CoreError> for PlanError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::LatitudeOutOfRange(_)
            | CoreError::NegativeWindSpeed(_)
            | CoreError::Config(_) => PlanError::InvalidInput(e.to_string()),
            CoreError::WindUnavailable(msg) => PlanError::NetworkUnavailable(msg),
        }
    }
}

impl From<SpatialError> for PlanError {
    fn from(e: SpatialError) -> Self {
        match e {
            SpatialError::Unavailable(msg) => PlanError::NetworkUnavailable(msg),
            SpatialError::Empty(msg) => PlanError::NetworkEmpty(msg),
            SpatialError::StartUnreachable { limit_m } => PlanError::StartUnreachable(format!(
                "no junction within {limit_m:.0} m of the start by network distance"
            )),
            SpatialError::Invariant(msg) => PlanError::Internal(msg),
            // Future wl-spatial variants (e.g. feature-gated parse errors)
            // surface as retryable source failures.
            other => PlanError::NetworkUnavailable(other.to_string()),
        }
    }
}
