//! Spatial-subsystem error type.

use thiserror::Error;

/// Errors produced by `wl-spatial`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SpatialError {
    /// The network source failed transiently; callers may retry the request.
    #[error("network unavailable: {0}")]
    Unavailable(String),

    /// The fetched region contains no junctions.  Fatal for the request.
    #[error("network empty: {0}")]
    Empty(String),

    /// No junction lies within the configured network distance of the
    /// requested start coordinate.
    #[error("no junction reachable within {limit_m} m of the start coordinate")]
    StartUnreachable { limit_m: f64 },

    /// A structural invariant of the graph was violated.  Indicates a bug,
    /// not bad input.
    #[error("graph invariant violated: {0}")]
    Invariant(String),

    #[cfg(feature = "overpass")]
    #[error("overpass parse error: {0}")]
    Parse(String),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
