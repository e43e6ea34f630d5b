//! Foundation error type.
//!
//! Sub-crates define their own error enums and either convert `CoreError`
//! via `From` impls or wrap it as one variant.  The orchestrator folds all
//! of these into its public error surface.

use thiserror::Error;

/// Errors raised by input validation and the wind provider seam.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("latitude {0} outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("wind speed {0} m/s is negative or not finite")]
    NegativeWindSpeed(f64),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("wind data unavailable: {0}")]
    WindUnavailable(String),
}

/// Shorthand result type for all `wl-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;
