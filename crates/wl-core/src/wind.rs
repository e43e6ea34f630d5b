//! Wind vector and the provider seam for wind data sources.
//!
//! The bearing convention is meteorological: `from_deg` is the direction the
//! wind blows FROM, clockwise from true north.  A wind from 90° (an easterly)
//! is a tailwind for a cyclist travelling on bearing 270°.

use crate::error::{CoreError, CoreResult};
use crate::geo::{angle_diff_deg, normalize_deg, Coordinate};

/// A wind observation or forecast, immutable for the duration of a request.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindVector {
    /// Wind speed in metres per second, non-negative.
    pub speed_mps: f64,
    /// Meteorological bearing the wind blows from, degrees in [0, 360).
    pub from_deg: f64,
}

impl WindVector {
    /// Construct a wind vector; the bearing is normalised to [0, 360).
    #[inline]
    pub fn new(speed_mps: f64, from_deg: f64) -> Self {
        Self {
            speed_mps,
            from_deg: normalize_deg(from_deg),
        }
    }

    /// Zero wind.  Under calm conditions every edge effort equals its length.
    #[inline]
    pub fn calm() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Check that the speed is a non-negative finite magnitude.
    pub fn validate(self) -> CoreResult<()> {
        if !self.speed_mps.is_finite() || self.speed_mps < 0.0 {
            return Err(CoreError::NegativeWindSpeed(self.speed_mps));
        }
        Ok(())
    }

    /// Signed wind component along a direction of travel, in m/s.
    ///
    /// Positive means tailwind, negative headwind.  With δ the circular
    /// difference between travel bearing and `from_deg`, the component is
    /// `-speed · cos(δ)`: travelling straight into the wind (δ = 0) gives
    /// `-speed`, straight away from it (δ = 180) gives `+speed`.
    #[inline]
    pub fn component_along(self, travel_bearing_deg: f64) -> f64 {
        let delta = angle_diff_deg(travel_bearing_deg, self.from_deg);
        -self.speed_mps * delta.to_radians().cos()
    }
}

impl std::fmt::Display for WindVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1} m/s from {:.0}°", self.speed_mps, self.from_deg)
    }
}

// ── WindProvider ──────────────────────────────────────────────────────────────

/// Pluggable source of wind data.
///
/// The planner itself accepts a ready `WindVector`; this trait is the seam
/// through which callers obtain one (a weather API client, a test stub, a
/// recorded observation).  Implementations must be `Send + Sync` so a single
/// provider can serve concurrent requests.
pub trait WindProvider: Send + Sync {
    /// Current wind at `centre`.
    fn current(&self, centre: Coordinate) -> CoreResult<WindVector>;

    /// Forecast wind at `centre` for the given Unix timestamp.
    ///
    /// Providers without forecast data may fall back to the current wind;
    /// that is the default.
    fn forecast(&self, centre: Coordinate, _at_unix_secs: i64) -> CoreResult<WindVector> {
        self.current(centre)
    }
}

/// A provider that always returns the same vector.  Used in tests and for
/// "plan with this wind" requests where the caller already has the data.
#[derive(Copy, Clone, Debug)]
pub struct FixedWind(pub WindVector);

impl WindProvider for FixedWind {
    fn current(&self, _centre: Coordinate) -> CoreResult<WindVector> {
        Ok(self.0)
    }
}
