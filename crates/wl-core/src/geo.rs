//! Geographic coordinate type and great-circle primitives.
//!
//! `Coordinate` uses `f64` latitude/longitude.  Corridor lengths must be
//! reproducible to within 0.1 % after polyline expansion over multi-km
//! paths, which rules out single precision.
//!
//! All angles are degrees: bearings are compass bearings in [0, 360),
//! measured clockwise from true north.

use crate::error::{CoreError, CoreResult};

/// Mean Earth radius in metres, shared by all great-circle math.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS-84 geographic coordinate in decimal degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Check that the latitude is a real angle in [-90, 90].
    ///
    /// Longitude is not validated: any finite value wraps onto the sphere
    /// without ambiguity.  Non-finite latitudes also fail here.
    pub fn validate(self) -> CoreResult<()> {
        if !self.lat.is_finite() || self.lat.abs() > 90.0 {
            return Err(CoreError::LatitudeOutOfRange(self.lat));
        }
        Ok(())
    }

    /// Haversine great-circle distance in metres.
    ///
    /// Coincident points return exactly 0.
    pub fn distance_m(self, other: Coordinate) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_M * c
    }

    /// Initial compass bearing from `self` to `other`, degrees in [0, 360).
    ///
    /// Coincident (and exactly antipodal) points return 0 by convention;
    /// callers treat the bearing of a zero-length leg as "north".
    pub fn bearing_deg(self, other: Coordinate) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let x = d_lon.sin() * lat2.cos();
        let y = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();
        if x == 0.0 && y == 0.0 {
            return 0.0;
        }
        normalize_deg(x.atan2(y).to_degrees())
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

// ── Angle arithmetic ──────────────────────────────────────────────────────────

/// Normalise an angle in degrees to [0, 360).
#[inline]
pub fn normalize_deg(deg: f64) -> f64 {
    let d = deg % 360.0;
    if d < 0.0 {
        d + 360.0
    } else {
        d
    }
}

/// Smallest unsigned circular difference between two directions, in [0, 180].
#[inline]
pub fn angle_diff_deg(a: f64, b: f64) -> f64 {
    let d = (normalize_deg(a) - normalize_deg(b)).abs();
    if d > 180.0 {
        360.0 - d
    } else {
        d
    }
}
