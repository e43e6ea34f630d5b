//! The planner's output value.

use wl_core::{Coordinate, WindVector};

/// A planned wind-optimised loop ride.
///
/// The approach polyline (rider coordinate → start junction) and the loop
/// polyline (around the junction cycle) are kept separate so renderers can
/// style them differently; the loop polyline is closed, its first and last
/// coordinates are identical.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Plan {
    /// Total ride length in metres: the loop plus the approach out and back.
    pub actual_length_m: f64,

    /// Junction labels along the loop, in riding order.  First and last are
    /// the start junction.
    pub junction_labels: Vec<String>,

    /// Positions of the junctions in `junction_labels`, same order.
    pub junction_coords: Vec<Coordinate>,

    /// Node path from the snapped start coordinate to the start junction.
    /// A single point when the start coordinate sits on the junction.
    pub approach_polyline: Vec<Coordinate>,

    /// The full loop geometry over street-level nodes, closed.
    pub loop_polyline: Vec<Coordinate>,

    /// The wind vector the plan was optimised for.
    pub wind: WindVector,

    /// Radius of the region fetched from the network loader, metres.
    pub search_radius_m: f64,
}
