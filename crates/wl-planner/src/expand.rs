//! Expand a winning junction cycle into street-level geometry.

use wl_core::{Coordinate, JunctionId};
use wl_spatial::{FullNetwork, JunctionGraph};

/// Concatenate the corridor polylines of consecutive cycle legs into one
/// closed polyline.
///
/// Shared endpoints are spliced: every corridor starts where the previous
/// one ended, so each interior joint coordinate appears exactly once.  The
/// result begins and ends with the start junction's coordinate.
///
/// Returns `None` if two consecutive junctions have no corridor between
/// them, which can only happen for a cycle that was not produced from
/// `graph`.
pub fn expand_cycle(
    graph: &JunctionGraph,
    full: &FullNetwork,
    cycle: &[JunctionId],
) -> Option<Vec<Coordinate>> {
    let mut polyline: Vec<Coordinate> = Vec::new();

    for pair in cycle.windows(2) {
        let edge = graph.edge_between(pair[0], pair[1])?;
        let coords = graph.corridor_coords(edge, pair[0], full);
        if polyline.is_empty() {
            polyline.extend(coords);
        } else {
            // The corridor's first coordinate is the joint we already have.
            polyline.extend(coords.into_iter().skip(1));
        }
    }

    Some(polyline)
}
