//! Approach path: connect the rider's coordinate to the junction network.
//!
//! Two steps: snap the coordinate to the nearest raw node via the R-tree,
//! then run Dijkstra over the full network until the first junction is
//! dequeued.  Because Dijkstra dequeues in ascending distance order, that
//! junction is the one with the smallest network distance from the snapped
//! node.  The search is bounded by the configured approach limit; if it is
//! exhausted first, the start is unreachable.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use tracing::debug;

use wl_core::{Coordinate, EdgeId, JunctionId, NodeId};

use crate::error::{SpatialError, SpatialResult};
use crate::junction::JunctionGraph;
use crate::network::FullNetwork;

/// The shortest path from a rider's coordinate onto the junction network.
///
/// The polyline runs from the snapped raw node to the start junction; it is
/// ridden out before the loop and back (reversed) after it.
#[derive(Clone, Debug)]
pub struct ApproachPath {
    /// Junction at which the loop starts and ends.
    pub start_junction: JunctionId,
    /// Node coordinates from the snapped start node to the junction.
    /// A single element (the junction itself) when the snap lands on it.
    pub polyline: Vec<Coordinate>,
    /// Network length of the polyline in metres.
    pub length_m: f64,
}

/// Find the approach path from `origin`, bounded by `max_m` network metres.
///
/// # Errors
///
/// [`SpatialError::Empty`] when the network has no nodes at all;
/// [`SpatialError::StartUnreachable`] when no junction lies within `max_m`.
pub fn find_approach(
    full: &FullNetwork,
    junctions: &JunctionGraph,
    origin: Coordinate,
    max_m: f64,
) -> SpatialResult<ApproachPath> {
    let snapped = full
        .nearest_node(origin)
        .ok_or_else(|| SpatialError::Empty("network has no nodes".into()))?;

    // Snap already hit a junction: a trivial approach.
    if let Some(j) = junctions.junction_of_node(snapped) {
        return Ok(ApproachPath {
            start_junction: j,
            polyline: vec![full.node_coord[snapped.index()]],
            length_m: 0.0,
        });
    }

    let limit_mm = (max_m * 1000.0).round() as u64;
    let n = full.node_count();
    let mut dist = vec![u64::MAX; n];
    let mut prev_edge = vec![EdgeId::INVALID; n];

    dist[snapped.index()] = 0;
    let mut heap: BinaryHeap<Reverse<(u64, NodeId)>> = BinaryHeap::new();
    heap.push(Reverse((0, snapped)));

    while let Some(Reverse((cost, node))) = heap.pop() {
        if cost > dist[node.index()] {
            continue;
        }

        if let Some(j) = junctions.junction_of_node(node) {
            let (polyline, length_m) = reconstruct(full, &prev_edge, snapped, node);
            debug!(
                junction = %junctions.junction_label[j.index()],
                length_m,
                "approach path found"
            );
            return Ok(ApproachPath {
                start_junction: j,
                polyline,
                length_m,
            });
        }

        for edge in full.edges_from(node) {
            let neighbor = full.edge_to[edge.index()];
            let cost_mm = (full.edge_length_m[edge.index()] * 1000.0).round() as u64;
            let new_cost = cost.saturating_add(cost_mm);

            if new_cost > limit_mm {
                continue;
            }
            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                prev_edge[neighbor.index()] = edge;
                heap.push(Reverse((new_cost, neighbor)));
            }
        }
    }

    Err(SpatialError::StartUnreachable { limit_m: max_m })
}

/// Trace `prev_edge` back from `to` and return the node polyline plus the
/// exact metre length of the path.
fn reconstruct(
    full: &FullNetwork,
    prev_edge: &[EdgeId],
    from: NodeId,
    to: NodeId,
) -> (Vec<Coordinate>, f64) {
    let mut edges = Vec::new();
    let mut cur = to;
    loop {
        let e = prev_edge[cur.index()];
        if e == EdgeId::INVALID {
            break;
        }
        edges.push(e);
        cur = full.edge_from[e.index()];
    }
    edges.reverse();

    let length_m: f64 = edges.iter().map(|e| full.edge_length_m[e.index()]).sum();

    let mut polyline = Vec::with_capacity(edges.len() + 1);
    polyline.push(full.node_coord[from.index()]);
    for e in &edges {
        polyline.push(full.node_coord[full.edge_to[e.index()].index()]);
    }
    (polyline, length_m)
}
