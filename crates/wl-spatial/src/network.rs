//! The street-level network.
//!
//! [`FullNetwork::from_raw`] is the only constructor: it turns one loader
//! fetch into an immutable graph in a single pass over the raw data, so
//! there is no half-built intermediate state to reason about.
//!
//! # Edge storage
//!
//! Edges live in flat parallel arrays grouped by their source node.  The
//! group boundaries are kept in `first_out`: node `n`'s outgoing edges are
//! the ids in `first_out[n] .. first_out[n+1]`.  Grouping is done by
//! counting degrees and placing each directed segment at its row cursor,
//! so construction is linear in the number of segments and edge ids within
//! a row preserve way order.
//!
//! # Snapping
//!
//! The rider's coordinate is matched to the nearest network node through an
//! R-tree over positions projected to local metres: an equirectangular
//! projection about the region's mean latitude, with the longitude scale
//! clamped away from zero near the poles.  Distances in the index are then
//! true metre distances (to well under 0.1 % at regional extents), rather
//! than degree-space artefacts that would skew at high latitude.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::ops::Range;

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use wl_core::{normalize_deg, Coordinate, EdgeId, NodeId, EARTH_RADIUS_M};

use crate::loader::RawNetwork;

/// Metres per degree of arc on the spherical model.
const M_PER_DEG: f64 = EARTH_RADIUS_M * std::f64::consts::PI / 180.0;

// ── Projected snap index ──────────────────────────────────────────────────────

/// A node position in the locally projected plane, metres east and north of
/// the (0°, 0°) origin.
struct SnapPoint {
    east_m: f64,
    north_m: f64,
    id: NodeId,
}

impl RTreeObject for SnapPoint {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.east_m, self.north_m])
    }
}

impl PointDistance for SnapPoint {
    fn distance_2(&self, query: &[f64; 2]) -> f64 {
        let de = self.east_m - query[0];
        let dn = self.north_m - query[1];
        de * de + dn * dn
    }
}

/// Longitude scale for the projection.  Clamped so a region straddling a
/// pole still yields a usable (if distorted) index instead of collapsing
/// every node onto one axis.
fn lon_scale(mean_lat_deg: f64) -> f64 {
    mean_lat_deg.to_radians().cos().abs().max(0.1)
}

// ── FullNetwork ───────────────────────────────────────────────────────────────

/// Immutable street graph for one request, with a spatial index for
/// snapping the rider's coordinate onto it.
///
/// Node and edge attributes are `pub` parallel arrays for direct indexed
/// access on hot paths; structural fields stay private.
pub struct FullNetwork {
    /// Geographic position of each node.  Indexed by `NodeId`.
    pub node_coord: Vec<Coordinate>,

    /// Junction label of each node; `None` for ordinary way nodes.
    pub node_junction: Vec<Option<String>>,

    /// Source node of each directed edge.
    pub edge_from: Vec<NodeId>,

    /// Destination node of each directed edge.
    pub edge_to: Vec<NodeId>,

    /// Length of each edge in metres.  Always > 0.
    pub edge_length_m: Vec<f64>,

    /// Initial compass bearing of each edge in degrees, [0, 360).
    pub edge_bearing_deg: Vec<f64>,

    /// Row boundaries of the by-source edge grouping; length node_count + 1.
    first_out: Vec<u32>,

    snap_index: RTree<SnapPoint>,
    /// Longitude scale used when the snap index was projected; queries must
    /// be projected with the same factor.
    snap_lon_scale: f64,
}

impl FullNetwork {
    /// Build a network from one loader fetch.
    ///
    /// Nodes are deduplicated by external ID; a duplicate delivery never
    /// erases an earlier junction label, and may supply a missing one.
    /// Ways are split into single-segment edges: segments that reference an
    /// undelivered node or whose endpoints coincide are dropped, every
    /// surviving segment is stored in both directions with opposite
    /// bearings.
    ///
    /// # Example
    ///
    /// ```
    /// use wl_core::Coordinate;
    /// use wl_spatial::{FullNetwork, RawNetwork, RawNode, RawWay};
    ///
    /// let raw = RawNetwork {
    ///     nodes: vec![
    ///         RawNode { id: 7, coord: Coordinate::new(50.87, 3.17), junction_ref: Some("32".into()) },
    ///         RawNode { id: 8, coord: Coordinate::new(50.88, 3.18), junction_ref: None },
    ///     ],
    ///     ways: vec![RawWay { nodes: vec![7, 8] }],
    /// };
    /// let net = FullNetwork::from_raw(&raw);
    /// assert_eq!(net.node_count(), 2);
    /// assert_eq!(net.edge_count(), 2); // stored in both directions
    /// ```
    pub fn from_raw(raw: &RawNetwork) -> FullNetwork {
        // ── Nodes: dedupe by external id, first delivery wins ─────────────
        let mut node_coord: Vec<Coordinate> = Vec::with_capacity(raw.nodes.len());
        let mut node_junction: Vec<Option<String>> = Vec::with_capacity(raw.nodes.len());
        let mut by_ext: HashMap<i64, NodeId> = HashMap::with_capacity(raw.nodes.len());

        for node in &raw.nodes {
            match by_ext.entry(node.id) {
                Entry::Occupied(seen) => {
                    let slot = &mut node_junction[seen.get().index()];
                    if slot.is_none() {
                        slot.clone_from(&node.junction_ref);
                    }
                }
                Entry::Vacant(fresh) => {
                    fresh.insert(NodeId(node_coord.len() as u32));
                    node_coord.push(node.coord);
                    node_junction.push(node.junction_ref.clone());
                }
            }
        }
        let node_count = node_coord.len();

        // ── Segments: split ways, measure, keep both directions ───────────
        struct Segment {
            from: NodeId,
            to: NodeId,
            length_m: f64,
            bearing_deg: f64,
        }

        let mut segments: Vec<Segment> = Vec::new();
        for way in &raw.ways {
            for pair in way.nodes.windows(2) {
                let (Some(&a), Some(&b)) = (by_ext.get(&pair[0]), by_ext.get(&pair[1])) else {
                    continue; // endpoint outside the fetched region
                };
                let (ca, cb) = (node_coord[a.index()], node_coord[b.index()]);
                let length_m = ca.distance_m(cb);
                if length_m <= 0.0 {
                    continue;
                }
                let out = ca.bearing_deg(cb);
                segments.push(Segment { from: a, to: b, length_m, bearing_deg: out });
                segments.push(Segment {
                    from: b,
                    to: a,
                    length_m,
                    bearing_deg: normalize_deg(out + 180.0),
                });
            }
        }

        // ── Group edges by source: count degrees, then place at cursors ───
        let mut first_out = vec![0u32; node_count + 1];
        for s in &segments {
            first_out[s.from.index() + 1] += 1;
        }
        for i in 0..node_count {
            first_out[i + 1] += first_out[i];
        }

        let edge_count = segments.len();
        let mut cursor: Vec<u32> = first_out[..node_count].to_vec();
        let mut edge_from = vec![NodeId::INVALID; edge_count];
        let mut edge_to = vec![NodeId::INVALID; edge_count];
        let mut edge_length_m = vec![0.0; edge_count];
        let mut edge_bearing_deg = vec![0.0; edge_count];

        for s in segments {
            let row = s.from.index();
            let slot = cursor[row] as usize;
            cursor[row] += 1;
            edge_from[slot] = s.from;
            edge_to[slot] = s.to;
            edge_length_m[slot] = s.length_m;
            edge_bearing_deg[slot] = s.bearing_deg;
        }

        // ── Snap index over locally projected positions ───────────────────
        let snap_lon_scale = if node_count == 0 {
            1.0
        } else {
            let mean_lat = node_coord.iter().map(|c| c.lat).sum::<f64>() / node_count as f64;
            lon_scale(mean_lat)
        };
        let snap_index = RTree::bulk_load(
            node_coord
                .iter()
                .enumerate()
                .map(|(i, c)| SnapPoint {
                    east_m: c.lon * snap_lon_scale * M_PER_DEG,
                    north_m: c.lat * M_PER_DEG,
                    id: NodeId(i as u32),
                })
                .collect(),
        );

        FullNetwork {
            node_coord,
            node_junction,
            edge_from,
            edge_to,
            edge_length_m,
            edge_bearing_deg,
            first_out,
            snap_index,
            snap_lon_scale,
        }
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_coord.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_coord.is_empty()
    }

    /// Number of nodes carrying a junction label.
    pub fn junction_count(&self) -> usize {
        self.node_junction.iter().filter(|j| j.is_some()).count()
    }

    #[inline]
    pub fn is_junction(&self, node: NodeId) -> bool {
        self.node_junction[node.index()].is_some()
    }

    #[inline]
    pub fn junction_label(&self, node: NodeId) -> Option<&str> {
        self.node_junction[node.index()].as_deref()
    }

    // ── Adjacency ─────────────────────────────────────────────────────────

    /// Positions of `node`'s outgoing edges in the edge arrays.
    #[inline]
    fn edge_row(&self, node: NodeId) -> Range<usize> {
        self.first_out[node.index()] as usize..self.first_out[node.index() + 1] as usize
    }

    /// The edges leaving `node`.  Their ids form one contiguous run, so
    /// iteration is a plain index walk.
    #[inline]
    pub fn edges_from(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        self.edge_row(node).map(|i| EdgeId(i as u32))
    }

    /// Number of edges leaving `node`.
    #[inline]
    pub fn degree(&self, node: NodeId) -> usize {
        self.edge_row(node).len()
    }

    // ── Snapping ──────────────────────────────────────────────────────────

    /// The network node nearest to `pos` by projected metre distance.
    ///
    /// `None` only when the network has no nodes.
    pub fn nearest_node(&self, pos: Coordinate) -> Option<NodeId> {
        let query = [
            pos.lon * self.snap_lon_scale * M_PER_DEG,
            pos.lat * M_PER_DEG,
        ];
        self.snap_index.nearest_neighbor(&query).map(|p| p.id)
    }
}
