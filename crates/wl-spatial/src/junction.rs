//! The condensed junction graph.
//!
//! # Construction
//!
//! For every junction, a single-source Dijkstra over the full network that
//! **halts expansion at any other junction**: when a junction other than the
//! source is dequeued, the pair is recorded with its accumulated distance
//! and path, and that node's edges are not relaxed.  The result is one edge
//! per adjacent junction pair, carrying the shortest *junction-free*
//! corridor between them.  Each unordered pair is discovered from both ends;
//! the shorter version is kept.
//!
//! # Representative bearing
//!
//! A corridor's bearing is the great-circle initial bearing between its
//! endpoint junctions — a straight line, not the sum of leg bearings.  Wind
//! effort is computed against gross travel direction; the wiggles of the
//! corridor average out at the 1–3 km scale of a typical junction edge.
//!
//! # Cost units
//!
//! Dijkstra runs on integer millimetre costs (`u64`) so heap ordering is
//! total and deterministic; the stored edge length is the exact `f64` sum
//! of the corridor's raw-edge lengths.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use tracing::debug;

use wl_core::{Coordinate, EdgeId, JunctionEdgeId, JunctionId, NodeId};

use crate::error::{SpatialError, SpatialResult};
use crate::network::FullNetwork;

/// Expansion cutoff per source junction, in millimetres (15 km).  Adjacent
/// junctions are never this far apart in practice; the cutoff bounds the
/// search frontier on degenerate data.
const MAX_CORRIDOR_MM: u64 = 15_000_000;

// ── JunctionGraph ─────────────────────────────────────────────────────────────

/// Undirected graph of signed junctions joined by junction-free corridors.
///
/// Nodes and edges are parallel arrays indexed by [`JunctionId`] and
/// [`JunctionEdgeId`].  Edges store an arbitrary but fixed orientation
/// (`edge_a` → `edge_b`); traversal direction is resolved per use.
pub struct JunctionGraph {
    // ── Junction data ─────────────────────────────────────────────────────
    /// Full-network node backing each junction.
    pub junction_node: Vec<NodeId>,
    /// Public label of each junction ("32", "75", …).
    pub junction_label: Vec<String>,
    /// Position of each junction.
    pub junction_coord: Vec<Coordinate>,

    // ── Edge data ─────────────────────────────────────────────────────────
    pub edge_a: Vec<JunctionId>,
    pub edge_b: Vec<JunctionId>,
    /// Corridor length: exact sum of the raw-edge lengths along the path.
    pub edge_length_m: Vec<f64>,
    /// Straight-line initial bearing from `edge_a` to `edge_b`, [0, 360).
    pub edge_bearing_deg: Vec<f64>,
    /// Raw edges forming the corridor, oriented `edge_a` → `edge_b`.
    pub edge_path: Vec<Vec<EdgeId>>,

    // ── Derived lookup tables ─────────────────────────────────────────────
    adjacency: Vec<Vec<(JunctionId, JunctionEdgeId)>>,
    node_to_junction: HashMap<NodeId, JunctionId>,
}

impl JunctionGraph {
    /// Condense a full network into its junction graph.
    ///
    /// Junctions are numbered in ascending full-network `NodeId` order, so
    /// construction is deterministic for a given input.
    pub fn build(full: &FullNetwork) -> JunctionGraph {
        // ── Collect junction nodes ────────────────────────────────────────
        let mut junction_node: Vec<NodeId> = Vec::new();
        let mut junction_label: Vec<String> = Vec::new();
        let mut node_to_junction: HashMap<NodeId, JunctionId> = HashMap::new();

        for i in 0..full.node_count() {
            let node = NodeId(i as u32);
            if let Some(label) = full.junction_label(node) {
                let j = JunctionId(junction_node.len() as u32);
                junction_node.push(node);
                junction_label.push(label.to_owned());
                node_to_junction.insert(node, j);
            }
        }

        let junction_coord: Vec<Coordinate> = junction_node
            .iter()
            .map(|&n| full.node_coord[n.index()])
            .collect();

        // ── Trace corridors from every junction ───────────────────────────
        // Keyed by unordered pair; the shorter corridor wins.
        let mut corridors: HashMap<(u32, u32), Corridor> = HashMap::new();

        for (src_idx, &src_node) in junction_node.iter().enumerate() {
            let src = JunctionId(src_idx as u32);
            trace_from(full, &node_to_junction, src, src_node, &mut corridors);
        }

        // ── Freeze edges in deterministic order ───────────────────────────
        let mut kept: Vec<((u32, u32), Corridor)> = corridors.into_iter().collect();
        kept.sort_unstable_by_key(|(key, _)| *key);

        let mut edge_a = Vec::with_capacity(kept.len());
        let mut edge_b = Vec::with_capacity(kept.len());
        let mut edge_length_m = Vec::with_capacity(kept.len());
        let mut edge_bearing_deg = Vec::with_capacity(kept.len());
        let mut edge_path = Vec::with_capacity(kept.len());

        for (_, c) in kept {
            let bearing = junction_coord[c.from.index()].bearing_deg(junction_coord[c.to.index()]);
            edge_a.push(c.from);
            edge_b.push(c.to);
            edge_length_m.push(c.length_m);
            edge_bearing_deg.push(bearing);
            edge_path.push(c.path);
        }

        // ── Adjacency ─────────────────────────────────────────────────────
        let mut adjacency: Vec<Vec<(JunctionId, JunctionEdgeId)>> =
            vec![Vec::new(); junction_node.len()];
        for e in 0..edge_a.len() {
            let id = JunctionEdgeId(e as u32);
            adjacency[edge_a[e].index()].push((edge_b[e], id));
            adjacency[edge_b[e].index()].push((edge_a[e], id));
        }

        debug!(
            junctions = junction_node.len(),
            corridors = edge_a.len(),
            "junction graph built"
        );

        JunctionGraph {
            junction_node,
            junction_label,
            junction_coord,
            edge_a,
            edge_b,
            edge_length_m,
            edge_bearing_deg,
            edge_path,
            adjacency,
            node_to_junction,
        }
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn junction_count(&self) -> usize {
        self.junction_node.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_a.len()
    }

    /// Average junction degree: each undirected edge contributes two ends.
    pub fn average_degree(&self) -> f64 {
        if self.junction_node.is_empty() {
            return 0.0;
        }
        2.0 * self.edge_a.len() as f64 / self.junction_node.len() as f64
    }

    // ── Lookups ───────────────────────────────────────────────────────────

    /// Neighbours of `j` with the connecting edge, in construction order.
    #[inline]
    pub fn neighbors(&self, j: JunctionId) -> &[(JunctionId, JunctionEdgeId)] {
        &self.adjacency[j.index()]
    }

    /// The corridor between `a` and `b`, if they are adjacent.  Linear scan
    /// over `a`'s neighbour list; junction degrees are single digits.
    pub fn edge_between(&self, a: JunctionId, b: JunctionId) -> Option<JunctionEdgeId> {
        self.adjacency[a.index()]
            .iter()
            .find(|&&(n, _)| n == b)
            .map(|&(_, e)| e)
    }

    /// Which junction (if any) sits on the given full-network node.
    pub fn junction_of_node(&self, node: NodeId) -> Option<JunctionId> {
        self.node_to_junction.get(&node).copied()
    }

    /// Corridor polyline as coordinates, oriented to start at `from`.
    ///
    /// The first coordinate is `from`'s position and the last the opposite
    /// junction's; interior way nodes appear once each.
    pub fn corridor_coords(
        &self,
        edge: JunctionEdgeId,
        from: JunctionId,
        full: &FullNetwork,
    ) -> Vec<Coordinate> {
        let path = &self.edge_path[edge.index()];
        let forward = self.edge_a[edge.index()] == from;

        let mut coords = Vec::with_capacity(path.len() + 1);
        if forward {
            coords.push(full.node_coord[full.edge_from[path[0].index()].index()]);
            for &e in path {
                coords.push(full.node_coord[full.edge_to[e.index()].index()]);
            }
        } else {
            coords.push(full.node_coord[full.edge_to[path[path.len() - 1].index()].index()]);
            for &e in path.iter().rev() {
                coords.push(full.node_coord[full.edge_from[e.index()].index()]);
            }
        }
        coords
    }

    // ── Invariant validation ──────────────────────────────────────────────

    /// Check the structural invariants of every corridor edge.
    ///
    /// Fails with [`SpatialError::Invariant`] if an edge has a non-positive
    /// length, a bearing outside [0, 360), connects a junction to itself, or
    /// if re-summing its raw-edge lengths in the full network deviates from
    /// the stored length by more than 0.1 %.
    pub fn validate(&self, full: &FullNetwork) -> SpatialResult<()> {
        for e in 0..self.edge_count() {
            if self.edge_a[e] == self.edge_b[e] {
                return Err(SpatialError::Invariant(format!(
                    "corridor {e} is a self-loop at {}",
                    self.junction_label[self.edge_a[e].index()]
                )));
            }
            let len = self.edge_length_m[e];
            if !(len > 0.0) {
                return Err(SpatialError::Invariant(format!(
                    "corridor {e} has non-positive length {len}"
                )));
            }
            let bearing = self.edge_bearing_deg[e];
            if !(0.0..360.0).contains(&bearing) {
                return Err(SpatialError::Invariant(format!(
                    "corridor {e} has bearing {bearing} outside [0, 360)"
                )));
            }
            let resum: f64 = self.edge_path[e]
                .iter()
                .map(|re| full.edge_length_m[re.index()])
                .sum();
            if (resum - len).abs() > len * 0.001 {
                return Err(SpatialError::Invariant(format!(
                    "corridor {e} length {len} does not match path sum {resum}"
                )));
            }
        }
        Ok(())
    }
}

// ── Condensing Dijkstra ───────────────────────────────────────────────────────

struct Corridor {
    from: JunctionId,
    to: JunctionId,
    length_m: f64,
    /// Raw edges oriented `from` → `to`.
    path: Vec<EdgeId>,
}

/// Single-source shortest paths from `src_node`, halting at junctions.
///
/// Every junction dequeued (other than the source) yields a corridor
/// candidate and is not expanded further, so no recorded path crosses a
/// third junction.
fn trace_from(
    full: &FullNetwork,
    node_to_junction: &HashMap<NodeId, JunctionId>,
    src: JunctionId,
    src_node: NodeId,
    corridors: &mut HashMap<(u32, u32), Corridor>,
) {
    let n = full.node_count();
    // dist[v] = best known cost (mm) to reach v.
    let mut dist = vec![u64::MAX; n];
    // prev_edge[v] = EdgeId that reached v; EdgeId::INVALID for unreached nodes.
    let mut prev_edge = vec![EdgeId::INVALID; n];

    dist[src_node.index()] = 0;

    // Min-heap: (cost, node). Reverse makes BinaryHeap (max) behave as
    // min-heap; secondary key NodeId gives deterministic tie-breaking.
    let mut heap: BinaryHeap<Reverse<(u64, NodeId)>> = BinaryHeap::new();
    heap.push(Reverse((0, src_node)));

    while let Some(Reverse((cost, node))) = heap.pop() {
        // Skip stale heap entries.
        if cost > dist[node.index()] {
            continue;
        }

        if node != src_node {
            if let Some(&dst) = node_to_junction.get(&node) {
                record_corridor(full, prev_edge.as_slice(), src, dst, node, corridors);
                continue; // halt: do not search past another junction
            }
        }

        for edge in full.edges_from(node) {
            let neighbor = full.edge_to[edge.index()];
            let cost_mm = (full.edge_length_m[edge.index()] * 1000.0).round() as u64;
            let new_cost = cost.saturating_add(cost_mm);

            if new_cost > MAX_CORRIDOR_MM {
                continue;
            }
            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                prev_edge[neighbor.index()] = edge;
                heap.push(Reverse((new_cost, neighbor)));
            }
        }
    }
}

/// Reconstruct the corridor ending at `dst_node` and keep it if it is the
/// shortest seen for its unordered junction pair.
fn record_corridor(
    full: &FullNetwork,
    prev_edge: &[EdgeId],
    src: JunctionId,
    dst: JunctionId,
    dst_node: NodeId,
    corridors: &mut HashMap<(u32, u32), Corridor>,
) {
    let mut path = Vec::new();
    let mut cur = dst_node;
    loop {
        let e = prev_edge[cur.index()];
        if e == EdgeId::INVALID {
            break;
        }
        path.push(e);
        cur = full.edge_from[e.index()];
    }
    path.reverse();

    let length_m: f64 = path.iter().map(|e| full.edge_length_m[e.index()]).sum();

    let key = if src.0 <= dst.0 {
        (src.0, dst.0)
    } else {
        (dst.0, src.0)
    };
    let candidate = Corridor {
        from: src,
        to: dst,
        length_m,
        path,
    };
    match corridors.get(&key) {
        Some(existing) if existing.length_m <= length_m => {}
        _ => {
            corridors.insert(key, candidate);
        }
    }
}
