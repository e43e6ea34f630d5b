//! Wind-effort annotation of the junction graph.
//!
//! # The model
//!
//! For a corridor of length `L` and representative bearing `β` under wind
//! `W`, let `c` be the signed wind component along the direction of travel
//! (positive tailwind, negative headwind, see
//! [`WindVector::component_along`]).  The effort is
//!
//! ```text
//! effort = L · (1 + κ · clip(−c / v_ref, −1, 1))
//! ```
//!
//! with `κ = 0.6` and `v_ref = 10 m/s` by default: pure headwind at the
//! reference speed feels 60 % harder (`1.6 L`), pure tailwind 40 % easier
//! (`0.4 L`), calm air is exactly `L`.  The clip bounds the effect of storm
//! winds; edge lengths themselves are never modified.
//!
//! # Table, not graph
//!
//! Annotation writes a per-request table indexed by [`JunctionEdgeId`],
//! one forward and one reverse value per corridor.  The graph structure is
//! shared and read-only across requests; only this small attribute table is
//! per-request state.
//!
//! [`WindVector::component_along`]: wl_core::WindVector::component_along

use wl_core::{normalize_deg, JunctionEdgeId, JunctionId, PlannerConfig, WindVector};
use wl_spatial::JunctionGraph;

/// Effort for one traversal of an edge of length `length_m` on bearing
/// `bearing_deg` under `wind`.
#[inline]
pub fn edge_effort(
    length_m: f64,
    bearing_deg: f64,
    wind: WindVector,
    kappa: f64,
    v_ref_mps: f64,
) -> f64 {
    let c = wind.component_along(bearing_deg);
    length_m * (1.0 + kappa * (-c / v_ref_mps).clamp(-1.0, 1.0))
}

/// Per-request directional effort values for every corridor of a graph.
pub struct EffortTable {
    /// Effort traversing `edge_a` → `edge_b`.
    fwd: Vec<f64>,
    /// Effort traversing `edge_b` → `edge_a`.
    rev: Vec<f64>,
}

impl EffortTable {
    /// Annotate every corridor of `graph` for `wind`.
    ///
    /// The reverse direction uses the corridor bearing rotated by 180°.
    pub fn annotate(graph: &JunctionGraph, wind: WindVector, config: &PlannerConfig) -> Self {
        let n = graph.edge_count();
        let mut fwd = Vec::with_capacity(n);
        let mut rev = Vec::with_capacity(n);

        for e in 0..n {
            let length = graph.edge_length_m[e];
            let bearing = graph.edge_bearing_deg[e];
            fwd.push(edge_effort(length, bearing, wind, config.kappa, config.v_ref_mps));
            rev.push(edge_effort(
                length,
                normalize_deg(bearing + 180.0),
                wind,
                config.kappa,
                config.v_ref_mps,
            ));
        }

        Self { fwd, rev }
    }

    #[inline]
    pub fn forward(&self, edge: JunctionEdgeId) -> f64 {
        self.fwd[edge.index()]
    }

    #[inline]
    pub fn reverse(&self, edge: JunctionEdgeId) -> f64 {
        self.rev[edge.index()]
    }

    /// Effort of traversing `edge` starting from junction `from`.
    #[inline]
    pub fn along(&self, graph: &JunctionGraph, edge: JunctionEdgeId, from: JunctionId) -> f64 {
        if graph.edge_a[edge.index()] == from {
            self.fwd[edge.index()]
        } else {
            self.rev[edge.index()]
        }
    }
}
