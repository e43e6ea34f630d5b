//! Depth-bounded recursive loop enumeration.
//!
//! # Search shape
//!
//! A plain backtracking DFS rooted at the start junction, over a shared
//! mutable visited array and path list.  No per-step path allocation: the
//! path is cloned only when a candidate is accepted, which is rare relative
//! to the number of recursive entries.  This bounded-allocation property is
//! the performance contract of the enumerator; do not rewrite it in a
//! persistent-path style.
//!
//! # Pruning
//!
//! In order, per neighbour:
//!
//! 1. Closing edge back to the start: accept if the loop has enough edges
//!    and its length falls inside the tolerance band.
//! 2. Already-visited junction: skip (no interior repeats).
//! 3. Hard distance budget: skip once the accumulated length exceeds the
//!    band's upper bound.
//! 4. Depth bound: skip at the (density-adjusted) maximum depth.
//! 5. Return feasibility: skip when the accumulated length plus a
//!    discounted straight-line distance home already exceeds the upper
//!    bound.  The discount factor (default 0.7) under-approximates the
//!    straight-line-to-network ratio and is part of the behavioural
//!    contract.
//!
//! # Budgets
//!
//! Every 10 000 recursive entries the enumerator checks the wall clock and
//! the optional cancellation token.  Stopping mid-search keeps every
//! candidate accepted so far; a time-out with a non-empty candidate list is
//! a success, not an error.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use wl_core::{JunctionId, PlannerConfig};
use wl_spatial::JunctionGraph;

use crate::cancel::CancelToken;

/// Recursive entries between wall-clock/cancellation checks.  Coarse enough
/// that clock reads are negligible, fine enough to overrun the budget by at
/// most a few milliseconds of search.
const CHECK_INTERVAL: u64 = 10_000;

// ── Output types ──────────────────────────────────────────────────────────────

/// One accepted cycle: junctions from the start junction around and back to
/// it, with its exact corridor length.
#[derive(Clone, Debug, PartialEq)]
pub struct Candidate {
    /// Junction sequence; first and last are the start junction, interior
    /// junctions are distinct.
    pub junctions: Vec<JunctionId>,
    /// Sum of the corridor lengths along the cycle, metres.
    pub length_m: f64,
}

/// Why the enumeration ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// The search space was exhausted within all budgets.
    Exhausted,
    /// The wall-clock budget ran out.
    TimeBudget,
    /// The candidate store reached its cap.
    CandidateCap,
    /// The caller's cancellation token fired.
    Cancelled,
}

/// Bookkeeping from one enumeration run, for logs and diagnostics.
#[derive(Clone, Debug)]
pub struct SearchStats {
    /// Recursive entries into the DFS.
    pub steps: u64,
    pub elapsed: Duration,
    pub stopped: StopReason,
    /// Depth bound actually used after density adjustment.
    pub effective_max_depth: usize,
}

/// Candidates in discovery order plus run statistics.
#[derive(Clone, Debug)]
pub struct Enumeration {
    pub candidates: Vec<Candidate>,
    pub stats: SearchStats,
}

// ── Depth adjustment ──────────────────────────────────────────────────────────

/// Lower the depth bound on dense graphs.
///
/// Average degree above 10 implies combinatorial blow-up at depth 15; the
/// bound drops to 10 (or 12 above degree 6).  The configured depth is never
/// raised.
pub fn effective_max_depth(average_degree: f64, configured: usize) -> usize {
    if average_degree > 10.0 {
        configured.min(10)
    } else if average_degree > 6.0 {
        configured.min(12)
    } else {
        configured
    }
}

// ── Enumeration ───────────────────────────────────────────────────────────────

/// Enumerate candidate cycles rooted at `start` with total length inside
/// `[target_m·(1−τ), target_m·(1+τ)]`.
///
/// Discovery order is preserved; reflections of a cycle are distinct
/// candidates because their wind effort differs.  Returns an empty
/// candidate list (never an error) when nothing qualifies — the caller
/// decides how to surface that.
pub fn enumerate_loops(
    graph: &JunctionGraph,
    start: JunctionId,
    target_m: f64,
    config: &PlannerConfig,
    cancel: Option<&CancelToken>,
) -> Enumeration {
    let t_start = Instant::now();

    // ── Pre-computation ───────────────────────────────────────────────────
    // Flat adjacency of (neighbour, corridor length): no graph lookups in
    // the inner loop.
    let adjacency: Vec<Vec<(JunctionId, f64)>> = (0..graph.junction_count())
        .map(|j| {
            graph
                .neighbors(JunctionId(j as u32))
                .iter()
                .map(|&(n, e)| (n, graph.edge_length_m[e.index()]))
                .collect()
        })
        .collect();

    let max_depth = effective_max_depth(graph.average_degree(), config.max_depth);
    if max_depth < config.max_depth {
        debug!(
            average_degree = graph.average_degree(),
            max_depth, "dense graph, lowered search depth"
        );
    }

    // Straight-line distance home per junction, for the return prune.
    let home = graph.junction_coord[start.index()];
    let d_home: Vec<f64> = graph
        .junction_coord
        .iter()
        .map(|&c| c.distance_m(home))
        .collect();

    let mut visited = vec![false; graph.junction_count()];
    visited[start.index()] = true;

    let mut dfs = Dfs {
        adjacency: &adjacency,
        d_home: &d_home,
        start,
        min_dist: target_m * (1.0 - config.tolerance),
        max_dist: target_m * (1.0 + config.tolerance),
        max_depth,
        min_loop_edges: config.min_loop_edges,
        prune_factor: config.return_prune_factor,
        cap: config.candidate_cap,
        budget: config.time_budget,
        t_start,
        cancel,
        visited,
        path: vec![start],
        candidates: Vec::new(),
        steps: 0,
        stopped: StopReason::Exhausted,
    };
    dfs.run(start, 0.0);

    let stats = SearchStats {
        steps: dfs.steps,
        elapsed: t_start.elapsed(),
        stopped: dfs.stopped,
        effective_max_depth: max_depth,
    };
    info!(
        candidates = dfs.candidates.len(),
        steps = stats.steps,
        elapsed_ms = stats.elapsed.as_millis() as u64,
        stopped = ?stats.stopped,
        "loop enumeration finished"
    );

    Enumeration {
        candidates: dfs.candidates,
        stats,
    }
}

// ── DFS state ─────────────────────────────────────────────────────────────────

struct Dfs<'a> {
    adjacency: &'a [Vec<(JunctionId, f64)>],
    d_home: &'a [f64],
    start: JunctionId,
    min_dist: f64,
    max_dist: f64,
    max_depth: usize,
    min_loop_edges: usize,
    prune_factor: f64,
    cap: usize,
    budget: Duration,
    t_start: Instant,
    cancel: Option<&'a CancelToken>,

    // Shared mutable search state, pushed and popped in place.
    visited: Vec<bool>,
    path: Vec<JunctionId>,
    candidates: Vec<Candidate>,
    steps: u64,
    stopped: StopReason,
}

impl Dfs<'_> {
    /// Returns `true` when the search must unwind (budget, cap, or cancel).
    fn run(&mut self, node: JunctionId, dist: f64) -> bool {
        self.steps += 1;
        if self.steps % CHECK_INTERVAL == 0 {
            if self.cancel.is_some_and(CancelToken::is_cancelled) {
                self.stopped = StopReason::Cancelled;
                return true;
            }
            if self.t_start.elapsed() > self.budget {
                self.stopped = StopReason::TimeBudget;
                return true;
            }
        }

        let degree = self.adjacency[node.index()].len();
        for i in 0..degree {
            let (neighbor, edge_len) = self.adjacency[node.index()][i];
            let new_dist = dist + edge_len;

            if neighbor == self.start {
                // A closure.  The path already holds `min_loop_edges` nodes
                // exactly when the cycle has that many edges.
                if self.path.len() >= self.min_loop_edges
                    && new_dist >= self.min_dist
                    && new_dist <= self.max_dist
                {
                    let mut junctions = self.path.clone();
                    junctions.push(self.start);
                    self.candidates.push(Candidate {
                        junctions,
                        length_m: new_dist,
                    });
                    if self.candidates.len() >= self.cap {
                        self.stopped = StopReason::CandidateCap;
                        return true;
                    }
                }
                continue;
            }

            if self.visited[neighbor.index()] {
                continue;
            }
            if new_dist > self.max_dist {
                continue;
            }
            if self.path.len() >= self.max_depth {
                continue;
            }
            if new_dist + self.prune_factor * self.d_home[neighbor.index()] > self.max_dist {
                continue;
            }

            self.visited[neighbor.index()] = true;
            self.path.push(neighbor);
            if self.run(neighbor, new_dist) {
                return true;
            }
            self.path.pop();
            self.visited[neighbor.index()] = false;
        }

        false
    }
}
