//! Candidate scoring and selection.
//!
//! Each candidate is scored by its total directional wind effort, inflated
//! by how far its length misses the target:
//!
//! ```text
//! dist_penalty = |L − T| / T
//! score        = E · (1 + α · dist_penalty)        α = 2.0
//! ```
//!
//! The lowest score wins.  Ties break on the smaller penalty, then on the
//! earlier discovery index — selection over the same candidate list is
//! stable and never fails.

use wl_core::JunctionId;
use wl_spatial::JunctionGraph;

use crate::effort::EffortTable;
use crate::enumerate::Candidate;

/// The winning candidate with its scoring breakdown.
#[derive(Clone, Debug)]
pub struct Selection {
    /// Discovery index of the winner in the candidate list.
    pub index: usize,
    pub score: f64,
    pub dist_penalty: f64,
    /// Total directional wind effort of the winner.
    pub effort: f64,
}

/// Total directional effort of a cycle.
///
/// Returns `None` if two consecutive junctions are not adjacent in the
/// graph — possible only for a cycle that was not produced from `graph`,
/// which the caller reports as an internal error.
pub fn total_effort(
    cycle: &[JunctionId],
    graph: &JunctionGraph,
    efforts: &EffortTable,
) -> Option<f64> {
    let mut total = 0.0;
    for pair in cycle.windows(2) {
        let edge = graph.edge_between(pair[0], pair[1])?;
        total += efforts.along(graph, edge, pair[0]);
    }
    Some(total)
}

/// Pick the best candidate.
///
/// Returns `None` when the list is empty or a candidate does not belong to
/// `graph`.
pub fn select_best(
    candidates: &[Candidate],
    graph: &JunctionGraph,
    efforts: &EffortTable,
    target_m: f64,
    alpha: f64,
) -> Option<Selection> {
    let mut best: Option<Selection> = None;

    for (index, candidate) in candidates.iter().enumerate() {
        let effort = total_effort(&candidate.junctions, graph, efforts)?;
        let dist_penalty = (candidate.length_m - target_m).abs() / target_m;
        let score = effort * (1.0 + alpha * dist_penalty);

        let better = match &best {
            None => true,
            Some(b) => score < b.score || (score == b.score && dist_penalty < b.dist_penalty),
        };
        if better {
            best = Some(Selection {
                index,
                score,
                dist_penalty,
                effort,
            });
        }
    }

    best
}
