//! Request orchestration.

use tracing::{debug, info};

use wl_core::{Coordinate, PlannerConfig, WindVector};
use wl_search::{enumerate_loops, select_best, CancelToken, EffortTable};
use wl_spatial::{find_approach, FullNetwork, JunctionGraph, NetworkLoader};

use crate::error::{PlanError, PlanResult};
use crate::expand::expand_cycle;
use crate::plan::Plan;

/// The loader is queried for a region this much larger than the target
/// distance, but never smaller than 5 km: loops stretch at most ~60 % of
/// their circumference from the start in any one direction.
const RADIUS_FACTOR: f64 = 0.6;
const MIN_RADIUS_M: f64 = 5_000.0;

/// Plans wind-optimised loop rides over a junction network.
///
/// Stateless between requests apart from the loader and configuration, so a
/// single instance may serve concurrent requests.
pub struct LoopPlanner<L: NetworkLoader> {
    loader: L,
    config: PlannerConfig,
}

impl<L: NetworkLoader> LoopPlanner<L> {
    /// Planner with the default configuration.
    pub fn new(loader: L) -> Self {
        Self::with_config(loader, PlannerConfig::default())
    }

    pub fn with_config(loader: L, config: PlannerConfig) -> Self {
        Self { loader, config }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plan a loop of roughly `target_m` metres from `start` under `wind`.
    ///
    /// See [`plan_loop_cancellable`](Self::plan_loop_cancellable) for the
    /// variant that accepts a cancellation token.
    pub fn plan_loop(
        &self,
        start: Coordinate,
        target_m: f64,
        wind: WindVector,
    ) -> PlanResult<Plan> {
        self.plan_loop_cancellable(start, target_m, wind, None)
    }

    /// As [`plan_loop`](Self::plan_loop); the enumeration phase additionally
    /// polls `cancel` and returns the best result found so far when it
    /// fires (or `NoLoopFound` if nothing was accepted yet).
    pub fn plan_loop_cancellable(
        &self,
        start: Coordinate,
        target_m: f64,
        wind: WindVector,
        cancel: Option<&CancelToken>,
    ) -> PlanResult<Plan> {
        // ── Input validation, before any work ─────────────────────────────
        self.config.validate()?;
        start.validate()?;
        wind.validate()?;
        if !target_m.is_finite() || target_m <= 0.0 {
            return Err(PlanError::InvalidInput(format!(
                "target distance {target_m} m must be positive"
            )));
        }

        // ── Fetch and build the two-level graph ───────────────────────────
        let radius_m = (target_m * RADIUS_FACTOR).max(MIN_RADIUS_M);
        let raw = self.loader.fetch(start, radius_m)?;
        let full = FullNetwork::from_raw(&raw);
        debug!(
            nodes = full.node_count(),
            edges = full.edge_count(),
            junctions = full.junction_count(),
            radius_m,
            "full network built"
        );
        if full.junction_count() == 0 {
            return Err(PlanError::NetworkEmpty(format!(
                "no junctions within {radius_m:.0} m of {start}"
            )));
        }

        let graph = JunctionGraph::build(&full);
        if cfg!(debug_assertions) {
            graph.validate(&full)?;
        }

        let efforts = EffortTable::annotate(&graph, wind, &self.config);

        // ── Approach: rider coordinate → start junction ───────────────────
        let approach = find_approach(&full, &graph, start, self.config.approach_max_m)?;

        // The approach is ridden out and back, so the loop itself must be
        // shorter than the requested total by twice its length.
        let loop_target_m = target_m - 2.0 * approach.length_m;
        if loop_target_m <= 0.0 {
            return Err(PlanError::NoLoopFound(format!(
                "approach of {:.0} m leaves no distance budget for a loop",
                approach.length_m
            )));
        }

        // ── Search ────────────────────────────────────────────────────────
        let enumeration = enumerate_loops(
            &graph,
            approach.start_junction,
            loop_target_m,
            &self.config,
            cancel,
        );
        if enumeration.candidates.is_empty() {
            return Err(PlanError::NoLoopFound(format!(
                "no cycle of {:.0} m ± {:.0} % from junction {}",
                loop_target_m,
                self.config.tolerance * 100.0,
                graph.junction_label[approach.start_junction.index()]
            )));
        }

        let selection = select_best(
            &enumeration.candidates,
            &graph,
            &efforts,
            loop_target_m,
            self.config.alpha,
        )
        .ok_or_else(|| PlanError::Internal("scorer rejected a non-empty candidate list".into()))?;
        let winner = &enumeration.candidates[selection.index];

        // ── Materialise the result ────────────────────────────────────────
        let loop_polyline = expand_cycle(&graph, &full, &winner.junctions)
            .ok_or_else(|| PlanError::Internal("winning cycle has a missing corridor".into()))?;

        let junction_labels: Vec<String> = winner
            .junctions
            .iter()
            .map(|&j| graph.junction_label[j.index()].clone())
            .collect();
        let junction_coords: Vec<Coordinate> = winner
            .junctions
            .iter()
            .map(|&j| graph.junction_coord[j.index()])
            .collect();

        info!(
            loop_m = winner.length_m,
            approach_m = approach.length_m,
            candidates = enumeration.candidates.len(),
            score = selection.score,
            junctions = junction_labels.len() - 1,
            "loop planned"
        );

        Ok(Plan {
            actual_length_m: winner.length_m + 2.0 * approach.length_m,
            junction_labels,
            junction_coords,
            approach_polyline: approach.polyline,
            loop_polyline,
            wind,
            search_radius_m: radius_m,
        })
    }
}
