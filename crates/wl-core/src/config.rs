//! Planner configuration.
//!
//! All knobs of the loop search live here with their documented defaults.
//! The struct is plain data: applications may load it from TOML/JSON via the
//! `serde` feature and pass it to the planner.  No environment variables are
//! consulted anywhere in the workspace.

use std::time::Duration;

use crate::error::{CoreError, CoreResult};

/// Tunable parameters of the loop-finding engine.
///
/// | Field                 | Default | Effect                                          |
/// |-----------------------|---------|-------------------------------------------------|
/// | `tolerance`           | 0.15    | Accepted band `[T·(1−τ), T·(1+τ)]` around target|
/// | `max_depth`           | 15      | Maximum intermediate junctions per loop         |
/// | `time_budget`         | 30 s    | Wall-clock cap on enumeration                   |
/// | `candidate_cap`       | 500     | Hard limit on stored candidates                 |
/// | `kappa`               | 0.6     | Strength of the wind effect in the effort model |
/// | `v_ref_mps`           | 10.0    | Reference wind speed for effort clipping        |
/// | `alpha`               | 2.0     | Weight of distance fit in candidate scoring     |
/// | `return_prune_factor` | 0.7     | Straight-line-to-network under-approximation    |
/// | `min_loop_edges`      | 3       | Smallest acceptable loop, in junction edges     |
/// | `approach_max_m`      | 5000    | Network-distance cap user coord → start junction|
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlannerConfig {
    pub tolerance: f64,
    pub max_depth: usize,
    pub time_budget: Duration,
    pub candidate_cap: usize,
    pub kappa: f64,
    pub v_ref_mps: f64,
    pub alpha: f64,
    pub return_prune_factor: f64,
    pub min_loop_edges: usize,
    pub approach_max_m: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            tolerance: 0.15,
            max_depth: 15,
            time_budget: Duration::from_secs(30),
            candidate_cap: 500,
            kappa: 0.6,
            v_ref_mps: 10.0,
            alpha: 2.0,
            return_prune_factor: 0.7,
            min_loop_edges: 3,
            approach_max_m: 5_000.0,
        }
    }
}

impl PlannerConfig {
    /// Reject out-of-range knob values before any work is done.
    ///
    /// `tolerance` must lie in [0, 1): a tolerance of 0 is legal (exact-match
    /// loops only) but 1 or more would accept zero-length loops.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.tolerance.is_finite() || !(0.0..1.0).contains(&self.tolerance) {
            return Err(CoreError::Config(format!(
                "tolerance {} outside [0, 1)",
                self.tolerance
            )));
        }
        if self.v_ref_mps <= 0.0 {
            return Err(CoreError::Config(format!(
                "v_ref_mps {} must be positive",
                self.v_ref_mps
            )));
        }
        if !(0.0..=1.0).contains(&self.return_prune_factor) {
            return Err(CoreError::Config(format!(
                "return_prune_factor {} outside [0, 1]",
                self.return_prune_factor
            )));
        }
        if self.min_loop_edges < 3 {
            return Err(CoreError::Config(format!(
                "min_loop_edges {} below 3; a cycle needs at least 3 edges",
                self.min_loop_edges
            )));
        }
        if self.approach_max_m <= 0.0 {
            return Err(CoreError::Config(format!(
                "approach_max_m {} must be positive",
                self.approach_max_m
            )));
        }
        Ok(())
    }
}
