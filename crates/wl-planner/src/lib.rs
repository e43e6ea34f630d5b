//! `wl-planner` — the request orchestrator for the windloop engine.
//!
//! # One call
//!
//! [`LoopPlanner::plan_loop`] sequences the whole pipeline for a single
//! request:
//!
//! ```text
//! fetch raw region        (NetworkLoader, radius from target distance)
//!   → full street graph   (FullNetwork::from_raw)
//!   → junction graph      (JunctionGraph::build)
//!   → wind annotation     (EffortTable::annotate)
//!   → approach path       (find_approach: rider coordinate → start junction)
//!   → loop enumeration    (enumerate_loops, budgeted DFS)
//!   → selection           (select_best)
//!   → geometry            (expand_cycle → closed polyline)
//! ```
//!
//! The planner is synchronous and holds no mutable state between requests;
//! one instance may serve concurrent requests from independent threads.
//!
//! # Example
//!
//! ```rust,ignore
//! use wl_core::{Coordinate, WindVector};
//! use wl_planner::LoopPlanner;
//! use wl_spatial::StaticLoader;
//!
//! let planner = LoopPlanner::new(StaticLoader::new(region));
//! let plan = planner.plan_loop(
//!     Coordinate::new(50.873, 3.187),
//!     45_000.0,
//!     WindVector::new(6.2, 240.0),
//! )?;
//! println!("{} km via {:?}", plan.actual_length_m / 1000.0, plan.junction_labels);
//! ```

pub mod error;
pub mod expand;
pub mod plan;
pub mod planner;


pub use error::{PlanError, PlanResult};
pub use expand::expand_cycle;
pub use plan::Plan;
pub use planner::LoopPlanner;
