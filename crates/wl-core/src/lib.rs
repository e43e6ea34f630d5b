//! `wl-core` — foundational types for the `windloop` route planner.
//!
//! This crate is a dependency of every other `wl-*` crate.  It intentionally
//! has no `wl-*` dependencies and minimal external ones (only `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`ids`]    | `NodeId`, `EdgeId`, `JunctionId`, `JunctionEdgeId`        |
//! | [`geo`]    | `Coordinate`, haversine distance, bearings                |
//! | [`wind`]   | `WindVector`, `WindProvider`                              |
//! | [`config`] | `PlannerConfig`                                           |
//! | [`error`]  | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod wind;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::PlannerConfig;
pub use error::{CoreError, CoreResult};
pub use geo::{angle_diff_deg, normalize_deg, Coordinate, EARTH_RADIUS_M};
pub use ids::{EdgeId, JunctionEdgeId, JunctionId, NodeId};
pub use wind::{FixedWind, WindProvider, WindVector};
