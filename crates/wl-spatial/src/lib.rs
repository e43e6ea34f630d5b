//! `wl-spatial` — street network, junction condensation, and spatial queries.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`loader`]   | `NetworkLoader` trait, `RawNetwork`, `StaticLoader`       |
//! | [`network`]  | `FullNetwork`: grouped edge arrays plus a snap index      |
//! | [`junction`] | `JunctionGraph` and its condensing builder                |
//! | [`approach`] | Shortest path from a coordinate to the nearest junction   |
//! | [`overpass`] | Overpass JSON parsing (feature = `"overpass"` only)       |
//! | [`error`]    | `SpatialError`, `SpatialResult<T>`                        |
//!
//! # Two-level graph
//!
//! The full network is the raw street-level graph: every way node is a
//! graph node, every way segment a pair of directed edges.  The junction
//! graph condenses it to signed junctions joined by junction-free corridors;
//! the loop search runs on the condensed graph and expands the winner back
//! through the full one.
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `overpass` | Enables parsing of Overpass API JSON via `serde_json`.    |
//! | `serde`    | Derives `Serialize`/`Deserialize` on public value types.  |

pub mod approach;
pub mod error;
pub mod junction;
pub mod loader;
pub mod network;

#[cfg(feature = "overpass")]
pub mod overpass;

#[cfg(test)]
mod tests;

pub use approach::{find_approach, ApproachPath};
pub use error::{SpatialError, SpatialResult};
pub use junction::JunctionGraph;
pub use loader::{NetworkLoader, RawNetwork, RawNode, RawWay, StaticLoader};
pub use network::FullNetwork;
