//! The network loader seam.
//!
//! The planner is agnostic to where street data comes from: an Overpass API
//! client, a tile cache, a test fixture.  A loader yields the raw nodes and
//! ways of a circular region; everything downstream ([`FullNetwork`],
//! [`JunctionGraph`]) is derived inside this workspace.
//!
//! [`FullNetwork`]: crate::network::FullNetwork
//! [`JunctionGraph`]: crate::junction::JunctionGraph

use wl_core::Coordinate;

use crate::error::SpatialResult;

// ── Raw data shapes ───────────────────────────────────────────────────────────

/// A node as delivered by the network source, keyed by its external ID.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawNode {
    /// Source identifier (e.g. an OSM node ID).  Unique within one fetch.
    pub id: i64,
    pub coord: Coordinate,
    /// The short public label of a signed junction ("32", "75", …), or
    /// `None` for an ordinary way node.
    pub junction_ref: Option<String>,
}

/// An ordered run of node references forming a street or path.
///
/// Ways are split into single-segment edges at graph build time; a way with
/// n nodes contributes n−1 undirected segments.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawWay {
    pub nodes: Vec<i64>,
}

/// Everything a loader returns for one region query.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawNetwork {
    pub nodes: Vec<RawNode>,
    pub ways: Vec<RawWay>,
}

impl RawNetwork {
    /// Number of nodes carrying a junction label.
    pub fn junction_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.junction_ref.is_some()).count()
    }
}

// ── NetworkLoader ─────────────────────────────────────────────────────────────

/// Pluggable source of raw street data.
///
/// # Failure contract
///
/// A transient source failure maps to [`SpatialError::Unavailable`], which
/// callers may retry; the planner itself never retries.  A region with no
/// junctions is not the loader's concern: the planner detects it after the
/// fetch and fails the request with [`SpatialError::Empty`].
///
/// # Thread safety
///
/// Implementations must be `Send + Sync`; one loader instance serves
/// concurrent, independent requests.
///
/// [`SpatialError::Unavailable`]: crate::error::SpatialError::Unavailable
/// [`SpatialError::Empty`]: crate::error::SpatialError::Empty
pub trait NetworkLoader: Send + Sync {
    /// Fetch the raw nodes and ways within `radius_m` of `centre`.
    fn fetch(&self, centre: Coordinate, radius_m: f64) -> SpatialResult<RawNetwork>;
}

// ── StaticLoader ──────────────────────────────────────────────────────────────

/// An in-memory loader over a fixed data set.
///
/// `fetch` returns the nodes within the requested radius and all ways; way
/// segments whose endpoints fall outside the radius are dropped later during
/// graph construction.  Used by tests and by applications that assemble
/// their region data up front.
#[derive(Clone, Debug, Default)]
pub struct StaticLoader {
    data: RawNetwork,
}

impl StaticLoader {
    pub fn new(data: RawNetwork) -> Self {
        Self { data }
    }
}

impl NetworkLoader for StaticLoader {
    fn fetch(&self, centre: Coordinate, radius_m: f64) -> SpatialResult<RawNetwork> {
        let nodes: Vec<RawNode> = self
            .data
            .nodes
            .iter()
            .filter(|n| centre.distance_m(n.coord) <= radius_m)
            .cloned()
            .collect();
        Ok(RawNetwork {
            nodes,
            ways: self.data.ways.clone(),
        })
    }
}
