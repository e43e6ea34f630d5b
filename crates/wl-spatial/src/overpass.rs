//! Overpass JSON parsing — enabled with the `overpass` Cargo feature.
//!
//! # Usage
//!
//! ```ignore
//! use wl_spatial::overpass::parse_overpass_json;
//!
//! let raw = parse_overpass_json(&response_body)?;
//! let loader = StaticLoader::new(raw);
//! ```
//!
//! # What is parsed
//!
//! The Overpass response for a junction-network query: `node` elements
//! (junction nodes tagged `rcn_ref`, plus untagged way nodes from the
//! skeleton output) and `way` elements with their node references.  All
//! other element types (relations, areas) are ignored.  Fetching the data
//! over HTTP and caching it on disk are the caller's concern; this module
//! only understands the wire shape.

use std::collections::HashMap;

use serde::Deserialize;

use wl_core::Coordinate;

use crate::error::{SpatialError, SpatialResult};
use crate::loader::{RawNetwork, RawNode, RawWay};

// ── Wire shapes ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct Response {
    #[serde(default)]
    elements: Vec<Element>,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum Element {
    Node {
        id: i64,
        lat: f64,
        lon: f64,
        #[serde(default)]
        tags: HashMap<String, String>,
    },
    Way {
        #[serde(default)]
        nodes: Vec<i64>,
    },
    #[serde(other)]
    Other,
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Parse an Overpass API JSON response into a [`RawNetwork`].
///
/// Duplicate node elements are merged: the Overpass query emits junction
/// nodes once with tags (`out body`) and again without (`out skel`), so a
/// later duplicate never erases an earlier junction label.
///
/// # Errors
///
/// [`SpatialError::Parse`] when the body is not valid Overpass JSON.
pub fn parse_overpass_json(body: &str) -> SpatialResult<RawNetwork> {
    let response: Response =
        serde_json::from_str(body).map_err(|e| SpatialError::Parse(e.to_string()))?;

    let mut nodes: HashMap<i64, RawNode> = HashMap::new();
    let mut ways: Vec<RawWay> = Vec::new();

    for element in response.elements {
        match element {
            Element::Node { id, lat, lon, tags } => {
                let junction_ref = tags
                    .get("rcn_ref")
                    .map(|s| s.trim())
                    .filter(|s| !s.is_empty())
                    .map(str::to_owned);
                match nodes.get_mut(&id) {
                    Some(existing) => {
                        if existing.junction_ref.is_none() {
                            existing.junction_ref = junction_ref;
                        }
                    }
                    None => {
                        nodes.insert(
                            id,
                            RawNode {
                                id,
                                coord: Coordinate::new(lat, lon),
                                junction_ref,
                            },
                        );
                    }
                }
            }
            Element::Way { nodes: refs } => {
                if refs.len() >= 2 {
                    ways.push(RawWay { nodes: refs });
                }
            }
            Element::Other => {}
        }
    }

    let mut nodes: Vec<RawNode> = nodes.into_values().collect();
    // HashMap iteration order is arbitrary; sort for reproducible NodeIds.
    nodes.sort_unstable_by_key(|n| n.id);

    Ok(RawNetwork { nodes, ways })
}
