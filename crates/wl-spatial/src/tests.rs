//! Unit tests for wl-spatial.
//!
//! All tests use hand-crafted raw networks placed at the equator, where
//! degree offsets convert cleanly to metres and cardinal bearings are
//! exact.

#[cfg(test)]
mod helpers {
    use wl_core::Coordinate;

    use crate::loader::{RawNetwork, RawNode, RawWay};
    use crate::network::FullNetwork;

    /// Kilometres → degrees of arc on the spherical model.
    pub fn deg(km: f64) -> f64 {
        km / 111.194_926_644_558_74
    }

    pub fn raw_node(id: i64, lat: f64, lon: f64, junction: Option<&str>) -> RawNode {
        RawNode {
            id,
            coord: Coordinate::new(lat, lon),
            junction_ref: junction.map(str::to_owned),
        }
    }

    /// Two junctions joined by a 3-segment corridor along the equator:
    ///
    /// ```text
    /// "10" ── m1 ── m2 ── "20"      (1 km per segment)
    /// ```
    pub fn corridor_raw() -> RawNetwork {
        RawNetwork {
            nodes: vec![
                raw_node(100, 0.0, 0.0, Some("10")),
                raw_node(101, 0.0, deg(1.0), None),
                raw_node(102, 0.0, deg(2.0), None),
                raw_node(103, 0.0, deg(3.0), Some("20")),
            ],
            ways: vec![RawWay {
                nodes: vec![100, 101, 102, 103],
            }],
        }
    }

    /// Three junctions on a line; the corridor "1"–"3" must not exist
    /// because "2" sits between them.
    pub fn tee_raw() -> RawNetwork {
        RawNetwork {
            nodes: vec![
                raw_node(1, 0.0, 0.0, Some("1")),
                raw_node(2, 0.0, deg(1.0), Some("2")),
                raw_node(3, 0.0, deg(2.0), Some("3")),
            ],
            ways: vec![
                RawWay { nodes: vec![1, 2] },
                RawWay { nodes: vec![2, 3] },
            ],
        }
    }

    /// Two junctions joined by two distinct corridors: a straight 2 km one
    /// and a detour of roughly 3.3 km through a node off the axis.
    pub fn parallel_raw() -> RawNetwork {
        RawNetwork {
            nodes: vec![
                raw_node(1, 0.0, 0.0, Some("1")),
                raw_node(2, 0.0, deg(2.0), Some("2")),
                raw_node(10, 0.0, deg(1.0), None),        // on the straight
                raw_node(11, deg(1.3), deg(1.0), None),   // the detour
            ],
            ways: vec![
                RawWay { nodes: vec![1, 10, 2] },
                RawWay { nodes: vec![1, 11, 2] },
            ],
        }
    }

    /// Junction "10", a plain middle node, junction "20", 1 km spacing.
    /// Internal node ids are 0, 1, 2 in that order.
    pub fn line_raw() -> RawNetwork {
        RawNetwork {
            nodes: vec![
                raw_node(1, 0.0, 0.0, Some("10")),
                raw_node(2, 0.0, deg(1.0), None),
                raw_node(3, 0.0, deg(2.0), Some("20")),
            ],
            ways: vec![RawWay { nodes: vec![1, 2, 3] }],
        }
    }

    pub fn build(raw: &RawNetwork) -> FullNetwork {
        FullNetwork::from_raw(raw)
    }
}

// ── Network construction ──────────────────────────────────────────────────────

#[cfg(test)]
mod construction {
    use wl_core::NodeId;

    use super::helpers::{build, corridor_raw, deg, line_raw, raw_node};
    use crate::loader::{RawNetwork, RawWay};
    use crate::network::FullNetwork;

    #[test]
    fn empty_raw_gives_empty_network() {
        let net = FullNetwork::from_raw(&RawNetwork::default());
        assert_eq!(net.node_count(), 0);
        assert_eq!(net.edge_count(), 0);
        assert!(net.is_empty());
    }

    #[test]
    fn segment_stored_both_directions() {
        let net = build(&line_raw());
        assert_eq!(net.edge_count(), 4); // 2 segments, both directions

        let (a, m) = (NodeId(0), NodeId(1));
        let out = net.edges_from(a).next().unwrap();
        assert_eq!(net.edge_to[out.index()], m);
        let back = net
            .edges_from(m)
            .find(|&e| net.edge_to[e.index()] == a)
            .unwrap();
        assert_eq!(net.edge_length_m[out.index()], net.edge_length_m[back.index()]);

        // Opposite bearings: east out, west back.
        assert!((net.edge_bearing_deg[out.index()] - 90.0).abs() < 1e-6);
        assert!((net.edge_bearing_deg[back.index()] - 270.0).abs() < 1e-6);
    }

    #[test]
    fn zero_length_segment_dropped() {
        let raw = RawNetwork {
            nodes: vec![
                raw_node(1, 0.0, 0.0, None),
                raw_node(2, 0.0, 0.0, None), // coincident twin
            ],
            ways: vec![RawWay { nodes: vec![1, 2] }],
        };
        let net = FullNetwork::from_raw(&raw);
        assert_eq!(net.node_count(), 2);
        assert_eq!(net.edge_count(), 0);
        assert_eq!(net.degree(NodeId(0)), 0);
    }

    #[test]
    fn dangling_way_refs_dropped() {
        let raw = RawNetwork {
            nodes: vec![
                raw_node(1, 0.0, 0.0, Some("1")),
                raw_node(2, 0.0, deg(1.0), None),
            ],
            ways: vec![RawWay {
                nodes: vec![1, 2, 999], // 999 was never delivered
            }],
        };
        let net = FullNetwork::from_raw(&raw);
        assert_eq!(net.node_count(), 2);
        assert_eq!(net.edge_count(), 2); // only the 1–2 segment survives
    }

    #[test]
    fn duplicate_node_keeps_junction_label() {
        // Skeleton output re-delivers node 100 without tags; the label from
        // the first delivery must survive. A tagged duplicate of an untagged
        // first copy must also win.
        let raw = RawNetwork {
            nodes: vec![
                raw_node(100, 0.0, 0.0, Some("10")),
                raw_node(100, 0.0, 0.0, None),
                raw_node(200, 0.0, deg(1.0), None),
                raw_node(200, 0.0, deg(1.0), Some("20")),
            ],
            ways: vec![RawWay {
                nodes: vec![100, 200],
            }],
        };
        let net = FullNetwork::from_raw(&raw);
        assert_eq!(net.node_count(), 2);
        assert_eq!(net.junction_count(), 2);
    }

    #[test]
    fn junction_flags_from_raw() {
        let net = build(&corridor_raw());
        assert_eq!(net.node_count(), 4);
        assert_eq!(net.junction_count(), 2);
        assert_eq!(net.edge_count(), 6); // 3 segments, both directions

        let first = NodeId(0);
        assert!(net.is_junction(first));
        assert_eq!(net.junction_label(first), Some("10"));
        assert!(!net.is_junction(NodeId(1)));
        // Interior corridor nodes have degree 2, endpoints 1.
        assert_eq!(net.degree(first), 1);
        assert_eq!(net.degree(NodeId(1)), 2);
    }

    #[test]
    fn edges_grouped_by_source() {
        let net = build(&corridor_raw());
        for node in 0..net.node_count() {
            for e in net.edges_from(NodeId(node as u32)) {
                assert_eq!(net.edge_from[e.index()], NodeId(node as u32));
            }
        }
    }
}

// ── Spatial snap ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod snap {
    use wl_core::{Coordinate, NodeId};

    use super::helpers::{build, deg, line_raw};
    use crate::loader::RawNetwork;
    use crate::network::FullNetwork;

    #[test]
    fn snap_exact_position() {
        let net = build(&line_raw());
        let snapped = net.nearest_node(Coordinate::new(0.0, 0.0)).unwrap();
        assert_eq!(snapped, NodeId(0));
    }

    #[test]
    fn snap_nearest() {
        let net = build(&line_raw());
        let near_a = net.nearest_node(Coordinate::new(0.0, deg(0.4))).unwrap();
        assert_eq!(near_a, NodeId(0));
        let near_m = net.nearest_node(Coordinate::new(0.0, deg(0.6))).unwrap();
        assert_eq!(near_m, NodeId(1));
    }

    #[test]
    fn empty_network_returns_none() {
        let net = FullNetwork::from_raw(&RawNetwork::default());
        assert!(net.nearest_node(Coordinate::new(0.0, 0.0)).is_none());
    }
}

// ── Junction graph condensation ───────────────────────────────────────────────

#[cfg(test)]
mod junction_graph {
    use wl_core::JunctionId;

    use super::helpers::{build, corridor_raw, parallel_raw, tee_raw};
    use crate::junction::JunctionGraph;

    #[test]
    fn corridor_condenses_to_one_edge() {
        let full = build(&corridor_raw());
        let jg = JunctionGraph::build(&full);

        assert_eq!(jg.junction_count(), 2);
        assert_eq!(jg.edge_count(), 1);
        assert_eq!(jg.edge_path[0].len(), 3);

        // ~3 km of corridor
        assert!((jg.edge_length_m[0] - 3_000.0).abs() < 3.0);
        jg.validate(&full).unwrap();
    }

    #[test]
    fn no_corridor_through_a_junction() {
        let full = build(&tee_raw());
        let jg = JunctionGraph::build(&full);

        assert_eq!(jg.junction_count(), 3);
        // Only 1–2 and 2–3; never 1–3 straight through junction 2.
        assert_eq!(jg.edge_count(), 2);
        let one = JunctionId(0);
        let three = JunctionId(2);
        assert!(jg.edge_between(one, three).is_none());
    }

    #[test]
    fn shorter_of_parallel_corridors_wins() {
        let full = build(&parallel_raw());
        let jg = JunctionGraph::build(&full);

        assert_eq!(jg.edge_count(), 1);
        // The straight 2 km corridor beats the ~3.3 km detour.
        assert!((jg.edge_length_m[0] - 2_000.0).abs() < 3.0);
        jg.validate(&full).unwrap();
    }

    #[test]
    fn representative_bearing_is_straight_line() {
        let full = build(&parallel_raw());
        let jg = JunctionGraph::build(&full);
        // Junction "1" sits due west of "2": the edge bearing is east.
        assert!((jg.edge_bearing_deg[0] - 90.0).abs() < 1e-6);
    }

    #[test]
    fn average_degree() {
        let full = build(&tee_raw());
        let jg = JunctionGraph::build(&full);
        // 3 junctions, 2 edges: degrees 1, 2, 1.
        assert!((jg.average_degree() - 4.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn corridor_coords_orientation() {
        let full = build(&corridor_raw());
        let jg = JunctionGraph::build(&full);

        let a = jg.edge_a[0];
        let b = jg.edge_b[0];

        let fwd = jg.corridor_coords(wl_core::JunctionEdgeId(0), a, &full);
        assert_eq!(fwd.len(), 4);
        assert_eq!(fwd[0], jg.junction_coord[a.index()]);
        assert_eq!(fwd[3], jg.junction_coord[b.index()]);

        let rev = jg.corridor_coords(wl_core::JunctionEdgeId(0), b, &full);
        assert_eq!(rev[0], jg.junction_coord[b.index()]);
        assert_eq!(rev[3], jg.junction_coord[a.index()]);
    }

    #[test]
    fn expansion_reproduces_length() {
        let full = build(&corridor_raw());
        let jg = JunctionGraph::build(&full);

        let coords = jg.corridor_coords(wl_core::JunctionEdgeId(0), jg.edge_a[0], &full);
        let resum: f64 = coords.windows(2).map(|w| w[0].distance_m(w[1])).sum();
        let stored = jg.edge_length_m[0];
        assert!(
            (resum - stored).abs() <= stored * 0.001,
            "stored {stored}, re-measured {resum}"
        );
    }
}

// ── Approach path ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod approach {
    use wl_core::{Coordinate, NodeId};

    use super::helpers::{build, deg, line_raw, raw_node};
    use crate::approach::find_approach;
    use crate::error::SpatialError;
    use crate::junction::JunctionGraph;
    use crate::loader::{RawNetwork, RawWay};
    use crate::network::FullNetwork;

    #[test]
    fn snap_onto_junction_is_trivial() {
        let full = build(&line_raw());
        let jg = JunctionGraph::build(&full);
        let path = find_approach(&full, &jg, Coordinate::new(0.0, 0.0), 5_000.0).unwrap();
        assert_eq!(path.length_m, 0.0);
        assert_eq!(path.polyline.len(), 1);
        assert_eq!(jg.junction_label[path.start_junction.index()], "10");
    }

    #[test]
    fn nearest_junction_by_network_distance() {
        let full = build(&line_raw());
        let jg = JunctionGraph::build(&full);

        // Just north of the middle node but a shade closer to "10"'s side.
        let origin = Coordinate::new(deg(0.05), deg(0.9));
        let path = find_approach(&full, &jg, origin, 5_000.0).unwrap();

        assert_eq!(jg.junction_label[path.start_junction.index()], "10");
        assert_eq!(path.polyline[0], full.node_coord[NodeId(1).index()]);
        assert!((path.length_m - 1_000.0).abs() < 2.0);
    }

    #[test]
    fn unreachable_beyond_limit() {
        let full = build(&line_raw());
        let jg = JunctionGraph::build(&full);
        let origin = Coordinate::new(deg(0.05), deg(1.0));
        let result = find_approach(&full, &jg, origin, 500.0);
        assert!(matches!(
            result,
            Err(SpatialError::StartUnreachable { .. })
        ));
    }

    #[test]
    fn empty_network_is_empty_error() {
        let full = FullNetwork::from_raw(&RawNetwork::default());
        let jg = JunctionGraph::build(&full);
        let result = find_approach(&full, &jg, Coordinate::new(0.0, 0.0), 5_000.0);
        assert!(matches!(result, Err(SpatialError::Empty(_))));
    }

    #[test]
    fn disconnected_island_is_unreachable() {
        let raw = RawNetwork {
            nodes: vec![
                raw_node(1, 0.0, 0.0, Some("10")),
                raw_node(2, 0.0, deg(1.0), Some("20")),
                // An isolated pair far away, no way to the junctions.
                raw_node(50, deg(40.0), 0.0, None),
                raw_node(51, deg(40.0), deg(0.5), None),
            ],
            ways: vec![
                RawWay { nodes: vec![1, 2] },
                RawWay { nodes: vec![50, 51] },
            ],
        };
        let full = FullNetwork::from_raw(&raw);
        let jg = JunctionGraph::build(&full);

        let origin = Coordinate::new(deg(40.0), 0.0); // snaps onto the island
        let result = find_approach(&full, &jg, origin, 5_000.0);
        assert!(matches!(
            result,
            Err(SpatialError::StartUnreachable { .. })
        ));
    }
}

// ── Overpass parsing ──────────────────────────────────────────────────────────

#[cfg(all(test, feature = "overpass"))]
mod overpass {
    use crate::overpass::parse_overpass_json;

    const BODY: &str = r#"{
        "elements": [
            {"type": "node", "id": 7, "lat": 50.8, "lon": 3.2,
             "tags": {"rcn_ref": "32"}},
            {"type": "node", "id": 8, "lat": 50.81, "lon": 3.21},
            {"type": "node", "id": 7, "lat": 50.8, "lon": 3.2},
            {"type": "way", "id": 55, "nodes": [7, 8]},
            {"type": "relation", "id": 99}
        ]
    }"#;

    #[test]
    fn parses_nodes_and_ways() {
        let raw = parse_overpass_json(BODY).unwrap();
        assert_eq!(raw.nodes.len(), 2);
        assert_eq!(raw.ways.len(), 1);
        assert_eq!(raw.junction_count(), 1);

        let junction = raw.nodes.iter().find(|n| n.id == 7).unwrap();
        assert_eq!(junction.junction_ref.as_deref(), Some("32"));
    }

    #[test]
    fn skeleton_duplicate_keeps_tag() {
        // Node 7 appears twice, the second time without tags; the junction
        // label must survive the merge.
        let raw = parse_overpass_json(BODY).unwrap();
        assert_eq!(raw.junction_count(), 1);
    }

    #[test]
    fn invalid_json_is_parse_error() {
        assert!(parse_overpass_json("not json").is_err());
    }

    #[test]
    fn degenerate_way_dropped() {
        let body = r#"{"elements": [{"type": "way", "id": 1, "nodes": [5]}]}"#;
        let raw = parse_overpass_json(body).unwrap();
        assert!(raw.ways.is_empty());
    }
}
