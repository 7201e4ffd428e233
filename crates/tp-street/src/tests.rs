//! Unit tests for tp-street.
//!
//! All tests use hand-crafted graphs so they run without any input files.

#[cfg(test)]
mod helpers {
    use tp_core::{EdgeId, GeoPoint, VertexId};
    use crate::{GraphBuilder, StreetGraph};

    /// A small one-way loop plus a shortcut.
    ///
    /// Vertices (lat, lon):
    ///   a:(0,0)  b:(0,0.001)  c:(0.001,0.001)  d:(0.001,0)
    ///
    /// Edges, in insertion order:
    ///   e0 a→b, e1 b→c, e2 c→d, e3 d→a, e4 a→c, e5 b→a
    pub fn square() -> (StreetGraph, [VertexId; 4], [EdgeId; 6]) {
        let mut b = GraphBuilder::new();
        let a = b.add_vertex("a", GeoPoint::new(0.0, 0.0)).unwrap();
        let bv = b.add_vertex("b", GeoPoint::new(0.0, 0.001)).unwrap();
        let c = b.add_vertex("c", GeoPoint::new(0.001, 0.001)).unwrap();
        let d = b.add_vertex("d", GeoPoint::new(0.001, 0.0)).unwrap();

        let e0 = b.add_edge(crate::EdgeSpec::new(a, bv, 111.0)).unwrap();
        let e1 = b.add_edge(crate::EdgeSpec::new(bv, c, 111.0)).unwrap();
        let e2 = b.add_edge(crate::EdgeSpec::new(c, d, 111.0)).unwrap();
        let e3 = b.add_edge(crate::EdgeSpec::new(d, a, 111.0)).unwrap();
        let e4 = b.add_edge(crate::EdgeSpec::new(a, c, 157.0)).unwrap();
        let e5 = b.add_edge(crate::EdgeSpec::new(bv, a, 111.0)).unwrap();

        (b.build(), [a, bv, c, d], [e0, e1, e2, e3, e4, e5])
    }
}

// ── Builder & graph structure ─────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use tp_core::{GeoPoint, StreetTraversalPermission, TraverseMode, VertexId};
    use crate::{EdgeSpec, GraphBuilder, StreetError};

    #[test]
    fn empty_build() {
        let g = GraphBuilder::new().build();
        assert_eq!(g.vertex_count(), 0);
        assert_eq!(g.edge_count(), 0);
        assert!(g.is_empty());
        assert!(g.validate().is_empty());
    }

    #[test]
    fn duplicate_label_rejected() {
        let mut b = GraphBuilder::new();
        b.add_vertex("x", GeoPoint::new(1.0, 1.0)).unwrap();
        let err = b.add_vertex("x", GeoPoint::new(2.0, 2.0)).unwrap_err();
        assert!(matches!(err, StreetError::DuplicateVertex(ref l) if l == "x"));
        assert_eq!(b.vertex_count(), 1);
    }

    #[test]
    fn invalid_coordinate_rejected() {
        let mut b = GraphBuilder::new();
        assert!(matches!(
            b.add_vertex("x", GeoPoint::new(f64::NAN, 0.0)),
            Err(StreetError::Core(_))
        ));
    }

    #[test]
    fn edge_requires_existing_endpoints() {
        let mut b = GraphBuilder::new();
        let a = b.add_vertex("a", GeoPoint::new(0.0, 0.0)).unwrap();
        let err = b.add_edge(EdgeSpec::new(a, VertexId(9), 10.0)).unwrap_err();
        assert!(matches!(err, StreetError::UnknownVertex(VertexId(9))));
        assert_eq!(b.edge_count(), 0);
    }

    #[test]
    fn default_name_and_geometry() {
        let mut b = GraphBuilder::new();
        let a = b.add_vertex("a", GeoPoint::new(0.0, 0.0)).unwrap();
        let c = b.add_vertex("c", GeoPoint::new(0.0, 1.0)).unwrap();
        let e = b.add_edge(EdgeSpec::new(a, c, 10.0)).unwrap();
        let g = b.build();
        assert_eq!(g.edge(e).name, "a_c");
        assert_eq!(g.edge(e).geometry, vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0)]);
        assert_eq!(g.edge(e).permission, StreetTraversalPermission::ALL);
    }

    #[test]
    fn street_adds_both_directions() {
        let mut b = GraphBuilder::new();
        let a = b.add_vertex("a", GeoPoint::new(0.0, 0.0)).unwrap();
        let c = b.add_vertex("c", GeoPoint::new(0.0, 1.0)).unwrap();
        let (fwd, bwd) = b.add_street(a, c, 10.0).unwrap();
        let g = b.build();
        assert_eq!(g.edge(fwd).from, a);
        assert_eq!(g.edge(bwd).from, c);
        assert_eq!(g.edge_between(c, a), Some(bwd));
    }

    #[test]
    fn heuristic_bounds_collected() {
        let mut b = GraphBuilder::new();
        let a = b.add_vertex("a", GeoPoint::new(0.0, 0.0)).unwrap();
        let c = b.add_vertex("c", GeoPoint::new(0.0, 1.0)).unwrap();
        b.add_edge(EdgeSpec::new(a, c, 10.0).with_speed(TraverseMode::Car, 20.0)).unwrap();
        b.add_edge(EdgeSpec::new(c, a, 10.0).with_speed(TraverseMode::Car, 30.0).with_reluctance(0.5))
            .unwrap();
        let g = b.build();
        assert_eq!(g.max_speed_override(TraverseMode::Car), Some(30.0));
        assert_eq!(g.max_speed_override(TraverseMode::Walk), None);
        assert_eq!(g.min_edge_reluctance(), 0.5);
        // 10 m stored for ~111 km of great-circle distance.
        assert!(g.min_length_ratio() < 1e-3);
        assert!(g.min_length_ratio() > 0.0);
    }

    #[test]
    fn find_edge_returns_first_match() {
        let mut b = GraphBuilder::new();
        let a = b.add_vertex("a", GeoPoint::new(0.0, 0.0)).unwrap();
        let c = b.add_vertex("c", GeoPoint::new(0.0, 0.001)).unwrap();
        let first = b.add_edge(EdgeSpec::new(a, c, 10.0)).unwrap();
        b.add_edge(EdgeSpec::new(a, c, 20.0)).unwrap();
        assert_eq!(b.find_edge(a, c), Some(first));
        assert_eq!(b.find_edge(c, a), None);
    }

    #[test]
    fn debug_summarises_graph() {
        let (g, _, _) = super::helpers::square();
        let text = format!("{g:?}");
        assert!(text.starts_with("StreetGraph {"));
        assert!(text.contains("vertices: 4"));
        assert!(text.contains("edges: 6"));
    }

    #[test]
    fn length_ratio_is_capped_at_one() {
        let mut b = GraphBuilder::new();
        let a = b.add_vertex("a", GeoPoint::new(0.0, 0.0)).unwrap();
        let c = b.add_vertex("c", GeoPoint::new(0.0, 0.001)).unwrap();
        b.add_edge(EdgeSpec::new(a, c, 500.0)).unwrap();
        assert_eq!(b.build().min_length_ratio(), 1.0);
    }
}

#[cfg(test)]
mod adjacency {
    #[test]
    fn outgoing_in_insertion_order() {
        let (g, [a, b, _, _], [e0, e1, _, _, e4, e5]) = super::helpers::square();
        assert_eq!(g.outgoing_edges(a).collect::<Vec<_>>(), [e0, e4]);
        assert_eq!(g.outgoing_edges(b).collect::<Vec<_>>(), [e1, e5]);
        assert_eq!(g.out_degree(a), 2);
    }

    #[test]
    fn incoming_in_insertion_order() {
        let (g, [a, _, c, _], [_, e1, _, e3, e4, e5]) = super::helpers::square();
        assert_eq!(g.incoming_edges(a).collect::<Vec<_>>(), [e3, e5]);
        assert_eq!(g.incoming_edges(c).collect::<Vec<_>>(), [e1, e4]);
    }

    #[test]
    fn iterators_are_restartable() {
        let (g, [a, ..], _) = super::helpers::square();
        let it = g.outgoing_edges(a);
        let first: Vec<_> = it.clone().collect();
        let second: Vec<_> = it.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn every_outgoing_edge_starts_at_vertex() {
        let (g, vertices, _) = super::helpers::square();
        for v in vertices {
            for e in g.outgoing_edges(v) {
                assert_eq!(g.edge(e).from, v);
            }
            for e in g.incoming_edges(v) {
                assert_eq!(g.edge(e).to, v);
            }
        }
    }

    #[test]
    fn label_lookup() {
        let (g, [_, _, c, _], _) = super::helpers::square();
        assert_eq!(g.vertex_by_label("c"), Some(c));
        assert_eq!(g.vertex_by_label("zz"), None);
        assert_eq!(g.vertex(c).label, "c");
    }
}

// ── Permissions ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod permissions {
    use tp_core::{GeoPoint, StreetTraversalPermission as P, TraverseMode, TraverseModeSet};
    use crate::{BarrierKind, EdgeSpec, GraphBuilder};

    #[test]
    fn barrier_removes_car_without_touching_default() {
        let mut b = GraphBuilder::new();
        let a = b.add_vertex("a", GeoPoint::new(0.0, 0.0)).unwrap();
        let post = b.add_vertex("post", GeoPoint::new(0.0, 0.001)).unwrap();
        let c = b.add_vertex("c", GeoPoint::new(0.0, 0.002)).unwrap();
        b.deny_modes(post, BarrierKind::Bollard.denied_modes()).unwrap();
        let into = b.add_edge(EdgeSpec::new(a, post, 100.0)).unwrap();
        let out = b.add_edge(EdgeSpec::new(post, c, 100.0)).unwrap();
        let clear = b.add_edge(EdgeSpec::new(a, c, 200.0)).unwrap();
        let g = b.build();

        for e in [into, out] {
            assert_eq!(g.edge(e).permission, P::ALL, "stored default is untouched");
            assert_eq!(g.effective_permission(e), P::PEDESTRIAN_AND_BICYCLE);
            assert!(!g.edge_allows(e, TraverseMode::Car));
            assert!(g.edge_allows(e, TraverseMode::Walk));
        }
        assert!(g.edge_allows(clear, TraverseMode::Car));
        assert!(g.vertex(post).is_barrier());
    }

    #[test]
    fn both_endpoints_compose() {
        let mut b = GraphBuilder::new();
        let a = b.add_vertex("a", GeoPoint::new(0.0, 0.0)).unwrap();
        let c = b.add_vertex("c", GeoPoint::new(0.0, 0.001)).unwrap();
        b.deny_modes(a, TraverseModeSet::of(TraverseMode::Walk)).unwrap();
        b.deny_modes(c, TraverseModeSet::of(TraverseMode::Car)).unwrap();
        let e = b.add_edge(EdgeSpec::new(a, c, 100.0)).unwrap();
        let g = b.build();
        assert_eq!(g.effective_permission(e), P::BICYCLE);
    }

    #[test]
    fn barrier_tags() {
        assert_eq!(BarrierKind::from_tag("chain"), BarrierKind::Chain);
        assert!(BarrierKind::from_tag("bar").is_motor_vehicle_barrier());
        assert!(BarrierKind::from_tag("gate").denied_modes().is_empty());
    }
}

// ── Turn restrictions ─────────────────────────────────────────────────────────

#[cfg(test)]
mod restrictions {
    use tp_core::{EdgeId, TraverseMode, TraverseModeSet};
    use crate::{turn_allowed, TurnRestriction, ValidityWindow};

    fn car() -> TraverseModeSet {
        TraverseModeSet::of(TraverseMode::Car)
    }

    #[test]
    fn no_turn_forbids_exact_pair_for_mode() {
        let r = [TurnRestriction::no_turn(EdgeId(0), EdgeId(1), car())];
        assert!(!turn_allowed(&r, EdgeId(1), TraverseMode::Car, None));
        assert!(turn_allowed(&r, EdgeId(2), TraverseMode::Car, None));
        assert!(turn_allowed(&r, EdgeId(1), TraverseMode::Walk, None));
    }

    #[test]
    fn only_turn_forbids_everything_else() {
        let r = [TurnRestriction::only_turn(EdgeId(0), EdgeId(1), car())];
        assert!(turn_allowed(&r, EdgeId(1), TraverseMode::Car, None));
        assert!(!turn_allowed(&r, EdgeId(2), TraverseMode::Car, None));
        assert!(turn_allowed(&r, EdgeId(2), TraverseMode::Bicycle, None));
    }

    #[test]
    fn empty_list_allows() {
        assert!(turn_allowed(&[], EdgeId(5), TraverseMode::Car, Some(0)));
    }

    #[test]
    fn window_limits_restriction() {
        // 07:00–09:00
        let r = [TurnRestriction::no_turn(EdgeId(0), EdgeId(1), car())
            .with_window(ValidityWindow::new(7 * 3600, 9 * 3600).unwrap())];
        assert!(!turn_allowed(&r, EdgeId(1), TraverseMode::Car, Some(8 * 3600)));
        assert!(turn_allowed(&r, EdgeId(1), TraverseMode::Car, Some(10 * 3600)));
        // Without a clock the restriction is in force.
        assert!(!turn_allowed(&r, EdgeId(1), TraverseMode::Car, None));
    }

    #[test]
    fn window_wraps_midnight() {
        let w = ValidityWindow::new(22 * 3600, 6 * 3600).unwrap();
        assert!(w.contains(23 * 3600));
        assert!(w.contains(3600));
        assert!(!w.contains(12 * 3600));
        // Times past one day wrap.
        assert!(w.contains(86_400 + 3600));
    }

    #[test]
    fn window_bounds_must_fit_in_a_day() {
        use crate::{StreetError, SECONDS_PER_DAY};
        assert!(ValidityWindow::new(0, SECONDS_PER_DAY - 1).is_ok());
        assert!(matches!(
            ValidityWindow::new(0, SECONDS_PER_DAY),
            Err(StreetError::InvalidWindow { start_secs: 0, end_secs: 86_400 })
        ));
        assert!(ValidityWindow::new(90_000, 3600).is_err());
    }

    #[test]
    fn kind_parsing() {
        use crate::TurnRestrictionType;
        assert_eq!("no_turn".parse::<TurnRestrictionType>().unwrap(), TurnRestrictionType::NoTurn);
        assert_eq!("ONLY".parse::<TurnRestrictionType>().unwrap(), TurnRestrictionType::OnlyTurn);
        assert!("maybe".parse::<TurnRestrictionType>().is_err());
    }
}

// ── Integrity ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod integrity {
    use tp_core::{EdgeId, GeoPoint, TraverseMode, TraverseModeSet};
    use crate::{EdgeSpec, GraphBuilder, IntegrityIssue, StreetError, TurnRestriction};

    #[test]
    fn clean_graph_has_no_issues() {
        let (g, _, _) = super::helpers::square();
        assert!(g.validate().is_empty());
    }

    #[test]
    fn detects_negative_length_and_bad_speed() {
        let mut b = GraphBuilder::new();
        let a = b.add_vertex("a", GeoPoint::new(0.0, 0.0)).unwrap();
        let c = b.add_vertex("c", GeoPoint::new(0.0, 0.001)).unwrap();
        let neg = b.add_edge(EdgeSpec::new(a, c, -5.0)).unwrap();
        let slow = b.add_edge(EdgeSpec::new(c, a, 5.0).with_speed(TraverseMode::Car, 0.0)).unwrap();
        let g = b.build();
        let issues = g.validate();
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0], IntegrityIssue::NegativeLength { edge: neg, length_m: -5.0 });
        assert!(matches!(issues[1], IntegrityIssue::InvalidSpeedOverride { edge, .. } if edge == slow));
        assert_eq!(issues[1].kind(), "InvalidSpeedOverride");
    }

    #[test]
    fn detects_malformed_restrictions() {
        let mut bld = GraphBuilder::new();
        let a = bld.add_vertex("a", GeoPoint::new(0.0, 0.0)).unwrap();
        let b = bld.add_vertex("b", GeoPoint::new(0.0, 0.001)).unwrap();
        let c = bld.add_vertex("c", GeoPoint::new(0.001, 0.001)).unwrap();
        let d = bld.add_vertex("d", GeoPoint::new(0.001, 0.0)).unwrap();
        let e0 = bld.add_edge(EdgeSpec::new(a, b, 1.0)).unwrap();
        let e1 = bld.add_edge(EdgeSpec::new(b, c, 1.0)).unwrap();
        let e2 = bld.add_edge(EdgeSpec::new(c, d, 1.0)).unwrap();

        let car = TraverseModeSet::of(TraverseMode::Car);
        bld.add_turn_restriction(TurnRestriction::no_turn(e0, EdgeId(99), car)).unwrap();
        bld.add_turn_restriction(TurnRestriction::no_turn(e0, e2, car)).unwrap();
        bld.add_turn_restriction(TurnRestriction::no_turn(e0, e1, TraverseModeSet::EMPTY)).unwrap();
        let g = bld.build();

        let issues = g.validate();
        assert_eq!(
            issues,
            vec![
                IntegrityIssue::DanglingRestriction { from: e0, to: EdgeId(99) },
                IntegrityIssue::DisconnectedRestriction { from: e0, to: e2 },
                IntegrityIssue::EmptyRestrictedModes { from: e0, to: e1 },
            ]
        );
        assert!(issues.iter().all(|i| i.edge() == e0));
    }

    #[test]
    fn restriction_needs_existing_from_edge() {
        let mut b = GraphBuilder::new();
        let err = b
            .add_turn_restriction(TurnRestriction::no_turn(
                EdgeId(3),
                EdgeId(4),
                TraverseModeSet::ALL,
            ))
            .unwrap_err();
        assert!(matches!(err, StreetError::UnknownEdge(EdgeId(3))));
    }
}

// ── Spatial snap ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod snap {
    use tp_core::GeoPoint;
    use crate::GraphBuilder;

    #[test]
    fn snap_exact_and_nearest() {
        let (g, [a, b, ..], _) = super::helpers::square();
        assert_eq!(g.nearest_vertex(GeoPoint::new(0.0, 0.0)), Some(a));
        assert_eq!(g.nearest_vertex(GeoPoint::new(0.0, 0.0009)), Some(b));
    }

    #[test]
    fn empty_graph_returns_none() {
        let g = GraphBuilder::new().build();
        assert!(g.nearest_vertex(GeoPoint::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn k_nearest_order() {
        let (g, [a, ..], _) = super::helpers::square();
        let nearest = g.k_nearest_vertices(GeoPoint::new(0.0, 0.0), 3);
        assert_eq!(nearest.len(), 3);
        assert_eq!(nearest[0], a);
    }
}

// ── CSV loader ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use tp_core::{StreetTraversalPermission as P, TraverseMode};
    use crate::{load_graph_dir, load_graph_readers, StreetError, TurnRestrictionType};

    const VERTICES: &str = "\
label,lat,lon,barrier,denied,traffic_signal
a,0.0,0.0,,,false
b,0.0,0.001,bollard,,true
c,0.001,0.001,,walk,
";

    const EDGES: &str = "\
from,to,length_m,permission,name,reluctance,walk_speed,bicycle_speed,car_speed,bidirectional
a,b,100,ALL,ab,,,,12.5,true
b,c,80,PEDESTRIAN_AND_BICYCLE,,2.0,,,,false
";

    const RESTRICTIONS: &str = "\
from,via,to,kind,modes,start_secs,end_secs
a,b,c,only_turn,bicycle,25200,32400
";

    #[test]
    fn loads_vertices_edges_and_restrictions() {
        let g = load_graph_readers(
            Cursor::new(VERTICES),
            Cursor::new(EDGES),
            Some(Cursor::new(RESTRICTIONS)),
        )
        .unwrap();

        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.edge_count(), 3); // a-b both ways + b→c

        let a = g.vertex_by_label("a").unwrap();
        let b = g.vertex_by_label("b").unwrap();
        let c = g.vertex_by_label("c").unwrap();
        assert!(g.vertex(b).traffic_signal);
        assert!(g.vertex(b).denied.contains(TraverseMode::Car));
        assert!(g.vertex(c).denied.contains(TraverseMode::Walk));

        let ab = g.edge_between(a, b).unwrap();
        assert_eq!(g.edge(ab).name, "ab");
        assert_eq!(g.edge(ab).speed_override(TraverseMode::Car), Some(12.5));
        assert_eq!(g.effective_permission(ab), P::PEDESTRIAN_AND_BICYCLE);

        let bc = g.edge_between(b, c).unwrap();
        assert_eq!(g.edge(bc).reluctance, 2.0);

        let r = g.turn_restrictions(ab);
        assert_eq!(r.len(), 1);
        assert_eq!(r[0].kind, TurnRestrictionType::OnlyTurn);
        assert_eq!(r[0].to, bc);
        assert_eq!(r[0].window.map(|w| w.start_secs), Some(25_200));
        assert!(g.validate().is_empty());
    }

    #[test]
    fn unknown_label_is_an_error() {
        let edges = "from,to,length_m\na,zz,10\n";
        let err = load_graph_readers(Cursor::new(VERTICES), Cursor::new(edges), None::<Cursor<&str>>)
            .unwrap_err();
        assert!(matches!(err, StreetError::UnknownLabel(ref l) if l == "zz"));
    }

    #[test]
    fn restriction_without_edge_is_an_error() {
        let restrictions = "from,via,to,kind,modes\nc,b,a,no_turn,car\n";
        let err = load_graph_readers(
            Cursor::new(VERTICES),
            Cursor::new(EDGES),
            Some(Cursor::new(restrictions)),
        )
        .unwrap_err();
        assert!(matches!(err, StreetError::NoSuchEdge { .. }));
    }

    #[test]
    fn window_past_midnight_is_an_error() {
        let restrictions = "from,via,to,kind,modes,start_secs,end_secs\na,b,c,no_turn,car,0,90000\n";
        let err = load_graph_readers(
            Cursor::new(VERTICES),
            Cursor::new(EDGES),
            Some(Cursor::new(restrictions)),
        )
        .unwrap_err();
        assert!(matches!(err, StreetError::InvalidWindow { end_secs: 90_000, .. }));
    }

    #[test]
    fn loads_from_directory() {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::write(dir.path().join("vertices.csv"), VERTICES).unwrap();
        std::fs::write(dir.path().join("edges.csv"), EDGES).unwrap();
        let g = load_graph_dir(dir.path()).unwrap();
        assert_eq!(g.edge_count(), 3);
        assert!(g.edges().all(|(_, e)| e.restrictions.is_empty()));
    }
}
