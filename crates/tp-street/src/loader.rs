//! CSV street-graph loader.
//!
//! Reads an already-translated network (permissions and restrictions
//! attached) from three CSV files.  Tag interpretation belongs to ingestion
//! and never happens here.
//!
//! # `vertices.csv`
//!
//! ```csv
//! label,lat,lon,barrier,denied,traffic_signal
//! maple_1st,2.0,2.0,,,false
//! main_1st,2.0,1.0,bollard,,true
//! ```
//!
//! `barrier` is a `barrier=*` value (see [`BarrierKind`]); `denied` is an
//! explicit mode set such as `walk|bicycle`.  Both are optional.
//!
//! # `edges.csv`
//!
//! ```csv
//! from,to,length_m,permission,name,reluctance,walk_speed,bicycle_speed,car_speed,bidirectional
//! maple_1st,main_1st,50,ALL,,,,,1.0,false
//! ```
//!
//! Only `from`, `to` and `length_m` are required.  `permission` defaults to
//! `ALL`.
//!
//! # `restrictions.csv` (optional)
//!
//! ```csv
//! from,via,to,kind,modes,start_secs,end_secs
//! maple_1st,main_1st,main_2nd,no_turn,car,,
//! ```
//!
//! The from-edge is the first `from → via` edge, the to-edge the first
//! `via → to` edge.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::Deserialize;

use tp_core::{EdgeId, GeoPoint, StreetTraversalPermission, TraverseMode, TraverseModeSet, VertexId};

use crate::barrier::BarrierKind;
use crate::builder::{EdgeSpec, GraphBuilder};
use crate::graph::StreetGraph;
use crate::restriction::{TurnRestriction, TurnRestrictionType, ValidityWindow};
use crate::{StreetError, StreetResult};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct VertexRecord {
    label:          String,
    lat:            f64,
    lon:            f64,
    #[serde(default)]
    barrier:        Option<String>,
    #[serde(default)]
    denied:         Option<String>,
    #[serde(default)]
    traffic_signal: Option<bool>,
}

#[derive(Deserialize)]
struct EdgeRecord {
    from:          String,
    to:            String,
    length_m:      f64,
    #[serde(default)]
    permission:    Option<String>,
    #[serde(default)]
    name:          Option<String>,
    #[serde(default)]
    reluctance:    Option<f64>,
    #[serde(default)]
    walk_speed:    Option<f64>,
    #[serde(default)]
    bicycle_speed: Option<f64>,
    #[serde(default)]
    car_speed:     Option<f64>,
    #[serde(default)]
    bidirectional: Option<bool>,
}

#[derive(Deserialize)]
struct RestrictionRecord {
    from:       String,
    via:        String,
    to:         String,
    kind:       String,
    modes:      String,
    #[serde(default)]
    start_secs: Option<u32>,
    #[serde(default)]
    end_secs:   Option<u32>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load `vertices.csv`, `edges.csv` and, if present, `restrictions.csv` from
/// `dir`.
pub fn load_graph_dir(dir: &Path) -> StreetResult<StreetGraph> {
    let vertices = File::open(dir.join("vertices.csv"))?;
    let edges    = File::open(dir.join("edges.csv"))?;
    let restrictions_path = dir.join("restrictions.csv");
    let restrictions = if restrictions_path.exists() {
        Some(File::open(restrictions_path)?)
    } else {
        None
    };
    load_graph_readers(vertices, edges, restrictions)
}

/// Like [`load_graph_dir`] but accepts any `Read` sources.
///
/// Useful for testing (pass a `std::io::Cursor`).
pub fn load_graph_readers<V: Read, E: Read, R: Read>(
    vertices:     V,
    edges:        E,
    restrictions: Option<R>,
) -> StreetResult<StreetGraph> {
    let mut b = GraphBuilder::new();

    // ── Vertices ──────────────────────────────────────────────────────────
    for row in csv::Reader::from_reader(vertices).deserialize() {
        let rec: VertexRecord = row?;
        let v = b.add_vertex(rec.label, GeoPoint::new(rec.lat, rec.lon))?;

        let mut denied = TraverseModeSet::EMPTY;
        if let Some(tag) = rec.barrier.as_deref().filter(|t| !t.is_empty()) {
            denied = denied.union(BarrierKind::from_tag(tag).denied_modes());
        }
        if let Some(modes) = rec.denied.as_deref() {
            denied = denied.union(modes.parse()?);
        }
        if !denied.is_empty() {
            b.deny_modes(v, denied)?;
        }
        if rec.traffic_signal.unwrap_or(false) {
            b.set_traffic_signal(v, true)?;
        }
    }

    // ── Edges ─────────────────────────────────────────────────────────────
    let mut by_endpoints: FxHashMap<(VertexId, VertexId), EdgeId> = FxHashMap::default();
    for row in csv::Reader::from_reader(edges).deserialize() {
        let rec: EdgeRecord = row?;
        let from = resolve(&b, &rec.from)?;
        let to   = resolve(&b, &rec.to)?;

        let permission = match rec.permission.as_deref().filter(|p| !p.is_empty()) {
            Some(p) => p.parse::<StreetTraversalPermission>()?,
            None => StreetTraversalPermission::ALL,
        };

        let make = |a: VertexId, z: VertexId| {
            let mut spec = EdgeSpec::new(a, z, rec.length_m)
                .with_permission(permission)
                .with_reluctance(rec.reluctance.unwrap_or(1.0));
            if let Some(name) = rec.name.as_ref().filter(|n| !n.is_empty()) {
                spec = spec.with_name(name.clone());
            }
            for (mode, speed) in [
                (TraverseMode::Walk, rec.walk_speed),
                (TraverseMode::Bicycle, rec.bicycle_speed),
                (TraverseMode::Car, rec.car_speed),
            ] {
                if let Some(s) = speed {
                    spec = spec.with_speed(mode, s);
                }
            }
            spec
        };

        let fwd = b.add_edge(make(from, to))?;
        by_endpoints.entry((from, to)).or_insert(fwd);
        if rec.bidirectional.unwrap_or(false) {
            let bwd = b.add_edge(make(to, from))?;
            by_endpoints.entry((to, from)).or_insert(bwd);
        }
    }

    // ── Turn restrictions ─────────────────────────────────────────────────
    if let Some(restrictions) = restrictions {
        for row in csv::Reader::from_reader(restrictions).deserialize() {
            let rec: RestrictionRecord = row?;
            let from = resolve(&b, &rec.from)?;
            let via  = resolve(&b, &rec.via)?;
            let to   = resolve(&b, &rec.to)?;

            let from_edge = *by_endpoints.get(&(from, via)).ok_or_else(|| StreetError::NoSuchEdge {
                from: rec.from.clone(),
                to:   rec.via.clone(),
            })?;
            let to_edge = *by_endpoints.get(&(via, to)).ok_or_else(|| StreetError::NoSuchEdge {
                from: rec.via.clone(),
                to:   rec.to.clone(),
            })?;

            let modes: TraverseModeSet = rec.modes.parse()?;
            if modes.is_empty() {
                log::warn!(
                    "restriction {} -> {} -> {} restricts no modes",
                    rec.from, rec.via, rec.to
                );
            }
            let window = match (rec.start_secs, rec.end_secs) {
                (Some(s), Some(e)) => Some(ValidityWindow::new(s, e)?),
                _ => None,
            };
            b.add_turn_restriction(TurnRestriction {
                from: from_edge,
                to: to_edge,
                kind: rec.kind.parse::<TurnRestrictionType>()?,
                modes,
                window,
            })?;
        }
    }

    Ok(b.build())
}

fn resolve(b: &GraphBuilder, label: &str) -> StreetResult<VertexId> {
    b.vertex_id(label).ok_or_else(|| StreetError::UnknownLabel(label.to_owned()))
}
