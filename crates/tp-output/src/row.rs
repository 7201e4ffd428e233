//! Plain records written by the output backends.

use tp_core::{EdgeId, GeoPoint, StateId, VertexId};
use tp_street::{IntegrityIssue, StreetGraph};

/// One data problem worth reporting, with an optional location.
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    /// Issue type; summaries group by it.
    pub kind:     String,
    pub message:  String,
    /// Higher is more severe.
    pub priority: i32,
    /// Points or polyline locating the issue; empty if unknown.
    pub geometry: Vec<GeoPoint>,
}

impl Issue {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self { kind: kind.into(), message: message.into(), priority: 0, geometry: Vec::new() }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_geometry(mut self, geometry: Vec<GeoPoint>) -> Self {
        self.geometry = geometry;
        self
    }

    /// Integrity issues make searches abort, so they get priority 1.  The
    /// geometry is the anchoring edge's, when that edge exists.
    pub fn from_integrity(issue: &IntegrityIssue, graph: &StreetGraph) -> Self {
        let geometry = graph
            .get_edge(issue.edge())
            .map(|e| e.geometry.clone())
            .unwrap_or_default();
        Issue::new(issue.kind(), issue.to_string())
            .with_priority(1)
            .with_geometry(geometry)
    }

    /// Geometry as WKT (`POINT`/`LINESTRING`, lon-lat order), or `None`.
    pub fn wkt(&self) -> Option<String> {
        let coords = |pts: &[GeoPoint]| {
            pts.iter()
                .map(|p| format!("{} {}", p.lon, p.lat))
                .collect::<Vec<_>>()
                .join(", ")
        };
        match self.geometry.as_slice() {
            [] => None,
            [p] => Some(format!("POINT ({})", coords(std::slice::from_ref(p)))),
            pts => Some(format!("LINESTRING ({})", coords(pts))),
        }
    }
}

/// One event of a search trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceRow {
    /// Event counter within the search, from 0.
    pub seq:          u64,
    pub event:        &'static str,
    /// `INVALID` for edge rejections, whose times are `NaN`.
    pub state:        StateId,
    pub vertex:       VertexId,
    /// Back edge for state events, rejected edge for rejections.
    pub edge:         EdgeId,
    pub elapsed_secs: f64,
    pub weight:       f64,
}
