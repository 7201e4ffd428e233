//! Street graph representation.
//!
//! # Data layout
//!
//! Vertices and edges live in two `Vec`s indexed by [`VertexId`] and
//! [`EdgeId`]; edge ids are assigned in insertion order.  Adjacency uses
//! **Compressed Sparse Row (CSR)** arrays in both directions.  Given a
//! vertex `v`, its outgoing edges occupy
//!
//! ```text
//! out_edges[ out_start[v] .. out_start[v+1] ]
//! ```
//!
//! and likewise for `in_edges`/`in_start`.  The CSR arrays are filled with a
//! stable counting sort, so each vertex's edges keep their insertion order.
//!
//! # Read-only sharing
//!
//! A built [`StreetGraph`] has no interior mutability.  Any number of
//! searches may borrow it concurrently from different threads.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps `(lat, lon)` to the nearest vertex, used to
//! resolve coordinate-based route requests.

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use rustc_hash::FxHashMap;

use tp_core::{
    EdgeId, GeoPoint, StreetTraversalPermission, TraverseMode, TraverseModeSet, VertexId,
};

use crate::integrity::{self, IntegrityIssue};
use crate::restriction::TurnRestriction;

// ── R-tree vertex entry ───────────────────────────────────────────────────────

/// Entry stored in the R-tree spatial index: a `[lat, lon]` point with the
/// associated `VertexId`.
#[derive(Clone)]
pub(crate) struct VertexEntry {
    pub(crate) point: [f64; 2],
    pub(crate) id:    VertexId,
}

impl RTreeObject for VertexEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for VertexEntry {
    /// Squared Euclidean distance in lat/lon space.  Good enough for picking
    /// the nearest vertex within a city.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlat = self.point[0] - point[0];
        let dlon = self.point[1] - point[1];
        dlat * dlat + dlon * dlon
    }
}

// ── Vertex ────────────────────────────────────────────────────────────────────

/// A street intersection or other graph node.
#[derive(Clone, Debug)]
pub struct Vertex {
    /// Unique label, e.g. `"main_1st"` or an OSM node reference.
    pub label: String,
    pub pos: GeoPoint,
    /// Modes blocked at this vertex (barriers, access=no…).
    pub denied: TraverseModeSet,
    /// Signal-controlled intersection.
    pub traffic_signal: bool,
}

impl Vertex {
    /// Compose `default` with this vertex's denials.
    ///
    /// Pure function of its inputs; the edge's stored permission is never
    /// modified.
    #[inline]
    pub fn override_permissions(&self, default: StreetTraversalPermission) -> StreetTraversalPermission {
        default.remove_modes(self.denied)
    }

    #[inline]
    pub fn is_barrier(&self) -> bool {
        !self.denied.is_empty()
    }
}

// ── Edge ──────────────────────────────────────────────────────────────────────

/// A directed street segment.
#[derive(Clone, Debug)]
pub struct Edge {
    pub from: VertexId,
    pub to:   VertexId,
    pub name: String,
    /// Ordered coordinates from `from` to `to`.  At least two points.
    pub geometry: Vec<GeoPoint>,
    /// Physical length in metres.
    pub length_m: f64,
    /// Modes allowed by the street itself, before vertex overrides.
    pub permission: StreetTraversalPermission,
    /// Per-mode speed (m/s) replacing the request speed on this edge,
    /// indexed by [`TraverseMode::index`].
    pub speed_overrides: [Option<f64>; TraverseMode::COUNT],
    /// Extra weight multiplier for this edge (stairs, busy roads…).  1.0 is
    /// neutral.
    pub reluctance: f64,
    /// Restrictions on turns *out of* this edge.
    pub restrictions: Vec<TurnRestriction>,
}

impl Edge {
    #[inline]
    pub fn speed_override(&self, mode: TraverseMode) -> Option<f64> {
        self.speed_overrides[mode.index()]
    }

    /// Bearing (degrees from north) of the first geometry segment.
    pub fn departure_bearing(&self) -> Option<f64> {
        match self.geometry.as_slice() {
            [a, b, ..] => Some(a.bearing_deg(*b)),
            _ => None,
        }
    }

    /// Bearing (degrees from north) of the last geometry segment.
    pub fn arrival_bearing(&self) -> Option<f64> {
        match self.geometry.as_slice() {
            [.., a, b] => Some(a.bearing_deg(*b)),
            _ => None,
        }
    }
}

// ── StreetGraph ───────────────────────────────────────────────────────────────

/// Directed street graph with CSR adjacency and a spatial index.
///
/// Do not construct directly; use [`GraphBuilder`](crate::GraphBuilder).
pub struct StreetGraph {
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) edges:    Vec<Edge>,
    pub(crate) labels:   FxHashMap<String, VertexId>,

    pub(crate) out_start: Vec<u32>,
    pub(crate) out_edges: Vec<EdgeId>,
    pub(crate) in_start:  Vec<u32>,
    pub(crate) in_edges:  Vec<EdgeId>,

    /// Highest speed override per mode, for admissible heuristics.
    pub(crate) max_speed_override: [Option<f64>; TraverseMode::COUNT],
    /// Smallest per-edge reluctance in the graph (1.0 for an empty graph).
    pub(crate) min_edge_reluctance: f64,
    /// Smallest ratio of edge length to the great-circle distance between
    /// its endpoints, clamped to `[0, 1]`.
    pub(crate) min_length_ratio: f64,

    pub(crate) spatial_idx: RTree<VertexEntry>,
}

/// Summary only; the adjacency arrays and R-tree are too large to print.
impl std::fmt::Debug for StreetGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreetGraph")
            .field("vertices", &self.vertices.len())
            .field("edges", &self.edges.len())
            .field("min_edge_reluctance", &self.min_edge_reluctance)
            .field("min_length_ratio", &self.min_length_ratio)
            .finish_non_exhaustive()
    }
}

impl StreetGraph {
    /// A graph with no vertices or edges.
    pub fn empty() -> Self {
        crate::GraphBuilder::new().build()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    #[inline]
    pub fn contains_vertex(&self, v: VertexId) -> bool {
        v.index() < self.vertices.len()
    }

    /// The vertex with id `v`.
    ///
    /// # Panics
    /// Panics if `v` is not a vertex of this graph.
    #[inline]
    pub fn vertex(&self, v: VertexId) -> &Vertex {
        &self.vertices[v.index()]
    }

    /// The edge with id `e`.
    ///
    /// # Panics
    /// Panics if `e` is not an edge of this graph.
    #[inline]
    pub fn edge(&self, e: EdgeId) -> &Edge {
        &self.edges[e.index()]
    }

    #[inline]
    pub fn get_edge(&self, e: EdgeId) -> Option<&Edge> {
        self.edges.get(e.index())
    }

    pub fn vertex_by_label(&self, label: &str) -> Option<VertexId> {
        self.labels.get(label).copied()
    }

    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &Vertex)> + '_ {
        self.vertices.iter().enumerate().map(|(i, v)| (VertexId(i as u32), v))
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> + '_ {
        self.edges.iter().enumerate().map(|(i, e)| (EdgeId(i as u32), e))
    }

    /// First edge (in insertion order) from `from` to `to`.
    pub fn edge_between(&self, from: VertexId, to: VertexId) -> Option<EdgeId> {
        self.outgoing_edges(from).find(|e| self.edges[e.index()].to == to)
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Outgoing edges of `v` in insertion order.
    ///
    /// A contiguous slice scan; the iterator is `Clone`, so it can be
    /// restarted cheaply.
    #[inline]
    pub fn outgoing_edges(&self, v: VertexId) -> impl Iterator<Item = EdgeId> + Clone + '_ {
        let start = self.out_start[v.index()] as usize;
        let end   = self.out_start[v.index() + 1] as usize;
        self.out_edges[start..end].iter().copied()
    }

    /// Incoming edges of `v` in insertion order.
    #[inline]
    pub fn incoming_edges(&self, v: VertexId) -> impl Iterator<Item = EdgeId> + Clone + '_ {
        let start = self.in_start[v.index()] as usize;
        let end   = self.in_start[v.index() + 1] as usize;
        self.in_edges[start..end].iter().copied()
    }

    #[inline]
    pub fn out_degree(&self, v: VertexId) -> usize {
        (self.out_start[v.index() + 1] - self.out_start[v.index()]) as usize
    }

    // ── Permissions ───────────────────────────────────────────────────────

    /// Permission of `e` after both endpoints have applied their overrides.
    #[inline]
    pub fn effective_permission(&self, e: EdgeId) -> StreetTraversalPermission {
        let edge = &self.edges[e.index()];
        let from_overridden = self.vertices[edge.from.index()].override_permissions(edge.permission);
        self.vertices[edge.to.index()].override_permissions(from_overridden)
    }

    /// Can `mode` traverse `e`?
    #[inline]
    pub fn edge_allows(&self, e: EdgeId, mode: TraverseMode) -> bool {
        self.effective_permission(e).allows(mode)
    }

    /// Restrictions on turns out of `e`.
    #[inline]
    pub fn turn_restrictions(&self, e: EdgeId) -> &[TurnRestriction] {
        &self.edges[e.index()].restrictions
    }

    // ── Heuristic bounds ──────────────────────────────────────────────────

    /// The fastest per-edge speed override for `mode`, if any edge has one.
    pub fn max_speed_override(&self, mode: TraverseMode) -> Option<f64> {
        self.max_speed_override[mode.index()]
    }

    /// The smallest per-edge reluctance in the graph.
    pub fn min_edge_reluctance(&self) -> f64 {
        self.min_edge_reluctance
    }

    /// Lower bound on `length_m / great-circle distance` over all edges.
    ///
    /// Scaling a straight-line estimate by this factor keeps it below the
    /// network distance even when stored lengths are shorter than the
    /// geometry suggests.
    pub fn min_length_ratio(&self) -> f64 {
        self.min_length_ratio
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// The vertex nearest to `pos`; `None` only for an empty graph.
    pub fn nearest_vertex(&self, pos: GeoPoint) -> Option<VertexId> {
        self.spatial_idx
            .nearest_neighbor(&[pos.lat, pos.lon])
            .map(|e| e.id)
    }

    /// Up to `k` nearest vertices to `pos`, sorted by ascending distance.
    pub fn k_nearest_vertices(&self, pos: GeoPoint, k: usize) -> Vec<VertexId> {
        self.spatial_idx
            .nearest_neighbor_iter(&[pos.lat, pos.lon])
            .take(k)
            .map(|e| e.id)
            .collect()
    }

    // ── Integrity ─────────────────────────────────────────────────────────

    /// Check every edge and restriction, returning all problems found.
    ///
    /// Searches perform the same checks lazily on the edges they touch; this
    /// is the eager whole-graph variant.
    pub fn validate(&self) -> Vec<IntegrityIssue> {
        let mut issues = Vec::new();
        for (id, edge) in self.edges() {
            if let Err(issue) = integrity::check_edge(id, edge) {
                issues.push(issue);
            }
            for r in &edge.restrictions {
                if let Err(issue) = integrity::check_restriction(self, r) {
                    issues.push(issue);
                }
            }
        }
        issues
    }
}
