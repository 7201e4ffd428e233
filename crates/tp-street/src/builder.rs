//! Incremental construction of a [`StreetGraph`].

use rstar::RTree;
use rustc_hash::FxHashMap;

use tp_core::{
    CoreError, EdgeId, GeoPoint, StreetTraversalPermission, TraverseMode, TraverseModeSet,
    VertexId,
};

use crate::graph::{Edge, StreetGraph, Vertex, VertexEntry};
use crate::restriction::TurnRestriction;
use crate::{StreetError, StreetResult};

// ── EdgeSpec ──────────────────────────────────────────────────────────────────

/// Attributes of an edge to be added with [`GraphBuilder::add_edge`].
///
/// ```
/// use tp_core::{StreetTraversalPermission, TraverseMode, VertexId};
/// use tp_street::EdgeSpec;
///
/// let spec = EdgeSpec::new(VertexId(0), VertexId(1), 120.0)
///     .with_name("main_st")
///     .with_permission(StreetTraversalPermission::PEDESTRIAN_AND_CAR)
///     .with_speed(TraverseMode::Car, 13.9);
/// assert_eq!(spec.length_m, 120.0);
/// ```
#[derive(Clone, Debug)]
pub struct EdgeSpec {
    pub from:            VertexId,
    pub to:              VertexId,
    pub length_m:        f64,
    pub name:            Option<String>,
    /// `None` draws a straight line between the endpoints.
    pub geometry:        Option<Vec<GeoPoint>>,
    pub permission:      StreetTraversalPermission,
    pub speed_overrides: [Option<f64>; TraverseMode::COUNT],
    pub reluctance:      f64,
}

impl EdgeSpec {
    /// An edge open to every mode, with neutral reluctance.
    pub fn new(from: VertexId, to: VertexId, length_m: f64) -> Self {
        Self {
            from,
            to,
            length_m,
            name: None,
            geometry: None,
            permission: StreetTraversalPermission::ALL,
            speed_overrides: [None; TraverseMode::COUNT],
            reluctance: 1.0,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_geometry(mut self, geometry: Vec<GeoPoint>) -> Self {
        self.geometry = Some(geometry);
        self
    }

    pub fn with_permission(mut self, permission: StreetTraversalPermission) -> Self {
        self.permission = permission;
        self
    }

    pub fn with_speed(mut self, mode: TraverseMode, speed_mps: f64) -> Self {
        self.speed_overrides[mode.index()] = Some(speed_mps);
        self
    }

    pub fn with_reluctance(mut self, reluctance: f64) -> Self {
        self.reluctance = reluctance;
        self
    }
}

// ── GraphBuilder ──────────────────────────────────────────────────────────────

/// Construct a [`StreetGraph`] incrementally, then call [`build`](Self::build).
///
/// Vertices must be added before the edges that reference them, and edges
/// before the turn restrictions attached to them.  `build()` lays out the
/// CSR adjacency and bulk-loads the R-tree.
///
/// # Example
///
/// ```
/// use tp_core::GeoPoint;
/// use tp_street::{EdgeSpec, GraphBuilder};
///
/// let mut b = GraphBuilder::new();
/// let a = b.add_vertex("a", GeoPoint::new(39.96, -83.00)).unwrap();
/// let c = b.add_vertex("c", GeoPoint::new(39.97, -83.00)).unwrap();
/// b.add_street(a, c, 1_100.0).unwrap();
/// let graph = b.build();
/// assert_eq!(graph.vertex_count(), 2);
/// assert_eq!(graph.edge_count(), 2); // both directions
/// ```
pub struct GraphBuilder {
    vertices: Vec<Vertex>,
    labels:   FxHashMap<String, VertexId>,
    edges:    Vec<Edge>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self { vertices: Vec::new(), labels: FxHashMap::default(), edges: Vec::new() }
    }

    /// Pre-allocate for the expected number of vertices and edges.
    pub fn with_capacity(vertices: usize, edges: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            labels:   FxHashMap::with_capacity_and_hasher(vertices, Default::default()),
            edges:    Vec::with_capacity(edges),
        }
    }

    /// Add a vertex and return its `VertexId` (sequential from 0).
    ///
    /// # Errors
    ///
    /// [`StreetError::DuplicateVertex`] if `label` is already present;
    /// [`StreetError::Core`] if `pos` is not a valid WGS-84 coordinate.
    pub fn add_vertex(&mut self, label: impl Into<String>, pos: GeoPoint) -> StreetResult<VertexId> {
        let label = label.into();
        if self.labels.contains_key(&label) {
            return Err(StreetError::DuplicateVertex(label));
        }
        if !pos.is_valid() {
            return Err(CoreError::InvalidCoordinate(format!("{label} at {pos}")).into());
        }
        let id = VertexId(self.vertices.len() as u32);
        self.labels.insert(label.clone(), id);
        self.vertices.push(Vertex {
            label,
            pos,
            denied: TraverseModeSet::EMPTY,
            traffic_signal: false,
        });
        Ok(id)
    }

    /// Mark `v` as blocking `modes` (added to any earlier denials).
    pub fn deny_modes(&mut self, v: VertexId, modes: TraverseModeSet) -> StreetResult<()> {
        let vertex = self.vertices.get_mut(v.index()).ok_or(StreetError::UnknownVertex(v))?;
        vertex.denied = vertex.denied.union(modes);
        Ok(())
    }

    pub fn set_traffic_signal(&mut self, v: VertexId, signal: bool) -> StreetResult<()> {
        let vertex = self.vertices.get_mut(v.index()).ok_or(StreetError::UnknownVertex(v))?;
        vertex.traffic_signal = signal;
        Ok(())
    }

    /// Add a **directed** edge and return its `EdgeId` (sequential from 0).
    ///
    /// # Errors
    ///
    /// [`StreetError::UnknownVertex`] if either endpoint has not been added.
    pub fn add_edge(&mut self, spec: EdgeSpec) -> StreetResult<EdgeId> {
        let from_pos = self.vertex_pos(spec.from)?;
        let to_pos   = self.vertex_pos(spec.to)?;

        let id = EdgeId(self.edges.len() as u32);
        let name = spec.name.unwrap_or_else(|| {
            format!("{}_{}", self.vertices[spec.from.index()].label, self.vertices[spec.to.index()].label)
        });
        self.edges.push(Edge {
            from: spec.from,
            to: spec.to,
            name,
            geometry: spec.geometry.unwrap_or_else(|| vec![from_pos, to_pos]),
            length_m: spec.length_m,
            permission: spec.permission,
            speed_overrides: spec.speed_overrides,
            reluctance: spec.reluctance,
            restrictions: Vec::new(),
        });
        Ok(id)
    }

    /// Convenience: add an edge in **both directions**, open to all modes.
    /// Returns `(a→b, b→a)`.
    pub fn add_street(&mut self, a: VertexId, b: VertexId, length_m: f64) -> StreetResult<(EdgeId, EdgeId)> {
        let fwd = self.add_edge(EdgeSpec::new(a, b, length_m))?;
        let bwd = self.add_edge(EdgeSpec::new(b, a, length_m))?;
        Ok((fwd, bwd))
    }

    /// Attach `restriction` to its from-edge.
    ///
    /// Only the from-edge is checked here.  The to-edge and the remaining
    /// invariants are verified by `StreetGraph::validate` and by the search.
    pub fn add_turn_restriction(&mut self, restriction: TurnRestriction) -> StreetResult<()> {
        let from = restriction.from;
        let edge = self.edges.get_mut(from.index()).ok_or(StreetError::UnknownEdge(from))?;
        edge.restrictions.push(restriction);
        Ok(())
    }

    /// Look up a vertex added earlier by label.
    pub fn vertex_id(&self, label: &str) -> Option<VertexId> {
        self.labels.get(label).copied()
    }

    /// Position of a vertex added earlier.
    pub fn vertex_pos(&self, v: VertexId) -> StreetResult<GeoPoint> {
        self.vertices
            .get(v.index())
            .map(|vx| vx.pos)
            .ok_or(StreetError::UnknownVertex(v))
    }

    /// First edge added from `from` to `to`.  Linear scan; meant for
    /// fixtures and loaders, not hot paths.
    pub fn find_edge(&self, from: VertexId, to: VertexId) -> Option<EdgeId> {
        self.edges
            .iter()
            .position(|e| e.from == from && e.to == to)
            .map(|i| EdgeId(i as u32))
    }

    pub fn vertex_count(&self) -> usize { self.vertices.len() }
    pub fn edge_count(&self) -> usize { self.edges.len() }

    /// Consume the builder and produce a [`StreetGraph`].
    ///
    /// Time complexity: O(V + E) for the CSR layout plus O(V log V) for the
    /// R-tree bulk load.
    pub fn build(self) -> StreetGraph {
        let vertex_count = self.vertices.len();

        let (out_start, out_edges) = csr(vertex_count, self.edges.iter().map(|e| e.from));
        let (in_start, in_edges)   = csr(vertex_count, self.edges.iter().map(|e| e.to));

        let mut max_speed_override = [None; TraverseMode::COUNT];
        let mut min_edge_reluctance: f64 = 1.0;
        let mut min_length_ratio: f64 = 1.0;
        for edge in &self.edges {
            for mode in TraverseMode::ALL {
                if let Some(s) = edge.speed_override(mode).filter(|s| s.is_finite()) {
                    let slot = &mut max_speed_override[mode.index()];
                    *slot = Some(slot.map_or(s, |m: f64| m.max(s)));
                }
            }
            if edge.reluctance.is_finite() && edge.reluctance > 0.0 {
                min_edge_reluctance = min_edge_reluctance.min(edge.reluctance);
            }
            let direct = self.vertices[edge.from.index()]
                .pos
                .distance_m(self.vertices[edge.to.index()].pos);
            if direct > 0.0 && edge.length_m.is_finite() {
                min_length_ratio = min_length_ratio.min((edge.length_m / direct).max(0.0));
            }
        }

        let entries: Vec<VertexEntry> = self
            .vertices
            .iter()
            .enumerate()
            .map(|(i, v)| VertexEntry { point: [v.pos.lat, v.pos.lon], id: VertexId(i as u32) })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        log::debug!(
            "built street graph: {} vertices, {} edges",
            vertex_count,
            self.edges.len()
        );

        StreetGraph {
            vertices: self.vertices,
            edges: self.edges,
            labels: self.labels,
            out_start,
            out_edges,
            in_start,
            in_edges,
            max_speed_override,
            min_edge_reluctance,
            min_length_ratio,
            spatial_idx,
        }
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Stable counting sort of edge ids by `key` into CSR row pointers and a
/// flat id array.  Edges with the same key keep their insertion order.
fn csr(vertex_count: usize, keys: impl Iterator<Item = VertexId> + Clone) -> (Vec<u32>, Vec<EdgeId>) {
    let mut start = vec![0u32; vertex_count + 1];
    for k in keys.clone() {
        start[k.index() + 1] += 1;
    }
    for i in 1..=vertex_count {
        start[i] += start[i - 1];
    }

    let mut cursor = start.clone();
    let mut ids = vec![EdgeId::INVALID; start[vertex_count] as usize];
    for (i, k) in keys.enumerate() {
        let slot = &mut cursor[k.index()];
        ids[*slot as usize] = EdgeId(i as u32);
        *slot += 1;
    }
    debug_assert!(ids.iter().all(|e| e.is_valid()));
    (start, ids)
}
