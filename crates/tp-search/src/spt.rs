//! Shortest-path tree: best states and closed flags for one search.
//!
//! # Domination
//!
//! States are compared per vertex, except that a state which arrived over
//! an edge carrying turn restrictions for the searched mode is compared only
//! with states that arrived over the same edge.  Such a state may be barred from successors
//! its rivals can take, so it must not shadow them.  A state with an
//! unrestricted entry still dominates every state at its vertex.

use rustc_hash::FxHashMap;

use tp_core::{EdgeId, StateId, VertexId};

use crate::path::GraphPath;
use crate::state::{SearchState, StateArena};
use crate::{SearchError, SearchResult};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
enum Slot {
    Vertex(VertexId),
    Entry(VertexId, EdgeId),
}

#[derive(Copy, Clone, Debug)]
struct EntrySlot {
    best:   StateId,
    closed: bool,
}

/// Per-vertex bookkeeping of a search.
///
/// A vertex is *unseen* (no state), *open* (states recorded, none closed)
/// or *closed* (its first closed state is final).  Best states are only
/// replaced while their slot is open.
#[derive(Debug)]
pub struct ShortestPathTree {
    pub(crate) arena: StateArena,
    slot_of:          Vec<Slot>,
    vertex_best:      Vec<StateId>,
    vertex_closed:    Vec<bool>,
    entries:          FxHashMap<(VertexId, EdgeId), EntrySlot>,
    /// First state closed at each vertex; its weight is optimal.
    settled:          Vec<StateId>,
}

impl ShortestPathTree {
    pub(crate) fn new(vertex_count: usize) -> Self {
        Self {
            arena:         StateArena::new(),
            slot_of:       Vec::new(),
            vertex_best:   vec![StateId::INVALID; vertex_count],
            vertex_closed: vec![false; vertex_count],
            entries:       FxHashMap::default(),
            settled:       vec![StateId::INVALID; vertex_count],
        }
    }

    fn slot(vertex: VertexId, back_edge: EdgeId, restricted_entry: bool) -> Slot {
        if restricted_entry && back_edge.is_valid() {
            Slot::Entry(vertex, back_edge)
        } else {
            Slot::Vertex(vertex)
        }
    }

    /// Would a state at `vertex`, reached over `back_edge` with `weight`, be
    /// no better than one already recorded?
    pub(crate) fn is_dominated(&self, vertex: VertexId, back_edge: EdgeId, restricted_entry: bool, weight: f64) -> bool {
        let v = vertex.index();
        if self.vertex_closed[v] {
            return true;
        }
        let best = self.vertex_best[v];
        if best.is_valid() && self.arena[best].weight <= weight {
            return true;
        }
        match Self::slot(vertex, back_edge, restricted_entry) {
            Slot::Vertex(_) => false,
            Slot::Entry(v, e) => self
                .entries
                .get(&(v, e))
                .is_some_and(|s| s.closed || self.arena[s.best].weight <= weight),
        }
    }

    /// Record `state` as the new best of its slot.
    pub(crate) fn offer(&mut self, state: SearchState, restricted_entry: bool) -> SearchResult<StateId> {
        let slot = Self::slot(state.vertex, state.back_edge, restricted_entry);
        let reopened = match slot {
            Slot::Vertex(v) => self.vertex_closed[v.index()],
            Slot::Entry(v, e) => self.entries.get(&(v, e)).is_some_and(|s| s.closed),
        };
        if reopened {
            return Err(SearchError::Invariant(format!("attempt to reopen {slot:?}")));
        }

        let id = self.arena.push(state)?;
        self.slot_of.push(slot);
        match slot {
            Slot::Vertex(v) => self.vertex_best[v.index()] = id,
            Slot::Entry(v, e) => {
                self.entries.insert((v, e), EntrySlot { best: id, closed: false });
            }
        }
        Ok(id)
    }

    /// `true` while `id` is the best state of an open slot and no
    /// unrestricted state at its vertex has been closed.
    pub(crate) fn is_current(&self, id: StateId) -> bool {
        match self.slot_of[id.index()] {
            Slot::Vertex(v) => !self.vertex_closed[v.index()] && self.vertex_best[v.index()] == id,
            Slot::Entry(v, e) => {
                !self.vertex_closed[v.index()]
                    && self.entries.get(&(v, e)).is_some_and(|s| !s.closed && s.best == id)
            }
        }
    }

    /// Finalise the slot of `id`.
    pub(crate) fn close(&mut self, id: StateId) -> SearchResult<()> {
        let slot = self.slot_of[id.index()];
        let vertex = match slot {
            Slot::Vertex(v) => {
                let flag = &mut self.vertex_closed[v.index()];
                if *flag {
                    return Err(SearchError::Invariant(format!("{v} closed twice")));
                }
                *flag = true;
                v
            }
            Slot::Entry(v, e) => {
                let entry = self
                    .entries
                    .get_mut(&(v, e))
                    .filter(|s| !s.closed)
                    .ok_or_else(|| SearchError::Invariant(format!("{v} via {e} closed twice")))?;
                entry.closed = true;
                v
            }
        };
        let settled = &mut self.settled[vertex.index()];
        if !settled.is_valid() {
            *settled = id;
        }
        Ok(())
    }

    pub fn state(&self, id: StateId) -> Option<&SearchState> {
        self.arena.get(id)
    }

    /// The final state of a closed vertex, else the best open state with an
    /// unrestricted entry.
    pub fn best_state(&self, vertex: VertexId) -> Option<&SearchState> {
        let settled = *self.settled.get(vertex.index())?;
        let id = if settled.is_valid() { settled } else { self.vertex_best[vertex.index()] };
        if id.is_valid() { self.arena.get(id) } else { None }
    }

    pub fn best_weight(&self, vertex: VertexId) -> Option<f64> {
        self.best_state(vertex).map(|s| s.weight)
    }

    /// `true` once any state at `vertex` has been closed.
    pub fn is_closed(&self, vertex: VertexId) -> bool {
        self.settled.get(vertex.index()).is_some_and(|s| s.is_valid())
    }

    /// Vertices closed so far.
    pub fn closed_count(&self) -> usize {
        self.settled.iter().filter(|s| s.is_valid()).count()
    }

    /// Total states allocated by the search.
    pub fn state_count(&self) -> usize {
        self.arena.len()
    }

    /// Optimal path to any closed vertex.  `Ok(None)` for open or unseen
    /// vertices, whose best state may still improve.
    pub fn path_to(&self, vertex: VertexId) -> SearchResult<Option<GraphPath>> {
        if !self.is_closed(vertex) {
            return Ok(None);
        }
        GraphPath::reconstruct(&self.arena, self.settled[vertex.index()]).map(Some)
    }
}
