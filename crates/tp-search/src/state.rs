//! Search states and the per-search arena that owns them.

use std::ops::Index;

use tp_core::{EdgeId, StateId, VertexId};

use crate::{SearchError, SearchResult};

/// A partial path: where it ends, how long it took, what it cost, and the
/// state it was extended from.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SearchState {
    pub vertex:       VertexId,
    /// Edge traversed to reach `vertex`; `INVALID` at the origin.
    pub back_edge:    EdgeId,
    /// Predecessor in the arena; `INVALID` at the origin.
    pub back_state:   StateId,
    pub elapsed_secs: f64,
    pub weight:       f64,
}

impl SearchState {
    pub fn origin(vertex: VertexId) -> Self {
        Self {
            vertex,
            back_edge: EdgeId::INVALID,
            back_state: StateId::INVALID,
            elapsed_secs: 0.0,
            weight: 0.0,
        }
    }

    #[inline]
    pub fn is_origin(&self) -> bool {
        !self.back_state.is_valid()
    }

    /// The edge this state arrived on, if any.
    #[inline]
    pub fn back_edge(&self) -> Option<EdgeId> {
        self.back_edge.is_valid().then_some(self.back_edge)
    }
}

/// Append-only storage for the states of one search.
///
/// Back-pointers are `StateId` indices, so a state's predecessor always has a
/// smaller id and the chain cannot cycle.  The whole arena is dropped with
/// the search.
#[derive(Debug, Default)]
pub struct StateArena {
    states: Vec<SearchState>,
}

impl StateArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self { states: Vec::with_capacity(n) }
    }

    /// Append `state` and return its id.
    ///
    /// # Errors
    ///
    /// [`SearchError::Invariant`] once every id below `StateId::INVALID` is
    /// taken.
    pub fn push(&mut self, state: SearchState) -> SearchResult<StateId> {
        debug_assert!(!state.back_state.is_valid() || state.back_state.index() < self.states.len());
        let id = next_id(self.states.len())?;
        self.states.push(state);
        Ok(id)
    }

    pub fn get(&self, id: StateId) -> Option<&SearchState> {
        self.states.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

/// Id for the slot after `len` states; the `INVALID` sentinel is never handed out.
pub(crate) fn next_id(len: usize) -> SearchResult<StateId> {
    StateId::try_from(len)
        .ok()
        .filter(|id| id.is_valid())
        .ok_or_else(|| SearchError::Invariant(format!("state arena full at {len} states")))
}

impl Index<StateId> for StateArena {
    type Output = SearchState;

    #[inline]
    fn index(&self, id: StateId) -> &SearchState {
        &self.states[id.index()]
    }
}
