//! Path reconstruction.

use tp_core::{EdgeId, StateId, VertexId};
use tp_street::StreetGraph;

use crate::state::{SearchState, StateArena};
use crate::{SearchError, SearchResult};

/// One step of a finished path.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PathState {
    pub vertex:       VertexId,
    /// `None` for the first state.
    pub back_edge:    Option<EdgeId>,
    pub elapsed_secs: f64,
    pub weight:       f64,
}

impl From<&SearchState> for PathState {
    fn from(s: &SearchState) -> Self {
        Self {
            vertex:       s.vertex,
            back_edge:    s.back_edge(),
            elapsed_secs: s.elapsed_secs,
            weight:       s.weight,
        }
    }
}

/// Ordered states from origin to destination.
///
/// Elapsed time and weight never decrease along the path.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphPath {
    states: Vec<PathState>,
}

impl GraphPath {
    /// Follow back-pointers from `terminal` to the origin.
    ///
    /// # Errors
    ///
    /// [`SearchError::Invariant`] if a back-pointer leaves the arena or the
    /// chain is not monotonic.
    pub fn reconstruct(arena: &StateArena, terminal: StateId) -> SearchResult<Self> {
        let mut states = Vec::new();
        let mut cur = terminal;
        loop {
            let state = arena
                .get(cur)
                .ok_or_else(|| SearchError::Invariant(format!("back-pointer {cur} outside the arena")))?;
            states.push(PathState::from(state));
            if state.is_origin() {
                break;
            }
            if state.back_state >= cur {
                return Err(SearchError::Invariant(format!(
                    "state {cur} points forward to {}",
                    state.back_state
                )));
            }
            cur = state.back_state;
        }
        states.reverse();

        for pair in states.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if b.elapsed_secs < a.elapsed_secs || b.weight < a.weight {
                return Err(SearchError::Invariant(format!(
                    "path not monotonic at {}: elapsed {} -> {}, weight {} -> {}",
                    b.vertex, a.elapsed_secs, b.elapsed_secs, a.weight, b.weight
                )));
            }
        }
        Ok(Self { states })
    }

    pub fn states(&self) -> &[PathState] {
        &self.states
    }

    /// Number of states (edges + 1).
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Never true for a reconstructed path; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// `true` if origin and destination coincide.
    pub fn is_trivial(&self) -> bool {
        self.states.len() == 1
    }

    pub fn origin(&self) -> VertexId {
        self.states[0].vertex
    }

    pub fn destination(&self) -> VertexId {
        self.states[self.states.len() - 1].vertex
    }

    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.states.iter().map(|s| s.vertex)
    }

    pub fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.states.iter().filter_map(|s| s.back_edge)
    }

    /// Total elapsed time in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.states.last().map_or(0.0, |s| s.elapsed_secs)
    }

    /// Total elapsed time rounded to whole seconds.
    pub fn duration(&self) -> u64 {
        self.duration_secs().round() as u64
    }

    pub fn weight(&self) -> f64 {
        self.states.last().map_or(0.0, |s| s.weight)
    }

    /// Vertex labels in travel order.
    pub fn labels<'g>(&self, graph: &'g StreetGraph) -> Vec<&'g str> {
        self.vertices().map(|v| graph.vertex(v).label.as_str()).collect()
    }
}
