//! Search observer trait for tracing and statistics.

use tp_core::{EdgeId, StateId};

use crate::state::SearchState;
use crate::RouteRequest;

/// Why an outgoing edge was not followed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RejectReason {
    /// The edge's effective permission excludes the mode.
    Permission,
    /// A turn restriction on the incoming edge forbids the move.
    TurnRestriction,
}

impl RejectReason {
    pub fn as_str(self) -> &'static str {
        match self {
            RejectReason::Permission      => "permission",
            RejectReason::TurnRestriction => "turn_restriction",
        }
    }
}

/// Counters collected by every search.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// States popped from the frontier and closed.
    pub expanded:             usize,
    /// States created, including the origin.
    pub created:              usize,
    /// Frontier entries discarded because their vertex was already closed
    /// or a better state had replaced them.
    pub stale:                usize,
    pub rejected_permission:  usize,
    pub rejected_restriction: usize,
}

/// Callbacks invoked by the A* engine at key points of a search.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: expansion counter
///
/// ```rust
/// use tp_core::StateId;
/// use tp_search::{SearchObserver, SearchState};
///
/// struct Counter(usize);
///
/// impl SearchObserver for Counter {
///     fn on_expand(&mut self, _id: StateId, _state: &SearchState) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait SearchObserver {
    /// Called once, after the request has been validated.
    fn on_search_start(&mut self, _request: &RouteRequest) {}

    /// Called when a state is closed.
    fn on_expand(&mut self, _id: StateId, _state: &SearchState) {}

    /// Called when an outgoing edge is skipped.
    fn on_edge_rejected(&mut self, _edge: EdgeId, _reason: RejectReason) {}

    /// Called when a new best state for a vertex enters the frontier.
    fn on_state_created(&mut self, _id: StateId, _state: &SearchState) {}

    /// Called once when the search terminates without error.
    fn on_search_end(&mut self, _stats: &SearchStats) {}
}

/// A [`SearchObserver`] that does nothing.
pub struct NoopObserver;

impl SearchObserver for NoopObserver {}
