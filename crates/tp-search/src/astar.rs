//! A* search over the street graph.
//!
//! # Expansion
//!
//! One step pops the open state with the smallest `weight + estimate`,
//! closes its vertex and relaxes every outgoing edge that
//!
//! 1. the requested mode may use after vertex overrides, and
//! 2. no turn restriction on the arriving edge forbids.
//!
//! Traversal time is `length / speed`, where the speed is the edge's
//! override for the mode or else the request speed.  Weight is that time
//! scaled by the mode and edge reluctances.  The intersection cost is added
//! on every edge except the first one leaving the origin.
//!
//! A new state is kept only if its weight is strictly smaller than every
//! state that dominates it (see [`ShortestPathTree`]); closed slots are
//! never reopened.
//!
//! # Integrity
//!
//! Edges and restrictions are checked as they are touched.  The first
//! problem aborts the search with [`SearchError::GraphIntegrity`].

use tp_core::{EdgeId, GeoPoint, StateId, TraverseMode, VertexId};
use tp_street::{integrity, turn_allowed, StreetGraph, TurnRestriction};

use crate::cancel::CancellationToken;
use crate::frontier::Frontier;
use crate::observer::{NoopObserver, RejectReason, SearchObserver, SearchStats};
use crate::path::GraphPath;
use crate::spt::ShortestPathTree;
use crate::state::SearchState;
use crate::{Heuristic, RouteRequest, SearchError, SearchResult};

// ── Outcomes ──────────────────────────────────────────────────────────────────

/// Result of a search that ran without error.
#[derive(Clone, Debug, PartialEq)]
pub enum RouteOutcome {
    Found(GraphPath),
    /// The frontier emptied, or the expansion limit was hit, before the
    /// destination was reached.
    NotFound,
    /// The cancellation token tripped.
    Canceled,
}

impl RouteOutcome {
    pub fn path(&self) -> Option<&GraphPath> {
        match self {
            RouteOutcome::Found(p) => Some(p),
            _ => None,
        }
    }

    pub fn into_path(self) -> Option<GraphPath> {
        match self {
            RouteOutcome::Found(p) => Some(p),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, RouteOutcome::Found(_))
    }
}

/// How the main loop stopped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SearchStatus {
    /// The destination was closed with this state.
    Reached(StateId),
    Exhausted,
    LimitReached,
    Canceled,
}

/// Everything a finished search leaves behind.
#[derive(Debug)]
pub struct SearchRun {
    pub tree:   ShortestPathTree,
    pub status: SearchStatus,
    pub stats:  SearchStats,
}

impl SearchRun {
    /// Reconstruct the destination path if one was reached.
    pub fn into_outcome(self) -> SearchResult<RouteOutcome> {
        match self.status {
            SearchStatus::Reached(id) => GraphPath::reconstruct(&self.tree.arena, id).map(RouteOutcome::Found),
            SearchStatus::Exhausted | SearchStatus::LimitReached => Ok(RouteOutcome::NotFound),
            SearchStatus::Canceled => Ok(RouteOutcome::Canceled),
        }
    }
}

// ── Heuristic ─────────────────────────────────────────────────────────────────

/// Lower bound on the remaining weight to the destination.
///
/// Straight-line estimates divide great-circle distance by the fastest speed
/// the mode can reach anywhere in the graph and multiply by the smallest
/// weight factor, so they never exceed the true remaining weight as long as
/// edge lengths are at least `min_length_ratio` times their endpoint
/// distance (which the graph guarantees by construction).
struct Estimator {
    target:    GeoPoint,
    per_metre: f64,
}

impl Estimator {
    fn new(graph: &StreetGraph, request: &RouteRequest) -> Self {
        let target = graph.vertex(request.to).pos;
        let per_metre = match request.preferences.heuristic {
            Heuristic::Zero => 0.0,
            Heuristic::StraightLine => {
                let mode = request.mode;
                let speed = request.preferences.speed(mode);
                let fastest = graph.max_speed_override(mode).map_or(speed, |s| s.max(speed));
                request.preferences.reluctance(mode)
                    * graph.min_edge_reluctance()
                    * graph.min_length_ratio()
                    / fastest
            }
        };
        Self { target, per_metre }
    }

    #[inline]
    fn estimate(&self, graph: &StreetGraph, v: VertexId) -> f64 {
        if self.per_metre == 0.0 {
            0.0
        } else {
            graph.vertex(v).pos.distance_m(self.target) * self.per_metre
        }
    }
}

// ── AStar ─────────────────────────────────────────────────────────────────────

/// One configured search invocation.
///
/// ```
/// use std::sync::Arc;
/// use tp_core::{GeoPoint, TraverseMode};
/// use tp_search::{AStar, ConstantIntersectionTraversalCalculator, RouteOutcome, RouteRequest};
/// use tp_street::GraphBuilder;
///
/// let mut b = GraphBuilder::new();
/// let a = b.add_vertex("a", GeoPoint::new(0.0, 0.0)).unwrap();
/// let c = b.add_vertex("c", GeoPoint::new(0.0, 0.001)).unwrap();
/// b.add_street(a, c, 120.0).unwrap();
/// let graph = b.build();
///
/// let req = RouteRequest::new(a, c, TraverseMode::Walk)
///     .with_calculator(Arc::new(ConstantIntersectionTraversalCalculator::zero()));
/// let RouteOutcome::Found(path) = AStar::new(&graph, &req).search().unwrap() else {
///     panic!("expected a path");
/// };
/// assert_eq!(path.len(), 2);
/// ```
pub struct AStar<'a> {
    graph:   &'a StreetGraph,
    request: &'a RouteRequest,
    cancel:  Option<&'a CancellationToken>,
}

impl<'a> AStar<'a> {
    pub fn new(graph: &'a StreetGraph, request: &'a RouteRequest) -> Self {
        Self { graph, request, cancel: None }
    }

    /// Poll `token` once per expansion step.
    pub fn with_cancellation(mut self, token: &'a CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Search to the destination and reconstruct the path.
    pub fn search(&self) -> SearchResult<RouteOutcome> {
        self.search_observed(&mut NoopObserver)
    }

    pub fn search_observed<O: SearchObserver + ?Sized>(&self, observer: &mut O) -> SearchResult<RouteOutcome> {
        self.run(observer)?.into_outcome()
    }

    /// Run the main loop and return the whole shortest-path tree.
    ///
    /// # Errors
    ///
    /// - [`SearchError::Request`] before any expansion for a bad request.
    /// - [`SearchError::GraphIntegrity`] on malformed edges or restrictions.
    /// - [`SearchError::Invariant`] on internal inconsistencies.
    pub fn run<O: SearchObserver + ?Sized>(&self, observer: &mut O) -> SearchResult<SearchRun> {
        let graph = self.graph;
        let req = self.request;
        req.validate(graph)?;

        let mode = req.mode;
        let prefs = &req.preferences;
        let request_speed = prefs.speed(mode);
        let mode_reluctance = prefs.reluctance(mode);
        let estimator = Estimator::new(graph, req);

        observer.on_search_start(req);
        log::debug!(
            "search {} -> {} by {} ({:?} heuristic)",
            req.from, req.to, mode, prefs.heuristic
        );

        let mut tree = ShortestPathTree::new(graph.vertex_count());
        let mut frontier = Frontier::new();
        let mut stats = SearchStats::default();

        let origin = tree.offer(SearchState::origin(req.from), false)?;
        stats.created += 1;
        frontier.push(estimator.estimate(graph, req.from), origin);

        let mut status = SearchStatus::Exhausted;
        loop {
            if self.cancel.is_some_and(|c| c.is_canceled()) {
                status = SearchStatus::Canceled;
                break;
            }
            let Some((_, id)) = frontier.pop() else { break };
            if !tree.is_current(id) {
                stats.stale += 1;
                continue;
            }

            let state = tree.arena[id];
            let v = state.vertex;
            tree.close(id)?;
            stats.expanded += 1;
            observer.on_expand(id, &state);
            log::trace!("expand {} at weight {:.3}", v, state.weight);

            if v == req.to {
                status = SearchStatus::Reached(id);
                break;
            }
            if prefs.max_expansions.is_some_and(|limit| stats.expanded >= limit) {
                log::warn!(
                    "search {} -> {} stopped after {} expansions",
                    req.from, req.to, stats.expanded
                );
                status = SearchStatus::LimitReached;
                break;
            }

            let restrictions: &[TurnRestriction] = match state.back_edge() {
                Some(back) => graph.turn_restrictions(back),
                None => &[],
            };
            for r in restrictions {
                integrity::check_restriction(graph, r)?;
            }
            let clock = req.time_of_day(state.elapsed_secs);

            for e in graph.outgoing_edges(v) {
                if !graph.edge_allows(e, mode) {
                    stats.rejected_permission += 1;
                    observer.on_edge_rejected(e, RejectReason::Permission);
                    continue;
                }
                if !turn_allowed(restrictions, e, mode, clock) {
                    stats.rejected_restriction += 1;
                    observer.on_edge_rejected(e, RejectReason::TurnRestriction);
                    continue;
                }

                let edge = graph.edge(e);
                integrity::check_edge(e, edge)?;

                let speed = edge.speed_override(mode).unwrap_or(request_speed);
                let time = edge.length_m / speed;
                let mut elapsed = state.elapsed_secs + time;
                let mut weight = state.weight + time * mode_reluctance * edge.reluctance;

                if let Some(back) = state.back_edge() {
                    let cost = turn_cost(req, graph, back, e, mode, speed)?;
                    elapsed += cost;
                    weight += cost * prefs.turn_reluctance;
                }

                let restricted_entry = edge.restrictions.iter().any(|r| r.modes.contains(mode));
                if tree.is_dominated(edge.to, e, restricted_entry, weight) {
                    continue;
                }
                let next = SearchState {
                    vertex:       edge.to,
                    back_edge:    e,
                    back_state:   id,
                    elapsed_secs: elapsed,
                    weight,
                };
                let next_id = tree.offer(next, restricted_entry)?;
                stats.created += 1;
                observer.on_state_created(next_id, &next);
                frontier.push(weight + estimator.estimate(graph, edge.to), next_id);
            }
        }

        log::debug!(
            "search {} -> {} finished ({:?}): {} expanded, {} states, {} stale",
            req.from, req.to, status, stats.expanded, stats.created, stats.stale
        );
        observer.on_search_end(&stats);
        Ok(SearchRun { tree, status, stats })
    }
}

/// Ask the request's calculator and reject values it must never return.
fn turn_cost(
    req:   &RouteRequest,
    graph: &StreetGraph,
    from:  EdgeId,
    to:    EdgeId,
    mode:  TraverseMode,
    speed: f64,
) -> SearchResult<f64> {
    let cost = req.calculator.traversal_cost(graph, from, to, mode, speed);
    if cost.is_finite() && cost >= 0.0 {
        Ok(cost)
    } else {
        Err(SearchError::Invariant(format!(
            "intersection cost {cost} for {from} -> {to} is not a finite non-negative value"
        )))
    }
}
