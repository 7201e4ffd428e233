//! Routing trait and the default A* implementation.
//!
//! # Pluggability
//!
//! Callers route through the [`Router`] trait so alternative engines can be
//! swapped in without touching request handling.
//!
//! # Thread safety
//!
//! The graph is read-only during a search and every search owns its own
//! frontier and state arena, so independent requests can run concurrently
//! over one shared graph (see [`route_batch`]).

use std::time::Duration;

use tp_street::StreetGraph;

use crate::astar::{AStar, RouteOutcome};
use crate::cancel::CancellationToken;
use crate::{RouteRequest, SearchResult};

/// Pluggable routing engine.
///
/// Implementations must be `Send + Sync` so they can be shared across Rayon
/// worker threads.
pub trait Router: Send + Sync {
    fn route(&self, graph: &StreetGraph, request: &RouteRequest) -> SearchResult<RouteOutcome>;
}

/// [`AStar`] with an optional per-request time budget.
#[derive(Clone, Debug, Default)]
pub struct AStarRouter {
    timeout: Option<Duration>,
}

impl AStarRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel any single search that runs longer than `timeout`.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout: Some(timeout) }
    }
}

impl Router for AStarRouter {
    fn route(&self, graph: &StreetGraph, request: &RouteRequest) -> SearchResult<RouteOutcome> {
        match self.timeout {
            Some(timeout) => {
                let token = CancellationToken::with_timeout(timeout);
                AStar::new(graph, request).with_cancellation(&token).search()
            }
            None => AStar::new(graph, request).search(),
        }
    }
}

/// Route every request, in parallel when the `parallel` feature is on.
///
/// Results are returned in request order.
pub fn route_batch<R: Router + ?Sized>(
    router:   &R,
    graph:    &StreetGraph,
    requests: &[RouteRequest],
) -> Vec<SearchResult<RouteOutcome>> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        requests.par_iter().map(|r| router.route(graph, r)).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        requests.iter().map(|r| router.route(graph, r)).collect()
    }
}
