//! Route request descriptor.

use std::fmt;
use std::sync::Arc;

use tp_core::{GeoPoint, TraverseMode, VertexId};
use tp_street::{StreetGraph, SECONDS_PER_DAY};

use crate::intersection::{IntersectionTraversalCalculator, SimpleIntersectionTraversalCalculator};
use crate::{RequestError, RoutingPreferences};

/// Everything one search needs besides the graph.
///
/// The calculator is shared, so cloning a request is cheap.
///
/// ```
/// use std::sync::Arc;
/// use tp_core::{TraverseMode, VertexId};
/// use tp_search::{ConstantIntersectionTraversalCalculator, RouteRequest};
///
/// let req = RouteRequest::new(VertexId(0), VertexId(5), TraverseMode::Car)
///     .with_calculator(Arc::new(ConstantIntersectionTraversalCalculator::new(10.0)))
///     .with_departure_secs(8 * 3600);
/// assert_eq!(req.departure_secs, Some(28_800));
/// ```
#[derive(Clone)]
pub struct RouteRequest {
    pub from:           VertexId,
    pub to:             VertexId,
    pub mode:           TraverseMode,
    pub preferences:    RoutingPreferences,
    pub calculator:     Arc<dyn IntersectionTraversalCalculator>,
    /// Departure as seconds since midnight.  Time-windowed turn restrictions
    /// are evaluated against it; without one they always apply.
    pub departure_secs: Option<u32>,
}

impl RouteRequest {
    /// Default preferences and the angle-based intersection calculator.
    pub fn new(from: VertexId, to: VertexId, mode: TraverseMode) -> Self {
        Self {
            from,
            to,
            mode,
            preferences: RoutingPreferences::default(),
            calculator: Arc::new(SimpleIntersectionTraversalCalculator::default()),
            departure_secs: None,
        }
    }

    /// Snap both coordinates to their nearest vertices.
    pub fn between_points(
        graph: &StreetGraph,
        from:  GeoPoint,
        to:    GeoPoint,
        mode:  TraverseMode,
    ) -> Result<Self, RequestError> {
        let snap = |p: GeoPoint| graph.nearest_vertex(p).ok_or_else(|| RequestError::NoNearbyVertex(p.to_string()));
        Ok(Self::new(snap(from)?, snap(to)?, mode))
    }

    pub fn with_preferences(mut self, preferences: RoutingPreferences) -> Self {
        self.preferences = preferences;
        self
    }

    pub fn with_calculator(mut self, calculator: Arc<dyn IntersectionTraversalCalculator>) -> Self {
        self.calculator = calculator;
        self
    }

    pub fn with_departure_secs(mut self, secs_of_day: u32) -> Self {
        self.departure_secs = Some(secs_of_day % SECONDS_PER_DAY);
        self
    }

    /// Check endpoints and preferences before any search work.
    pub fn validate(&self, graph: &StreetGraph) -> Result<(), RequestError> {
        if !graph.contains_vertex(self.from) {
            return Err(RequestError::UnknownOrigin(self.from));
        }
        if !graph.contains_vertex(self.to) {
            return Err(RequestError::UnknownDestination(self.to));
        }
        self.preferences.validate(self.mode)
    }

    /// Clock time (seconds of day) after `elapsed` seconds of travel.
    pub(crate) fn time_of_day(&self, elapsed: f64) -> Option<u32> {
        self.departure_secs
            .map(|d| ((d as u64 + elapsed.max(0.0) as u64) % SECONDS_PER_DAY as u64) as u32)
    }
}

impl fmt::Debug for RouteRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteRequest")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("mode", &self.mode)
            .field("preferences", &self.preferences)
            .field("departure_secs", &self.departure_secs)
            .finish_non_exhaustive()
    }
}
