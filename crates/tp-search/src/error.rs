use thiserror::Error;

use tp_core::{TraverseMode, VertexId};
use tp_street::IntegrityIssue;

/// A request the engine refuses to start.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestError {
    #[error("origin {0} is not in the graph")]
    UnknownOrigin(VertexId),

    #[error("destination {0} is not in the graph")]
    UnknownDestination(VertexId),

    #[error("{mode} speed must be positive and finite, got {speed} m/s")]
    InvalidSpeed { mode: TraverseMode, speed: f64 },

    #[error("{what} out of range: {value}")]
    InvalidReluctance { what: &'static str, value: f64 },

    #[error("no vertex near {0}")]
    NoNearbyVertex(String),
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("invalid request: {0}")]
    Request(#[from] RequestError),

    /// Malformed graph data met during expansion.  The search is aborted.
    #[error("graph integrity: {0}")]
    GraphIntegrity(#[from] IntegrityIssue),

    /// Internal inconsistency; always a bug.
    #[error("search invariant violated: {0}")]
    Invariant(String),
}

pub type SearchResult<T> = Result<T, SearchError>;
