//! Street-graph construction error type.

use thiserror::Error;

use tp_core::{CoreError, EdgeId, VertexId};

/// Errors produced while building or loading a street graph.
#[derive(Debug, Error)]
pub enum StreetError {
    #[error("vertex label {0:?} is already present in the graph")]
    DuplicateVertex(String),

    #[error("vertex {0} not found in graph")]
    UnknownVertex(VertexId),

    #[error("vertex label {0:?} not found in graph")]
    UnknownLabel(String),

    #[error("edge {0} not found in graph")]
    UnknownEdge(EdgeId),

    #[error("no edge from {from:?} to {to:?}")]
    NoSuchEdge { from: String, to: String },

    #[error("validity window {start_secs}..{end_secs} is outside one day (0..86400 s)")]
    InvalidWindow { start_secs: u32, end_secs: u32 },

    #[error("parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type StreetResult<T> = Result<T, StreetError>;
