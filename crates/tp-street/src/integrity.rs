//! Graph integrity checks.
//!
//! The builder trusts attribute values handed over by ingestion and only
//! enforces structure (endpoints exist, labels unique).  Attribute problems
//! are detected here, either eagerly through
//! [`StreetGraph::validate`](crate::StreetGraph::validate) or lazily by the
//! search on the edges it actually touches.

use thiserror::Error;

use tp_core::{EdgeId, TraverseMode};

use crate::graph::{Edge, StreetGraph};
use crate::restriction::TurnRestriction;

/// Malformed graph data.  A search that meets one aborts instead of
/// producing a cost it cannot vouch for.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntegrityIssue {
    #[error("edge {edge} has invalid length {length_m} m")]
    NegativeLength { edge: EdgeId, length_m: f64 },

    #[error("edge {edge} has invalid {mode} speed override {speed} m/s")]
    InvalidSpeedOverride { edge: EdgeId, mode: TraverseMode, speed: f64 },

    #[error("edge {edge} has invalid reluctance {reluctance}")]
    InvalidReluctance { edge: EdgeId, reluctance: f64 },

    #[error("turn restriction {from} -> {to} references a missing edge")]
    DanglingRestriction { from: EdgeId, to: EdgeId },

    #[error("turn restriction {from} -> {to} joins edges that share no vertex")]
    DisconnectedRestriction { from: EdgeId, to: EdgeId },

    #[error("turn restriction {from} -> {to} restricts no modes")]
    EmptyRestrictedModes { from: EdgeId, to: EdgeId },
}

impl IntegrityIssue {
    /// Short machine-friendly name, used as the issue type in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            IntegrityIssue::NegativeLength { .. }          => "NegativeLength",
            IntegrityIssue::InvalidSpeedOverride { .. }    => "InvalidSpeedOverride",
            IntegrityIssue::InvalidReluctance { .. }       => "InvalidReluctance",
            IntegrityIssue::DanglingRestriction { .. }     => "DanglingRestriction",
            IntegrityIssue::DisconnectedRestriction { .. } => "DisconnectedRestriction",
            IntegrityIssue::EmptyRestrictedModes { .. }    => "EmptyRestrictedModes",
        }
    }

    /// The edge the issue is anchored on.
    pub fn edge(&self) -> EdgeId {
        match *self {
            IntegrityIssue::NegativeLength { edge, .. }
            | IntegrityIssue::InvalidSpeedOverride { edge, .. }
            | IntegrityIssue::InvalidReluctance { edge, .. } => edge,
            IntegrityIssue::DanglingRestriction { from, .. }
            | IntegrityIssue::DisconnectedRestriction { from, .. }
            | IntegrityIssue::EmptyRestrictedModes { from, .. } => from,
        }
    }
}

/// Length, speed overrides and reluctance of one edge.
pub fn check_edge(id: EdgeId, edge: &Edge) -> Result<(), IntegrityIssue> {
    if !edge.length_m.is_finite() || edge.length_m < 0.0 {
        return Err(IntegrityIssue::NegativeLength { edge: id, length_m: edge.length_m });
    }
    if !edge.reluctance.is_finite() || edge.reluctance <= 0.0 {
        return Err(IntegrityIssue::InvalidReluctance { edge: id, reluctance: edge.reluctance });
    }
    for mode in TraverseMode::ALL {
        if let Some(speed) = edge.speed_override(mode) {
            if !speed.is_finite() || speed <= 0.0 {
                return Err(IntegrityIssue::InvalidSpeedOverride { edge: id, mode, speed });
            }
        }
    }
    Ok(())
}

/// Structural invariants of one restriction: target exists, the two edges
/// meet at a vertex, and at least one mode is restricted.
pub fn check_restriction(graph: &StreetGraph, r: &TurnRestriction) -> Result<(), IntegrityIssue> {
    let (Some(from), Some(to)) = (graph.get_edge(r.from), graph.get_edge(r.to)) else {
        return Err(IntegrityIssue::DanglingRestriction { from: r.from, to: r.to });
    };
    if from.to != to.from {
        return Err(IntegrityIssue::DisconnectedRestriction { from: r.from, to: r.to });
    }
    if r.modes.is_empty() {
        return Err(IntegrityIssue::EmptyRestrictedModes { from: r.from, to: r.to });
    }
    Ok(())
}
