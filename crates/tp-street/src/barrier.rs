//! Point obstacles on vertices.
//!
//! A barrier vertex removes modes from every edge it terminates, without
//! touching the edges' stored permissions (see
//! [`Vertex::override_permissions`](crate::Vertex::override_permissions)).
//! Ingestion is responsible for mapping raw tags onto a [`BarrierKind`];
//! this module only knows which modes each kind blocks.

use tp_core::{TraverseMode, TraverseModeSet};

/// Physical barrier types recognised on vertices.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum BarrierKind {
    /// Posts that stop motor vehicles but let pedestrians and cyclists through.
    Bollard,
    /// A fixed bar across the carriageway.
    Bar,
    /// A chain across the carriageway.
    Chain,
    /// Any other barrier; blocks nothing by itself.
    Other,
}

impl BarrierKind {
    /// Classify a `barrier=*` tag value.  Unknown values map to `Other`.
    pub fn from_tag(value: &str) -> Self {
        match value.trim() {
            "bollard" => BarrierKind::Bollard,
            "bar"     => BarrierKind::Bar,
            "chain"   => BarrierKind::Chain,
            _         => BarrierKind::Other,
        }
    }

    #[inline]
    pub fn is_motor_vehicle_barrier(self) -> bool {
        matches!(self, BarrierKind::Bollard | BarrierKind::Bar | BarrierKind::Chain)
    }

    /// Modes this barrier denies.
    pub fn denied_modes(self) -> TraverseModeSet {
        if self.is_motor_vehicle_barrier() {
            TraverseModeSet::of(TraverseMode::Car)
        } else {
            TraverseModeSet::EMPTY
        }
    }
}
