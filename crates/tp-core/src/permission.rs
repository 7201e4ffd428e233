//! Street traversal permissions.
//!
//! Every edge carries a [`StreetTraversalPermission`]: the set of modes that
//! may use it.  The value is a plain bitset, so composing permissions (a
//! barrier vertex removing car access, for instance) is bit arithmetic and
//! never mutates the edge's stored default.

use std::str::FromStr;

use crate::{CoreError, TraverseMode, TraverseModeSet};

/// Bitset of modes allowed to traverse a street edge.
///
/// Bit layout matches [`TraverseModeSet`]: pedestrian = bit 0,
/// bicycle = bit 1, car = bit 2.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StreetTraversalPermission(u8);

impl StreetTraversalPermission {
    pub const NONE: Self                   = Self(0b000);
    pub const PEDESTRIAN: Self             = Self(0b001);
    pub const BICYCLE: Self                = Self(0b010);
    pub const PEDESTRIAN_AND_BICYCLE: Self = Self(0b011);
    pub const CAR: Self                    = Self(0b100);
    pub const PEDESTRIAN_AND_CAR: Self     = Self(0b101);
    pub const BICYCLE_AND_CAR: Self        = Self(0b110);
    pub const ALL: Self                    = Self(0b111);

    /// Does this permission let `mode` traverse the edge?
    #[inline]
    pub fn allows(self, mode: TraverseMode) -> bool {
        self.0 & mode.bit() != 0
    }

    #[inline]
    pub fn is_none(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn add(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[inline]
    pub fn remove(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// Remove every mode in `modes`.  This is the vertex override rule:
    /// `override(default) = default − denied`.
    #[inline]
    pub fn remove_modes(self, modes: TraverseModeSet) -> Self {
        Self(self.0 & !modes.bits())
    }

    #[inline]
    pub fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// The modes this permission allows, as a mode set.
    pub fn modes(self) -> TraverseModeSet {
        TraverseMode::ALL.into_iter().filter(|m| self.allows(*m)).collect()
    }

    /// Canonical upper-case name.
    pub fn as_str(self) -> &'static str {
        match self.0 {
            0b000 => "NONE",
            0b001 => "PEDESTRIAN",
            0b010 => "BICYCLE",
            0b011 => "PEDESTRIAN_AND_BICYCLE",
            0b100 => "CAR",
            0b101 => "PEDESTRIAN_AND_CAR",
            0b110 => "BICYCLE_AND_CAR",
            _     => "ALL",
        }
    }
}

impl From<TraverseModeSet> for StreetTraversalPermission {
    fn from(modes: TraverseModeSet) -> Self {
        Self(modes.bits())
    }
}

impl std::fmt::Display for StreetTraversalPermission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StreetTraversalPermission {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NONE"                   => Ok(Self::NONE),
            "PEDESTRIAN"             => Ok(Self::PEDESTRIAN),
            "BICYCLE"                => Ok(Self::BICYCLE),
            "PEDESTRIAN_AND_BICYCLE" => Ok(Self::PEDESTRIAN_AND_BICYCLE),
            "CAR"                    => Ok(Self::CAR),
            "PEDESTRIAN_AND_CAR"     => Ok(Self::PEDESTRIAN_AND_CAR),
            "BICYCLE_AND_CAR"        => Ok(Self::BICYCLE_AND_CAR),
            "ALL"                    => Ok(Self::ALL),
            _ => Err(CoreError::UnknownPermission(s.to_owned())),
        }
    }
}
