//! Traverse modes and compact mode sets.
//!
//! A [`TraverseMode`] is the means by which a search moves along street
//! edges.  A [`TraverseModeSet`] is a bitset of modes, used wherever a rule
//! applies to several modes at once (turn restrictions, barrier vertices).

use std::str::FromStr;

use crate::CoreError;

/// How a traveller moves along the street network.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TraverseMode {
    /// On foot.
    Walk,
    /// Bicycle.
    Bicycle,
    /// Private car.
    Car,
}

impl TraverseMode {
    /// Every mode, in bit order.
    pub const ALL: [TraverseMode; 3] = [TraverseMode::Walk, TraverseMode::Bicycle, TraverseMode::Car];

    /// Number of modes; the length of any per-mode table.
    pub const COUNT: usize = Self::ALL.len();

    /// Dense index for per-mode lookup tables.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            TraverseMode::Walk    => 0,
            TraverseMode::Bicycle => 1,
            TraverseMode::Car     => 2,
        }
    }

    /// Single-bit mask used by [`TraverseModeSet`] and permission bitsets.
    #[inline]
    pub(crate) fn bit(self) -> u8 {
        1 << self.index()
    }

    /// `true` for modes that drive on the carriageway and obey turn bans.
    #[inline]
    pub fn is_driving(self) -> bool {
        matches!(self, TraverseMode::Car)
    }

    /// Human-readable label, useful for CSV column values.
    pub fn as_str(self) -> &'static str {
        match self {
            TraverseMode::Walk    => "walk",
            TraverseMode::Bicycle => "bicycle",
            TraverseMode::Car     => "car",
        }
    }
}

impl std::fmt::Display for TraverseMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TraverseMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "walk" | "foot" | "pedestrian" => Ok(TraverseMode::Walk),
            "bicycle" | "bike"             => Ok(TraverseMode::Bicycle),
            "car" | "drive"                => Ok(TraverseMode::Car),
            _ => Err(CoreError::UnknownMode(s.to_owned())),
        }
    }
}

// ── TraverseModeSet ───────────────────────────────────────────────────────────

/// A set of [`TraverseMode`]s packed into one byte.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TraverseModeSet(u8);

impl TraverseModeSet {
    pub const EMPTY: TraverseModeSet = TraverseModeSet(0);
    pub const ALL: TraverseModeSet = TraverseModeSet(0b111);

    /// A set holding exactly `mode`.
    #[inline]
    pub fn of(mode: TraverseMode) -> Self {
        Self(mode.bit())
    }

    #[inline]
    pub fn contains(self, mode: TraverseMode) -> bool {
        self.0 & mode.bit() != 0
    }

    #[inline]
    pub fn insert(&mut self, mode: TraverseMode) {
        self.0 |= mode.bit();
    }

    #[inline]
    pub fn with(mut self, mode: TraverseMode) -> Self {
        self.insert(mode);
        self
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn union(self, other: TraverseModeSet) -> Self {
        Self(self.0 | other.0)
    }

    /// Raw bit pattern (walk = bit 0, bicycle = bit 1, car = bit 2).
    #[inline]
    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn iter(self) -> impl Iterator<Item = TraverseMode> {
        TraverseMode::ALL.into_iter().filter(move |m| self.contains(*m))
    }
}

impl FromIterator<TraverseMode> for TraverseModeSet {
    fn from_iter<I: IntoIterator<Item = TraverseMode>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, TraverseModeSet::with)
    }
}

impl From<TraverseMode> for TraverseModeSet {
    fn from(mode: TraverseMode) -> Self {
        Self::of(mode)
    }
}

impl std::fmt::Display for TraverseModeSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.iter().map(TraverseMode::as_str).collect();
        write!(f, "{{{}}}", names.join(","))
    }
}

/// Parses `"car"`, `"walk|bicycle"` or `"walk,car"`; an empty string is the
/// empty set.
impl FromStr for TraverseModeSet {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(['|', ','])
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(TraverseMode::from_str)
            .collect()
    }
}
