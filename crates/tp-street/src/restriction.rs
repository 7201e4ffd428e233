//! Turn restrictions.
//!
//! A [`TurnRestriction`] is attached to its *from* edge and consulted while
//! the search expands the vertex at the end of that edge.  Checking a move is
//! linear in the number of restrictions on the incoming edge; nothing is
//! precomputed globally.
//!
//! | Kind       | Forbids (for the restricted modes)                   |
//! |------------|------------------------------------------------------|
//! | `NoTurn`   | exactly the `from → to` pair                         |
//! | `OnlyTurn` | every `from → x` pair with `x != to`                 |

use std::str::FromStr;

use tp_core::{EdgeId, TraverseMode, TraverseModeSet};

use crate::{StreetError, StreetResult};

/// Seconds in one day; validity windows are expressed in seconds of day.
pub const SECONDS_PER_DAY: u32 = 86_400;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum TurnRestrictionType {
    NoTurn,
    OnlyTurn,
}

impl FromStr for TurnRestrictionType {
    type Err = StreetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "no_turn" | "no"     => Ok(TurnRestrictionType::NoTurn),
            "only_turn" | "only" => Ok(TurnRestrictionType::OnlyTurn),
            other => Err(StreetError::Parse(format!("unknown turn restriction type {other:?}"))),
        }
    }
}

/// Half-open interval `[start_secs, end_secs)` of seconds since midnight
/// during which a restriction is in force.  `start_secs > end_secs` wraps
/// midnight (e.g. 22:00–06:00).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct ValidityWindow {
    pub start_secs: u32,
    pub end_secs:   u32,
}

impl ValidityWindow {
    /// # Errors
    ///
    /// [`StreetError::InvalidWindow`] if either bound is a full day or more.
    pub fn new(start_secs: u32, end_secs: u32) -> StreetResult<Self> {
        if start_secs >= SECONDS_PER_DAY || end_secs >= SECONDS_PER_DAY {
            return Err(StreetError::InvalidWindow { start_secs, end_secs });
        }
        Ok(Self { start_secs, end_secs })
    }

    /// Is `secs_of_day` inside the window?
    pub fn contains(self, secs_of_day: u32) -> bool {
        let t = secs_of_day % SECONDS_PER_DAY;
        if self.start_secs <= self.end_secs {
            self.start_secs <= t && t < self.end_secs
        } else {
            t >= self.start_secs || t < self.end_secs
        }
    }
}

/// A rule forbidding (or mandating) an edge-to-edge transition.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct TurnRestriction {
    pub from:   EdgeId,
    pub to:     EdgeId,
    pub kind:   TurnRestrictionType,
    /// Modes the restriction applies to.  Must not be empty.
    pub modes:  TraverseModeSet,
    pub window: Option<ValidityWindow>,
}

impl TurnRestriction {
    /// A permanent `NoTurn` restriction.
    pub fn no_turn(from: EdgeId, to: EdgeId, modes: TraverseModeSet) -> Self {
        Self { from, to, kind: TurnRestrictionType::NoTurn, modes, window: None }
    }

    /// A permanent `OnlyTurn` restriction.
    pub fn only_turn(from: EdgeId, to: EdgeId, modes: TraverseModeSet) -> Self {
        Self { from, to, kind: TurnRestrictionType::OnlyTurn, modes, window: None }
    }

    pub fn with_window(mut self, window: ValidityWindow) -> Self {
        self.window = Some(window);
        self
    }

    /// Is the restriction in force for `mode` at `secs_of_day`?
    ///
    /// With no clock (`None`) a windowed restriction is treated as active.
    #[inline]
    pub fn applies(&self, mode: TraverseMode, secs_of_day: Option<u32>) -> bool {
        if !self.modes.contains(mode) {
            return false;
        }
        match (self.window, secs_of_day) {
            (Some(w), Some(t)) => w.contains(t),
            _ => true,
        }
    }

    /// Does this restriction forbid continuing onto `next`?
    #[inline]
    pub fn forbids(&self, next: EdgeId, mode: TraverseMode, secs_of_day: Option<u32>) -> bool {
        if !self.applies(mode, secs_of_day) {
            return false;
        }
        match self.kind {
            TurnRestrictionType::NoTurn   => self.to == next,
            TurnRestrictionType::OnlyTurn => self.to != next,
        }
    }
}

/// `true` unless some restriction in `restrictions` forbids moving onto
/// `next`.  An empty slice always allows the move.
#[inline]
pub fn turn_allowed(
    restrictions: &[TurnRestriction],
    next:         EdgeId,
    mode:         TraverseMode,
    secs_of_day:  Option<u32>,
) -> bool {
    !restrictions.iter().any(|r| r.forbids(next, mode, secs_of_day))
}
