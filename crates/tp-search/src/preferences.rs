//! Per-request routing preferences.

use tp_core::TraverseMode;

use crate::RequestError;

// ── PerMode ───────────────────────────────────────────────────────────────────

/// One value per [`TraverseMode`].
///
/// Serialises as `{"walk": .., "bicycle": .., "car": ..}`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PerMode<T> {
    pub walk:    T,
    pub bicycle: T,
    pub car:     T,
}

impl<T: Copy> PerMode<T> {
    pub fn splat(value: T) -> Self {
        Self { walk: value, bicycle: value, car: value }
    }

    #[inline]
    pub fn get(&self, mode: TraverseMode) -> T {
        match mode {
            TraverseMode::Walk    => self.walk,
            TraverseMode::Bicycle => self.bicycle,
            TraverseMode::Car     => self.car,
        }
    }

    pub fn set(&mut self, mode: TraverseMode, value: T) {
        match mode {
            TraverseMode::Walk    => self.walk = value,
            TraverseMode::Bicycle => self.bicycle = value,
            TraverseMode::Car     => self.car = value,
        }
    }
}

// ── Heuristic ─────────────────────────────────────────────────────────────────

/// Remaining-cost estimate used to order the frontier.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Heuristic {
    /// Always zero; the search degenerates to Dijkstra.
    Zero,
    /// Great-circle distance to the destination at the fastest speed the
    /// mode can reach, scaled by the smallest weight factor in the graph.
    #[default]
    StraightLine,
}

// ── RoutingPreferences ────────────────────────────────────────────────────────

/// Speeds, reluctances and search limits for one request.
///
/// Reluctances multiply traversal time into weight; with every reluctance at
/// 1.0 (the default) weight equals elapsed time.
///
/// ```
/// use tp_core::TraverseMode;
/// use tp_search::RoutingPreferences;
///
/// let prefs = RoutingPreferences::default()
///     .with_speed(TraverseMode::Walk, 1.2)
///     .with_reluctance(TraverseMode::Walk, 2.0)
///     .with_max_expansions(10_000);
/// assert_eq!(prefs.speed(TraverseMode::Walk), 1.2);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RoutingPreferences {
    /// Travel speed in m/s, used where an edge has no override.
    pub speed:           PerMode<f64>,
    /// Multiplier from traversal seconds to weight.
    pub reluctance:      PerMode<f64>,
    /// Multiplier from intersection seconds to weight.
    pub turn_reluctance: f64,
    pub heuristic:       Heuristic,
    /// Give up (as not found) after this many vertices have been closed.
    pub max_expansions:  Option<usize>,
}

impl Default for RoutingPreferences {
    fn default() -> Self {
        Self {
            speed: PerMode { walk: 1.33, bicycle: 5.0, car: 11.2 },
            reluctance: PerMode::splat(1.0),
            turn_reluctance: 1.0,
            heuristic: Heuristic::StraightLine,
            max_expansions: None,
        }
    }
}

impl RoutingPreferences {
    #[inline]
    pub fn speed(&self, mode: TraverseMode) -> f64 {
        self.speed.get(mode)
    }

    #[inline]
    pub fn reluctance(&self, mode: TraverseMode) -> f64 {
        self.reluctance.get(mode)
    }

    pub fn with_speed(mut self, mode: TraverseMode, speed_mps: f64) -> Self {
        self.speed.set(mode, speed_mps);
        self
    }

    /// Same speed for every mode.  Handy for fixtures.
    pub fn with_uniform_speed(mut self, speed_mps: f64) -> Self {
        self.speed = PerMode::splat(speed_mps);
        self
    }

    pub fn with_reluctance(mut self, mode: TraverseMode, reluctance: f64) -> Self {
        self.reluctance.set(mode, reluctance);
        self
    }

    pub fn with_turn_reluctance(mut self, reluctance: f64) -> Self {
        self.turn_reluctance = reluctance;
        self
    }

    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn with_max_expansions(mut self, limit: usize) -> Self {
        self.max_expansions = Some(limit);
        self
    }

    /// Reject values the engine cannot search with.
    ///
    /// Only the requested mode's speed and reluctance are checked; the other
    /// modes are never read.
    pub fn validate(&self, mode: TraverseMode) -> Result<(), RequestError> {
        let speed = self.speed(mode);
        if !(speed.is_finite() && speed > 0.0) {
            return Err(RequestError::InvalidSpeed { mode, speed });
        }
        let reluctance = self.reluctance(mode);
        if !(reluctance.is_finite() && reluctance > 0.0) {
            return Err(RequestError::InvalidReluctance { what: "mode reluctance", value: reluctance });
        }
        if !(self.turn_reluctance.is_finite() && self.turn_reluctance >= 0.0) {
            return Err(RequestError::InvalidReluctance {
                what:  "turn reluctance",
                value: self.turn_reluctance,
            });
        }
        Ok(())
    }
}
