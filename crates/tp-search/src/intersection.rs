//! Intersection traversal cost models.
//!
//! The engine asks the calculator for the seconds spent crossing the vertex
//! shared by the edge it arrived on and the edge it is about to take.  The
//! cost is charged once, to the state created at the end of the outgoing
//! edge, and never at the origin (which has no incoming edge).

use tp_core::{EdgeId, TraverseMode};
use tp_street::StreetGraph;

/// Pluggable intersection cost.
///
/// Implementations must return a finite, non-negative number of seconds;
/// the engine treats anything else as a bug and aborts the search.
///
/// # Thread safety
///
/// Calculators are shared between concurrent searches behind an `Arc`, so
/// they must be `Send + Sync`.
pub trait IntersectionTraversalCalculator: Send + Sync {
    /// Seconds needed to turn from `from` onto `to` at the vertex they share.
    ///
    /// `speed` is the speed (m/s) the traveller will use on `to`.
    fn traversal_cost(
        &self,
        graph: &StreetGraph,
        from:  EdgeId,
        to:    EdgeId,
        mode:  TraverseMode,
        speed: f64,
    ) -> f64;
}

// ── Constant ──────────────────────────────────────────────────────────────────

/// Same cost at every intersection regardless of geometry or mode.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ConstantIntersectionTraversalCalculator {
    pub seconds: f64,
}

impl ConstantIntersectionTraversalCalculator {
    pub fn new(seconds: f64) -> Self {
        Self { seconds }
    }

    /// No intersection cost at all.
    pub fn zero() -> Self {
        Self { seconds: 0.0 }
    }
}

impl IntersectionTraversalCalculator for ConstantIntersectionTraversalCalculator {
    fn traversal_cost(&self, _: &StreetGraph, _: EdgeId, _: EdgeId, _: TraverseMode, _: f64) -> f64 {
        self.seconds
    }
}

// ── Simple (angle based) ──────────────────────────────────────────────────────

/// Classification of a turn by the angle between the arriving and leaving
/// directions.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TurnDirection {
    Straight,
    Right,
    Left,
    UTurn,
}

impl TurnDirection {
    /// Classify a clockwise turn angle in degrees (`0..360`), assuming
    /// right-hand traffic.
    pub fn from_angle(angle_deg: f64, cfg: &SimpleIntersectionConfig) -> Self {
        let a = angle_deg.rem_euclid(360.0);
        if a >= cfg.min_right_turn_deg && a <= cfg.max_right_turn_deg {
            TurnDirection::Right
        } else if a >= 360.0 - cfg.max_right_turn_deg && a <= 360.0 - cfg.min_right_turn_deg {
            TurnDirection::Left
        } else if a > cfg.max_right_turn_deg && a < 360.0 - cfg.max_right_turn_deg {
            TurnDirection::UTurn
        } else {
            TurnDirection::Straight
        }
    }
}

/// Tuning for [`SimpleIntersectionTraversalCalculator`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimpleIntersectionConfig {
    /// Turns sharper than this (clockwise) count as right turns.
    pub min_right_turn_deg:       f64,
    /// Turns up to this (clockwise) count as right turns; beyond is a U-turn.
    pub max_right_turn_deg:       f64,
    /// Car, signalised intersection, any direction.
    pub car_at_light_secs:        f64,
    pub car_right_no_light_secs:  f64,
    pub car_left_no_light_secs:   f64,
    pub car_straight_no_light_secs: f64,
    /// Both edges at or above this car speed (m/s) are treated as a through
    /// road with no intersection delay.
    pub highway_speed_mps:        f64,
    /// Extra distance (m) a walker or cyclist covers for a full U-turn;
    /// scaled linearly by the turn's deviation from straight.
    pub non_driving_turn_m:       f64,
    /// Wait for a pedestrian light when crossing at a signal.
    pub non_driving_at_light_secs: f64,
}

impl Default for SimpleIntersectionConfig {
    fn default() -> Self {
        Self {
            min_right_turn_deg:         45.0,
            max_right_turn_deg:         135.0,
            car_at_light_secs:          15.0,
            car_right_no_light_secs:    8.0,
            car_left_no_light_secs:     8.0,
            car_straight_no_light_secs: 5.0,
            highway_speed_mps:          25.0,
            non_driving_turn_m:         5.0,
            non_driving_at_light_secs:  15.0,
        }
    }
}

/// Geometry-aware intersection costs.
///
/// Cars pay a fixed delay per manoeuvre, larger at traffic signals, and
/// nothing between two fast roads.  Walkers and cyclists pay for the extra
/// distance of the turn, plus a signal wait unless they turn right (and so
/// stay on the same side of the road).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimpleIntersectionTraversalCalculator {
    pub config: SimpleIntersectionConfig,
}

impl SimpleIntersectionTraversalCalculator {
    pub fn new(config: SimpleIntersectionConfig) -> Self {
        Self { config }
    }

    /// Clockwise angle between the end of `from` and the start of `to`.
    /// Edges without usable geometry count as straight (0°).
    pub fn turn_angle(graph: &StreetGraph, from: EdgeId, to: EdgeId) -> f64 {
        match (graph.edge(from).arrival_bearing(), graph.edge(to).departure_bearing()) {
            (Some(arrive), Some(depart)) => (depart - arrive).rem_euclid(360.0),
            _ => 0.0,
        }
    }

    fn driving_cost(&self, graph: &StreetGraph, from: EdgeId, to: EdgeId, direction: TurnDirection) -> f64 {
        let cfg = &self.config;
        let vertex = graph.vertex(graph.edge(to).from);
        if vertex.traffic_signal {
            return cfg.car_at_light_secs;
        }
        let fast = |e: EdgeId| {
            graph
                .edge(e)
                .speed_override(TraverseMode::Car)
                .is_some_and(|s| s >= cfg.highway_speed_mps)
        };
        if fast(from) && fast(to) {
            return 0.0;
        }
        match direction {
            TurnDirection::Straight => cfg.car_straight_no_light_secs,
            TurnDirection::Right => cfg.car_right_no_light_secs,
            TurnDirection::Left | TurnDirection::UTurn => cfg.car_left_no_light_secs,
        }
    }

    fn non_driving_cost(&self, graph: &StreetGraph, to: EdgeId, angle: f64, direction: TurnDirection, speed: f64) -> f64 {
        let cfg = &self.config;
        let deviation = angle.min(360.0 - angle);
        let mut cost = if speed > 0.0 {
            deviation / 180.0 * cfg.non_driving_turn_m / speed
        } else {
            0.0
        };
        if graph.vertex(graph.edge(to).from).traffic_signal && direction != TurnDirection::Right {
            cost += cfg.non_driving_at_light_secs;
        }
        cost
    }
}

impl IntersectionTraversalCalculator for SimpleIntersectionTraversalCalculator {
    fn traversal_cost(
        &self,
        graph: &StreetGraph,
        from:  EdgeId,
        to:    EdgeId,
        mode:  TraverseMode,
        speed: f64,
    ) -> f64 {
        let angle = Self::turn_angle(graph, from, to);
        let direction = TurnDirection::from_angle(angle, &self.config);
        if mode.is_driving() {
            self.driving_cost(graph, from, to, direction)
        } else {
            self.non_driving_cost(graph, to, angle, direction, speed)
        }
    }
}
