//! Behavior planner: lane choice and target speed
//!
//! One deterministic pass per cycle over the traffic vehicles. A vehicle
//! closing in ahead in the current lane raises a threat; on a threat the
//! planner tries to change lane (left first, then right, at most one
//! change per cycle) and backs the target speed off by a fixed step.
//! Without a threat the target speed ramps back up toward the limit. The
//! per-cycle step is a rate limiter keeping longitudinal jerk bounded, not
//! an acceleration model.

use crate::behavior::lane::LANE_COUNT;
use crate::behavior::traffic::TrafficVehicle;

/// Target speed ceiling [mph]
pub const SPEED_LIMIT: f64 = 50.0;
/// Threat distance ahead of the ego position [m]
pub const CLOSE_DISTANCE: f64 = 25.0;
/// Merge safety window half-width [m]
pub const MERGE_DISTANCE: f64 = 30.0;
/// Target speed step per cycle [mph]
pub const REACTION: f64 = 0.5;
/// Lane at startup
pub const INITIAL_LANE: usize = 1;

/// Behavior thresholds
///
/// The merge window is a `behind`/`ahead` pair because observed deployments
/// disagree on its shape (symmetric +-30 versus -30/+20); the default is
/// the symmetric variant.
#[derive(Debug, Clone, Copy)]
pub struct BehaviorConfig {
    pub speed_limit: f64,
    pub close_distance: f64,
    pub merge_behind: f64,
    pub merge_ahead: f64,
    pub reaction: f64,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        BehaviorConfig {
            speed_limit: SPEED_LIMIT,
            close_distance: CLOSE_DISTANCE,
            merge_behind: MERGE_DISTANCE,
            merge_ahead: MERGE_DISTANCE,
            reaction: REACTION,
        }
    }
}

/// Mutable planner state carried across cycles
///
/// Owned by the caller and threaded through explicitly, one value per ego
/// vehicle. Resets to lane 1 / speed 0 on startup; the target speed has no
/// lower clamp, so sustained threats can drive it negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannerState {
    pub lane: usize,
    pub target_speed: f64,
}

impl PlannerState {
    pub fn new() -> Self {
        PlannerState {
            lane: INITIAL_LANE,
            target_speed: 0.0,
        }
    }
}

impl Default for PlannerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-cycle lane and speed decision logic
#[derive(Debug, Clone, Copy, Default)]
pub struct BehaviorPlanner {
    config: BehaviorConfig,
}

impl BehaviorPlanner {
    pub fn new() -> Self {
        Self::with_config(BehaviorConfig::default())
    }

    pub fn with_config(config: BehaviorConfig) -> Self {
        BehaviorPlanner { config }
    }

    pub fn config(&self) -> &BehaviorConfig {
        &self.config
    }

    /// Run one decision pass, updating `state` in place.
    ///
    /// `ego_s` is the longitudinal position the ego vehicle will have once
    /// it finishes its committed trajectory tail.
    pub fn plan(&self, state: &mut PlannerState, ego_s: f64, traffic: &[TrafficVehicle]) {
        let threat = traffic.iter().any(|v| {
            v.in_lane(state.lane) && v.is_too_close(ego_s, self.config.close_distance)
        });

        if threat {
            // Left before right; the first safe candidate wins and no
            // further direction is evaluated this cycle
            let safe_lane = Self::candidate_lanes(state.lane)
                .find(|&candidate| self.merge_is_safe(candidate, ego_s, traffic));
            if let Some(lane) = safe_lane {
                state.lane = lane;
            }
            state.target_speed -= self.config.reaction;
        } else if state.target_speed < self.config.speed_limit - self.config.reaction {
            state.target_speed += self.config.reaction;
        }
    }

    /// Adjacent lanes in evaluation order: left, then right.
    fn candidate_lanes(lane: usize) -> impl Iterator<Item = usize> {
        let left = if lane > 0 { Some(lane - 1) } else { None };
        let right = if lane + 1 < LANE_COUNT { Some(lane + 1) } else { None };
        left.into_iter().chain(right)
    }

    /// A candidate lane is safe iff no vehicle in it currently sits inside
    /// the merge window around the ego position.
    fn merge_is_safe(&self, candidate: usize, ego_s: f64, traffic: &[TrafficVehicle]) -> bool {
        !traffic.iter().any(|v| {
            v.in_lane(candidate)
                && v.blocks_merge(ego_s, self.config.merge_behind, self.config.merge_ahead)
        })
    }
}
