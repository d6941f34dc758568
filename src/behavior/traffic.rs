//! Traffic vehicle model
//!
//! One sensed vehicle for one planning cycle: a transient value built from
//! a `TrafficObservation` plus pure threat/merge predicates. No identity
//! or state is kept across cycles.

use nalgebra::Vector2;

use crate::behavior::lane;
use crate::common::TrafficObservation;

/// One sensed vehicle with its constant-velocity projection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrafficVehicle {
    pub speed: f64,
    pub s: f64,
    pub d: f64,
    /// Longitudinal position once the ego vehicle has consumed the rest of
    /// its committed trajectory (`unconsumed` steps of `dt` from now)
    pub future_s: f64,
}

impl TrafficVehicle {
    pub fn from_observation(obs: &TrafficObservation, unconsumed: usize, dt: f64) -> Self {
        let speed = Vector2::new(obs.vx, obs.vy).norm();
        let future_s = obs.s + unconsumed as f64 * dt * speed;
        TrafficVehicle {
            speed,
            s: obs.s,
            d: obs.d,
            future_s,
        }
    }

    pub fn in_lane(&self, lane: usize) -> bool {
        lane::in_lane(self.d, lane)
    }

    /// True iff this vehicle will be ahead of the ego position and within
    /// `close_distance` of it. Evaluated on the projected `future_s`.
    pub fn is_too_close(&self, ego_s: f64, close_distance: f64) -> bool {
        self.future_s > ego_s && self.future_s - ego_s < close_distance
    }

    /// True iff this vehicle makes a merge next to the ego position unsafe.
    ///
    /// Evaluated on the *current* `s`, not the projection: the merge window
    /// is independent of how long the remaining trajectory takes to consume.
    pub fn blocks_merge(&self, ego_s: f64, behind: f64, ahead: f64) -> bool {
        self.s > ego_s - behind && self.s < ego_s + ahead
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_and_future_s() {
        let obs = TrafficObservation::new(3.0, 4.0, 100.0, 6.0);
        let v = TrafficVehicle::from_observation(&obs, 10, 0.02);
        assert!((v.speed - 5.0).abs() < 1e-10);
        // 100 + 10 * 0.02 * 5
        assert!((v.future_s - 101.0).abs() < 1e-10);
    }

    #[test]
    fn test_future_s_with_empty_previous_path() {
        let obs = TrafficObservation::new(10.0, 0.0, 115.0, 6.0);
        let v = TrafficVehicle::from_observation(&obs, 0, 0.02);
        assert!((v.future_s - 115.0).abs() < 1e-10);
    }

    #[test]
    fn test_is_too_close() {
        let obs = TrafficObservation::new(10.0, 0.0, 115.0, 6.0);
        let v = TrafficVehicle::from_observation(&obs, 0, 0.02);
        assert!(v.is_too_close(100.0, 25.0));
        // Behind the ego position
        assert!(!v.is_too_close(120.0, 25.0));
        // Ahead but out of range
        assert!(!v.is_too_close(80.0, 25.0));
    }

    #[test]
    fn test_blocks_merge_uses_current_position() {
        // Fast vehicle whose projection leaves the window but whose current
        // position is inside it still blocks the merge
        let obs = TrafficObservation::new(30.0, 0.0, 105.0, 2.0);
        let v = TrafficVehicle::from_observation(&obs, 50, 0.02);
        assert!(v.future_s > 130.0);
        assert!(v.blocks_merge(100.0, 30.0, 30.0));
        assert!(!v.blocks_merge(160.0, 30.0, 30.0));
    }

    #[test]
    fn test_blocks_merge_asymmetric_window() {
        let obs = TrafficObservation::new(10.0, 0.0, 125.0, 2.0);
        let v = TrafficVehicle::from_observation(&obs, 0, 0.02);
        assert!(v.blocks_merge(100.0, 30.0, 30.0));
        assert!(!v.blocks_merge(100.0, 30.0, 20.0));
    }
}
