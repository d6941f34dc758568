//! Trajectory generation
//!
//! Builds the 50-point output trajectory for one cycle: five anchor points
//! (two capturing the recent direction of travel, three lane-center
//! lookaheads), a cubic spline fit in a local frame aligned with the
//! reference heading, the unconsumed previous tail copied verbatim, and
//! new points paced so that one point per control interval holds the
//! target speed.

use nalgebra::{Rotation2, Vector2};

use crate::behavior::lane::lane_center;
use crate::common::{EgoPose, Point2D, Trajectory};
use crate::map::HighwayMap;
use crate::trajectory::spline::CubicSpline;

/// Control interval between trajectory points [s]
pub const TIME_STEP: f64 = 0.02;
/// Output trajectory length [points]
pub const TRAJECTORY_LEN: usize = 50;
/// Spacing of the lane-center lookahead anchors [m]
pub const LOOKAHEAD_STEP: f64 = 30.0;
/// Sampling chord length in the local frame [m]
pub const TARGET_X: f64 = 30.0;
/// Telemetry speed unit to [m/s]
pub const MPH_TO_MPS: f64 = 2.24;

/// Spline-based trajectory generator
#[derive(Debug, Clone, Copy, Default)]
pub struct TrajectoryGenerator;

impl TrajectoryGenerator {
    pub fn new() -> Self {
        TrajectoryGenerator
    }

    /// Produce the trajectory for this cycle.
    ///
    /// `ego.s` must already refer to the end of `previous` when the tail is
    /// non-empty (the caller handles that override); `target_speed` is in
    /// the telemetry speed unit.
    pub fn generate(
        &self,
        map: &HighwayMap,
        ego: &EgoPose,
        previous: &Trajectory,
        lane: usize,
        target_speed: f64,
    ) -> Trajectory {
        let unconsumed = previous.len();

        // Reference pose plus the two recent-heading anchors. With a usable
        // tail the bearing between its last two points captures the actual
        // direction of travel; otherwise extrapolate one step back along
        // the reported heading.
        let (ref_pos, ref_yaw, mut anchors) = if unconsumed < 2 {
            let yaw = ego.yaw_rad();
            let behind = Point2D::new(ego.x - yaw.cos(), ego.y - yaw.sin());
            (ego.position(), yaw, vec![behind, ego.position()])
        } else {
            let last = previous.points[unconsumed - 1];
            let prev = previous.points[unconsumed - 2];
            let yaw = (last.y - prev.y).atan2(last.x - prev.x);
            (last, yaw, vec![prev, last])
        };

        // Three lane-center lookahead anchors
        for i in 1..=3 {
            let wp = map.to_cartesian(ego.s + LOOKAHEAD_STEP * i as f64, lane_center(lane));
            anchors.push(wp);
        }

        // Into the local frame: reference at the origin with zero heading.
        // This keeps anchor x strictly increasing regardless of road
        // curvature, which the spline fit requires.
        let to_local = Rotation2::new(-ref_yaw);
        let mut local_x = Vec::with_capacity(anchors.len());
        let mut local_y = Vec::with_capacity(anchors.len());
        for p in &anchors {
            let v = to_local * Vector2::new(p.x - ref_pos.x, p.y - ref_pos.y);
            local_x.push(v.x);
            local_y.push(v.y);
        }
        let spline = CubicSpline::new(&local_x, &local_y);

        // Carry the unconsumed tail over verbatim; re-sampling committed
        // points would introduce a discontinuity at the seam
        let mut out = Trajectory::with_capacity(TRAJECTORY_LEN);
        out.points.extend_from_slice(&previous.points);

        // Split the chord to TARGET_X into n equal x steps so traversing
        // one step per control interval matches the target speed. Treating
        // the sub-steps as uniform in x is an approximation, acceptable
        // while TARGET_X is small against the road curvature.
        let target_y = spline.calc(TARGET_X);
        let target_dist = (TARGET_X.powi(2) + target_y.powi(2)).sqrt();
        let n = target_dist / (TIME_STEP * target_speed / MPH_TO_MPS);

        let to_world = Rotation2::new(ref_yaw);
        let mut x_local = 0.0;
        for _ in unconsumed..TRAJECTORY_LEN {
            x_local += TARGET_X / n;
            let v = to_world * Vector2::new(x_local, spline.calc(x_local));
            out.push(Point2D::new(v.x + ref_pos.x, v.y + ref_pos.y));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::HighwayMap;

    fn straight_map() -> HighwayMap {
        let x: Vec<f64> = (0..=10).map(|i| 50.0 * i as f64).collect();
        let y = vec![0.0; 11];
        let s = x.clone();
        let dx = vec![0.0; 11];
        let dy = vec![-1.0; 11];
        HighwayMap::from_waypoints(x, y, s, dx, dy, 550.0).unwrap()
    }

    fn ego_in_lane1(s: f64) -> EgoPose {
        // Lane 1 center is d = 6, which sits at y = -6 on this map
        EgoPose::new(s, -6.0, s, 6.0, 0.0, 0.0)
    }

    #[test]
    fn test_output_has_exactly_50_points() {
        let map = straight_map();
        let gen = TrajectoryGenerator::new();
        let traj = gen.generate(&map, &ego_in_lane1(10.0), &Trajectory::new(), 1, 49.5);
        assert_eq!(traj.len(), TRAJECTORY_LEN);
    }

    #[test]
    fn test_straight_road_keeps_lane_center() {
        let map = straight_map();
        let gen = TrajectoryGenerator::new();
        let traj = gen.generate(&map, &ego_in_lane1(10.0), &Trajectory::new(), 1, 49.5);
        for p in &traj.points {
            assert!((p.y + 6.0).abs() < 1e-6);
        }
        // Moving forward, never backward
        for w in traj.points.windows(2) {
            assert!(w[1].x > w[0].x);
        }
    }

    #[test]
    fn test_point_spacing_matches_target_speed() {
        let map = straight_map();
        let gen = TrajectoryGenerator::new();
        let target_speed = 49.5;
        let traj = gen.generate(&map, &ego_in_lane1(10.0), &Trajectory::new(), 1, target_speed);
        let expected = TIME_STEP * target_speed / MPH_TO_MPS;
        let mut prev = Point2D::new(10.0, -6.0);
        for p in &traj.points {
            assert!((prev.distance(p) - expected).abs() < 1e-6);
            prev = *p;
        }
    }

    #[test]
    fn test_previous_tail_copied_verbatim() {
        let map = straight_map();
        let gen = TrajectoryGenerator::new();
        let first = gen.generate(&map, &ego_in_lane1(10.0), &Trajectory::new(), 1, 49.5);

        // Vehicle consumed 10 points; re-plan from the remaining 40
        let tail = Trajectory::from_points(first.points[10..].to_vec());
        let end = tail.points[tail.len() - 1];
        let ego = EgoPose::new(end.x, end.y, end.x, 6.0, 0.0, 49.5);
        let second = gen.generate(&map, &ego, &tail, 1, 49.5);

        assert_eq!(second.len(), TRAJECTORY_LEN);
        for (carried, original) in second.points.iter().zip(tail.points.iter()) {
            assert_eq!(carried, original);
        }
    }

    #[test]
    fn test_full_previous_path_passes_through() {
        let map = straight_map();
        let gen = TrajectoryGenerator::new();
        let first = gen.generate(&map, &ego_in_lane1(10.0), &Trajectory::new(), 1, 49.5);
        let end = first.points[first.len() - 1];
        let ego = EgoPose::new(end.x, end.y, end.x, 6.0, 0.0, 49.5);
        let second = gen.generate(&map, &ego, &first, 1, 49.5);
        assert_eq!(second.points, first.points);
    }

    #[test]
    fn test_lane_change_bends_toward_new_center() {
        let map = straight_map();
        let gen = TrajectoryGenerator::new();
        // Planned for lane 0 (y = -2) while driving at lane 1 center
        let traj = gen.generate(&map, &ego_in_lane1(10.0), &Trajectory::new(), 0, 49.5);
        let last = traj.points[traj.len() - 1];
        assert!(last.y > -4.5);
        assert!(last.y < -1.5);
        // Still between the old and new centers, no wild excursion
        for p in &traj.points {
            assert!(p.y > -6.5 && p.y < -1.5);
        }
    }

    #[test]
    fn test_reference_heading_from_previous_tail() {
        let map = straight_map();
        let gen = TrajectoryGenerator::new();
        // Tail heading is due east even though the reported yaw says 45 deg
        let tail = Trajectory::from_xy(&[19.5, 20.0], &[-6.0, -6.0]);
        let ego = EgoPose::new(20.0, -6.0, 20.0, 6.0, 45.0, 49.5);
        let traj = gen.generate(&map, &ego, &tail, 1, 49.5);
        for p in &traj.points[2..] {
            assert!((p.y + 6.0).abs() < 1e-6);
        }
    }
}
