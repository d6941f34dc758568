//! Common types used throughout highway_planner

use nalgebra::Vector2;

/// 2D point in world coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point2D) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    pub fn to_vector(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }
}

impl From<(f64, f64)> for Point2D {
    fn from(tuple: (f64, f64)) -> Self {
        Self { x: tuple.0, y: tuple.1 }
    }
}

impl From<Vector2<f64>> for Point2D {
    fn from(v: Vector2<f64>) -> Self {
        Self { x: v[0], y: v[1] }
    }
}

/// Track-relative position: arc length along the centerline plus signed
/// lateral offset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrenetPoint {
    pub s: f64,
    pub d: f64,
}

impl FrenetPoint {
    pub fn new(s: f64, d: f64) -> Self {
        Self { s, d }
    }
}

/// Ego vehicle localization for one cycle
///
/// `yaw_deg` is reported in degrees by the telemetry source; `speed` is in
/// the telemetry speed unit (mph).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EgoPose {
    pub x: f64,
    pub y: f64,
    pub s: f64,
    pub d: f64,
    pub yaw_deg: f64,
    pub speed: f64,
}

impl EgoPose {
    pub fn new(x: f64, y: f64, s: f64, d: f64, yaw_deg: f64, speed: f64) -> Self {
        Self { x, y, s, d, yaw_deg, speed }
    }

    pub fn yaw_rad(&self) -> f64 {
        self.yaw_deg.to_radians()
    }

    pub fn position(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }
}

/// One sensed vehicle as delivered by sensor fusion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrafficObservation {
    pub vx: f64,
    pub vy: f64,
    pub s: f64,
    pub d: f64,
}

impl TrafficObservation {
    pub fn new(vx: f64, vy: f64, s: f64, d: f64) -> Self {
        Self { vx, vy, s, d }
    }
}

/// Decoded telemetry for one control cycle
///
/// `previous_path` holds the points of the last emitted trajectory the
/// vehicle has not consumed yet; `end_path` is the Frenet position at its
/// end (meaningful only when `previous_path` is non-empty).
#[derive(Debug, Clone)]
pub struct Telemetry {
    pub ego: EgoPose,
    pub previous_path: Trajectory,
    pub end_path: FrenetPoint,
    pub traffic: Vec<TrafficObservation>,
}

/// Time-parameterized sequence of world points, one per control interval
#[derive(Debug, Clone)]
pub struct Trajectory {
    pub points: Vec<Point2D>,
}

impl Trajectory {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    pub fn with_capacity(n: usize) -> Self {
        Self { points: Vec::with_capacity(n) }
    }

    pub fn from_points(points: Vec<Point2D>) -> Self {
        Self { points }
    }

    pub fn from_xy(x: &[f64], y: &[f64]) -> Self {
        assert_eq!(x.len(), y.len());
        let points = x.iter().zip(y.iter())
            .map(|(&x, &y)| Point2D::new(x, y))
            .collect();
        Self { points }
    }

    pub fn push(&mut self, point: Point2D) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn x_coords(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.x).collect()
    }

    pub fn y_coords(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.y).collect()
    }

    pub fn total_length(&self) -> f64 {
        if self.points.len() < 2 {
            return 0.0;
        }
        self.points.windows(2)
            .map(|w| w[0].distance(&w[1]))
            .sum()
    }
}

impl Default for Trajectory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point2d_distance() {
        let p1 = Point2D::new(0.0, 0.0);
        let p2 = Point2D::new(3.0, 4.0);
        assert!((p1.distance(&p2) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_ego_pose_yaw_rad() {
        let ego = EgoPose::new(0.0, 0.0, 0.0, 6.0, 90.0, 0.0);
        assert!((ego.yaw_rad() - std::f64::consts::FRAC_PI_2).abs() < 1e-10);
    }

    #[test]
    fn test_trajectory_from_xy() {
        let traj = Trajectory::from_xy(&[0.0, 1.0], &[2.0, 3.0]);
        assert_eq!(traj.len(), 2);
        assert_eq!(traj.points[1], Point2D::new(1.0, 3.0));
        assert_eq!(traj.x_coords(), vec![0.0, 1.0]);
        assert_eq!(traj.y_coords(), vec![2.0, 3.0]);
    }

    #[test]
    fn test_trajectory_total_length() {
        let traj = Trajectory::from_xy(&[0.0, 1.0, 1.0], &[0.0, 0.0, 1.0]);
        assert!((traj.total_length() - 2.0).abs() < 1e-10);
    }
}
