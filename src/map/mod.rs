//! Static track map: waypoint storage and Frenet <-> Cartesian transforms
//!
//! The map is loaded once before any planning cycle runs and is read-only
//! afterwards. Waypoints are ordered by increasing arc length `s` and the
//! track wraps back to `s = 0` at `max_s`.

use std::f64::consts::{FRAC_PI_2, PI};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use itertools::Itertools;
use ordered_float::OrderedFloat;

use crate::common::{FrenetPoint, PlannerError, PlannerResult, Point2D};

/// Track centerline map
///
/// Parallel vectors hold waypoint world position `(x, y)`, arc length `s`
/// and the unit normal `(dx, dy)` pointing toward positive lateral offset.
#[derive(Debug, Clone)]
pub struct HighwayMap {
    x: Vec<f64>,
    y: Vec<f64>,
    s: Vec<f64>,
    dx: Vec<f64>,
    dy: Vec<f64>,
    max_s: f64,
}

impl HighwayMap {
    /// Build a map from parallel waypoint vectors.
    pub fn from_waypoints(
        x: Vec<f64>,
        y: Vec<f64>,
        s: Vec<f64>,
        dx: Vec<f64>,
        dy: Vec<f64>,
        max_s: f64,
    ) -> PlannerResult<Self> {
        let n = x.len();
        if y.len() != n || s.len() != n || dx.len() != n || dy.len() != n {
            return Err(PlannerError::InvalidParameter(
                "waypoint vectors must have equal length".to_string(),
            ));
        }
        if n < 2 {
            return Err(PlannerError::InvalidParameter(
                "map needs at least 2 waypoints".to_string(),
            ));
        }
        if !s.windows(2).all(|w| w[0] < w[1]) {
            return Err(PlannerError::MapError(
                "waypoint s values must be strictly increasing".to_string(),
            ));
        }
        if max_s <= s[n - 1] {
            return Err(PlannerError::MapError(format!(
                "max_s {} does not exceed last waypoint s {}",
                max_s,
                s[n - 1]
            )));
        }
        Ok(HighwayMap { x, y, s, dx, dy, max_s })
    }

    /// Load a map from a whitespace-separated waypoint file.
    ///
    /// One waypoint per row: `x y s dx dy`.
    pub fn from_file<P: AsRef<Path>>(path: P, max_s: f64) -> PlannerResult<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let mut x = Vec::new();
        let mut y = Vec::new();
        let mut s = Vec::new();
        let mut dx = Vec::new();
        let mut dy = Vec::new();

        for (lineno, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<f64> = line
                .split_whitespace()
                .map(|v| v.parse::<f64>())
                .collect::<Result<_, _>>()
                .map_err(|e| {
                    PlannerError::MapError(format!("line {}: {}", lineno + 1, e))
                })?;
            if fields.len() != 5 {
                return Err(PlannerError::MapError(format!(
                    "line {}: expected 5 fields, got {}",
                    lineno + 1,
                    fields.len()
                )));
            }
            x.push(fields[0]);
            y.push(fields[1]);
            s.push(fields[2]);
            dx.push(fields[3]);
            dy.push(fields[4]);
        }

        Self::from_waypoints(x, y, s, dx, dy, max_s)
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Arc length at which the track wraps back to zero.
    pub fn max_s(&self) -> f64 {
        self.max_s
    }

    pub fn waypoint(&self, i: usize) -> Point2D {
        Point2D::new(self.x[i], self.y[i])
    }

    /// Unit normal at waypoint `i`, pointing toward positive `d`.
    pub fn waypoint_normal(&self, i: usize) -> (f64, f64) {
        (self.dx[i], self.dy[i])
    }

    /// Index of the waypoint nearest to `(x, y)`.
    pub fn closest_waypoint(&self, x: f64, y: f64) -> usize {
        self.x
            .iter()
            .zip(self.y.iter())
            .position_min_by_key(|&(&wx, &wy)| {
                OrderedFloat((wx - x).powi(2) + (wy - y).powi(2))
            })
            .unwrap_or(0)
    }

    /// Index of the nearest waypoint that lies ahead of a vehicle at
    /// `(x, y)` with heading `theta` [rad].
    pub fn next_waypoint(&self, x: f64, y: f64, theta: f64) -> usize {
        let closest = self.closest_waypoint(x, y);
        let heading = (self.y[closest] - y).atan2(self.x[closest] - x);
        let mut angle = (theta - heading).abs();
        angle = angle.min(2.0 * PI - angle);
        if angle > PI / 4.0 {
            (closest + 1) % self.x.len()
        } else {
            closest
        }
    }

    /// Frenet -> Cartesian transform.
    ///
    /// `s` wraps modulo `max_s`. The point is found by extending along the
    /// heading of the bracketing waypoint segment by the residual arc
    /// length, then offsetting `d` perpendicular to it (positive `d` is to
    /// the right of the direction of travel).
    pub fn to_cartesian(&self, s: f64, d: f64) -> Point2D {
        let s = s.rem_euclid(self.max_s);
        let mut prev_wp = 0;
        while prev_wp + 1 < self.s.len() && s > self.s[prev_wp + 1] {
            prev_wp += 1;
        }
        let wp2 = (prev_wp + 1) % self.x.len();

        let heading =
            (self.y[wp2] - self.y[prev_wp]).atan2(self.x[wp2] - self.x[prev_wp]);
        let seg_s = s - self.s[prev_wp];
        let seg_x = self.x[prev_wp] + seg_s * heading.cos();
        let seg_y = self.y[prev_wp] + seg_s * heading.sin();

        let perp = heading - FRAC_PI_2;
        Point2D::new(seg_x + d * perp.cos(), seg_y + d * perp.sin())
    }

    /// Cartesian -> Frenet transform for a vehicle at `(x, y)` with
    /// heading `theta` [rad].
    pub fn to_frenet(&self, x: f64, y: f64, theta: f64) -> FrenetPoint {
        let next_wp = self.next_waypoint(x, y, theta);
        let prev_wp = if next_wp == 0 { self.x.len() - 1 } else { next_wp - 1 };

        let n_x = self.x[next_wp] - self.x[prev_wp];
        let n_y = self.y[next_wp] - self.y[prev_wp];
        let x_x = x - self.x[prev_wp];
        let x_y = y - self.y[prev_wp];

        // Project onto the segment between the bracketing waypoints
        let proj_norm = (x_x * n_x + x_y * n_y) / (n_x * n_x + n_y * n_y);
        let proj_x = proj_norm * n_x;
        let proj_y = proj_norm * n_y;

        let mut frenet_d =
            ((x_x - proj_x).powi(2) + (x_y - proj_y).powi(2)).sqrt();

        // Positive d lies to the right of the direction of travel
        let cross = n_x * x_y - n_y * x_x;
        if cross > 0.0 {
            frenet_d = -frenet_d;
        }

        let mut frenet_s = 0.0;
        for i in 0..prev_wp {
            frenet_s += self.waypoint(i).distance(&self.waypoint(i + 1));
        }
        frenet_s += (proj_x.powi(2) + proj_y.powi(2)).sqrt();

        FrenetPoint::new(frenet_s, frenet_d)
    }
}
