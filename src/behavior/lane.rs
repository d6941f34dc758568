//! Lane geometry predicates
//!
//! The road has three 4 m lanes; lateral offset `d` is measured from the
//! road centerline with positive `d` toward the outer lane, so lane `i`
//! spans the open interval `(4i, 4i + 4)`.

/// Lane width [m]
pub const LANE_WIDTH: f64 = 4.0;
/// Number of lanes on the ego side of the road
pub const LANE_COUNT: usize = 3;

/// Lateral offset of the center of `lane`.
pub fn lane_center(lane: usize) -> f64 {
    LANE_WIDTH / 2.0 + LANE_WIDTH * lane as f64
}

/// True iff offset `d` lies strictly inside `lane`.
///
/// Boundary offsets (exactly on a lane line) belong to no lane.
pub fn in_lane(d: f64, lane: usize) -> bool {
    d > lane_center(lane) - LANE_WIDTH / 2.0 && d < lane_center(lane) + LANE_WIDTH / 2.0
}

/// Lane index for offset `d`, or `None` if `d` is on a lane line or off
/// the roadway.
pub fn lane_for_offset(d: f64) -> Option<usize> {
    (0..LANE_COUNT).find(|&lane| in_lane(d, lane))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_center() {
        assert_eq!(lane_center(0), 2.0);
        assert_eq!(lane_center(1), 6.0);
        assert_eq!(lane_center(2), 10.0);
    }

    #[test]
    fn test_in_lane_interior() {
        assert!(in_lane(2.0, 0));
        assert!(in_lane(6.0, 1));
        assert!(in_lane(10.0, 2));
        assert!(in_lane(3.9, 0));
        assert!(in_lane(4.1, 1));
    }

    #[test]
    fn test_lane_boundaries_excluded() {
        // A vehicle exactly on the lane line is in neither adjacent lane
        assert!(!in_lane(4.0, 0));
        assert!(!in_lane(4.0, 1));
        assert!(!in_lane(8.0, 1));
        assert!(!in_lane(8.0, 2));
        assert!(!in_lane(0.0, 0));
        assert!(!in_lane(12.0, 2));
    }

    #[test]
    fn test_lane_for_offset() {
        assert_eq!(lane_for_offset(2.0), Some(0));
        assert_eq!(lane_for_offset(6.0), Some(1));
        assert_eq!(lane_for_offset(10.0), Some(2));
        assert_eq!(lane_for_offset(4.0), None);
        assert_eq!(lane_for_offset(-1.0), None);
        assert_eq!(lane_for_offset(13.0), None);
    }
}
