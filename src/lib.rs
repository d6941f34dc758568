//! highway_planner - decision-and-trajectory core for highway driving
//!
//! Given one telemetry snapshot per control cycle (ego pose, the
//! unconsumed tail of the previous plan, and sensed traffic), this crate
//! decides whether to change lanes, ramps the target speed, and emits a
//! smooth 50-point trajectory via local-frame cubic spline interpolation.

// Core modules
pub mod common;
pub mod utils;

// Planning modules
pub mod map;
pub mod behavior;
pub mod trajectory;
pub mod planner;

// Re-export common types for convenience
pub use common::{EgoPose, FrenetPoint, Point2D, Telemetry, TrafficObservation, Trajectory};
pub use common::{PlannerError, PlannerResult};
pub use behavior::{BehaviorConfig, BehaviorPlanner, PlannerState, TrafficVehicle};
pub use map::HighwayMap;
pub use planner::HighwayPlanner;
pub use trajectory::TrajectoryGenerator;
