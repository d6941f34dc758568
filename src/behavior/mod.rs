// Behavior planning module

pub mod lane;
pub mod traffic;
pub mod planner;

pub use traffic::*;
pub use planner::*;
