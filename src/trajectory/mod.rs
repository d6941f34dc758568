// Trajectory generation module

pub mod spline;
pub mod generator;

pub use spline::*;
pub use generator::*;
