//! Common types and error definitions for highway_planner

pub mod types;
pub mod error;

pub use types::*;
pub use error::*;
