//! Cue scheduling module
//!
//! Turns the remaining focus budget into randomized cue offsets.

pub mod cue_plan;
pub mod partition;

// Re-export main types
pub use cue_plan::CuePlan;
pub use partition::{derive_plan, partition_interval};
