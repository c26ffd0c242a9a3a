//! Session lifecycle tracking.
//!
//! Records what happened to each session:
//! - Creation and reconfiguration
//! - Simulation runs, completed or failed
//! - Deletion

mod events;
mod tracker;

pub use events::*;
pub use tracker::*;
