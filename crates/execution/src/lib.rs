//! Session orchestration for the trade journal.
//!
//! This crate wires the simulation engine to persistence:
//! - Session creation, reconfiguration and deletion
//! - One-shot simulation runs with an at-most-one-run-per-session guard
//! - Failure capture, so a broken run marks the session failed instead of
//!   propagating
//! - Lifecycle event history per session

/// Prelude module for convenient imports.
pub mod prelude;

/// Runtime configuration.
pub mod config;
/// Service and configuration errors.
pub mod error;
/// Session lifecycle tracking.
pub mod lifecycle;
/// Session service.
pub mod session;
