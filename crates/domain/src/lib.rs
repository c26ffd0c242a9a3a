//! Core domain model for the trade journal backtest engine.
//!
//! This crate defines the session and trade entities, their validation
//! rules and status transitions, and the pure metrics aggregation that
//! reduces a list of trades to performance statistics.

/// Prelude module for convenient imports.
pub mod prelude;

/// Session and trade entities.
pub mod entities;
/// Enumerations shared across the domain.
pub mod enums;
/// Domain error types.
pub mod error;
/// Performance metrics and their calculation.
pub mod metrics;
/// Value objects describing session configuration.
pub mod value_objects;
