//! Synthetic trade generation and simulation runs.
//!
//! - [`generator::TradeGenerator`] draws a plausible trade sequence from a
//!   session configuration using an injected random source.
//! - [`runner::run_simulation`] generates trades and reduces them to metrics.
//! - [`monte_carlo::MonteCarloRunner`] repeats simulations to summarise the
//!   spread of outcomes.

/// Prelude module for convenient imports.
pub mod prelude;

/// Simulation error types.
pub mod error;
/// Trade generator.
pub mod generator;
/// Monte Carlo aggregation.
pub mod monte_carlo;
/// One-shot simulation runner.
pub mod runner;
