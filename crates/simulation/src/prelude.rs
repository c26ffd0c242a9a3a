//! Prelude module for convenient imports.
//!
//! # Example
//!
//! ```rust
//! use trade_journal_simulation::prelude::*;
//! ```

pub use crate::error::SimulationError;
pub use crate::generator::{GeneratedTrades, TradeGenerator, target_trade_count};
pub use crate::monte_carlo::{AggregateResult, MonteCarloRunner};
pub use crate::runner::{SimulationOutcome, run_simulation};
