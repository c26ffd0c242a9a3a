use rust_decimal::Decimal;
use thiserror::Error;
use trade_journal_domain::error::ValidationError;

/// Errors raised while simulating trades.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("invalid distribution parameter {field}: {reason}")]
    Distribution { field: &'static str, reason: String },

    #[error("numeric conversion failed for {0}")]
    Conversion(&'static str),

    #[error("session would generate {requested} trades, the limit is {limit}")]
    TooManyTrades { requested: usize, limit: usize },

    #[error("arithmetic overflow computing {0}")]
    Overflow(&'static str),

    #[error("equity grew past the simulation limit of {limit}")]
    EquityLimit { limit: Decimal },

    #[error("monte carlo needs at least one iteration")]
    NoIterations,
}
