//! Aggregate performance metrics for a simulated session.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

mod calculator;
pub mod math;

pub use calculator::{EQUITY_CURVE_SEED, calculate_metrics};

/// One point of the equity curve, stamped with the trade's exit time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub date: DateTime<Utc>,
    pub equity: Decimal,
}

/// Aggregate statistics over a list of trades.
///
/// Monetary and percentage values are rounded to two decimal places.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionMetrics {
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    /// Share of winning trades, in percent.
    pub win_rate: Decimal,
    pub total_pnl: Decimal,
    pub total_fees: Decimal,
    pub average_win: Decimal,
    /// Magnitude of the average losing trade.
    pub average_loss: Decimal,
    /// Gross profit over gross loss; 0 when there are no losing trades.
    pub profit_factor: Decimal,
    /// Largest peak-to-trough decline of cumulative P&L.
    pub max_drawdown: Decimal,
    pub expectancy: Decimal,
    pub sharpe_ratio: Decimal,
    pub equity_curve: Vec<EquityPoint>,
}
