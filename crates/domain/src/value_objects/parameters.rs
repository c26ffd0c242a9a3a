//! Numeric parameters driving a trade simulation.

use crate::error::ValidationError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Largest return a trade can draw, as a multiple of the average (1.5).
const WORST_LOSS_FACTOR: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// Numeric parameters for one simulation run.
///
/// Missing fields in serialized data fall back to the defaults:
/// win rate 0.55, average profit 2.5%, average loss 1.5%,
/// 1.5 trades per day, starting capital 10 000 and 2% risk per trade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionParameters {
    /// Capital used to size the first position.
    pub starting_capital: Decimal,
    /// Fraction of running equity committed to each trade, in (0, 1).
    pub risk_per_trade: Decimal,
    /// Average number of trades per calendar day.
    pub trades_per_day: Decimal,
    /// Probability that a trade is a winner, in (0, 1).
    pub win_rate: Decimal,
    /// Average winning trade, in percent of position size.
    pub avg_profit_pct: Decimal,
    /// Average losing trade magnitude, in percent of position size.
    pub avg_loss_pct: Decimal,
}

impl Default for SessionParameters {
    fn default() -> Self {
        Self {
            starting_capital: Decimal::from(10_000),
            risk_per_trade: Decimal::new(2, 2),  // 2%
            trades_per_day: Decimal::new(15, 1), // 1.5
            win_rate: Decimal::new(55, 2),       // 55%
            avg_profit_pct: Decimal::new(25, 1), // 2.5%
            avg_loss_pct: Decimal::new(15, 1),   // 1.5%
        }
    }
}

impl SessionParameters {
    /// Sets the starting capital.
    #[must_use]
    pub fn with_starting_capital(mut self, capital: Decimal) -> Self {
        self.starting_capital = capital;
        self
    }

    /// Sets the risk per trade fraction.
    #[must_use]
    pub fn with_risk_per_trade(mut self, risk: Decimal) -> Self {
        self.risk_per_trade = risk;
        self
    }

    /// Sets the trades per day rate.
    #[must_use]
    pub fn with_trades_per_day(mut self, rate: Decimal) -> Self {
        self.trades_per_day = rate;
        self
    }

    /// Sets the win probability.
    #[must_use]
    pub fn with_win_rate(mut self, win_rate: Decimal) -> Self {
        self.win_rate = win_rate;
        self
    }

    /// Sets the average profit percentage.
    #[must_use]
    pub fn with_avg_profit_pct(mut self, pct: Decimal) -> Self {
        self.avg_profit_pct = pct;
        self
    }

    /// Sets the average loss percentage.
    #[must_use]
    pub fn with_avg_loss_pct(mut self, pct: Decimal) -> Self {
        self.avg_loss_pct = pct;
        self
    }

    /// Checks every parameter against its allowed range.
    ///
    /// # Errors
    /// Returns the first parameter found out of range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        positive("starting_capital", self.starting_capital)?;
        open_unit_interval("risk_per_trade", self.risk_per_trade)?;
        positive("trades_per_day", self.trades_per_day)?;
        open_unit_interval("win_rate", self.win_rate)?;
        positive("avg_profit_pct", self.avg_profit_pct)?;
        positive("avg_loss_pct", self.avg_loss_pct)?;

        // A loss can reach 1.5x the average; it must not wipe out the equity.
        let worst_loss_pct = self.risk_per_trade * self.avg_loss_pct * WORST_LOSS_FACTOR;
        if worst_loss_pct >= Decimal::ONE_HUNDRED {
            return Err(ValidationError::InvalidParameter {
                field: "avg_loss_pct",
                reason: format!(
                    "worst-case loss of {worst_loss_pct}% of equity per trade must stay below 100%"
                ),
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: Decimal) -> Result<(), ValidationError> {
    if value <= Decimal::ZERO {
        return Err(ValidationError::InvalidParameter {
            field,
            reason: format!("must be greater than 0, got {value}"),
        });
    }
    Ok(())
}

fn open_unit_interval(field: &'static str, value: Decimal) -> Result<(), ValidationError> {
    if value <= Decimal::ZERO || value >= Decimal::ONE {
        return Err(ValidationError::InvalidParameter {
            field,
            reason: format!("must be between 0 and 1 exclusive, got {value}"),
        });
    }
    Ok(())
}
