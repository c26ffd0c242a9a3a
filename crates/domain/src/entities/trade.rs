use crate::enums::TradeDirection;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TradeId(pub Uuid);

impl fmt::Display for TradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One simulated round-trip trade.
///
/// Entry and exit prices are display values drawn independently of
/// `pnl`; a losing long may well show an exit above its entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub id: TradeId,
    pub instrument: String,
    pub strategy: String,
    pub entry_time: DateTime<Utc>,
    pub exit_time: DateTime<Utc>,
    pub entry_price: Decimal,
    pub exit_price: Decimal,
    pub quantity: Decimal,
    pub direction: TradeDirection,
    /// Capital committed to the trade.
    pub position_size: Decimal,
    /// Signed return on the position, in percent.
    pub pnl_pct: Decimal,
    /// Realized profit or loss.
    pub pnl: Decimal,
    pub fees: Decimal,
}

impl Trade {
    #[must_use]
    pub fn is_win(&self) -> bool {
        self.pnl > Decimal::ZERO
    }

    #[must_use]
    pub fn is_loss(&self) -> bool {
        self.pnl < Decimal::ZERO
    }
}
