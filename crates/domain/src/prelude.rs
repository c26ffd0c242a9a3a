//! Prelude module for convenient imports.
//!
//! ```rust
//! use trade_journal_domain::prelude::*;
//! ```

pub use crate::entities::{Session, SessionId, Trade, TradeId};
pub use crate::enums::{SessionStatus, TradeDirection};
pub use crate::error::{DomainError, ValidationError};
pub use crate::metrics::{EQUITY_CURVE_SEED, EquityPoint, SessionMetrics, calculate_metrics};
pub use crate::value_objects::{DateRange, SessionConfig, SessionParameters};
