pub mod session;
pub mod trade;

pub use session::{Session, SessionId};
pub use trade::{Trade, TradeId};
