//! Lifecycle events for session tracking.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use trade_journal_domain::entities::SessionId;

/// Type of lifecycle event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEventType {
    /// Session was created.
    Created,
    /// Session configuration was replaced.
    ConfigUpdated,
    /// A simulation run started.
    RunStarted,
    /// A simulation run completed.
    RunCompleted,
    /// A simulation run failed.
    RunFailed,
    /// Session was deleted.
    Deleted,
}

/// A lifecycle event for a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEvent {
    /// Event ID.
    pub id: String,
    /// Event type.
    pub event_type: SessionEventType,
    /// Session the event belongs to.
    pub session: SessionId,
    /// Timestamp.
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Event-specific data.
    pub data: EventData,
}

impl SessionEvent {
    /// Creates a new lifecycle event stamped with the current time.
    pub fn new(event_type: SessionEventType, session: SessionId, data: EventData) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            event_type,
            session,
            timestamp: chrono::Utc::now(),
            data,
        }
    }
}

/// Event-specific data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EventData {
    /// No payload.
    None,
    /// Run completed data.
    RunCompleted(RunCompletedData),
    /// Run failure message.
    RunFailed { message: String },
}

/// Data for a completed run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunCompletedData {
    /// Number of generated trades.
    pub trade_count: usize,
    /// Total P&L of the run.
    pub total_pnl: Decimal,
    /// Win rate in percent.
    pub win_rate: Decimal,
    /// Wall-clock duration including the artificial delay.
    pub duration_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_event_creation() {
        let session = SessionId::new();
        let event = SessionEvent::new(
            SessionEventType::RunFailed,
            session,
            EventData::RunFailed {
                message: "at least one instrument is required".to_string(),
            },
        );

        assert_eq!(event.event_type, SessionEventType::RunFailed);
        assert_eq!(event.session, session);
        assert!(!event.id.is_empty());
    }
}
