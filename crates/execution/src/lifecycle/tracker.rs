//! Lifecycle tracker for session history.

use super::{EventData, RunCompletedData, SessionEvent, SessionEventType};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use trade_journal_domain::entities::SessionId;

/// Summary of a session's run history.
#[derive(Debug, Clone, Default)]
pub struct SessionSummary {
    /// Runs started.
    pub runs_started: u32,
    /// Runs that completed.
    pub runs_completed: u32,
    /// Runs that failed.
    pub runs_failed: u32,
    /// When the last run finished.
    pub last_run_at: Option<chrono::DateTime<chrono::Utc>>,
    /// Total P&L of the last completed run.
    pub last_total_pnl: Option<Decimal>,
    /// Message of the last failed run.
    pub last_error: Option<String>,
    /// Whether the session was deleted.
    pub deleted: bool,
}

/// Tracks lifecycle events for all sessions.
///
/// History lives in memory only; it is not part of the persisted blob.
pub struct LifecycleTracker {
    /// Events by session.
    events: Arc<RwLock<HashMap<SessionId, Vec<SessionEvent>>>>,
    /// Session summaries.
    summaries: Arc<RwLock<HashMap<SessionId, SessionSummary>>>,
}

impl LifecycleTracker {
    /// Creates a new lifecycle tracker.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Arc::new(RwLock::new(HashMap::new())),
            summaries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Records a session created event.
    pub async fn record_created(&self, session: SessionId, name: &str) {
        self.add_event(SessionEvent::new(
            SessionEventType::Created,
            session,
            EventData::None,
        ))
        .await;
        self.summaries.write().await.entry(session).or_default();

        info!(session_id = %session, session_name = name, "Session created");
    }

    /// Records a configuration update.
    pub async fn record_config_updated(&self, session: SessionId) {
        self.add_event(SessionEvent::new(
            SessionEventType::ConfigUpdated,
            session,
            EventData::None,
        ))
        .await;

        debug!(session_id = %session, "Session reconfigured");
    }

    /// Records the start of a simulation run.
    pub async fn record_run_started(&self, session: SessionId) {
        self.add_event(SessionEvent::new(
            SessionEventType::RunStarted,
            session,
            EventData::None,
        ))
        .await;

        self.summaries
            .write()
            .await
            .entry(session)
            .or_default()
            .runs_started += 1;

        info!(session_id = %session, "Simulation run started");
    }

    /// Records a completed run.
    pub async fn record_run_completed(&self, session: SessionId, data: RunCompletedData) {
        let event = SessionEvent::new(
            SessionEventType::RunCompleted,
            session,
            EventData::RunCompleted(data.clone()),
        );
        let finished_at = event.timestamp;
        self.add_event(event).await;

        {
            let mut summaries = self.summaries.write().await;
            let summary = summaries.entry(session).or_default();
            summary.runs_completed += 1;
            summary.last_run_at = Some(finished_at);
            summary.last_total_pnl = Some(data.total_pnl);
            summary.last_error = None;
        }

        info!(
            session_id = %session,
            trades = data.trade_count,
            total_pnl = %data.total_pnl,
            win_rate = %data.win_rate,
            duration_ms = data.duration_ms,
            "Simulation run completed"
        );
    }

    /// Records a failed run.
    pub async fn record_run_failed(&self, session: SessionId, message: &str) {
        let event = SessionEvent::new(
            SessionEventType::RunFailed,
            session,
            EventData::RunFailed {
                message: message.to_string(),
            },
        );
        let finished_at = event.timestamp;
        self.add_event(event).await;

        {
            let mut summaries = self.summaries.write().await;
            let summary = summaries.entry(session).or_default();
            summary.runs_failed += 1;
            summary.last_run_at = Some(finished_at);
            summary.last_error = Some(message.to_string());
        }

        warn!(session_id = %session, error = message, "Simulation run failed");
    }

    /// Records a session deletion.
    pub async fn record_deleted(&self, session: SessionId) {
        self.add_event(SessionEvent::new(
            SessionEventType::Deleted,
            session,
            EventData::None,
        ))
        .await;

        self.summaries
            .write()
            .await
            .entry(session)
            .or_default()
            .deleted = true;

        info!(session_id = %session, "Session deleted");
    }

    async fn add_event(&self, event: SessionEvent) {
        let mut events = self.events.write().await;
        events.entry(event.session).or_default().push(event);
    }

    /// Gets all events for a session, oldest first.
    pub async fn get_events(&self, session: &SessionId) -> Vec<SessionEvent> {
        self.events
            .read()
            .await
            .get(session)
            .cloned()
            .unwrap_or_default()
    }

    /// Gets the summary for a session.
    pub async fn get_summary(&self, session: &SessionId) -> Option<SessionSummary> {
        self.summaries.read().await.get(session).cloned()
    }
}

impl Default for LifecycleTracker {
    fn default() -> Self {
        Self::new()
    }
}
