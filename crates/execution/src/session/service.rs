//! Session service: creation, persistence and simulation runs.

use super::run_guard::{RunGuard, RunRegistry};
use crate::config::ExecutionConfig;
use crate::error::ServiceError;
use crate::lifecycle::{LifecycleTracker, RunCompletedData, SessionEvent};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;
use tracing::{debug, warn};
use trade_journal_data::{SessionRepository, SessionStore};
use trade_journal_domain::entities::{Session, SessionId};
use trade_journal_domain::enums::SessionStatus;
use trade_journal_domain::value_objects::SessionConfig;
use trade_journal_simulation::runner::{SimulationOutcome, run_simulation};

const INTERRUPTED_RUN: &str = "run was interrupted before completing";

/// Orchestrates sessions over an injected [`SessionStore`].
///
/// At most one run or mutation is in flight per session; a second request
/// is rejected with [`ServiceError::RunInProgress`]. Failures inside a run
/// are recorded on the session rather than returned.
pub struct SessionService {
    repository: SessionRepository,
    tracker: LifecycleTracker,
    config: ExecutionConfig,
    rng: Mutex<StdRng>,
    runs: RunRegistry,
}

impl SessionService {
    /// Loads sessions from `store` and marks runs left `running` by an
    /// earlier process as failed.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read or written.
    pub async fn open(
        store: Arc<dyn SessionStore>,
        config: ExecutionConfig,
    ) -> Result<Self, ServiceError> {
        let repository = SessionRepository::open(store).await?;
        let service = Self {
            repository,
            tracker: LifecycleTracker::new(),
            rng: Mutex::new(config.rng()),
            config,
            runs: RunRegistry::default(),
        };
        service.recover_interrupted().await?;
        Ok(service)
    }

    async fn recover_interrupted(&self) -> Result<(), ServiceError> {
        let stale = self
            .repository
            .list()
            .await
            .into_iter()
            .filter(|s| s.status == SessionStatus::Running);

        for mut session in stale {
            warn!(session_id = %session.id, "Marking interrupted run as failed");
            session.fail(INTERRUPTED_RUN)?;
            self.repository.update(session).await?;
        }
        Ok(())
    }

    /// Returns the service configuration.
    #[must_use]
    pub fn config(&self) -> &ExecutionConfig {
        &self.config
    }

    /// Returns the lifecycle tracker.
    #[must_use]
    pub fn tracker(&self) -> &LifecycleTracker {
        &self.tracker
    }

    /// Creates and persists a new session.
    ///
    /// # Errors
    /// Returns a validation error for a blank name or invalid config, or a
    /// storage error if persisting fails.
    pub async fn create_session(
        &self,
        name: impl Into<String>,
        config: SessionConfig,
    ) -> Result<Session, ServiceError> {
        let session = Session::new(name, config)?;
        self.repository.insert(session.clone()).await?;
        self.tracker.record_created(session.id, &session.name).await;
        Ok(session)
    }

    /// Returns all sessions in creation order.
    pub async fn list_sessions(&self) -> Vec<Session> {
        self.repository.list().await
    }

    /// Returns one session.
    ///
    /// # Errors
    /// Returns [`ServiceError::NotFound`] for an unknown ID.
    pub async fn get_session(&self, id: SessionId) -> Result<Session, ServiceError> {
        self.repository
            .find(id)
            .await
            .ok_or(ServiceError::NotFound(id))
    }

    /// Replaces a session's configuration, discarding previous results.
    ///
    /// # Errors
    /// Fails if the session is unknown, busy, or the config is invalid.
    pub async fn update_config(
        &self,
        id: SessionId,
        config: SessionConfig,
    ) -> Result<Session, ServiceError> {
        let _guard = self.acquire(id)?;
        let mut session = self.get_session(id).await?;
        session.update_config(config)?;
        self.repository.update(session.clone()).await?;
        self.tracker.record_config_updated(id).await;
        Ok(session)
    }

    /// Deletes a session.
    ///
    /// # Errors
    /// Fails if the session is unknown or busy.
    pub async fn delete_session(&self, id: SessionId) -> Result<(), ServiceError> {
        let _guard = self.acquire(id)?;
        if !self.repository.delete(id).await? {
            return Err(ServiceError::NotFound(id));
        }
        self.tracker.record_deleted(id).await;
        Ok(())
    }

    /// Runs the simulation for a session and stores the results.
    ///
    /// Safe to call again after completion: results are replaced. Returns
    /// the session in `completed` or `failed` status.
    ///
    /// # Errors
    /// Returns [`ServiceError::NotFound`] for an unknown ID,
    /// [`ServiceError::RunInProgress`] if the session is busy, or a storage
    /// error if the session cannot be persisted.
    pub async fn run(&self, id: SessionId) -> Result<Session, ServiceError> {
        let _guard = self.acquire(id)?;
        let mut session = self.get_session(id).await?;

        // Holding the slot means nothing else is running; the status is stale.
        if session.status == SessionStatus::Running {
            session.fail(INTERRUPTED_RUN)?;
        }
        session.begin_run()?;
        self.repository.update(session.clone()).await?;
        self.tracker.record_run_started(id).await;

        let started = Instant::now();
        if !self.config.simulation_delay.is_zero() {
            tokio::time::sleep(self.config.simulation_delay).await;
        }

        match self.simulate(&session.config).await {
            Ok(outcome) => {
                debug!(
                    session_id = %id,
                    final_equity = %outcome.final_equity,
                    peak_equity = %outcome.peak_equity,
                    "Simulation finished"
                );
                let data = RunCompletedData {
                    trade_count: outcome.trades.len(),
                    total_pnl: outcome.metrics.total_pnl,
                    win_rate: outcome.metrics.win_rate,
                    duration_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
                };
                session.complete(outcome.trades, outcome.metrics)?;
                self.repository.update(session.clone()).await?;
                self.tracker.record_run_completed(id, data).await;
            }
            Err(message) => {
                session.fail(message.clone())?;
                self.repository.update(session.clone()).await?;
                self.tracker.record_run_failed(id, &message).await;
            }
        }

        Ok(session)
    }

    /// Returns the lifecycle events recorded for a session by this service.
    pub async fn history(&self, id: SessionId) -> Vec<SessionEvent> {
        self.tracker.get_events(&id).await
    }

    /// Validates, then generates and aggregates on a blocking task. Any
    /// error or panic comes back as a message.
    async fn simulate(&self, config: &SessionConfig) -> Result<SimulationOutcome, String> {
        config
            .validate()
            .map_err(|e| format!("invalid session configuration: {e}"))?;

        let seed = self.next_seed();
        let config = config.clone();
        tokio::task::spawn_blocking(move || {
            let mut rng = StdRng::seed_from_u64(seed);
            run_simulation(&config, &mut rng)
        })
        .await
        .map_err(|e| format!("simulation task failed: {e}"))?
        .map_err(|e| e.to_string())
    }

    fn next_seed(&self) -> u64 {
        self.rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .random()
    }

    fn acquire(&self, id: SessionId) -> Result<RunGuard<'_>, ServiceError> {
        self.runs
            .try_acquire(id)
            .ok_or(ServiceError::RunInProgress(id))
    }
}
