//! Backtest session entity and its status transitions.

use crate::entities::trade::Trade;
use crate::enums::SessionStatus;
use crate::error::{DomainError, ValidationError};
use crate::metrics::SessionMetrics;
use crate::value_objects::SessionConfig;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Generates a fresh random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// A configured backtest plus the results of its latest run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub config: SessionConfig,
    pub status: SessionStatus,
    #[serde(default)]
    pub trades: Vec<Trade>,
    #[serde(default)]
    pub metrics: Option<SessionMetrics>,
    /// Message from the last failed run.
    #[serde(default)]
    pub error: Option<String>,
}

impl Session {
    /// Creates a session in the `Created` status.
    ///
    /// # Errors
    /// Returns a validation error if the name is blank or the config is invalid.
    pub fn new(name: impl Into<String>, config: SessionConfig) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        config.validate()?;

        let now = Utc::now();
        Ok(Self {
            id: SessionId::new(),
            name,
            created_at: now,
            updated_at: now,
            config,
            status: SessionStatus::Created,
            trades: Vec::new(),
            metrics: None,
            error: None,
        })
    }

    /// Moves the session into `Running`. Any status but `Running` may start a run.
    pub fn begin_run(&mut self) -> Result<(), DomainError> {
        if !self.status.can_start_run() {
            return Err(DomainError::InvalidTransition {
                action: "start a run on",
                status: self.status,
            });
        }
        self.status = SessionStatus::Running;
        self.error = None;
        self.touch();
        Ok(())
    }

    /// Stores the results of a finished run, replacing earlier ones.
    pub fn complete(
        &mut self,
        trades: Vec<Trade>,
        metrics: SessionMetrics,
    ) -> Result<(), DomainError> {
        self.ensure_running("complete")?;
        self.trades = trades;
        self.metrics = Some(metrics);
        self.status = SessionStatus::Completed;
        self.touch();
        Ok(())
    }

    /// Marks the running session as failed. Prior results are discarded.
    pub fn fail(&mut self, message: impl Into<String>) -> Result<(), DomainError> {
        self.ensure_running("fail")?;
        self.trades.clear();
        self.metrics = None;
        self.error = Some(message.into());
        self.status = SessionStatus::Failed;
        self.touch();
        Ok(())
    }

    /// Replaces the configuration and resets the session to `Created`.
    pub fn update_config(&mut self, config: SessionConfig) -> Result<(), DomainError> {
        if self.status == SessionStatus::Running {
            return Err(DomainError::InvalidTransition {
                action: "reconfigure",
                status: self.status,
            });
        }
        config.validate()?;
        self.config = config;
        self.trades.clear();
        self.metrics = None;
        self.error = None;
        self.status = SessionStatus::Created;
        self.touch();
        Ok(())
    }

    fn ensure_running(&self, action: &'static str) -> Result<(), DomainError> {
        if self.status != SessionStatus::Running {
            return Err(DomainError::InvalidTransition {
                action,
                status: self.status,
            });
        }
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
