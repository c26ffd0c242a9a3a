use thiserror::Error;
use trade_journal_data::DataError;
use trade_journal_domain::entities::SessionId;
use trade_journal_domain::error::{DomainError, ValidationError};

/// Errors returned by [`SessionService`](crate::session::SessionService).
///
/// Failures inside a simulation run are not reported here: they are
/// recorded on the session as status `failed` with a message.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("session {0} not found")]
    NotFound(SessionId),

    #[error("a run is already in progress for session {0}")]
    RunInProgress(SessionId),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Storage(#[from] DataError),
}

/// Invalid runtime configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}
