use thiserror::Error;
use trade_journal_domain::entities::SessionId;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to (de)serialize sessions: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("session {0} already exists")]
    DuplicateSession(SessionId),

    #[error("session {0} not found")]
    SessionNotFound(SessionId),
}
