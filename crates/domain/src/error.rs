//! Error types for domain validation and state transitions.

use crate::enums::SessionStatus;
use thiserror::Error;

/// A session configuration failed validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("session name cannot be empty")]
    EmptyName,

    #[error("at least one instrument is required")]
    NoInstruments,

    #[error("duplicate instrument: {0}")]
    DuplicateInstrument(String),

    #[error("at least one strategy is required")]
    NoStrategies,

    #[error("duplicate strategy: {0}")]
    DuplicateStrategy(String),

    #[error("date range start {start} is after end {end}")]
    InvalidDateRange { start: String, end: String },

    #[error("invalid value for {field}: {reason}")]
    InvalidParameter { field: &'static str, reason: String },
}

/// Errors raised by domain operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("cannot {action} a session in status {status}")]
    InvalidTransition {
        action: &'static str,
        status: SessionStatus,
    },
}
