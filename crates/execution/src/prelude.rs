//! Prelude module for convenient imports.

pub use crate::config::ExecutionConfig;
pub use crate::error::{ConfigError, ServiceError};
pub use crate::lifecycle::{
    EventData, LifecycleTracker, RunCompletedData, SessionEvent, SessionEventType,
    SessionSummary,
};
pub use crate::session::SessionService;
