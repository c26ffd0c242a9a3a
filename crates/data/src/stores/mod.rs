//! Storage backends holding the serialized session list.

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use crate::error::DataError;
use async_trait::async_trait;
use trade_journal_domain::entities::Session;

/// Loads and saves the complete, ordered session list as one blob.
///
/// There is no schema versioning and no partial update: `save` replaces
/// whatever was stored before.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the stored sessions, or an empty list if nothing was saved yet.
    async fn load(&self) -> Result<Vec<Session>, DataError>;

    /// Replaces the stored sessions.
    async fn save(&self, sessions: &[Session]) -> Result<(), DataError>;
}
