use super::SessionStore;
use crate::error::DataError;
use async_trait::async_trait;
use tokio::sync::RwLock;
use trade_journal_domain::entities::Session;

/// Keeps the serialized session list in memory, like browser local storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blob: RwLock<Option<String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-filled with a serialized blob.
    #[must_use]
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: RwLock::new(Some(blob.into())),
        }
    }

    /// Returns the currently stored blob.
    pub async fn blob(&self) -> Option<String> {
        self.blob.read().await.clone()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn load(&self) -> Result<Vec<Session>, DataError> {
        match self.blob.read().await.as_deref() {
            Some(blob) if !blob.trim().is_empty() => Ok(serde_json::from_str(blob)?),
            _ => Ok(Vec::new()),
        }
    }

    async fn save(&self, sessions: &[Session]) -> Result<(), DataError> {
        let blob = serde_json::to_string(sessions)?;
        *self.blob.write().await = Some(blob);
        Ok(())
    }
}
