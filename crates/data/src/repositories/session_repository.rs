//! Session repository keeping an in-memory list in sync with a store.

use crate::error::DataError;
use crate::stores::SessionStore;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};
use trade_journal_domain::entities::{Session, SessionId};

/// Ordered list of sessions, persisted wholesale after each mutation.
///
/// Mutations hold the write lock across the save, so concurrent writers
/// are serialized and the store always receives a complete list. A failed
/// save leaves the in-memory list unchanged.
pub struct SessionRepository {
    store: Arc<dyn SessionStore>,
    sessions: RwLock<Vec<Session>>,
}

impl SessionRepository {
    /// Loads the current session list from `store`.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read or decoded.
    pub async fn open(store: Arc<dyn SessionStore>) -> Result<Self, DataError> {
        let sessions = store.load().await?;
        info!(sessions = sessions.len(), "Loaded sessions");
        Ok(Self {
            store,
            sessions: RwLock::new(sessions),
        })
    }

    /// Returns all sessions in insertion order.
    pub async fn list(&self) -> Vec<Session> {
        self.sessions.read().await.clone()
    }

    /// Finds a session by ID.
    pub async fn find(&self, id: SessionId) -> Option<Session> {
        self.sessions
            .read()
            .await
            .iter()
            .find(|s| s.id == id)
            .cloned()
    }

    /// Returns the number of stored sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Returns true if no sessions are stored.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Appends a new session.
    ///
    /// # Errors
    /// Fails on a duplicate ID or if the store rejects the write.
    pub async fn insert(&self, session: Session) -> Result<(), DataError> {
        let mut sessions = self.sessions.write().await;
        if sessions.iter().any(|s| s.id == session.id) {
            return Err(DataError::DuplicateSession(session.id));
        }

        let mut next = sessions.clone();
        next.push(session);
        self.commit(&mut sessions, next).await
    }

    /// Replaces the stored session with the same ID.
    ///
    /// # Errors
    /// Fails if the session does not exist or the store rejects the write.
    pub async fn update(&self, session: Session) -> Result<(), DataError> {
        let mut sessions = self.sessions.write().await;
        let Some(index) = sessions.iter().position(|s| s.id == session.id) else {
            return Err(DataError::SessionNotFound(session.id));
        };

        let mut next = sessions.clone();
        next[index] = session;
        self.commit(&mut sessions, next).await
    }

    /// Removes a session. Returns false if it did not exist.
    ///
    /// # Errors
    /// Fails if the store rejects the write.
    pub async fn delete(&self, id: SessionId) -> Result<bool, DataError> {
        let mut sessions = self.sessions.write().await;
        if !sessions.iter().any(|s| s.id == id) {
            return Ok(false);
        }

        let next: Vec<Session> = sessions.iter().filter(|s| s.id != id).cloned().collect();
        self.commit(&mut sessions, next).await?;
        Ok(true)
    }

    async fn commit(&self, current: &mut Vec<Session>, next: Vec<Session>) -> Result<(), DataError> {
        self.store.save(&next).await?;
        debug!(sessions = next.len(), "Persisted sessions");
        *current = next;
        Ok(())
    }
}
