use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};
use trade_journal_domain::entities::SessionId;

/// Set of sessions with a run in flight.
#[derive(Debug, Default)]
pub(crate) struct RunRegistry {
    running: Mutex<HashSet<SessionId>>,
}

impl RunRegistry {
    /// Marks `id` as running. Returns `None` if a run is already in flight.
    pub(crate) fn try_acquire(&self, id: SessionId) -> Option<RunGuard<'_>> {
        let inserted = self
            .running
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id);
        inserted.then(|| RunGuard { registry: self, id })
    }
}

/// Releases the session's run slot when dropped.
pub(crate) struct RunGuard<'a> {
    registry: &'a RunRegistry,
    id: SessionId,
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.registry
            .running
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_running(registry: &RunRegistry, id: SessionId) -> bool {
        registry.running.lock().unwrap().contains(&id)
    }

    #[test]
    fn test_single_slot_per_session() {
        let registry = RunRegistry::default();
        let a = SessionId::new();
        let b = SessionId::new();

        let guard = registry.try_acquire(a).unwrap();
        assert!(registry.try_acquire(a).is_none());
        assert!(registry.try_acquire(b).is_some());
        assert!(is_running(&registry, a));

        drop(guard);
        assert!(!is_running(&registry, a));
        assert!(registry.try_acquire(a).is_some());
    }
}
