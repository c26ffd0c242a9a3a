//! Persistence for backtest sessions.
//!
//! Sessions are stored as one serialized list, written wholesale after
//! every mutation. [`stores`] holds the storage backends and
//! [`repositories`] the in-memory view that keeps them in sync.

/// Data layer errors.
pub mod error;
/// Session repository.
pub mod repositories;
/// Storage backends.
pub mod stores;

pub use error::DataError;
pub use repositories::SessionRepository;
pub use stores::{JsonFileStore, MemoryStore, SessionStore};
