//! Repository implementations over a [`SessionStore`](crate::stores::SessionStore).

mod session_repository;

pub use session_repository::SessionRepository;
