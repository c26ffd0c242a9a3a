//! Session orchestration service.

mod run_guard;
mod service;

pub use service::SessionService;
