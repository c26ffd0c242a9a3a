pub mod date_range;
pub mod parameters;
pub mod session_config;

pub use date_range::DateRange;
pub use parameters::SessionParameters;
pub use session_config::SessionConfig;
