//! Runtime configuration for the session service.

use crate::error::ConfigError;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;

/// Environment variable holding the artificial run delay in milliseconds.
pub const ENV_SIM_DELAY_MS: &str = "TRADE_JOURNAL_SIM_DELAY_MS";
/// Environment variable holding the random seed.
pub const ENV_SEED: &str = "TRADE_JOURNAL_SEED";

/// Configuration for [`SessionService`](crate::session::SessionService).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionConfig {
    /// Artificial latency before each simulation run.
    pub simulation_delay: Duration,
    /// Seed for the service random source; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            simulation_delay: Duration::from_millis(750),
            seed: None,
        }
    }
}

impl ExecutionConfig {
    /// Sets the artificial run delay.
    #[must_use]
    pub fn with_simulation_delay(mut self, delay: Duration) -> Self {
        self.simulation_delay = delay;
        self
    }

    /// Sets the random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reads overrides from the process environment.
    ///
    /// # Errors
    /// Returns an error if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads overrides through `lookup`, falling back to defaults for unset keys.
    ///
    /// # Errors
    /// Returns an error if a value is present but cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_SIM_DELAY_MS) {
            let millis = parse_u64(ENV_SIM_DELAY_MS, &raw)?;
            config.simulation_delay = Duration::from_millis(millis);
        }
        if let Some(raw) = lookup(ENV_SEED) {
            config.seed = Some(parse_u64(ENV_SEED, &raw)?);
        }

        Ok(config)
    }

    /// Builds the random source described by this config.
    #[must_use]
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

fn parse_u64(key: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidValue {
            key,
            value: raw.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ExecutionConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ExecutionConfig::default());
        assert_eq!(config.simulation_delay, Duration::from_millis(750));
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_overrides() {
        let config =
            ExecutionConfig::from_lookup(lookup(&[(ENV_SIM_DELAY_MS, "0"), (ENV_SEED, " 42 ")]))
                .unwrap();
        assert_eq!(config.simulation_delay, Duration::ZERO);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_invalid_value() {
        let err = ExecutionConfig::from_lookup(lookup(&[(ENV_SEED, "abc")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: ENV_SEED, .. }));
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let config = ExecutionConfig::default().with_seed(9);
        let a: u64 = config.rng().random();
        let b: u64 = config.rng().random();
        assert_eq!(a, b);
    }
}
