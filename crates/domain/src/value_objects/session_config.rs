use crate::error::ValidationError;
use crate::value_objects::{DateRange, SessionParameters};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Everything the trade generator needs to simulate a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub date_range: DateRange,
    pub instruments: Vec<String>,
    pub strategies: Vec<String>,
    #[serde(default)]
    pub parameters: SessionParameters,
}

impl SessionConfig {
    pub fn new(
        date_range: DateRange,
        instruments: Vec<String>,
        strategies: Vec<String>,
        parameters: SessionParameters,
    ) -> Self {
        Self {
            date_range,
            instruments,
            strategies,
            parameters,
        }
    }

    /// Validates instruments, strategies, date range and parameters.
    ///
    /// # Errors
    /// Returns the first violated rule.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.instruments.is_empty() {
            return Err(ValidationError::NoInstruments);
        }
        if let Some(dup) = first_duplicate(&self.instruments) {
            return Err(ValidationError::DuplicateInstrument(dup));
        }
        if self.strategies.is_empty() {
            return Err(ValidationError::NoStrategies);
        }
        if let Some(dup) = first_duplicate(&self.strategies) {
            return Err(ValidationError::DuplicateStrategy(dup));
        }
        self.date_range.validate()?;
        self.parameters.validate()
    }
}

fn first_duplicate(values: &[String]) -> Option<String> {
    let mut seen = HashSet::with_capacity(values.len());
    values
        .iter()
        .find(|value| !seen.insert(value.as_str()))
        .cloned()
}
