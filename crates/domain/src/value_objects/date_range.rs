use crate::error::ValidationError;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a date range, rejecting `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        let range = Self { start, end };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.start > self.end {
            return Err(ValidationError::InvalidDateRange {
                start: self.start.to_string(),
                end: self.end.to_string(),
            });
        }
        Ok(())
    }

    /// Whole calendar days between start and end. A single-day range spans 0 days.
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Midnight UTC on the start date.
    #[must_use]
    pub fn start_time(&self) -> DateTime<Utc> {
        self.start.and_time(NaiveTime::MIN).and_utc()
    }

    /// Midnight UTC on the end date.
    #[must_use]
    pub fn end_time(&self) -> DateTime<Utc> {
        self.end.and_time(NaiveTime::MIN).and_utc()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_days_spanned() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 11)).unwrap();
        assert_eq!(range.days(), 10);

        let single = DateRange::new(date(2024, 3, 5), date(2024, 3, 5)).unwrap();
        assert_eq!(single.days(), 0);
    }

    #[test]
    fn test_rejects_inverted_range() {
        let err = DateRange::new(date(2024, 2, 1), date(2024, 1, 1)).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidDateRange { .. }));
    }

    #[test]
    fn test_boundary_times_are_midnight_utc() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 3)).unwrap();
        assert_eq!(range.start_time().to_rfc3339(), "2024-01-01T00:00:00+00:00");
        assert_eq!(range.end_time() - range.start_time(), chrono::Duration::days(2));
    }
}
