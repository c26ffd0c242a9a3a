//! Small statistics helpers used by the metrics calculator.

use rust_decimal::{Decimal, RoundingStrategy};

/// Standard deviations below this are treated as zero.
const STD_DEV_EPSILON: f64 = 1e-12;

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation (divides by N), `None` for an empty slice.
pub fn population_std_dev(values: &[f64]) -> Option<f64> {
    let avg = mean(values)?;
    let variance =
        values.iter().map(|v| (v - avg) * (v - avg)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}

/// Mean return over its population standard deviation.
///
/// Returns 0 for an empty series or a (numerically) zero deviation.
pub fn sharpe_ratio(returns: &[f64]) -> f64 {
    let (Some(avg), Some(std)) = (mean(returns), population_std_dev(returns)) else {
        return 0.0;
    };
    if std < STD_DEV_EPSILON || !avg.is_finite() {
        return 0.0;
    }
    avg / std
}

/// Rounds half away from zero to two decimal places.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[1.0, 2.0, 3.0, 6.0]), Some(3.0));
    }

    #[test]
    fn test_population_std_dev() {
        // Population variance of [2, 4, 4, 4, 5, 5, 7, 9] is exactly 4.
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let std = population_std_dev(&values).unwrap();
        assert!((std - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_sharpe_degenerate_cases() {
        assert_eq!(sharpe_ratio(&[]), 0.0);
        assert_eq!(sharpe_ratio(&[0.01, 0.01, 0.01]), 0.0);
    }

    #[test]
    fn test_round2_half_away_from_zero() {
        assert_eq!(round2(dec!(1.875)), dec!(1.88));
        assert_eq!(round2(dec!(2.345)), dec!(2.35));
        assert_eq!(round2(dec!(-2.345)), dec!(-2.35));
        assert_eq!(round2(dec!(0.3333333)), dec!(0.33));
    }
}
