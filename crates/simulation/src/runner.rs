//! One-shot simulation: generate trades, then aggregate them.

use crate::error::SimulationError;
use crate::generator::TradeGenerator;
use rand::Rng;
use rust_decimal::Decimal;
use trade_journal_domain::entities::Trade;
use trade_journal_domain::metrics::{SessionMetrics, calculate_metrics};
use trade_journal_domain::value_objects::SessionConfig;

/// Trades and metrics produced by one simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOutcome {
    /// Generated trades in entry order.
    pub trades: Vec<Trade>,
    /// Metrics computed over `trades`.
    pub metrics: SessionMetrics,
    /// Running equity after the last trade.
    pub final_equity: Decimal,
    /// Highest running equity during generation.
    pub peak_equity: Decimal,
}

/// Runs a full simulation for `config` with the given random source.
///
/// # Errors
/// Propagates generator errors; aggregation itself cannot fail.
pub fn run_simulation<R: Rng>(
    config: &SessionConfig,
    rng: &mut R,
) -> Result<SimulationOutcome, SimulationError> {
    let generated = TradeGenerator::new(rng).generate(config)?;
    let metrics = calculate_metrics(&generated.trades);

    Ok(SimulationOutcome {
        trades: generated.trades,
        metrics,
        final_equity: generated.final_equity,
        peak_equity: generated.peak_equity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monte_carlo::MonteCarloRunner;
    use chrono::NaiveDate;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rust_decimal_macros::dec;
    use trade_journal_domain::value_objects::{DateRange, SessionParameters};

    fn config() -> SessionConfig {
        SessionConfig::new(
            DateRange::new(
                NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
            )
            .unwrap(),
            vec!["SPY".to_string(), "QQQ".to_string(), "IWM".to_string()],
            vec!["Momentum".to_string(), "Mean Reversion".to_string()],
            SessionParameters::default(),
        )
    }

    #[test]
    fn test_outcome_metrics_match_trades() {
        let mut rng = StdRng::seed_from_u64(2024);
        let outcome = run_simulation(&config(), &mut rng).unwrap();

        // 28 days at 1.5 trades per day.
        assert_eq!(outcome.trades.len(), 42);
        assert_eq!(outcome.metrics, calculate_metrics(&outcome.trades));
        assert_eq!(outcome.metrics.total_trades, 42);
        assert_eq!(outcome.metrics.equity_curve.len(), outcome.trades.len());
        assert!(
            outcome
                .metrics
                .equity_curve
                .windows(2)
                .all(|w| w[0].date <= w[1].date)
        );
        assert!(outcome.metrics.max_drawdown >= Decimal::ZERO);
    }

    #[test]
    fn test_rng_advances_between_runs() {
        let mut rng = StdRng::seed_from_u64(5);
        let first = run_simulation(&config(), &mut rng).unwrap();
        let second = run_simulation(&config(), &mut rng).unwrap();
        assert_ne!(first.trades, second.trades);

        let mut replay = StdRng::seed_from_u64(5);
        assert_eq!(run_simulation(&config(), &mut replay).unwrap(), first);
    }

    #[test]
    fn test_runaway_parameters_return_an_error() {
        let mut cfg = config();
        cfg.parameters = SessionParameters::default()
            .with_risk_per_trade(dec!(0.5))
            .with_avg_profit_pct(dec!(1000))
            .with_win_rate(dec!(0.99))
            .with_trades_per_day(dec!(3));

        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            run_simulation(&cfg, &mut rng),
            Err(SimulationError::EquityLimit { .. })
        ));

        let mut rng = StdRng::seed_from_u64(1);
        assert!(MonteCarloRunner::new(cfg, 10).run(&mut rng).is_err());
    }
}
