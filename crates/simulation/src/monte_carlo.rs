use crate::error::SimulationError;
use crate::runner::run_simulation;
use rand::Rng;
use rust_decimal::Decimal;
use trade_journal_domain::metrics::math::round2;
use trade_journal_domain::value_objects::SessionConfig;

/// Repeats a session simulation to estimate the spread of outcomes.
pub struct MonteCarloRunner {
    pub config: SessionConfig,
    pub iterations: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AggregateResult {
    pub mean_total_pnl: Decimal,
    pub median_total_pnl: Decimal,
    pub var_95_total_pnl: Decimal, // 5th percentile of total P&L
    pub mean_max_drawdown: Decimal,
    pub mean_win_rate: Decimal,
    pub mean_sharpe_ratio: Decimal,
    /// Share of iterations ending with a positive total P&L, in percent.
    pub profitable_pct: Decimal,
    pub iterations: usize,
}

impl MonteCarloRunner {
    pub fn new(config: SessionConfig, iterations: usize) -> Self {
        Self { config, iterations }
    }

    pub fn run<R: Rng>(&self, rng: &mut R) -> Result<AggregateResult, SimulationError> {
        if self.iterations == 0 {
            return Err(SimulationError::NoIterations);
        }

        let mut pnls = Vec::with_capacity(self.iterations);
        let mut drawdowns = Vec::with_capacity(self.iterations);
        let mut win_rates = Vec::with_capacity(self.iterations);
        let mut sharpes = Vec::with_capacity(self.iterations);

        for _ in 0..self.iterations {
            let metrics = run_simulation(&self.config, rng)?.metrics;
            pnls.push(metrics.total_pnl);
            drawdowns.push(metrics.max_drawdown);
            win_rates.push(metrics.win_rate);
            sharpes.push(metrics.sharpe_ratio);
        }

        Ok(self.aggregate(pnls, &drawdowns, &win_rates, &sharpes))
    }

    fn aggregate(
        &self,
        mut pnls: Vec<Decimal>,
        drawdowns: &[Decimal],
        win_rates: &[Decimal],
        sharpes: &[Decimal],
    ) -> AggregateResult {
        let count = pnls.len();
        let profitable = pnls.iter().filter(|p| **p > Decimal::ZERO).count();
        let mean_pnl = mean(&pnls);

        pnls.sort();
        let median_pnl = pnls[count / 2];
        let var_idx = (count as f64 * 0.05).floor() as usize;
        let var_95 = pnls[var_idx.min(count - 1)];

        AggregateResult {
            mean_total_pnl: round2(mean_pnl),
            median_total_pnl: round2(median_pnl),
            var_95_total_pnl: round2(var_95),
            mean_max_drawdown: round2(mean(drawdowns)),
            mean_win_rate: round2(mean(win_rates)),
            mean_sharpe_ratio: round2(mean(sharpes)),
            profitable_pct: round2(
                Decimal::from(profitable) / Decimal::from(count) * Decimal::ONE_HUNDRED,
            ),
            iterations: count,
        }
    }
}

fn mean(values: &[Decimal]) -> Decimal {
    if values.is_empty() {
        return Decimal::ZERO;
    }
    values.iter().sum::<Decimal>() / Decimal::from(values.len())
}
