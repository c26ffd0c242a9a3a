//! Synthetic trade generation.
//!
//! Trades follow a random walk over the session's date range: each trade
//! wins with the configured probability, its return is drawn around the
//! average win or loss, and its size is a fixed fraction of the running
//! equity. Entry/exit prices and direction are display values drawn
//! independently of the outcome.

use crate::error::SimulationError;
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use rand::distr::{Bernoulli, Distribution};
use rand::seq::IndexedRandom;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;
use trade_journal_domain::entities::{Trade, TradeId};
use trade_journal_domain::enums::TradeDirection;
use trade_journal_domain::error::ValidationError;
use trade_journal_domain::value_objects::SessionConfig;
use uuid::Builder;

/// Upper bound on trades generated for one session.
pub const MAX_TRADES: usize = 1_000_000;

/// Fees charged on each trade, as a fraction of position size (0.1%).
pub const FEE_RATE: Decimal = Decimal::from_parts(1, 0, 0, false, 3);

/// Ceiling on running equity (10^15). Keeps every sum the metrics take
/// over a session's trades well inside `Decimal` range.
pub const MAX_EQUITY: Decimal = Decimal::from_parts(0xA4C6_8000, 0x38D7E, 0, false, 0);

/// Maximum gap between consecutive entries, in milliseconds (48 hours).
const MAX_ENTRY_GAP_MS: i64 = 48 * 3_600_000;

const MIN_PRICE: f64 = 100.0;
const MAX_PRICE: f64 = 1000.0;

/// Trades produced by one generation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedTrades {
    /// Trades in entry-time order.
    pub trades: Vec<Trade>,
    /// Running equity after the last trade.
    pub final_equity: Decimal,
    /// Highest running equity seen during generation.
    pub peak_equity: Decimal,
}

/// Number of trades a session produces: `ceil(days * trades_per_day)`,
/// counting a single-day range as one day.
///
/// # Errors
/// Fails if the count cannot be represented or exceeds [`MAX_TRADES`].
pub fn target_trade_count(config: &SessionConfig) -> Result<usize, SimulationError> {
    let days = config.date_range.days().max(1);
    let requested = (Decimal::from(days) * config.parameters.trades_per_day)
        .ceil()
        .to_usize()
        .ok_or(SimulationError::Conversion("trade count"))?;

    if requested > MAX_TRADES {
        return Err(SimulationError::TooManyTrades {
            requested,
            limit: MAX_TRADES,
        });
    }
    Ok(requested)
}

/// Generates trades from a session configuration.
///
/// The random source is injected, so a seeded generator reproduces the
/// same trades (identifiers included) on every call sequence.
pub struct TradeGenerator<R: Rng> {
    rng: R,
}

impl<R: Rng> TradeGenerator<R> {
    /// Creates a generator drawing from `rng`.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generates the trades for `config`.
    ///
    /// # Errors
    /// Returns a validation error before drawing anything if the config is
    /// invalid (for instance an empty instrument or strategy list).
    pub fn generate(&mut self, config: &SessionConfig) -> Result<GeneratedTrades, SimulationError> {
        config.validate()?;

        let params = &config.parameters;
        let count = target_trade_count(config)?;

        let win_probability = to_f64("win_rate", params.win_rate)?;
        let outcome = Bernoulli::new(win_probability).map_err(|e| SimulationError::Distribution {
            field: "win_rate",
            reason: e.to_string(),
        })?;
        let avg_profit = to_f64("avg_profit_pct", params.avg_profit_pct)?;
        let avg_loss = to_f64("avg_loss_pct", params.avg_loss_pct)?;

        let end = config.date_range.end_time();
        let entries = self.entry_schedule(count, config.date_range.start_time(), end);

        let mut equity = checked_equity(Some(params.starting_capital))?;
        let mut peak_equity = equity;
        let mut trades = Vec::with_capacity(count);

        for (i, &entry_time) in entries.iter().enumerate() {
            let instrument = config
                .instruments
                .choose(&mut self.rng)
                .ok_or(ValidationError::NoInstruments)?
                .clone();
            let strategy = config
                .strategies
                .choose(&mut self.rng)
                .ok_or(ValidationError::NoStrategies)?
                .clone();

            let is_win = outcome.sample(&mut self.rng);
            let pct = if is_win {
                self.rng.random_range(avg_profit..=avg_profit * 1.5)
            } else {
                -self.rng.random_range(avg_loss..=avg_loss * 1.5)
            };
            let pnl_pct = Decimal::from_f64(pct).ok_or(SimulationError::Conversion("pnl_pct"))?;

            let position_size = equity
                .checked_mul(params.risk_per_trade)
                .ok_or(SimulationError::Overflow("position_size"))?;
            let pnl = position_size
                .checked_mul(pnl_pct)
                .and_then(|v| v.checked_div(Decimal::ONE_HUNDRED))
                .ok_or(SimulationError::Overflow("pnl"))?;
            equity = checked_equity(equity.checked_add(pnl))?;
            peak_equity = peak_equity.max(equity);

            let entry_price = self.price()?;
            let exit_price = self.price()?;
            let direction = if self.rng.random_bool(0.5) {
                TradeDirection::Long
            } else {
                TradeDirection::Short
            };

            // Exits land before the next entry so trades never overlap.
            let next_entry = entries.get(i + 1).copied().unwrap_or(end).max(entry_time);
            let exit_time = self.exit_time(entry_time, next_entry);

            trades.push(Trade {
                id: self.trade_id(),
                instrument,
                strategy,
                entry_time,
                exit_time,
                entry_price,
                exit_price,
                quantity: (position_size / exit_price).floor(),
                direction,
                position_size,
                pnl_pct,
                pnl,
                fees: position_size * FEE_RATE,
            });
        }

        debug!(
            trades = trades.len(),
            final_equity = %equity,
            peak_equity = %peak_equity,
            "Generated trades"
        );

        Ok(GeneratedTrades {
            trades,
            final_equity: equity,
            peak_equity,
        })
    }

    /// Entry times: the first at `start`, each later one a random 0-48h
    /// after the previous, never past `end`.
    fn entry_schedule(
        &mut self,
        count: usize,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Vec<DateTime<Utc>> {
        let mut entries = Vec::with_capacity(count);
        let mut cursor = start;
        for i in 0..count {
            if i > 0 {
                let gap = self.rng.random_range(0..MAX_ENTRY_GAP_MS);
                cursor = (cursor + Duration::milliseconds(gap)).min(end);
            }
            entries.push(cursor);
        }
        entries
    }

    fn exit_time(&mut self, entry: DateTime<Utc>, limit: DateTime<Utc>) -> DateTime<Utc> {
        let span = (limit - entry).num_milliseconds();
        if span <= 0 {
            return entry;
        }
        entry + Duration::milliseconds(self.rng.random_range(0..=span))
    }

    /// Uniform price in [100, 1000), truncated to cents.
    fn price(&mut self) -> Result<Decimal, SimulationError> {
        let raw = self.rng.random_range(MIN_PRICE..MAX_PRICE);
        Decimal::from_f64(raw)
            .map(|p| p.round_dp_with_strategy(2, RoundingStrategy::ToZero))
            .ok_or(SimulationError::Conversion("price"))
    }

    fn trade_id(&mut self) -> TradeId {
        let mut bytes = [0u8; 16];
        self.rng.fill_bytes(&mut bytes);
        TradeId(Builder::from_random_bytes(bytes).into_uuid())
    }
}

fn checked_equity(equity: Option<Decimal>) -> Result<Decimal, SimulationError> {
    match equity {
        // Validation keeps losses under 100%; the floor absorbs f64 rounding.
        Some(equity) if equity <= MAX_EQUITY => Ok(equity.max(Decimal::ZERO)),
        Some(_) => Err(SimulationError::EquityLimit { limit: MAX_EQUITY }),
        None => Err(SimulationError::Overflow("equity")),
    }
}

fn to_f64(field: &'static str, value: Decimal) -> Result<f64, SimulationError> {
    value.to_f64().ok_or(SimulationError::Conversion(field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rust_decimal_macros::dec;
    use trade_journal_domain::value_objects::{DateRange, SessionParameters};

    fn config(days: u32, trades_per_day: Decimal) -> SessionConfig {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = start + chrono::Days::new(u64::from(days));
        SessionConfig::new(
            DateRange::new(start, end).unwrap(),
            vec!["SPY".to_string()],
            vec!["Momentum".to_string()],
            SessionParameters::default().with_trades_per_day(trades_per_day),
        )
    }

    fn generate(config: &SessionConfig, seed: u64) -> GeneratedTrades {
        TradeGenerator::new(StdRng::seed_from_u64(seed))
            .generate(config)
            .unwrap()
    }

    #[test]
    fn test_trade_count_for_ten_days() {
        let generated = generate(&config(10, dec!(1)), 7);
        assert_eq!(generated.trades.len(), 10);
    }

    #[test]
    fn test_single_day_range_still_trades() {
        let cfg = config(0, dec!(1.5));
        assert_eq!(target_trade_count(&cfg).unwrap(), 2);

        let cfg = config(0, dec!(0.2));
        assert_eq!(target_trade_count(&cfg).unwrap(), 1);
    }

    #[test]
    fn test_trade_count_rounds_up() {
        assert_eq!(target_trade_count(&config(3, dec!(1.5))).unwrap(), 5);
        assert_eq!(target_trade_count(&config(30, dec!(1.5))).unwrap(), 45);
    }

    #[test]
    fn test_trade_count_limit() {
        let cfg = config(365, dec!(10000));
        assert!(matches!(
            target_trade_count(&cfg),
            Err(SimulationError::TooManyTrades { .. })
        ));
    }

    #[test]
    fn test_empty_lists_fail_before_generation() {
        let mut cfg = config(10, dec!(1));
        cfg.instruments.clear();
        let err = TradeGenerator::new(StdRng::seed_from_u64(1))
            .generate(&cfg)
            .unwrap_err();
        assert_eq!(err, SimulationError::Validation(ValidationError::NoInstruments));

        let mut cfg = config(10, dec!(1));
        cfg.strategies.clear();
        let err = TradeGenerator::new(StdRng::seed_from_u64(1))
            .generate(&cfg)
            .unwrap_err();
        assert_eq!(err, SimulationError::Validation(ValidationError::NoStrategies));
    }

    #[test]
    fn test_same_seed_same_trades() {
        let cfg = config(20, dec!(2));
        assert_eq!(generate(&cfg, 42), generate(&cfg, 42));
        assert_ne!(generate(&cfg, 42).trades, generate(&cfg, 43).trades);
    }

    #[test]
    fn test_unseeded_runs_differ() {
        let cfg = config(10, dec!(1));
        let first = TradeGenerator::new(StdRng::from_os_rng())
            .generate(&cfg)
            .unwrap();
        let second = TradeGenerator::new(StdRng::from_os_rng())
            .generate(&cfg)
            .unwrap();
        assert!(first.trades.len() >= 10);
        assert_ne!(first.trades, second.trades);
    }

    #[test]
    fn test_fees_quantity_and_sizing() -> Result<(), SimulationError> {
        let cfg = config(30, dec!(1.5));
        let generated = generate(&cfg, 11);
        let params = &cfg.parameters;

        let mut equity = checked_equity(Some(params.starting_capital))?;
        for trade in &generated.trades {
            assert_eq!(trade.position_size, equity * params.risk_per_trade);
            assert_eq!(trade.fees, trade.position_size * dec!(0.001));
            assert!(trade.quantity >= Decimal::ZERO);
            assert_eq!(trade.quantity, (trade.position_size / trade.exit_price).floor());
            assert_eq!(trade.pnl, trade.position_size * trade.pnl_pct / dec!(100));
            equity += trade.pnl;
        }
        assert_eq!(generated.final_equity, equity);
        assert!(generated.peak_equity >= params.starting_capital);
        assert!(generated.peak_equity >= generated.final_equity);
        Ok(())
    }

    #[test]
    fn test_returns_within_configured_bands() {
        let generated = generate(&config(60, dec!(3)), 5);
        for trade in &generated.trades {
            if trade.is_win() {
                assert!(trade.pnl_pct >= dec!(2.5) && trade.pnl_pct <= dec!(3.75));
            } else {
                assert!(trade.pnl_pct <= dec!(-1.5) && trade.pnl_pct >= dec!(-2.25));
            }
        }
    }

    #[test]
    fn test_prices_and_timestamps() {
        let cfg = config(10, dec!(3));
        let generated = generate(&cfg, 99);
        let start = cfg.date_range.start_time();
        let end = cfg.date_range.end_time();

        assert_eq!(generated.trades[0].entry_time, start);
        for trade in &generated.trades {
            assert!(trade.entry_price >= dec!(100) && trade.entry_price < dec!(1000));
            assert!(trade.exit_price >= dec!(100) && trade.exit_price < dec!(1000));
            assert!(trade.entry_time <= trade.exit_time);
            assert!(trade.entry_time >= start && trade.exit_time <= end);
        }
        for pair in generated.trades.windows(2) {
            assert!(pair[0].entry_time <= pair[1].entry_time);
            assert!(pair[0].exit_time <= pair[1].entry_time);
        }
    }

    fn extreme_config(params: SessionParameters) -> SessionConfig {
        let mut cfg = config(30, dec!(1.5));
        cfg.parameters = params;
        cfg
    }

    fn assert_trade_invariants(generated: &GeneratedTrades, params: &SessionParameters) {
        let mut equity = params.starting_capital;
        for trade in &generated.trades {
            assert!(trade.position_size >= Decimal::ZERO);
            assert_eq!(trade.position_size, equity * params.risk_per_trade);
            assert!(trade.quantity >= Decimal::ZERO);
            assert!(trade.fees >= Decimal::ZERO);
            assert_eq!(trade.fees, trade.position_size * dec!(0.001));
            equity += trade.pnl;
            assert!(equity >= Decimal::ZERO);
        }
        assert_eq!(generated.final_equity, equity);
    }

    #[test]
    fn test_heavy_losses_at_limit_keep_sizes_positive() {
        // 0.9 * 74 * 1.5 = 99.9% of equity lost on the worst trade.
        let params = SessionParameters::default()
            .with_risk_per_trade(dec!(0.9))
            .with_avg_loss_pct(dec!(74))
            .with_win_rate(dec!(0.1))
            .with_trades_per_day(dec!(1.5));
        let cfg = extreme_config(params.clone());

        for seed in 0..20 {
            let generated = generate(&cfg, seed);
            assert_eq!(generated.trades.len(), 45);
            assert_trade_invariants(&generated, &params);
        }
    }

    #[test]
    fn test_losses_that_wipe_out_equity_are_rejected() {
        let cfg = extreme_config(
            SessionParameters::default()
                .with_risk_per_trade(dec!(0.9))
                .with_avg_loss_pct(dec!(100))
                .with_win_rate(dec!(0.1)),
        );
        let err = TradeGenerator::new(StdRng::seed_from_u64(1))
            .generate(&cfg)
            .unwrap_err();
        assert!(matches!(
            err,
            SimulationError::Validation(ValidationError::InvalidParameter {
                field: "avg_loss_pct",
                ..
            })
        ));
    }

    #[test]
    fn test_runaway_growth_is_an_error() {
        let cfg = extreme_config(
            SessionParameters::default()
                .with_risk_per_trade(dec!(0.5))
                .with_avg_profit_pct(dec!(1000))
                .with_win_rate(dec!(0.99))
                .with_trades_per_day(dec!(3)),
        );
        assert!(cfg.validate().is_ok());

        for seed in 0..5 {
            let result = TradeGenerator::new(StdRng::seed_from_u64(seed)).generate(&cfg);
            assert_eq!(
                result,
                Err(SimulationError::EquityLimit { limit: MAX_EQUITY })
            );
        }
    }

    #[test]
    fn test_huge_returns_overflow_without_panicking() {
        let cfg = extreme_config(
            SessionParameters::default()
                .with_avg_profit_pct(Decimal::from_i128_with_scale(10_i128.pow(27), 0))
                .with_win_rate(dec!(0.99)),
        );
        let result = TradeGenerator::new(StdRng::seed_from_u64(8)).generate(&cfg);
        assert!(matches!(
            result,
            Err(SimulationError::Overflow(_)
                | SimulationError::EquityLimit { .. }
                | SimulationError::Conversion(_))
        ));
    }

    #[test]
    fn test_starting_capital_above_limit_rejected() {
        let cfg = extreme_config(
            SessionParameters::default().with_starting_capital(MAX_EQUITY + Decimal::ONE),
        );
        assert!(matches!(
            TradeGenerator::new(StdRng::seed_from_u64(1)).generate(&cfg),
            Err(SimulationError::EquityLimit { .. })
        ));
    }

    #[test]
    fn test_large_but_bounded_returns() {
        let params = SessionParameters::default()
            .with_risk_per_trade(dec!(0.1))
            .with_avg_profit_pct(dec!(100))
            .with_win_rate(dec!(0.5));
        let cfg = extreme_config(params.clone());

        for seed in 0..10 {
            let generated = generate(&cfg, seed);
            assert_trade_invariants(&generated, &params);
            assert!(generated.peak_equity <= MAX_EQUITY);
        }
    }

    #[test]
    fn test_prices_are_independent_of_outcome() {
        // Display prices are not derived from P&L, so some losing longs close
        // above their entry price.
        let generated = generate(&config(100, dec!(3)), 3);
        let inconsistent = generated.trades.iter().any(|t| {
            t.is_loss() && t.direction == TradeDirection::Long && t.exit_price > t.entry_price
        });
        assert!(inconsistent);
    }
}
