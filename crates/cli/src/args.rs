//! Session configuration flags shared by several commands.

use anyhow::{Result, bail};
use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use trade_journal_domain::value_objects::{DateRange, SessionConfig, SessionParameters};

#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// First day of the backtest (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Last day of the backtest (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Instrument symbols, comma separated or repeated (e.g., SPY,QQQ)
    #[arg(short, long = "instrument", value_delimiter = ',')]
    pub instruments: Vec<String>,

    /// Strategy names, comma separated or repeated
    #[arg(short, long = "strategy", value_delimiter = ',')]
    pub strategies: Vec<String>,

    #[command(flatten)]
    pub parameters: ParameterArgs,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ParameterArgs {
    /// Starting capital in USD
    #[arg(long)]
    pub capital: Option<Decimal>,

    /// Fraction of equity risked per trade (e.g., 0.02)
    #[arg(long)]
    pub risk: Option<Decimal>,

    /// Average number of trades per day
    #[arg(long)]
    pub trades_per_day: Option<Decimal>,

    /// Probability that a trade wins (e.g., 0.55)
    #[arg(long)]
    pub win_rate: Option<Decimal>,

    /// Average winning return in percent
    #[arg(long)]
    pub avg_profit: Option<Decimal>,

    /// Average losing return in percent
    #[arg(long)]
    pub avg_loss: Option<Decimal>,
}

impl ConfigArgs {
    /// Builds a fresh configuration. Dates are required; parameters not
    /// given fall back to their defaults.
    pub fn build(self) -> Result<SessionConfig> {
        let (Some(start), Some(end)) = (self.start, self.end) else {
            bail!("--start and --end are required");
        };
        let date_range = DateRange::new(start, end)?;
        let parameters = self.parameters.apply(SessionParameters::default());
        let config = SessionConfig::new(date_range, self.instruments, self.strategies, parameters);
        config.validate()?;
        Ok(config)
    }

    /// Overlays the given flags on an existing configuration.
    pub fn apply(self, base: SessionConfig) -> Result<SessionConfig> {
        let start = self.start.unwrap_or(base.date_range.start);
        let end = self.end.unwrap_or(base.date_range.end);
        let instruments = if self.instruments.is_empty() {
            base.instruments
        } else {
            self.instruments
        };
        let strategies = if self.strategies.is_empty() {
            base.strategies
        } else {
            self.strategies
        };

        let config = SessionConfig::new(
            DateRange::new(start, end)?,
            instruments,
            strategies,
            self.parameters.apply(base.parameters),
        );
        config.validate()?;
        Ok(config)
    }
}

impl ParameterArgs {
    fn apply(self, mut parameters: SessionParameters) -> SessionParameters {
        if let Some(capital) = self.capital {
            parameters = parameters.with_starting_capital(capital);
        }
        if let Some(risk) = self.risk {
            parameters = parameters.with_risk_per_trade(risk);
        }
        if let Some(rate) = self.trades_per_day {
            parameters = parameters.with_trades_per_day(rate);
        }
        if let Some(win_rate) = self.win_rate {
            parameters = parameters.with_win_rate(win_rate);
        }
        if let Some(pct) = self.avg_profit {
            parameters = parameters.with_avg_profit_pct(pct);
        }
        if let Some(pct) = self.avg_loss {
            parameters = parameters.with_avg_loss_pct(pct);
        }
        parameters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn args() -> ConfigArgs {
        ConfigArgs {
            start: Some(date(1)),
            end: Some(date(15)),
            instruments: vec!["SPY".to_string(), "QQQ".to_string()],
            strategies: vec!["Breakout".to_string()],
            parameters: ParameterArgs::default(),
        }
    }

    #[test]
    fn test_build_uses_default_parameters() {
        let config = args().build().unwrap();
        assert_eq!(config.parameters, SessionParameters::default());
        assert_eq!(config.date_range.days(), 14);
    }

    #[test]
    fn test_build_requires_dates() {
        let mut missing = args();
        missing.end = None;
        assert!(missing.build().is_err());
    }

    #[test]
    fn test_build_rejects_missing_strategy() {
        let mut missing = args();
        missing.strategies.clear();
        let err = missing.build().unwrap_err();
        assert!(err.to_string().contains("strategy"));
    }

    #[test]
    fn test_apply_overrides_only_given_flags() {
        let base = args().build().unwrap();
        let overrides = ConfigArgs {
            end: Some(date(31)),
            parameters: ParameterArgs {
                win_rate: Some(dec!(0.7)),
                ..ParameterArgs::default()
            },
            ..ConfigArgs::default()
        };

        let config = overrides.apply(base.clone()).unwrap();
        assert_eq!(config.date_range.start, date(1));
        assert_eq!(config.date_range.end, date(31));
        assert_eq!(config.instruments, base.instruments);
        assert_eq!(config.parameters.win_rate, dec!(0.7));
        assert_eq!(config.parameters.avg_loss_pct, base.parameters.avg_loss_pct);
    }
}
