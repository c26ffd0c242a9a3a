//! Reduction of a trade list to [`SessionMetrics`].

use super::math::{round2, sharpe_ratio};
use super::{EquityPoint, SessionMetrics};
use crate::entities::Trade;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Fixed starting value of the equity curve, independent of the session's capital.
pub const EQUITY_CURVE_SEED: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Computes aggregate metrics for a list of trades.
///
/// Pure function: an empty list yields all-zero metrics. Ordering-dependent
/// figures (drawdown, equity curve, Sharpe) use trades sorted by entry time.
pub fn calculate_metrics(trades: &[Trade]) -> SessionMetrics {
    if trades.is_empty() {
        return SessionMetrics::default();
    }

    let total = Decimal::from(trades.len());
    let winners: Vec<&Trade> = trades.iter().filter(|t| t.is_win()).collect();
    let losers: Vec<&Trade> = trades.iter().filter(|t| t.is_loss()).collect();

    let gross_profit: Decimal = winners.iter().map(|t| t.pnl).sum();
    let gross_loss: Decimal = losers.iter().map(|t| t.pnl.abs()).sum();
    let total_pnl: Decimal = trades.iter().map(|t| t.pnl).sum();
    let total_fees: Decimal = trades.iter().map(|t| t.fees).sum();

    let win_fraction = Decimal::from(winners.len()) / total;
    let loss_fraction = Decimal::from(losers.len()) / total;
    let average_win = average(gross_profit, winners.len());
    let average_loss = average(gross_loss, losers.len());

    // No losses reports 0 rather than an unbounded ratio.
    let profit_factor = if gross_loss.is_zero() {
        Decimal::ZERO
    } else {
        gross_profit / gross_loss
    };

    let expectancy = win_fraction * average_win - loss_fraction * average_loss;

    let ordered = sorted_by_entry(trades);
    let max_drawdown = max_drawdown(&ordered);
    let curve = equity_curve(&ordered);
    let returns = equity_returns(&curve);
    let sharpe = Decimal::try_from(sharpe_ratio(&returns)).unwrap_or(Decimal::ZERO);

    SessionMetrics {
        total_trades: trades.len(),
        winning_trades: winners.len(),
        losing_trades: losers.len(),
        win_rate: round2(win_fraction * HUNDRED),
        total_pnl: round2(total_pnl),
        total_fees: round2(total_fees),
        average_win: round2(average_win),
        average_loss: round2(average_loss),
        profit_factor: round2(profit_factor),
        max_drawdown: round2(max_drawdown),
        expectancy: round2(expectancy),
        sharpe_ratio: round2(sharpe),
        equity_curve: curve
            .into_iter()
            .map(|(date, equity)| EquityPoint {
                date,
                equity: round2(equity),
            })
            .collect(),
    }
}

fn average(sum: Decimal, count: usize) -> Decimal {
    if count == 0 {
        Decimal::ZERO
    } else {
        sum / Decimal::from(count)
    }
}

fn sorted_by_entry(trades: &[Trade]) -> Vec<&Trade> {
    let mut ordered: Vec<&Trade> = trades.iter().collect();
    ordered.sort_by_key(|t| t.entry_time);
    ordered
}

/// Largest drop of cumulative P&L below its running peak. The peak starts at 0.
fn max_drawdown(ordered: &[&Trade]) -> Decimal {
    let mut cumulative = Decimal::ZERO;
    let mut peak = Decimal::ZERO;
    let mut worst = Decimal::ZERO;

    for trade in ordered {
        cumulative += trade.pnl;
        peak = peak.max(cumulative);
        worst = worst.max(peak - cumulative);
    }

    worst
}

/// Unrounded `(exit time, equity)` pairs starting from [`EQUITY_CURVE_SEED`].
fn equity_curve(ordered: &[&Trade]) -> Vec<(DateTime<Utc>, Decimal)> {
    let mut equity = EQUITY_CURVE_SEED;
    ordered
        .iter()
        .map(|trade| {
            equity += trade.pnl;
            (trade.exit_time, equity)
        })
        .collect()
}

/// Fractional change between consecutive equity values, the seed acting as
/// the value before the first point. A zero base contributes a 0 return.
fn equity_returns(curve: &[(DateTime<Utc>, Decimal)]) -> Vec<f64> {
    let mut previous = EQUITY_CURVE_SEED;
    curve
        .iter()
        .map(|(_, equity)| {
            let change = if previous.is_zero() {
                Decimal::ZERO
            } else {
                (*equity - previous) / previous
            };
            previous = *equity;
            change.to_f64().unwrap_or(0.0)
        })
        .collect()
}
