//! Terminal rendering for sessions, trades and metrics.

use prettytable::{Table, row};
use trade_journal_domain::entities::{Session, Trade};
use trade_journal_domain::enums::SessionStatus;
use trade_journal_domain::metrics::SessionMetrics;
use trade_journal_domain::value_objects::SessionConfig;
use trade_journal_simulation::monte_carlo::AggregateResult;

pub fn sessions(sessions: &[Session]) {
    if sessions.is_empty() {
        println!("No sessions yet. Create one with `tj create`.");
        return;
    }

    let mut table = Table::new();
    table.set_titles(row!["ID", "Name", "Status", "Range", "Trades", "Total PnL"]);
    for session in sessions {
        let pnl = session
            .metrics
            .as_ref()
            .map_or_else(|| "-".to_string(), |m| format!("{:.2}", m.total_pnl));
        table.add_row(row![
            session.id,
            session.name,
            session.status,
            format!("{} .. {}", session.config.date_range.start, session.config.date_range.end),
            session.trades.len(),
            r->pnl
        ]);
    }
    table.printstd();
}

pub fn session(session: &Session) {
    println!("Session {} ({})", session.name, session.id);
    println!("Status:  {}", session.status);
    println!("Created: {}", session.created_at.format("%Y-%m-%d %H:%M:%S"));
    println!("Updated: {}", session.updated_at.format("%Y-%m-%d %H:%M:%S"));
    if let Some(error) = &session.error {
        println!("Error:   {error}");
    }
    println!();
    config(&session.config);
    if let Some(metrics) = &session.metrics {
        println!();
        self::metrics(metrics);
    }
}

pub fn run_result(session: &Session) {
    println!("{}", run_summary(session));
    if let (SessionStatus::Completed, Some(metrics)) = (session.status, &session.metrics) {
        self::metrics(metrics);
    }
}

fn run_summary(session: &Session) -> String {
    match session.status {
        SessionStatus::Completed => format!("✅ Generated {} trades", session.trades.len()),
        SessionStatus::Failed => {
            let reason = session.error.as_deref().unwrap_or("unknown error");
            format!("❌ Run failed: {reason}")
        }
        SessionStatus::Created | SessionStatus::Running => {
            format!("⚠️  Run ended with unexpected status {}", session.status)
        }
    }
}

pub fn config(config: &SessionConfig) {
    let p = &config.parameters;
    let mut table = Table::new();
    table.add_row(row!["Date range", format!("{} .. {}", config.date_range.start, config.date_range.end)]);
    table.add_row(row!["Instruments", config.instruments.join(", ")]);
    table.add_row(row!["Strategies", config.strategies.join(", ")]);
    table.add_row(row!["Starting capital", r->p.starting_capital]);
    table.add_row(row!["Risk per trade", r->p.risk_per_trade]);
    table.add_row(row!["Trades per day", r->p.trades_per_day]);
    table.add_row(row!["Win rate", r->p.win_rate]);
    table.add_row(row!["Avg profit %", r->p.avg_profit_pct]);
    table.add_row(row!["Avg loss %", r->p.avg_loss_pct]);
    table.printstd();
}

pub fn metrics(metrics: &SessionMetrics) {
    let mut table = Table::new();
    table.set_titles(row!["Metric", "Value"]);
    table.add_row(row!["Total trades", r->metrics.total_trades]);
    table.add_row(row!["Winning / losing", r->format!("{} / {}", metrics.winning_trades, metrics.losing_trades)]);
    table.add_row(row!["Win rate", r->format!("{}%", metrics.win_rate)]);
    table.add_row(row!["Total PnL", r->metrics.total_pnl]);
    table.add_row(row!["Total fees", r->metrics.total_fees]);
    table.add_row(row!["Average win", r->metrics.average_win]);
    table.add_row(row!["Average loss", r->metrics.average_loss]);
    table.add_row(row!["Profit factor", r->metrics.profit_factor]);
    table.add_row(row!["Max drawdown", r->metrics.max_drawdown]);
    table.add_row(row!["Expectancy", r->metrics.expectancy]);
    table.add_row(row!["Sharpe ratio", r->metrics.sharpe_ratio]);
    if let Some(last) = metrics.equity_curve.last() {
        table.add_row(row!["Final curve equity", r->last.equity]);
    }
    table.printstd();
}

pub fn trades(trades: &[Trade]) {
    let mut table = Table::new();
    table.set_titles(row![
        "Entry", "Exit", "Instrument", "Strategy", "Side", "Entry px", "Exit px", "Qty", "PnL", "Fees"
    ]);
    for trade in trades {
        table.add_row(row![
            trade.entry_time.format("%Y-%m-%d %H:%M"),
            trade.exit_time.format("%Y-%m-%d %H:%M"),
            trade.instrument,
            trade.strategy,
            trade.direction,
            r->trade.entry_price,
            r->trade.exit_price,
            r->trade.quantity,
            r->trade.pnl.round_dp(2),
            r->trade.fees.round_dp(2)
        ]);
    }
    table.printstd();
}

pub fn monte_carlo(result: &AggregateResult) {
    let mut table = Table::new();
    table.set_titles(row!["Statistic", "Value"]);
    table.add_row(row!["Iterations", r->result.iterations]);
    table.add_row(row!["Mean total PnL", r->result.mean_total_pnl]);
    table.add_row(row!["Median total PnL", r->result.median_total_pnl]);
    table.add_row(row!["VaR 95% (total PnL)", r->result.var_95_total_pnl]);
    table.add_row(row!["Mean max drawdown", r->result.mean_max_drawdown]);
    table.add_row(row!["Mean win rate", r->format!("{}%", result.mean_win_rate)]);
    table.add_row(row!["Mean Sharpe ratio", r->result.mean_sharpe_ratio]);
    table.add_row(row!["Profitable runs", r->format!("{}%", result.profitable_pct)]);
    table.printstd();
}
