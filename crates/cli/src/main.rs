//! Command Line Interface for the trade journal backtest engine.
mod args;
mod output;

use anyhow::{Context, Result};
use args::ConfigArgs;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;
use trade_journal_data::JsonFileStore;
use trade_journal_domain::entities::SessionId;
use trade_journal_execution::config::ExecutionConfig;
use trade_journal_execution::session::SessionService;
use trade_journal_simulation::monte_carlo::MonteCarloRunner;
use trade_journal_simulation::runner::run_simulation;

const DATA_ENV: &str = "TRADE_JOURNAL_DATA";
const DEFAULT_DATA_FILE: &str = "trade-journal.json";

#[derive(Parser)]
#[command(name = "tj")]
#[command(about = "Trade journal backtest sessions and performance metrics", long_about = None)]
struct Cli {
    /// Session file (defaults to $TRADE_JOURNAL_DATA or ./trade-journal.json)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a backtest session
    Create {
        /// Session name
        #[arg(short, long)]
        name: String,

        #[command(flatten)]
        config: ConfigArgs,
    },
    /// List all sessions
    List,
    /// Show a session with its configuration and metrics
    Show {
        /// Session ID
        id: SessionId,

        /// Also print every trade
        #[arg(long)]
        trades: bool,
    },
    /// Run the simulation for a session
    Run {
        /// Session ID
        id: SessionId,
    },
    /// Change a session's configuration, discarding its results
    Update {
        /// Session ID
        id: SessionId,

        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Delete a session
    Delete {
        /// Session ID
        id: SessionId,
    },
    /// Run a one-off simulation without saving a session
    Simulate {
        #[command(flatten)]
        config: ConfigArgs,

        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,

        /// Also print every trade
        #[arg(long)]
        trades: bool,
    },
    /// Repeat a simulation and summarize the spread of outcomes
    MonteCarlo {
        #[command(flatten)]
        config: ConfigArgs,

        /// Number of simulations
        #[arg(long, default_value_t = 100)]
        iterations: usize,

        /// Seed for a reproducible batch
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let data = cli
        .data
        .or_else(|| env::var(DATA_ENV).ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));
    let config = ExecutionConfig::from_env()?;

    match cli.command {
        Commands::Simulate {
            config: args,
            seed,
            trades,
        } => {
            let session_config = args.build()?;
            let mut rng = with_seed(config, seed).rng();

            println!("🚀 Simulating {} day(s)...", session_config.date_range.days().max(1));
            let outcome = run_simulation(&session_config, &mut rng)?;

            output::metrics(&outcome.metrics);
            println!(
                "Final equity: {:.2} (peak {:.2})",
                outcome.final_equity, outcome.peak_equity
            );
            if trades {
                output::trades(&outcome.trades);
            }
        }
        Commands::MonteCarlo {
            config: args,
            iterations,
            seed,
        } => {
            let session_config = args.build()?;
            let mut rng = with_seed(config, seed).rng();

            println!("🎲 Running {iterations} simulations...");
            let result = MonteCarloRunner::new(session_config, iterations).run(&mut rng)?;
            output::monte_carlo(&result);
        }
        command => {
            let store = Arc::new(JsonFileStore::new(&data));
            debug!(path = %store.path().display(), "Opening session store");
            let service = SessionService::open(store, config)
                .await
                .with_context(|| format!("failed to open {}", data.display()))?;
            run_session_command(&service, command).await?;
        }
    }

    Ok(())
}

async fn run_session_command(service: &SessionService, command: Commands) -> Result<()> {
    match command {
        Commands::Create { name, config } => {
            let session = service.create_session(name, config.build()?).await?;
            println!("✅ Created session {} ({})", session.name, session.id);
        }
        Commands::List => {
            output::sessions(&service.list_sessions().await);
        }
        Commands::Show { id, trades } => {
            let session = service.get_session(id).await?;
            output::session(&session);
            if trades && !session.trades.is_empty() {
                println!();
                output::trades(&session.trades);
            }
        }
        Commands::Run { id } => {
            println!("🚀 Running session {id}...");
            let session = service.run(id).await?;
            output::run_result(&session);
        }
        Commands::Update { id, config } => {
            let current = service.get_session(id).await?;
            let updated = service
                .update_config(id, config.apply(current.config)?)
                .await?;
            println!("✅ Updated session {}; previous results cleared", updated.id);
            output::config(&updated.config);
        }
        Commands::Delete { id } => {
            service.delete_session(id).await?;
            println!("🗑️  Deleted session {id}");
        }
        Commands::Simulate { .. } | Commands::MonteCarlo { .. } => {}
    }
    Ok(())
}

fn with_seed(config: ExecutionConfig, seed: Option<u64>) -> ExecutionConfig {
    match seed {
        Some(seed) => config.with_seed(seed),
        None => config,
    }
}
