//! foliotrack entry point.
//!
//! Thin wiring only: argument parsing, file loading, tracing setup. The
//! actual computation lives in ft-engine and ft-stats; output is pretty
//! JSON on stdout so it can be piped into other tools.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use ft_config::TargetConfig;
use ft_engine::{aggregate_positions, annotate, position_detail, sort_positions, MarkMap, PositionSort};
use ft_schemas::{parse_execution_time, AccountEntry, InstrumentClass, Trade};
use ft_stats::{asset_matrix, daily_realized, monthly_asset_stats, normalize_entries, weekly_realized, yearly_asset_stats, Bucket};

#[derive(Parser)]
#[command(name = "foliotrack")]
#[command(about = "Trading-portfolio tracker: FIFO P&L, positions, period stats", long_about = None)]
struct Cli {
    /// Target/venue config (YAML). Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregated positions by underlying, plus portfolio totals
    Positions {
        /// Trade records (JSON array)
        #[arg(long)]
        trades: PathBuf,

        /// Mark prices (JSON object symbol -> price)
        #[arg(long)]
        marks: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = SortArg::Mtm)]
        sort: SortArg,

        #[arg(long, default_value_t = false)]
        ascending: bool,
    },

    /// Annotated trades, in input order (optionally one symbol's detail)
    Trades {
        #[arg(long)]
        trades: PathBuf,

        #[arg(long)]
        marks: Option<PathBuf>,

        /// Restrict to trades whose symbol or underlying matches
        #[arg(long)]
        symbol: Option<String>,
    },

    /// Period statistics
    Stats {
        #[command(subcommand)]
        cmd: StatsCmd,
    },

    /// Asset matrix views (period x account)
    Matrix {
        #[command(subcommand)]
        cmd: MatrixCmd,
    },
}

#[derive(Subcommand)]
enum StatsCmd {
    /// Daily realized P&L (venue-local dates, weekday back-fill)
    Daily {
        #[arg(long)]
        trades: PathBuf,
    },
    /// Weekly realized P&L (weeks ending Friday)
    Weekly {
        #[arg(long)]
        trades: PathBuf,
    },
    /// Monthly account-asset statistics
    Monthly {
        /// Account entries (JSON array)
        #[arg(long)]
        entries: PathBuf,
    },
    /// Yearly account-asset statistics
    Yearly {
        #[arg(long)]
        entries: PathBuf,
    },
}

#[derive(Subcommand)]
enum MatrixCmd {
    Monthly {
        #[arg(long)]
        entries: PathBuf,
    },
    Yearly {
        #[arg(long)]
        entries: PathBuf,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum SortArg {
    Mtm,
    Value,
    Symbol,
    Qty,
}

impl From<SortArg> for PositionSort {
    fn from(a: SortArg) -> Self {
        match a {
            SortArg::Mtm => PositionSort::Mtm,
            SortArg::Value => PositionSort::Value,
            SortArg::Symbol => PositionSort::Symbol,
            SortArg::Qty => PositionSort::EquityQty,
        }
    }
}

/// Trade record as it appears in input files: identical to [`Trade`]
/// except the timestamp is still a string in whatever format the feed
/// wrote, resolved here against the venue zone.
#[derive(Debug, Deserialize)]
struct RawTrade {
    trade_id: String,
    #[serde(default)]
    account_id: Option<String>,
    symbol: String,
    #[serde(default)]
    underlying: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    instrument: InstrumentClass,
    #[serde(default)]
    quantity: f64,
    #[serde(default)]
    price: f64,
    #[serde(default = "one")]
    multiplier: f64,
    #[serde(default)]
    commission: f64,
    #[serde(default)]
    currency: Option<String>,
    executed_at: String,
}

fn one() -> f64 {
    1.0
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ft_config::load_target_config(path)?,
        None => TargetConfig::default(),
    };

    match cli.cmd {
        Commands::Positions {
            trades,
            marks,
            sort,
            ascending,
        } => {
            let mut trades = load_trades(&trades, &config)?;
            let mark_map = load_marks(marks.as_deref())?;
            annotate(&mut trades, &mark_map);

            let (mut positions, totals) = aggregate_positions(&trades, &config.target_map());
            sort_positions(&mut positions, sort.into(), ascending);
            info!(positions = positions.len(), "aggregated");

            print_json(&json!({ "positions": positions, "totals": totals }))
        }

        Commands::Trades {
            trades,
            marks,
            symbol,
        } => {
            let mut trades = load_trades(&trades, &config)?;
            let mark_map = load_marks(marks.as_deref())?;
            annotate(&mut trades, &mark_map);

            match symbol {
                Some(sym) => {
                    let detail = position_detail(&trades, &sym)
                        .with_context(|| format!("no trades reference '{sym}'"))?;
                    print_json(&detail)
                }
                None => print_json(&trades),
            }
        }

        Commands::Stats { cmd } => match cmd {
            StatsCmd::Daily { trades } => {
                let mut trades = load_trades(&trades, &config)?;
                annotate(&mut trades, &MarkMap::new());
                print_json(&daily_realized(&trades, config.venue()?))
            }
            StatsCmd::Weekly { trades } => {
                let mut trades = load_trades(&trades, &config)?;
                annotate(&mut trades, &MarkMap::new());
                print_json(&weekly_realized(&trades, config.venue()?))
            }
            StatsCmd::Monthly { entries } => {
                let entries = load_entries(&entries, &config)?;
                print_json(&monthly_asset_stats(&entries))
            }
            StatsCmd::Yearly { entries } => {
                let entries = load_entries(&entries, &config)?;
                print_json(&yearly_asset_stats(&entries))
            }
        },

        Commands::Matrix { cmd } => match cmd {
            MatrixCmd::Monthly { entries } => {
                let entries = load_entries(&entries, &config)?;
                print_json(&asset_matrix(&entries, Bucket::Month))
            }
            MatrixCmd::Yearly { entries } => {
                let entries = load_entries(&entries, &config)?;
                print_json(&asset_matrix(&entries, Bucket::Year))
            }
        },
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Load and resolve a trade file. A single bad timestamp fails the whole
/// load — partial results are never emitted.
fn load_trades(path: &Path, config: &TargetConfig) -> Result<Vec<Trade>> {
    let venue = config.venue()?;
    let text = fs::read_to_string(path)
        .with_context(|| format!("cannot read trades {}", path.display()))?;
    let raw: Vec<RawTrade> = serde_json::from_str(&text)
        .with_context(|| format!("invalid trade JSON in {}", path.display()))?;

    let mut trades = Vec::with_capacity(raw.len());
    for r in raw {
        let executed_at = parse_execution_time(&r.executed_at, venue)
            .with_context(|| format!("trade '{}'", r.trade_id))?;
        trades.push(Trade {
            trade_id: r.trade_id,
            account_id: r.account_id,
            symbol: r.symbol,
            underlying: r.underlying,
            description: r.description,
            instrument: r.instrument,
            quantity: r.quantity,
            price: r.price,
            multiplier: r.multiplier,
            commission: r.commission,
            currency: r.currency,
            executed_at,
            realized_pnl: 0.0,
            remaining_qty: 0.0,
            credit: 0.0,
            mtm_price: 0.0,
            mtm_value: 0.0,
        });
    }
    info!(count = trades.len(), "trades loaded");
    Ok(trades)
}

fn load_marks(path: Option<&Path>) -> Result<MarkMap> {
    match path {
        Some(p) => ft_config::load_mark_map(p),
        None => Ok(MarkMap::new()),
    }
}

fn load_entries(path: &Path, config: &TargetConfig) -> Result<Vec<AccountEntry>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("cannot read entries {}", path.display()))?;
    let entries: Vec<AccountEntry> = serde_json::from_str(&text)
        .with_context(|| format!("invalid entry JSON in {}", path.display()))?;
    info!(count = entries.len(), "entries loaded");
    Ok(normalize_entries(&entries, config.base_currency()))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
