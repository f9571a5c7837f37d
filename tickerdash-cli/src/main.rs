//! TickerDash CLI — quote, watchlist, and currency commands.
//!
//! Commands:
//! - `quote` — fetch one ticker, print metrics, analysis, indicators, bars
//! - `watchlist` — quick quotes for every configured watchlist group
//! - `currency` — resolved trading currency for a ticker
//!
//! Fetch failures never fail the process: the snapshot degrades to an empty
//! view with WARNING lines. Only argument and local IO errors exit non-zero.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use tickerdash_core::config::DashboardConfig;
use tickerdash_core::dashboard::{DashboardService, DashboardSnapshot};
use tickerdash_core::data::{FetchSource, MarketDataProvider, YahooProvider};
use tickerdash_core::domain::{Period, Ticker};
use tickerdash_core::export::export_series_csv;
use tickerdash_core::indicators::col;

#[derive(Parser)]
#[command(
    name = "tickerdash",
    about = "TickerDash CLI — stock quotes, indicators, and analysis"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a ticker and print metrics, analysis, and indicator values.
    Quote {
        /// Ticker symbol (e.g., AAPL, SAP.DE, GOTO.JK). Defaults to the
        /// configured default ticker.
        ticker: Option<String>,

        /// Lookback period: 1d, 1wk, 1mo, 3mo, 6mo, 1y, 2y, 5y.
        #[arg(long)]
        period: Option<String>,

        /// Comma-separated indicator columns to show (e.g., sma_20,rsi_14).
        #[arg(long)]
        indicators: Option<String>,

        /// Write the enriched series to a CSV file.
        #[arg(long)]
        export: Option<PathBuf>,

        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print quick quotes for every watchlist group.
    Watchlist {
        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the resolved trading currency for a ticker.
    Currency {
        /// Ticker symbol.
        ticker: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Quote {
            ticker,
            period,
            indicators,
            export,
            config,
        } => run_quote(ticker, period, indicators, export, config),
        Commands::Watchlist { config } => run_watchlist(config),
        Commands::Currency { ticker } => run_currency(&ticker),
    }
}

fn load_config(path: Option<&Path>) -> Result<DashboardConfig> {
    match path {
        Some(p) => Ok(DashboardConfig::from_file(p)?),
        None => Ok(DashboardConfig::default()),
    }
}

fn make_service(config: &DashboardConfig) -> DashboardService {
    let provider: Arc<dyn MarketDataProvider> = Arc::new(YahooProvider::new());
    DashboardService::new(provider, config.cache_config())
}

fn run_quote(
    ticker: Option<String>,
    period: Option<String>,
    indicators: Option<String>,
    export: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config(config_path.as_deref())?;

    let ticker = Ticker::new(ticker.as_deref().unwrap_or(&config.defaults.ticker));
    let period = match period.as_deref() {
        Some(p) => Period::from_str(p)?,
        None => config.defaults.period,
    };
    let filter = indicators.as_deref().map(parse_indicator_filter).transpose()?;

    let service = make_service(&config);
    let snapshot = service.snapshot(&ticker, period);

    print_snapshot(&snapshot, filter.as_deref());

    if let Some(path) = export {
        let csv = export_series_csv(&snapshot.enriched)?;
        std::fs::write(&path, csv)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!();
        println!("Exported CSV to: {}", path.display());
    }

    Ok(())
}

/// Split a `--indicators` list and reject names outside the fixed roster.
fn parse_indicator_filter(list: &str) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for raw in list.split(',') {
        let name = raw.trim().to_lowercase();
        if name.is_empty() {
            continue;
        }
        if !col::ALL.contains(&name.as_str()) {
            bail!("unknown indicator '{name}'. Valid: {}", col::ALL.join(", "));
        }
        names.push(name);
    }
    if names.is_empty() {
        bail!("--indicators given but no names parsed");
    }
    Ok(names)
}

fn print_snapshot(snapshot: &DashboardSnapshot, filter: Option<&[String]>) {
    let currency = snapshot.currency;

    println!();
    println!("=== Quote: {} ===", snapshot.ticker);
    println!(
        "Period:         {} ({} bars)",
        snapshot.period, snapshot.interval
    );
    println!(
        "Source:         {}",
        match snapshot.source {
            FetchSource::Provider => "provider",
            FetchSource::Cache => "cache",
        }
    );
    println!(
        "Currency:       {} ({})",
        currency.code(),
        currency.symbol()
    );

    if !snapshot.has_data() {
        println!();
        println!("No data for {}.", snapshot.ticker);
        print_warnings(snapshot);
        return;
    }

    if let Some(metrics) = &snapshot.metrics {
        println!("Last Close:     {}", currency.format_price(metrics.last_close));
        println!(
            "Change:         {} ({:+.2}%)",
            currency.format_price(metrics.change),
            metrics.pct_change
        );
        println!("High:           {}", currency.format_price(metrics.high));
        println!("Low:            {}", currency.format_price(metrics.low));
        println!("Volume:         {}", metrics.volume);
    }

    if let Some(analysis) = &snapshot.analysis {
        println!();
        println!("--- Analysis ---");
        println!("Trend:          {}", analysis.trend);
        match &analysis.rsi {
            Some(rsi) => println!("RSI(14):        {:.1} ({})", rsi.value, rsi.zone),
            None => println!("RSI(14):        n/a"),
        }
        match &analysis.ma_cross {
            Some(cross) => println!("MA 20/50:       {cross}"),
            None => println!("MA 20/50:       n/a"),
        }
        println!("Volume:         {}", analysis.volume);
    }

    if snapshot.enriched.has_indicators() {
        println!();
        println!("--- Indicators (last values) ---");
        for name in snapshot.enriched.columns.names() {
            if let Some(filter) = filter {
                if !filter.iter().any(|f| f == name) {
                    continue;
                }
            }
            match snapshot.enriched.columns.last(name) {
                Some(v) if !v.is_nan() => println!("{name:<14} {v:>14.6}"),
                _ => println!("{name:<14} {:>14}", "n/a"),
            }
        }
    }

    print_recent_bars(snapshot);
    print_warnings(snapshot);
}

fn print_recent_bars(snapshot: &DashboardSnapshot) {
    let bars = &snapshot.enriched.series.bars;
    let tail = &bars[bars.len().saturating_sub(15)..];
    if tail.is_empty() {
        return;
    }

    println!();
    println!("--- Recent Bars (last {}) ---", tail.len());
    println!(
        "{:<22} {:>10} {:>10} {:>10} {:>10} {:>12}",
        "Timestamp", "Open", "High", "Low", "Close", "Volume"
    );
    for bar in tail {
        let stamp = bar.timestamp.format("%Y-%m-%d %H:%M").to_string();
        println!(
            "{:<22} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>12}",
            stamp, bar.open, bar.high, bar.low, bar.close, bar.volume
        );
    }
}

fn print_warnings(snapshot: &DashboardSnapshot) {
    if snapshot.warnings.is_empty() {
        return;
    }
    println!();
    for warning in &snapshot.warnings {
        println!("WARNING: {warning}");
    }
}

fn run_watchlist(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config(config_path.as_deref())?;
    let service = make_service(&config);

    for group in &config.watchlist {
        println!();
        println!("=== {} ===", group.name);
        for symbol in &group.symbols {
            let ticker = Ticker::new(symbol);
            match service.quick_quote(&ticker) {
                Some(quote) => println!(
                    "{:<10} {:>10.2} {:>+9.2} ({:+.2}%)",
                    ticker.as_str(),
                    quote.last,
                    quote.change,
                    quote.pct_change
                ),
                None => println!("{:<10} {:>10}", ticker.as_str(), "N/A"),
            }
        }
    }

    Ok(())
}

fn run_currency(ticker: &str) -> Result<()> {
    let config = DashboardConfig::default();
    let service = make_service(&config);

    let ticker = Ticker::new(ticker);
    let currency = service.resolve_currency(&ticker);

    println!("Ticker:    {ticker}");
    println!("Currency:  {}", currency.code());
    println!("Symbol:    {}", currency.symbol());
    println!("Sample:    {}", currency.format_price(1234.5));

    Ok(())
}
