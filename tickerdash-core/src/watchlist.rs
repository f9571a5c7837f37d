//! Watchlist groups and the quick quote computed for each symbol.

use crate::domain::QuoteSeries;
use serde::{Deserialize, Serialize};

/// A named group of symbols rendered together on the watchlist panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchlistGroup {
    pub name: String,
    pub symbols: Vec<String>,
}

impl WatchlistGroup {
    pub fn new(name: &str, symbols: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            symbols: symbols.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Built-in groups used when the config file does not define any.
pub fn default_groups() -> Vec<WatchlistGroup> {
    vec![
        WatchlistGroup::new("US Tech", &["AAPL", "GOOGL", "MSFT", "AMZN"]),
        WatchlistGroup::new("European", &["SAP.DE", "ASML.AS", "NESN.SW"]),
        WatchlistGroup::new("Asian", &["TSM", "7203.T", "BABA"]),
        WatchlistGroup::new("Emerging", &["BBCA.JK", "VALE", "INFY"]),
    ]
}

/// Day move computed from a one-day intraday series: last close against the
/// session's first open.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuickQuote {
    pub last: f64,
    pub change: f64,
    pub pct_change: f64,
}

/// Compute the quick quote for a series. None when the series is empty or
/// either endpoint price is NaN. A zero opening price pins pct_change at 0.
pub fn quick_quote(series: &QuoteSeries) -> Option<QuickQuote> {
    let first = series.first_bar()?;
    let last = series.last_bar()?;
    if first.open.is_nan() || last.close.is_nan() {
        return None;
    }

    let change = last.close - first.open;
    let pct_change = if first.open == 0.0 {
        0.0
    } else {
        change / first.open * 100.0
    };

    Some(QuickQuote {
        last: last.close,
        change,
        pct_change,
    })
}
