//! Market data provider trait and structured error types.
//!
//! The MarketDataProvider trait abstracts over quote sources so the fetch
//! layer can swap implementations and tests can substitute canned data.

use crate::domain::{Interval, Period, Ticker};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raw OHLCV bar as reported by a provider, before normalization.
///
/// `timestamp` is epoch seconds. Providers report instants without a zone;
/// they are taken as UTC and converted to US/Eastern during normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawBar {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Structured error types for market data operations.
///
/// These never escape the fetch layer as panics or early returns; they ride
/// along inside the fetch outcome so callers can render a degraded view.
#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("currency unavailable for {symbol}")]
    CurrencyUnavailable { symbol: String },

    #[error("provider error: {0}")]
    Other(String),
}

/// History for a single ticker as returned by a provider.
#[derive(Debug, Clone)]
pub struct ProviderHistory {
    pub ticker: Ticker,
    pub bars: Vec<RawBar>,
    /// ISO currency code from provider metadata, when the response carries one.
    pub currency: Option<String>,
}

/// Trait for quote providers (Yahoo Finance chart API, test doubles).
///
/// Implementations perform exactly one upstream request per call: retry and
/// rate-limit discipline belongs to the layers above, which cache results
/// rather than hammering the provider.
pub trait MarketDataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch OHLCV history for a ticker over a lookback period.
    fn history(
        &self,
        ticker: &Ticker,
        period: Period,
        interval: Interval,
    ) -> Result<ProviderHistory, MarketDataError>;

    /// Look up the trading currency code for a ticker.
    fn currency(&self, ticker: &Ticker) -> Result<String, MarketDataError>;
}
