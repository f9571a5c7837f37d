//! Yahoo Finance quote provider.
//!
//! Fetches OHLCV bars from Yahoo's v8 chart API. Handles response parsing
//! and error classification; retry discipline lives above this layer, so
//! each call is exactly one upstream request.
//!
//! Yahoo Finance has no official API and is subject to unannounced format
//! changes. Format drift surfaces as `ResponseFormatChanged`.

use super::provider::{MarketDataError, MarketDataProvider, ProviderHistory, RawBar};
use crate::domain::{Interval, Period, Ticker};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::time::Duration;

/// Yahoo Finance v8 chart API response.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    meta: Option<ChartMeta>,
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    currency: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<u64>>,
}

/// Yahoo Finance quote provider.
pub struct YahooProvider {
    client: reqwest::blocking::Client,
}

impl YahooProvider {
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .expect("failed to build HTTP client");

        Self { client }
    }

    /// Build the chart API URL for a ticker, period, and interval.
    ///
    /// The one-week period asks for an explicit seven-day epoch window ending
    /// at `now`; the `range=1wk` token would cover only the trading days.
    fn chart_url(ticker: &Ticker, period: Period, interval: Interval, now: DateTime<Utc>) -> String {
        let base = "https://query2.finance.yahoo.com/v8/finance/chart";
        match period {
            Period::OneWeek => {
                let end = now.timestamp();
                let start = end - 7 * 86_400;
                format!("{base}/{ticker}?period1={start}&period2={end}&interval={interval}")
            }
            _ => format!("{base}/{ticker}?range={period}&interval={interval}"),
        }
    }

    /// Execute one request and decode the chart body.
    fn send(&self, url: &str, ticker: &Ticker) -> Result<ChartResponse, MarketDataError> {
        let resp = self.client.get(url).send().map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                MarketDataError::NetworkUnreachable(e.to_string())
            } else {
                MarketDataError::Other(e.to_string())
            }
        })?;

        let status = resp.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = resp
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(60);
            return Err(MarketDataError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        // Unknown symbols come back as a 404 that still carries a chart
        // body; the parser turns that into SymbolNotFound.
        if !status.is_success() && status != reqwest::StatusCode::NOT_FOUND {
            return Err(MarketDataError::Other(format!("HTTP {status} for {ticker}")));
        }

        resp.json().map_err(|e| {
            MarketDataError::ResponseFormatChanged(format!(
                "failed to parse response for {ticker}: {e}"
            ))
        })
    }

    /// Parse the chart API response into raw bars plus the metadata currency.
    ///
    /// A well-formed response with no timestamp rows parses to zero bars;
    /// that is the "nothing traded in this window" shape, not an error.
    fn parse_response(
        ticker: &Ticker,
        resp: ChartResponse,
    ) -> Result<(Vec<RawBar>, Option<String>), MarketDataError> {
        let result = resp.chart.result.ok_or_else(|| match resp.chart.error {
            Some(err) if err.code == "Not Found" => MarketDataError::SymbolNotFound {
                symbol: ticker.to_string(),
            },
            Some(err) => {
                MarketDataError::ResponseFormatChanged(format!("{}: {}", err.code, err.description))
            }
            None => MarketDataError::ResponseFormatChanged("empty result with no error".into()),
        })?;

        let data = result
            .into_iter()
            .next()
            .ok_or_else(|| MarketDataError::ResponseFormatChanged("result array is empty".into()))?;

        let currency = data.meta.and_then(|m| m.currency);

        let Some(timestamps) = data.timestamp else {
            return Ok((Vec::new(), currency));
        };

        let quote = data
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| MarketDataError::ResponseFormatChanged("no quote data".into()))?;

        let mut bars = Vec::with_capacity(timestamps.len());

        for (i, &ts) in timestamps.iter().enumerate() {
            let open = quote.open.get(i).copied().flatten();
            let high = quote.high.get(i).copied().flatten();
            let low = quote.low.get(i).copied().flatten();
            let close = quote.close.get(i).copied().flatten();
            let volume = quote.volume.get(i).copied().flatten();

            // Skip rows where all OHLCV are None (holidays/non-trading days)
            if open.is_none()
                && high.is_none()
                && low.is_none()
                && close.is_none()
                && volume.is_none()
            {
                continue;
            }

            bars.push(RawBar {
                timestamp: ts,
                open: open.unwrap_or(f64::NAN),
                high: high.unwrap_or(f64::NAN),
                low: low.unwrap_or(f64::NAN),
                close: close.unwrap_or(f64::NAN),
                volume: volume.unwrap_or(0),
            });
        }

        Ok((bars, currency))
    }
}

impl Default for YahooProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MarketDataProvider for YahooProvider {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn history(
        &self,
        ticker: &Ticker,
        period: Period,
        interval: Interval,
    ) -> Result<ProviderHistory, MarketDataError> {
        let url = Self::chart_url(ticker, period, interval, Utc::now());
        let chart = self.send(&url, ticker)?;
        let (bars, currency) = Self::parse_response(ticker, chart)?;
        Ok(ProviderHistory {
            ticker: ticker.clone(),
            bars,
            currency,
        })
    }

    fn currency(&self, ticker: &Ticker) -> Result<String, MarketDataError> {
        let url = Self::chart_url(ticker, Period::OneDay, Interval::OneDay, Utc::now());
        let chart = self.send(&url, ticker)?;
        let (_, currency) = Self::parse_response(ticker, chart)?;
        currency.ok_or_else(|| MarketDataError::CurrencyUnavailable {
            symbol: ticker.to_string(),
        })
    }
}
