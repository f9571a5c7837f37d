//! History fetch layer: cache in front of the provider, never-raise outcomes.
//!
//! `HistoryFetcher::fetch` always hands back a series. Provider failures are
//! converted into an empty series with the error riding along, so a render
//! loop can draw a degraded view instead of unwinding.

use super::cache::{CacheConfig, CachedQuote, QuoteCache, QuoteKey};
use super::provider::{MarketDataError, MarketDataProvider, RawBar};
use crate::domain::{Bar, Interval, Period, QuoteSeries, Ticker};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Where a fetched series came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchSource {
    Provider,
    Cache,
}

/// Result of a history fetch. `error` is Some when the provider failed and
/// the series is the cached-empty placeholder.
#[derive(Debug)]
pub struct FetchOutcome {
    pub series: QuoteSeries,
    pub currency_hint: Option<String>,
    pub source: FetchSource,
    pub error: Option<MarketDataError>,
}

impl FetchOutcome {
    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }
}

/// Cached, normalizing front door to a market data provider.
pub struct HistoryFetcher {
    provider: Arc<dyn MarketDataProvider>,
    cache: QuoteCache,
}

impl HistoryFetcher {
    pub fn new(provider: Arc<dyn MarketDataProvider>, cache: CacheConfig) -> Self {
        Self {
            provider,
            cache: QuoteCache::new(cache),
        }
    }

    /// Fetch bars for one ticker, answering from cache when fresh.
    ///
    /// Failed fetches cache an empty series under the same key, so repeated
    /// requests for a broken symbol stay off the provider until the TTL
    /// rolls over.
    pub fn fetch(&self, ticker: &Ticker, period: Period, interval: Interval) -> FetchOutcome {
        let key = QuoteKey {
            ticker: ticker.clone(),
            period,
            interval,
        };

        if let Some(hit) = self.cache.get(&key) {
            return FetchOutcome {
                series: hit.series,
                currency_hint: hit.currency_hint,
                source: FetchSource::Cache,
                error: None,
            };
        }

        match self.provider.history(ticker, period, interval) {
            Ok(history) => {
                let series = QuoteSeries::new(ticker.clone(), normalize_bars(&history.bars));
                self.cache.insert(
                    key,
                    CachedQuote {
                        series: series.clone(),
                        currency_hint: history.currency.clone(),
                    },
                );
                FetchOutcome {
                    series,
                    currency_hint: history.currency,
                    source: FetchSource::Provider,
                    error: None,
                }
            }
            Err(err) => {
                let series = QuoteSeries::empty(ticker.clone());
                self.cache.insert(
                    key,
                    CachedQuote {
                        series: series.clone(),
                        currency_hint: None,
                    },
                );
                FetchOutcome {
                    series,
                    currency_hint: None,
                    source: FetchSource::Provider,
                    error: Some(err),
                }
            }
        }
    }

    pub fn cache(&self) -> &QuoteCache {
        &self.cache
    }
}

/// Normalize raw provider bars: convert epoch timestamps to US/Eastern,
/// sort ascending, and drop duplicate timestamps keeping the first seen.
pub fn normalize_bars(raw: &[RawBar]) -> Vec<Bar> {
    let mut bars: Vec<Bar> = raw.iter().filter_map(bar_from_raw).collect();
    bars.sort_by_key(|b| b.timestamp);
    bars.dedup_by_key(|b| b.timestamp);
    bars
}

/// Convert one raw bar. Timestamps outside chrono's representable range are
/// dropped rather than propagated.
fn bar_from_raw(raw: &RawBar) -> Option<Bar> {
    let utc = chrono::DateTime::from_timestamp(raw.timestamp, 0)?;
    let timestamp = utc.with_timezone(&chrono_tz::US::Eastern).fixed_offset();
    Some(Bar {
        timestamp,
        open: raw.open,
        high: raw.high,
        low: raw.low,
        close: raw.close,
        volume: raw.volume,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::provider::ProviderHistory;
    use chrono::Timelike;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::Duration;

    fn raw(ts: i64, close: f64) -> RawBar {
        RawBar {
            timestamp: ts,
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 100,
        }
    }

    // 2023-11-14T22:13:20Z, after the November DST rollback
    const WINTER_TS: i64 = 1_700_000_000;
    // 2023-07-22T05:06:40Z, during daylight saving
    const SUMMER_TS: i64 = 1_690_000_000;

    #[test]
    fn normalize_converts_to_eastern() {
        let bars = normalize_bars(&[raw(WINTER_TS, 10.0), raw(SUMMER_TS, 11.0)]);
        assert_eq!(bars.len(), 2);
        // sorted ascending, so the summer instant comes first
        assert_eq!(bars[0].timestamp.offset().local_minus_utc(), -4 * 3600);
        assert_eq!(bars[1].timestamp.offset().local_minus_utc(), -5 * 3600);
        // 22:13:20 UTC is 17:13:20 EST
        assert_eq!(bars[1].timestamp.hour(), 17);
    }

    #[test]
    fn normalize_sorts_and_keeps_first_duplicate() {
        let bars = normalize_bars(&[
            raw(WINTER_TS + 60, 30.0),
            raw(WINTER_TS, 10.0),
            raw(WINTER_TS, 20.0),
        ]);
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].close, 10.0);
        assert_eq!(bars[1].close, 30.0);
        assert!(bars[0].timestamp < bars[1].timestamp);
    }

    #[test]
    fn normalize_drops_unrepresentable_timestamps() {
        let bars = normalize_bars(&[raw(WINTER_TS, 10.0), raw(i64::MAX, 11.0)]);
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].close, 10.0);
    }

    struct ScriptedProvider {
        bars: Vec<RawBar>,
        currency: Option<String>,
        fail: bool,
        calls: AtomicU64,
    }

    impl ScriptedProvider {
        fn new(bars: Vec<RawBar>) -> Self {
            Self {
                bars,
                currency: Some("USD".to_string()),
                fail: false,
                calls: AtomicU64::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                bars: Vec::new(),
                currency: None,
                fail: true,
                calls: AtomicU64::new(0),
            }
        }
    }

    impl MarketDataProvider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        fn history(
            &self,
            ticker: &Ticker,
            _period: Period,
            _interval: Interval,
        ) -> Result<ProviderHistory, MarketDataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(MarketDataError::NetworkUnreachable("no route".into()));
            }
            Ok(ProviderHistory {
                ticker: ticker.clone(),
                bars: self.bars.clone(),
                currency: self.currency.clone(),
            })
        }

        fn currency(&self, ticker: &Ticker) -> Result<String, MarketDataError> {
            self.currency
                .clone()
                .ok_or_else(|| MarketDataError::CurrencyUnavailable {
                    symbol: ticker.to_string(),
                })
        }
    }

    fn fetcher(provider: ScriptedProvider) -> (Arc<ScriptedProvider>, HistoryFetcher) {
        let provider = Arc::new(provider);
        let fetcher = HistoryFetcher::new(
            provider.clone() as Arc<dyn MarketDataProvider>,
            CacheConfig {
                ttl: Duration::from_secs(60),
                capacity: 8,
            },
        );
        (provider, fetcher)
    }

    #[test]
    fn second_fetch_is_served_from_cache() {
        let (provider, fetcher) =
            fetcher(ScriptedProvider::new(vec![raw(WINTER_TS, 10.0), raw(WINTER_TS + 60, 11.0)]));
        let ticker = Ticker::new("AAPL");

        let first = fetcher.fetch(&ticker, Period::OneMonth, Interval::OneDay);
        assert_eq!(first.source, FetchSource::Provider);
        assert_eq!(first.series.len(), 2);
        assert_eq!(first.currency_hint.as_deref(), Some("USD"));

        let second = fetcher.fetch(&ticker, Period::OneMonth, Interval::OneDay);
        assert_eq!(second.source, FetchSource::Cache);
        assert_eq!(second.series.len(), 2);
        assert_eq!(second.currency_hint.as_deref(), Some("USD"));

        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn different_periods_fetch_separately() {
        let (provider, fetcher) = fetcher(ScriptedProvider::new(vec![raw(WINTER_TS, 10.0)]));
        let ticker = Ticker::new("AAPL");

        fetcher.fetch(&ticker, Period::OneMonth, Interval::OneDay);
        fetcher.fetch(&ticker, Period::OneYear, Interval::OneWeek);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn failure_yields_empty_series_and_caches_it() {
        let (provider, fetcher) = fetcher(ScriptedProvider::failing());
        let ticker = Ticker::new("AAPL");

        let first = fetcher.fetch(&ticker, Period::OneMonth, Interval::OneDay);
        assert!(first.is_degraded());
        assert!(first.series.is_empty());
        assert!(matches!(
            first.error,
            Some(MarketDataError::NetworkUnreachable(_))
        ));

        // the empty placeholder is cached, so the provider is not retried
        let second = fetcher.fetch(&ticker, Period::OneMonth, Interval::OneDay);
        assert_eq!(second.source, FetchSource::Cache);
        assert!(second.series.is_empty());
        assert!(!second.is_degraded());

        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn fetch_normalizes_provider_order() {
        let (_, fetcher) = fetcher(ScriptedProvider::new(vec![
            raw(WINTER_TS + 120, 12.0),
            raw(WINTER_TS, 10.0),
        ]));
        let outcome = fetcher.fetch(&Ticker::new("AAPL"), Period::OneMonth, Interval::OneDay);
        assert_eq!(outcome.series.bars[0].close, 10.0);
        assert_eq!(outcome.series.bars[1].close, 12.0);
    }
}
