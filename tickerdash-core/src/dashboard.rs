//! Dashboard service: one call assembles everything a view needs.
//!
//! `snapshot` is the single entry point a front end calls per refresh. It
//! never fails: provider trouble degrades to an empty series plus a
//! warning, and the rest of the panel (currency, metrics, analysis) does
//! the best it can with what came back.

use crate::analysis::{analyze, AnalysisSummary};
use crate::data::{
    CacheConfig, CurrencyResolver, FetchSource, HistoryFetcher, MarketDataProvider, QuoteCache,
};
use crate::domain::{Currency, Interval, Period, Ticker};
use crate::indicators::{add_indicators, EnrichedSeries};
use crate::metrics::{summarize, SummaryMetrics};
use crate::watchlist::{quick_quote, QuickQuote};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Everything one dashboard view needs for a ticker and period.
#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub ticker: Ticker,
    pub period: Period,
    pub interval: Interval,
    pub currency: Currency,
    pub enriched: EnrichedSeries,
    /// None when the series is empty.
    pub metrics: Option<SummaryMetrics>,
    /// None when the series is empty.
    pub analysis: Option<AnalysisSummary>,
    pub source: FetchSource,
    /// Human-readable degradations: fetch failures, suspect bars.
    pub warnings: Vec<String>,
}

impl DashboardSnapshot {
    pub fn has_data(&self) -> bool {
        !self.enriched.series.is_empty()
    }
}

/// Stateful facade over the fetcher and currency resolver.
pub struct DashboardService {
    fetcher: HistoryFetcher,
    resolver: CurrencyResolver,
}

impl DashboardService {
    pub fn new(provider: Arc<dyn MarketDataProvider>, cache: CacheConfig) -> Self {
        let fetcher = HistoryFetcher::new(Arc::clone(&provider), cache);
        let resolver = CurrencyResolver::new(provider);
        Self { fetcher, resolver }
    }

    /// Assemble the full view: fetch (cached), resolve currency, attach
    /// indicators, summarize, analyze.
    pub fn snapshot(&self, ticker: &Ticker, period: Period) -> DashboardSnapshot {
        let interval = period.interval();
        let outcome = self.fetcher.fetch(ticker, period, interval);

        let mut warnings = Vec::new();
        if let Some(err) = &outcome.error {
            warnings.push(format!("fetch failed for {ticker}: {err}"));
        }

        let currency = self
            .resolver
            .resolve_with_hint(ticker, outcome.currency_hint.as_deref());

        let suspect = outcome.series.bars.iter().filter(|b| !b.is_sane()).count();
        if suspect > 0 {
            warnings.push(format!("{suspect} bar(s) have missing or inconsistent prices"));
        }

        let enriched = add_indicators(outcome.series);
        let metrics = summarize(&enriched.series);
        let analysis = metrics.as_ref().map(|m| analyze(&enriched, m));

        DashboardSnapshot {
            ticker: ticker.clone(),
            period,
            interval,
            currency,
            enriched,
            metrics,
            analysis,
            source: outcome.source,
            warnings,
        }
    }

    /// One-day quick quote for a watchlist row. None when nothing came back.
    pub fn quick_quote(&self, ticker: &Ticker) -> Option<QuickQuote> {
        let period = Period::OneDay;
        let outcome = self.fetcher.fetch(ticker, period, period.interval());
        quick_quote(&outcome.series)
    }

    /// Display currency via a provider lookup with suffix and USD fallbacks.
    pub fn resolve_currency(&self, ticker: &Ticker) -> Currency {
        self.resolver.resolve(ticker)
    }

    pub fn cache(&self) -> &QuoteCache {
        self.fetcher.cache()
    }
}
