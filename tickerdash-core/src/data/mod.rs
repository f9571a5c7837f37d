//! Market data: provider trait, Yahoo client, cache, fetch, and currency.

pub mod cache;
pub mod currency;
pub mod fetch;
pub mod provider;
pub mod yahoo;

pub use cache::{CacheConfig, CachedQuote, QuoteCache, QuoteKey};
pub use currency::CurrencyResolver;
pub use fetch::{normalize_bars, FetchOutcome, FetchSource, HistoryFetcher};
pub use provider::{MarketDataError, MarketDataProvider, ProviderHistory, RawBar};
pub use yahoo::YahooProvider;
