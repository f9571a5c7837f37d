//! In-memory quote cache with TTL expiry and bounded capacity.
//!
//! A dashboard redraw asks for the same (ticker, period, interval) over and
//! over; the cache answers repeats from memory so the provider sees at most
//! one request per key per TTL window. Failed fetches cache an empty series
//! under the same TTL, which also keeps error storms off the provider.

use crate::domain::{Interval, Period, QuoteSeries, Ticker};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Cache tuning knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// How long an entry stays fresh.
    pub ttl: Duration,
    /// Maximum number of live entries; zero disables caching entirely.
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(30),
            capacity: 64,
        }
    }
}

/// Cache key: one entry per ticker, period, and interval combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuoteKey {
    pub ticker: Ticker,
    pub period: Period,
    pub interval: Interval,
}

/// Cached payload: the normalized series plus the provider's currency code.
#[derive(Debug, Clone)]
pub struct CachedQuote {
    pub series: QuoteSeries,
    pub currency_hint: Option<String>,
}

struct Entry {
    quote: CachedQuote,
    inserted_at: Instant,
}

/// Thread-safe in-memory quote cache.
pub struct QuoteCache {
    entries: Mutex<HashMap<QuoteKey, Entry>>,
    ttl: Duration,
    capacity: usize,
}

impl QuoteCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl: config.ttl,
            capacity: config.capacity,
        }
    }

    /// Look up a fresh entry. Expired entries are dropped on access.
    pub fn get(&self, key: &QuoteKey) -> Option<CachedQuote> {
        let mut entries = self.entries.lock().unwrap();
        match entries.get(key) {
            Some(entry) if entry.inserted_at.elapsed() < self.ttl => Some(entry.quote.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Store an entry, evicting the stalest one if the cache is full.
    pub fn insert(&self, key: QuoteKey, quote: CachedQuote) {
        if self.capacity == 0 {
            return;
        }
        let mut entries = self.entries.lock().unwrap();
        entries.retain(|_, e| e.inserted_at.elapsed() < self.ttl);
        if entries.len() >= self.capacity && !entries.contains_key(&key) {
            let oldest = entries
                .iter()
                .min_by_key(|(_, e)| e.inserted_at)
                .map(|(k, _)| k.clone());
            if let Some(oldest) = oldest {
                entries.remove(&oldest);
            }
        }
        entries.insert(
            key,
            Entry {
                quote,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Number of live (unexpired) entries.
    pub fn len(&self) -> usize {
        let mut entries = self.entries.lock().unwrap();
        entries.retain(|_, e| e.inserted_at.elapsed() < self.ttl);
        entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry regardless of age.
    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }
}
