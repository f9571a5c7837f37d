//! Display currency resolution.
//!
//! Provider metadata is the source of truth; the exchange suffix of the
//! ticker is the fallback, and USD is the last resort. Resolution never
//! fails — a wrong-but-plausible currency beats an error screen.

use super::provider::MarketDataProvider;
use crate::domain::{Currency, Ticker};
use std::sync::Arc;

pub struct CurrencyResolver {
    provider: Arc<dyn MarketDataProvider>,
}

impl CurrencyResolver {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self { provider }
    }

    /// Resolve the display currency for a ticker via a provider lookup.
    pub fn resolve(&self, ticker: &Ticker) -> Currency {
        match self.provider.currency(ticker) {
            Ok(code) => Self::from_code_or_fallback(ticker, &code),
            Err(_) => Self::fallback(ticker),
        }
    }

    /// Resolve using a code already in hand (chart metadata), skipping the
    /// provider round trip. Without a hint this degrades to `resolve`.
    pub fn resolve_with_hint(&self, ticker: &Ticker, hint: Option<&str>) -> Currency {
        match hint {
            Some(code) => Self::from_code_or_fallback(ticker, code),
            None => self.resolve(ticker),
        }
    }

    fn from_code_or_fallback(ticker: &Ticker, code: &str) -> Currency {
        Currency::from_code(code).unwrap_or_else(|| Self::fallback(ticker))
    }

    fn fallback(ticker: &Ticker) -> Currency {
        Currency::from_suffix(ticker).unwrap_or(Currency::USD)
    }
}
