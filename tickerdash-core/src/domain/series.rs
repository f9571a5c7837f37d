//! QuoteSeries — an ordered run of bars for one ticker.

use crate::domain::{Bar, Ticker};
use serde::{Deserialize, Serialize};

/// Bars for a single ticker, ordered by ascending timestamp.
///
/// An empty series is the normal "no data" shape, not an error. Fetch
/// failures, delisted symbols, and market holidays all surface here as
/// zero bars.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteSeries {
    pub ticker: Ticker,
    pub bars: Vec<Bar>,
}

impl QuoteSeries {
    pub fn new(ticker: Ticker, bars: Vec<Bar>) -> Self {
        Self { ticker, bars }
    }

    pub fn empty(ticker: Ticker) -> Self {
        Self { ticker, bars: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn first_bar(&self) -> Option<&Bar> {
        self.bars.first()
    }

    pub fn last_bar(&self) -> Option<&Bar> {
        self.bars.last()
    }
}
