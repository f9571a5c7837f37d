//! Summary metrics — pure functions that compute headline statistics.
//!
//! Series in, scalars out. No dependency on the fetch layer or the
//! indicator pipeline.

use crate::domain::QuoteSeries;
use serde::{Deserialize, Serialize};

/// Headline numbers for one series over its whole window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub last_close: f64,
    /// Last close minus first close.
    pub change: f64,
    /// Change as a percentage of the first close; 0 when the first close is 0.
    pub pct_change: f64,
    /// Highest high, ignoring NaN bars. NaN when no bar has a defined high.
    pub high: f64,
    /// Lowest low, ignoring NaN bars.
    pub low: f64,
    /// Total volume across the window.
    pub volume: u64,
}

/// Compute summary metrics for a series. None for an empty series.
pub fn summarize(series: &QuoteSeries) -> Option<SummaryMetrics> {
    let first = series.first_bar()?;
    let last = series.last_bar()?;

    let last_close = last.close;
    let change = last_close - first.close;
    let pct_change = if first.close == 0.0 {
        0.0
    } else {
        change / first.close * 100.0
    };

    let mut high = f64::NAN;
    let mut low = f64::NAN;
    for bar in &series.bars {
        if !bar.high.is_nan() && (high.is_nan() || bar.high > high) {
            high = bar.high;
        }
        if !bar.low.is_nan() && (low.is_nan() || bar.low < low) {
            low = bar.low;
        }
    }

    let volume = series.bars.iter().map(|b| b.volume).sum();

    Some(SummaryMetrics {
        last_close,
        change,
        pct_change,
        high,
        low,
        volume,
    })
}
