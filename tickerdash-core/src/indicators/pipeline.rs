//! Indicator enrichment pipeline.
//!
//! One entry point, `add_indicators`, runs the dashboard's fixed roster
//! over a series and returns the bars with named columns attached. The
//! roster never mutates prices; it only adds aligned columns.

use super::{Bollinger, Ema, Indicator, Macd, Rsi, Sma};
use crate::domain::QuoteSeries;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Series shorter than this get no indicator columns at all.
pub const MIN_BARS_FOR_INDICATORS: usize = 20;

/// Column names produced by the standard roster.
pub mod col {
    pub const SMA_20: &str = "sma_20";
    pub const SMA_50: &str = "sma_50";
    pub const EMA_20: &str = "ema_20";
    pub const RSI_14: &str = "rsi_14";
    pub const MACD: &str = "macd";
    pub const MACD_SIGNAL: &str = "macd_signal";
    pub const MACD_HIST: &str = "macd_hist";
    pub const BB_UPPER: &str = "bb_upper";
    pub const BB_MIDDLE: &str = "bb_middle";
    pub const BB_LOWER: &str = "bb_lower";

    pub const ALL: [&str; 10] = [
        SMA_20,
        SMA_50,
        EMA_20,
        RSI_14,
        MACD,
        MACD_SIGNAL,
        MACD_HIST,
        BB_UPPER,
        BB_MIDDLE,
        BB_LOWER,
    ];
}

/// Named indicator columns, each aligned index-for-index with the bars.
///
/// Backed by a BTreeMap so iteration order (and therefore CSV export
/// order) is stable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndicatorColumns {
    columns: BTreeMap<String, Vec<f64>>,
}

impl IndicatorColumns {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, values: Vec<f64>) {
        self.columns.insert(name.into(), values);
    }

    /// Full series for a named column.
    pub fn get(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(|v| v.as_slice())
    }

    /// Column value at a bar index.
    pub fn value_at(&self, name: &str, index: usize) -> Option<f64> {
        self.columns.get(name).and_then(|v| v.get(index).copied())
    }

    /// Final value of a column. May be NaN while the indicator is warming up.
    pub fn last(&self, name: &str) -> Option<f64> {
        self.columns.get(name).and_then(|v| v.last().copied())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// A quote series with its indicator columns attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedSeries {
    pub series: QuoteSeries,
    pub columns: IndicatorColumns,
}

impl EnrichedSeries {
    pub fn bar_count(&self) -> usize {
        self.series.len()
    }

    /// False when the series was too short for the roster.
    pub fn has_indicators(&self) -> bool {
        !self.columns.is_empty()
    }
}

/// The dashboard's standard roster: trend, momentum, and volatility columns.
fn roster() -> Vec<Box<dyn Indicator>> {
    vec![
        Box::new(Sma::new(20)),
        Box::new(Sma::new(50)),
        Box::new(Ema::new(20)),
        Box::new(Rsi::new(14)),
        Box::new(Macd::line(12, 26, 9)),
        Box::new(Macd::signal(12, 26, 9)),
        Box::new(Macd::histogram(12, 26, 9)),
        Box::new(Bollinger::upper(20, 2.0)),
        Box::new(Bollinger::middle(20, 2.0)),
        Box::new(Bollinger::lower(20, 2.0)),
    ]
}

/// Attach the standard indicator columns to a series.
///
/// A series shorter than `MIN_BARS_FOR_INDICATORS` comes back with no
/// columns at all. Indicators needing more history than the series has
/// (sma_50 over 30 bars) still produce their column, all NaN.
pub fn add_indicators(series: QuoteSeries) -> EnrichedSeries {
    if series.len() < MIN_BARS_FOR_INDICATORS {
        return EnrichedSeries {
            series,
            columns: IndicatorColumns::new(),
        };
    }

    let mut columns = IndicatorColumns::new();
    for indicator in roster() {
        let values = indicator.compute(&series.bars);
        debug_assert_eq!(
            values.len(),
            series.len(),
            "indicator {} returned wrong length",
            indicator.name()
        );
        columns.insert(indicator.name(), values);
    }

    EnrichedSeries { series, columns }
}
