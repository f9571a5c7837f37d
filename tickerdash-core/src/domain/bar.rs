//! Bar — the fundamental market data unit.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// OHLCV bar for a single ticker over a single interval.
///
/// Timestamps carry the US/Eastern offset in effect at that instant, so a
/// series that straddles a DST transition keeps both offsets. Price fields
/// may be NaN when the provider reported a partial bar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: DateTime<FixedOffset>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl Bar {
    /// Returns true if any price field is NaN (partial bar).
    pub fn is_void(&self) -> bool {
        self.open.is_nan() || self.high.is_nan() || self.low.is_nan() || self.close.is_nan()
    }

    /// Basic OHLC sanity check: high >= low, high >= open, high >= close, etc.
    pub fn is_sane(&self) -> bool {
        if self.is_void() {
            return false;
        }
        self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
            && self.open > 0.0
            && self.close > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_bar() -> Bar {
        Bar {
            timestamp: DateTime::parse_from_rfc3339("2024-01-02T09:30:00-05:00").unwrap(),
            open: 100.0,
            high: 105.0,
            low: 98.0,
            close: 103.0,
            volume: 50_000,
        }
    }

    #[test]
    fn bar_is_sane() {
        assert!(sample_bar().is_sane());
    }

    #[test]
    fn bar_detects_void() {
        let mut bar = sample_bar();
        bar.close = f64::NAN;
        assert!(bar.is_void());
        assert!(!bar.is_sane());
    }

    #[test]
    fn bar_detects_insane_high_low() {
        let mut bar = sample_bar();
        bar.high = 97.0; // below low
        assert!(!bar.is_sane());
    }

    #[test]
    fn bar_serialization_roundtrip() {
        let bar = sample_bar();
        let json = serde_json::to_string(&bar).unwrap();
        let deser: Bar = serde_json::from_str(&json).unwrap();
        assert_eq!(bar.timestamp, deser.timestamp);
        assert_eq!(bar.close, deser.close);
        assert_eq!(bar.volume, deser.volume);
    }

    #[test]
    fn offset_survives_roundtrip() {
        let summer = Bar {
            timestamp: DateTime::parse_from_rfc3339("2024-07-01T09:30:00-04:00").unwrap(),
            ..sample_bar()
        };
        let json = serde_json::to_string(&summer).unwrap();
        let deser: Bar = serde_json::from_str(&json).unwrap();
        assert_eq!(deser.timestamp.offset().local_minus_utc(), -4 * 3600);
    }
}
