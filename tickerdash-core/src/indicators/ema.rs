//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = alpha * close[t] + (1 - alpha) * EMA[t-1], with
//! alpha = 2 / (period + 1). Seed: EMA[period-1] = SMA of the first
//! `period` closes. A NaN in the seed window leaves the whole output NaN;
//! a NaN after seeding taints everything from that bar on.
//! Lookback: period - 1.

use super::Indicator;
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    name: String,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "EMA period must be >= 1");
        Self {
            period,
            name: format!("ema_{period}"),
        }
    }
}

impl Indicator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let n = bars.len();
        let mut result = vec![f64::NAN; n];
        if n < self.period {
            return result;
        }

        let alpha = 2.0 / (self.period as f64 + 1.0);

        let mut sum = 0.0;
        for bar in &bars[..self.period] {
            if bar.close.is_nan() {
                return result;
            }
            sum += bar.close;
        }
        let mut prev = sum / self.period as f64;
        result[self.period - 1] = prev;

        for i in self.period..n {
            let close = bars[i].close;
            if close.is_nan() {
                break;
            }
            prev = alpha * close + (1.0 - alpha) * prev;
            result[i] = prev;
        }

        result
    }
}

/// EMA over a pre-extracted series, tolerating a leading NaN prefix:
/// seeding starts at the first defined value. Composed indicators feed
/// this with inputs that begin with structural warmup NaNs (MACD signal
/// over the MACD line). Interior NaNs still taint everything after them.
pub fn ema_of_series(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    if period == 0 {
        return result;
    }

    let start = match values.iter().position(|v| !v.is_nan()) {
        Some(start) => start,
        None => return result,
    };
    if n - start < period {
        return result;
    }

    let alpha = 2.0 / (period as f64 + 1.0);

    let mut sum = 0.0;
    for &v in &values[start..start + period] {
        if v.is_nan() {
            return result;
        }
        sum += v;
    }
    let mut prev = sum / period as f64;
    result[start + period - 1] = prev;

    for i in (start + period)..n {
        if values[i].is_nan() {
            break;
        }
        prev = alpha * values[i] + (1.0 - alpha) * prev;
        result[i] = prev;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    #[test]
    fn ema_3_known_values() {
        // alpha = 0.5; seed at index 2: SMA(20, 22, 24) = 22
        // EMA[3] = 0.5*26 + 0.5*22 = 24
        // EMA[4] = 0.5*28 + 0.5*24 = 26
        let bars = make_bars(&[20.0, 22.0, 24.0, 26.0, 28.0]);
        let result = Ema::new(3).compute(&bars);

        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert_approx(result[2], 22.0, DEFAULT_EPSILON);
        assert_approx(result[3], 24.0, DEFAULT_EPSILON);
        assert_approx(result[4], 26.0, DEFAULT_EPSILON);
    }

    #[test]
    fn ema_period_1_tracks_close() {
        let bars = make_bars(&[5.0, 6.0, 7.0]);
        let result = Ema::new(1).compute(&bars);
        assert_approx(result[0], 5.0, DEFAULT_EPSILON);
        assert_approx(result[2], 7.0, DEFAULT_EPSILON);
    }

    #[test]
    fn nan_in_seed_window_blanks_everything() {
        let mut bars = make_bars(&[20.0, 22.0, 24.0, 26.0, 28.0]);
        bars[1].close = f64::NAN;
        let result = Ema::new(3).compute(&bars);
        assert!(result.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn nan_after_seed_taints_the_rest() {
        let mut bars = make_bars(&[20.0, 22.0, 24.0, 26.0, 28.0, 30.0]);
        bars[4].close = f64::NAN;
        let result = Ema::new(3).compute(&bars);
        assert_approx(result[2], 22.0, DEFAULT_EPSILON);
        assert_approx(result[3], 24.0, DEFAULT_EPSILON);
        assert!(result[4].is_nan());
        assert!(result[5].is_nan());
    }

    #[test]
    fn series_ema_skips_leading_nan_prefix() {
        let values = [f64::NAN, f64::NAN, 10.0, 12.0, 14.0, 16.0];
        let result = ema_of_series(&values, 3);

        // defined from start(2) + period(3) - 1 = 4
        assert!(result[..4].iter().all(|v| v.is_nan()));
        assert_approx(result[4], 12.0, DEFAULT_EPSILON);
        assert_approx(result[5], 14.0, DEFAULT_EPSILON);
    }

    #[test]
    fn series_ema_handles_degenerate_inputs() {
        assert!(ema_of_series(&[f64::NAN, f64::NAN], 2)
            .iter()
            .all(|v| v.is_nan()));
        assert!(ema_of_series(&[f64::NAN, 1.0], 2).iter().all(|v| v.is_nan()));
        assert!(ema_of_series(&[], 3).is_empty());
    }

    #[test]
    fn series_ema_matches_indicator_on_clean_input() {
        let bars = make_bars(&[10.0, 11.0, 12.0, 13.0, 14.0, 15.0]);
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let from_bars = Ema::new(3).compute(&bars);
        let from_series = ema_of_series(&closes, 3);
        for i in 0..bars.len() {
            if from_bars[i].is_nan() {
                assert!(from_series[i].is_nan());
            } else {
                assert_approx(from_bars[i], from_series[i], DEFAULT_EPSILON);
            }
        }
    }

    #[test]
    fn lookback_is_period_minus_one() {
        assert_eq!(Ema::new(20).lookback(), 19);
    }
}
