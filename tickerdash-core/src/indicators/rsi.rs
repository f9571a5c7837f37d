//! Relative Strength Index (RSI).
//!
//! Wilder smoothing of average gains and losses:
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss).
//! Seed averages use the first `period` close-to-close moves; after that,
//! avg = change/period + prev_avg * (period-1)/period.
//! Edge cases: no losses -> 100, no gains -> 0, no movement at all -> 50.
//! Lookback: period.

use super::Indicator;
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    name: String,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self {
            period,
            name: format!("rsi_{period}"),
        }
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let n = bars.len();
        let mut result = vec![f64::NAN; n];
        if n < self.period + 1 {
            return result;
        }

        // Seed: average gain and loss over the first `period` moves
        let mut avg_gain = 0.0;
        let mut avg_loss = 0.0;
        for i in 1..=self.period {
            let prev = bars[i - 1].close;
            let curr = bars[i].close;
            if prev.is_nan() || curr.is_nan() {
                return result;
            }
            let change = curr - prev;
            if change > 0.0 {
                avg_gain += change;
            } else {
                avg_loss -= change;
            }
        }
        avg_gain /= self.period as f64;
        avg_loss /= self.period as f64;
        result[self.period] = rsi_value(avg_gain, avg_loss);

        // Wilder smoothing
        let alpha = 1.0 / self.period as f64;
        for i in (self.period + 1)..n {
            let prev = bars[i - 1].close;
            let curr = bars[i].close;
            if prev.is_nan() || curr.is_nan() {
                break;
            }
            let change = curr - prev;
            let gain = change.max(0.0);
            let loss = (-change).max(0.0);
            avg_gain = alpha * gain + (1.0 - alpha) * avg_gain;
            avg_loss = alpha * loss + (1.0 - alpha) * avg_loss;
            result[i] = rsi_value(avg_gain, avg_loss);
        }

        result
    }
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 && avg_gain == 0.0 {
        50.0 // no movement
    } else if avg_loss == 0.0 {
        100.0
    } else if avg_gain == 0.0 {
        0.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    #[test]
    fn all_gains_pins_at_100() {
        let bars = make_bars(&[100.0, 101.0, 102.0, 103.0, 104.0, 105.0]);
        let result = Rsi::new(3).compute(&bars);
        assert_approx(result[3], 100.0, 1e-6);
        assert_approx(result[5], 100.0, 1e-6);
    }

    #[test]
    fn all_losses_pins_at_0() {
        let bars = make_bars(&[105.0, 104.0, 103.0, 102.0, 101.0, 100.0]);
        let result = Rsi::new(3).compute(&bars);
        assert_approx(result[3], 0.0, 1e-6);
    }

    #[test]
    fn flat_series_reads_50() {
        let bars = make_bars(&[5.0, 5.0, 5.0, 5.0, 5.0]);
        let result = Rsi::new(3).compute(&bars);
        assert_approx(result[3], 50.0, DEFAULT_EPSILON);
        assert_approx(result[4], 50.0, DEFAULT_EPSILON);
    }

    #[test]
    fn mixed_moves_known_value() {
        // changes: +1, -1, +2 -> avg_gain = 1.0, avg_loss = 1/3
        // RS = 3 -> RSI = 100 - 100/4 = 75
        // next change 0: avg_gain = 2/3, avg_loss = 2/9 -> RS = 3 -> 75 again
        let bars = make_bars(&[10.0, 11.0, 10.0, 12.0, 12.0]);
        let result = Rsi::new(3).compute(&bars);
        assert_approx(result[3], 75.0, DEFAULT_EPSILON);
        assert_approx(result[4], 75.0, DEFAULT_EPSILON);
    }

    #[test]
    fn stays_within_bounds() {
        let bars = make_bars(&[100.0, 105.0, 98.0, 110.0, 95.0, 115.0, 90.0, 120.0]);
        let result = Rsi::new(3).compute(&bars);
        for (i, &v) in result.iter().enumerate() {
            if !v.is_nan() {
                assert!(
                    (0.0..=100.0).contains(&v),
                    "RSI out of bounds at bar {i}: {v}"
                );
            }
        }
    }

    #[test]
    fn nan_in_seed_blanks_everything() {
        let mut bars = make_bars(&[100.0, 101.0, 102.0, 103.0, 104.0]);
        bars[2].close = f64::NAN;
        let result = Rsi::new(3).compute(&bars);
        assert!(result.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn nan_after_seed_taints_the_rest() {
        let mut bars = make_bars(&[100.0, 101.0, 102.0, 103.0, 104.0, 105.0]);
        bars[4].close = f64::NAN;
        let result = Rsi::new(3).compute(&bars);
        assert!(!result[3].is_nan());
        assert!(result[4].is_nan());
        assert!(result[5].is_nan());
    }

    #[test]
    fn lookback_is_period() {
        assert_eq!(Rsi::new(14).lookback(), 14);
    }
}
