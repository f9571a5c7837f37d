//! Moving Average Convergence Divergence (MACD).
//!
//! Line: EMA(close, fast) - EMA(close, slow).
//! Signal: EMA(line, smoothing), seeded on the line's defined suffix.
//! Histogram: line - signal.
//! With the standard (12, 26, 9) the line is defined from index 25 and the
//! signal and histogram from index 33.
//!
//! Three outputs (separate Indicator instances): "macd", "macd_signal",
//! "macd_hist".

use super::ema::ema_of_series;
use super::Indicator;
use crate::domain::Bar;

/// Which MACD output to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacdOutput {
    Line,
    Signal,
    Histogram,
}

#[derive(Debug, Clone)]
pub struct Macd {
    fast: usize,
    slow: usize,
    smoothing: usize,
    output: MacdOutput,
    name: &'static str,
}

impl Macd {
    pub fn line(fast: usize, slow: usize, smoothing: usize) -> Self {
        Self::with_output(fast, slow, smoothing, MacdOutput::Line, "macd")
    }

    pub fn signal(fast: usize, slow: usize, smoothing: usize) -> Self {
        Self::with_output(fast, slow, smoothing, MacdOutput::Signal, "macd_signal")
    }

    pub fn histogram(fast: usize, slow: usize, smoothing: usize) -> Self {
        Self::with_output(fast, slow, smoothing, MacdOutput::Histogram, "macd_hist")
    }

    fn with_output(
        fast: usize,
        slow: usize,
        smoothing: usize,
        output: MacdOutput,
        name: &'static str,
    ) -> Self {
        assert!(fast >= 1, "MACD fast period must be >= 1");
        assert!(slow > fast, "MACD slow period must exceed fast");
        assert!(smoothing >= 1, "MACD smoothing period must be >= 1");
        Self {
            fast,
            slow,
            smoothing,
            output,
            name,
        }
    }

    fn line_values(&self, closes: &[f64]) -> Vec<f64> {
        let fast = ema_of_series(closes, self.fast);
        let slow = ema_of_series(closes, self.slow);
        fast.iter().zip(slow.iter()).map(|(f, s)| f - s).collect()
    }
}

impl Indicator for Macd {
    fn name(&self) -> &str {
        self.name
    }

    fn lookback(&self) -> usize {
        match self.output {
            MacdOutput::Line => self.slow - 1,
            MacdOutput::Signal | MacdOutput::Histogram => self.slow + self.smoothing - 2,
        }
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let line = self.line_values(&closes);
        match self.output {
            MacdOutput::Line => line,
            MacdOutput::Signal => ema_of_series(&line, self.smoothing),
            MacdOutput::Histogram => {
                let signal = ema_of_series(&line, self.smoothing);
                line.iter().zip(signal.iter()).map(|(l, s)| l - s).collect()
            }
        }
    }
}
