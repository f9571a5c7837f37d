//! Signal readings derived from summary metrics and indicator columns.
//!
//! Each reading is a coarse classification for the analysis panel, not a
//! trading recommendation. Readings that depend on indicator history are
//! None while the relevant column is missing or still warming up.

use crate::domain::QuoteSeries;
use crate::indicators::{col, EnrichedSeries};
use crate::metrics::SummaryMetrics;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const RSI_OVERBOUGHT: f64 = 70.0;
pub const RSI_OVERSOLD: f64 = 30.0;
pub const VOLUME_HIGH_RATIO: f64 = 1.5;
pub const VOLUME_LOW_RATIO: f64 = 0.5;

/// Direction of the window's close-to-close change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendSignal {
    Bullish,
    Bearish,
}

/// Where the latest RSI sits relative to the classic 70/30 bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RsiZone {
    Overbought,
    Oversold,
    Neutral,
}

/// Relative position of the 20-bar SMA against the 50-bar SMA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaCross {
    Bullish,
    Bearish,
}

/// Last bar's volume against the window average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolumeRegime {
    High,
    Low,
    Normal,
}

/// Latest RSI value with its zone classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RsiReading {
    pub value: f64,
    pub zone: RsiZone,
}

/// One reading per panel row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub trend: TrendSignal,
    pub rsi: Option<RsiReading>,
    pub ma_cross: Option<MaCross>,
    pub volume: VolumeRegime,
}

/// Derive the analysis panel readings for a non-empty series.
pub fn analyze(enriched: &EnrichedSeries, metrics: &SummaryMetrics) -> AnalysisSummary {
    let trend = if metrics.pct_change > 0.0 {
        TrendSignal::Bullish
    } else {
        TrendSignal::Bearish
    };

    let rsi = enriched
        .columns
        .last(col::RSI_14)
        .filter(|v| !v.is_nan())
        .map(|value| RsiReading {
            value,
            zone: classify_rsi(value),
        });

    let ma_cross = match (
        enriched.columns.last(col::SMA_20),
        enriched.columns.last(col::SMA_50),
    ) {
        (Some(short), Some(long)) if !short.is_nan() && !long.is_nan() => Some(if short > long {
            MaCross::Bullish
        } else {
            MaCross::Bearish
        }),
        _ => None,
    };

    AnalysisSummary {
        trend,
        rsi,
        ma_cross,
        volume: volume_regime(&enriched.series),
    }
}

fn classify_rsi(value: f64) -> RsiZone {
    if value > RSI_OVERBOUGHT {
        RsiZone::Overbought
    } else if value < RSI_OVERSOLD {
        RsiZone::Oversold
    } else {
        RsiZone::Neutral
    }
}

fn volume_regime(series: &QuoteSeries) -> VolumeRegime {
    let Some(last) = series.last_bar() else {
        return VolumeRegime::Normal;
    };
    let avg = series.bars.iter().map(|b| b.volume as f64).sum::<f64>() / series.len() as f64;
    let current = last.volume as f64;
    if current > avg * VOLUME_HIGH_RATIO {
        VolumeRegime::High
    } else if current < avg * VOLUME_LOW_RATIO {
        VolumeRegime::Low
    } else {
        VolumeRegime::Normal
    }
}

impl fmt::Display for TrendSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendSignal::Bullish => write!(f, "Bullish"),
            TrendSignal::Bearish => write!(f, "Bearish"),
        }
    }
}

impl fmt::Display for RsiZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RsiZone::Overbought => write!(f, "Overbought"),
            RsiZone::Oversold => write!(f, "Oversold"),
            RsiZone::Neutral => write!(f, "Neutral"),
        }
    }
}

impl fmt::Display for MaCross {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaCross::Bullish => write!(f, "Bullish"),
            MaCross::Bearish => write!(f, "Bearish"),
        }
    }
}

impl fmt::Display for VolumeRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VolumeRegime::High => write!(f, "High"),
            VolumeRegime::Low => write!(f, "Low"),
            VolumeRegime::Normal => write!(f, "Normal"),
        }
    }
}
