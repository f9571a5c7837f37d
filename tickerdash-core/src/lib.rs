//! TickerDash Core — engine, domain types, market data, indicator pipeline.
//!
//! This crate contains everything the dashboard front ends build on:
//! - Domain types (bars, tickers, periods, currencies, quote series)
//! - Market data providers with a TTL quote cache and degrade-to-empty fetching
//! - Technical indicator pipeline (SMA, EMA, RSI, MACD, Bollinger Bands)
//! - Summary metrics and threshold-based signal analysis
//! - Watchlist groups with quick quotes
//! - TOML configuration and CSV export
//! - Dashboard service composing all of the above per refresh

pub mod analysis;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod domain;
pub mod export;
pub mod indicators;
pub mod metrics;
pub mod watchlist;
