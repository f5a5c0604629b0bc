//! Deterministic fixture data.
//!
//! - `candles`: per-(symbol, interval) OHLCV payloads
//! - `signals`: scored signals aligned with the candle fixtures
/// Candle payloads keyed by symbol and interval.
pub mod candles;
/// Signal payloads keyed by symbol and endpoint.
pub mod signals;
