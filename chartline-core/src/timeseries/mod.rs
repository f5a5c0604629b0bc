//! Time-series utilities shared by connectors and the orchestrator.
//!
//! Modules include:
//! - `validate`: drop malformed points, sort and de-duplicate by time
//! - `indicators`: EMA and Bollinger overlays over a validated series
//! - `volume`: volume histogram bars colored by candle direction
/// Pure indicator functions over validated candles.
pub mod indicators;
/// Candle validation and series normalization.
pub mod validate;
/// Volume histogram derivation.
pub mod volume;
