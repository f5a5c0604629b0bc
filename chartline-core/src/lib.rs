//! chartline-core
//!
//! Traits and pure algorithms shared across the chartline crates.
//!
//! - `types`: re-exported data model (candles, signals, markers, configs).
//! - `connector`: the `ChartConnector` trait and capability provider traits.
//! - `surface`: the `RenderSurface` collaborator a chart draws into.
//! - `timeseries`: candle validation, indicators and volume bars.
//! - `markers`: signal classification and marker normalization.
//! - `viewport`: visible-range math.
//!
//! Nothing in this crate performs I/O or spawns tasks; connectors are async
//! traits and everything else is a pure function over slices.
#![warn(missing_docs)]

/// Connector capability traits and the primary `ChartConnector` interface.
pub mod connector;
/// Signal classification and marker normalization.
pub mod markers;
/// Rendering-surface collaborator trait.
pub mod surface;
/// Time-series utilities for validation, indicators and volume.
pub mod timeseries;
pub mod types;
/// Visible-range helpers.
pub mod viewport;

pub use connector::{CandleProvider, CandleRequest, ChartConnector, SignalProvider, SignalRequest};
pub use markers::{classify, confidence_percent, marker_label, normalize_signal, normalize_signals};
pub use surface::RenderSurface;
pub use timeseries::indicators::{bollinger, ema};
pub use timeseries::validate::{validate_candle, validate_series};
pub use timeseries::volume::volume_bars;
pub use types::*;
pub use viewport::initial_visible_range;
