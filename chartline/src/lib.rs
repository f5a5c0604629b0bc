//! Chartline turns a symbol selection into a rendered, annotated candlestick chart.
//!
//! Overview
//! - Acquires a valid OHLCV series by trying candidate intervals in order and
//!   accepting the first one whose valid point count exceeds a threshold.
//! - Computes EMA and Bollinger overlays and direction-colored volume bars.
//! - Fetches scored signals for the *same* interval that was rendered and
//!   normalizes them into markers anchored to existing candles.
//! - Drives the viewport: initial visible window, native/overlay fullscreen
//!   and debounced resizes.
//! - Exposes one observable `ChartStatus`; no error escapes the chart.
//!
//! Key behaviors and trade-offs
//! - Sessions: every selection change bumps a generation token. Work from an
//!   older generation is discarded when it completes instead of being
//!   cancelled, so an in-flight request may still finish on the network.
//! - Fallback: first acceptable interval wins, not the densest one; later
//!   intervals are never fetched once one is accepted.
//! - Markers: treated as an enhancement. Fetch failures or an uninitialized
//!   surface after bounded retries result in no markers, never an error status.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use chartline::{Chart, Selection, Timeframe};
//!
//! let chart = Chart::builder()
//!     .with_connector(connector)
//!     .with_surface(surface)
//!     .min_valid_points(10)
//!     .build()?;
//!
//! chart.select(Selection::new("AAPL", Timeframe::D1)?);
//! assert!(chart.settled().await.is_terminal());
//! let snap = chart.snapshot();
//! println!("{} candles at {:?}", snap.candles.len(), snap.active_interval);
//! ```
//!
//! See `chartline/examples/` for a runnable end-to-end demonstration.
#![warn(missing_docs)]

pub(crate) mod controller;
pub(crate) mod core;
mod machine;
mod pipeline;
mod session;

pub use core::{Chart, ChartBuilder};
pub use pipeline::{Acquisition, acquire};
pub use session::ChartSnapshot;

// Re-export core types for convenience
pub use chartline_core::{
    AcquisitionReport, AttemptOutcome, BandPoint, Candle, CandleProvider, CandleRequest,
    Capability, ChartConfig, ChartConnector, ChartError, ChartPalette, ChartStatus,
    FullscreenMode, IndicatorConfig, Interval, IntervalAttempt, LinePoint, Marker, MarkerConfig,
    MarkerPosition, MarkerShape, OverlayKind, PipelineConfig, RawCandle, RawSignal,
    RenderSurface, RetryConfig, Selection, SignalMode, SignalProvider, SignalRequest, SignalSide,
    Timeframe, ViewportConfig, ViewportMode, VisibleRange, VolumeBar,
};
