//! Chartline data model, configuration primitives and the shared error type.
#![warn(missing_docs)]

mod capability;
pub mod candle;
mod config;
mod error;
mod indicator;
mod interval;
mod reports;
mod signal;
mod status;
mod viewport;

pub use candle::{Candle, RawCandle, VolumeBar};
pub use capability::Capability;
pub use config::{
    ChartConfig, ChartPalette, IndicatorConfig, MarkerConfig, PipelineConfig, RetryConfig,
    ViewportConfig,
};
pub use error::ChartError;
pub use indicator::{BandPoint, BandSeries, LinePoint, OverlayKind};
pub use interval::{Interval, Selection, Timeframe};
pub use reports::{AcquisitionReport, AttemptOutcome, IntervalAttempt};
pub use signal::{Marker, MarkerPosition, MarkerShape, RawSignal, SignalMode, SignalSide};
pub use status::ChartStatus;
pub use viewport::{FullscreenMode, ViewportMode, VisibleRange};
