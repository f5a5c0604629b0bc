//! Re-export of the foundational types from `chartline-types`.
// Consolidated re-exports so downstream crates can depend on `chartline-core` only

pub use chartline_types::candle::{lenient_f64, number_like};
pub use chartline_types::{
    AcquisitionReport, AttemptOutcome, BandPoint, BandSeries, Candle, Capability, ChartConfig,
    ChartError, ChartPalette, ChartStatus, FullscreenMode, IndicatorConfig, Interval,
    IntervalAttempt, LinePoint, Marker, MarkerConfig, MarkerPosition, MarkerShape, OverlayKind,
    PipelineConfig, RawCandle, RawSignal, RetryConfig, Selection, SignalMode, SignalSide,
    Timeframe, ViewportConfig, ViewportMode, VisibleRange, VolumeBar,
};
