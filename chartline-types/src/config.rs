//! Configuration types shared by the orchestrator and connectors.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::interval::{Interval, Timeframe};
use crate::signal::SignalMode;

/// Settings for the interval-fallback acquisition pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Explicit candidate intervals in priority order. When `None`, the
    /// selection's timeframe supplies its default list.
    pub intervals: Option<Vec<Interval>>,
    /// The first interval whose valid point count *exceeds* this wins.
    pub min_valid_points: usize,
    /// Ask the backend for pre/post-market candles.
    pub include_pre_post: bool,
    /// Upper bound for each individual interval fetch.
    pub request_timeout: Duration,
}

impl PipelineConfig {
    /// Candidate intervals for a timeframe, honoring an explicit override.
    #[must_use]
    pub fn intervals_for(&self, timeframe: Timeframe) -> Vec<Interval> {
        self.intervals
            .clone()
            .unwrap_or_else(|| timeframe.candidate_intervals().to_vec())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            intervals: None,
            min_valid_points: 10,
            include_pre_post: true,
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// Overlay toggles and parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorConfig {
    /// Draw the EMA line.
    pub ema_enabled: bool,
    /// EMA period.
    pub ema_period: usize,
    /// Draw the Bollinger bands.
    pub bollinger_enabled: bool,
    /// Bollinger window length.
    pub bollinger_period: usize,
    /// Standard-deviation multiplier.
    pub bollinger_mult: f64,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            ema_enabled: true,
            ema_period: 20,
            bollinger_enabled: false,
            bollinger_period: 20,
            bollinger_mult: 2.0,
        }
    }
}

/// Fixed-interval retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts, including the first.
    pub attempts: u32,
    /// Delay between attempts.
    pub delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            attempts: 5,
            delay: Duration::from_millis(500),
        }
    }
}

/// Settings for the marker processor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerConfig {
    /// Fetch and draw markers at all.
    pub enabled: bool,
    /// Which signal endpoint to call.
    pub mode: SignalMode,
    /// `minConfluence` passed to the enhanced endpoint.
    pub min_confluence: f64,
    /// `shortPeriod` passed to the historical endpoint.
    pub short_period: u32,
    /// `longPeriod` passed to the historical endpoint.
    pub long_period: u32,
    /// Retry policy while the surface is not ready.
    pub retry: RetryConfig,
    /// Upper bound for the signal fetch.
    pub request_timeout: Duration,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            mode: SignalMode::Enhanced,
            min_confluence: 0.6,
            short_period: 9,
            long_period: 21,
            retry: RetryConfig::default(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// Viewport sizing and fullscreen settle timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportConfig {
    /// Number of most recent candles shown after a render.
    pub initial_visible: usize,
    /// Delay before resizing after a fullscreen or window change.
    pub resize_settle: Duration,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            initial_visible: 100,
            resize_settle: Duration::from_millis(120),
        }
    }
}

/// Colors handed to the rendering surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPalette {
    /// Volume bar color when `close >= open`.
    pub up: String,
    /// Volume bar color otherwise.
    pub down: String,
    /// BUY marker color.
    pub buy: String,
    /// SELL marker color.
    pub sell: String,
}

impl Default for ChartPalette {
    fn default() -> Self {
        Self {
            up: "#26a69a".to_string(),
            down: "#ef5350".to_string(),
            buy: "#22c55e".to_string(),
            sell: "#ef4444".to_string(),
        }
    }
}

/// Global configuration for one mounted chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Acquisition pipeline settings.
    pub pipeline: PipelineConfig,
    /// Overlay settings.
    pub indicators: IndicatorConfig,
    /// Marker settings.
    pub markers: MarkerConfig,
    /// Viewport settings.
    pub viewport: ViewportConfig,
    /// Colors.
    pub palette: ChartPalette,
    /// Delay between session start and the first fetch, so the surface can
    /// finish initializing.
    pub initial_fetch_delay: Duration,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            pipeline: PipelineConfig::default(),
            indicators: IndicatorConfig::default(),
            markers: MarkerConfig::default(),
            viewport: ViewportConfig::default(),
            palette: ChartPalette::default(),
            initial_fetch_delay: Duration::from_millis(50),
        }
    }
}
