use async_trait::async_trait;

use chartline_types::{Capability, ChartError, Interval, MarkerConfig, RawCandle, RawSignal, SignalMode};

/// Parameters for one candle fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandleRequest {
    /// Sampling interval.
    pub interval: Interval,
    /// Include pre/post-market candles.
    pub include_pre_post: bool,
}

/// Parameters for one signal fetch; the variant selects the endpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SignalRequest {
    /// Confluence-scored signals.
    Enhanced {
        /// Interval the candles were rendered at.
        interval: Interval,
        /// Minimum confluence score the backend should return.
        min_confluence: f64,
    },
    /// Moving-average crossover history.
    Historical {
        /// Interval the candles were rendered at.
        interval: Interval,
        /// Fast moving-average period.
        short_period: u32,
        /// Slow moving-average period.
        long_period: u32,
    },
}

impl SignalRequest {
    /// Build the request for `mode` against the interval the chart rendered.
    #[must_use]
    pub const fn for_mode(mode: SignalMode, interval: Interval, cfg: &MarkerConfig) -> Self {
        match mode {
            SignalMode::Enhanced => Self::Enhanced {
                interval,
                min_confluence: cfg.min_confluence,
            },
            SignalMode::Basic => Self::Historical {
                interval,
                short_period: cfg.short_period,
                long_period: cfg.long_period,
            },
        }
    }

    /// Interval the signals are requested for.
    #[must_use]
    pub const fn interval(&self) -> Interval {
        match *self {
            Self::Enhanced { interval, .. } | Self::Historical { interval, .. } => interval,
        }
    }

    /// Capability label for logs and errors.
    #[must_use]
    pub const fn capability(&self) -> Capability {
        match self {
            Self::Enhanced { .. } => Capability::EnhancedSignals,
            Self::Historical { .. } => Capability::HistoricalSignals,
        }
    }
}

/// Focused role trait for connectors that serve OHLCV candles.
#[async_trait]
pub trait CandleProvider: Send + Sync {
    /// Fetch raw candles for `symbol` at one interval.
    ///
    /// Points are returned unvalidated; a non-success upstream response is an
    /// `Err`.
    async fn candles(&self, symbol: &str, req: CandleRequest) -> Result<Vec<RawCandle>, ChartError>;
}

/// Focused role trait for connectors that serve scored trading signals.
#[async_trait]
pub trait SignalProvider: Send + Sync {
    /// Fetch raw signals for `symbol`, already unwrapped from whatever
    /// envelope the endpoint uses.
    async fn signals(&self, symbol: &str, req: SignalRequest) -> Result<Vec<RawSignal>, ChartError>;
}

/// Main connector trait: advertises which roles a backend implements.
pub trait ChartConnector: Send + Sync {
    /// A stable identifier used in logs and error tagging.
    fn name(&self) -> &'static str;

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Advertise candle capability by returning a usable trait object reference when supported.
    fn as_candle_provider(&self) -> Option<&dyn CandleProvider> {
        None
    }

    /// Advertise signal capability by returning a usable trait object reference when supported.
    fn as_signal_provider(&self) -> Option<&dyn SignalProvider> {
        None
    }
}
