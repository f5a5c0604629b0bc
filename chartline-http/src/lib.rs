//! chartline-http
//!
//! Connector that implements `ChartConnector` against the chart backend's
//! HTTP API:
//!
//! - `GET /api/stocks/{symbol}?interval=&includePrePost=` for candles
//! - `GET /api/enhanced-signals/{symbol}?interval=&minConfluence=`
//! - `GET /api/signals/historical/{symbol}?shortPeriod=&longPeriod=&interval=`
//!
//! Signal responses may be a bare array, `{ "value": [...] }` or
//! `{ "signals": [...] }`; all three decode to the same list.
#![warn(missing_docs)]

/// Transport trait and the production `reqwest` adapter.
pub mod adapter;
mod builder;
mod wire;

use std::sync::Arc;

use async_trait::async_trait;
use chartline_core::{
    CandleProvider, CandleRequest, Capability, ChartConnector, ChartError, RawCandle, RawSignal,
    SignalProvider, SignalRequest,
};

use adapter::ChartApi;
pub use builder::HttpConnectorBuilder;

pub(crate) const CONNECTOR_NAME: &str = "chartline-http";

/// Public connector type.
pub struct HttpConnector {
    api: Arc<dyn ChartApi>,
}

impl HttpConnector {
    /// Connector with default settings against `base_url`.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the URL is invalid.
    pub fn new(base_url: &str) -> Result<Self, ChartError> {
        Self::builder(base_url).build()
    }

    /// Start configuring a connector for `base_url`.
    #[must_use]
    pub fn builder(base_url: impl Into<String>) -> HttpConnectorBuilder {
        HttpConnectorBuilder::new(base_url)
    }

    /// For tests/injection: wrap any transport.
    #[must_use]
    pub fn from_adapter(api: Arc<dyn ChartApi>) -> Self {
        Self { api }
    }

    fn normalize_error(e: ChartError) -> ChartError {
        match e {
            ChartError::Other(msg) => ChartError::connector(CONNECTOR_NAME, msg),
            other => other,
        }
    }
}

impl ChartConnector for HttpConnector {
    fn name(&self) -> &'static str {
        CONNECTOR_NAME
    }

    fn vendor(&self) -> &'static str {
        "HTTP"
    }

    fn as_candle_provider(&self) -> Option<&dyn CandleProvider> {
        Some(self as &dyn CandleProvider)
    }

    fn as_signal_provider(&self) -> Option<&dyn SignalProvider> {
        Some(self as &dyn SignalProvider)
    }
}

#[async_trait]
impl CandleProvider for HttpConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "chartline_http::candles",
            skip(self, req),
            fields(interval = %req.interval),
        )
    )]
    async fn candles(&self, symbol: &str, req: CandleRequest) -> Result<Vec<RawCandle>, ChartError> {
        let query = [
            ("interval", req.interval.as_str().to_string()),
            ("includePrePost", req.include_pre_post.to_string()),
        ];
        let body = self
            .api
            .get_json(Capability::Candles, &["api", "stocks", symbol], &query)
            .await
            .map_err(Self::normalize_error)?;
        let rows = wire::decode_candles(&body)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(rows = rows.len(), "decoded candles");
        Ok(rows)
    }
}

#[async_trait]
impl SignalProvider for HttpConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "chartline_http::signals",
            skip(self, req),
            fields(capability = %req.capability(), interval = %req.interval()),
        )
    )]
    async fn signals(&self, symbol: &str, req: SignalRequest) -> Result<Vec<RawSignal>, ChartError> {
        let (segments, query): (Vec<&str>, Vec<(&'static str, String)>) = match req {
            SignalRequest::Enhanced {
                interval,
                min_confluence,
            } => (
                vec!["api", "enhanced-signals", symbol],
                vec![
                    ("interval", interval.as_str().to_string()),
                    ("minConfluence", min_confluence.to_string()),
                ],
            ),
            SignalRequest::Historical {
                interval,
                short_period,
                long_period,
            } => (
                vec!["api", "signals", "historical", symbol],
                vec![
                    ("shortPeriod", short_period.to_string()),
                    ("longPeriod", long_period.to_string()),
                    ("interval", interval.as_str().to_string()),
                ],
            ),
        };
        let body = self
            .api
            .get_json(req.capability(), &segments, &query)
            .await
            .map_err(Self::normalize_error)?;
        let signals = wire::decode_signals(body)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(signals = signals.len(), "decoded signals");
        Ok(signals)
    }
}
