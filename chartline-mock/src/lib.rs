//! Test doubles for chartline: a fixture connector, a scriptable connector
//! and a render surface that records every call.
#![warn(missing_docs)]

use std::time::Duration;

use async_trait::async_trait;
use chartline_core::{
    CandleProvider, CandleRequest, ChartConnector, ChartError, RawCandle, RawSignal,
    SignalProvider, SignalRequest,
};

mod dynamic;
/// Deterministic fixture payloads shared by the mock connectors and tests.
pub mod fixtures;
mod surface;

pub use dynamic::{DynamicMockConnector, DynamicMockController, MockBehavior};
pub use surface::{RecordingSurface, SurfaceCall};

/// Mock connector for CI-safe examples. Provides deterministic data from static fixtures.
///
/// Special symbols:
/// - `FAIL`: every call fails with a connector error.
/// - `TIMEOUT`: every call stalls for an hour so the caller's timeout fires.
/// - unknown symbols answer HTTP 404.
pub struct MockConnector;

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    /// Create the fixture connector.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    async fn maybe_fail_or_timeout(symbol: &str, capability: &'static str) -> Result<(), ChartError> {
        match symbol {
            "FAIL" => Err(ChartError::connector(
                "chartline-mock",
                format!("forced failure: {capability}"),
            )),
            "TIMEOUT" => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

impl ChartConnector for MockConnector {
    fn name(&self) -> &'static str {
        "chartline-mock"
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn as_candle_provider(&self) -> Option<&dyn CandleProvider> {
        Some(self as &dyn CandleProvider)
    }

    fn as_signal_provider(&self) -> Option<&dyn SignalProvider> {
        Some(self as &dyn SignalProvider)
    }
}

#[async_trait]
impl CandleProvider for MockConnector {
    async fn candles(&self, symbol: &str, req: CandleRequest) -> Result<Vec<RawCandle>, ChartError> {
        Self::maybe_fail_or_timeout(symbol, "candles").await?;
        fixtures::candles::by_symbol(symbol, req.interval).ok_or_else(|| {
            ChartError::http_status(format!("/api/stocks/{symbol}?interval={}", req.interval), 404)
        })
    }
}

#[async_trait]
impl SignalProvider for MockConnector {
    async fn signals(&self, symbol: &str, req: SignalRequest) -> Result<Vec<RawSignal>, ChartError> {
        Self::maybe_fail_or_timeout(symbol, req.capability().as_str()).await?;
        Ok(match req {
            SignalRequest::Enhanced { interval, .. } => fixtures::signals::enhanced(symbol, interval),
            SignalRequest::Historical { interval, .. } => {
                fixtures::signals::historical(symbol, interval)
            }
        })
    }
}
