use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use chartline_core::{
    CandleProvider, CandleRequest, ChartConnector, ChartError, Interval, RawCandle, RawSignal,
    SignalProvider, SignalRequest,
};

/// Instruction for how a method should behave for a given input.
#[derive(Clone, Debug)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Return the provided value after a delay (simulate a slow backend).
    Delayed(Duration, T),
    /// Fail immediately with the provided error.
    Fail(ChartError),
    /// Hang indefinitely (simulate a timeout).
    Hang,
}

impl<T> MockBehavior<T> {
    async fn run(self) -> Result<T, ChartError> {
        match self {
            Self::Return(v) => Ok(v),
            Self::Delayed(delay, v) => {
                tokio::time::sleep(delay).await;
                Ok(v)
            }
            Self::Fail(e) => Err(e),
            Self::Hang => {
                std::future::pending::<()>().await;
                unreachable!()
            }
        }
    }
}

#[derive(Default)]
struct InternalState {
    candle_rules: HashMap<(String, Interval), MockBehavior<Vec<RawCandle>>>,
    signal_rules: HashMap<String, MockBehavior<Vec<RawSignal>>>,
    candle_requests: Vec<(String, CandleRequest)>,
    signal_requests: Vec<(String, SignalRequest)>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for `candles` calls for one symbol and interval.
    pub async fn set_candle_behavior(
        &self,
        symbol: &str,
        interval: Interval,
        behavior: MockBehavior<Vec<RawCandle>>,
    ) {
        let mut guard = self.state.lock().await;
        guard
            .candle_rules
            .insert((symbol.to_string(), interval), behavior);
    }

    /// Set the behavior for `signals` calls for one symbol (any endpoint).
    pub async fn set_signal_behavior(&self, symbol: &str, behavior: MockBehavior<Vec<RawSignal>>) {
        let mut guard = self.state.lock().await;
        guard.signal_rules.insert(symbol.to_string(), behavior);
    }

    /// Return a copy of the candle request log, in call order.
    pub async fn candle_requests(&self) -> Vec<(String, CandleRequest)> {
        self.state.lock().await.candle_requests.clone()
    }

    /// Return a copy of the signal request log, in call order.
    pub async fn signal_requests(&self) -> Vec<(String, SignalRequest)> {
        self.state.lock().await.signal_requests.clone()
    }

    /// Clear all configured behaviors and request logs.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.candle_rules.clear();
        guard.signal_rules.clear();
        guard.candle_requests.clear();
        guard.signal_requests.clear();
    }
}

/// A connector that defers all behavior to an external controller.
///
/// Unconfigured (symbol, interval) pairs answer HTTP 404.
pub struct DynamicMockConnector {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockConnector {
    /// Create a new dynamic mock connector and its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
    ) -> (Arc<dyn ChartConnector>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        (me as Arc<dyn ChartConnector>, controller)
    }
}

impl ChartConnector for DynamicMockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "DynamicMock"
    }

    fn as_candle_provider(&self) -> Option<&dyn CandleProvider> {
        Some(self as &dyn CandleProvider)
    }

    fn as_signal_provider(&self) -> Option<&dyn SignalProvider> {
        Some(self as &dyn SignalProvider)
    }
}

#[async_trait]
impl CandleProvider for DynamicMockConnector {
    async fn candles(&self, symbol: &str, req: CandleRequest) -> Result<Vec<RawCandle>, ChartError> {
        // Log and snapshot the behavior without holding the lock across await points
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.candle_requests.push((symbol.to_string(), req));
            guard
                .candle_rules
                .get(&(symbol.to_string(), req.interval))
                .cloned()
        };
        match behavior {
            Some(b) => b.run().await,
            None => Err(ChartError::http_status(
                format!("/api/stocks/{symbol}?interval={}", req.interval),
                404,
            )),
        }
    }
}

#[async_trait]
impl SignalProvider for DynamicMockConnector {
    async fn signals(&self, symbol: &str, req: SignalRequest) -> Result<Vec<RawSignal>, ChartError> {
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.signal_requests.push((symbol.to_string(), req));
            guard.signal_rules.get(symbol).cloned()
        };
        match behavior {
            Some(b) => b.run().await,
            None => Err(ChartError::http_status(req.capability().as_str(), 404)),
        }
    }
}
