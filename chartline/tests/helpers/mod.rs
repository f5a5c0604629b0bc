// Shared fixtures for the chart integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use chartline::{Chart, ChartConnector, ChartStatus, Selection, Timeframe};
use chartline_mock::{DynamicMockConnector, DynamicMockController, MockConnector, RecordingSurface};

pub const AAPL: &str = "AAPL";
pub const MSFT: &str = "MSFT";
pub const THIN: &str = "THIN";

pub fn sel(symbol: &str, tf: Timeframe) -> Selection {
    Selection::new(symbol, tf).expect("valid symbol")
}

/// Fixture connector plus a fresh ready surface.
pub fn fixture_chart() -> (Chart, Arc<RecordingSurface>) {
    chart_with(Arc::new(MockConnector::new()), RecordingSurface::new())
}

pub fn chart_with(
    connector: Arc<dyn ChartConnector>,
    surface: RecordingSurface,
) -> (Chart, Arc<RecordingSurface>) {
    let surface = Arc::new(surface);
    let chart = Chart::builder()
        .with_connector(connector)
        .with_surface(surface.clone())
        .request_timeout(Duration::from_secs(1))
        .build()
        .expect("chart builds");
    (chart, surface)
}

pub fn dynamic_chart(
    surface: RecordingSurface,
) -> (Chart, Arc<RecordingSurface>, DynamicMockController) {
    let (connector, controller) = DynamicMockConnector::new_with_controller("dyn");
    let (chart, surface) = chart_with(connector, surface);
    (chart, surface, controller)
}

/// Select and wait for the session to settle.
pub async fn load(chart: &Chart, symbol: &str, tf: Timeframe) -> ChartStatus {
    chart.select(sel(symbol, tf));
    chart.settled().await
}

/// Let spawned marker and resize tasks run to completion (time is paused).
pub async fn drain() {
    tokio::time::sleep(Duration::from_secs(5)).await;
}
