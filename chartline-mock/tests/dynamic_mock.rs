use std::time::Duration;

use chartline_core::{
    CandleRequest, ChartConnector, ChartError, Interval, MarkerConfig, RawCandle, RawSignal,
    SignalMode, SignalRequest,
};
use chartline_mock::{DynamicMockConnector, MockBehavior, MockConnector, fixtures};

const fn req(interval: Interval) -> CandleRequest {
    CandleRequest {
        interval,
        include_pre_post: true,
    }
}

#[tokio::test]
async fn candles_return_configured_series() {
    let (mock, controller) = DynamicMockConnector::new_with_controller("P0");
    let rows = vec![RawCandle::new(60, 1.0, 2.0, 0.5, 1.5, 10.0)];
    controller
        .set_candle_behavior("AAPL", Interval::I5m, MockBehavior::Return(rows.clone()))
        .await;

    let cp = mock.as_candle_provider().expect("candle provider");
    let got = cp.candles("AAPL", req(Interval::I5m)).await.expect("ok");
    assert_eq!(got, rows);
}

#[tokio::test]
async fn candles_fail_with_configured_error() {
    let (mock, controller) = DynamicMockConnector::new_with_controller("P0");
    let err = ChartError::Other("boom".to_string());
    controller
        .set_candle_behavior("MSFT", Interval::I1m, MockBehavior::Fail(err.clone()))
        .await;

    let cp = mock.as_candle_provider().expect("candle provider");
    let got = cp.candles("MSFT", req(Interval::I1m)).await.expect_err("err");
    assert_eq!(got, err);
}

#[tokio::test]
async fn unconfigured_pair_is_not_found() {
    let (mock, controller) = DynamicMockConnector::new_with_controller("P0");
    controller
        .set_candle_behavior("AAPL", Interval::I5m, MockBehavior::Return(Vec::new()))
        .await;

    let cp = mock.as_candle_provider().expect("candle provider");
    let err = cp.candles("AAPL", req(Interval::I1m)).await.expect_err("err");
    assert!(matches!(err, ChartError::HttpStatus { status: 404, .. }));
}

#[tokio::test(start_paused = true)]
async fn hang_never_resolves() {
    let (mock, controller) = DynamicMockConnector::new_with_controller("P0");
    controller
        .set_candle_behavior("AAPL", Interval::D1, MockBehavior::Hang)
        .await;

    let cp = mock.as_candle_provider().expect("candle provider");
    let res = tokio::time::timeout(
        Duration::from_secs(30),
        cp.candles("AAPL", req(Interval::D1)),
    )
    .await;
    assert!(res.is_err(), "hang should outlive the timeout");
}

#[tokio::test(start_paused = true)]
async fn delayed_resolves_after_delay() {
    let (mock, controller) = DynamicMockConnector::new_with_controller("P0");
    controller
        .set_signal_behavior(
            "AAPL",
            MockBehavior::Delayed(Duration::from_secs(2), vec![RawSignal::typed(60, "BUY")]),
        )
        .await;

    let sp = mock.as_signal_provider().expect("signal provider");
    let r = SignalRequest::for_mode(SignalMode::Enhanced, Interval::I1m, &MarkerConfig::default());
    let start = tokio::time::Instant::now();
    let got = sp.signals("AAPL", r).await.expect("ok");
    assert_eq!(got.len(), 1);
    assert!(start.elapsed() >= Duration::from_secs(2));
}

#[tokio::test]
async fn requests_are_logged_and_cleared() {
    let (mock, controller) = DynamicMockConnector::new_with_controller("P0");
    let cp = mock.as_candle_provider().expect("candle provider");
    let sp = mock.as_signal_provider().expect("signal provider");

    let _ = cp.candles("AAPL", req(Interval::I1m)).await;
    let _ = cp.candles("AAPL", req(Interval::I5m)).await;
    let r = SignalRequest::for_mode(SignalMode::Basic, Interval::I5m, &MarkerConfig::default());
    let _ = sp.signals("AAPL", r).await;

    let candles: Vec<Interval> = controller
        .candle_requests()
        .await
        .into_iter()
        .map(|(_, r)| r.interval)
        .collect();
    assert_eq!(candles, vec![Interval::I1m, Interval::I5m]);

    let signals = controller.signal_requests().await;
    assert_eq!(signals.len(), 1);
    assert!(matches!(
        signals[0].1,
        SignalRequest::Historical {
            interval: Interval::I5m,
            short_period: 9,
            long_period: 21,
        }
    ));

    controller.clear_all_behaviors().await;
    assert!(controller.candle_requests().await.is_empty());
    assert!(controller.signal_requests().await.is_empty());
}

#[tokio::test]
async fn fixture_connector_serves_known_symbols() {
    let mock = MockConnector::new();
    let cp = mock.as_candle_provider().expect("candle provider");

    let rows = cp.candles("AAPL", req(Interval::I5m)).await.expect("ok");
    assert_eq!(rows.len(), 50);
    assert_eq!(rows[0].time, Some(fixtures::candles::session_start() as f64));

    let err = cp.candles("ZZZZ", req(Interval::I5m)).await.expect_err("err");
    assert!(matches!(err, ChartError::HttpStatus { status: 404, .. }));

    let err = cp.candles("FAIL", req(Interval::I5m)).await.expect_err("err");
    assert!(matches!(err, ChartError::Connector { .. }));
}

#[test]
fn session_start_is_the_us_open() {
    assert_eq!(fixtures::candles::session_start(), 1_704_205_800);
}
