mod helpers;

use std::sync::Arc;
use std::time::Duration;

use chartline::{
    AttemptOutcome, CandleProvider, Chart, ChartConnector, ChartError, ChartStatus, Interval,
    OverlayKind, RawCandle, Timeframe,
};
use chartline_mock::{MockBehavior, MockConnector, RecordingSurface, SurfaceCall, fixtures};
use helpers::{AAPL, MSFT, THIN, chart_with, drain, dynamic_chart, fixture_chart, load, sel};

#[tokio::test(start_paused = true)]
async fn sparse_interval_falls_back_to_next_candidate() {
    let (chart, surface) = fixture_chart();
    assert_eq!(load(&chart, AAPL, Timeframe::D1).await, ChartStatus::Ready);

    let snap = chart.snapshot();
    assert_eq!(snap.active_interval, Some(Interval::I5m));
    assert_eq!(snap.candles.len(), 50);
    assert_eq!(surface.candles().len(), 50);
    assert_eq!(surface.volume().len(), 50);

    let report = snap.report.expect("report");
    assert_eq!(report.selected(), Some(Interval::I5m));
    assert_eq!(report.attempts.len(), 2, "1d must not be fetched");
    assert_eq!(
        report.attempts[0].outcome,
        AttemptOutcome::Insufficient { valid: 5 }
    );
}

#[tokio::test(start_paused = true)]
async fn too_few_points_everywhere_is_no_data() {
    let (chart, surface) = fixture_chart();
    assert_eq!(
        load(&chart, THIN, Timeframe::D5).await,
        ChartStatus::NoDataAvailable
    );
    assert_eq!(chart.status().to_string(), "No data available");

    let snap = chart.snapshot();
    assert_eq!(snap.active_interval, None);
    assert!(surface.candles().is_empty());
    let report = snap.report.expect("report");
    assert_eq!(report.attempts.len(), 4);
    assert!(
        report
            .attempts
            .iter()
            .all(|a| a.outcome == AttemptOutcome::Insufficient { valid: 10 })
    );
}

#[tokio::test(start_paused = true)]
async fn connector_failures_exhaust_to_no_data() {
    let (chart, _surface) = fixture_chart();
    assert_eq!(
        load(&chart, "FAIL", Timeframe::D1).await,
        ChartStatus::NoDataAvailable
    );
    let report = chart.snapshot().report.expect("report");
    assert_eq!(report.errors().len(), 3);
    assert!(
        report
            .errors()
            .iter()
            .all(|e| matches!(e, ChartError::Connector { .. }))
    );
}

#[tokio::test(start_paused = true)]
async fn stalled_connector_times_out_per_interval() {
    let (chart, _surface) = fixture_chart();
    assert_eq!(
        load(&chart, "TIMEOUT", Timeframe::M6).await,
        ChartStatus::NoDataAvailable
    );
    let report = chart.snapshot().report.expect("report");
    assert!(matches!(
        report.errors().as_slice(),
        [ChartError::ProviderTimeout { .. }]
    ));
}

#[tokio::test(start_paused = true)]
async fn failures_and_timeouts_fall_through_to_later_interval() {
    let (chart, _surface, ctl) = dynamic_chart(RecordingSurface::new());
    ctl.set_candle_behavior(
        AAPL,
        Interval::I1m,
        MockBehavior::Fail(ChartError::http_status("/api/stocks/AAPL", 503)),
    )
    .await;
    ctl.set_candle_behavior(AAPL, Interval::I5m, MockBehavior::Hang)
        .await;
    ctl.set_candle_behavior(
        AAPL,
        Interval::D1,
        MockBehavior::Return(fixtures::candles::series(Interval::D1, 30, 50.0)),
    )
    .await;

    assert_eq!(load(&chart, AAPL, Timeframe::D1).await, ChartStatus::Ready);
    let snap = chart.snapshot();
    assert_eq!(snap.active_interval, Some(Interval::D1));
    let outcomes: Vec<_> = snap
        .report
        .expect("report")
        .attempts
        .into_iter()
        .map(|a| a.outcome)
        .collect();
    assert!(matches!(
        &outcomes[..],
        [
            AttemptOutcome::Failed {
                error: ChartError::HttpStatus { status: 503, .. }
            },
            AttemptOutcome::Failed {
                error: ChartError::ProviderTimeout { .. }
            },
            AttemptOutcome::Accepted { valid: 30 },
        ]
    ));
}

#[tokio::test(start_paused = true)]
async fn status_walks_through_the_lifecycle() {
    let (chart, _surface, ctl) = dynamic_chart(RecordingSurface::new());
    ctl.set_candle_behavior(
        MSFT,
        Interval::I1m,
        MockBehavior::Delayed(
            Duration::from_secs(1),
            fixtures::candles::series(Interval::I1m, 30, 375.0),
        ),
    )
    .await;
    let mut rx = chart.subscribe_status();
    chart.select(sel(MSFT, Timeframe::D1));

    let mut seen = vec![rx.borrow_and_update().clone()];
    while !seen.last().is_some_and(ChartStatus::is_terminal) {
        rx.changed().await.expect("sender alive");
        seen.push(rx.borrow_and_update().clone());
    }
    assert_eq!(seen.first(), Some(&ChartStatus::Initializing));
    assert_eq!(seen.last(), Some(&ChartStatus::Ready));
    assert!(seen.contains(&ChartStatus::FetchingData));
}

#[tokio::test(start_paused = true)]
async fn newer_selection_wins_over_slow_older_one() {
    let (chart, surface, ctl) = dynamic_chart(RecordingSurface::new());
    let slow = fixtures::candles::series(Interval::I1m, 40, 100.0);
    let fast = fixtures::candles::series(Interval::I1m, 60, 300.0);
    ctl.set_candle_behavior(
        AAPL,
        Interval::I1m,
        MockBehavior::Delayed(Duration::from_secs(2), slow),
    )
    .await;
    ctl.set_candle_behavior(MSFT, Interval::I1m, MockBehavior::Return(fast))
        .await;
    ctl.set_signal_behavior(AAPL, MockBehavior::Return(Vec::new()))
        .await;
    ctl.set_signal_behavior(MSFT, MockBehavior::Return(Vec::new()))
        .await;

    chart.select(sel(AAPL, Timeframe::D1));
    // let the first fetch get in flight
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(chart.status(), ChartStatus::FetchingData);

    assert_eq!(load(&chart, MSFT, Timeframe::D1).await, ChartStatus::Ready);
    drain().await;

    let snap = chart.snapshot();
    assert_eq!(snap.generation, 2);
    assert_eq!(snap.selection, Some(sel(MSFT, Timeframe::D1)));
    assert_eq!(snap.candles.len(), 60);
    assert_eq!(surface.candles().len(), 60);
    assert!(surface.candles()[0].close > 250.0);
    assert_eq!(chart.status(), ChartStatus::Ready);
    assert_eq!(
        ctl.signal_requests()
            .await
            .iter()
            .filter(|(s, _)| s == AAPL)
            .count(),
        0,
        "stale session must not fetch markers"
    );
}

#[tokio::test(start_paused = true)]
async fn selection_change_clears_previous_session() {
    let (chart, surface) = fixture_chart();
    assert_eq!(load(&chart, MSFT, Timeframe::D1).await, ChartStatus::Ready);
    drain().await;
    assert!(!chart.snapshot().markers.is_empty());

    assert_eq!(
        load(&chart, THIN, Timeframe::D1).await,
        ChartStatus::NoDataAvailable
    );
    let snap = chart.snapshot();
    assert!(snap.candles.is_empty());
    assert!(snap.markers.is_empty());
    assert!(surface.markers().is_empty());
    assert_eq!(surface.clears(), 2);
}

#[tokio::test(start_paused = true)]
async fn set_symbol_keeps_timeframe_and_rejects_blank() {
    let (chart, _surface) = fixture_chart();
    chart.set_timeframe(Timeframe::M6);
    chart.set_symbol(" msft ").expect("valid");
    assert_eq!(chart.settled().await, ChartStatus::Ready);
    let snap = chart.snapshot();
    assert_eq!(snap.selection, Some(sel(MSFT, Timeframe::M6)));
    assert_eq!(snap.active_interval, Some(Interval::D1));

    let err = chart.set_symbol("   ").expect_err("blank symbol");
    assert!(matches!(err, ChartError::InvalidArg(_)));
    assert_eq!(chart.snapshot().generation, 1);
}

#[tokio::test(start_paused = true)]
async fn refresh_starts_a_new_generation() {
    let (chart, _surface) = fixture_chart();
    chart.refresh();
    assert_eq!(chart.snapshot().generation, 0);

    load(&chart, MSFT, Timeframe::D1).await;
    chart.refresh();
    assert_eq!(chart.settled().await, ChartStatus::Ready);
    assert_eq!(chart.snapshot().generation, 2);
}

#[tokio::test(start_paused = true)]
async fn render_rejection_becomes_error_status() {
    let surface = RecordingSurface::new();
    surface.fail_renders_with("canvas lost");
    let (chart, surface) = chart_with(Arc::new(MockConnector::new()), surface);

    let status = load(&chart, MSFT, Timeframe::D1).await;
    assert_eq!(status, ChartStatus::Error("render failed: canvas lost".into()));
    drain().await;
    assert!(surface.markers().is_empty());
    assert!(
        !surface
            .calls()
            .iter()
            .any(|c| matches!(c, SurfaceCall::Markers(_)))
    );
}

#[tokio::test(start_paused = true)]
async fn overlays_follow_indicator_toggles() {
    let (chart, surface) = fixture_chart();
    load(&chart, MSFT, Timeframe::D1).await;
    let n = surface.candles().len();

    assert_eq!(surface.line(OverlayKind::Ema).len(), n);
    assert!(surface.line(OverlayKind::BollingerUpper).is_empty());

    chart.set_bollinger_enabled(true);
    for kind in [
        OverlayKind::BollingerUpper,
        OverlayKind::BollingerMiddle,
        OverlayKind::BollingerLower,
    ] {
        assert_eq!(surface.line(kind).len(), n);
    }
    let upper = surface.line(OverlayKind::BollingerUpper);
    let lower = surface.line(OverlayKind::BollingerLower);
    assert!(upper.iter().zip(&lower).all(|(u, l)| u.value >= l.value));

    chart.set_bollinger_enabled(false);
    chart.set_ema_enabled(false);
    assert!(surface.line(OverlayKind::BollingerUpper).is_empty());
    assert!(surface.line(OverlayKind::BollingerMiddle).is_empty());
    assert!(surface.line(OverlayKind::Ema).is_empty());
    assert_eq!(surface.candles().len(), n, "toggles never refetch");
    assert_eq!(chart.snapshot().generation, 1);
}

#[tokio::test]
async fn builder_requires_collaborators() {
    let err = Chart::builder()
        .with_surface(Arc::new(RecordingSurface::new()))
        .build()
        .err()
        .expect("missing connector");
    assert!(matches!(err, ChartError::InvalidArg(_)));

    let err = Chart::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .build()
        .err()
        .expect("missing surface");
    assert!(matches!(err, ChartError::InvalidArg(_)));

    struct SignalsOnly;
    impl ChartConnector for SignalsOnly {
        fn name(&self) -> &'static str {
            "signals-only"
        }
        fn as_candle_provider(&self) -> Option<&dyn CandleProvider> {
            None
        }
    }
    let err = Chart::builder()
        .with_connector(Arc::new(SignalsOnly))
        .with_surface(Arc::new(RecordingSurface::new()))
        .build()
        .err()
        .expect("no candles");
    assert!(matches!(err, ChartError::Unsupported { .. }));

    let err = Chart::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .with_surface(Arc::new(RecordingSurface::new()))
        .intervals(&[])
        .build()
        .err()
        .expect("no intervals");
    assert!(matches!(err, ChartError::InvalidArg(_)));
}

#[tokio::test(start_paused = true)]
async fn invalid_rows_never_reach_the_surface() {
    let (chart, surface, ctl) = dynamic_chart(RecordingSurface::new());
    let mut rows = fixtures::candles::series(Interval::I1m, 20, 10.0);
    rows.push(RawCandle {
        high: Some(f64::INFINITY),
        ..rows[3]
    });
    rows.push(RawCandle {
        time: None,
        ..rows[4]
    });
    ctl.set_candle_behavior(AAPL, Interval::I1m, MockBehavior::Return(rows))
        .await;

    assert_eq!(load(&chart, AAPL, Timeframe::D1).await, ChartStatus::Ready);
    let candles = surface.candles();
    assert_eq!(candles.len(), 20);
    assert!(candles.windows(2).all(|w| w[0].time < w[1].time));
    assert!(candles.iter().all(|c| c.high.is_finite()));
}

#[tokio::test(start_paused = true)]
async fn shutdown_aborts_pending_work() {
    let (chart, _surface, ctl) = dynamic_chart(RecordingSurface::new());
    ctl.set_candle_behavior(AAPL, Interval::I1m, MockBehavior::Hang)
        .await;
    chart.select(sel(AAPL, Timeframe::D1));
    tokio::time::sleep(Duration::from_millis(100)).await;
    chart.shutdown().await;
}
