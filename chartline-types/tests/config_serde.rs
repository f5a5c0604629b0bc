use std::time::Duration;

use chartline_types::{
    ChartConfig, Interval, MarkerConfig, PipelineConfig, RetryConfig, SignalMode, Timeframe,
};

#[test]
fn chart_config_roundtrip() {
    let mut cfg = ChartConfig::default();
    cfg.pipeline.intervals = Some(vec![Interval::I5m, Interval::D1]);
    cfg.markers.mode = SignalMode::Basic;
    cfg.markers.retry = RetryConfig {
        attempts: 3,
        delay: Duration::from_millis(250),
    };

    let json = serde_json::to_string(&cfg).expect("serialize chart config");
    let de: ChartConfig = serde_json::from_str(&json).expect("deserialize chart config");

    assert_eq!(de, cfg);
    assert_eq!(de.markers.retry.delay.as_millis(), 250);
}

#[test]
fn defaults_match_documented_values() {
    let cfg = ChartConfig::default();
    assert_eq!(cfg.pipeline.min_valid_points, 10);
    assert!(cfg.pipeline.include_pre_post);
    assert_eq!(cfg.markers.retry.attempts, 5);
    assert_eq!(cfg.markers.retry.delay, Duration::from_millis(500));
    assert_eq!(cfg.viewport.initial_visible, 100);
    assert_eq!(cfg.viewport.resize_settle, Duration::from_millis(120));
    assert_eq!(cfg.indicators.bollinger_period, 20);
    assert!((cfg.indicators.bollinger_mult - 2.0).abs() < f64::EPSILON);
}

#[test]
fn interval_override_wins_over_timeframe() {
    let pipeline = PipelineConfig {
        intervals: Some(vec![Interval::D1]),
        ..PipelineConfig::default()
    };
    assert_eq!(pipeline.intervals_for(Timeframe::D1), vec![Interval::D1]);

    let pipeline = PipelineConfig::default();
    assert_eq!(
        pipeline.intervals_for(Timeframe::D1),
        vec![Interval::I1m, Interval::I5m, Interval::D1]
    );
}

#[test]
fn marker_mode_serializes_by_name() {
    let cfg = MarkerConfig::default();
    let v = serde_json::to_value(&cfg).unwrap();
    assert_eq!(v["mode"], "Enhanced");
}
