use chartline_core::{
    CandleRequest, ChartConnector, ChartError, Interval, MarkerConfig, SignalMode, SignalRequest,
};
use chartline_http::{HttpConnector, adapter::ChartApi};
use serde_json::json;

const REQ: CandleRequest = CandleRequest {
    interval: Interval::I15m,
    include_pre_post: false,
};

#[tokio::test]
async fn other_error_is_tagged_with_connector_name() {
    let api = <dyn ChartApi>::from_fn(|_path, _query| Err(ChartError::Other("reset".into())));
    let c = HttpConnector::from_adapter(api);
    let err = c
        .as_candle_provider()
        .expect("candles")
        .candles("AAPL", REQ)
        .await
        .expect_err("err");
    match err {
        ChartError::Connector { connector, msg } => {
            assert_eq!(connector, "chartline-http");
            assert_eq!(msg, "reset");
        }
        other => panic!("expected connector error, got {other:?}"),
    }
}

#[tokio::test]
async fn http_status_passes_through() {
    let api = <dyn ChartApi>::from_fn(|path, _query| {
        Err(ChartError::http_status(format!("/{path}"), 503))
    });
    let c = HttpConnector::from_adapter(api);
    let err = c
        .as_candle_provider()
        .expect("candles")
        .candles("AAPL", REQ)
        .await
        .expect_err("err");
    assert_eq!(err, ChartError::http_status("/api/stocks/AAPL", 503));
    assert!(err.is_transient());
}

#[tokio::test]
async fn request_parameters_follow_the_request() {
    let api = <dyn ChartApi>::from_fn(|path, query| {
        let q: Vec<(&str, &str)> = query.iter().map(|(k, v)| (*k, v.as_str())).collect();
        match path {
            "api/stocks/AAPL" => {
                assert_eq!(q, [("interval", "15m"), ("includePrePost", "false")]);
                Ok(json!([]))
            }
            "api/enhanced-signals/AAPL" => {
                assert_eq!(q, [("interval", "15m"), ("minConfluence", "0.75")]);
                Ok(json!({"signals": []}))
            }
            other => Err(ChartError::http_status(other, 404)),
        }
    });
    let c = HttpConnector::from_adapter(api);

    let rows = c
        .as_candle_provider()
        .expect("candles")
        .candles("AAPL", REQ)
        .await
        .expect("ok");
    assert!(rows.is_empty());

    let cfg = MarkerConfig {
        min_confluence: 0.75,
        ..MarkerConfig::default()
    };
    let req = SignalRequest::for_mode(SignalMode::Enhanced, Interval::I15m, &cfg);
    let signals = c
        .as_signal_provider()
        .expect("signals")
        .signals("AAPL", req)
        .await
        .expect("ok");
    assert!(signals.is_empty());
}
