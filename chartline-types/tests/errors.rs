use chartline_types::{Capability, ChartError};

#[test]
fn transient_classification() {
    assert!(ChartError::provider_timeout("http", "candles").is_transient());
    assert!(ChartError::http_status("/api/stocks/AAPL", 503).is_transient());
    assert!(ChartError::http_status("/api/stocks/AAPL", 429).is_transient());
    assert!(!ChartError::http_status("/api/stocks/AAPL", 404).is_transient());
    assert!(!ChartError::Decode("bad".into()).is_transient());
    assert!(ChartError::SurfaceNotReady.is_transient());
}

#[test]
fn error_messages_are_stable() {
    assert_eq!(
        ChartError::http_status("candles", 500).to_string(),
        "candles returned HTTP 500"
    );
    assert_eq!(
        ChartError::unsupported(Capability::EnhancedSignals.as_str()).to_string(),
        "unsupported capability: signals/enhanced"
    );
}

#[test]
fn error_roundtrips_through_serde() {
    let e = ChartError::connector("chartline-http", "connection refused");
    let json = serde_json::to_string(&e).unwrap();
    let de: ChartError = serde_json::from_str(&json).unwrap();
    assert_eq!(de, e);
}
